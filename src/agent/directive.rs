//! Reading directives out of generated ReAct text.
//!
//! A step is one completion. Within it, the first line starting with
//! `Action:` wins over any `Final Answer:` marker, so a model cannot skip a
//! pending tool call by answering in the same breath.

use regex::Regex;
use std::sync::LazyLock;

const ACTION_PREFIX: &str = "Action:";
const FINAL_ANSWER_MARKER: &str = "Final Answer:";

static ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Action:\s*([A-Za-z_]+)\[(.*)\]\s*$").expect("action directive pattern is valid")
});

/// A parsed `Action: name[argument]` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDirective {
    pub name: String,
    pub argument: String,
}

/// What a single generated step asks the controller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Invoke a tool. `kept` is the step text through the action line; anything
    /// the model wrote after it is dropped.
    Action { call: ActionDirective, kept: String },
    /// A line started with `Action:` but did not fit the grammar.
    MalformedAction { line: String },
    /// Terminal answer; may be empty if the model emitted a bare marker.
    FinalAnswer(String),
    Unrecognized,
}

/// Parse one line as an action directive. `None` means "not an action line".
pub fn parse_action(line: &str) -> Option<ActionDirective> {
    let caps = ACTION_RE.captures(line.trim())?;
    Some(ActionDirective {
        name: caps[1].trim().to_string(),
        argument: caps[2].trim().to_string(),
    })
}

/// Index and trimmed text of the first line that starts with `Action:`.
pub fn find_action_line(text: &str) -> Option<(usize, &str)> {
    text.lines()
        .map(str::trim)
        .enumerate()
        .find(|(_, line)| line.starts_with(ACTION_PREFIX))
}

/// Everything after the first `Final Answer:` marker, trimmed.
pub fn extract_final_answer(text: &str) -> Option<&str> {
    text.find(FINAL_ANSWER_MARKER)
        .map(|idx| text[idx + FINAL_ANSWER_MARKER.len()..].trim())
}

pub fn interpret_step(text: &str) -> Directive {
    if let Some((idx, line)) = find_action_line(text) {
        return match parse_action(line) {
            Some(call) => Directive::Action {
                call,
                kept: text.lines().take(idx + 1).collect::<Vec<_>>().join("\n"),
            },
            None => Directive::MalformedAction {
                line: line.to_string(),
            },
        };
    }

    match extract_final_answer(text) {
        Some(answer) => Directive::FinalAnswer(answer.to_string()),
        None => Directive::Unrecognized,
    }
}
