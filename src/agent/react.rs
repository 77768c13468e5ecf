use super::directive::{ActionDirective, Directive, interpret_step};
use crate::config::Config;
use crate::providers::CompletionClient;
use crate::tools::{ToolKind, ToolRegistry, ToolResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

// ── Constants ────────────────────────────────────────────────────────────────

/// Absolute upper bound on reasoning steps, regardless of configuration.
pub(crate) const REACT_STEP_HARD_CAP: u32 = 25;

const REACT_INSTRUCTIONS: &str = "\
You are a helpful AI agent that uses ReAct (Reason + Act).
You can use the following tools:
{tools}
You MUST follow this format exactly:

Thought: your reasoning here
Action: tool_name[argument]

After each Action you will be given an Observation with the tool result.
Never write an Observation yourself.
You can repeat Thought/Action several times.
When you are ready to answer the user, output:

Final Answer: your final answer here

DO NOT skip 'Final Answer:'.";

const CONTINUE_INSTRUCTION: &str =
    "\nContinue with the next Thought and Action, or give the Final Answer.\n";

pub(crate) const EMPTY_FINAL_ANSWER: &str =
    "The agent produced an empty final answer. Please rephrase the question.";
pub(crate) const UNRECOGNIZED_STEP: &str = "I could not determine an action or final answer.";
pub(crate) const MALFORMED_ACTION: &str = "I could not parse the action.";
pub(crate) const STEP_LIMIT_REACHED: &str =
    "I reached the maximum number of reasoning steps without a final answer.";

// ── Public types ─────────────────────────────────────────────────────────────

/// Drives the Thought/Action/Observation cycle against a completion backend.
///
/// The loop itself is stateless between runs; the transcript and the effect
/// ledger live inside one [`ReactLoop::run`] call.
pub struct ReactLoop {
    client: CompletionClient,
    registry: Arc<ToolRegistry>,
    max_steps: u32,
    effect_cap: u32,
}

/// Record of a single tool invocation within the loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRecord {
    /// Name as written by the model; may not resolve to a tool.
    pub name: String,
    pub argument: String,
    pub observation: String,
    pub step: u32,
}

/// Why the loop terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactStopReason {
    /// The model produced a non-empty final answer.
    FinalAnswer,
    /// The model produced the final-answer marker with nothing after it.
    EmptyFinalAnswer,
    /// A step contained neither an action nor a final answer.
    Unrecognized,
    /// An `Action:` line did not fit the directive grammar.
    MalformedAction,
    /// The step budget ran out.
    StepLimit,
    /// An effectful tool hit its per-run cap.
    EffectLimit,
}

/// Final output of a [`ReactLoop::run`] invocation.
#[derive(Debug, Clone)]
pub struct ReactOutcome {
    pub answer: String,
    pub stop_reason: ReactStopReason,
    /// Completion requests issued.
    pub steps: u32,
    pub tool_calls: Vec<ToolCallRecord>,
}

// ── Internal types ───────────────────────────────────────────────────────────

/// Per-run invocation counts for effectful tools.
#[derive(Default)]
struct EffectLedger {
    counts: HashMap<ToolKind, u32>,
    last_output: Option<String>,
}

impl EffectLedger {
    fn record(&mut self, kind: ToolKind, result: &ToolResult) {
        if !kind.is_effectful() {
            return;
        }
        *self.counts.entry(kind).or_insert(0) += 1;
        if result.success {
            self.last_output = Some(result.output.clone());
        }
    }

    fn exhausted(&self, cap: u32) -> Option<ToolKind> {
        let mut kinds: Vec<_> = self
            .counts
            .iter()
            .filter(|(_, count)| **count >= cap)
            .map(|(kind, _)| *kind)
            .collect();
        kinds.sort_unstable();
        kinds.into_iter().next()
    }

    fn limit_message(&self, kind: ToolKind, cap: u32) -> String {
        match &self.last_output {
            Some(output) => format!(
                "I stopped after {cap} {kind} calls in this session. Last result: {output}"
            ),
            None => format!(
                "I stopped after {cap} {kind} calls in this session. None of them wrote anything."
            ),
        }
    }
}

struct RunState {
    transcript: String,
    ledger: EffectLedger,
    tool_calls: Vec<ToolCallRecord>,
    steps: u32,
}

impl RunState {
    fn finish(self, answer: impl Into<String>, stop_reason: ReactStopReason) -> ReactOutcome {
        ReactOutcome {
            answer: answer.into(),
            stop_reason,
            steps: self.steps,
            tool_calls: self.tool_calls,
        }
    }
}

// ── Implementation ───────────────────────────────────────────────────────────

impl ReactLoop {
    pub fn new(
        client: CompletionClient,
        registry: Arc<ToolRegistry>,
        max_steps: u32,
        effect_cap: u32,
    ) -> Self {
        Self {
            client,
            registry,
            max_steps: max_steps.min(REACT_STEP_HARD_CAP),
            effect_cap,
        }
    }

    pub fn from_config(
        config: &Config,
        client: CompletionClient,
        registry: Arc<ToolRegistry>,
    ) -> Self {
        Self::new(
            client,
            registry,
            config.agent.max_steps,
            config.agent.save_note_cap,
        )
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Instruction preamble plus the user's question.
    pub fn preamble(&self, question: &str) -> String {
        let tools = self.registry.describe_for_prompt();
        format!(
            "{}\n\nUser question: {}\n",
            REACT_INSTRUCTIONS.replace("{tools}", &tools),
            question.trim()
        )
    }

    /// Run the loop to a terminal state.
    ///
    /// Every exit is a readable answer; backend and tool failures surface as
    /// text inside the transcript rather than as errors.
    pub async fn run(&self, question: &str) -> ReactOutcome {
        let mut state = RunState {
            transcript: self.preamble(question),
            ledger: EffectLedger::default(),
            tool_calls: Vec::new(),
            steps: 0,
        };

        for step in 1..=self.max_steps {
            if let Some(kind) = state.ledger.exhausted(self.effect_cap) {
                tracing::info!(tool = %kind, cap = self.effect_cap, "effect limit reached");
                let answer = state.ledger.limit_message(kind, self.effect_cap);
                return state.finish(answer, ReactStopReason::EffectLimit);
            }

            let prompt = format!("{}{CONTINUE_INSTRUCTION}", state.transcript);
            let response = self.client.complete(&prompt).await;
            state.steps = step;
            tracing::debug!(step, text = %response, "react step generated");

            match interpret_step(&response) {
                Directive::Action { call, kept } => {
                    let observation = self.invoke(&call, &mut state.ledger).await;
                    tracing::info!(step, tool = %call.name, "tool observed");
                    state.transcript.push_str(&kept);
                    state.transcript.push('\n');
                    state.transcript.push_str(&format!("Observation: {observation}\n"));
                    state.tool_calls.push(ToolCallRecord {
                        name: call.name,
                        argument: call.argument,
                        observation,
                        step,
                    });
                }
                Directive::MalformedAction { line } => {
                    tracing::warn!(step, line = %line, "malformed action directive");
                    return state.finish(MALFORMED_ACTION, ReactStopReason::MalformedAction);
                }
                Directive::FinalAnswer(answer) if answer.is_empty() => {
                    tracing::warn!(step, "empty final answer");
                    return state.finish(EMPTY_FINAL_ANSWER, ReactStopReason::EmptyFinalAnswer);
                }
                Directive::FinalAnswer(answer) => {
                    tracing::debug!(step, "final answer");
                    return state.finish(answer, ReactStopReason::FinalAnswer);
                }
                Directive::Unrecognized => {
                    tracing::warn!(step, "step had neither action nor final answer");
                    return state.finish(UNRECOGNIZED_STEP, ReactStopReason::Unrecognized);
                }
            }
        }

        tracing::info!(max_steps = self.max_steps, "step limit reached");
        state.finish(STEP_LIMIT_REACHED, ReactStopReason::StepLimit)
    }

    async fn invoke(&self, call: &ActionDirective, ledger: &mut EffectLedger) -> String {
        let Some(kind) = self.registry.resolve(&call.name) else {
            tracing::warn!(tool = %call.name, "unknown tool requested");
            return format!(
                "Unknown tool: {}. Available tools: {}",
                call.name,
                self.registry.tool_names().join(", ")
            );
        };

        let result = self.registry.execute(kind, &call.argument).await;
        ledger.record(kind, &result);
        result.render()
    }
}
