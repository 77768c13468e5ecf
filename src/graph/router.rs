use super::executor::Stage;
use super::state::{ConversationState, Role};
use crate::config::RouterConfig;

/// Lowercased keyword sets the router matches against the latest user turn.
#[derive(Debug, Clone)]
pub struct RouterKeywords {
    tool: Vec<String>,
    summary: Vec<String>,
    note: Vec<String>,
}

impl RouterKeywords {
    pub fn from_config(config: &RouterConfig) -> Self {
        Self {
            tool: normalize(&config.tool_keywords),
            summary: normalize(&config.summary_keywords),
            note: normalize(&config.note_keywords),
        }
    }
}

impl Default for RouterKeywords {
    fn default() -> Self {
        Self::from_config(&RouterConfig::default())
    }
}

fn normalize(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

fn mentions(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| text.contains(k.as_str()))
}

/// Set intent flags from the most recent message, if the user wrote it.
pub fn router_stage(mut state: ConversationState, keywords: &RouterKeywords) -> ConversationState {
    let Some(last) = state.last() else {
        return state;
    };
    if last.role() != Role::User {
        return state;
    }

    let text = last.content().to_lowercase();
    state.need_tool = mentions(&text, &keywords.tool);
    state.summarize = mentions(&text, &keywords.summary);
    state.need_note = mentions(&text, &keywords.note);

    tracing::debug!(
        need_tool = state.need_tool,
        need_note = state.need_note,
        summarize = state.summarize,
        "router flags set"
    );
    state
}

/// Branch taken after the router stage. Tool lookup outranks the note pipeline.
pub fn route(state: &ConversationState) -> Stage {
    if state.need_tool {
        Stage::Tools
    } else if state.need_note {
        Stage::Review
    } else {
        Stage::Generate
    }
}
