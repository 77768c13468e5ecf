//! Stage functions of the conversation graph.
//!
//! Each stage takes the state by value and returns it. A stage whose guard
//! flag is unset returns the state untouched (persistence is the exception:
//! it always clears the note flags on the way out).

use super::router::RouterKeywords;
use super::state::{ConversationState, Message, Role};
use crate::providers::CompletionClient;
use crate::security::{ApprovalBroker, ApprovalDecision, ApprovalRequest};
use crate::tools::{ToolKind, ToolRegistry};
use std::sync::Arc;

pub(crate) const NOTE_CANCELLED: &str = "Note save cancelled by user.";
pub(crate) const NOTE_SAVED: &str = "Note saved (approved).";
pub(crate) const NOTE_NOT_SAVED: &str = "The note could not be saved.";
pub(crate) const NOTE_EMPTY: &str = "No note content to save.";
pub(crate) const SUMMARY_PREFIX: &str = "(Summary) ";

const GENERATE_PREAMBLE: &str = "\
You are a helpful assistant. You may see TOOL outputs in the conversation.
Use them when helpful, and respond clearly to the user.

Conversation so far:
";

const NOTE_DRAFT_PREAMBLE: &str = "\
Convert the following content into a concise, factual note.
Rules:
- Use '-' hyphen bullets only (ASCII)
- No conversational tone
- 3-6 bullet points or a short paragraph

";

const SUMMARY_PREAMBLE: &str = "\
You are a helpful assistant. Here is a conversation between a user and an assistant \
(and possibly tools). Please provide a short, clear summary of the key points.

";

/// Collaborators shared by every stage of a pass.
pub struct StageContext {
    pub client: CompletionClient,
    pub registry: Arc<ToolRegistry>,
    pub broker: Arc<dyn ApprovalBroker>,
    pub keywords: RouterKeywords,
}

/// Look the latest user message up in the knowledge base.
pub async fn tools_stage(mut state: ConversationState, ctx: &StageContext) -> ConversationState {
    if !state.need_tool {
        return state;
    }
    let Some(query) = state
        .last()
        .filter(|m| m.role() == Role::User)
        .map(|m| m.content().to_string())
    else {
        state.need_tool = false;
        return state;
    };

    let result = ctx.registry.execute(ToolKind::KbLookup, &query).await;
    state.push(Message::tool(result.render()));
    state.need_tool = false;
    state
}

/// Answer as the assistant, given the whole conversation.
pub async fn generate_stage(mut state: ConversationState, ctx: &StageContext) -> ConversationState {
    let prompt = format!(
        "{GENERATE_PREAMBLE}{}\n\nASSISTANT:",
        state.render_transcript()
    );
    let reply = ctx.client.complete(&prompt).await;
    state.push(Message::assistant(reply.trim()));
    state
}

/// Draft a note and hold it until a human decides.
pub async fn review_stage(mut state: ConversationState, ctx: &StageContext) -> ConversationState {
    if !state.need_note {
        return state;
    }

    let Some(source) = state
        .last_with_role(Role::Assistant)
        .or_else(|| state.last_with_role(Role::User))
        .map(|m| m.content().to_string())
    else {
        return state;
    };

    let prompt = format!("{NOTE_DRAFT_PREAMBLE}{source}\n\n\nNOTE:");
    let draft = ctx.client.complete(&prompt).await.trim().to_string();

    let request = ApprovalRequest {
        tool: ToolKind::SaveNote,
        draft: draft.clone(),
    };
    let decision = match ctx.broker.request_approval(&request).await {
        Ok(decision) => decision,
        Err(e) => {
            tracing::warn!(error = %e, "approval broker failed; treating as denial");
            ApprovalDecision::Denied {
                reason: format!("approval failed: {e}"),
            }
        }
    };

    match decision {
        ApprovalDecision::Approved => {
            tracing::info!("note approved");
            state.note_approved = true;
            state.pending_note = draft;
        }
        ApprovalDecision::Denied { reason } => {
            tracing::info!(reason = %reason, "note denied");
            state.note_approved = false;
            state.need_note = false;
            state.pending_note.clear();
            state.push(Message::assistant(NOTE_CANCELLED));
        }
    }
    state
}

/// Write the approved note. Clears the note flags on every exit.
pub async fn persist_stage(mut state: ConversationState, ctx: &StageContext) -> ConversationState {
    if state.need_note && state.note_approved {
        if state.pending_note.trim().is_empty() {
            state.push(Message::assistant(NOTE_EMPTY));
        } else {
            let result = ctx.registry.save_draft(&state.pending_note).await;
            state.push(Message::tool(result.render()));
            state.push(Message::assistant(if result.success {
                NOTE_SAVED
            } else {
                NOTE_NOT_SAVED
            }));
        }
    }

    state.need_note = false;
    state.note_approved = false;
    state.pending_note.clear();
    state
}

/// Append a short summary of the whole conversation.
pub async fn summarize_stage(
    mut state: ConversationState,
    ctx: &StageContext,
) -> ConversationState {
    if !state.summarize {
        return state;
    }
    state.summarize = false;
    if state.is_empty() {
        return state;
    }

    let prompt = format!(
        "{SUMMARY_PREAMBLE}{}\n\nSummary:",
        state.render_transcript()
    );
    let summary = ctx.client.complete(&prompt).await;
    state.push(Message::assistant(format!(
        "{SUMMARY_PREFIX}{}",
        summary.trim()
    )));
    state
}
