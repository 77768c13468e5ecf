use super::executor::{Graph, PassOutcome};
use super::stages::StageContext;
use super::state::{ConversationState, Message, Role};

pub(crate) const NO_REPLY: &str = "(No assistant reply generated.)";

/// What one user turn produced.
#[derive(Debug, Clone)]
pub struct TurnReply {
    pub reply: String,
    pub outcome: PassOutcome,
}

/// Conversation history carried between graph passes.
///
/// Only the user's message and the visible reply are carried forward; tool
/// output and intermediate drafts stay inside the pass that made them.
pub struct GraphSession {
    graph: Graph,
    ctx: StageContext,
    history: Vec<Message>,
}

impl GraphSession {
    pub fn new(graph: Graph, ctx: StageContext) -> Self {
        Self {
            graph,
            ctx,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub async fn turn(&mut self, input: &str) -> TurnReply {
        let user = Message::user(input.trim());
        let mut messages = self.history.clone();
        messages.push(user.clone());
        let start = messages.len();

        let outcome = self
            .graph
            .run(ConversationState::with_messages(messages), &self.ctx)
            .await;
        tracing::debug!(path = ?outcome.path, "pass complete");

        let produced = outcome
            .state
            .messages()
            .get(start..)
            .unwrap_or_default()
            .iter()
            .rev()
            .find(|m| m.role() == Role::Assistant)
            .cloned();

        self.history.push(user);
        let reply = match produced {
            Some(message) => {
                let reply = message.content().to_string();
                self.history.push(message);
                reply
            }
            None => NO_REPLY.to_string(),
        };

        TurnReply { reply, outcome }
    }
}
