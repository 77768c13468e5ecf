use crate::providers::CompletionClient;
use std::fmt::Write;

const CONTEXT_TURNS: usize = 5;
const SUMMARY_TURNS: usize = 10;

pub const DEFAULT_GOAL: &str = "Learn agentic AI in 3 months";
pub(crate) const EMPTY_SUMMARY: &str = "No history yet. Ask some questions first.";

const TUTOR_PROMPT: &str = "You are a helpful AI tutor helping the user learn Agentic AI and \
related topics. Use the conversation context and their stated goal to give clear, concise answers.";

const SUMMARY_PROMPT: &str = "You are a study summary assistant. I will give you a recent \
conversation between a learner and an AI tutor. Summarize what the learner asked and what key \
concepts were explained. Provide a concise bullet-point summary.";

#[derive(Debug, Clone, PartialEq, Eq)]
struct ChatTurn {
    user: String,
    assistant: String,
}

/// Tutor chat with a short rolling context window.
pub struct StudyBuddy {
    client: CompletionClient,
    goal: String,
    turns: Vec<ChatTurn>,
}

impl StudyBuddy {
    pub fn new(client: CompletionClient, goal: Option<&str>) -> Self {
        let goal = goal
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .unwrap_or(DEFAULT_GOAL)
            .to_string();
        Self {
            client,
            goal,
            turns: Vec::new(),
        }
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn is_summary_command(input: &str) -> bool {
        let input = input.trim();
        input.eq_ignore_ascii_case("/summary") || input.eq_ignore_ascii_case("summary")
    }

    fn prompt_for(&self, input: &str) -> String {
        let start = self.turns.len().saturating_sub(CONTEXT_TURNS);
        let context = render_turns(&self.turns[start..]);
        format!(
            "{TUTOR_PROMPT}\n\nUser's goal: {}\n\nRecent conversation:\n{context}\n\nNow the user asks: {input}\n\nAssistant:",
            self.goal
        )
    }

    pub async fn ask(&mut self, input: &str) -> String {
        let prompt = self.prompt_for(input);
        let reply = self.client.complete(&prompt).await.trim().to_string();
        self.turns.push(ChatTurn {
            user: input.to_string(),
            assistant: reply.clone(),
        });
        reply
    }

    pub async fn summarize(&self) -> String {
        if self.turns.is_empty() {
            return EMPTY_SUMMARY.to_string();
        }
        let start = self.turns.len().saturating_sub(SUMMARY_TURNS);
        let prompt = format!(
            "{SUMMARY_PROMPT}\n\nConversation:\n{}\n\nSummary:",
            render_turns(&self.turns[start..])
        );
        self.client.complete(&prompt).await.trim().to_string()
    }
}

fn render_turns(turns: &[ChatTurn]) -> String {
    let mut out = String::new();
    for turn in turns {
        let _ = writeln!(out, "User: {}\nAssistant: {}", turn.user, turn.assistant);
    }
    out
}
