use super::common::{failed_tool_result, ok_tool_result};
use super::traits::Tool;
use super::types::{ToolKind, ToolResult};
use crate::config::KbEntry;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Read-only topic table, injected from `[knowledge_base]`.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<KbEntry>,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<KbEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| KbEntry::new(e.topic.trim().to_lowercase(), e.text))
            .filter(|e| !e.topic.is_empty())
            .collect();
        Self { entries }
    }

    /// First entry, in table order, whose topic occurs in the query.
    pub fn lookup(&self, query: &str) -> Option<&KbEntry> {
        let q = query.trim().to_lowercase();
        self.entries.iter().find(|entry| q.contains(&entry.topic))
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.topic.as_str())
    }

    fn miss_message(&self) -> String {
        let topics: Vec<String> = self.topics().map(|t| format!("'{t}'")).collect();
        if topics.is_empty() {
            return "I don't have an exact answer in my small knowledge base yet.".into();
        }
        format!(
            "I don't have an exact answer in my small knowledge base yet. Try asking about {}.",
            topics.join(", ")
        )
    }
}

pub struct KbLookupTool {
    kb: Arc<KnowledgeBase>,
}

impl KbLookupTool {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

impl Tool for KbLookupTool {
    fn kind(&self) -> ToolKind {
        ToolKind::KbLookup
    }

    fn description(&self) -> &str {
        "query a small knowledge base."
    }

    fn usage(&self) -> &str {
        "kb_lookup[what is an AI agent?]"
    }

    fn execute<'a>(
        &'a self,
        argument: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move {
            if argument.trim().is_empty() {
                return Ok(failed_tool_result("kb_lookup needs a query"));
            }
            Ok(match self.kb.lookup(argument) {
                Some(entry) => ok_tool_result(entry.text.clone()),
                None => ok_tool_result(self.kb.miss_message()),
            })
        })
    }
}
