use super::common::failed_tool_result;
use super::note_write::{NoteArgs, NoteWriteTool};
use super::traits::Tool;
use super::types::{ToolKind, ToolResult, ToolSpec};
use std::collections::HashMap;
use std::fmt::Write;
use std::str::FromStr;
use std::sync::Arc;

/// Central registry for tool instances.
///
/// Read-only once built; shared between ReAct runs and graph passes behind an
/// `Arc`. Per-run call counters live with the caller.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<ToolKind, Arc<dyn Tool>>,
    /// Typed handle to the note writer for callers holding a finished draft.
    notes: Option<Arc<NoteWriteTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Replaces any existing tool of the same kind.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let tool: Arc<dyn Tool> = Arc::from(tool);
        self.tools.insert(tool.kind(), tool);
    }

    /// Register the note writer both as `save_note` and as the draft sink.
    pub fn register_notes(&mut self, tool: NoteWriteTool) {
        let tool = Arc::new(tool);
        self.tools.insert(ToolKind::SaveNote, tool.clone());
        self.notes = Some(tool);
    }

    pub fn get(&self, kind: ToolKind) -> Option<&Arc<dyn Tool>> {
        self.tools.get(&kind)
    }

    /// Map a directive name to a registered tool kind.
    ///
    /// `None` covers both names outside [`ToolKind`] and kinds that were never
    /// registered.
    pub fn resolve(&self, name: &str) -> Option<ToolKind> {
        ToolKind::from_str(name)
            .ok()
            .filter(|kind| self.tools.contains_key(kind))
    }

    /// Return sorted list of registered tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        let mut kinds: Vec<ToolKind> = self.tools.keys().copied().collect();
        kinds.sort_unstable();
        kinds.into_iter().map(ToolKind::as_str).collect()
    }

    /// Specs for all registered tools, in [`ToolKind`] order.
    pub fn specs(&self) -> Vec<ToolSpec> {
        let mut kinds: Vec<ToolKind> = self.tools.keys().copied().collect();
        kinds.sort_unstable();
        kinds
            .into_iter()
            .filter_map(|kind| self.tools.get(&kind).map(|tool| tool.spec()))
            .collect()
    }

    /// Numbered tool list for instruction preambles.
    pub fn describe_for_prompt(&self) -> String {
        let mut out = String::new();
        for (idx, spec) in self.specs().iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {} - {} e.g. {}",
                idx + 1,
                spec.name,
                spec.description,
                spec.usage
            );
        }
        out
    }

    /// Persist an approved draft verbatim. The draft is never split as
    /// `title | body`; its title comes from the first non-empty line.
    pub async fn save_draft(&self, draft: &str) -> ToolResult {
        let Some(notes) = &self.notes else {
            return failed_tool_result(format!("Tool not registered: {}", ToolKind::SaveNote));
        };

        match NoteArgs::from_draft(draft) {
            Ok(note) => notes.save(&note).await,
            Err(e) => {
                tracing::info!(tool = %ToolKind::SaveNote, error = %e, "draft rejected");
                failed_tool_result(e.to_string())
            }
        }
    }

    /// Execute a tool. Never fails: errors come back as a failed result.
    pub async fn execute(&self, kind: ToolKind, argument: &str) -> ToolResult {
        let Some(tool) = self.tools.get(&kind) else {
            return failed_tool_result(format!("Tool not registered: {kind}"));
        };

        match tool.execute(argument).await {
            Ok(result) => {
                if let Some(error) = &result.error {
                    tracing::info!(tool = %kind, error = %error, "tool reported failure");
                }
                result
            }
            Err(e) => {
                tracing::warn!(tool = %kind, error = %e, "tool execution failed");
                failed_tool_result(format!("{kind} failed: {e}"))
            }
        }
    }
}
