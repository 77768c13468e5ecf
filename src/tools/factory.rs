use super::{CalculatorTool, KbLookupTool, KnowledgeBase, NoteWriteTool, ToolRegistry};
use crate::config::Config;
use std::sync::Arc;

/// Create the default tool registry: calculator, knowledge base and notes.
pub fn default_registry(config: &Config) -> ToolRegistry {
    let kb = Arc::new(KnowledgeBase::new(config.knowledge_base.entries.clone()));

    let mut registry = ToolRegistry::new();
    registry.register(Box::new(CalculatorTool::new()));
    registry.register(Box::new(KbLookupTool::new(kb)));
    registry.register_notes(NoteWriteTool::new(
        config.notes_dir(),
        config.notes.strategy,
        config.notes.session_log_file.clone(),
    ));
    registry
}
