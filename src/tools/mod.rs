pub mod calculator;
mod common;
pub mod factory;
pub mod kb_lookup;
pub mod note_write;
pub mod registry;
pub mod traits;
pub mod types;

pub use calculator::CalculatorTool;
pub use factory::default_registry;
pub use kb_lookup::{KbLookupTool, KnowledgeBase};
pub use note_write::{NoteArgs, NoteWriteTool, note_file_stem};
pub use registry::ToolRegistry;
pub use traits::Tool;
pub use types::{ToolKind, ToolResult, ToolSpec};
