pub mod directive;
pub mod react;

pub use directive::{ActionDirective, Directive, interpret_step, parse_action};
pub use react::{ReactLoop, ReactOutcome, ReactStopReason, ToolCallRecord};
