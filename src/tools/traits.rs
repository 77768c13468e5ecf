use super::types::{ToolKind, ToolResult, ToolSpec};
use std::future::Future;
use std::pin::Pin;

/// Core tool trait: one text argument in, one [`ToolResult`] out.
///
/// An `Err` from `execute` is still contained: the registry converts it to a
/// failed result before it reaches the loop or a graph stage.
pub trait Tool: Send + Sync {
    fn kind(&self) -> ToolKind;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Invocation example in directive form, e.g. `calculator[2+3*4]`.
    fn usage(&self) -> &str;

    fn execute<'a>(
        &'a self,
        argument: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>>;

    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            usage: self.usage().to_string(),
        }
    }
}
