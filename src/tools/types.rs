use serde::{Deserialize, Serialize};

/// The closed set of capabilities the agent can name.
///
/// Names are the snake_case form used in `Action: name[arg]` lines, so an
/// unknown name is a failed `FromStr` rather than a silent lookup miss.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ToolKind {
    Calculator,
    KbLookup,
    SaveNote,
}

impl ToolKind {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Tools whose invocations leave a trace outside the process.
    pub fn is_effectful(self) -> bool {
        matches!(self, Self::SaveNote)
    }
}

/// Result of a tool execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub output: String,
    pub error: Option<String>,
}

impl ToolResult {
    /// Text form fed back to the model or stored in a tool message.
    pub fn render(&self) -> String {
        if let Some(ref error) = self.error {
            format!("[ERROR] {error}")
        } else {
            self.output.clone()
        }
    }
}

/// Description of a tool for prompt building
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub usage: String,
}
