use serde::{Deserialize, Serialize};

// ── [provider] ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Forwarded as `options.temperature` when set; the backend default otherwise.
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:11434".into()
}

fn default_model() -> String {
    "llama3".into()
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ── [agent] ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
    /// Maximum `save_note` invocations within one ReAct run.
    #[serde(default = "default_save_note_cap")]
    pub save_note_cap: u32,
}

fn default_max_steps() -> u32 {
    5
}

fn default_save_note_cap() -> u32 {
    3
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            save_note_cap: default_save_note_cap(),
        }
    }
}

// ── [notes] ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NoteStrategy {
    /// One markdown file per note, named after the sanitized title. Overwrites.
    #[default]
    PerNote,
    /// Timestamped entries appended to a single shared file.
    SessionLog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Relative paths resolve against the workspace directory.
    #[serde(default = "default_notes_dir")]
    pub dir: String,
    #[serde(default)]
    pub strategy: NoteStrategy,
    #[serde(default = "default_session_log_file")]
    pub session_log_file: String,
}

fn default_notes_dir() -> String {
    "notes".into()
}

fn default_session_log_file() -> String {
    "session_notes.md".into()
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            dir: default_notes_dir(),
            strategy: NoteStrategy::default(),
            session_log_file: default_session_log_file(),
        }
    }
}

// ── [router] ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(default = "default_tool_keywords")]
    pub tool_keywords: Vec<String>,
    #[serde(default = "default_summary_keywords")]
    pub summary_keywords: Vec<String>,
    #[serde(default = "default_note_keywords")]
    pub note_keywords: Vec<String>,
}

fn default_tool_keywords() -> Vec<String> {
    vec!["ai agent".into(), "langgraph".into(), "react pattern".into()]
}

fn default_summary_keywords() -> Vec<String> {
    vec!["summary".into(), "summarize".into()]
}

fn default_note_keywords() -> Vec<String> {
    vec!["note".into(), "save".into(), "record".into()]
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            tool_keywords: default_tool_keywords(),
            summary_keywords: default_summary_keywords(),
            note_keywords: default_note_keywords(),
        }
    }
}

// ── [knowledge_base] ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KbEntry {
    pub topic: String,
    pub text: String,
}

impl KbEntry {
    pub fn new(topic: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBaseConfig {
    /// Scanned in order; the first topic contained in the query wins.
    #[serde(default = "default_kb_entries")]
    pub entries: Vec<KbEntry>,
}

fn default_kb_entries() -> Vec<KbEntry> {
    vec![
        KbEntry::new(
            "ai agent",
            "An AI agent is a system that perceives its environment, reasons about it, \
             and takes actions to achieve goals.",
        ),
        KbEntry::new(
            "react pattern",
            "ReAct (Reason + Act) is a prompting pattern where the model interleaves \
             reasoning steps (Thought) with tool use (Action) and observations before \
             giving a Final Answer.",
        ),
        KbEntry::new(
            "langgraph",
            "LangGraph lets you build LLM workflows as graphs with nodes, edges, \
             and a shared state object.",
        ),
    ]
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            entries: default_kb_entries(),
        }
    }
}

// ── [interactive] ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractiveConfig {
    #[serde(default = "default_exit_keywords")]
    pub exit_keywords: Vec<String>,
    /// The only answer the approval prompt treats as consent.
    #[serde(default = "default_approve_token")]
    pub approve_token: String,
}

fn default_exit_keywords() -> Vec<String> {
    vec!["exit".into(), "quit".into(), "/exit".into()]
}

fn default_approve_token() -> String {
    "yes".into()
}

impl Default for InteractiveConfig {
    fn default() -> Self {
        Self {
            exit_keywords: default_exit_keywords(),
            approve_token: default_approve_token(),
        }
    }
}

// ── [history] ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_history_file")]
    pub file: String,
}

fn default_true() -> bool {
    true
}

fn default_history_file() -> String {
    "history.jsonl".into()
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: default_history_file(),
        }
    }
}
