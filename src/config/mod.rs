pub mod schema;

pub use schema::{
    AgentConfig, Config, HistoryConfig, InteractiveConfig, KbEntry, KnowledgeBaseConfig,
    NoteStrategy, NotesConfig, ProviderConfig, RouterConfig,
};
