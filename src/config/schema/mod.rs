mod core;
mod env_overrides;
mod loader;
mod sections;
#[cfg(test)]
mod test_env;

pub use self::core::Config;
pub use sections::{
    AgentConfig, HistoryConfig, InteractiveConfig, KbEntry, KnowledgeBaseConfig, NoteStrategy,
    NotesConfig, ProviderConfig, RouterConfig,
};
