use super::{
    AgentConfig, HistoryConfig, InteractiveConfig, KnowledgeBaseConfig, NotesConfig,
    ProviderConfig, RouterConfig,
};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Workspace directory - computed from home, not serialized
    #[serde(skip)]
    pub workspace_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub agent: AgentConfig,

    #[serde(default)]
    pub notes: NotesConfig,

    #[serde(default)]
    pub router: RouterConfig,

    #[serde(default)]
    pub knowledge_base: KnowledgeBaseConfig,

    #[serde(default)]
    pub interactive: InteractiveConfig,

    #[serde(default)]
    pub history: HistoryConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.max_steps == 0 {
            return Err(ConfigError::Validation(
                "agent.max_steps must be greater than 0".into(),
            ));
        }
        if self.agent.save_note_cap == 0 {
            return Err(ConfigError::Validation(
                "agent.save_note_cap must be greater than 0".into(),
            ));
        }
        if self.provider.model.trim().is_empty() {
            return Err(ConfigError::Validation("provider.model is empty".into()));
        }
        if let Some(temp) = self.provider.temperature
            && !(0.0..=2.0).contains(&temp)
        {
            return Err(ConfigError::Validation(format!(
                "provider.temperature {temp} is outside 0.0..=2.0"
            )));
        }
        let keyword_sets = [
            ("router.tool_keywords", &self.router.tool_keywords),
            ("router.summary_keywords", &self.router.summary_keywords),
            ("router.note_keywords", &self.router.note_keywords),
        ];
        for (name, set) in keyword_sets {
            if set.iter().all(|k| k.trim().is_empty()) {
                return Err(ConfigError::Validation(format!("{name} is empty")));
            }
        }
        if self.interactive.approve_token.trim().is_empty() {
            return Err(ConfigError::Validation(
                "interactive.approve_token is empty".into(),
            ));
        }
        Ok(())
    }

    /// Notes directory with `~` expanded and relative paths anchored at the workspace.
    pub fn notes_dir(&self) -> PathBuf {
        self.resolve_in_workspace(&self.notes.dir)
    }

    pub fn history_path(&self) -> PathBuf {
        self.resolve_in_workspace(&self.history.file)
    }

    fn resolve_in_workspace(&self, raw: &str) -> PathBuf {
        let expanded = shellexpand::tilde(raw);
        let path = Path::new(expanded.as_ref());
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_dir.join(path)
        }
    }
}
