use super::Config;
use crate::error::ConfigError;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::Path;

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let reagent_dir = home.join(".reagent");
        let config_path = reagent_dir.join("config.toml");

        if !reagent_dir.exists() {
            fs::create_dir_all(&reagent_dir).context("Failed to create .reagent directory")?;
            fs::create_dir_all(reagent_dir.join("workspace"))
                .context("Failed to create workspace directory")?;
        }

        let mut config = if config_path.exists() {
            let mut config = Self::load_from(&config_path)?;
            config.workspace_dir = reagent_dir.join("workspace");
            config
        } else {
            let config = Self {
                config_path: config_path.clone(),
                workspace_dir: reagent_dir.join("workspace"),
                ..Self::default()
            };
            config.save()?;
            config
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load an explicit config file. The workspace is the file's directory.
    pub fn load_explicit(path: &Path) -> Result<Self> {
        let mut config = Self::load_from(path)?;
        config.workspace_dir = path
            .parent()
            .map_or_else(|| Path::new(".").to_path_buf(), Path::to_path_buf);
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(ConfigError::Io)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents).map_err(|e| ConfigError::Load {
            path: path.display().to_string(),
            message: e.message().to_string(),
        })?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = self.to_toml()?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_env::lock_env;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_config_anchors_workspace_at_file_dir() {
        let _lock = lock_env();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("reagent.toml");
        fs::write(&path, "[agent]\nmax_steps = 7\n").unwrap();

        let config = Config::load_explicit(&path).unwrap();
        assert_eq!(config.agent.max_steps, 7);
        assert_eq!(config.workspace_dir, tmp.path());
        assert_eq!(config.notes_dir(), tmp.path().join("notes"));
    }

    #[test]
    fn explicit_config_rejects_invalid_values() {
        let _lock = lock_env();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("reagent.toml");
        fs::write(&path, "[agent]\nsave_note_cap = 0\n").unwrap();

        let err = Config::load_explicit(&path).unwrap_err();
        assert!(format!("{err:#}").contains("save_note_cap"));
    }

    #[test]
    fn malformed_config_is_a_load_error() {
        let _lock = lock_env();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("reagent.toml");
        fs::write(&path, "[agent\nmax_steps = 7\n").unwrap();

        let err = Config::load_explicit(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Load { path: shown, .. }) if shown.ends_with("reagent.toml")
        ));
    }

    #[test]
    fn missing_config_is_an_io_error() {
        let _lock = lock_env();
        let tmp = TempDir::new().unwrap();
        let err = Config::load_explicit(&tmp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Io(_))
        ));
    }

    #[test]
    fn save_then_load_preserves_sections() {
        let _lock = lock_env();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        let mut config = Config {
            config_path: path.clone(),
            workspace_dir: tmp.path().to_path_buf(),
            ..Config::default()
        };
        config.notes.session_log_file = "log.md".into();
        config.save().unwrap();

        let loaded = Config::load_explicit(&path).unwrap();
        assert_eq!(loaded.notes.session_log_file, "log.md");
        assert_eq!(loaded.knowledge_base.entries.len(), 3);
    }
}
