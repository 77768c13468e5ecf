use super::Config;
use std::path::PathBuf;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("REAGENT_BASE_URL")
            && !url.is_empty()
        {
            self.provider.base_url = url;
        }

        if let Ok(model) = std::env::var("REAGENT_MODEL")
            && !model.is_empty()
        {
            self.provider.model = model;
        }

        if let Ok(workspace) = std::env::var("REAGENT_WORKSPACE")
            && !workspace.is_empty()
        {
            self.workspace_dir = PathBuf::from(shellexpand::tilde(&workspace).as_ref());
        }

        if let Ok(steps) = std::env::var("REAGENT_MAX_STEPS")
            && let Ok(steps) = steps.parse::<u32>()
            && steps > 0
        {
            self.agent.max_steps = steps;
        }
    }
}
