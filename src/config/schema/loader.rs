use super::Config;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::Path;

impl Config {
    /// Load `~/.agemorph/config.toml`, writing defaults on first run.
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let agemorph_dir = home.join(".agemorph");
        let config_path = agemorph_dir.join("config.toml");

        if !agemorph_dir.exists() {
            fs::create_dir_all(&agemorph_dir).context("Failed to create .agemorph directory")?;
        }

        if config_path.exists() {
            return Self::load_from(&config_path);
        }

        let config = Self {
            config_path,
            ..Self::default()
        };
        config.save()?;
        config.finish_loading()
    }

    /// Load an explicit config file. Environment overrides are applied on top.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.config_path = path.to_path_buf();
        config.finish_loading()
    }

    fn finish_loading(mut self) -> Result<Self> {
        self.apply_env_overrides();
        self.validate()?;
        Ok(self)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
