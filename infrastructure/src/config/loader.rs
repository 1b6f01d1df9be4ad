//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// File names searched in the current directory, in order
const PROJECT_FILES: [&str; 2] = ["switchboard.toml", ".switchboard.toml"];

/// Prefix of environment overrides
const ENV_PREFIX: &str = "SWITCHBOARD_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (`SWITCHBOARD_OLLAMA__BASE_URL=...`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./switchboard.toml` or `./.switchboard.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/switchboard/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/switchboard/config.toml if set,
    /// otherwise falls back to ~/.config/switchboard/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("switchboard").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./switchboard.toml or ./.switchboard.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.agents.is_none());
        assert_eq!(config.ollama.base_url, "http://localhost:11434");
        assert!(config.chat.use_history);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("switchboard"));
    }

    #[test]
    fn test_project_file_and_env_override() {
        Jail::expect_with(|jail| {
            jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
            jail.create_file(
                "switchboard.toml",
                r#"
[ollama]
base_url = "http://project:11434"

[agents.general]
description = "Project general"
"#,
            )?;
            jail.set_env("SWITCHBOARD_ROUTER__MODEL", "tiny-router");

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.ollama.base_url, "http://project:11434");
            assert_eq!(config.router.model, "tiny-router");
            let agents = config.agents.expect("agents table");
            assert_eq!(agents.len(), 1);
            assert_eq!(agents["general"].description, "Project general");
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_wins_over_project_file() {
        Jail::expect_with(|jail| {
            jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
            jail.create_file(".switchboard.toml", "[chat]\nuse_history = false\n")?;
            jail.create_file("custom.toml", "[chat]\nuse_history = true\n")?;

            let config = ConfigLoader::load(Some(Path::new("custom.toml"))).map_err(|e| *e)?;
            assert!(config.chat.use_history);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        Jail::expect_with(|jail| {
            jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
            jail.create_file("switchboard.toml", "[ollama\nbase_url = 1")?;
            assert!(ConfigLoader::load(None).is_err());
            Ok(())
        });
    }
}
