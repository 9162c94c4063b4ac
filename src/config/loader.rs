//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/changelens/config.toml)
//! 3. Project config (.changelens/config.toml)
//! 4. Environment variables (CHANGELENS_* prefix)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::Config;
use crate::types::{LensError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_in(Path::new("."))
    }

    /// Same as `load`, resolving the project config relative to `project_root`
    pub fn load_in(project_root: &Path) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Merge global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        // Merge project config
        let project_path = project_root.join(Self::project_config_path());
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // Environment variables, e.g. CHANGELENS_INFERENCE_MAX_DEPTH -> inference.max_depth
        figment = figment.merge(Env::prefixed("CHANGELENS_").map(|key| {
            key.as_str()
                .to_lowercase()
                .replacen('_', ".", 1)
                .into()
        }));

        Self::extract(figment)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        Self::extract(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file(path)),
        )
    }

    /// Load configuration from TOML text layered over the defaults
    pub fn load_from_str(toml_text: &str) -> Result<Config> {
        Self::extract(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::string(toml_text)),
        )
    }

    /// Render an effective configuration as TOML
    pub fn render(config: &Config) -> Result<String> {
        toml::to_string_pretty(config).map_err(|e| LensError::Config(e.to_string()))
    }

    fn extract(figment: Figment) -> Result<Config> {
        let config: Config = figment
            .extract()
            .map_err(|e| LensError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/changelens/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("changelens"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Project config path, relative to the project root
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(".changelens/config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_str_overrides_defaults() {
        let config = ConfigLoader::load_from_str(
            "[inference]\nmin_frontend_score = 0.6\ndisabled_providers = [\"vite\"]\n",
        )
        .unwrap();
        assert_eq!(config.inference.min_frontend_score, 0.6);
        assert_eq!(config.inference.disabled_providers, vec!["vite"]);
        assert_eq!(config.inference.max_source_roots, 2);
    }

    #[test]
    fn test_load_from_str_validates() {
        let err = ConfigLoader::load_from_str("[inference]\nmax_source_roots = 0\n").unwrap_err();
        assert!(matches!(err, LensError::Config(_)));
    }

    #[test]
    fn test_load_in_reads_project_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_dir = temp_dir.path().join(".changelens");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            "[extraction]\nenabled_frameworks = [\"react\"]\n",
        )
        .unwrap();

        let config = ConfigLoader::load_in(temp_dir.path()).unwrap();
        assert_eq!(
            config.extraction.enabled_frameworks,
            vec![crate::types::Framework::React]
        );
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lens.toml");
        std::fs::write(&path, "[classifier]\nmax_reason_indicators = 5\n").unwrap();
        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.classifier.max_reason_indicators, 5);
    }

    #[test]
    fn test_render_round_trips() {
        let rendered = ConfigLoader::render(&Config::default()).unwrap();
        let config = ConfigLoader::load_from_str(&rendered).unwrap();
        assert_eq!(config.inference.candidate_limit, 10);
    }
}
