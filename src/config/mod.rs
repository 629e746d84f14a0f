//! Configuration module for the placement service

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Main application settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub templates: TemplateSettings,
    pub sessions: SessionSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Template configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateSettings {
    pub path: PathBuf,
}

/// Canvas session limits
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub max_sessions: usize,
    pub idle_timeout_secs: u64,
}

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables (prefixed with PLACEMENT_)
    /// 2. config/local.toml (gitignored)
    /// 3. config/default.toml
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        Self::builder(&config_dir)?.build()?.try_deserialize()
    }

    fn builder(
        config_dir: &std::path::Path,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let defaults = Settings::default();

        Ok(Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", defaults.server.port as i64)?
            .set_default(
                "templates.path",
                defaults.templates.path.to_string_lossy().to_string(),
            )?
            .set_default("sessions.max_sessions", defaults.sessions.max_sessions as i64)?
            .set_default(
                "sessions.idle_timeout_secs",
                defaults.sessions.idle_timeout_secs as i64,
            )?
            // Start with default configuration
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Add local overrides (gitignored)
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            // Add environment variables (PLACEMENT_SERVER__PORT, etc.)
            .add_source(
                Environment::with_prefix("PLACEMENT")
                    .separator("__")
                    .try_parsing(true),
            ))
    }

    /// Worker count, defaulting to two per CPU
    pub fn worker_count(&self) -> usize {
        self.server.workers.unwrap_or_else(|| num_cpus::get() * 2)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 8080,
                workers: None,
            },
            templates: TemplateSettings {
                path: PathBuf::from("assets/templates"),
            },
            sessions: SessionSettings {
                max_sessions: 1000,
                idle_timeout_secs: 1800,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let settings: Settings = Settings::builder(dir.path())
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.templates.path, PathBuf::from("assets/templates"));
        assert_eq!(settings.sessions.max_sessions, 1000);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            "[server]\nport = 9090\nworkers = 3\n\n[sessions]\nidle_timeout_secs = 60\n",
        )
        .unwrap();

        let settings: Settings = Settings::builder(dir.path())
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.worker_count(), 3);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.sessions.idle_timeout_secs, 60);
        assert_eq!(settings.sessions.max_sessions, 1000);
    }
}
