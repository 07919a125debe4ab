use crate::error::WorkPromptError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default acknowledgement window after a copy (ms)
pub const DEFAULT_COPY_FEEDBACK_MS: u64 = 1200;

/// workprompt application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Role active when a session starts (`frontend`, `ppt`, `pm`)
    pub default_role: String,

    /// JSON catalog replacing the built-in roles
    pub catalog_path: Option<PathBuf>,

    /// Clipboard program override, e.g. `xclip -selection clipboard`
    pub clipboard_command: Option<String>,

    /// How long the "copied" indicator stays visible
    pub copy_feedback_ms: u64,

    /// Log level
    pub log_level: String,

    /// Log directory (file logging is off when unset)
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_role: "frontend".to_string(),
            catalog_path: None,
            clipboard_command: None,
            copy_feedback_ms: DEFAULT_COPY_FEEDBACK_MS,
            log_level: "warn".to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, WorkPromptError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let config = Self::from_lookup(|key| std::env::var(key).ok());

        config.ensure_directories()?;

        Ok(config)
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            default_role: non_empty("WORKPROMPT_DEFAULT_ROLE")
                .map(|v| v.trim().to_lowercase())
                .unwrap_or_else(|| "frontend".to_string()),
            catalog_path: non_empty("WORKPROMPT_CATALOG").map(PathBuf::from),
            clipboard_command: non_empty("WORKPROMPT_CLIPBOARD_CMD"),
            copy_feedback_ms: lookup("WORKPROMPT_COPY_FEEDBACK_MS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_COPY_FEEDBACK_MS),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
            log_dir: non_empty("LOG_DIR").map(PathBuf::from),
        }
    }

    /// Ensure the log directory exists, create if not
    pub fn ensure_directories(&self) -> Result<(), WorkPromptError> {
        if let Some(dir) = &self.log_dir {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    WorkPromptError::config(format!(
                        "Failed to create directory {}: {}",
                        dir.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Acknowledgement window as a Duration
    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }

    /// Split the clipboard override into program and arguments
    pub fn clipboard_program(&self) -> Option<(String, Vec<String>)> {
        let raw = self.clipboard_command.as_deref()?;
        let mut parts = raw.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some((program, parts.collect()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), WorkPromptError> {
        if self.copy_feedback_ms == 0 {
            return Err(WorkPromptError::config("Copy feedback duration cannot be 0"));
        }

        if self.log_level.trim().is_empty() {
            return Err(WorkPromptError::config("Log level cannot be empty"));
        }

        if let Some(path) = &self.catalog_path {
            if !path.is_file() {
                return Err(WorkPromptError::config(format!(
                    "Catalog file not found: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.default_role, "frontend");
        assert_eq!(config.copy_feedback_ms, 1200);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_from_lookup() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("WORKPROMPT_DEFAULT_ROLE", " PM "),
            ("WORKPROMPT_COPY_FEEDBACK_MS", "500"),
            ("WORKPROMPT_CLIPBOARD_CMD", "xclip -selection clipboard"),
            ("LOG_LEVEL", "debug"),
        ]));
        assert_eq!(config.default_role, "pm");
        assert_eq!(config.copy_feedback(), Duration::from_millis(500));
        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.clipboard_program(),
            Some((
                "xclip".to_string(),
                vec!["-selection".to_string(), "clipboard".to_string()]
            ))
        );
    }

    #[test]
    fn test_from_lookup_ignores_garbage() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("WORKPROMPT_COPY_FEEDBACK_MS", "soon"),
            ("WORKPROMPT_CATALOG", "   "),
        ]));
        assert_eq!(config.copy_feedback_ms, DEFAULT_COPY_FEEDBACK_MS);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let mut invalid_config = AppConfig::default();
        invalid_config.copy_feedback_ms = 0;
        assert!(invalid_config.validate().is_err());

        let mut missing_catalog = AppConfig::default();
        missing_catalog.catalog_path = Some(PathBuf::from("/definitely/not/here.json"));
        assert!(missing_catalog.validate().is_err());
    }

    #[test]
    fn test_ensure_directories_creates_log_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.log_dir = Some(tmp.path().join("log"));
        config.ensure_directories().unwrap();
        assert!(tmp.path().join("log").is_dir());
    }
}
