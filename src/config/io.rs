//! Configuration I/O - Loading and saving configuration
//!
//! Handles reading configuration from files and environment variables.

use std::path::Path;

use super::types::SkillsConfig;
use crate::error::{Error, Result};

/// A snapshot of the configuration file
#[derive(Debug, Clone)]
pub struct ConfigSnapshot {
    /// Path to the config file
    pub path: std::path::PathBuf,
    /// Whether the file exists
    pub exists: bool,
    /// Raw file content
    pub raw: Option<String>,
    /// Parsed configuration
    pub config: Option<SkillsConfig>,
    /// Validation issues
    pub issues: Vec<String>,
}

/// Load configuration with layered precedence:
/// 1. Config file if it exists, otherwise defaults
/// 2. Environment variable overrides (includes .env)
pub fn load_config() -> Result<SkillsConfig> {
    let config_path = super::paths::config_path();

    let mut config = if config_path.exists() {
        load_config_from_path(&config_path)?
    } else {
        SkillsConfig::default()
    };

    // Apply environment variable overrides (highest precedence)
    apply_env_overrides(&mut config)?;

    Ok(config)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<SkillsConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    // Detect format by extension
    let config: SkillsConfig = if is_json(path) {
        // Parse as JSON5 (more lenient than strict JSON)
        json5::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid JSON config: {}", e)))?
    } else if path.extension().map_or(false, |ext| ext == "toml") {
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid TOML config: {}", e)))?
    } else {
        // Try JSON5 first, then TOML
        json5::from_str(&content)
            .or_else(|_| toml::from_str(&content).map_err(|e| Error::Config(e.to_string())))
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?
    };

    Ok(config)
}

/// Apply environment variable overrides to an existing config.
///
/// Loads `.env` if present, then overlays any set variables. A variable
/// that is set but cannot be parsed is an error rather than silently
/// ignored.
pub fn apply_env_overrides(config: &mut SkillsConfig) -> Result<()> {
    dotenvy::dotenv().ok();

    // Registry overrides
    if let Ok(policy) = std::env::var("SKILLS_DUPLICATE_POLICY") {
        config.registry.duplicate_policy = policy.parse()?;
    }

    // Invocation overrides
    if let Ok(chars) = std::env::var("SKILLS_RESULT_PREVIEW_CHARS") {
        config.invocation.result_preview_chars = chars.trim().parse().map_err(|e| {
            Error::Config(format!("Invalid SKILLS_RESULT_PREVIEW_CHARS '{}': {}", chars, e))
        })?;
    }
    if let Ok(flag) = std::env::var("SKILLS_LOG_RESULTS") {
        config.invocation.log_results = parse_bool("SKILLS_LOG_RESULTS", &flag)?;
    }

    // Logging overrides
    if let Ok(filter) = std::env::var("SKILLS_LOG_FILTER") {
        config.logging.filter = filter;
    }
    if let Ok(flag) = std::env::var("SKILLS_LOG_JSON") {
        config.logging.json = parse_bool("SKILLS_LOG_JSON", &flag)?;
    }

    Ok(())
}

fn parse_bool(var: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!("Invalid boolean for {}: {}", var, value))),
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "json")
}

/// Save configuration to a file.
///
/// A `.json` path is written as JSON. Every other path, including the
/// default `config.toml` and extension-less paths, is written as TOML.
pub fn save_config(config: &SkillsConfig, path: &Path) -> Result<()> {
    let content = if is_json(path) {
        serde_json::to_string_pretty(config)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?
    } else {
        toml::to_string_pretty(config)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?
    };

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, content)?;
    Ok(())
}

/// Read a configuration file into a snapshot
pub fn read_config_snapshot(path: &Path) -> ConfigSnapshot {
    if !path.exists() {
        return ConfigSnapshot {
            path: path.to_path_buf(),
            exists: false,
            raw: None,
            config: None,
            issues: vec!["Configuration file does not exist".to_string()],
        };
    }

    let raw = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            return ConfigSnapshot {
                path: path.to_path_buf(),
                exists: true,
                raw: None,
                config: None,
                issues: vec![format!("Failed to read file: {}", e)],
            };
        }
    };

    match load_config_from_path(path) {
        Ok(config) => {
            let report = super::validate_config(&config);
            let issues = report
                .errors
                .iter()
                .chain(report.warnings.iter())
                .map(|issue| format!("{}: {}", issue.path, issue.message))
                .collect();
            ConfigSnapshot {
                path: path.to_path_buf(),
                exists: true,
                raw: Some(raw),
                config: Some(config),
                issues,
            }
        }
        Err(e) => ConfigSnapshot {
            path: path.to_path_buf(),
            exists: true,
            raw: Some(raw),
            config: None,
            issues: vec![format!("Failed to parse config: {}", e)],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicatePolicy;
    use std::sync::{Mutex, PoisonError};
    use tempfile::tempdir;

    const ENV_VARS: [&str; 5] = [
        "SKILLS_DUPLICATE_POLICY",
        "SKILLS_RESULT_PREVIEW_CHARS",
        "SKILLS_LOG_RESULTS",
        "SKILLS_LOG_FILTER",
        "SKILLS_LOG_JSON",
    ];

    // Tests run on parallel threads but share one process environment
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Clears the override variables on creation and restores them on drop
    struct EnvGuard {
        saved: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn clean() -> Self {
            let saved = ENV_VARS
                .iter()
                .map(|var| (*var, std::env::var(var).ok()))
                .collect();
            for var in ENV_VARS {
                std::env::remove_var(var);
            }
            EnvGuard { saved }
        }

        fn set(&self, var: &str, value: &str) {
            std::env::set_var(var, value);
        }

        fn unset(&self, var: &str) {
            std::env::remove_var(var);
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (var, value) in &self.saved {
                match value {
                    Some(value) => std::env::set_var(var, value),
                    None => std::env::remove_var(var),
                }
            }
        }
    }

    #[test]
    fn test_save_and_load_config() {
        let dir = tempdir().unwrap();

        let mut config = SkillsConfig::default();
        config.registry.duplicate_policy = DuplicatePolicy::Replace;
        config.invocation.result_preview_chars = 64;

        for name in ["config.json", "config.toml"] {
            let path = dir.path().join(name);
            save_config(&config, &path).unwrap();
            let loaded = load_config_from_path(&path).unwrap();
            assert_eq!(loaded, config, "round trip through {}", name);
        }
    }

    #[test]
    fn test_load_json5_with_comments() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            "{\n  // keep the first registration\n  registry: { duplicate_policy: 'ignore' },\n}\n",
        )
        .unwrap();

        let loaded = load_config_from_path(&path).unwrap();
        assert_eq!(loaded.registry.duplicate_policy, DuplicatePolicy::Ignore);
    }

    #[test]
    fn test_load_invalid_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "registry = [").unwrap();

        assert!(matches!(load_config_from_path(&path), Err(Error::Config(_))));
        let snapshot = read_config_snapshot(&path);
        assert!(snapshot.exists);
        assert!(snapshot.config.is_none());
        assert_eq!(snapshot.issues.len(), 1);
    }

    #[test]
    fn test_snapshot_missing_file() {
        let dir = tempdir().unwrap();
        let snapshot = read_config_snapshot(&dir.path().join("absent.toml"));
        assert!(!snapshot.exists);
        assert!(snapshot.raw.is_none());
    }

    #[test]
    fn test_save_without_extension_writes_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("skills");

        let mut config = SkillsConfig::default();
        config.logging.json = true;
        save_config(&config, &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(toml::from_str::<SkillsConfig>(&raw).is_ok());
        assert!(serde_json::from_str::<serde_json::Value>(&raw).is_err());
        assert_eq!(load_config_from_path(&path).unwrap(), config);
    }

    #[test]
    fn test_env_overrides_applied() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let env = EnvGuard::clean();
        env.set("SKILLS_DUPLICATE_POLICY", "replace");
        env.set("SKILLS_RESULT_PREVIEW_CHARS", " 32 ");
        env.set("SKILLS_LOG_RESULTS", "off");
        env.set("SKILLS_LOG_FILTER", "assistant_skills=debug");
        env.set("SKILLS_LOG_JSON", "yes");

        let mut config = SkillsConfig::default();
        apply_env_overrides(&mut config).unwrap();

        assert_eq!(config.registry.duplicate_policy, DuplicatePolicy::Replace);
        assert_eq!(config.invocation.result_preview_chars, 32);
        assert!(!config.invocation.log_results);
        assert_eq!(config.logging.filter, "assistant_skills=debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_env_overrides_leave_unset_fields() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let env = EnvGuard::clean();
        env.set("SKILLS_LOG_JSON", "true");

        let mut config = SkillsConfig::default();
        config.invocation.result_preview_chars = 7;
        apply_env_overrides(&mut config).unwrap();

        assert!(config.logging.json);
        assert_eq!(config.invocation.result_preview_chars, 7);
        assert_eq!(config.registry.duplicate_policy, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_env_overrides_reject_bad_values() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let env = EnvGuard::clean();

        for (var, value) in [
            ("SKILLS_RESULT_PREVIEW_CHARS", "lots"),
            ("SKILLS_DUPLICATE_POLICY", "sometimes"),
            ("SKILLS_LOG_RESULTS", "perhaps"),
            ("SKILLS_LOG_JSON", "maybe"),
        ] {
            env.set(var, value);
            let mut config = SkillsConfig::default();
            let result = apply_env_overrides(&mut config);
            assert!(
                matches!(result, Err(Error::Config(_))),
                "{}={} should be rejected",
                var,
                value
            );
            env.unset(var);
        }
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "Yes").unwrap());
        assert!(!parse_bool("X", "0").unwrap());
        assert!(parse_bool("X", "maybe").is_err());
    }
}
