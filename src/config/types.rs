//! Configuration types module

use serde::{Deserialize, Serialize};

/// Main configuration for the skills runtime
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillsConfig {
    /// Registry configuration
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Invocation configuration
    #[serde(default)]
    pub invocation: InvocationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SkillsConfig {
    /// Load configuration from the config file and environment
    ///
    /// Layered as: defaults < config file (if present) < environment.
    pub fn from_env() -> crate::error::Result<Self> {
        crate::config::load_config()
    }
}

/// Registry configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// What to do when a skill name is registered twice
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

/// Handling of a registration whose name (case-insensitively) is taken
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail with a duplicate-skill error (default)
    #[default]
    Reject,
    /// Overwrite the existing registration
    Replace,
    /// Keep the existing registration and succeed
    Ignore,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" | "error" | "fail" => Ok(DuplicatePolicy::Reject),
            "replace" | "overwrite" => Ok(DuplicatePolicy::Replace),
            "ignore" | "keep" => Ok(DuplicatePolicy::Ignore),
            _ => Err(crate::error::Error::Config(format!(
                "Invalid duplicate policy: {}. Valid: reject, replace, ignore",
                s
            ))),
        }
    }
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicatePolicy::Reject => write!(f, "reject"),
            DuplicatePolicy::Replace => write!(f, "replace"),
            DuplicatePolicy::Ignore => write!(f, "ignore"),
        }
    }
}

/// Invocation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationConfig {
    /// Maximum characters of a result shown in logs
    #[serde(default = "default_preview_chars")]
    pub result_preview_chars: usize,
    /// Log each successful result
    #[serde(default = "default_true")]
    pub log_results: bool,
}

impl Default for InvocationConfig {
    fn default() -> Self {
        InvocationConfig {
            result_preview_chars: default_preview_chars(),
            log_results: true,
        }
    }
}

fn default_preview_chars() -> usize {
    512
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directives used when `RUST_LOG` is not set
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "assistant_skills=info".to_string()
}
