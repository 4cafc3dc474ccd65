//! Configuration validation
//!
//! Validates configuration and reports issues.

use super::types::SkillsConfig;

/// Result of configuration validation
#[derive(Debug, Clone)]
pub struct ConfigValidationResult {
    /// Whether the config is valid
    pub valid: bool,
    /// Validation errors (critical)
    pub errors: Vec<ValidationIssue>,
    /// Validation warnings (non-critical)
    pub warnings: Vec<ValidationIssue>,
}

impl ConfigValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        ConfigValidationResult {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error
    pub fn with_error(mut self, issue: ValidationIssue) -> Self {
        self.valid = false;
        self.errors.push(issue);
        self
    }

    /// Add a warning
    pub fn with_warning(mut self, issue: ValidationIssue) -> Self {
        self.warnings.push(issue);
        self
    }
}

/// A validation issue
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Path to the config field
    pub path: String,
    /// Issue message
    pub message: String,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Create a new issue
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Validate the configuration
pub fn validate_config(config: &SkillsConfig) -> ConfigValidationResult {
    let mut result = ConfigValidationResult::valid();

    result = validate_invocation_config(config, result);
    result = validate_logging_config(config, result);

    result
}

fn validate_invocation_config(
    config: &SkillsConfig,
    mut result: ConfigValidationResult,
) -> ConfigValidationResult {
    if config.invocation.log_results && config.invocation.result_preview_chars == 0 {
        result = result.with_warning(
            ValidationIssue::new(
                "invocation.result_preview_chars",
                "Result logging is enabled but the preview length is 0",
            )
            .with_suggestion("Set invocation.log_results = false or raise result_preview_chars"),
        );
    }

    result
}

fn validate_logging_config(
    config: &SkillsConfig,
    mut result: ConfigValidationResult,
) -> ConfigValidationResult {
    if let Err(e) = tracing_subscriber::EnvFilter::try_new(&config.logging.filter) {
        result = result.with_error(
            ValidationIssue::new(
                "logging.filter",
                format!("Invalid log filter '{}': {}", config.logging.filter, e),
            )
            .with_suggestion("Use tracing directives such as \"assistant_skills=debug\""),
        );
    }

    result
}
