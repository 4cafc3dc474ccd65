//! Configuration module
//!
//! - types: configuration types (SkillsConfig and its sections)
//! - io.rs: configuration loading and saving
//! - validation.rs: configuration validation
//! - paths.rs: configuration file paths

mod io;
mod paths;
mod types;
mod validation;

// Re-export core config types
pub use types::{DuplicatePolicy, InvocationConfig, LoggingConfig, RegistryConfig, SkillsConfig};

// Re-export IO and utilities
pub use io::{
    apply_env_overrides, load_config, load_config_from_path, read_config_snapshot, save_config,
    ConfigSnapshot,
};
pub use paths::{config_dir, config_path};
pub use validation::{validate_config, ConfigValidationResult, ValidationIssue};
