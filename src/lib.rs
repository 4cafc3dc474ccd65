//! # Assistant Skills
//!
//! A function-call dispatch registry for AI assistants.
//!
//! ## Features
//!
//! - **Skill Registry:** case-insensitive, lock-protected name → handler map
//! - **Schema Synthesis:** JSON-Schema parameter descriptions, explicit or inferred
//! - **Invocation:** cancellable async dispatch that returns results as JSON text
//!
//! ## Example
//!
//! ```rust,no_run
//! use assistant_skills::{Skill, SkillInvoker, SkillManager, ToolCall};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> assistant_skills::Result<()> {
//! let manager = SkillManager::default();
//! manager.register(Skill::from_fn(
//!     "echo",
//!     "Echo the text back",
//!     "text",
//!     |text: String| async move { anyhow::Ok(text) },
//! ))?;
//!
//! let tools = manager.function_definitions();
//! let call = ToolCall::new("echo", r#"{"text":"hi"}"#);
//! let output = manager.invoke(&call, &CancellationToken::new()).await?;
//! assert_eq!(output.as_deref(), Some("\"hi\""));
//! # let _ = tools;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod invoker;
pub mod logging;
pub mod schema;
pub mod skills;

pub use config::SkillsConfig;
pub use error::{Error, Result};
pub use invoker::{InvocationContext, SkillInvoker, SkillManager, ToolCall, ToolDefinition};
pub use schema::{ParamType, ParameterSchema, ParameterShape};
pub use skills::{Completion, Skill, SkillHandler, SkillRegistry};

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
