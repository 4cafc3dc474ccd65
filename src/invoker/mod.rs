//! Skill invoker - advertises skills as tools and dispatches tool calls
//!
//! The invoker is what the chat orchestration layer talks to:
//!
//! - `function_definitions()` once per model turn, to list callable tools
//! - `invoke()` once per tool call the model makes
//!
//! Handler failures are returned unchanged (see [`Error::Handler`]); turning
//! them into a model-facing "tool failed" message is the caller's job.

mod context;
mod types;

pub use context::InvocationContext;
pub use types::{FunctionDefinition, ToolCall, ToolDefinition};

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::{InvocationConfig, SkillsConfig};
use crate::error::{Error, Result};
use crate::schema;
use crate::skills::{Completion, Skill, SkillRegistry};

/// Interface consumed by the chat/agent orchestration layer
#[async_trait]
pub trait SkillInvoker: Send + Sync {
    /// Tool definitions for every registered skill, or `None` when no
    /// skills are registered
    fn function_definitions(&self) -> Option<Vec<ToolDefinition>>;

    /// Invoke the skill named by `call`.
    ///
    /// Returns the handler's result as JSON text, or `None` when the
    /// handler produced no value.
    async fn invoke(&self, call: &ToolCall, cancel: &CancellationToken) -> Result<Option<String>>;
}

const VOID_RESULT_WARNING: &str =
    "Unable to discover the return value (if any) of the skill; the model will see no output";

/// Default [`SkillInvoker`] backed by a shared [`SkillRegistry`]
pub struct SkillManager {
    registry: Arc<SkillRegistry>,
    config: InvocationConfig,
}

impl Default for SkillManager {
    fn default() -> Self {
        Self::new(Arc::new(SkillRegistry::new()))
    }
}

impl SkillManager {
    /// Create a manager over an existing registry
    pub fn new(registry: Arc<SkillRegistry>) -> Self {
        SkillManager {
            registry,
            config: InvocationConfig::default(),
        }
    }

    /// Create a manager and an empty registry from configuration
    pub fn from_config(config: &SkillsConfig) -> Self {
        let registry = SkillRegistry::with_policy(config.registry.duplicate_policy);
        SkillManager {
            registry: Arc::new(registry),
            config: config.invocation.clone(),
        }
    }

    /// Override invocation settings
    pub fn with_invocation_config(mut self, config: InvocationConfig) -> Self {
        self.config = config;
        self
    }

    /// The underlying registry
    pub fn registry(&self) -> &Arc<SkillRegistry> {
        &self.registry
    }

    /// Register a skill
    pub fn register(&self, skill: Skill) -> Result<()> {
        self.registry.register(skill)
    }

    /// Unregister a skill by name
    pub fn unregister(&self, name: &str) -> Option<Arc<Skill>> {
        self.registry.unregister(name)
    }

    fn definition(skill: &Skill) -> ToolDefinition {
        ToolDefinition::function(skill.name(), skill.description(), schema::synthesize(skill))
    }

    async fn run(
        &self,
        skill: &Skill,
        ctx: &mut InvocationContext,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        info!(skill = %skill.name(), "Invoking user-code skill");
        let handler = skill.handler();

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(skill = %skill.name(), "Skill invocation cancelled");
                return Err(Error::Cancelled);
            }
            outcome = handler.invoke(&*ctx, cancel.child_token()) => outcome,
        };

        match outcome.map_err(Error::from_handler)? {
            Completion::Value(value) => ctx.set_result(value),
            Completion::Void => {
                warn!(skill = %skill.name(), "{}", VOID_RESULT_WARNING);
            }
        }

        Ok(())
    }

    fn preview<'a>(&self, json: &'a str) -> std::borrow::Cow<'a, str> {
        let limit = self.config.result_preview_chars;
        match json.char_indices().nth(limit) {
            Some((cut, _)) => format!("{}...", &json[..cut]).into(),
            None => json.into(),
        }
    }
}

#[async_trait]
impl SkillInvoker for SkillManager {
    fn function_definitions(&self) -> Option<Vec<ToolDefinition>> {
        let skills = self.registry.list_all();
        if skills.is_empty() {
            return None;
        }

        Some(skills.iter().map(|s| Self::definition(s)).collect())
    }

    async fn invoke(&self, call: &ToolCall, cancel: &CancellationToken) -> Result<Option<String>> {
        if call.name.trim().is_empty() {
            return Err(Error::InvalidCall(
                "The function call must have a name".to_string(),
            ));
        }

        let skill = self.registry.lookup(&call.name)?;
        let mut ctx = InvocationContext::new(skill.name(), call.arguments.as_str());

        self.run(&skill, &mut ctx, cancel).await?;

        let result = match ctx.take_result() {
            Some(value) if !value.is_null() => value,
            _ => return Ok(None),
        };

        let json = serde_json::to_string(&result)?;
        if self.config.log_results {
            info!(
                skill = %skill.name(),
                json = %self.preview(&json),
                "Returning output of user-code skill as JSON"
            );
        }

        Ok(Some(json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ParamType, ParameterShape};
    use crate::skills::SkillHandler;
    use serde_json::json;

    struct VoidHandler;

    #[async_trait]
    impl SkillHandler for VoidHandler {
        async fn invoke(
            &self,
            _ctx: &InvocationContext,
            _cancel: CancellationToken,
        ) -> anyhow::Result<Completion> {
            Ok(Completion::Void)
        }
    }

    fn manager_with_echo() -> SkillManager {
        let manager = SkillManager::default();
        let echo = Skill::from_fn("echo", "Echo the text back", "text", |text: String| async move {
            anyhow::Ok(text)
        });
        manager.register(echo).unwrap();
        manager
    }

    #[test]
    fn test_no_definitions_when_empty() {
        let manager = SkillManager::default();
        assert!(manager.function_definitions().is_none());
    }

    #[test]
    fn test_definitions_use_synthesized_and_explicit_schemas() {
        let manager = manager_with_echo();
        manager
            .register(
                Skill::new(
                    "search",
                    "Search the docs",
                    ParameterShape::new("query", ParamType::String),
                    Arc::new(VoidHandler),
                )
                .with_parameter_schema(r#"{"type":"object","required":["query"]}"#),
            )
            .unwrap();

        let defs = manager.function_definitions().unwrap();
        assert_eq!(defs.len(), 2);

        let echo = defs.iter().find(|d| d.name() == "echo").unwrap();
        assert_eq!(echo.tool_type, "function");
        assert_eq!(echo.function.description, "Echo the text back");
        assert_eq!(
            echo.function.parameters.as_str(),
            r#"{"type":"object","properties":{"text":{"type":"string"}}}"#
        );

        let search = defs.iter().find(|d| d.name() == "search").unwrap();
        assert_eq!(
            search.function.parameters.as_str(),
            r#"{"type":"object","required":["query"]}"#
        );
    }

    #[tokio::test]
    async fn test_invoke_echo() {
        let manager = manager_with_echo();
        let call = ToolCall::new("echo", json!({"text": "hi"}).to_string());

        let result = manager.invoke(&call, &CancellationToken::new()).await.unwrap();
        assert_eq!(result.as_deref(), Some(r#""hi""#));
    }

    #[tokio::test]
    async fn test_invoke_is_case_insensitive() {
        let manager = manager_with_echo();
        let call = ToolCall::new("ECHO", r#"{"text":"loud"}"#);

        let result = manager.invoke(&call, &CancellationToken::new()).await.unwrap();
        assert_eq!(result.as_deref(), Some(r#""loud""#));
    }

    #[tokio::test]
    async fn test_invoke_empty_name() {
        let manager = manager_with_echo();
        let err = manager
            .invoke(&ToolCall::new("", "{}"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCall(_)));
    }

    #[tokio::test]
    async fn test_invoke_void_handler_returns_none() {
        let manager = SkillManager::default();
        manager
            .register(Skill::new(
                "fire_and_forget",
                "Does something",
                ParameterShape::new("x", ParamType::Int32),
                Arc::new(VoidHandler),
            ))
            .unwrap();

        let result = manager
            .invoke(&ToolCall::new("fire_and_forget", "{}"), &CancellationToken::new())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_invoke_null_result_returns_none() {
        let manager = SkillManager::default();
        manager
            .register(Skill::from_fn("noop", "Nothing", "x", |_x: Option<i32>| async move {
                anyhow::Ok(())
            }))
            .unwrap();

        let result = manager
            .invoke(&ToolCall::new("noop", "{}"), &CancellationToken::new())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_invoke_already_cancelled() {
        let manager = manager_with_echo();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = manager
            .invoke(&ToolCall::new("echo", r#"{"text":"hi"}"#), &cancel)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let manager = SkillManager::default().with_invocation_config(InvocationConfig {
            result_preview_chars: 3,
            log_results: true,
        });
        assert_eq!(manager.preview(r#""héllo""#), r#""hé..."#);
        assert_eq!(manager.preview("12"), "12");
    }
}
