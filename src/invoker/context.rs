//! Per-invocation context

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Context handed to a skill handler for one call.
///
/// Carries the raw argument object in and the captured result out. Never
/// shared between invocations.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    skill: String,
    // Raw `{"paramName": value}` text; only parsed when a handler binds it
    arguments: String,
    result: Option<Value>,
}

impl InvocationContext {
    /// Create a context over raw JSON argument text
    pub fn new(skill: impl Into<String>, arguments: impl Into<String>) -> Self {
        InvocationContext {
            skill: skill.into(),
            arguments: arguments.into(),
            result: None,
        }
    }

    /// Name of the skill being invoked
    pub fn skill(&self) -> &str {
        &self.skill
    }

    /// Raw JSON argument text
    pub fn arguments(&self) -> &str {
        &self.arguments
    }

    /// Raw argument bytes (UTF-8)
    pub fn arguments_bytes(&self) -> &[u8] {
        self.arguments.as_bytes()
    }

    /// Parse the whole argument object into a specific type
    pub fn parse_arguments<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(self.raw_or_empty()).map_err(|e| self.binding_error(e))
    }

    /// Bind a single named argument.
    ///
    /// A missing key binds as JSON `null`, so `Option<T>` parameters may be
    /// omitted by the caller.
    pub fn argument<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let mut object: Map<String, Value> = self.parse_arguments()?;
        let value = object.remove(name).unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| Error::InvalidArguments {
            skill: self.skill.clone(),
            message: format!("parameter '{}': {}", name, e),
        })
    }

    /// The captured result, if any
    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Capture the handler's result
    pub fn set_result(&mut self, value: Value) {
        self.result = Some(value);
    }

    /// Take the captured result out of the context
    pub fn take_result(&mut self) -> Option<Value> {
        self.result.take()
    }

    fn raw_or_empty(&self) -> &str {
        if self.arguments.trim().is_empty() {
            "{}"
        } else {
            &self.arguments
        }
    }

    fn binding_error(&self, err: serde_json::Error) -> Error {
        Error::InvalidArguments {
            skill: self.skill.clone(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Search {
        query: String,
        limit: Option<u32>,
    }

    #[test]
    fn test_parse_arguments() {
        let ctx = InvocationContext::new("search", r#"{"query":"rust","limit":5}"#);
        let args: Search = ctx.parse_arguments().unwrap();
        assert_eq!(
            args,
            Search {
                query: "rust".to_string(),
                limit: Some(5)
            }
        );
    }

    #[test]
    fn test_empty_arguments_are_empty_object() {
        let ctx = InvocationContext::new("noop", "");
        let limit: Option<u32> = ctx.argument("limit").unwrap();
        assert!(limit.is_none());
    }

    #[test]
    fn test_argument_type_mismatch() {
        let ctx = InvocationContext::new("add", r#"{"n":"three"}"#);
        let err = ctx.argument::<i32>("n").unwrap_err();
        assert!(matches!(err, Error::InvalidArguments { ref skill, .. } if skill == "add"));
        assert!(err.to_string().contains("parameter 'n'"));
    }

    #[test]
    fn test_non_object_arguments() {
        let ctx = InvocationContext::new("echo", "[1,2]");
        assert!(ctx.argument::<String>("text").is_err());
    }

    #[test]
    fn test_result_slot() {
        let mut ctx = InvocationContext::new("echo", "{}");
        assert!(ctx.result().is_none());
        ctx.set_result(Value::from("hi"));
        assert_eq!(ctx.take_result(), Some(Value::from("hi")));
        assert!(ctx.result().is_none());
    }
}
