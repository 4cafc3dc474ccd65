//! Wire-facing types for function calling

use serde::{Deserialize, Serialize};

use crate::schema::ParameterSchema;

/// Tool definition advertised to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Type of tool (always "function")
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function definition
    pub function: FunctionDefinition,
}

/// Function definition for tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Name of the function
    pub name: String,
    /// Description of what the function does
    pub description: String,
    /// JSON Schema for function parameters
    pub parameters: ParameterSchema,
}

impl ToolDefinition {
    /// Create a function tool definition
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: ParameterSchema,
    ) -> Self {
        ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }

    /// Function name
    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// A tool call request from the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool call ID
    #[serde(default)]
    pub id: String,
    /// Name of the skill to call
    pub name: String,
    /// Arguments as raw JSON object text, passed through uninterpreted
    #[serde(default = "empty_object")]
    pub arguments: String,
}

fn empty_object() -> String {
    "{}".to_string()
}

impl ToolCall {
    /// Create a call without an ID
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        ToolCall {
            id: String::new(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Set the call ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
