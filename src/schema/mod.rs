//! Parameter schema synthesis
//!
//! Every skill advertises a JSON-Schema "object" describing its arguments.
//! Skills may carry a hand-written schema; otherwise one is inferred from
//! the single parameter the handler expects. Inference is deliberately
//! shallow: one property, one primitive type, nothing else.

mod types;

pub use types::{ParamType, SchemaType};

use serde::{Deserialize, Serialize};

use crate::skills::Skill;

/// Description of a handler's single input parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterShape {
    /// Parameter name, used as the only property of the inferred schema
    pub name: String,
    /// Declared type tag
    pub declared_type: ParamType,
}

impl ParameterShape {
    /// Create a parameter shape
    pub fn new(name: impl Into<String>, declared_type: ParamType) -> Self {
        ParameterShape {
            name: name.into(),
            declared_type,
        }
    }

    /// Shape for a Rust type known at compile time
    pub fn of<T: SchemaType + ?Sized>(name: impl Into<String>) -> Self {
        Self::new(name, T::param_type())
    }
}

/// JSON-Schema text for a skill's parameters (UTF-8)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterSchema(String);

impl ParameterSchema {
    /// Wrap pre-authored schema text without validating it
    pub fn from_text(text: impl Into<String>) -> Self {
        ParameterSchema(text.into())
    }

    /// The schema as JSON text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The schema as UTF-8 bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Consume into the underlying text
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ParameterSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ParameterSchema {
    /// Embeds the schema as a JSON value. Pre-authored text that does not
    /// parse is emitted as a plain string instead.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match serde_json::from_str::<serde_json::Value>(&self.0) {
            Ok(value) => value.serialize(serializer),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for ParameterSchema {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::String(text) => ParameterSchema(text),
            other => ParameterSchema(other.to_string()),
        })
    }
}

/// Produce the parameter schema for a skill.
///
/// An explicit schema is returned verbatim. Otherwise the schema is
/// inferred from the skill's parameter shape.
pub fn synthesize(skill: &Skill) -> ParameterSchema {
    match skill.parameter_schema() {
        Some(explicit) => ParameterSchema::from_text(explicit),
        None => infer(skill.parameter()),
    }
}

/// Infer `{"type":"object","properties":{"<name>":{"type":"<t>"}}}`
pub fn infer(shape: &ParameterShape) -> ParameterSchema {
    // The property name goes through serde_json so quotes and control
    // characters are escaped.
    let name = serde_json::Value::String(shape.name.clone());
    ParameterSchema(format!(
        r#"{{"type":"object","properties":{{{}:{{"type":"{}"}}}}}}"#,
        name,
        shape.declared_type.json_type()
    ))
}
