//! Declared parameter type tags

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};

use serde::{Deserialize, Serialize};

/// Declared type of a handler's input parameter.
///
/// The binding layer knows these statically, so inference is a plain
/// mapping rather than runtime reflection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    String,
    Int32,
    Int64,
    Boolean,
    Float32,
    Float64,
    Decimal,
    /// Any ordered or iterable collection, maps included
    Collection,
    /// Anything else, by its declared type name
    Other(String),
}

impl ParamType {
    /// JSON-Schema primitive type for this declared type
    pub fn json_type(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Int32 | ParamType::Int64 => "integer",
            ParamType::Boolean => "boolean",
            ParamType::Float32 | ParamType::Float64 | ParamType::Decimal => "number",
            ParamType::Collection => "array",
            ParamType::Other(_) => "string",
        }
    }
}

impl std::str::FromStr for ParamType {
    type Err = std::convert::Infallible;

    /// Parse a binding-layer type tag. Unknown tags become `Other`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let tag = s.trim();
        let lower = tag.to_lowercase();
        let parsed = match lower.as_str() {
            "string" | "str" | "&str" | "text" => ParamType::String,
            "i32" | "int" | "int32" | "integer" => ParamType::Int32,
            "i64" | "long" | "int64" => ParamType::Int64,
            "bool" | "boolean" => ParamType::Boolean,
            "f32" | "float" | "single" => ParamType::Float32,
            "f64" | "double" | "number" => ParamType::Float64,
            "decimal" => ParamType::Decimal,
            "array" | "list" | "vec" | "collection" | "set" => ParamType::Collection,
            "map" | "hashmap" | "btreemap" | "dict" | "dictionary" => ParamType::Collection,
            _ if lower.starts_with("vec<") || lower.ends_with("[]") => ParamType::Collection,
            _ if lower.starts_with("hashmap<") || lower.starts_with("btreemap<") => {
                ParamType::Collection
            }
            _ => ParamType::Other(tag.to_string()),
        };
        Ok(parsed)
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamType::String => write!(f, "string"),
            ParamType::Int32 => write!(f, "i32"),
            ParamType::Int64 => write!(f, "i64"),
            ParamType::Boolean => write!(f, "bool"),
            ParamType::Float32 => write!(f, "f32"),
            ParamType::Float64 => write!(f, "f64"),
            ParamType::Decimal => write!(f, "decimal"),
            ParamType::Collection => write!(f, "array"),
            ParamType::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Rust types with a known declared parameter type
pub trait SchemaType {
    /// Declared type tag for this Rust type
    fn param_type() -> ParamType;
}

macro_rules! schema_type {
    ($variant:expr => $($ty:ty),+) => {
        $(
            impl SchemaType for $ty {
                fn param_type() -> ParamType {
                    $variant
                }
            }
        )+
    };
}

schema_type!(ParamType::String => String, str, char);
schema_type!(ParamType::Int32 => i32, u32, i16, u16, i8, u8);
schema_type!(ParamType::Int64 => i64, u64, isize, usize);
schema_type!(ParamType::Boolean => bool);
schema_type!(ParamType::Float32 => f32);
schema_type!(ParamType::Float64 => f64);

impl<T> SchemaType for Vec<T> {
    fn param_type() -> ParamType {
        ParamType::Collection
    }
}

impl<T> SchemaType for [T] {
    fn param_type() -> ParamType {
        ParamType::Collection
    }
}

impl<T> SchemaType for VecDeque<T> {
    fn param_type() -> ParamType {
        ParamType::Collection
    }
}

impl<T> SchemaType for LinkedList<T> {
    fn param_type() -> ParamType {
        ParamType::Collection
    }
}

impl<T, S> SchemaType for HashSet<T, S> {
    fn param_type() -> ParamType {
        ParamType::Collection
    }
}

impl<T> SchemaType for BTreeSet<T> {
    fn param_type() -> ParamType {
        ParamType::Collection
    }
}

impl<K, V, S> SchemaType for HashMap<K, V, S> {
    fn param_type() -> ParamType {
        ParamType::Collection
    }
}

impl<K, V> SchemaType for BTreeMap<K, V> {
    fn param_type() -> ParamType {
        ParamType::Collection
    }
}

impl<T: SchemaType> SchemaType for Option<T> {
    fn param_type() -> ParamType {
        T::param_type()
    }
}

impl SchemaType for serde_json::Value {
    fn param_type() -> ParamType {
        ParamType::Other("json".to_string())
    }
}
