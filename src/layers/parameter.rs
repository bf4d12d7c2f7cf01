//! Parameter specifications and concrete parameter values

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Semantic type of a layer parameter, as reported to editors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Number,
    Boolean,
    String,
    Array,
    Object,
    Enum,
}

impl SemanticType {
    /// Get a human-readable name for this type
    pub fn name(&self) -> &'static str {
        match self {
            SemanticType::Number => "number",
            SemanticType::Boolean => "boolean",
            SemanticType::String => "string",
            SemanticType::Array => "array",
            SemanticType::Object => "object",
            SemanticType::Enum => "enum",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named enumeration with ordered member names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSpec {
    pub name: String,
    pub members: Vec<String>,
}

impl EnumSpec {
    pub fn new(name: &str, members: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Case-sensitive membership test
    pub fn contains(&self, member: &str) -> bool {
        self.members.iter().any(|m| m == member)
    }
}

/// Concrete value of one parameter on a layer instance.
///
/// Enum members are held as their member name in `String`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Boolean(bool),
    Number(Number),
    Shape(Vec<i64>),
    String(String),
    Array(Vec<Value>),
    Object(Map<String, Value>),
}

impl ParamValue {
    /// Wrap an arbitrary JSON value without any schema interpretation
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => ParamValue::Null,
            Value::Bool(b) => ParamValue::Boolean(*b),
            Value::Number(n) => ParamValue::Number(n.clone()),
            Value::String(s) => ParamValue::String(s.clone()),
            Value::Array(items) => ParamValue::Array(items.clone()),
            Value::Object(map) => ParamValue::Object(map.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this value can serve as a value of the given semantic type
    pub fn fits(&self, semantic_type: SemanticType) -> bool {
        matches!(
            (semantic_type, self),
            (SemanticType::Number, ParamValue::Number(_))
                | (SemanticType::Boolean, ParamValue::Boolean(_))
                | (SemanticType::String, ParamValue::String(_))
                | (SemanticType::Enum, ParamValue::String(_))
                | (SemanticType::Array, ParamValue::Array(_))
                | (SemanticType::Array, ParamValue::Shape(_))
                | (SemanticType::Object, ParamValue::Object(_))
        )
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Number(value.into())
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Number(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value)
            .map(ParamValue::Number)
            .unwrap_or(ParamValue::Null)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Boolean(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<Vec<i64>> for ParamValue {
    fn from(value: Vec<i64>) -> Self {
        ParamValue::Shape(value)
    }
}

/// Resolved parameters of one layer instance, keyed by parameter name
pub type ParamMap = BTreeMap<String, ParamValue>;

/// Declared contract of one configurable parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub semantic_type: SemanticType,
    /// Surface prominently in the editor form
    pub is_primary: bool,
    pub default: Option<ParamValue>,
    /// Present exactly when `semantic_type` is `Enum`
    pub enumeration: Option<EnumSpec>,
    /// Absent without a default resolves to null instead of failing
    pub nullable: bool,
    /// Scalar-or-sequence parameter broadcast to the kind's dimensionality
    pub shaped: bool,
}

impl ParameterSpec {
    fn with_type(name: &str, semantic_type: SemanticType) -> Self {
        Self {
            name: name.to_string(),
            semantic_type,
            is_primary: false,
            default: None,
            enumeration: None,
            nullable: false,
            shaped: false,
        }
    }

    pub fn number(name: &str) -> Self {
        Self::with_type(name, SemanticType::Number)
    }

    pub fn boolean(name: &str) -> Self {
        Self::with_type(name, SemanticType::Boolean)
    }

    pub fn string(name: &str) -> Self {
        Self::with_type(name, SemanticType::String)
    }

    pub fn array(name: &str) -> Self {
        Self::with_type(name, SemanticType::Array)
    }

    pub fn object(name: &str) -> Self {
        Self::with_type(name, SemanticType::Object)
    }

    pub fn enumeration(name: &str, enumeration: EnumSpec) -> Self {
        Self {
            enumeration: Some(enumeration),
            ..Self::with_type(name, SemanticType::Enum)
        }
    }

    /// A numeric parameter that may also be given as a per-dimension sequence
    pub fn shape(name: &str) -> Self {
        Self {
            shaped: true,
            ..Self::with_type(name, SemanticType::Number)
        }
    }

    /// Builder pattern methods for fluent configuration
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_default_member(mut self, member: &str) -> Self {
        self.default = Some(ParamValue::String(member.to_string()));
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Check the spec is internally consistent; returns the reason when it is not
    pub fn check(&self) -> Result<(), String> {
        match (self.semantic_type, &self.enumeration) {
            (SemanticType::Enum, None) => {
                return Err(format!("enum parameter '{}' declares no enumeration", self.name))
            }
            (SemanticType::Enum, Some(e)) if e.members.is_empty() => {
                return Err(format!("enum {} of '{}' has no members", e.name, self.name))
            }
            (SemanticType::Enum, Some(_)) => {}
            (_, Some(_)) => {
                return Err(format!("non-enum parameter '{}' declares an enumeration", self.name))
            }
            (_, None) => {}
        }

        if self.shaped && self.semantic_type != SemanticType::Number {
            return Err(format!("shape parameter '{}' must be numeric", self.name));
        }

        let Some(default) = &self.default else {
            return Ok(());
        };
        if self.shaped {
            let integral = match default {
                ParamValue::Number(n) => n.as_i64().is_some(),
                ParamValue::Shape(dims) => !dims.is_empty(),
                _ => false,
            };
            if !integral {
                return Err(format!("default of shape parameter '{}' must be an integer or a non-empty list", self.name));
            }
            return Ok(());
        }
        if !default.fits(self.semantic_type) {
            return Err(format!(
                "default of '{}' does not match its type {}",
                self.name, self.semantic_type
            ));
        }
        if let (Some(e), Some(member)) = (&self.enumeration, default.as_str()) {
            if !e.contains(member) {
                return Err(format!(
                    "default '{}' of '{}' is not a member of {}",
                    member, self.name, e.name
                ));
            }
        }
        Ok(())
    }
}
