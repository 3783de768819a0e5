//! Logical variables and values
//!
//! A [`Value`] is either a literal JSON datum or a [`Variable`]. Literals flow
//! through unification untouched; variables are pure identifiers resolved
//! against a [`State`](super::State).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared type of a logical variable.
///
/// The type is part of the variable's identity: `x: integer` and `x: text`
/// are two distinct variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Any,
    Null,
    Bool,
    Integer,
    Float,
    Number,
    Text,
    List,
    Object,
}

impl ValueType {
    /// Returns the type name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Any => "any",
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Number => "number",
            ValueType::Text => "text",
            ValueType::List => "list",
            ValueType::Object => "object",
        }
    }

    /// Returns the narrowest type describing a literal
    pub fn of(literal: &serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match literal {
            Json::Null => ValueType::Null,
            Json::Bool(_) => ValueType::Bool,
            Json::Number(n) if n.is_i64() || n.is_u64() => ValueType::Integer,
            Json::Number(_) => ValueType::Float,
            Json::String(_) => ValueType::Text,
            Json::Array(_) => ValueType::List,
            Json::Object(_) => ValueType::Object,
        }
    }

    /// Returns true if a literal fits this declared type
    pub fn admits(&self, literal: &serde_json::Value) -> bool {
        let actual = ValueType::of(literal);
        match self {
            ValueType::Any => true,
            ValueType::Number => matches!(actual, ValueType::Integer | ValueType::Float),
            declared => *declared == actual,
        }
    }

    /// The narrower of two declared types, or `None` if no literal fits both.
    ///
    /// The result is always one of the two inputs.
    pub fn meet(&self, other: &ValueType) -> Option<ValueType> {
        let numeric = |t: &ValueType| matches!(t, ValueType::Integer | ValueType::Float | ValueType::Number);
        match (*self, *other) {
            (ValueType::Any, narrow) | (narrow, ValueType::Any) => Some(narrow),
            (ValueType::Number, narrow) | (narrow, ValueType::Number) if numeric(&narrow) => Some(narrow),
            (a, b) if a == b => Some(a),
            _ => None,
        }
    }

    /// Returns true if values of both types can be ordered against each other.
    ///
    /// `any` is compatible with everything; the check is repeated on the
    /// resolved values once they are known.
    pub fn is_comparable_with(&self, other: &ValueType) -> bool {
        let numeric = |t: &ValueType| matches!(t, ValueType::Integer | ValueType::Float | ValueType::Number);
        match (self, other) {
            (ValueType::Any, _) | (_, ValueType::Any) => true,
            (a, b) if numeric(a) && numeric(b) => true,
            (ValueType::List, _) | (ValueType::Object, _) => false,
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named, typed logical variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    name: String,
    value_type: ValueType,
}

impl Variable {
    /// Create a variable with a declared type
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
        }
    }

    /// Create an untyped variable
    pub fn any(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Any)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}:{}", self.name, self.value_type)
    }
}

/// A term taking part in unification.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An immutable datum
    Literal(serde_json::Value),
    /// A logical variable
    Variable(Variable),
}

impl Value {
    /// Returns the variable if this value is one
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Value::Variable(variable) => Some(variable),
            Value::Literal(_) => None,
        }
    }

    /// Returns the literal if this value is one
    pub fn as_literal(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Literal(literal) => Some(literal),
            Value::Variable(_) => None,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Value::Variable(_))
    }

    /// Declared type of a variable, or the literal's own type
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Variable(variable) => variable.value_type(),
            Value::Literal(literal) => ValueType::of(literal),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Literal(literal) => write!(f, "{}", literal),
            Value::Variable(variable) => write!(f, "{}", variable),
        }
    }
}

impl From<Variable> for Value {
    fn from(variable: Variable) -> Self {
        Value::Variable(variable)
    }
}

impl From<&Variable> for Value {
    fn from(variable: &Variable) -> Self {
        Value::Variable(variable.clone())
    }
}

impl From<serde_json::Value> for Value {
    fn from(literal: serde_json::Value) -> Self {
        Value::Literal(literal)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Literal(serde_json::Value::from(text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Literal(serde_json::Value::from(text))
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Value::Literal(serde_json::Value::from(number))
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Value::Literal(serde_json::Value::from(number))
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Literal(serde_json::Value::from(number))
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Literal(serde_json::Value::from(flag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variable_identity_includes_type() {
        assert_eq!(Variable::new("x", ValueType::Integer), Variable::new("x", ValueType::Integer));
        assert_ne!(Variable::new("x", ValueType::Integer), Variable::new("x", ValueType::Text));
    }

    #[test]
    fn test_admits() {
        assert!(ValueType::Integer.admits(&json!(42)));
        assert!(!ValueType::Integer.admits(&json!(4.2)));
        assert!(ValueType::Number.admits(&json!(4.2)));
        assert!(ValueType::Any.admits(&json!({"a": 1})));
        assert!(!ValueType::Text.admits(&json!(1)));
    }

    #[test]
    fn test_meet() {
        assert_eq!(ValueType::Any.meet(&ValueType::Text), Some(ValueType::Text));
        assert_eq!(ValueType::Integer.meet(&ValueType::Number), Some(ValueType::Integer));
        assert_eq!(ValueType::Number.meet(&ValueType::Float), Some(ValueType::Float));
        assert_eq!(ValueType::List.meet(&ValueType::List), Some(ValueType::List));
        assert_eq!(ValueType::Integer.meet(&ValueType::Float), None);
        assert_eq!(ValueType::Text.meet(&ValueType::Integer), None);
    }

    #[test]
    fn test_comparable_types() {
        assert!(ValueType::Integer.is_comparable_with(&ValueType::Float));
        assert!(ValueType::Text.is_comparable_with(&ValueType::Any));
        assert!(!ValueType::Text.is_comparable_with(&ValueType::Integer));
        assert!(!ValueType::List.is_comparable_with(&ValueType::List));
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(42), Value::Literal(json!(42)));
        assert_eq!(Value::from("Fire"), Value::Literal(json!("Fire")));
        let variable = Variable::any("name");
        assert_eq!(Value::from(&variable).as_variable(), Some(&variable));
    }
}
