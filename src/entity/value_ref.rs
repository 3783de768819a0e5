//! Storable references to values

use serde::{Deserialize, Serialize};

use crate::logic::{Value, ValueType, Variable};

/// Either a literal or a variable reference, as written to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ValueRef {
    Value { value: serde_json::Value },
    Variable { name: String, value_type: ValueType },
}

impl ValueRef {
    /// Resolves the reference into a runtime value
    pub fn to_value(&self) -> Value {
        match self {
            ValueRef::Value { value } => Value::Literal(value.clone()),
            ValueRef::Variable { name, value_type } => {
                Value::Variable(Variable::new(name.clone(), *value_type))
            }
        }
    }

    /// Returns the referenced variable, if this is a variable reference
    pub fn to_variable(&self) -> Option<Variable> {
        match self {
            ValueRef::Variable { name, value_type } => Some(Variable::new(name.clone(), *value_type)),
            ValueRef::Value { .. } => None,
        }
    }
}

impl From<&Value> for ValueRef {
    fn from(value: &Value) -> Self {
        match value {
            Value::Literal(literal) => ValueRef::Value {
                value: literal.clone(),
            },
            Value::Variable(variable) => ValueRef::Variable {
                name: variable.name().to_string(),
                value_type: variable.value_type(),
            },
        }
    }
}

impl From<Value> for ValueRef {
    fn from(value: Value) -> Self {
        ValueRef::from(&value)
    }
}

impl From<&ValueRef> for Value {
    fn from(value_ref: &ValueRef) -> Self {
        value_ref.to_value()
    }
}
