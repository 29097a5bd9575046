use std::fmt;

use serde::{Deserialize, Serialize};

/// Dynamically typed value passed between scripts and the command
/// dispatcher.
///
/// Every command argument and return value crosses the dispatcher
/// boundary as a `Value`; typed extraction happens against the
/// per-command parameter schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Num(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Num(_) => "number",
            Value::Str(_) => "string",
            Value::List(_) => "list",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Numeric view of the value, when it has one.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Int(value) => Some(*value as f64),
            Value::Num(value) => Some(*value),
            _ => None,
        }
    }

    /// Integer view of the value; floats are truncated.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            Value::Num(value) => Some(*value as i64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            Value::Int(value) => Some(*value != 0),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(values) => Some(values),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Num(value) => write!(f, "{value}"),
            Value::Str(value) => f.write_str(value),
            Value::List(values) => {
                let joined: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", joined.join(", "))
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Num(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

/// Kind of a declared command parameter.
///
/// The schema is closed: every command parameter is one of these kinds.
/// `Class`, `State`, `Climate` and `Weather` travel as raw integers and
/// are decoded when the command executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    Int,
    Num,
    Bool,
    Str,
    List,
    Class,
    State,
    Climate,
    Weather,
    /// Escape hatch for the few parameters whose type is a genuine
    /// union in the original command surface.
    Any,
}

impl ParamKind {
    pub fn expected(self) -> &'static str {
        match self {
            ParamKind::Int => "int",
            ParamKind::Num => "number",
            ParamKind::Bool => "bool",
            ParamKind::Str => "string",
            ParamKind::List => "list",
            ParamKind::Class => "entity class",
            ParamKind::State => "state flag",
            ParamKind::Climate => "climate",
            ParamKind::Weather => "weather",
            ParamKind::Any => "any value",
        }
    }

    /// Structural check used during argument validation.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            ParamKind::Int => matches!(value, Value::Int(_)),
            ParamKind::Num => matches!(value, Value::Int(_) | Value::Num(_)),
            ParamKind::Bool => matches!(value, Value::Bool(_) | Value::Int(_)),
            ParamKind::Str => matches!(value, Value::Str(_)),
            ParamKind::List => matches!(value, Value::List(_)),
            ParamKind::Class
            | ParamKind::State
            | ParamKind::Climate
            | ParamKind::Weather => matches!(value, Value::Int(_)),
            ParamKind::Any => true,
        }
    }
}

/// Declared parameter of a scripting command.
#[derive(Debug, Clone, Copy)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
}

/// Required parameter.
pub const fn req(name: &'static str, kind: ParamKind) -> Param {
    Param {
        name,
        kind,
        required: true,
    }
}

/// Optional parameter; absent arguments read as `Nil`.
pub const fn opt(name: &'static str, kind: ParamKind) -> Param {
    Param {
        name,
        kind,
        required: false,
    }
}
