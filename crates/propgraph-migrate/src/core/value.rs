//! Dynamic source values and typed target values.
//!
//! The source graph is dynamically typed: a property value is one of a closed
//! set of scalar kinds, or a list of such scalars. The target engine is
//! strongly typed: it only accepts scalars of a declared kind or homogeneous
//! typed arrays. This module defines both ends plus the inferred type
//! descriptors that bridge them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar kinds understood on both sides of the migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    String,
    Boolean,
    Integer,
    Short,
    Byte,
    Long,
    Float,
    Double,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "STRING",
            ValueKind::Boolean => "BOOLEAN",
            ValueKind::Integer => "INTEGER",
            ValueKind::Short => "SHORT",
            ValueKind::Byte => "BYTE",
            ValueKind::Long => "LONG",
            ValueKind::Float => "FLOAT",
            ValueKind::Double => "DOUBLE",
        };
        f.write_str(name)
    }
}

/// A dynamically-typed property value as read from the source graph.
///
/// Lists may be heterogeneous at this boundary; the collection normalizer
/// coerces them into a homogeneous [`TypedArray`] before anything reaches
/// the target engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    String(String),
    Boolean(bool),
    Integer(i32),
    Short(i16),
    Byte(i8),
    Long(i64),
    Float(f32),
    Double(f64),
    List(Vec<Value>),
}

impl Value {
    /// Scalar kind of this value, or `None` for nulls and lists.
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::String(_) => Some(ValueKind::String),
            Value::Boolean(_) => Some(ValueKind::Boolean),
            Value::Integer(_) => Some(ValueKind::Integer),
            Value::Short(_) => Some(ValueKind::Short),
            Value::Byte(_) => Some(ValueKind::Byte),
            Value::Long(_) => Some(ValueKind::Long),
            Value::Float(_) => Some(ValueKind::Float),
            Value::Double(_) => Some(ValueKind::Double),
            Value::Null | Value::List(_) => None,
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// String rendering used by the normalizer's string fallback.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::String(v) => f.write_str(v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Short(v) => write!(f, "{}", v),
            Value::Byte(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Inferred type of one property key, scoped to one label.
///
/// Built by merging the observed types of every instance carrying the label.
/// `List(None)` is a list whose element kind was never observed;
/// `Unknown` means the observations conflict (or only nulls were seen) and
/// the property has no usable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    Scalar(ValueKind),
    List(Option<ValueKind>),
    Unknown,
}

impl ValueType {
    /// Observed type of a single value. Nulls carry no type information.
    pub fn of(value: &Value) -> Option<ValueType> {
        match value {
            Value::Null => None,
            Value::List(items) => {
                let element = items.iter().find_map(Value::kind);
                Some(ValueType::List(element))
            }
            scalar => scalar.kind().map(ValueType::Scalar),
        }
    }

    /// Merge two observations of the same (label, key) pair.
    ///
    /// Matching observations keep their type, lists with differing element
    /// kinds widen to an untyped list, and scalar/list conflicts collapse
    /// to `Unknown`.
    pub fn merge(self, other: ValueType) -> ValueType {
        match (self, other) {
            (ValueType::Scalar(a), ValueType::Scalar(b)) if a == b => ValueType::Scalar(a),
            (ValueType::List(a), ValueType::List(b)) => match (a, b) {
                (Some(x), Some(y)) if x == y => ValueType::List(Some(x)),
                (Some(x), None) | (None, Some(x)) => ValueType::List(Some(x)),
                _ => ValueType::List(None),
            },
            _ => ValueType::Unknown,
        }
    }

    /// Whether this descriptor describes a list/array value.
    pub fn is_multivalued(&self) -> bool {
        matches!(self, ValueType::List(_))
    }
}

/// A homogeneous typed array accepted by the target engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedArray {
    Strings(Vec<String>),
    Booleans(Vec<bool>),
    Integers(Vec<i32>),
    Shorts(Vec<i16>),
    Bytes(Vec<i8>),
    Longs(Vec<i64>),
    Floats(Vec<f32>),
    Doubles(Vec<f64>),
}

impl TypedArray {
    /// Element kind of this array.
    pub fn element_kind(&self) -> ValueKind {
        match self {
            TypedArray::Strings(_) => ValueKind::String,
            TypedArray::Booleans(_) => ValueKind::Boolean,
            TypedArray::Integers(_) => ValueKind::Integer,
            TypedArray::Shorts(_) => ValueKind::Short,
            TypedArray::Bytes(_) => ValueKind::Byte,
            TypedArray::Longs(_) => ValueKind::Long,
            TypedArray::Floats(_) => ValueKind::Float,
            TypedArray::Doubles(_) => ValueKind::Double,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            TypedArray::Strings(v) => v.len(),
            TypedArray::Booleans(v) => v.len(),
            TypedArray::Integers(v) => v.len(),
            TypedArray::Shorts(v) => v.len(),
            TypedArray::Bytes(v) => v.len(),
            TypedArray::Longs(v) => v.len(),
            TypedArray::Floats(v) => v.len(),
            TypedArray::Doubles(v) => v.len(),
        }
    }

    /// Check if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A fully-typed value as written to the target engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TargetValue {
    String(String),
    Boolean(bool),
    Integer(i32),
    Short(i16),
    Byte(i8),
    Long(i64),
    Float(f32),
    Double(f64),
    Array(TypedArray),
}

impl TargetValue {
    /// Scalar kind for scalar values, element kind for arrays.
    pub fn kind(&self) -> ValueKind {
        match self {
            TargetValue::String(_) => ValueKind::String,
            TargetValue::Boolean(_) => ValueKind::Boolean,
            TargetValue::Integer(_) => ValueKind::Integer,
            TargetValue::Short(_) => ValueKind::Short,
            TargetValue::Byte(_) => ValueKind::Byte,
            TargetValue::Long(_) => ValueKind::Long,
            TargetValue::Float(_) => ValueKind::Float,
            TargetValue::Double(_) => ValueKind::Double,
            TargetValue::Array(a) => a.element_kind(),
        }
    }

    /// Whether this is an array value.
    pub fn is_array(&self) -> bool {
        matches!(self, TargetValue::Array(_))
    }
}
