//! Collection normalization: heterogeneous source lists become homogeneous
//! typed arrays.
//!
//! The first non-null element picks the representative kind. If every
//! element conforms, the list materializes as a typed array of that kind;
//! anything else falls back to rendering each element as a string. The
//! fallback is intentionally lossy and tolerant: a collection is coerced,
//! never rejected, and element order is always preserved.

use crate::core::value::{TargetValue, TypedArray, Value, ValueKind};

/// Normalize a source collection into a homogeneous typed array.
pub fn normalize(values: &[Value]) -> TypedArray {
    if let Some(kind) = values.iter().find_map(Value::kind) {
        if let Some(array) = collect_as(values, kind) {
            return array;
        }
    }
    // No non-null element, or a non-conforming element: string fallback.
    TypedArray::Strings(values.iter().map(Value::to_string).collect())
}

/// Convert a source value into a typed target value.
///
/// Nulls have no target representation and are skipped by the caller;
/// collections run through the normalizer first.
pub fn to_target_value(value: &Value) -> Option<TargetValue> {
    match value {
        Value::Null => None,
        Value::String(v) => Some(TargetValue::String(v.clone())),
        Value::Boolean(v) => Some(TargetValue::Boolean(*v)),
        Value::Integer(v) => Some(TargetValue::Integer(*v)),
        Value::Short(v) => Some(TargetValue::Short(*v)),
        Value::Byte(v) => Some(TargetValue::Byte(*v)),
        Value::Long(v) => Some(TargetValue::Long(*v)),
        Value::Float(v) => Some(TargetValue::Float(*v)),
        Value::Double(v) => Some(TargetValue::Double(*v)),
        Value::List(items) => Some(TargetValue::Array(normalize(items))),
    }
}

/// Materialize the values as a typed array of `kind`, or `None` if any
/// element is not exactly that kind.
fn collect_as(values: &[Value], kind: ValueKind) -> Option<TypedArray> {
    match kind {
        ValueKind::String => values
            .iter()
            .map(|v| match v {
                Value::String(s) => Some(s.clone()),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(TypedArray::Strings),
        ValueKind::Boolean => values
            .iter()
            .map(|v| match v {
                Value::Boolean(b) => Some(*b),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(TypedArray::Booleans),
        ValueKind::Integer => values
            .iter()
            .map(|v| match v {
                Value::Integer(i) => Some(*i),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(TypedArray::Integers),
        ValueKind::Short => values
            .iter()
            .map(|v| match v {
                Value::Short(i) => Some(*i),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(TypedArray::Shorts),
        ValueKind::Byte => values
            .iter()
            .map(|v| match v {
                Value::Byte(i) => Some(*i),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(TypedArray::Bytes),
        ValueKind::Long => values
            .iter()
            .map(|v| match v {
                Value::Long(i) => Some(*i),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(TypedArray::Longs),
        ValueKind::Float => values
            .iter()
            .map(|v| match v {
                Value::Float(x) => Some(*x),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(TypedArray::Floats),
        ValueKind::Double => values
            .iter()
            .map(|v| match v {
                Value::Double(x) => Some(*x),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(TypedArray::Doubles),
    }
}
