//! Type mapping between inferred source descriptors and the target engine's
//! typed property model.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::value::{TargetValue, ValueKind, ValueType};

/// A typed property declaration in the target engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetType {
    Scalar(ValueKind),
    List(ValueKind),
}

impl TargetType {
    /// Whether this type describes an array-valued property.
    pub fn is_list(&self) -> bool {
        matches!(self, TargetType::List(_))
    }

    /// Check whether a value conforms to this declaration.
    ///
    /// Empty arrays carry no element type of their own and are accepted by
    /// every list declaration.
    pub fn accepts(&self, value: &TargetValue) -> bool {
        match self {
            TargetType::Scalar(kind) => !value.is_array() && value.kind() == *kind,
            TargetType::List(kind) => match value {
                TargetValue::Array(arr) => arr.is_empty() || arr.element_kind() == *kind,
                _ => false,
            },
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetType::Scalar(kind) => write!(f, "{}", kind),
            TargetType::List(kind) => write!(f, "LIST_OF_{}", kind),
        }
    }
}

/// Map a source property type descriptor to a target type declaration.
///
/// Scalar kinds map 1:1. A list whose element kind was never observed falls
/// back to list-of-string. `Unknown` descriptors have no mapping; the caller
/// omits the property rather than aborting.
pub fn map_value_type(descriptor: ValueType) -> Option<TargetType> {
    match descriptor {
        ValueType::Scalar(kind) => Some(TargetType::Scalar(kind)),
        ValueType::List(Some(kind)) => Some(TargetType::List(kind)),
        ValueType::List(None) => Some(TargetType::List(ValueKind::String)),
        ValueType::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::TypedArray;

    #[test]
    fn test_scalar_mapping() {
        assert_eq!(
            map_value_type(ValueType::Scalar(ValueKind::Integer)),
            Some(TargetType::Scalar(ValueKind::Integer))
        );
        assert_eq!(
            map_value_type(ValueType::Scalar(ValueKind::Double)),
            Some(TargetType::Scalar(ValueKind::Double))
        );
        assert_eq!(
            map_value_type(ValueType::Scalar(ValueKind::String)),
            Some(TargetType::Scalar(ValueKind::String))
        );
    }

    #[test]
    fn test_list_mapping() {
        assert_eq!(
            map_value_type(ValueType::List(Some(ValueKind::Long))),
            Some(TargetType::List(ValueKind::Long))
        );
    }

    #[test]
    fn test_untyped_list_falls_back_to_string() {
        assert_eq!(
            map_value_type(ValueType::List(None)),
            Some(TargetType::List(ValueKind::String))
        );
    }

    #[test]
    fn test_unknown_has_no_mapping() {
        assert_eq!(map_value_type(ValueType::Unknown), None);
    }

    #[test]
    fn test_accepts_scalar() {
        let ty = TargetType::Scalar(ValueKind::Integer);
        assert!(ty.accepts(&TargetValue::Integer(1)));
        assert!(!ty.accepts(&TargetValue::Long(1)));
        assert!(!ty.accepts(&TargetValue::Array(TypedArray::Integers(vec![1]))));
    }

    #[test]
    fn test_accepts_list() {
        let ty = TargetType::List(ValueKind::String);
        assert!(ty.accepts(&TargetValue::Array(TypedArray::Strings(vec!["a".into()]))));
        assert!(!ty.accepts(&TargetValue::Array(TypedArray::Integers(vec![1]))));
        assert!(!ty.accepts(&TargetValue::String("a".into())));
        // Empty arrays conform to any list declaration.
        assert!(ty.accepts(&TargetValue::Array(TypedArray::Integers(vec![]))));
    }

    #[test]
    fn test_display() {
        assert_eq!(TargetType::Scalar(ValueKind::Boolean).to_string(), "BOOLEAN");
        assert_eq!(
            TargetType::List(ValueKind::String).to_string(),
            "LIST_OF_STRING"
        );
    }
}
