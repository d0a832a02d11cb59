//! The stored-object trait and diagnostic property reporting

use std::fmt;
use std::sync::Arc;

/// A reference-counted stored object
pub type SharedObject = Arc<dyn Object>;

/// Trait implemented by anything stored in a [`crate::Repository`]
///
/// Objects are opaque to the repository; the only behavior it relies on is a
/// class label, a permanence flag consulted by garbage collection, and an
/// optional property listing for diagnostic dumps.
pub trait Object {
    /// Short type label shown in dumps (e.g. "ExponentialForwardCorrelation")
    fn class_name(&self) -> &'static str;

    /// Properties listed in diagnostic dumps
    fn properties(&self) -> Vec<Property> {
        Vec::new()
    }

    /// Permanent objects survive garbage collection unless deletion of
    /// permanent objects is explicitly requested
    fn permanent(&self) -> bool {
        false
    }
}

impl fmt::Debug for dyn Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({})", self.class_name())
    }
}

/// A single named property reported by an object
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Property values, kept to the scalar types that render cleanly in a dump
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PropertyValue {
    Text(String),
    Number(f64),
    Integer(i64),
    Boolean(bool),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(s) => write!(f, "{}", s),
            PropertyValue::Number(n) => write!(f, "{}", n),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        PropertyValue::Number(n)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<usize> for PropertyValue {
    fn from(i: usize) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_value_display() {
        assert_eq!(PropertyValue::from("abc").to_string(), "abc");
        assert_eq!(PropertyValue::from(2.5).to_string(), "2.5");
        assert_eq!(PropertyValue::from(7usize).to_string(), "7");
        assert_eq!(PropertyValue::from(true).to_string(), "true");
    }
}
