//! Parsed data values, one per definition

use crate::types::{ArrayValue, Scalar, ScalarSeq};

/// One decoded SDDS value.
///
/// Parameters hold a single [`Scalar`], arrays an [`ArrayValue`], columns a
/// [`ScalarSeq`] with one element per row of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Array(ArrayValue),
    Column(ScalarSeq),
}

impl Value {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_column(&self) -> Option<&ScalarSeq> {
        match self {
            Value::Column(c) => Some(c),
            _ => None,
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<ArrayValue> for Value {
    fn from(a: ArrayValue) -> Self {
        Value::Array(a)
    }
}
