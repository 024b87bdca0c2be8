//! ndarray integration for SDDS arrays
//!
//! This module provides conversions between [`ArrayValue`] and ndarray's
//! dynamic-dimensional `ArrayD`, so multi-dimensional SDDS payloads can be
//! indexed and sliced instead of walked flat.
//!
//! Enable with the `ndarray` feature flag.

use ndarray::{ArrayD, IxDyn};
use thiserror::Error;

use crate::types::{ArrayValue, ScalarSeq, SddsType};

/// Error type for ndarray conversions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NdarrayError {
    #[error("type mismatch: expected {expected:?}, got {actual:?}")]
    TypeMismatch {
        expected: SddsType,
        actual: SddsType,
    },
    #[error("shape {shape:?} doesn't match data length {data_len}")]
    ShapeMismatch { shape: Vec<usize>, data_len: usize },
}

/// Trait for element types that can cross between [`ScalarSeq`] and ndarray
pub trait ArrayType: Sized + Clone + 'static {
    const TYPE: SddsType;

    fn from_seq(seq: &ScalarSeq) -> Option<&[Self]>;
    fn into_seq(elements: Vec<Self>) -> ScalarSeq;
}

impl ArrayType for f32 {
    const TYPE: SddsType = SddsType::Float;

    fn from_seq(seq: &ScalarSeq) -> Option<&[Self]> {
        seq.floats()
    }
    fn into_seq(elements: Vec<Self>) -> ScalarSeq {
        ScalarSeq::Float(elements)
    }
}

impl ArrayType for f64 {
    const TYPE: SddsType = SddsType::Double;

    fn from_seq(seq: &ScalarSeq) -> Option<&[Self]> {
        seq.doubles()
    }
    fn into_seq(elements: Vec<Self>) -> ScalarSeq {
        ScalarSeq::Double(elements)
    }
}

impl ArrayType for i16 {
    const TYPE: SddsType = SddsType::Short;

    fn from_seq(seq: &ScalarSeq) -> Option<&[Self]> {
        seq.shorts()
    }
    fn into_seq(elements: Vec<Self>) -> ScalarSeq {
        ScalarSeq::Short(elements)
    }
}

impl ArrayType for i32 {
    const TYPE: SddsType = SddsType::Long;

    fn from_seq(seq: &ScalarSeq) -> Option<&[Self]> {
        seq.longs()
    }
    fn into_seq(elements: Vec<Self>) -> ScalarSeq {
        ScalarSeq::Long(elements)
    }
}

impl ArrayType for i64 {
    const TYPE: SddsType = SddsType::Llong;

    fn from_seq(seq: &ScalarSeq) -> Option<&[Self]> {
        seq.llongs()
    }
    fn into_seq(elements: Vec<Self>) -> ScalarSeq {
        ScalarSeq::Llong(elements)
    }
}

impl ArrayValue {
    /// Convert to an ndarray `ArrayD`, cloning the payload out
    pub fn to_ndarray<T: ArrayType>(&self) -> Result<ArrayD<T>, NdarrayError> {
        let slice = T::from_seq(self.data()).ok_or(NdarrayError::TypeMismatch {
            expected: T::TYPE,
            actual: self.sdds_type(),
        })?;
        ArrayD::from_shape_vec(IxDyn(self.shape()), slice.to_vec()).map_err(|_| {
            NdarrayError::ShapeMismatch {
                shape: self.shape().to_vec(),
                data_len: slice.len(),
            }
        })
    }

    /// Create an [`ArrayValue`] from an ndarray `ArrayD`.
    ///
    /// Non-contiguous arrays are copied into standard layout first, so the
    /// stored payload is always flattened row-major.
    pub fn from_ndarray<T: ArrayType>(arr: ArrayD<T>) -> Result<Self, NdarrayError> {
        let shape = arr.shape().to_vec();
        let elements: Vec<T> = arr.iter().cloned().collect();
        let data_len = elements.len();
        ArrayValue::new(shape.clone(), T::into_seq(elements))
            .map_err(|_| NdarrayError::ShapeMismatch { shape, data_len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn roundtrip_1d_f32() {
        let arr = array![1.0f32, 2.0, 3.0, 4.0].into_dyn();
        let expected = arr.clone();
        let value = ArrayValue::from_ndarray(arr).unwrap();

        assert_eq!(value.sdds_type(), SddsType::Float);
        assert_eq!(value.shape(), &[4]);

        let back: ArrayD<f32> = value.to_ndarray().unwrap();
        assert_eq!(expected, back);
    }

    #[test]
    fn roundtrip_2d_i32() {
        let arr = array![[1i32, 2, 3], [4, 5, 6]].into_dyn();
        let expected = arr.clone();
        let value = ArrayValue::from_ndarray(arr).unwrap();

        assert_eq!(value.sdds_type(), SddsType::Long);
        assert_eq!(value.shape(), &[2, 3]);
        assert_eq!(value.data().longs(), Some(&[1i32, 2, 3, 4, 5, 6][..]));

        let back: ArrayD<i32> = value.to_ndarray().unwrap();
        assert_eq!(expected, back);
    }

    #[test]
    fn type_mismatch_error() {
        let arr = array![1.0f32, 2.0, 3.0].into_dyn();
        let value = ArrayValue::from_ndarray(arr).unwrap();

        let result: Result<ArrayD<f64>, _> = value.to_ndarray();
        assert!(matches!(result, Err(NdarrayError::TypeMismatch { .. })));
    }

    #[test]
    fn non_contiguous_input_flattened_row_major() {
        let arr = array![[1i64, 2], [3, 4]].into_dyn();
        let transposed = arr.t().into_dyn().into_owned();
        let value = ArrayValue::from_ndarray(transposed).unwrap();

        assert_eq!(value.shape(), &[2, 2]);
        assert_eq!(value.data().llongs(), Some(&[1i64, 3, 2, 4][..]));
    }

    #[test]
    fn all_element_types() {
        assert_eq!(
            ArrayValue::from_ndarray(array![1.0f32].into_dyn())
                .unwrap()
                .sdds_type(),
            SddsType::Float
        );
        assert_eq!(
            ArrayValue::from_ndarray(array![1.0f64].into_dyn())
                .unwrap()
                .sdds_type(),
            SddsType::Double
        );
        assert_eq!(
            ArrayValue::from_ndarray(array![1i16].into_dyn())
                .unwrap()
                .sdds_type(),
            SddsType::Short
        );
        assert_eq!(
            ArrayValue::from_ndarray(array![1i32].into_dyn())
                .unwrap()
                .sdds_type(),
            SddsType::Long
        );
        assert_eq!(
            ArrayValue::from_ndarray(array![1i64].into_dyn())
                .unwrap()
                .sdds_type(),
            SddsType::Llong
        );
    }
}
