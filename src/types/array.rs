//! Multi-dimensional array values

use crate::error::{Result, SddsError};
use crate::types::{ScalarSeq, SddsType};

/// Owned array value: per-axis extents plus a row-major flattened payload.
///
/// The extents' product always equals the payload length; the checked
/// constructor enforces it so decoded and hand-built arrays behave alike.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
    shape: Vec<usize>,
    data: ScalarSeq,
}

impl ArrayValue {
    pub fn new(shape: Vec<usize>, data: ScalarSeq) -> Result<Self> {
        match Self::element_count(&shape) {
            Ok(expected) if expected == data.len() => Ok(Self { shape, data }),
            _ => Err(SddsError::ShapeMismatch {
                shape,
                len: data.len(),
            }),
        }
    }

    /// Number of elements a set of extents implies.
    ///
    /// The multiplication is checked: extents arrive from untrusted input
    /// and their product must not wrap around before it is used as a read
    /// count or allocation size.
    pub(crate) fn element_count(shape: &[usize]) -> Result<usize> {
        shape
            .iter()
            .try_fold(1usize, |acc, &extent| acc.checked_mul(extent))
            .ok_or_else(|| SddsError::Cast {
                ty: "long",
                value: format!("{shape:?}"),
            })
    }

    /// Per-axis extents
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Flattened row-major payload
    pub fn data(&self) -> &ScalarSeq {
        &self.data
    }

    /// Element type
    pub fn sdds_type(&self) -> SddsType {
        self.data.sdds_type()
    }

    /// Number of axes
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements
    pub fn num_elements(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_construction() {
        let arr = ArrayValue::new(vec![2, 3], ScalarSeq::Long(vec![1, 2, 3, 4, 5, 6])).unwrap();
        assert_eq!(arr.rank(), 2);
        assert_eq!(arr.num_elements(), 6);
        assert_eq!(arr.sdds_type(), SddsType::Long);
    }

    #[test]
    fn shape_mismatch_rejected() {
        let err = ArrayValue::new(vec![2, 3], ScalarSeq::Long(vec![1, 2, 3])).unwrap_err();
        assert!(matches!(err, SddsError::ShapeMismatch { len: 3, .. }));
    }

    #[test]
    fn empty_extent() {
        let arr = ArrayValue::new(vec![0], ScalarSeq::Double(vec![])).unwrap();
        assert_eq!(arr.num_elements(), 0);
    }

    #[test]
    fn overflowing_extents_rejected() {
        let shape = vec![usize::MAX, usize::MAX];
        assert!(matches!(
            ArrayValue::element_count(&shape),
            Err(SddsError::Cast { ty: "long", .. })
        ));
        let err = ArrayValue::new(shape, ScalarSeq::Long(vec![1])).unwrap_err();
        assert!(matches!(err, SddsError::ShapeMismatch { len: 1, .. }));
    }
}
