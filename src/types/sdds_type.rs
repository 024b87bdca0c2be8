//! The closed SDDS scalar type system
//!
//! SDDS headers declare every entity with one of seven scalar types. This
//! module holds the registry ([`SddsType`]: names, binary widths, text casts)
//! and the owned value carriers ([`Scalar`] for single values, [`ScalarSeq`]
//! for homogeneous sequences used by arrays and columns).

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SddsError};

/// Scalar type of an SDDS entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SddsType {
    Float,
    Double,
    Short,
    Long,
    Llong,
    Char,
    Boolean,
    String,
}

impl SddsType {
    /// Binary width in bytes of a single element.
    ///
    /// `None` for strings, which are length-prefixed rather than fixed-width.
    pub fn fixed_size(self) -> Option<usize> {
        match self {
            SddsType::Float => Some(4),
            SddsType::Double => Some(8),
            SddsType::Short => Some(2),
            SddsType::Long => Some(4),
            SddsType::Llong => Some(8),
            SddsType::Char | SddsType::Boolean => Some(1),
            SddsType::String => None,
        }
    }

    /// Lowercase name as it appears in headers
    pub fn as_str(self) -> &'static str {
        match self {
            SddsType::Float => "float",
            SddsType::Double => "double",
            SddsType::Short => "short",
            SddsType::Long => "long",
            SddsType::Llong => "llong",
            SddsType::Char => "char",
            SddsType::Boolean => "boolean",
            SddsType::String => "string",
        }
    }

    /// Convert one text token to a native value of this type.
    ///
    /// Used for ASCII data tokens and for `fixed_value` synthesis. Strings
    /// pass through untouched; everything else is trimmed and parsed.
    pub fn cast(self, text: &str) -> Result<Scalar> {
        let trimmed = text.trim();
        let err = || SddsError::Cast {
            ty: self.as_str(),
            value: text.to_string(),
        };
        Ok(match self {
            SddsType::Float => Scalar::Float(trimmed.parse().map_err(|_| err())?),
            SddsType::Double => Scalar::Double(trimmed.parse().map_err(|_| err())?),
            SddsType::Short => Scalar::Short(trimmed.parse().map_err(|_| err())?),
            SddsType::Long => Scalar::Long(trimmed.parse().map_err(|_| err())?),
            SddsType::Llong => Scalar::Llong(trimmed.parse().map_err(|_| err())?),
            SddsType::Char => Scalar::Char(match trimmed.chars().next() {
                Some(c) if trimmed.chars().count() == 1 => c,
                _ => return Err(err()),
            }),
            SddsType::Boolean => {
                let n: i64 = trimmed.parse().map_err(|_| err())?;
                Scalar::Boolean(n != 0)
            }
            SddsType::String => Scalar::String(text.to_string()),
        })
    }
}

impl FromStr for SddsType {
    type Err = SddsError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "float" => SddsType::Float,
            "double" => SddsType::Double,
            "short" => SddsType::Short,
            "long" => SddsType::Long,
            "llong" => SddsType::Llong,
            "char" => SddsType::Char,
            "boolean" => SddsType::Boolean,
            "string" => SddsType::String,
            other => return Err(SddsError::UnknownType(other.to_string())),
        })
    }
}

impl fmt::Display for SddsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One owned SDDS value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Float(f32),
    Double(f64),
    Short(i16),
    Long(i32),
    Llong(i64),
    Char(char),
    Boolean(bool),
    String(String),
}

impl Scalar {
    /// Registry type of this value
    pub fn sdds_type(&self) -> SddsType {
        match self {
            Scalar::Float(_) => SddsType::Float,
            Scalar::Double(_) => SddsType::Double,
            Scalar::Short(_) => SddsType::Short,
            Scalar::Long(_) => SddsType::Long,
            Scalar::Llong(_) => SddsType::Llong,
            Scalar::Char(_) => SddsType::Char,
            Scalar::Boolean(_) => SddsType::Boolean,
            Scalar::String(_) => SddsType::String,
        }
    }

    /// Numeric value widened to f64, if this is a numeric type
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Float(v) => Some(*v as f64),
            Scalar::Double(v) => Some(*v),
            Scalar::Short(v) => Some(*v as f64),
            Scalar::Long(v) => Some(*v as f64),
            Scalar::Llong(v) => Some(*v as f64),
            Scalar::Boolean(v) => Some(*v as u8 as f64),
            _ => None,
        }
    }

    /// Integer value widened to i64, if this is an integer type
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Short(v) => Some(*v as i64),
            Scalar::Long(v) => Some(*v as i64),
            Scalar::Llong(v) => Some(*v),
            Scalar::Boolean(v) => Some(*v as i64),
            _ => None,
        }
    }

    /// String contents, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Homogeneous sequence of SDDS values.
///
/// Backs both array payloads (flattened row-major) and column values.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarSeq {
    Float(Vec<f32>),
    Double(Vec<f64>),
    Short(Vec<i16>),
    Long(Vec<i32>),
    Llong(Vec<i64>),
    Char(Vec<char>),
    Boolean(Vec<bool>),
    String(Vec<String>),
}

impl ScalarSeq {
    /// Empty sequence of the given element type
    pub fn new(ty: SddsType) -> Self {
        match ty {
            SddsType::Float => ScalarSeq::Float(Vec::new()),
            SddsType::Double => ScalarSeq::Double(Vec::new()),
            SddsType::Short => ScalarSeq::Short(Vec::new()),
            SddsType::Long => ScalarSeq::Long(Vec::new()),
            SddsType::Llong => ScalarSeq::Llong(Vec::new()),
            SddsType::Char => ScalarSeq::Char(Vec::new()),
            SddsType::Boolean => ScalarSeq::Boolean(Vec::new()),
            SddsType::String => ScalarSeq::String(Vec::new()),
        }
    }

    /// Element type of the sequence
    pub fn sdds_type(&self) -> SddsType {
        match self {
            ScalarSeq::Float(_) => SddsType::Float,
            ScalarSeq::Double(_) => SddsType::Double,
            ScalarSeq::Short(_) => SddsType::Short,
            ScalarSeq::Long(_) => SddsType::Long,
            ScalarSeq::Llong(_) => SddsType::Llong,
            ScalarSeq::Char(_) => SddsType::Char,
            ScalarSeq::Boolean(_) => SddsType::Boolean,
            ScalarSeq::String(_) => SddsType::String,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ScalarSeq::Float(v) => v.len(),
            ScalarSeq::Double(v) => v.len(),
            ScalarSeq::Short(v) => v.len(),
            ScalarSeq::Long(v) => v.len(),
            ScalarSeq::Llong(v) => v.len(),
            ScalarSeq::Char(v) => v.len(),
            ScalarSeq::Boolean(v) => v.len(),
            ScalarSeq::String(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append one value. The value's type must match the element type.
    pub fn push(&mut self, scalar: Scalar) -> Result<()> {
        match (self, scalar) {
            (ScalarSeq::Float(v), Scalar::Float(s)) => v.push(s),
            (ScalarSeq::Double(v), Scalar::Double(s)) => v.push(s),
            (ScalarSeq::Short(v), Scalar::Short(s)) => v.push(s),
            (ScalarSeq::Long(v), Scalar::Long(s)) => v.push(s),
            (ScalarSeq::Llong(v), Scalar::Llong(s)) => v.push(s),
            (ScalarSeq::Char(v), Scalar::Char(s)) => v.push(s),
            (ScalarSeq::Boolean(v), Scalar::Boolean(s)) => v.push(s),
            (ScalarSeq::String(v), Scalar::String(s)) => v.push(s),
            (seq, scalar) => {
                return Err(SddsError::Cast {
                    ty: seq.sdds_type().as_str(),
                    value: format!("{scalar:?}"),
                })
            }
        }
        Ok(())
    }

    /// Value at `idx`, cloned out of the sequence
    pub fn get(&self, idx: usize) -> Option<Scalar> {
        match self {
            ScalarSeq::Float(v) => v.get(idx).map(|s| Scalar::Float(*s)),
            ScalarSeq::Double(v) => v.get(idx).map(|s| Scalar::Double(*s)),
            ScalarSeq::Short(v) => v.get(idx).map(|s| Scalar::Short(*s)),
            ScalarSeq::Long(v) => v.get(idx).map(|s| Scalar::Long(*s)),
            ScalarSeq::Llong(v) => v.get(idx).map(|s| Scalar::Llong(*s)),
            ScalarSeq::Char(v) => v.get(idx).map(|s| Scalar::Char(*s)),
            ScalarSeq::Boolean(v) => v.get(idx).map(|s| Scalar::Boolean(*s)),
            ScalarSeq::String(v) => v.get(idx).map(|s| Scalar::String(s.clone())),
        }
    }

    /// Iterate over the values, cloning each one out
    pub fn iter(&self) -> impl Iterator<Item = Scalar> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Cast a slice of text tokens into a sequence of the given type
    pub fn cast_tokens(ty: SddsType, tokens: &[String]) -> Result<Self> {
        let mut seq = ScalarSeq::new(ty);
        for token in tokens {
            seq.push(ty.cast(token)?)?;
        }
        Ok(seq)
    }

    pub fn floats(&self) -> Option<&[f32]> {
        match self {
            ScalarSeq::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn doubles(&self) -> Option<&[f64]> {
        match self {
            ScalarSeq::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn shorts(&self) -> Option<&[i16]> {
        match self {
            ScalarSeq::Short(v) => Some(v),
            _ => None,
        }
    }

    pub fn longs(&self) -> Option<&[i32]> {
        match self {
            ScalarSeq::Long(v) => Some(v),
            _ => None,
        }
    }

    pub fn llongs(&self) -> Option<&[i64]> {
        match self {
            ScalarSeq::Llong(v) => Some(v),
            _ => None,
        }
    }

    pub fn strings(&self) -> Option<&[String]> {
        match self {
            ScalarSeq::String(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Vec<f32>> for ScalarSeq {
    fn from(v: Vec<f32>) -> Self {
        ScalarSeq::Float(v)
    }
}

impl From<Vec<f64>> for ScalarSeq {
    fn from(v: Vec<f64>) -> Self {
        ScalarSeq::Double(v)
    }
}

impl From<Vec<i16>> for ScalarSeq {
    fn from(v: Vec<i16>) -> Self {
        ScalarSeq::Short(v)
    }
}

impl From<Vec<i32>> for ScalarSeq {
    fn from(v: Vec<i32>) -> Self {
        ScalarSeq::Long(v)
    }
}

impl From<Vec<i64>> for ScalarSeq {
    fn from(v: Vec<i64>) -> Self {
        ScalarSeq::Llong(v)
    }
}

impl From<Vec<String>> for ScalarSeq {
    fn from(v: Vec<String>) -> Self {
        ScalarSeq::String(v)
    }
}
