//! Binary data-section encoder
//!
//! Mirror image of the binary decoder: a leading row-count integer, then one
//! field per definition in canonical order. Everything is written big-endian;
//! the header carries the matching marker. Fixed-value parameters live in the
//! header and contribute no bytes here.

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::error::{Result, SddsError};
use crate::types::{Definition, Scalar, SddsFile, SddsType};
use crate::writer::{canonical, column_data, expect_array, expect_scalar};

pub(crate) fn write_data_binary<W: Write>(sdds_file: &SddsFile, writer: &mut W) -> Result<()> {
    let (columns, row_count) = column_data(sdds_file)?;
    write_count(writer, row_count, "row count")?;

    for (definition, value) in canonical(sdds_file) {
        match definition {
            Definition::Parameter(p) => {
                if p.fixed_value.is_some() {
                    continue;
                }
                write_scalar(writer, expect_scalar(definition, value)?, SddsType::Long)?;
            }
            Definition::Array(a) => {
                let array = expect_array(definition, value)?;
                for extent in array.shape() {
                    write_count(writer, *extent, "array dimensions")?;
                }
                for scalar in array.data().iter() {
                    write_scalar(writer, &scalar, a.str_length_type())?;
                }
            }
            // Columns are interleaved below
            Definition::Column(_) => {}
        }
    }

    for row in 0..row_count {
        for (column, seq) in &columns {
            let scalar = seq.get(row).ok_or(SddsError::ColumnLengthMismatch {
                name: column.name.clone(),
                len: seq.len(),
                expected: row_count,
            })?;
            write_scalar(writer, &scalar, SddsType::Long)?;
        }
    }
    Ok(())
}

/// One value. String lengths are written with `prefix_ty`, matching what the
/// decoder will read back for the same definition.
fn write_scalar<W: Write>(writer: &mut W, scalar: &Scalar, prefix_ty: SddsType) -> Result<()> {
    match scalar {
        Scalar::Float(v) => writer.write_f32::<BigEndian>(*v)?,
        Scalar::Double(v) => writer.write_f64::<BigEndian>(*v)?,
        Scalar::Short(v) => writer.write_i16::<BigEndian>(*v)?,
        Scalar::Long(v) => writer.write_i32::<BigEndian>(*v)?,
        Scalar::Llong(v) => writer.write_i64::<BigEndian>(*v)?,
        Scalar::Char(c) => {
            let byte = u8::try_from(*c).map_err(|_| SddsError::Cast {
                ty: "char",
                value: c.to_string(),
            })?;
            writer.write_u8(byte)?;
        }
        Scalar::Boolean(v) => writer.write_i8(*v as i8)?,
        Scalar::String(s) => {
            write_prefix(writer, s.len(), prefix_ty)?;
            writer.write_all(s.as_bytes())?;
        }
    }
    Ok(())
}

/// Length prefix for a string, in the integer type the definition selects
fn write_prefix<W: Write>(writer: &mut W, len: usize, prefix_ty: SddsType) -> Result<()> {
    let overflow = || SddsError::Cast {
        ty: prefix_ty.as_str(),
        value: len.to_string(),
    };
    match prefix_ty {
        SddsType::Char => writer.write_u8(u8::try_from(len).map_err(|_| overflow())?)?,
        SddsType::Short => {
            writer.write_i16::<BigEndian>(i16::try_from(len).map_err(|_| overflow())?)?
        }
        _ => writer.write_i32::<BigEndian>(i32::try_from(len).map_err(|_| overflow())?)?,
    }
    Ok(())
}

/// A non-negative `long` used as a count (row count, array extents)
fn write_count<W: Write>(writer: &mut W, count: usize, context: &'static str) -> Result<()> {
    let raw = i32::try_from(count).map_err(|_| SddsError::Cast {
        ty: "long",
        value: format!("{count} ({context})"),
    })?;
    writer.write_i32::<BigEndian>(raw)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArrayDef, ArrayValue, ColumnDef, Parameter, ScalarSeq, Value};

    fn encode(sdds_file: &SddsFile) -> Vec<u8> {
        let mut buf = Vec::new();
        write_data_binary(sdds_file, &mut buf).unwrap();
        buf
    }

    #[test]
    fn parameter_bytes_big_endian() {
        let sdds_file = SddsFile::new(
            None,
            vec![Definition::Parameter(Parameter::new("p", SddsType::Double))],
            vec![Value::Scalar(Scalar::Double(2.5))],
        )
        .unwrap();
        let mut expected = 0i32.to_be_bytes().to_vec();
        expected.extend_from_slice(&2.5f64.to_be_bytes());
        assert_eq!(encode(&sdds_file), expected);
    }

    #[test]
    fn fixed_value_parameter_writes_no_bytes() {
        let mut fixed = Parameter::new("fixed", SddsType::Long);
        fixed.fixed_value = Some("42".to_string());
        let sdds_file = SddsFile::new(
            None,
            vec![
                Definition::Parameter(fixed),
                Definition::Parameter(Parameter::new("free", SddsType::Long)),
            ],
            vec![Value::Scalar(Scalar::Long(42)), Value::Scalar(Scalar::Long(7))],
        )
        .unwrap();
        let mut expected = 0i32.to_be_bytes().to_vec();
        expected.extend_from_slice(&7i32.to_be_bytes());
        assert_eq!(encode(&sdds_file), expected);
    }

    #[test]
    fn array_extents_precede_payload() {
        let mut def = ArrayDef::new("m", SddsType::Long);
        def.dimensions = Some(2);
        let sdds_file = SddsFile::new(
            None,
            vec![Definition::Array(def)],
            vec![Value::Array(
                ArrayValue::new(vec![2, 3], ScalarSeq::Long(vec![1, 2, 3, 4, 5, 6])).unwrap(),
            )],
        )
        .unwrap();
        let expected: Vec<u8> = [0i32, 2, 3, 1, 2, 3, 4, 5, 6]
            .iter()
            .flat_map(|v| v.to_be_bytes())
            .collect();
        assert_eq!(encode(&sdds_file), expected);
    }

    #[test]
    fn string_array_uses_modifier_prefix() {
        let mut def = ArrayDef::new("names", SddsType::String);
        def.modifier = Some("u1".to_string());
        let sdds_file = SddsFile::new(
            None,
            vec![Definition::Array(def)],
            vec![Value::Array(
                ArrayValue::new(
                    vec![2],
                    ScalarSeq::String(vec!["ab".to_string(), "c".to_string()]),
                )
                .unwrap(),
            )],
        )
        .unwrap();
        let mut expected: Vec<u8> = [0i32, 2].iter().flat_map(|v| v.to_be_bytes()).collect();
        expected.push(2);
        expected.extend_from_slice(b"ab");
        expected.push(1);
        expected.extend_from_slice(b"c");
        assert_eq!(encode(&sdds_file), expected);
    }

    #[test]
    fn columns_written_row_interleaved() {
        let sdds_file = SddsFile::new(
            None,
            vec![
                Definition::Column(ColumnDef::new("a", SddsType::Long)),
                Definition::Column(ColumnDef::new("b", SddsType::Long)),
            ],
            vec![
                Value::Column(ScalarSeq::Long(vec![1, 2])),
                Value::Column(ScalarSeq::Long(vec![10, 20])),
            ],
        )
        .unwrap();
        let expected: Vec<u8> = [2i32, 1, 10, 2, 20]
            .iter()
            .flat_map(|v| v.to_be_bytes())
            .collect();
        assert_eq!(encode(&sdds_file), expected);
    }

    #[test]
    fn non_latin1_char_rejected() {
        let sdds_file = SddsFile::new(
            None,
            vec![Definition::Parameter(Parameter::new("c", SddsType::Char))],
            vec![Value::Scalar(Scalar::Char('\u{1F600}'))],
        )
        .unwrap();
        let mut buf = Vec::new();
        let err = write_data_binary(&sdds_file, &mut buf).unwrap_err();
        assert!(matches!(err, SddsError::Cast { ty: "char", .. }));
    }
}
