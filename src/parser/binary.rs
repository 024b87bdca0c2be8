//! Binary data-section decoder
//!
//! The binary data section is a leading row-count integer followed by one
//! field per definition in canonical order. All multi-byte values use the
//! endianness negotiated for the document. Strings are length-prefixed, not
//! null-terminated; array payloads are preceded by one extent per declared
//! dimension; column rows are interleaved, one value per column per row.

use std::io::Read;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use crate::error::{Result, SddsError};
use crate::types::{
    ArrayDef, ArrayValue, Definition, Endianness, Parameter, Scalar, ScalarSeq, SddsType, Value,
};

/// Decode the binary data section for the given (canonically ordered)
/// definitions, yielding one value per definition in the same order.
pub(crate) fn read_data_binary<R: Read>(
    definitions: &[Definition],
    reader: &mut R,
    endianness: Endianness,
) -> Result<Vec<Value>> {
    let row_count = read_count(reader, endianness, "row count")?;

    let mut values: Vec<Option<Value>> = Vec::with_capacity(definitions.len());
    let mut columns = Vec::new();
    for definition in definitions {
        match definition {
            Definition::Parameter(p) => {
                values.push(Some(Value::Scalar(read_parameter(reader, p, endianness)?)));
            }
            Definition::Array(a) => {
                values.push(Some(Value::Array(read_array(reader, a, endianness)?)));
            }
            Definition::Column(c) => {
                columns.push(c);
                values.push(None);
            }
        }
    }

    // Columns come last in canonical order; their rows are interleaved.
    let mut seqs: Vec<ScalarSeq> = columns.iter().map(|c| ScalarSeq::new(c.ty)).collect();
    for _ in 0..row_count {
        for (column, seq) in columns.iter().zip(seqs.iter_mut()) {
            let scalar = read_scalar(reader, column.ty, SddsType::Long, endianness)?;
            seq.push(scalar)?;
        }
    }

    let mut seqs = seqs.into_iter();
    values
        .into_iter()
        .map(|slot| match slot {
            Some(value) => Ok(value),
            None => seqs
                .next()
                .map(Value::Column)
                .ok_or(SddsError::UnexpectedEof("column data")),
        })
        .collect()
}

/// One parameter value. Fixed-value parameters are synthesized from the
/// header and consume no stream bytes.
fn read_parameter<R: Read>(
    reader: &mut R,
    definition: &Parameter,
    endianness: Endianness,
) -> Result<Scalar> {
    if let Some(fixed) = &definition.fixed_value {
        return definition.ty.cast(fixed);
    }
    read_scalar(reader, definition.ty, SddsType::Long, endianness)
}

/// One array value: per-axis extents, then the flattened payload
fn read_array<R: Read>(
    reader: &mut R,
    definition: &ArrayDef,
    endianness: Endianness,
) -> Result<ArrayValue> {
    let mut shape = Vec::with_capacity(definition.rank());
    for _ in 0..definition.rank() {
        shape.push(read_count(reader, endianness, "array dimensions")?);
    }
    let total = ArrayValue::element_count(&shape)?;

    let mut seq = ScalarSeq::new(definition.ty);
    for _ in 0..total {
        seq.push(read_scalar(
            reader,
            definition.ty,
            definition.str_length_type(),
            endianness,
        )?)?;
    }
    ArrayValue::new(shape, seq)
}

/// One value of `ty`. String lengths are read with `prefix_ty` (arrays can
/// narrow the prefix through their `modifier` field).
fn read_scalar<R: Read>(
    reader: &mut R,
    ty: SddsType,
    prefix_ty: SddsType,
    endianness: Endianness,
) -> Result<Scalar> {
    let eof = |e: std::io::Error| map_eof(e, "data section");
    Ok(match (ty, endianness) {
        (SddsType::Float, Endianness::Big) => {
            Scalar::Float(reader.read_f32::<BigEndian>().map_err(eof)?)
        }
        (SddsType::Float, Endianness::Little) => {
            Scalar::Float(reader.read_f32::<LittleEndian>().map_err(eof)?)
        }
        (SddsType::Double, Endianness::Big) => {
            Scalar::Double(reader.read_f64::<BigEndian>().map_err(eof)?)
        }
        (SddsType::Double, Endianness::Little) => {
            Scalar::Double(reader.read_f64::<LittleEndian>().map_err(eof)?)
        }
        (SddsType::Short, Endianness::Big) => {
            Scalar::Short(reader.read_i16::<BigEndian>().map_err(eof)?)
        }
        (SddsType::Short, Endianness::Little) => {
            Scalar::Short(reader.read_i16::<LittleEndian>().map_err(eof)?)
        }
        (SddsType::Long, Endianness::Big) => {
            Scalar::Long(reader.read_i32::<BigEndian>().map_err(eof)?)
        }
        (SddsType::Long, Endianness::Little) => {
            Scalar::Long(reader.read_i32::<LittleEndian>().map_err(eof)?)
        }
        (SddsType::Llong, Endianness::Big) => {
            Scalar::Llong(reader.read_i64::<BigEndian>().map_err(eof)?)
        }
        (SddsType::Llong, Endianness::Little) => {
            Scalar::Llong(reader.read_i64::<LittleEndian>().map_err(eof)?)
        }
        (SddsType::Char, _) => Scalar::Char(reader.read_u8().map_err(eof)? as char),
        (SddsType::Boolean, _) => Scalar::Boolean(reader.read_i8().map_err(eof)? != 0),
        (SddsType::String, _) => {
            let len = read_prefix(reader, prefix_ty, endianness)?;
            Scalar::String(read_string(reader, len)?)
        }
    })
}

/// Length prefix for a string, in the integer type the definition selects
fn read_prefix<R: Read>(
    reader: &mut R,
    prefix_ty: SddsType,
    endianness: Endianness,
) -> Result<usize> {
    let eof = |e: std::io::Error| map_eof(e, "string length");
    let len: i64 = match (prefix_ty, endianness) {
        (SddsType::Char, _) => reader.read_u8().map_err(eof)? as i64,
        (SddsType::Short, Endianness::Big) => reader.read_i16::<BigEndian>().map_err(eof)? as i64,
        (SddsType::Short, Endianness::Little) => {
            reader.read_i16::<LittleEndian>().map_err(eof)? as i64
        }
        (_, Endianness::Big) => reader.read_i32::<BigEndian>().map_err(eof)? as i64,
        (_, Endianness::Little) => reader.read_i32::<LittleEndian>().map_err(eof)? as i64,
    };
    usize::try_from(len).map_err(|_| SddsError::Cast {
        ty: "long",
        value: len.to_string(),
    })
}

fn read_string<R: Read>(reader: &mut R, len: usize) -> Result<String> {
    let mut buf = vec![0u8; len];
    reader
        .read_exact(&mut buf)
        .map_err(|e| map_eof(e, "string value"))?;
    String::from_utf8(buf).map_err(|_| SddsError::InvalidUtf8("string value"))
}

/// A non-negative `long` used as a count (row count, array extents)
fn read_count<R: Read>(
    reader: &mut R,
    endianness: Endianness,
    context: &'static str,
) -> Result<usize> {
    let raw = match endianness {
        Endianness::Big => reader.read_i32::<BigEndian>(),
        Endianness::Little => reader.read_i32::<LittleEndian>(),
    }
    .map_err(|e| map_eof(e, context))?;
    usize::try_from(raw).map_err(|_| SddsError::Cast {
        ty: "long",
        value: raw.to_string(),
    })
}

/// Distinguish a truncated stream from other I/O failures
fn map_eof(e: std::io::Error, context: &'static str) -> SddsError {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        SddsError::UnexpectedEof(context)
    } else {
        SddsError::Io(e)
    }
}
