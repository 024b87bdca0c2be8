//! Writing SDDS files
//!
//! A write serializes the header (the inverse of the command assembler) and
//! then the data section in the requested mode. Binary output is always
//! big-endian, independent of the host, and announces itself with the
//! `!# big-endian` header comment. The input document is never mutated.

mod ascii;
mod binary;
mod header;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, SddsError};
use crate::types::{
    ArrayDef, ArrayValue, ColumnDef, DataMode, Definition, Scalar, ScalarSeq, SddsFile, Value,
};

/// Write `sdds_file` to `path` in binary mode (the default, as the original
/// toolkit writes).
pub fn write_sdds(sdds_file: &SddsFile, path: impl AsRef<Path>) -> Result<()> {
    write_sdds_with_mode(sdds_file, path, DataMode::Binary)
}

/// Write `sdds_file` to `path` in the given mode
pub fn write_sdds_with_mode(
    sdds_file: &SddsFile,
    path: impl AsRef<Path>,
    mode: DataMode,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    to_writer(sdds_file, &mut writer, mode)?;
    writer.flush()?;
    Ok(())
}

/// Write `sdds_file` to any byte sink
pub fn to_writer<W: Write>(sdds_file: &SddsFile, writer: &mut W, mode: DataMode) -> Result<()> {
    header::write_header(sdds_file, mode, writer)?;
    match mode {
        DataMode::Binary => binary::write_data_binary(sdds_file, writer),
        DataMode::Ascii => ascii::write_data_ascii(sdds_file, writer),
    }
}

/// Serialize `sdds_file` to an in-memory buffer
pub fn to_bytes(sdds_file: &SddsFile, mode: DataMode) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    to_writer(sdds_file, &mut buf, mode)?;
    Ok(buf)
}

/// Pairs in canonical data-section order: parameters, then arrays, then
/// columns, declaration order within each group.
///
/// Documents built by [`crate::read_sdds`] are already canonical; hand-built
/// ones may not be, and the data section must follow this order either way.
pub(crate) fn canonical(sdds_file: &SddsFile) -> Vec<(&Definition, &Value)> {
    let mut pairs: Vec<(&Definition, &Value)> = Vec::with_capacity(sdds_file.len());
    pairs.extend(
        sdds_file
            .iter()
            .filter(|(d, _)| matches!(d, Definition::Parameter(_))),
    );
    pairs.extend(
        sdds_file
            .iter()
            .filter(|(d, _)| matches!(d, Definition::Array(_))),
    );
    pairs.extend(
        sdds_file
            .iter()
            .filter(|(d, _)| matches!(d, Definition::Column(_))),
    );
    pairs
}

pub(crate) fn expect_scalar<'a>(definition: &Definition, value: &'a Value) -> Result<&'a Scalar> {
    match value.as_scalar() {
        Some(scalar) if scalar.sdds_type() == definition.sdds_type() => Ok(scalar),
        _ => Err(SddsError::ValueKindMismatch {
            name: definition.name().to_string(),
            expected: definition.sdds_type().as_str(),
        }),
    }
}

/// Checks the element type and also the rank: a value whose rank disagrees
/// with the definition's `dimensions` would serialize to a file no reader
/// could decode.
pub(crate) fn expect_array<'a>(
    definition: &Definition,
    value: &'a Value,
) -> Result<&'a ArrayValue> {
    let array = match value.as_array() {
        Some(array) if array.sdds_type() == definition.sdds_type() => array,
        _ => {
            return Err(SddsError::ValueKindMismatch {
                name: definition.name().to_string(),
                expected: definition.sdds_type().as_str(),
            })
        }
    };
    let declared = definition.as_array().map_or(1, ArrayDef::rank);
    if array.rank() != declared {
        return Err(SddsError::RankMismatch {
            name: definition.name().to_string(),
            rank: array.rank(),
            declared,
        });
    }
    Ok(array)
}

/// Gather the column pairs and the shared row count, enforcing that every
/// column of the page has the same length.
pub(crate) fn column_data<'a>(
    sdds_file: &'a SddsFile,
) -> Result<(Vec<(&'a ColumnDef, &'a ScalarSeq)>, usize)> {
    let mut columns = Vec::new();
    for (definition, value) in sdds_file.iter() {
        let Definition::Column(column) = definition else {
            continue;
        };
        let seq = match value.as_column() {
            Some(seq) if seq.sdds_type() == column.ty => seq,
            _ => {
                return Err(SddsError::ValueKindMismatch {
                    name: column.name.clone(),
                    expected: column.ty.as_str(),
                })
            }
        };
        columns.push((column, seq));
    }

    let row_count = columns.first().map_or(0, |(_, seq)| seq.len());
    for (column, seq) in &columns {
        if seq.len() != row_count {
            return Err(SddsError::ColumnLengthMismatch {
                name: column.name.clone(),
                len: seq.len(),
                expected: row_count,
            });
        }
    }
    Ok((columns, row_count))
}
