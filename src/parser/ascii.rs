//! ASCII data-section decoder
//!
//! The ASCII data section is plain text: one line per parameter, an extents
//! line plus whitespace-separated elements (possibly wrapped over several
//! lines) per array, and a row-count line plus row lines for columns.
//! Comment lines starting with `!` are dropped before anything is consumed.
//!
//! Bytes are decoded one-to-one to characters, so stray non-ASCII bytes
//! never abort a read. The flip side is that multi-byte UTF-8 text comes
//! back as one character per byte: ASCII mode is only transparent for
//! content in the single-byte Latin-1 range. Binary mode strings are
//! length-prefixed UTF-8 and have no such limit.

use std::io::Read;

use crate::error::{Result, SddsError};
use crate::types::{
    ArrayDef, ArrayValue, Definition, Parameter, Scalar, ScalarSeq, SddsType, Value,
};

/// Decode the ASCII data section for the given (canonically ordered)
/// definitions, yielding one value per definition in the same order.
pub(crate) fn read_data_ascii<R: Read>(
    definitions: &[Definition],
    reader: &mut R,
) -> Result<Vec<Value>> {
    let mut lines = Lines::from_reader(reader)?;

    let mut values: Vec<Option<Value>> = Vec::with_capacity(definitions.len());
    let mut columns = Vec::new();
    for definition in definitions {
        match definition {
            Definition::Parameter(p) => {
                values.push(Some(Value::Scalar(read_parameter(&mut lines, p)?)));
            }
            Definition::Array(a) => {
                values.push(Some(Value::Array(read_array(&mut lines, a)?)));
            }
            Definition::Column(c) => {
                columns.push(c);
                values.push(None);
            }
        }
    }

    let mut seqs = read_columns(&mut lines, &columns)?.into_iter();
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

/// Positional cursor over the comment-filtered data lines
struct Lines {
    lines: Vec<String>,
    next: usize,
}

impl Lines {
    /// Slurp the remaining stream. Bytes are decoded one-to-one to
    /// characters, so stray non-ASCII bytes cannot abort the read.
    fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        let text: String = raw.iter().map(|&b| b as char).collect();
        let lines = text
            .split('\n')
            .filter(|line| !line.starts_with('!'))
            .map(String::from)
            .collect();
        Ok(Self { lines, next: 0 })
    }

    fn next_line(&mut self, context: &'static str) -> Result<&str> {
        let line = self
            .lines
            .get(self.next)
            .ok_or(SddsError::UnexpectedEof(context))?;
        self.next += 1;
        Ok(line)
    }

    /// Gather exactly `total` whitespace-separated tokens, consuming as many
    /// lines as it takes (writers may wrap long payloads).
    fn take_tokens(&mut self, total: usize, context: &'static str) -> Result<Vec<String>> {
        let mut tokens = Vec::with_capacity(total);
        while tokens.len() < total {
            let line = self.next_line(context)?;
            tokens.extend(line.split_whitespace().map(String::from));
        }
        if tokens.len() != total {
            return Err(SddsError::ShapeMismatch {
                shape: vec![total],
                len: tokens.len(),
            });
        }
        Ok(tokens)
    }
}

/// One parameter: one whole line, or no line at all for fixed values
fn read_parameter(lines: &mut Lines, definition: &Parameter) -> Result<Scalar> {
    if let Some(fixed) = &definition.fixed_value {
        return definition.ty.cast(fixed);
    }
    let line = lines.next_line("parameter value")?;
    definition.ty.cast(line)
}

/// One array: an extents line, then product-of-extents elements
fn read_array(lines: &mut Lines, definition: &ArrayDef) -> Result<ArrayValue> {
    let shape: Vec<usize> = lines
        .next_line("array dimensions")?
        .split_whitespace()
        .map(|token| {
            token.parse().map_err(|_| SddsError::Cast {
                ty: "long",
                value: token.to_string(),
            })
        })
        .collect::<Result<_>>()?;
    let total = ArrayValue::element_count(&shape)?;

    let tokens = lines.take_tokens(total, "array data")?;
    let seq = ScalarSeq::cast_tokens(definition.ty, &tokens)?;
    ArrayValue::new(shape, seq)
}

/// All columns of the page: a row-count line, then one value per column per
/// row in canonical column order
fn read_columns(
    lines: &mut Lines,
    columns: &[&crate::types::ColumnDef],
) -> Result<Vec<ScalarSeq>> {
    let mut seqs: Vec<ScalarSeq> = columns.iter().map(|c| ScalarSeq::new(c.ty)).collect();
    if columns.is_empty() {
        return Ok(seqs);
    }

    let row_line = lines.next_line("row count")?;
    let row_count: usize = SddsType::Long
        .cast(row_line)?
        .as_i64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or(SddsError::Cast {
            ty: "long",
            value: row_line.to_string(),
        })?;

    let tokens = lines.take_tokens(row_count * columns.len(), "column data")?;
    for chunk in tokens.chunks(columns.len()) {
        for ((column, seq), token) in columns.iter().zip(seqs.iter_mut()).zip(chunk) {
            seq.push(column.ty.cast(token)?)?;
        }
    }
    Ok(seqs)
}
