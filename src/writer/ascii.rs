//! ASCII data-section encoder
//!
//! One line per non-fixed parameter, an extents line plus one payload line
//! per array, and a row-count line plus one line per row for columns. Floats
//! are printed in scientific notation with enough digits to read back the
//! exact same value.
//!
//! The grammar limits what ASCII mode can carry: parameter strings own a
//! whole line (embedded spaces are fine, embedded newlines are not), while
//! array and column strings are bare whitespace-delimited tokens, so empty
//! strings or strings containing whitespace have no representation there.
//! Values outside these limits are rejected instead of written, since the
//! decoder would reassemble something else. Content is emitted as UTF-8 but
//! read back byte-per-character, so round trips are only transparent for
//! single-byte (Latin-1 range) text; binary mode has no such limits.

use std::io::Write;

use crate::error::{Result, SddsError};
use crate::types::{Definition, Scalar, SddsFile};
use crate::writer::{canonical, column_data, expect_array, expect_scalar};

pub(crate) fn write_data_ascii<W: Write>(sdds_file: &SddsFile, writer: &mut W) -> Result<()> {
    for (definition, value) in canonical(sdds_file) {
        match definition {
            Definition::Parameter(p) => {
                if p.fixed_value.is_some() {
                    continue;
                }
                let scalar = expect_scalar(definition, value)?;
                writeln!(writer, "{}", line_value(&p.name, scalar)?)?;
            }
            Definition::Array(a) => {
                let array = expect_array(definition, value)?;
                writeln!(writer, "{}", join_extents(array.shape()))?;
                // An empty array is just its extents line; readers gather
                // zero tokens and would leave a blank payload line behind.
                if array.num_elements() > 0 {
                    let tokens = array
                        .data()
                        .iter()
                        .map(|scalar| token_value(&a.name, &scalar))
                        .collect::<Result<Vec<_>>>()?;
                    writeln!(writer, "{}", tokens.join(" "))?;
                }
            }
            Definition::Column(_) => {}
        }
    }

    let (columns, row_count) = column_data(sdds_file)?;
    if !columns.is_empty() {
        writeln!(writer, "{row_count}")?;
        for row in 0..row_count {
            let mut cells = Vec::with_capacity(columns.len());
            for (column, seq) in &columns {
                if let Some(scalar) = seq.get(row) {
                    cells.push(token_value(&column.name, &scalar)?);
                }
            }
            writeln!(writer, "{}", cells.join(" "))?;
        }
    }
    Ok(())
}

fn join_extents(shape: &[usize]) -> String {
    shape
        .iter()
        .map(|extent| extent.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A value that occupies one whole line (parameters). Strings may contain
/// spaces but not newlines; the decoder trims char lines before casting.
fn line_value(name: &str, scalar: &Scalar) -> Result<String> {
    let representable = match scalar {
        Scalar::String(s) => !s.contains('\n'),
        Scalar::Char(c) => !c.is_whitespace(),
        _ => true,
    };
    if !representable {
        return Err(unrepresentable(name, scalar));
    }
    Ok(format_scalar(scalar))
}

/// A value that becomes one whitespace-delimited token (array and column
/// elements). Empty or whitespace-bearing strings would split or vanish.
fn token_value(name: &str, scalar: &Scalar) -> Result<String> {
    let representable = match scalar {
        Scalar::String(s) => !s.is_empty() && !s.contains(char::is_whitespace),
        Scalar::Char(c) => !c.is_whitespace(),
        _ => true,
    };
    if !representable {
        return Err(unrepresentable(name, scalar));
    }
    Ok(format_scalar(scalar))
}

fn unrepresentable(name: &str, scalar: &Scalar) -> SddsError {
    SddsError::AsciiUnrepresentable {
        name: name.to_string(),
        value: format_scalar(scalar),
    }
}

/// Text form of one value.
///
/// The `{:e}` float form is the shortest representation that parses back to
/// the identical bits, so ASCII round trips are lossless.
fn format_scalar(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Float(v) => format!("{v:e}"),
        Scalar::Double(v) => format!("{v:e}"),
        Scalar::Short(v) => v.to_string(),
        Scalar::Long(v) => v.to_string(),
        Scalar::Llong(v) => v.to_string(),
        Scalar::Char(c) => c.to_string(),
        Scalar::Boolean(v) => if *v { "1" } else { "0" }.to_string(),
        Scalar::String(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ArrayDef, ArrayValue, ColumnDef, Parameter, ScalarSeq, SddsType, Value,
    };

    fn encode(sdds_file: &SddsFile) -> String {
        let mut buf = Vec::new();
        write_data_ascii(sdds_file, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn encode_err(sdds_file: &SddsFile) -> SddsError {
        let mut buf = Vec::new();
        write_data_ascii(sdds_file, &mut buf).unwrap_err()
    }

    #[test]
    fn parameter_per_line() {
        let sdds_file = SddsFile::new(
            None,
            vec![
                Definition::Parameter(Parameter::new("n", SddsType::Long)),
                Definition::Parameter(Parameter::new("s", SddsType::String)),
            ],
            vec![
                Value::Scalar(Scalar::Long(7)),
                Value::Scalar(Scalar::String("hello world".to_string())),
            ],
        )
        .unwrap();
        assert_eq!(encode(&sdds_file), "7\nhello world\n");
    }

    #[test]
    fn fixed_value_parameter_writes_no_line() {
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
        assert_eq!(encode(&sdds_file), "7\n");
    }

    #[test]
    fn array_extents_then_payload() {
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
        assert_eq!(encode(&sdds_file), "2 3\n1 2 3 4 5 6\n");
    }

    #[test]
    fn empty_array_is_just_the_extents_line() {
        let def = ArrayDef::new("empty", SddsType::Double);
        let sdds_file = SddsFile::new(
            None,
            vec![Definition::Array(def)],
            vec![Value::Array(
                ArrayValue::new(vec![0], ScalarSeq::Double(vec![])).unwrap(),
            )],
        )
        .unwrap();
        assert_eq!(encode(&sdds_file), "0\n");
    }

    #[test]
    fn columns_one_row_per_line() {
        let sdds_file = SddsFile::new(
            None,
            vec![
                Definition::Column(ColumnDef::new("a", SddsType::Long)),
                Definition::Column(ColumnDef::new("b", SddsType::Boolean)),
            ],
            vec![
                Value::Column(ScalarSeq::Long(vec![1, 2])),
                Value::Column(ScalarSeq::Boolean(vec![true, false])),
            ],
        )
        .unwrap();
        assert_eq!(encode(&sdds_file), "2\n1 1\n2 0\n");
    }

    #[test]
    fn string_array_element_with_space_rejected() {
        let sdds_file = SddsFile::new(
            None,
            vec![Definition::Array(ArrayDef::new("names", SddsType::String))],
            vec![Value::Array(
                ArrayValue::new(
                    vec![2],
                    ScalarSeq::String(vec!["a b".to_string(), "".to_string()]),
                )
                .unwrap(),
            )],
        )
        .unwrap();
        assert!(matches!(
            encode_err(&sdds_file),
            SddsError::AsciiUnrepresentable { name, value } if name == "names" && value == "a b"
        ));
    }

    #[test]
    fn empty_string_column_cell_rejected() {
        let sdds_file = SddsFile::new(
            None,
            vec![Definition::Column(ColumnDef::new("label", SddsType::String))],
            vec![Value::Column(ScalarSeq::String(vec![
                "ok".to_string(),
                "".to_string(),
            ]))],
        )
        .unwrap();
        assert!(matches!(
            encode_err(&sdds_file),
            SddsError::AsciiUnrepresentable { name, .. } if name == "label"
        ));
    }

    #[test]
    fn whitespace_char_parameter_rejected() {
        let sdds_file = SddsFile::new(
            None,
            vec![Definition::Parameter(Parameter::new("sep", SddsType::Char))],
            vec![Value::Scalar(Scalar::Char(' '))],
        )
        .unwrap();
        assert!(matches!(
            encode_err(&sdds_file),
            SddsError::AsciiUnrepresentable { name, .. } if name == "sep"
        ));
    }

    #[test]
    fn multiline_string_parameter_rejected() {
        let sdds_file = SddsFile::new(
            None,
            vec![Definition::Parameter(Parameter::new("note", SddsType::String))],
            vec![Value::Scalar(Scalar::String("line one\nline two".to_string()))],
        )
        .unwrap();
        assert!(matches!(
            encode_err(&sdds_file),
            SddsError::AsciiUnrepresentable { name, .. } if name == "note"
        ));
    }

    #[test]
    fn string_parameter_with_spaces_still_allowed() {
        let sdds_file = SddsFile::new(
            None,
            vec![Definition::Parameter(Parameter::new("note", SddsType::String))],
            vec![Value::Scalar(Scalar::String("beam 2 vertical".to_string()))],
        )
        .unwrap();
        assert_eq!(encode(&sdds_file), "beam 2 vertical\n");
    }

    #[test]
    fn floats_round_trip_through_text() {
        for original in [0.1f64, 1.0 / 3.0, 1e-300, -2.5e17] {
            let text = format_scalar(&Scalar::Double(original));
            assert_eq!(text.parse::<f64>().unwrap(), original);
        }
    }
}
