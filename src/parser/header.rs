//! Header command assembly
//!
//! Consumes the token stream produced by the tokenizer and rebuilds the
//! typed header commands: version check, `key=value` recovery up to each
//! `&end` terminator, exhaustive dispatch on the command tag, and the
//! canonical parameter/array/column reordering of the definitions.

use std::io::BufRead;

use crate::error::{Result, SddsError};
use crate::parser::tokenizer::Tokens;
use crate::types::{
    ArrayDef, ColumnDef, Data, Definition, Description, Fields, Parameter, SddsType, VERSION,
};

/// Parse the header: version token, commands up to `&data`, reordering.
///
/// Returns the definitions in canonical order, the optional description and
/// the `&data` declaration that selects the data codec.
pub(crate) fn read_header<R: BufRead>(
    tokens: &mut Tokens<R>,
) -> Result<(Vec<Definition>, Option<Description>, Data)> {
    let version = tokens.expect_token("version token")?;
    if version != VERSION {
        return Err(SddsError::BadVersion(version));
    }

    let mut definitions: Vec<Definition> = Vec::new();
    let mut description: Option<Description> = None;
    let mut data: Option<Data> = None;

    while let Some(tag) = tokens.next_token()? {
        let fields = Fields::new(collect_assignments(tokens)?);
        match tag.as_str() {
            Parameter::TAG => {
                let (name, ty, fields) = mandatory_keys(Parameter::TAG, fields)?;
                definitions.push(Parameter::from_fields(name, ty, fields)?.into());
            }
            ArrayDef::TAG => {
                let (name, ty, fields) = mandatory_keys(ArrayDef::TAG, fields)?;
                definitions.push(ArrayDef::from_fields(name, ty, fields)?.into());
            }
            ColumnDef::TAG => {
                let (name, ty, fields) = mandatory_keys(ColumnDef::TAG, fields)?;
                definitions.push(ColumnDef::from_fields(name, ty, fields)?.into());
            }
            Description::TAG => {
                if description.is_some() {
                    return Err(SddsError::DuplicateDescription);
                }
                description = Some(Description::from_fields(fields)?);
            }
            "&include" => return Err(SddsError::IncludeUnsupported),
            Data::TAG => {
                data = Some(Data::from_fields(fields)?);
                break;
            }
            _ => return Err(SddsError::UnknownTag(tag)),
        }
    }

    let data = data.ok_or(SddsError::MissingDataCommand)?;
    Ok((sort_definitions(definitions), description, data))
}

/// Collect the words of one command up to the `&end` terminator and recover
/// the `key=value` assignments.
///
/// Commands may be wrapped over several physical lines, so the words are
/// re-joined with spaces before splitting on commas.
fn collect_assignments<R: BufRead>(tokens: &mut Tokens<R>) -> Result<Vec<(String, String)>> {
    let mut words: Vec<String> = Vec::new();
    loop {
        match tokens.next_token()? {
            None => return Err(SddsError::UnterminatedCommand),
            Some(word) if word == "&end" => break,
            Some(word) => words.push(word),
        }
    }

    let recomposed = words.join(" ");
    let mut pairs = Vec::new();
    for assignment in recomposed.split(',') {
        let assignment = assignment.trim();
        if assignment.is_empty() {
            continue;
        }
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| SddsError::MalformedAssignment(assignment.to_string()))?;
        pairs.push((key.trim().to_string(), value.trim().to_string()));
    }
    Ok(pairs)
}

/// Pull the mandatory `name` and `type` keys out of a definition command
fn mandatory_keys(
    tag: &'static str,
    mut fields: Fields,
) -> Result<(String, SddsType, Fields)> {
    let name = fields
        .take("name")
        .ok_or(SddsError::MissingKey { tag, key: "name" })?;
    let ty: SddsType = fields
        .take("type")
        .ok_or(SddsError::MissingKey { tag, key: "type" })?
        .parse()?;
    Ok((name, ty, fields))
}

/// Reorder definitions into the canonical parameter, array, column grouping.
///
/// Data pages store parameters first, then arrays, then columns; within each
/// group the header declaration order is preserved. The decoders and
/// encoders both rely on this order.
pub(crate) fn sort_definitions(original: Vec<Definition>) -> Vec<Definition> {
    let mut sorted = Vec::with_capacity(original.len());
    sorted.extend(
        original
            .iter()
            .filter(|d| matches!(d, Definition::Parameter(_)))
            .cloned(),
    );
    sorted.extend(
        original
            .iter()
            .filter(|d| matches!(d, Definition::Array(_)))
            .cloned(),
    );
    sorted.extend(
        original
            .into_iter()
            .filter(|d| matches!(d, Definition::Column(_))),
    );
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataMode;
    use std::io::Cursor;

    fn tokens(input: &[u8]) -> Tokens<Cursor<&[u8]>> {
        Tokens::new(Cursor::new(input))
    }

    #[test]
    fn header_with_wrapped_command() {
        let head = b"
        SDDS1
        !# big-endian
        &parameter name=acqStamp, type=double, &end
        &parameter name=nbOfCapTurns, type=long, &end
        &array name=horPositionsConcentratedAndSorted, type=float, &end
        &array
            name=verBunchId,
            type=long,
            field_length=3,
        &end
        &data mode=binary, &end
        ";
        let mut tokens = tokens(head);
        let (definitions, description, data) = read_header(&mut tokens).unwrap();
        assert_eq!(data.mode, DataMode::Binary);
        assert!(description.is_none());
        assert_eq!(definitions.len(), 4);

        let expected = [
            ("acqStamp", SddsType::Double),
            ("nbOfCapTurns", SddsType::Long),
            ("horPositionsConcentratedAndSorted", SddsType::Float),
            ("verBunchId", SddsType::Long),
        ];
        for (definition, (name, ty)) in definitions.iter().zip(expected) {
            assert_eq!(definition.name(), name);
            assert_eq!(definition.sdds_type(), ty);
        }
        let bunch = definitions[3].as_array().unwrap();
        assert_eq!(bunch.field_length, Some(3));
    }

    #[test]
    fn header_with_description_and_optionals() {
        let head = b"SDDS1
!# little-endian
&description text=\"Momentum aperture search\", contents=\"momentum aperture\", &end
&parameter name=Step, type=long, &end
&column name=s, type=double, units=m, &end
&column name=deltaPositive, type=double, symbol=\"$gd$R$bpos$n\", &end
&data mode=binary, &end
";
        let mut tokens = tokens(head);
        let (definitions, description, _) = read_header(&mut tokens).unwrap();
        let description = description.unwrap();
        assert_eq!(
            description.text.as_deref(),
            Some("\"Momentum aperture search\"")
        );
        assert_eq!(
            description.contents.as_deref(),
            Some("\"momentum aperture\"")
        );

        let s = definitions[1].as_column().unwrap();
        assert_eq!(s.units.as_deref(), Some("m"));
        let delta = definitions[2].as_column().unwrap();
        assert_eq!(delta.symbol.as_deref(), Some("\"$gd$R$bpos$n\""));
    }

    #[test]
    fn assignments_recovered_across_lines() {
        let mut tokens = tokens(b"test1=value1,  test2= value2, \ntest3=value3, &end");
        let pairs = collect_assignments(&mut tokens).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("test1".to_string(), "value1".to_string()),
                ("test2".to_string(), "value2".to_string()),
                ("test3".to_string(), "value3".to_string()),
            ]
        );
    }

    #[test]
    fn missing_end_is_unterminated() {
        let mut tokens = tokens(b"name=x, type=long,");
        assert!(matches!(
            collect_assignments(&mut tokens),
            Err(SddsError::UnterminatedCommand)
        ));
    }

    #[test]
    fn bad_version_token() {
        let mut tokens = tokens(b"SDDS2\n&data mode=binary, &end\n");
        assert!(matches!(
            read_header(&mut tokens),
            Err(SddsError::BadVersion(v)) if v == "SDDS2"
        ));
    }

    #[test]
    fn unknown_tag_fails() {
        let mut tokens = tokens(b"SDDS1\n&bogus name=x, &end\n&data mode=binary, &end\n");
        assert!(matches!(
            read_header(&mut tokens),
            Err(SddsError::UnknownTag(tag)) if tag == "&bogus"
        ));
    }

    #[test]
    fn include_is_unsupported() {
        let mut tokens = tokens(b"SDDS1\n&include filename=other.sdds, &end\n");
        assert!(matches!(
            read_header(&mut tokens),
            Err(SddsError::IncludeUnsupported)
        ));
    }

    #[test]
    fn duplicate_description_fails() {
        let mut tokens = tokens(
            b"SDDS1\n&description text=one, &end\n&description text=two, &end\n&data mode=ascii, &end\n",
        );
        assert!(matches!(
            read_header(&mut tokens),
            Err(SddsError::DuplicateDescription)
        ));
    }

    #[test]
    fn missing_data_tag_fails() {
        let mut tokens = tokens(b"SDDS1\n&parameter name=p, type=long, &end\n");
        assert!(matches!(
            read_header(&mut tokens),
            Err(SddsError::MissingDataCommand)
        ));
    }

    #[test]
    fn definitions_sorted_canonically() {
        let param1: Definition = Parameter::new("param1", SddsType::Long).into();
        let param2: Definition = Parameter::new("param2", SddsType::Long).into();
        let array1: Definition = ArrayDef::new("array1", SddsType::Long).into();
        let array2: Definition = ArrayDef::new("array2", SddsType::Long).into();
        let col1: Definition = ColumnDef::new("col1", SddsType::Long).into();
        let col2: Definition = ColumnDef::new("col2", SddsType::Long).into();

        let unsorted = vec![
            array1.clone(),
            col1.clone(),
            param1.clone(),
            param2.clone(),
            array2.clone(),
            col2.clone(),
        ];
        let sorted = sort_definitions(unsorted);
        assert_eq!(sorted, vec![param1, param2, array1, array2, col1, col2]);
    }
}
