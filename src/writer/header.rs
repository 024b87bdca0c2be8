//! Header serialization, the inverse of the command assembler
//!
//! Emits the version line, the endianness marker for binary files, one
//! `key=value, ... &end` line per command, and the closing `&data` line.
//! Optional fields that are unset are simply left out.

use std::io::Write;

use crate::error::Result;
use crate::types::{
    ArrayDef, ColumnDef, Data, DataMode, Definition, Description, Endianness, Parameter, SddsFile,
    VERSION,
};

/// Write the complete header for `sdds_file` in the given mode.
///
/// Binary headers carry the `!# big-endian` marker so readers never have to
/// guess the byte order of files written by this crate.
pub(crate) fn write_header<W: Write>(
    sdds_file: &SddsFile,
    mode: DataMode,
    writer: &mut W,
) -> Result<()> {
    writeln!(writer, "{VERSION}")?;
    if mode == DataMode::Binary {
        writeln!(writer, "{}", Endianness::Big.marker())?;
    }
    if let Some(description) = sdds_file.description() {
        writeln!(writer, "{}", description_line(description))?;
    }
    for definition in sdds_file.definitions() {
        writeln!(writer, "{}", definition_line(definition))?;
    }
    writeln!(writer, "{} mode={}, &end", Data::TAG, mode)?;
    Ok(())
}

fn command_line(tag: &str, pairs: Vec<(&str, Option<String>)>) -> String {
    let body: Vec<String> = pairs
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| format!("{key}={v}")))
        .collect();
    if body.is_empty() {
        format!("{tag} &end")
    } else {
        format!("{} {}, &end", tag, body.join(", "))
    }
}

fn description_line(description: &Description) -> String {
    command_line(
        Description::TAG,
        vec![
            ("text", description.text.clone()),
            ("contents", description.contents.clone()),
        ],
    )
}

fn definition_line(definition: &Definition) -> String {
    match definition {
        Definition::Parameter(d) => parameter_line(d),
        Definition::Array(d) => array_line(d),
        Definition::Column(d) => column_line(d),
    }
}

fn parameter_line(d: &Parameter) -> String {
    command_line(
        Parameter::TAG,
        vec![
            ("name", Some(d.name.clone())),
            ("type", Some(d.ty.to_string())),
            ("symbol", d.symbol.clone()),
            ("units", d.units.clone()),
            ("description", d.description.clone()),
            ("format", d.format.clone()),
            ("fixed_value", d.fixed_value.clone()),
        ],
    )
}

fn array_line(d: &ArrayDef) -> String {
    command_line(
        ArrayDef::TAG,
        vec![
            ("name", Some(d.name.clone())),
            ("type", Some(d.ty.to_string())),
            ("symbol", d.symbol.clone()),
            ("units", d.units.clone()),
            ("description", d.description.clone()),
            ("format", d.format.clone()),
            ("field_length", d.field_length.map(|v| v.to_string())),
            ("group_name", d.group_name.clone()),
            ("dimensions", d.dimensions.map(|v| v.to_string())),
            ("modifier", d.modifier.clone()),
        ],
    )
}

fn column_line(d: &ColumnDef) -> String {
    command_line(
        ColumnDef::TAG,
        vec![
            ("name", Some(d.name.clone())),
            ("type", Some(d.ty.to_string())),
            ("symbol", d.symbol.clone()),
            ("units", d.units.clone()),
            ("description", d.description.clone()),
            ("format", d.format.clone()),
        ],
    )
}
