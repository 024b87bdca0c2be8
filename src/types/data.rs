//! Header commands that are not definitions: `&description` and `&data`

use std::fmt;

use crate::error::{Result, SddsError};
use crate::types::definition::Fields;

/// `&description` command: free-text dataset description.
///
/// `text` is an informal description for humans; `contents` formally names
/// the kind of data (most often the program that wrote the file). At most
/// one per document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    pub text: Option<String>,
    pub contents: Option<String>,
}

impl Description {
    pub const TAG: &'static str = "&description";

    pub(crate) fn from_fields(mut fields: Fields) -> Result<Self> {
        let description = Self {
            text: fields.take("text"),
            contents: fields.take("contents"),
        };
        fields.finish(Self::TAG)?;
        Ok(description)
    }
}

/// Serialization mode of the data section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    Binary,
    Ascii,
}

impl DataMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DataMode::Binary => "binary",
            DataMode::Ascii => "ascii",
        }
    }
}

impl fmt::Display for DataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `&data` command: declares the data-section mode and ends the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Data {
    pub mode: DataMode,
}

impl Data {
    pub const TAG: &'static str = "&data";

    pub(crate) fn from_fields(mut fields: Fields) -> Result<Self> {
        let raw = fields
            .take("mode")
            .ok_or(SddsError::MissingKey {
                tag: Self::TAG,
                key: "mode",
            })?;
        let mode = match raw.as_str() {
            "binary" => DataMode::Binary,
            "ascii" => DataMode::Ascii,
            _ => return Err(SddsError::UnsupportedMode(raw)),
        };
        Ok(Self { mode })
    }
}

/// Byte order of the binary data section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Big,
    Little,
}

impl Endianness {
    /// Byte order of the machine running this code
    pub fn native() -> Self {
        if cfg!(target_endian = "big") {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }

    /// The `!# ...-endian` marker comment announcing this byte order
    pub fn marker(self) -> &'static str {
        match self {
            Endianness::Big => "!# big-endian",
            Endianness::Little => "!# little-endian",
        }
    }
}
