//! Entity definitions declared by SDDS headers
//!
//! A header declares named, typed entities with `&parameter`, `&array` and
//! `&column` commands. The three variants share the descriptive metadata
//! fields (symbol, units, description, format - display-only, never
//! interpreted by the codecs) and add their own extras.

use std::collections::HashMap;

use crate::error::{Result, SddsError};
use crate::types::SddsType;

/// Residual `key=value` pairs of one header command, consumed field by field.
///
/// Header values arrive as raw text; each definition constructor pulls its
/// known keys out and parses them to their native type. The literal value
/// `None` counts as absent (some writers emit it for unset optional fields).
/// Keys nobody claims make the whole command fail.
#[derive(Debug, Default)]
pub(crate) struct Fields {
    map: HashMap<String, String>,
}

impl Fields {
    pub(crate) fn new(pairs: Vec<(String, String)>) -> Self {
        Self {
            map: pairs.into_iter().collect(),
        }
    }

    pub(crate) fn take(&mut self, key: &str) -> Option<String> {
        let value = self.map.remove(key)?;
        if value == "None" {
            log::debug!("'None' found in {key}, treating as absent");
            return None;
        }
        Some(value)
    }

    fn take_usize(&mut self, key: &str, ty: &'static str) -> Result<Option<usize>> {
        match self.take(key) {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| SddsError::Cast { ty, value: raw }),
        }
    }

    fn take_i64(&mut self, key: &str, ty: &'static str) -> Result<Option<i64>> {
        match self.take(key) {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| SddsError::Cast { ty, value: raw }),
        }
    }

    /// Reject any key no constructor claimed
    pub(crate) fn finish(self, tag: &'static str) -> Result<()> {
        match self.map.into_keys().next() {
            None => Ok(()),
            Some(key) => Err(SddsError::UnknownField { tag, key }),
        }
    }
}

/// `&parameter` definition: one value per page
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: SddsType,
    pub symbol: Option<String>,
    pub units: Option<String>,
    pub description: Option<String>,
    pub format: Option<String>,
    /// Constant value declared in the header. When present the value never
    /// appears in the data section; the codec synthesizes it instead.
    pub fixed_value: Option<String>,
}

impl Parameter {
    pub const TAG: &'static str = "&parameter";

    pub fn new(name: impl Into<String>, ty: SddsType) -> Self {
        Self {
            name: name.into(),
            ty,
            symbol: None,
            units: None,
            description: None,
            format: None,
            fixed_value: None,
        }
    }

    pub(crate) fn from_fields(name: String, ty: SddsType, mut fields: Fields) -> Result<Self> {
        let def = Self {
            name,
            ty,
            symbol: fields.take("symbol"),
            units: fields.take("units"),
            description: fields.take("description"),
            format: fields.take("format"),
            fixed_value: fields.take("fixed_value"),
        };
        fields.finish(Self::TAG)?;
        Ok(def)
    }
}

/// `&array` definition: one multi-dimensional value per page
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDef {
    pub name: String,
    pub ty: SddsType,
    pub symbol: Option<String>,
    pub units: Option<String>,
    pub description: Option<String>,
    pub format: Option<String>,
    pub field_length: Option<i64>,
    /// Name of the array group this array belongs to
    pub group_name: Option<String>,
    /// Declared rank; readers default to 1 when absent
    pub dimensions: Option<usize>,
    /// Width of the binary string length prefix: `u1` for 1 byte, `i2` for
    /// 2 bytes, anything else (or absent) for the 4-byte long default
    pub modifier: Option<String>,
}

impl ArrayDef {
    pub const TAG: &'static str = "&array";

    pub fn new(name: impl Into<String>, ty: SddsType) -> Self {
        Self {
            name: name.into(),
            ty,
            symbol: None,
            units: None,
            description: None,
            format: None,
            field_length: None,
            group_name: None,
            dimensions: None,
            modifier: None,
        }
    }

    pub(crate) fn from_fields(name: String, ty: SddsType, mut fields: Fields) -> Result<Self> {
        let def = Self {
            name,
            ty,
            symbol: fields.take("symbol"),
            units: fields.take("units"),
            description: fields.take("description"),
            format: fields.take("format"),
            field_length: fields.take_i64("field_length", "long")?,
            group_name: fields.take("group_name"),
            dimensions: fields.take_usize("dimensions", "long")?,
            modifier: fields.take("modifier"),
        };
        fields.finish(Self::TAG)?;
        Ok(def)
    }

    /// Number of per-axis extents preceding the payload
    pub fn rank(&self) -> usize {
        self.dimensions.unwrap_or(1)
    }

    /// Integer type of the binary string length prefix, per `modifier`
    pub fn str_length_type(&self) -> SddsType {
        match self.modifier.as_deref() {
            Some("u1") => SddsType::Char,
            Some("i2") => SddsType::Short,
            _ => SddsType::Long,
        }
    }
}

/// `&column` definition: one value per row of the tabular section
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub ty: SddsType,
    pub symbol: Option<String>,
    pub units: Option<String>,
    pub description: Option<String>,
    pub format: Option<String>,
}

impl ColumnDef {
    pub const TAG: &'static str = "&column";

    pub fn new(name: impl Into<String>, ty: SddsType) -> Self {
        Self {
            name: name.into(),
            ty,
            symbol: None,
            units: None,
            description: None,
            format: None,
        }
    }

    pub(crate) fn from_fields(name: String, ty: SddsType, mut fields: Fields) -> Result<Self> {
        let def = Self {
            name,
            ty,
            symbol: fields.take("symbol"),
            units: fields.take("units"),
            description: fields.take("description"),
            format: fields.take("format"),
        };
        fields.finish(Self::TAG)?;
        Ok(def)
    }
}

/// One header definition: parameter, array or column
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Parameter(Parameter),
    Array(ArrayDef),
    Column(ColumnDef),
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Definition::Parameter(d) => &d.name,
            Definition::Array(d) => &d.name,
            Definition::Column(d) => &d.name,
        }
    }

    pub fn sdds_type(&self) -> SddsType {
        match self {
            Definition::Parameter(d) => d.ty,
            Definition::Array(d) => d.ty,
            Definition::Column(d) => d.ty,
        }
    }

    /// Header command tag of this definition
    pub fn tag(&self) -> &'static str {
        match self {
            Definition::Parameter(_) => Parameter::TAG,
            Definition::Array(_) => ArrayDef::TAG,
            Definition::Column(_) => ColumnDef::TAG,
        }
    }

    pub fn as_parameter(&self) -> Option<&Parameter> {
        match self {
            Definition::Parameter(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayDef> {
        match self {
            Definition::Array(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_column(&self) -> Option<&ColumnDef> {
        match self {
            Definition::Column(d) => Some(d),
            _ => None,
        }
    }
}

impl From<Parameter> for Definition {
    fn from(d: Parameter) -> Self {
        Definition::Parameter(d)
    }
}

impl From<ArrayDef> for Definition {
    fn from(d: ArrayDef) -> Self {
        Definition::Array(d)
    }
}

impl From<ColumnDef> for Definition {
    fn from(d: ColumnDef) -> Self {
        Definition::Column(d)
    }
}
