//! The in-memory SDDS document

use std::collections::HashMap;

use crate::error::{Result, SddsError};
use crate::types::{Definition, Description, Value};

/// Version token every SDDS file starts with
pub const VERSION: &str = "SDDS1";

/// Holds the contents of one SDDS file: the ordered definitions and their
/// values, addressable by name.
///
/// A document is constructed once per read (or by hand, for writing) and is
/// a read-only snapshot afterwards: reading never hands out a partially
/// built document and writing never mutates its input.
///
/// ```
/// use sdds::{Definition, Parameter, Scalar, SddsFile, SddsType, Value};
///
/// let sdds_file = SddsFile::new(
///     None,
///     vec![Definition::Parameter(Parameter::new("turns", SddsType::Long))],
///     vec![Value::Scalar(Scalar::Long(2048))],
/// ).unwrap();
///
/// let (definition, value) = sdds_file.get("turns").unwrap();
/// assert_eq!(definition.name(), "turns");
/// assert_eq!(value.as_scalar().unwrap().as_i64(), Some(2048));
/// ```
#[derive(Debug, Clone)]
pub struct SddsFile {
    version: String,
    description: Option<Description>,
    definitions: Vec<Definition>,
    values: Vec<Value>,
    by_name: HashMap<String, usize>,
}

impl SddsFile {
    /// Build a document from matching definition and value lists.
    ///
    /// Fails if two definitions share a name or the lists differ in length.
    pub fn new(
        description: Option<Description>,
        definitions: Vec<Definition>,
        values: Vec<Value>,
    ) -> Result<Self> {
        if definitions.len() != values.len() {
            return Err(SddsError::CountMismatch {
                definitions: definitions.len(),
                values: values.len(),
            });
        }
        let mut by_name = HashMap::with_capacity(definitions.len());
        for (idx, definition) in definitions.iter().enumerate() {
            if by_name
                .insert(definition.name().to_string(), idx)
                .is_some()
            {
                return Err(SddsError::DuplicateName(definition.name().to_string()));
            }
        }
        Ok(Self {
            version: VERSION.to_string(),
            description,
            definitions,
            values,
            by_name,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    /// Definitions in canonical (parameter, array, column) order
    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    /// Values in the same order as [`definitions`](Self::definitions)
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of definitions in the document
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definition and value for `name`, if declared
    pub fn get(&self, name: &str) -> Option<(&Definition, &Value)> {
        let idx = *self.by_name.get(name)?;
        Some((&self.definitions[idx], &self.values[idx]))
    }

    /// Iterate `(definition, value)` pairs in definition order
    pub fn iter(&self) -> impl Iterator<Item = (&Definition, &Value)> {
        self.definitions.iter().zip(self.values.iter())
    }
}
