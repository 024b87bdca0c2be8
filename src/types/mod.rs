//! Core types for SDDS documents

mod array;
mod data;
mod definition;
mod sdds_file;
mod sdds_type;
mod value;

pub use array::ArrayValue;
pub use data::{Data, DataMode, Description, Endianness};
pub use definition::{ArrayDef, ColumnDef, Definition, Parameter};
pub use sdds_file::{SddsFile, VERSION};
pub use sdds_type::{Scalar, ScalarSeq, SddsType};
pub use value::Value;

pub(crate) use definition::Fields;
