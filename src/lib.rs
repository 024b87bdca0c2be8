//! sdds - Reader and writer for SDDS (Self Describing Data Set) files
//!
//! SDDS files carry a self-describing text header (entity definitions plus a
//! `&data` command) followed by a binary or ASCII data section holding one
//! value per definition. This crate parses both data modes into a typed
//! in-memory document and writes documents back out.
//!
//! # Features
//!
//! - Binary and ASCII data sections, parameters, arrays, and columns
//! - Byte order sniffed from the `!# big-endian` / `!# little-endian` marker
//! - Fixed-value parameters synthesized from the header
//! - Name-indexed access to decoded values
//! - `ndarray` feature for multi-dimensional array access
//! - `gzip` feature for compressed files
//!
//! # Example
//!
//! ```no_run
//! let data = sdds::read_sdds("some/location/to/file.sdds")?;
//!
//! for (definition, value) in data.iter() {
//!     println!("{}: {:?}", definition.name(), value);
//! }
//!
//! if let Some((_, value)) = data.get("acqStamp") {
//!     let stamp = value.as_scalar().and_then(|s| s.as_f64());
//!     println!("acquired at {stamp:?}");
//! }
//! # Ok::<(), sdds::SddsError>(())
//! ```

pub mod error;
pub mod parser;
pub mod types;
pub mod writer;

#[cfg(feature = "ndarray")]
pub mod ndarray_ext;

// Re-export common types at crate root
pub use error::{Result, SddsError};
pub use parser::{from_reader, read_sdds, read_sdds_with_endianness};
pub use types::{
    ArrayDef, ArrayValue, ColumnDef, DataMode, Definition, Description, Endianness, Parameter,
    Scalar, ScalarSeq, SddsFile, SddsType, Value, VERSION,
};
pub use writer::{to_bytes, to_writer, write_sdds, write_sdds_with_mode};

#[cfg(feature = "gzip")]
pub use parser::read_sdds_gz;

#[cfg(feature = "ndarray")]
pub use ndarray_ext::{ArrayType, NdarrayError};
