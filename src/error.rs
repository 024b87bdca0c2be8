//! Error types for the sdds crate

use thiserror::Error;

/// Errors raised while reading or writing SDDS files.
///
/// Any failure aborts the current read or write; the crate never returns a
/// partial [`SddsFile`](crate::SddsFile) and never retries on its own.
#[derive(Debug, Error)]
pub enum SddsError {
    /// Version token other than `SDDS1`
    #[error("unsupported SDDS version token: {0:?}, expected \"SDDS1\"")]
    BadVersion(String),

    /// A command tag the header grammar does not know
    #[error("unknown token: {0} encountered")]
    UnknownTag(String),

    /// Header ended without a `&data` command
    #[error("found end of file while looking for &data tag")]
    MissingDataCommand,

    /// More than one `&description` command
    #[error("two &description tags found")]
    DuplicateDescription,

    /// Stream ended between a command tag and its `&end` terminator
    #[error("end of file while looking for &end tag")]
    UnterminatedCommand,

    /// A `key=value` assignment that does not split on `=`
    #[error("malformed assignment in header: {0:?}")]
    MalformedAssignment(String),

    /// A command is missing one of its mandatory keys
    #[error("missing mandatory key {key:?} in {tag} command")]
    MissingKey {
        tag: &'static str,
        key: &'static str,
    },

    /// A command carries a key its definition does not accept
    #[error("unknown key {key:?} in {tag} command")]
    UnknownField { tag: &'static str, key: String },

    /// `&include` directives are not supported
    #[error("&include commands are not supported")]
    IncludeUnsupported,

    /// `&data mode=` value other than binary or ascii
    #[error("unsupported data mode {0:?}")]
    UnsupportedMode(String),

    /// A declared type name with no registry entry
    #[error("unknown SDDS type {0:?}")]
    UnknownType(String),

    /// A value failed to cast to its declared type
    #[error("cannot cast {value:?} to {ty}")]
    Cast { ty: &'static str, value: String },

    /// Two definitions share a name
    #[error("duplicated name entries found: {0:?}")]
    DuplicateName(String),

    /// Definition list and value list of a document differ in length
    #[error("{definitions} definitions but {values} values supplied")]
    CountMismatch { definitions: usize, values: usize },

    /// Columns of one page disagree on their row count
    #[error("column {name:?} has {len} rows, expected {expected}")]
    ColumnLengthMismatch {
        name: String,
        len: usize,
        expected: usize,
    },

    /// An array's extents disagree with its payload length
    #[error("shape {shape:?} does not match data length {len}")]
    ShapeMismatch { shape: Vec<usize>, len: usize },

    /// An array value's rank disagrees with the `dimensions` its definition
    /// declares
    #[error("array {name:?} has rank {rank}, definition declares {declared}")]
    RankMismatch {
        name: String,
        rank: usize,
        declared: usize,
    },

    /// A definition was paired with a value of the wrong kind
    /// (e.g. a column definition holding a scalar)
    #[error("definition {name:?} expects a {expected} value")]
    ValueKindMismatch { name: String, expected: &'static str },

    /// A value the whitespace-delimited ASCII data section cannot carry
    /// without changing its meaning (e.g. a string token containing spaces)
    #[error("value {value:?} of {name:?} is not representable in ascii mode")]
    AsciiUnrepresentable { name: String, value: String },

    /// Stream ended before the grammar or data section was fully consumed.
    ///
    /// Kept distinct from the grammar errors so callers can tell a truncated
    /// file from a malformed one.
    #[error("unexpected end of stream while reading {0}")]
    UnexpectedEof(&'static str),

    /// Bytes that should have been text were not valid UTF-8
    #[error("invalid UTF-8 in {0}")]
    InvalidUtf8(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SddsError>;
