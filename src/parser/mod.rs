//! Reading SDDS files
//!
//! A read runs the byte stream through the header tokenizer and command
//! assembler, then hands the same stream to the data codec the `&data`
//! command selects. The stream only needs to support sequential reads plus
//! one seek back to offset 0 for the endianness sniff, so anything from a
//! plain file to an in-memory buffer works.

mod ascii;
mod binary;
mod header;
mod tokenizer;

use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use crate::error::Result;
use crate::types::{DataMode, Endianness, SddsFile};

/// Read an SDDS file from `path`.
///
/// The byte order of a binary data section is taken from the `!# big-endian`
/// / `!# little-endian` header comment when present, and defaults to the
/// host's byte order otherwise. Files written by this crate always carry the
/// marker.
///
/// ```no_run
/// let data = sdds::read_sdds("some/location/to/file.sdds")?;
/// # Ok::<(), sdds::SddsError>(())
/// ```
pub fn read_sdds(path: impl AsRef<Path>) -> Result<SddsFile> {
    from_reader(BufReader::new(File::open(path)?))
}

/// Read an SDDS file from `path`, forcing the byte order instead of
/// sniffing it.
///
/// A wrong byte order fails loudly (truncated-stream or cast errors), it
/// never silently yields corrupted values.
pub fn read_sdds_with_endianness(
    path: impl AsRef<Path>,
    endianness: Endianness,
) -> Result<SddsFile> {
    parse(BufReader::new(File::open(path)?), endianness)
}

/// Read a gzip-compressed SDDS file from `path`.
///
/// The stream is inflated into memory first so the endianness sniff can
/// still rewind to offset 0.
#[cfg(feature = "gzip")]
pub fn read_sdds_gz(path: impl AsRef<Path>) -> Result<SddsFile> {
    use std::io::{Cursor, Read};

    let mut decoder = flate2::read::GzDecoder::new(File::open(path)?);
    let mut bytes = Vec::new();
    decoder.read_to_end(&mut bytes)?;
    from_reader(Cursor::new(bytes))
}

/// Read an SDDS document from any seekable byte source
pub fn from_reader<R: BufRead + Seek>(mut reader: R) -> Result<SddsFile> {
    let endianness = tokenizer::sniff_endianness(&mut reader)?;
    parse(reader, endianness)
}

fn parse<R: BufRead>(reader: R, endianness: Endianness) -> Result<SddsFile> {
    let mut tokens = tokenizer::Tokens::new(reader);
    let (definitions, description, data) = header::read_header(&mut tokens)?;
    let mut reader = tokens.into_inner();
    let values = match data.mode {
        DataMode::Binary => binary::read_data_binary(&definitions, &mut reader, endianness)?,
        DataMode::Ascii => ascii::read_data_ascii(&definitions, &mut reader)?,
    };
    SddsFile::new(description, definitions, values)
}
