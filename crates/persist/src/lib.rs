//! Persistence: load and save heat worlds.
//!
//! Two self-describing formats, selected by the first line of the input:
//! ```text
//! HeatWorld v0          - whitespace-separated text
//! HeatWorldBinary v0    - header line followed by a CBOR record
//! ```
//!
//! # Invariants
//! - Every loaded world has passed `World::validate`.
//! - Binary save/load is lossless; text save uses shortest round-trip float
//!   formatting, so text save/load is lossless too.

mod binary;
mod text;

use heatworld_common::Format;
use heatworld_kernel::{World, WorldError};
use std::io::{Read, Write};
use std::path::Path;

pub use binary::BINARY_HEADER;
pub use text::TEXT_HEADER;

/// Errors from loading or saving a world.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),
    #[error("unrecognised world header `{0}`")]
    UnknownHeader(String),
    #[error("line {line}: cannot parse `{token}` as {expected}")]
    Parse {
        line: usize,
        token: String,
        expected: &'static str,
    },
    #[error("expected {expected} {what}, found {found}")]
    MissingValues {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: unexpected trailing data `{token}`")]
    TrailingData { line: usize, token: String },
    #[error("{count} unexpected bytes after the binary record at offset {offset}")]
    TrailingBytes { offset: usize, count: usize },
    #[error("CBOR serialization error: {0}")]
    CborEncode(String),
    #[error("CBOR deserialization error: {0}")]
    CborDecode(String),
    #[error("invalid world: {0}")]
    World(#[from] WorldError),
}

/// Identify the format of a serialized world from its leading bytes.
pub fn detect_format(data: &[u8]) -> Option<Format> {
    if data.starts_with(BINARY_HEADER) {
        Some(Format::Binary)
    } else if text::has_header(data) {
        Some(Format::Text)
    } else {
        None
    }
}

/// Load a world from `reader`, autodetecting the format.
pub fn load_world<R: Read>(mut reader: R) -> Result<World, CodecError> {
    let _span = tracing::info_span!("load_world").entered();
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let world = match detect_format(&data) {
        Some(Format::Binary) => binary::decode(&data[BINARY_HEADER.len()..])?,
        Some(Format::Text) => text::decode(std::str::from_utf8(&data)?)?,
        None => {
            let first = data
                .split(|&b| b == b'\n')
                .next()
                .unwrap_or_default();
            let shown: String = String::from_utf8_lossy(first).chars().take(40).collect();
            return Err(CodecError::UnknownHeader(shown));
        }
    };

    tracing::debug!(
        w = world.width(),
        h = world.height(),
        alpha = world.alpha(),
        t = world.time(),
        bytes = data.len(),
        "world loaded"
    );
    Ok(world)
}

/// Save `world` to `writer` in the requested format.
pub fn save_world<W: Write>(mut writer: W, world: &World, format: Format) -> Result<(), CodecError> {
    let _span = tracing::info_span!("save_world", %format).entered();
    match format {
        Format::Text => text::encode(&mut writer, world)?,
        Format::Binary => binary::encode(&mut writer, world)?,
    }
    writer.flush()?;
    Ok(())
}

/// Load a world from the file at `path`.
pub fn load_world_from_path(path: impl AsRef<Path>) -> Result<World, CodecError> {
    let file = std::fs::File::open(path)?;
    load_world(std::io::BufReader::new(file))
}

/// Save `world` to the file at `path`, replacing any existing file.
pub fn save_world_to_path(
    path: impl AsRef<Path>,
    world: &World,
    format: Format,
) -> Result<(), CodecError> {
    let file = std::fs::File::create(path)?;
    save_world(std::io::BufWriter::new(file), world, format)
}
