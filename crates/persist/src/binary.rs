use std::io::{Cursor, Write};

use heatworld_common::CellFlags;
use heatworld_kernel::World;
use serde::{Deserialize, Serialize};

use crate::CodecError;

/// Header line preceding the CBOR body of a binary world.
pub const BINARY_HEADER: &[u8] = b"HeatWorldBinary v0\n";

/// On-disk record for the binary format.
#[derive(Debug, Serialize, Deserialize)]
struct WorldRecord {
    width: u32,
    height: u32,
    alpha: f32,
    t: f64,
    state: Vec<f32>,
    properties: Vec<CellFlags>,
}

pub(crate) fn decode(body: &[u8]) -> Result<World, CodecError> {
    let mut cursor = Cursor::new(body);
    let record: WorldRecord =
        ciborium::from_reader(&mut cursor).map_err(|e| CodecError::CborDecode(e.to_string()))?;
    let consumed = cursor.position() as usize;
    if consumed != body.len() {
        return Err(CodecError::TrailingBytes {
            offset: consumed,
            count: body.len() - consumed,
        });
    }
    tracing::trace!(
        width = record.width,
        height = record.height,
        "decoded binary world"
    );
    Ok(World::new(
        record.width,
        record.height,
        record.alpha,
        record.t,
        record.state,
        record.properties,
    )?)
}

pub(crate) fn encode<W: Write>(out: &mut W, world: &World) -> Result<(), CodecError> {
    let record = WorldRecord {
        width: world.width(),
        height: world.height(),
        alpha: world.alpha(),
        t: world.time(),
        state: world.state().to_vec(),
        properties: world.properties().to_vec(),
    };
    out.write_all(BINARY_HEADER)?;
    ciborium::into_writer(&record, out).map_err(|e| CodecError::CborEncode(e.to_string()))?;
    Ok(())
}
