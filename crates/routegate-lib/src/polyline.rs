//! Encoded polyline codec.
//!
//! Implements the signed-delta polyline format at an arbitrary precision.
//! Each coordinate component is scaled by the precision, truncated to an
//! integer, delta-encoded against the previous point, zig-zag transformed and
//! written as little-endian 5-bit groups. Every group except the last has the
//! `0x20` continuation bit set, and each emitted byte is offset by 63 so the
//! output stays inside printable ASCII.
//!
//! [`PRECISION_5`] is the canonical output precision for routes.
//! [`PRECISION_6`] is what Valhalla uses for its leg shapes.

use thiserror::Error;

use crate::model::Coordinate;

/// Scale factor for precision-5 polylines (about 1.1 m resolution).
pub const PRECISION_5: f64 = 1e5;

/// Scale factor for precision-6 polylines.
pub const PRECISION_6: f64 = 1e6;

const CHAR_OFFSET: u8 = 63;
const CONTINUATION: u64 = 0x20;
const GROUP_MASK: u64 = 0x1f;
/// Shift of the last group that still starts inside a `u64`.
const MAX_SHIFT: u32 = 60;

/// Failure while decoding a polyline string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    /// A byte outside the `'?'..='~'` alphabet was found.
    #[error("invalid polyline character {byte:#04x} at offset {offset}")]
    InvalidCharacter { byte: u8, offset: usize },

    /// The input ended in the middle of a value or after a lone latitude.
    #[error("polyline truncated at offset {offset}")]
    Truncated { offset: usize },

    /// A value used more continuation groups than fit in 64 bits.
    #[error("polyline value overflows at offset {offset}")]
    Overflow { offset: usize },
}

/// Decode `encoded` into coordinates using `precision` as the scale factor.
pub fn decode(encoded: &str, precision: f64) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut coords = Vec::new();
    let mut offset = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    while offset < bytes.len() {
        lat = lat.wrapping_add(read_value(bytes, &mut offset)?);
        if offset >= bytes.len() {
            return Err(PolylineError::Truncated { offset });
        }
        lon = lon.wrapping_add(read_value(bytes, &mut offset)?);

        coords.push(Coordinate::new(
            lat as f64 / precision,
            lon as f64 / precision,
        ));
    }

    Ok(coords)
}

/// Encode `coords` using `precision` as the scale factor.
pub fn encode(coords: &[Coordinate], precision: f64) -> String {
    let mut encoded = String::with_capacity(coords.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;

    for coord in coords {
        let lat = (coord.lat * precision) as i64;
        let lon = (coord.lon * precision) as i64;

        write_value(lat.wrapping_sub(prev_lat), &mut encoded);
        write_value(lon.wrapping_sub(prev_lon), &mut encoded);

        prev_lat = lat;
        prev_lon = lon;
    }

    encoded
}

/// Decode at one precision and re-encode the same points at another.
pub fn reencode(encoded: &str, from: f64, to: f64) -> Result<String, PolylineError> {
    let coords = decode(encoded, from)?;
    Ok(encode(&coords, to))
}

fn read_value(bytes: &[u8], offset: &mut usize) -> Result<i64, PolylineError> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*offset) else {
            return Err(PolylineError::Truncated { offset: *offset });
        };
        if !(CHAR_OFFSET..=b'~').contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                byte,
                offset: *offset,
            });
        }
        let group = u64::from(byte - CHAR_OFFSET);
        let bits = group & GROUP_MASK;
        // At the last shift only the low bits of a group fit in 64 bits.
        if shift > MAX_SHIFT || (shift == MAX_SHIFT && bits >> (u64::BITS - shift) != 0) {
            return Err(PolylineError::Overflow { offset: *offset });
        }

        result |= bits << shift;
        shift += 5;
        *offset += 1;

        if group < CONTINUATION {
            break;
        }
    }

    Ok(unzigzag(result))
}

fn write_value(value: i64, out: &mut String) {
    let mut value = zigzag(value);

    while value >= CONTINUATION {
        out.push(char::from(((CONTINUATION | (value & GROUP_MASK)) as u8) + CHAR_OFFSET));
        value >>= 5;
    }
    out.push(char::from(value as u8 + CHAR_OFFSET));
}

fn zigzag(value: i64) -> u64 {
    let shifted = value << 1;
    if value < 0 {
        !shifted as u64
    } else {
        shifted as u64
    }
}

fn unzigzag(value: u64) -> i64 {
    let half = (value >> 1) as i64;
    if value & 1 != 0 {
        !half
    } else {
        half
    }
}
