#[cfg(test)]
#[path = "polyline_test.rs"]
mod tests;

use crate::domain::models::LatLng;

const PRECISION: f64 = 1e5;
const SYMBOL_OFFSET: u8 = 63;
const CHUNK_BITS: u32 = 5;
const CHUNK_MASK: i64 = 0x1f;
const CONTINUATION_BIT: i64 = 0x20;
// 64-bit accumulator, so at most 12 five-bit chunks per value.
const MAX_SHIFT: u32 = 60;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PolylineError {
    #[error("Encoded path ends mid-value at byte {position}")]
    Truncated { position: usize },

    #[error("Invalid symbol {symbol:#04x} at byte {position}")]
    InvalidSymbol { position: usize, symbol: u8 },

    #[error("Value starting at byte {position} does not fit in 64 bits")]
    Overflow { position: usize },
}

fn read_value(bytes: &[u8], cursor: &mut usize) -> Result<i64, PolylineError> {
    let start = *cursor;
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let position = *cursor;
        let symbol = match bytes.get(position) {
            Some(symbol) => *symbol,
            None => return Err(PolylineError::Truncated { position }),
        };
        if !(SYMBOL_OFFSET..=SYMBOL_OFFSET + 63).contains(&symbol) {
            return Err(PolylineError::InvalidSymbol { position, symbol });
        }
        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow { position: start });
        }

        let chunk = (symbol - SYMBOL_OFFSET) as i64;
        result |= (chunk & CHUNK_MASK) << shift;
        shift += CHUNK_BITS;
        *cursor += 1;

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    if result & 1 == 1 {
        return Ok(!(result >> 1));
    }

    return Ok(result >> 1);
}

/// Decodes an encoded path into `(lat, lng)` pairs at five decimal digits of
/// precision. Axis order is left as-is; flipping for the map is the caller's
/// job.
pub fn decode(encoded: &str) -> Result<Vec<LatLng>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut cursor = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = vec![];

    while cursor < bytes.len() {
        lat = lat.wrapping_add(read_value(bytes, &mut cursor)?);
        lng = lng.wrapping_add(read_value(bytes, &mut cursor)?);

        points.push(LatLng::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    return Ok(points);
}

fn write_value(value: i64, out: &mut String) {
    let mut remaining = if value < 0 { !(value << 1) } else { value << 1 };

    while remaining >= CONTINUATION_BIT {
        let chunk = (CONTINUATION_BIT | (remaining & CHUNK_MASK)) as u8;
        out.push((chunk + SYMBOL_OFFSET) as char);
        remaining >>= CHUNK_BITS;
    }

    out.push((remaining as u8 + SYMBOL_OFFSET) as char);
}

/// Inverse of [`decode`]. Coordinates are rounded to five decimal digits.
pub fn encode(points: &[LatLng]) -> String {
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let lat = (point.lat * PRECISION).round() as i64;
        let lng = (point.lng * PRECISION).round() as i64;

        write_value(lat - prev_lat, &mut out);
        write_value(lng - prev_lng, &mut out);

        prev_lat = lat;
        prev_lng = lng;
    }

    return out;
}
