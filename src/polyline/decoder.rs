use crate::{Coordinate, DecodeError, ElevatedCoordinate, Precision};

/// Decodes a polyline into absolute coordinates. An empty string yields an
/// empty path. A stream that ends mid-point fails without returning the
/// points decoded so far.
pub fn decode_polyline(
    encoded: &str,
    precision: Precision,
) -> Result<Vec<Coordinate>, DecodeError> {
    let mut scanner = PolylineScanner::new(encoded);
    let mut path = Vec::new();

    while !scanner.is_empty() {
        path.push(scanner.read_coordinate(precision)?);
    }

    Ok(path)
}

/// Decodes a polyline whose points carry a third, elevation channel
/// interleaved after the latitude and longitude deltas.
pub fn decode_polyline_with_elevation(
    encoded: &str,
    precision: Precision,
) -> Result<Vec<ElevatedCoordinate>, DecodeError> {
    let mut scanner = PolylineScanner::new(encoded);
    let mut path = Vec::new();

    while !scanner.is_empty() {
        let coordinate = scanner.read_coordinate(precision)?;
        let elevation = scanner.read_elevation(precision)?;
        path.push(ElevatedCoordinate {
            coordinate,
            elevation,
        });
    }

    Ok(path)
}

/// Cursor over the encoded bytes holding the running delta accumulators.
#[derive(Debug)]
struct PolylineScanner<'a> {
    bytes: &'a [u8],
    index: usize,
    lat: i64,
    lon: i64,
    elevation: i64,
}

impl<'a> PolylineScanner<'a> {
    fn new(encoded: &'a str) -> Self {
        Self {
            bytes: encoded.as_bytes(),
            index: 0,
            lat: 0,
            lon: 0,
            elevation: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.index == self.bytes.len()
    }

    fn read_coordinate(&mut self, precision: Precision) -> Result<Coordinate, DecodeError> {
        self.lat += self.read_delta()?;
        if self.is_empty() {
            return Err(DecodeError::IncompletePoint);
        }
        self.lon += self.read_delta()?;

        Ok(Coordinate {
            lon: self.lon as f64 / precision.factor(),
            lat: self.lat as f64 / precision.factor(),
        })
    }

    fn read_elevation(&mut self, precision: Precision) -> Result<f64, DecodeError> {
        if self.is_empty() {
            return Err(DecodeError::IncompletePoint);
        }
        self.elevation += self.read_delta()?;

        Ok(self.elevation as f64 / precision.factor())
    }

    /// Reads one signed delta: 5-bit chunks from low to high, each byte biased
    /// by 63, bit `0x20` flagging continuation, zig-zag sign in the lowest bit
    /// of the assembled value.
    fn read_delta(&mut self) -> Result<i64, DecodeError> {
        let mut value: u64 = 0;
        let mut shift = 0u32;

        loop {
            let Some(&byte) = self.bytes.get(self.index) else {
                return Err(DecodeError::TruncatedVarint);
            };
            let Some(chunk) = byte.checked_sub(63) else {
                return Err(DecodeError::InvalidByte(byte));
            };
            self.index += 1;

            // a run of continuation chunks must not outgrow the value width
            if shift >= u64::BITS {
                return Err(DecodeError::OverlongVarint);
            }
            value |= u64::from(chunk & 0x1f) << shift;
            shift += 5;

            if chunk & 0x20 == 0 {
                break;
            }
        }

        let delta = (value >> 1) as i64;
        Ok(if value & 1 != 0 { !delta } else { delta })
    }
}
