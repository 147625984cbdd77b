use crate::{Coordinate, ElevatedCoordinate, Precision};

/// Encodes absolute coordinates into a delta-encoded polyline.
pub fn encode_polyline(path: &[Coordinate], precision: Precision) -> String {
    let mut writer = PolylineWriter::new(precision);
    for coordinate in path {
        writer.write_coordinate(coordinate);
    }
    writer.finish()
}

/// Encodes coordinates with the elevation channel interleaved after the
/// latitude and longitude deltas of every point.
pub fn encode_polyline_with_elevation(path: &[ElevatedCoordinate], precision: Precision) -> String {
    let mut writer = PolylineWriter::new(precision);
    for point in path {
        writer.write_coordinate(&point.coordinate);
        writer.write_elevation(point.elevation);
    }
    writer.finish()
}

/// Inverse of the decoder's scanner: scales to integers, takes deltas against
/// the previous point and emits zig-zag 5-bit chunks.
#[derive(Debug)]
struct PolylineWriter {
    out: String,
    precision: Precision,
    lat: i64,
    lon: i64,
    elevation: i64,
}

impl PolylineWriter {
    fn new(precision: Precision) -> Self {
        Self {
            out: String::new(),
            precision,
            lat: 0,
            lon: 0,
            elevation: 0,
        }
    }

    fn write_coordinate(&mut self, coordinate: &Coordinate) {
        let lat = self.scaled(coordinate.lat);
        let lon = self.scaled(coordinate.lon);
        self.write_delta(lat - self.lat);
        self.write_delta(lon - self.lon);
        self.lat = lat;
        self.lon = lon;
    }

    fn write_elevation(&mut self, elevation: f64) {
        let elevation = self.scaled(elevation);
        self.write_delta(elevation - self.elevation);
        self.elevation = elevation;
    }

    fn scaled(&self, value: f64) -> i64 {
        (value * self.precision.factor()).round() as i64
    }

    fn write_delta(&mut self, delta: i64) {
        // Zig-zag: shift the sign into the lowest bit.
        let mut value = ((delta << 1) ^ (delta >> 63)) as u64;

        while value >= 0x20 {
            let chunk = 0x20 | (value & 0x1f) as u8;
            self.out.push(char::from(chunk + 63));
            value >>= 5;
        }
        self.out.push(char::from(value as u8 + 63));
    }

    fn finish(self) -> String {
        self.out
    }
}
