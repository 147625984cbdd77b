use approx::abs_diff_eq;

/// Number of decimal digits preserved by an encoded polyline.
/// The scale factor applied to the integer delta accumulators is `10^precision`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Precision {
    /// Five decimal digits (scale 1e5), the classic Google/OSRM encoding.
    Five,
    /// Six decimal digits (scale 1e6), used by Valhalla route shapes.
    #[default]
    Six,
}

impl Precision {
    pub(crate) const fn factor(self) -> f64 {
        match self {
            Self::Five => 1e5,
            Self::Six => 1e6,
        }
    }
}

/// WGS84 longitude/latitude pair produced by the polyline decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    /// Resolution of a precision-6 encoding, the finest this crate handles.
    pub const EPSILON: f64 = 1e-6;
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        abs_diff_eq!(self.lon, other.lon, epsilon = Self::EPSILON)
            && abs_diff_eq!(self.lat, other.lat, epsilon = Self::EPSILON)
    }
}

/// Coordinate with the third channel some routing engines interleave into
/// their shapes, carrying elevation at the same scale factor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElevatedCoordinate {
    pub coordinate: Coordinate,
    pub elevation: f64,
}

impl PartialEq for ElevatedCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.coordinate == other.coordinate
            && abs_diff_eq!(self.elevation, other.elevation, epsilon = Coordinate::EPSILON)
    }
}
