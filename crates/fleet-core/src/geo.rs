//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Synthetic movement steps are
//! on the order of 1e-3 degrees and change detection works at 1e-9, which
//! is well below what `f32` can resolve at city coordinates.

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` if both components are finite and inside the WGS-84 ranges
    /// (`[-90, 90]` latitude, `[-180, 180]` longitude).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// `true` if the points differ by at most `epsilon` degrees on each axis.
    #[inline]
    pub fn approx_eq(self, other: GeoPoint, epsilon: f64) -> bool {
        (self.lat - other.lat).abs() <= epsilon && (self.lon - other.lon).abs() <= epsilon
    }

    /// Planar Euclidean distance in degree space.
    ///
    /// Movement durations are scaled by this, not by metres, so that a
    /// diagonal step takes proportionally longer than a cardinal one
    /// regardless of latitude.
    #[inline]
    pub fn degree_distance(self, other: GeoPoint) -> f64 {
        (other.lat - self.lat).hypot(other.lon - self.lon)
    }

    /// Componentwise linear interpolation: `self + (other - self) * t`.
    #[inline]
    pub fn lerp(self, other: GeoPoint, t: f64) -> GeoPoint {
        GeoPoint {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
        }
    }

    /// Return the point shifted by `(d_lat, d_lon)` degrees.
    #[inline]
    pub fn offset(self, d_lat: f64, d_lon: f64) -> GeoPoint {
        GeoPoint::new(self.lat + d_lat, self.lon + d_lon)
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Human-readable "how far away" label for a distance in metres.
///
/// Under 1 km the label is in whole metres, under 10 km in kilometres with
/// one decimal, otherwise whole kilometres.
pub fn format_distance(metres: f64) -> String {
    let km = metres / 1_000.0;
    if km < 1.0 {
        format!("{} m away", metres.round() as i64)
    } else if km < 10.0 {
        format!("{km:.1} km away")
    } else {
        format!("{} km away", km.round() as i64)
    }
}
