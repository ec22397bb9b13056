//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for haversine distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
///
/// `(0.0, 0.0)` is the sentinel value that geocoding providers and the
/// narrative model use as a placeholder. It is never a real location here.
///
/// # Examples
///
/// ```
/// use itinera_core::Coordinates;
///
/// let yubatake = Coordinates::new(36.6214, 138.5968);
/// assert!(yubatake.is_valid());
/// assert!(Coordinates::SENTINEL.is_sentinel());
/// assert!(!Coordinates::SENTINEL.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees, north positive
    pub latitude: f64,
    /// Longitude in degrees, east positive
    pub longitude: f64,
}

impl Coordinates {
    /// The `(0.0, 0.0)` placeholder.
    pub const SENTINEL: Coordinates = Coordinates {
        latitude: 0.0,
        longitude: 0.0,
    };

    /// Create a coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True iff both components are exactly zero.
    pub fn is_sentinel(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }

    /// True iff the pair is finite, in range, and not the sentinel.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
            && !self.is_sentinel()
    }

    /// Haversine distance to `other` in kilometres.
    ///
    /// # Examples
    ///
    /// ```
    /// use itinera_core::Coordinates;
    ///
    /// let a = Coordinates::new(35.0, 139.0);
    /// assert_eq!(a.distance_km(&a), 0.0);
    /// ```
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();
        let a = (dlat / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}
