use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the globe in decimal degrees (WGS84).
///
/// Latitude is expected in [-90, 90], longitude in [-180, 180]; inputs
/// outside those ranges produce garbage, not errors. Serializes as
/// `{"latitude": <float>, "longitude": <float>}`, the same shape the
/// store keeps on disk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance and initial bearing from `self` toward `to`.
    pub fn track_to(&self, to: &Coordinate) -> BearingResult {
        BearingResult {
            distance_km: self.distance_km_to(to),
            bearing_deg: self.bearing_deg_to(to),
        }
    }

    /// Haversine distance in kilometers.
    pub fn distance_km_to(&self, to: &Coordinate) -> f64 {
        let lat_from = self.latitude.to_radians();
        let lat_to = to.latitude.to_radians();
        let delta_lat = (to.latitude - self.latitude).to_radians();
        let delta_lon = (to.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat_from.cos() * lat_to.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// Initial bearing (forward azimuth) toward `to` in degrees,
    /// 0 = North, normalized into [0, 360).
    ///
    /// A zero-length track gives bearing 0 (the atan2(0, 0) convention),
    /// which is accepted rather than treated as an error.
    pub fn bearing_deg_to(&self, to: &Coordinate) -> f64 {
        let lat_from = self.latitude.to_radians();
        let lat_to = to.latitude.to_radians();
        let delta_lon = (to.longitude - self.longitude).to_radians();

        let y = delta_lon.sin() * lat_to.cos();
        let x = lat_from.cos() * lat_to.sin() - lat_from.sin() * lat_to.cos() * delta_lon.cos();

        (y.atan2(x).to_degrees() + 360.0) % 360.0
    }
}

/// Distance and initial bearing between two coordinates. Derived, never
/// persisted; recomputed whenever either endpoint changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BearingResult {
    pub distance_km: f64,
    pub bearing_deg: f64,
}

impl BearingResult {
    pub fn compass_point(&self) -> CompassPoint {
        CompassPoint::from_bearing(self.bearing_deg)
    }

    pub fn distance_label(&self) -> String {
        format_distance(self.distance_km)
    }
}

/// Eight-point compass rose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompassPoint {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassPoint {
    /// Nearest of the eight 45°-wide sectors for a bearing in degrees.
    pub fn from_bearing(bearing_deg: f64) -> Self {
        const POINTS: [CompassPoint; 8] = [
            CompassPoint::N,
            CompassPoint::NE,
            CompassPoint::E,
            CompassPoint::SE,
            CompassPoint::S,
            CompassPoint::SW,
            CompassPoint::W,
            CompassPoint::NW,
        ];
        let index = (bearing_deg / 45.0).round() as i64;
        POINTS[index.rem_euclid(8) as usize]
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NE => "NE",
            CompassPoint::E => "E",
            CompassPoint::SE => "SE",
            CompassPoint::S => "S",
            CompassPoint::SW => "SW",
            CompassPoint::W => "W",
            CompassPoint::NW => "NW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Human-readable distance: meters rounded to the nearest integer under a
/// kilometer, otherwise kilometers with one decimal digit.
pub fn format_distance(distance_km: f64) -> String {
    if distance_km < 1.0 {
        format!("{} m", (distance_km * 1000.0).round() as i64)
    } else {
        format!("{distance_km:.1} km")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: Coordinate = Coordinate {
        latitude: 48.8566,
        longitude: 2.3522,
    };
    const LYON: Coordinate = Coordinate {
        latitude: 45.7640,
        longitude: 4.8357,
    };

    #[test]
    fn test_display() {
        let spot = Coordinate::new(48.057440, -123.119625);
        assert_eq!(format!("{spot}"), "(48.057440, -123.119625)");
    }

    #[test]
    fn test_zero_length_track() {
        let spot = Coordinate::new(12.34, 56.78);
        let track = spot.track_to(&spot);
        assert_eq!(track.distance_km, 0.0);
        assert_eq!(track.bearing_deg, 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let there = PARIS.distance_km_to(&LYON);
        let back = LYON.distance_km_to(&PARIS);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn test_equator_bearings() {
        let origin = Coordinate::new(0.0, 0.0);
        let east = Coordinate::new(0.0, 1.0);

        let track = origin.track_to(&east);
        assert!((track.distance_km - 111.195).abs() < 0.01);
        assert!((track.bearing_deg - 90.0).abs() < 1e-9);

        // Exactly reversed going back
        assert!((east.bearing_deg_to(&origin) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_paris_to_lyon() {
        let track = PARIS.track_to(&LYON);
        assert!((track.distance_km - 391.5).abs() < 0.1);
        assert!((track.bearing_deg - 150.5).abs() < 0.1);
        assert_eq!(track.compass_point(), CompassPoint::SE);
    }

    #[test]
    fn test_bearing_stays_in_range() {
        let center = Coordinate::new(48.0, 2.0);
        for step in 0..36 {
            let angle = (step as f64 * 10.0).to_radians();
            let target = Coordinate::new(48.0 + angle.cos(), 2.0 + angle.sin());
            let bearing = center.bearing_deg_to(&target);
            assert!(
                (0.0..360.0).contains(&bearing),
                "bearing {bearing} out of range for step {step}",
            );
        }
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.0005), "1 m");
        assert_eq!(format_distance(0.4532), "453 m");
        assert_eq!(format_distance(0.9994), "999 m");
        assert_eq!(format_distance(1.0), "1.0 km");
        assert_eq!(format_distance(2.3671), "2.4 km");
    }

    #[test]
    fn test_compass_points() {
        assert_eq!(CompassPoint::from_bearing(0.0), CompassPoint::N);
        assert_eq!(CompassPoint::from_bearing(22.0), CompassPoint::N);
        assert_eq!(CompassPoint::from_bearing(46.0), CompassPoint::NE);
        assert_eq!(CompassPoint::from_bearing(90.0), CompassPoint::E);
        assert_eq!(CompassPoint::from_bearing(135.0), CompassPoint::SE);
        assert_eq!(CompassPoint::from_bearing(180.0), CompassPoint::S);
        assert_eq!(CompassPoint::from_bearing(225.0), CompassPoint::SW);
        assert_eq!(CompassPoint::from_bearing(270.0), CompassPoint::W);
        assert_eq!(CompassPoint::from_bearing(315.0), CompassPoint::NW);
        assert_eq!(CompassPoint::from_bearing(359.0), CompassPoint::N);
        assert_eq!(format!("{}", CompassPoint::SE), "SE");
    }
}
