use serde::Serialize;

use crate::{
    compass::{HeadingSample, relative_rotation},
    geo::{BearingResult, CompassPoint, Coordinate},
    location::PositionFix,
    settings::AppSettings,
};

/// The mutable state of a session. Everything derived (distance,
/// bearing, rotation, labels) is recomputed from the pure geometry
/// functions each time a snapshot is taken; nothing is cached, most
/// recent value wins.
#[derive(Debug, Default)]
pub struct TrackerState {
    pub(crate) fix: Option<PositionFix>,
    pub(crate) spot: Option<Coordinate>,
    pub(crate) heading: Option<HeadingSample>,
    pub(crate) settings: AppSettings,
}

impl TrackerState {
    /// Distance and bearing from the current fix to the saved spot, when
    /// both ends are known.
    pub fn track(&self) -> Option<BearingResult> {
        let fix = self.fix?;
        let spot = self.spot?;
        Some(fix.coordinate.track_to(&spot))
    }

    pub fn rotation_deg(&self) -> f64 {
        relative_rotation(self.track().map(|track| track.bearing_deg), self.heading)
    }

    pub fn as_ui_state(&self) -> TrackerUiState {
        let track = self.track();
        TrackerUiState {
            fix: self.fix,
            spot: self.spot,
            distance_km: track.map(|track| track.distance_km),
            bearing_deg: track.map(|track| track.bearing_deg),
            distance_label: track.map(|track| track.distance_label()),
            compass_point: track.map(|track| track.compass_point()),
            rotation_deg: self.rotation_deg(),
            settings: self.settings,
        }
    }
}

/// Snapshot handed to the UI layer whenever it re-renders.
#[derive(Debug, Clone, Serialize)]
pub struct TrackerUiState {
    pub fix: Option<PositionFix>,
    pub spot: Option<Coordinate>,
    pub distance_km: Option<f64>,
    pub bearing_deg: Option<f64>,
    pub distance_label: Option<String>,
    pub compass_point: Option<CompassPoint>,
    pub rotation_deg: f64,
    pub settings: AppSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_spot_means_no_track_and_zero_rotation() {
        let state = TrackerState {
            fix: Some(PositionFix::new(Coordinate::new(48.8566, 2.3522))),
            heading: Some(HeadingSample::new(0.0, 1.0)),
            ..TrackerState::default()
        };

        assert!(state.track().is_none());
        assert_eq!(state.rotation_deg(), 0.0);

        let ui = state.as_ui_state();
        assert!(ui.distance_label.is_none());
        assert!(ui.compass_point.is_none());
        assert_eq!(ui.rotation_deg, 0.0);
    }

    #[test]
    fn test_snapshot_derives_everything() {
        let state = TrackerState {
            fix: Some(PositionFix::new(Coordinate::new(48.8566, 2.3522))),
            spot: Some(Coordinate::new(45.7640, 4.8357)),
            heading: None,
            ..TrackerState::default()
        };

        let ui = state.as_ui_state();
        let bearing = ui.bearing_deg.unwrap();
        assert!((ui.distance_km.unwrap() - 391.5).abs() < 0.1);
        assert!((bearing - 150.5).abs() < 0.1);
        assert_eq!(ui.distance_label.as_deref(), Some("391.5 km"));
        assert_eq!(ui.compass_point, Some(CompassPoint::SE));
        // No heading sample yet: rotation falls back to the raw bearing
        assert_eq!(ui.rotation_deg, bearing);
    }

    #[test]
    fn test_rotation_tracks_heading() {
        let spot = Coordinate::new(0.0, 1.0);
        let state = TrackerState {
            fix: Some(PositionFix::new(Coordinate::new(0.0, 0.0))),
            spot: Some(spot),
            // Facing east (heading 90°), target due east (bearing 90°)
            heading: Some(HeadingSample::new(0.0, 1.0)),
            ..TrackerState::default()
        };

        assert!((state.rotation_deg() - 0.0).abs() < 1e-9);
    }
}
