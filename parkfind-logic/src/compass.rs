use serde::{Deserialize, Serialize};

/// One raw magnetic-field reading from the device magnetometer. Only the
/// latest sample is ever kept; there is no history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingSample {
    pub x: f64,
    pub y: f64,
}

impl HeadingSample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Heading in degrees derived from the raw vector.
    ///
    /// Uses only the x/y components, no tilt compensation: the value is
    /// accurate while the device is held flat and drifts once it leaves
    /// the horizontal plane.
    pub fn heading_deg(&self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }
}

/// Continuous heading source, polled by the tracker on a fixed interval.
/// Returns the most recent sample, or `None` before the sensor has
/// produced one.
pub trait HeadingSensor: Send + Sync {
    fn sample(&self) -> Option<HeadingSample>;
}

/// Angle to rotate the needle glyph so it points from the device's
/// current facing toward the target bearing.
///
/// Deliberately unnormalized: the renderer applies it as a rotation
/// transform, where any value is equivalent modulo 360. With no target
/// set the rotation is 0 regardless of heading; with no heading sample
/// yet the rotation is the raw bearing.
pub fn relative_rotation(bearing_deg: Option<f64>, heading: Option<HeadingSample>) -> f64 {
    let Some(bearing_deg) = bearing_deg else {
        return 0.0;
    };
    let heading_deg = heading.map(|sample| sample.heading_deg()).unwrap_or(0.0);
    bearing_deg - heading_deg
}
