use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Convenience alias for UTC DT
pub type UtcDT = DateTime<Utc>;

/// A single position reading from the platform's location provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    pub coordinate: Coordinate,
    /// Horizontal accuracy radius in meters, when the provider reports one.
    pub accuracy_m: Option<f64>,
    /// When the fix was taken. In-memory only; the persisted spot stays a
    /// bare coordinate.
    pub time: UtcDT,
}

impl PositionFix {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            accuracy_m: None,
            time: Utc::now(),
        }
    }
}

/// One-shot position acquisition. Permission prompts, timeouts and error
/// surfacing all live behind the implementation; `None` means no usable
/// fix was produced.
pub trait LocationService: Send + Sync {
    fn get_fix(&self, high_accuracy: bool) -> Option<PositionFix>;
}
