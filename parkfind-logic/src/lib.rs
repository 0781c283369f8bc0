mod compass;
mod geo;
mod location;
mod maps;
mod settings;
mod state;
mod store;
mod tracker;

pub use compass::{HeadingSample, HeadingSensor, relative_rotation};
pub use geo::{BearingResult, CompassPoint, Coordinate, format_distance};
pub use location::{LocationService, PositionFix, UtcDT};
pub use maps::{apple_maps_url, geo_uri, google_maps_url};
pub use settings::AppSettings;
pub use state::TrackerUiState;
pub use store::{KeyValueStore, SPOT_KEY};
pub use tracker::{HEADING_SAMPLE_INTERVAL, Tracker, UpdateNotifier};

pub mod prelude {
    use anyhow::Error as AnyhowError;
    use std::result::Result as StdResult;
    pub type Result<T = (), E = AnyhowError> = StdResult<T, E>;
    pub use anyhow::Context;
}
