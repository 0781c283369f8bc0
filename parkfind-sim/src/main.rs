use std::{
    collections::HashMap,
    result::Result as StdResult,
    sync::{Arc, Mutex},
};

use anyhow::bail;
use clap::Parser;
use log::info;
use parkfind_logic::{
    Coordinate, HEADING_SAMPLE_INTERVAL, HeadingSample, HeadingSensor, KeyValueStore,
    LocationService, PositionFix, Tracker, UpdateNotifier,
};
use serde_json::Value;

type Result<T = (), E = anyhow::Error> = StdResult<T, E>;

/// Walk a simulated user back to their parked car, printing the compass
/// readout the app would render at every step.
#[derive(Parser)]
struct Args {
    /// Latitude the walk starts from
    #[arg(long, default_value_t = 48.8530)]
    lat: f64,
    /// Longitude the walk starts from
    #[arg(long, default_value_t = 2.3010)]
    lon: f64,
    /// Latitude of the parked car
    #[arg(long, default_value_t = 48.8584)]
    spot_lat: f64,
    /// Longitude of the parked car
    #[arg(long, default_value_t = 2.2945)]
    spot_lon: f64,
    /// Meters covered per step
    #[arg(long, default_value_t = 50.0)]
    step_m: f64,
    /// Give up after this many steps
    #[arg(long, default_value_t = 100)]
    max_steps: u32,
}

/// Scripted location provider: a walker that can be teleported and
/// advanced toward a target. Clones share the same position.
#[derive(Clone)]
struct Walker(Arc<Mutex<Coordinate>>);

impl Walker {
    fn new(at: Coordinate) -> Self {
        Self(Arc::new(Mutex::new(at)))
    }

    fn teleport(&self, to: Coordinate) {
        *self.0.lock().unwrap() = to;
    }

    /// Move `step_m` meters straight toward `target`, arriving exactly
    /// when the remaining distance is shorter than one step.
    fn advance_toward(&self, target: Coordinate, step_m: f64) {
        let mut here = self.0.lock().unwrap();
        let remaining_m = here.distance_km_to(&target) * 1000.0;
        if remaining_m <= step_m {
            *here = target;
            return;
        }
        let fraction = step_m / remaining_m;
        *here = Coordinate::new(
            here.latitude + (target.latitude - here.latitude) * fraction,
            here.longitude + (target.longitude - here.longitude) * fraction,
        );
    }
}

impl LocationService for Walker {
    fn get_fix(&self, _high_accuracy: bool) -> Option<PositionFix> {
        Some(PositionFix::new(*self.0.lock().unwrap()))
    }
}

/// Scripted magnetometer: reports a raw field vector for whatever
/// direction the walker is currently facing.
#[derive(Clone)]
struct FacingSensor(Arc<Mutex<f64>>);

impl FacingSensor {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(0.0)))
    }

    fn face(&self, heading_deg: f64) {
        *self.0.lock().unwrap() = heading_deg;
    }
}

impl HeadingSensor for FacingSensor {
    fn sample(&self) -> Option<HeadingSample> {
        let heading = self.0.lock().unwrap().to_radians();
        Some(HeadingSample::new(heading.cos(), heading.sin()))
    }
}

/// In-memory store; the simulated session has nothing to outlive it.
#[derive(Clone, Default)]
struct SimStore(Arc<Mutex<HashMap<String, Value>>>);

impl KeyValueStore for SimStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.0.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result {
        self.0.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result {
        self.0.lock().unwrap().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result {
        self.0.lock().unwrap().clear();
        Ok(())
    }
}

/// The readout is printed from the walk loop, so UI pokes go nowhere.
struct NullNotifier;

impl UpdateNotifier for NullNotifier {
    fn notify(&self) {}
}

/// Under ten meters counts as standing at the car.
const ARRIVAL_M: f64 = 10.0;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    colog::init();

    let args = Args::parse();
    let spot = Coordinate::new(args.spot_lat, args.spot_lon);
    let start = Coordinate::new(args.lat, args.lon);

    let walker = Walker::new(spot);
    let sensor = FacingSensor::new();

    let tracker = Arc::new(Tracker::new(
        HEADING_SAMPLE_INTERVAL,
        walker.clone(),
        sensor.clone(),
        SimStore::default(),
        NullNotifier,
    ));

    // Park the car, then start the walk from somewhere else
    tracker.refresh_position().await;
    tracker.mark_spot().await?;
    info!("Parked at {spot}");

    walker.teleport(start);
    tracker.refresh_position().await;

    let loop_tracker = tracker.clone();
    let loop_handle = tokio::spawn(async move { loop_tracker.main_loop().await });

    let mut arrived = false;
    for step in 1..=args.max_steps {
        let ui = tracker.ui_state().await;
        let (Some(distance_km), Some(bearing_deg)) = (ui.distance_km, ui.bearing_deg) else {
            bail!("Tracker lost the fix or the spot mid-walk");
        };

        info!(
            "step {step:3}: {:>8} {} (bearing {bearing_deg:5.1}°, needle {:6.1}°)",
            ui.distance_label.unwrap_or_default(),
            ui.compass_point.map(|point| point.abbreviation()).unwrap_or(""),
            ui.rotation_deg,
        );

        if distance_km * 1000.0 <= ARRIVAL_M {
            arrived = true;
            break;
        }

        // Face the car and take a step toward it
        sensor.face(bearing_deg);
        walker.advance_toward(spot, args.step_m);
        tracker.refresh_position().await;

        // Let the tracker ingest the new heading sample
        tokio::time::sleep(HEADING_SAMPLE_INTERVAL * 2).await;
    }

    tracker.quit();
    loop_handle.await?;

    if !arrived {
        bail!("Never reached the car within {} steps", args.max_steps);
    }

    info!("Arrived at the car");
    Ok(())
}
