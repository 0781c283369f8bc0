use std::time::Duration;

use log::warn;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::{
    compass::HeadingSensor,
    geo::Coordinate,
    location::LocationService,
    prelude::*,
    settings::AppSettings,
    state::{TrackerState, TrackerUiState},
    store::{self, KeyValueStore},
};

/// How often the heading sensor is polled.
pub const HEADING_SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

/// Fire-and-forget signal telling the UI layer to take a fresh
/// [TrackerUiState] snapshot.
pub trait UpdateNotifier: Send + Sync {
    fn notify(&self);
}

/// A running session: owns the mutable state, reads positions through
/// [LocationService], polls a [HeadingSensor], and persists the spot and
/// settings through a [KeyValueStore].
pub struct Tracker<L: LocationService, H: HeadingSensor, S: KeyValueStore, U: UpdateNotifier> {
    state: RwLock<TrackerState>,
    location: L,
    heading: H,
    store: S,
    notifier: U,
    interval: Duration,
    cancel: CancellationToken,
}

impl<L: LocationService, H: HeadingSensor, S: KeyValueStore, U: UpdateNotifier>
    Tracker<L, H, S, U>
{
    /// Create a session, loading the persisted spot and settings.
    pub fn new(interval: Duration, location: L, heading: H, store: S, notifier: U) -> Self {
        let state = TrackerState {
            spot: store::read_spot(&store),
            settings: AppSettings::load(&store),
            ..TrackerState::default()
        };

        Self {
            state: RwLock::new(state),
            location,
            heading,
            store,
            notifier,
            interval,
            cancel: CancellationToken::new(),
        }
    }

    pub async fn ui_state(&self) -> TrackerUiState {
        self.state.read().await.as_ui_state()
    }

    pub async fn saved_spot(&self) -> Option<Coordinate> {
        self.state.read().await.spot
    }

    pub async fn settings(&self) -> AppSettings {
        self.state.read().await.settings
    }

    /// One-shot position request, honoring the high-accuracy preference.
    /// A provider miss keeps the previous fix in place.
    pub async fn refresh_position(&self) {
        let high_accuracy = self.state.read().await.settings.high_accuracy;
        match self.location.get_fix(high_accuracy) {
            Some(fix) => {
                self.state.write().await.fix = Some(fix);
                self.notifier.notify();
            }
            None => warn!("Location provider returned no fix"),
        }
    }

    /// Save the current position as the parked spot.
    pub async fn mark_spot(&self) -> Result {
        let mut state = self.state.write().await;
        let fix = state.fix.context("No position fix available yet")?;
        store::write_spot(&self.store, &fix.coordinate)?;
        state.spot = Some(fix.coordinate);
        drop(state);
        self.notifier.notify();
        Ok(())
    }

    /// Forget the parked spot.
    pub async fn clear_spot(&self) -> Result {
        self.store.remove(store::SPOT_KEY)?;
        self.state.write().await.spot = None;
        self.notifier.notify();
        Ok(())
    }

    /// Wipe the store and reset the spot and settings to their defaults.
    pub async fn clear_all_data(&self) -> Result {
        self.store.clear()?;
        let mut state = self.state.write().await;
        state.spot = None;
        state.settings = AppSettings::default();
        drop(state);
        self.notifier.notify();
        Ok(())
    }

    pub async fn set_haptic_feedback(&self, value: bool) -> Result {
        AppSettings::save_haptic_feedback(&self.store, value)?;
        self.state.write().await.settings.haptic_feedback = value;
        self.notifier.notify();
        Ok(())
    }

    pub async fn set_high_accuracy(&self, value: bool) -> Result {
        AppSettings::save_high_accuracy(&self.store, value)?;
        self.state.write().await.settings.high_accuracy = value;
        self.notifier.notify();
        Ok(())
    }

    /// Poll one heading sample. Returns whether the state changed.
    fn tick(&self, state: &mut TrackerState) -> bool {
        let sample = self.heading.sample();
        if sample.is_some() && sample != state.heading {
            state.heading = sample;
            true
        } else {
            false
        }
    }

    /// End the session, breaking [Tracker::main_loop].
    pub fn quit(&self) {
        self.cancel.cancel();
    }

    /// Main loop of a session: polls the heading sensor on a fixed
    /// interval and notifies the UI on every fresh sample, until
    /// cancelled.
    pub async fn main_loop(&self) {
        let mut interval = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => break,

                _ = interval.tick() => {
                    let mut state = self.state.write().await;
                    let changed = self.tick(&mut state);
                    drop(state);

                    if changed {
                        self.notifier.notify();
                    }
                }
            }
        }
    }
}
