use log::warn;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{geo::Coordinate, prelude::*};

/// Key the saved spot lives under. The key names are load-bearing:
/// values written by earlier releases must keep loading.
pub const SPOT_KEY: &str = "carLocation";
pub const HAPTIC_KEY: &str = "hapticFeedback";
pub const ACCURACY_KEY: &str = "highAccuracy";

/// Minimal "read/write one named value" persistence capability. The
/// platform shell backs this with whatever store it has; tests use an
/// in-memory map.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value) -> Result;
    fn remove(&self, key: &str) -> Result;
    /// Remove every stored value.
    fn clear(&self) -> Result;
}

/// Read and deserialize one value. An unreadable entry is treated as
/// absent rather than an error.
pub fn read_value<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let value = store.get(key)?;
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(why) => {
            warn!("Discarding unreadable value under {key:?}: {why}");
            None
        }
    }
}

pub fn write_value<T: Serialize>(store: &impl KeyValueStore, key: &str, value: &T) -> Result {
    let value = serde_json::to_value(value).context("Failed to serialize value for store")?;
    store.set(key, value)
}

/// Load the persisted spot, if any. Stored as
/// `{"latitude": <float>, "longitude": <float>}`, no versioning.
pub fn read_spot(store: &impl KeyValueStore) -> Option<Coordinate> {
    read_value(store, SPOT_KEY)
}

pub fn write_spot(store: &impl KeyValueStore, spot: &Coordinate) -> Result {
    write_value(store, SPOT_KEY, spot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_spot_round_trip() {
        let store = MemoryStore::default();
        let spot = Coordinate::new(48.8566, 2.3522);

        write_spot(&store, &spot).unwrap();

        // The on-disk shape is exactly the two-field object
        assert_eq!(
            store.get(SPOT_KEY),
            Some(json!({"latitude": 48.8566, "longitude": 2.3522})),
        );
        assert_eq!(read_spot(&store), Some(spot));
    }

    #[test]
    fn test_missing_spot_reads_as_none() {
        let store = MemoryStore::default();
        assert_eq!(read_spot(&store), None);
    }

    #[test]
    fn test_unreadable_spot_reads_as_none() {
        let store = MemoryStore::default();
        store.set(SPOT_KEY, json!("not a coordinate")).unwrap();
        assert_eq!(read_spot(&store), None);
    }

    #[test]
    fn test_remove_and_clear() {
        let store = MemoryStore::default();
        write_spot(&store, &Coordinate::new(1.0, 2.0)).unwrap();
        write_value(&store, HAPTIC_KEY, &false).unwrap();

        store.remove(SPOT_KEY).unwrap();
        assert_eq!(read_spot(&store), None);
        assert_eq!(read_value::<bool>(&store, HAPTIC_KEY), Some(false));

        store.clear().unwrap();
        assert_eq!(read_value::<bool>(&store, HAPTIC_KEY), None);
    }
}
