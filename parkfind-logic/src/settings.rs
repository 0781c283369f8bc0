use serde::{Deserialize, Serialize};

use crate::{
    prelude::*,
    store::{ACCURACY_KEY, HAPTIC_KEY, KeyValueStore, read_value, write_value},
};

/// User preferences from the settings screen. Actually vibrating the
/// device and choosing provider accuracy modes is the platform layer's
/// job; the logic crate persists the toggles and feeds `high_accuracy`
/// into location requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub haptic_feedback: bool,
    pub high_accuracy: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            haptic_feedback: true,
            high_accuracy: true,
        }
    }
}

impl AppSettings {
    /// Each toggle lives under its own key; missing or unreadable entries
    /// fall back to the defaults.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let defaults = Self::default();
        Self {
            haptic_feedback: read_value(store, HAPTIC_KEY).unwrap_or(defaults.haptic_feedback),
            high_accuracy: read_value(store, ACCURACY_KEY).unwrap_or(defaults.high_accuracy),
        }
    }

    pub fn save_haptic_feedback(store: &impl KeyValueStore, value: bool) -> Result {
        write_value(store, HAPTIC_KEY, &value)
    }

    pub fn save_high_accuracy(store: &impl KeyValueStore, value: bool) -> Result {
        write_value(store, ACCURACY_KEY, &value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_defaults_on_empty_store() {
        let store = MemoryStore::default();
        assert_eq!(AppSettings::load(&store), AppSettings::default());
        assert!(AppSettings::default().haptic_feedback);
        assert!(AppSettings::default().high_accuracy);
    }

    #[test]
    fn test_saved_toggles_load_back() {
        let store = MemoryStore::default();
        AppSettings::save_haptic_feedback(&store, false).unwrap();
        AppSettings::save_high_accuracy(&store, false).unwrap();

        let settings = AppSettings::load(&store);
        assert!(!settings.haptic_feedback);
        assert!(!settings.high_accuracy);

        // Stored as plain JSON booleans under their own keys
        assert_eq!(store.get(HAPTIC_KEY), Some(json!(false)));
        assert_eq!(store.get(ACCURACY_KEY), Some(json!(false)));
    }

    #[test]
    fn test_unreadable_toggle_falls_back() {
        let store = MemoryStore::default();
        store.set(HAPTIC_KEY, json!("yes")).unwrap();
        let settings = AppSettings::load(&store);
        assert!(settings.haptic_feedback);
    }
}
