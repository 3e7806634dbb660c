//! The persisted vibrate-on-disconnect flag.
//!
//! The companion app sends `{KEY_VIBRATE: "on" | "off"}`. The value is
//! written through to the durable store and read back on the next start.

use serde::{Deserialize, Serialize};

use crate::host::KeyValueStore;

/// Storage slot and message key for the vibrate flag
pub const KEY_VIBRATE: u32 = 0;

/// Flag value used when nothing has been persisted yet
pub const DEFAULT_VIBRATE: bool = true;

/// Inbound configuration message: one key and a string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMessage {
    /// Setting slot, e.g. [`KEY_VIBRATE`]
    pub key: u32,
    /// Raw value as sent by the companion app
    pub value: String,
}

impl ConfigMessage {
    /// Message setting `key` to `value`.
    pub fn new(key: u32, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    /// Message setting the vibrate flag.
    pub fn vibrate(value: impl Into<String>) -> Self {
        Self::new(KEY_VIBRATE, value)
    }
}

/// Owns the vibrate flag and keeps it in sync with durable storage.
#[derive(Debug)]
pub struct SettingsStore<S> {
    store: S,
    vibrate_enabled: bool,
    default_vibrate: bool,
}

impl<S: KeyValueStore> SettingsStore<S> {
    /// Wrap a store. The flag holds `default_vibrate` until [`load`](Self::load).
    pub fn new(store: S, default_vibrate: bool) -> Self {
        Self {
            store,
            vibrate_enabled: default_vibrate,
            default_vibrate,
        }
    }

    /// Read the persisted flag, falling back to the default.
    pub fn load(&mut self) -> bool {
        self.vibrate_enabled = match self.store.read_bool(KEY_VIBRATE) {
            Ok(Some(value)) => value,
            Ok(None) => {
                tracing::debug!(
                    "No persisted vibrate setting, using default {}",
                    self.default_vibrate
                );
                self.default_vibrate
            }
            Err(e) => {
                tracing::warn!("Failed to read vibrate setting: {}", e);
                self.default_vibrate
            }
        };
        tracing::info!("Vibrate on disconnect: {}", self.vibrate_enabled);
        self.vibrate_enabled
    }

    /// Apply a configuration message and return the resulting flag.
    ///
    /// Only `"on"` and `"off"` for [`KEY_VIBRATE`] are recognized. Anything
    /// else is dropped. A recognized value is persisted before the in-memory
    /// flag changes; if the write fails the flag is left as it was.
    pub fn apply(&mut self, message: &ConfigMessage) -> bool {
        if message.key != KEY_VIBRATE {
            tracing::debug!("Ignoring config message with unknown key {}", message.key);
            return self.vibrate_enabled;
        }

        let value = match message.value.as_str() {
            "on" => true,
            "off" => false,
            other => {
                tracing::debug!("Ignoring vibrate value '{}'", other);
                return self.vibrate_enabled;
            }
        };

        match self.store.write_bool(KEY_VIBRATE, value) {
            Ok(()) => {
                self.vibrate_enabled = value;
                tracing::info!("Vibrate on disconnect set to {}", value);
            }
            Err(e) => tracing::warn!("Failed to persist vibrate setting: {}", e),
        }
        self.vibrate_enabled
    }

    /// Current in-memory flag.
    pub fn vibrate_enabled(&self) -> bool {
        self.vibrate_enabled
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Take back the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::Error;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn read_bool(&self, _key: u32) -> Result<Option<bool>, Error> {
            Err(Error::Storage("flash offline".to_string()))
        }

        fn write_bool(&mut self, _key: u32, _value: bool) -> Result<(), Error> {
            Err(Error::Storage("flash offline".to_string()))
        }
    }

    /// Simulate a restart: hand the store to a fresh settings instance.
    fn restart(settings: SettingsStore<MemoryStore>) -> SettingsStore<MemoryStore> {
        let mut fresh = SettingsStore::new(settings.into_store(), DEFAULT_VIBRATE);
        fresh.load();
        fresh
    }

    #[test]
    fn test_load_default_when_unset() {
        let mut settings = SettingsStore::new(MemoryStore::new(), true);
        assert!(settings.load());

        let mut settings = SettingsStore::new(MemoryStore::new(), false);
        assert!(!settings.load());
    }

    #[test]
    fn test_off_survives_restart() {
        let mut settings = SettingsStore::new(MemoryStore::new(), true);
        settings.load();
        assert!(!settings.apply(&ConfigMessage::vibrate("off")));

        let mut settings = restart(settings);
        assert!(!settings.load());
    }

    #[test]
    fn test_on_survives_restart() {
        let mut settings = SettingsStore::new(MemoryStore::new(), false);
        settings.load();
        assert!(settings.apply(&ConfigMessage::vibrate("on")));

        let settings = restart(settings);
        assert!(settings.vibrate_enabled());
    }

    #[test]
    fn test_unknown_value_is_ignored() {
        let mut settings = SettingsStore::new(MemoryStore::new(), true);
        settings.load();
        settings.apply(&ConfigMessage::vibrate("off"));

        assert!(!settings.apply(&ConfigMessage::vibrate("maybe")));
        assert!(!settings.apply(&ConfigMessage::vibrate("ON")));
        assert_eq!(settings.store().read_bool(KEY_VIBRATE).unwrap(), Some(false));
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let mut settings = SettingsStore::new(MemoryStore::new(), true);
        settings.load();

        assert!(settings.apply(&ConfigMessage::new(7, "off")));
        assert_eq!(settings.store().read_bool(KEY_VIBRATE).unwrap(), None);
    }

    #[test]
    fn test_storage_failures_keep_flag() {
        let mut settings = SettingsStore::new(FailingStore, true);
        assert!(settings.load());
        assert!(settings.apply(&ConfigMessage::vibrate("off")));
        assert!(settings.vibrate_enabled());
    }
}
