//! # yaswf
//!
//! Yet another simple watchface: a single-screen face for wrist-worn devices
//! showing the time, date, battery level, a charging bolt and a
//! Bluetooth-disconnected icon.
//!
//! The face is event-driven. The device delivers:
//! - a **tick** every minute
//! - **battery** changes (level, plugged in)
//! - **Bluetooth** connection changes
//! - **configuration** messages from the companion app (vibrate on/off)
//!
//! and the face answers by updating text and icon regions and, when the phone
//! drops while the watch is off the charger, by vibrating.
//!
//! ## Quick Start
//!
//! ```
//! use yaswf::sim::SimHost;
//! use yaswf::store::MemoryStore;
//! use yaswf::{DisplayController, Event, Icon, Region};
//!
//! let mut face = DisplayController::new(SimHost::new(), MemoryStore::new());
//! face.start();
//!
//! face.handle(Event::BluetoothChanged(false));
//! assert_eq!(face.host().icon(Region::BluetoothIcon), Some(Icon::NoBluetooth));
//! assert_eq!(face.host().vibrations().len(), 1);
//! ```
//!
//! ## Porting to a device
//!
//! Implement the traits in [`host`] for your platform:
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`RenderSurface`] | Text and bitmap widgets |
//! | [`ClockSource`] | Local time, 12h/24h preference |
//! | [`BatterySource`] | Current charge state |
//! | [`BluetoothSource`] | Current link state |
//! | [`Haptics`] | Vibration motor |
//! | [`KeyValueStore`] | Durable settings slot |
//!
//! then feed host callbacks to [`DisplayController::handle`].
//!
//! ## Feature Flags
//!
//! - `config` - YAML face configuration and named timezones
//! - `runtime` - tokio channel event loop and minute ticker
//! - `full` - All features

pub mod clock;
pub mod companion;
mod config;
mod controller;
mod error;
pub mod host;
pub mod layout;
mod settings;
pub mod sim;
mod status;
pub mod store;

pub use clock::{ClockFormatter, SystemClock, TimeDisplay, MAX_DATE_LEN};
pub use config::FaceConfig;
pub use controller::{DisplayController, Event, Lifecycle, BATTERY_REFRESH_MINUTES};
pub use error::Error;
pub use host::{
    BatterySource, BluetoothSource, ClockSource, Haptics, Host, KeyValueStore, RenderSurface,
};
pub use layout::{Icon, Layout, Region, Shape};
pub use settings::{ConfigMessage, SettingsStore, DEFAULT_VIBRATE, KEY_VIBRATE};
pub use status::{
    BatteryDisplay, BatteryStatus, BluetoothDisplay, StatusPresenter, VibePattern,
    DISCONNECT_VIBE,
};

// Optional modules
#[cfg(feature = "runtime")]
pub mod runtime;
#[cfg(feature = "runtime")]
pub use runtime::{spawn_minute_ticker, EventSender, FaceRuntime};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(KEY_VIBRATE, 0);
        assert_eq!(BATTERY_REFRESH_MINUTES, 30);
        assert_eq!(MAX_DATE_LEN, 200);
        assert_eq!(DISCONNECT_VIBE.durations_ms, &[500, 200, 500]);
    }
}
