//! Battery and Bluetooth status presentation.
//!
//! Maps power and radio snapshots to what the face shows, and decides when a
//! Bluetooth drop is worth a vibration.
//!
//! The buzz is suppressed while the watch is plugged in (it is most likely
//! sitting on the charger) and when the user has muted it.

use serde::{Deserialize, Serialize};

/// Host-reported charge state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryStatus {
    /// Charge level, 0-100
    pub charge_percent: u8,
    /// Whether external power is connected
    pub is_plugged: bool,
}

impl BatteryStatus {
    /// Snapshot of a charge level and plug state.
    pub fn new(charge_percent: u8, is_plugged: bool) -> Self {
        Self {
            charge_percent,
            is_plugged,
        }
    }
}

/// Battery part of the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatteryDisplay {
    /// `"<n>%"`
    pub percent_text: String,
    /// Lightning bolt visible
    pub show_charging_icon: bool,
}

/// Bluetooth part of the display plus the haptic decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BluetoothDisplay {
    /// Crossed-out phone icon visible
    pub show_disconnect_icon: bool,
    /// Play [`DISCONNECT_VIBE`] now
    pub should_vibrate: bool,
}

/// Alternating on/off vibration durations, starting with "on".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VibePattern {
    /// Segment lengths in milliseconds
    pub durations_ms: &'static [u32],
}

impl VibePattern {
    /// Total duration in milliseconds.
    pub fn total_ms(&self) -> u32 {
        self.durations_ms.iter().sum()
    }
}

/// Played when the phone disconnects: on 500 ms, off 200 ms, on 500 ms.
pub const DISCONNECT_VIBE: VibePattern = VibePattern {
    durations_ms: &[500, 200, 500],
};

/// Turns status snapshots into display state.
///
/// Keeps the last plugged-in state seen so the disconnect rule can consult it.
#[derive(Debug, Clone, Default)]
pub struct StatusPresenter {
    last_plugged: bool,
}

impl StatusPresenter {
    /// Presenter that assumes the watch is unplugged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plugged-in state from the most recent battery update.
    pub fn last_plugged(&self) -> bool {
        self.last_plugged
    }

    /// Present a battery update and remember its plugged-in state.
    pub fn on_battery_changed(&mut self, state: BatteryStatus) -> BatteryDisplay {
        self.last_plugged = state.is_plugged;

        BatteryDisplay {
            percent_text: format!("{}%", state.charge_percent.min(100)),
            show_charging_icon: state.is_plugged,
        }
    }

    /// Decide icon and vibration for a Bluetooth state.
    ///
    /// | connected | plugged | vibrate | icon  | buzz  |
    /// |-----------|---------|---------|-------|-------|
    /// | true      | any     | any     | false | false |
    /// | false     | true    | any     | true  | false |
    /// | false     | false   | true    | true  | true  |
    /// | false     | false   | false   | true  | false |
    pub fn on_bluetooth_changed(
        connected: bool,
        last_plugged: bool,
        vibrate_enabled: bool,
    ) -> BluetoothDisplay {
        BluetoothDisplay {
            show_disconnect_icon: !connected,
            should_vibrate: !connected && !last_plugged && vibrate_enabled,
        }
    }
}
