//! In-memory host for running the face off-device.
//!
//! [`SimHost`] implements every [`crate::host`] capability and records what the
//! face did, so tests and the simulator can inspect the current frame.
//!
//! ```
//! use yaswf::sim::SimHost;
//! use yaswf::store::MemoryStore;
//! use yaswf::{BatteryStatus, DisplayController, Region};
//!
//! let mut host = SimHost::new();
//! host.set_battery(BatteryStatus::new(80, false));
//!
//! let mut face = DisplayController::new(host, MemoryStore::new());
//! face.start();
//! assert_eq!(face.host().text(Region::Battery), Some("80%"));
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, FixedOffset, TimeZone};

use crate::controller::Event;
use crate::host::{BatterySource, BluetoothSource, ClockSource, Haptics, RenderSurface};
use crate::layout::{Icon, Layout, Region};
use crate::status::{BatteryStatus, VibePattern};

/// State the face reads back with `now` and `peek`.
#[derive(Debug, Clone, Copy)]
struct DeviceState {
    now: DateTime<FixedOffset>,
    clock_24h: bool,
    battery: BatteryStatus,
    connected: bool,
}

/// Shared handle to a [`SimHost`]'s clock, battery and link state.
///
/// The host is moved into the controller (and possibly a runtime task), so
/// whoever plays the device keeps one of these to change what the face sees
/// when it polls. Pair every push event with the matching update, as a real
/// device would:
///
/// ```
/// use yaswf::sim::SimHost;
/// use yaswf::store::MemoryStore;
/// use yaswf::{BatteryStatus, DisplayController, Region};
///
/// let host = SimHost::new();
/// let controls = host.controls();
/// let mut face = DisplayController::new(host, MemoryStore::new());
/// face.start();
///
/// face.handle(controls.battery_changed(BatteryStatus::new(42, true)));
/// assert_eq!(face.host().text(Region::Battery), Some("42%"));
/// ```
#[derive(Debug, Clone)]
pub struct SimControls {
    state: Arc<Mutex<DeviceState>>,
}

impl SimControls {
    fn lock(&self) -> MutexGuard<'_, DeviceState> {
        // Fields are written whole, so poisoning is harmless
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Set the wall-clock time the face reads.
    pub fn set_now(&self, now: DateTime<FixedOffset>) {
        self.lock().now = now;
    }

    /// Set the user's 12h/24h preference.
    pub fn set_clock_24h(&self, clock_24h: bool) {
        self.lock().clock_24h = clock_24h;
    }

    /// Set the charge state returned by [`BatterySource::peek`].
    pub fn set_battery(&self, battery: BatteryStatus) {
        self.lock().battery = battery;
    }

    /// Set the link state returned by [`BluetoothSource::peek`].
    pub fn set_connected(&self, connected: bool) {
        self.lock().connected = connected;
    }

    /// Update the charge state and return the matching push event.
    pub fn battery_changed(&self, battery: BatteryStatus) -> Event {
        self.set_battery(battery);
        Event::BatteryChanged(battery)
    }

    /// Update the link state and return the matching push event.
    pub fn bluetooth_changed(&self, connected: bool) -> Event {
        self.set_connected(connected);
        Event::BluetoothChanged(connected)
    }

    /// Current simulated time.
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.lock().now
    }

    /// Current charge state.
    pub fn battery(&self) -> BatteryStatus {
        self.lock().battery
    }

    /// Current link state.
    pub fn connected(&self) -> bool {
        self.lock().connected
    }
}

/// Simulated device.
///
/// Clones share one [`SimControls`] state.
#[derive(Debug, Clone)]
pub struct SimHost {
    controls: SimControls,
    layout: Option<Layout>,
    texts: BTreeMap<Region, String>,
    icons: BTreeMap<Region, Icon>,
    vibrations: Vec<VibePattern>,
    screens_created: u32,
    screens_destroyed: u32,
}

impl SimHost {
    /// A connected, half-charged device at 2026-01-05 12:00 UTC with a 24h clock.
    pub fn new() -> Self {
        let now = FixedOffset::east_opt(0)
            .and_then(|utc| utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).single())
            .unwrap_or_else(|| chrono::Utc::now().fixed_offset());

        let state = DeviceState {
            now,
            clock_24h: true,
            battery: BatteryStatus::new(50, false),
            connected: true,
        };

        Self {
            controls: SimControls {
                state: Arc::new(Mutex::new(state)),
            },
            layout: None,
            texts: BTreeMap::new(),
            icons: BTreeMap::new(),
            vibrations: Vec::new(),
            screens_created: 0,
            screens_destroyed: 0,
        }
    }

    /// Handle for changing device state after the host has been moved.
    pub fn controls(&self) -> SimControls {
        self.controls.clone()
    }

    /// Set the wall-clock time the face reads.
    pub fn set_now(&mut self, now: DateTime<FixedOffset>) {
        self.controls.set_now(now);
    }

    /// Set the user's 12h/24h preference.
    pub fn set_clock_24h(&mut self, clock_24h: bool) {
        self.controls.set_clock_24h(clock_24h);
    }

    /// Set the charge state returned by [`BatterySource::peek`].
    pub fn set_battery(&mut self, battery: BatteryStatus) {
        self.controls.set_battery(battery);
    }

    /// Set the link state returned by [`BluetoothSource::peek`].
    pub fn set_connected(&mut self, connected: bool) {
        self.controls.set_connected(connected);
    }

    /// Current text of a region, if the screen exists and it was set.
    pub fn text(&self, region: Region) -> Option<&str> {
        self.texts.get(&region).map(String::as_str)
    }

    /// Icon currently shown in a region.
    pub fn icon(&self, region: Region) -> Option<Icon> {
        self.icons.get(&region).copied()
    }

    /// Every pattern played so far, oldest first.
    pub fn vibrations(&self) -> &[VibePattern] {
        &self.vibrations
    }

    /// Layout passed to the live screen, if any.
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Number of `create_screen` calls so far.
    pub fn screens_created(&self) -> u32 {
        self.screens_created
    }

    /// Number of `destroy_screen` calls so far.
    pub fn screens_destroyed(&self) -> u32 {
        self.screens_destroyed
    }

    /// One-line summary of the visible frame.
    pub fn describe(&self) -> String {
        let bt = if self.icon(Region::BluetoothIcon).is_some() {
            "BT✗"
        } else {
            "BT "
        };
        let charge = if self.icon(Region::ChargeIcon).is_some() {
            "⚡"
        } else {
            " "
        };
        format!(
            "[{} {} {:>4}] {} | {}",
            bt,
            charge,
            self.text(Region::Battery).unwrap_or(""),
            self.text(Region::Time).unwrap_or(""),
            self.text(Region::Date).unwrap_or(""),
        )
    }
}

impl Default for SimHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for SimHost {
    fn create_screen(&mut self, layout: &Layout) {
        self.layout = Some(layout.clone());
        self.texts.clear();
        self.icons.clear();
        for region in Region::ALL {
            if let Some(text) = Layout::placeholder(region) {
                self.texts.insert(region, text.to_string());
            }
        }
        self.screens_created += 1;
    }

    fn set_text(&mut self, region: Region, text: &str) {
        if self.layout.is_none() {
            tracing::warn!("set_text({:?}) with no screen", region);
            return;
        }
        self.texts.insert(region, text.to_string());
    }

    fn set_icon(&mut self, region: Region, icon: Option<Icon>) {
        if self.layout.is_none() {
            tracing::warn!("set_icon({:?}) with no screen", region);
            return;
        }
        match icon {
            Some(icon) => self.icons.insert(region, icon),
            None => self.icons.remove(&region),
        };
    }

    fn destroy_screen(&mut self) {
        self.layout = None;
        self.texts.clear();
        self.icons.clear();
        self.screens_destroyed += 1;
    }
}

impl ClockSource for SimHost {
    fn now(&self) -> DateTime<FixedOffset> {
        self.controls.now()
    }

    fn is_24h_style(&self) -> bool {
        self.controls.lock().clock_24h
    }
}

impl BatterySource for SimHost {
    fn peek(&self) -> BatteryStatus {
        self.controls.battery()
    }
}

impl BluetoothSource for SimHost {
    fn peek(&self) -> bool {
        self.controls.connected()
    }
}

impl Haptics for SimHost {
    fn vibrate(&mut self, pattern: &VibePattern) {
        tracing::debug!("bzzt {:?}", pattern.durations_ms);
        self.vibrations.push(*pattern);
    }
}
