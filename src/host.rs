//! Capabilities the face needs from the device it runs on.
//!
//! The face never touches hardware directly. A host supplies widgets, clock,
//! power and radio state, the vibration motor and a small durable store.
//! [`crate::sim::SimHost`] implements all of them in memory.

use chrono::{DateTime, FixedOffset};

use crate::layout::{Icon, Layout, Region};
use crate::status::{BatteryStatus, VibePattern};
use crate::Error;

/// Widget surface the face draws on.
///
/// Every call takes effect immediately. Setting the same content twice is
/// harmless.
pub trait RenderSurface {
    /// Allocate the window and all region widgets.
    fn create_screen(&mut self, layout: &Layout);

    /// Replace the text of a text region.
    fn set_text(&mut self, region: Region, text: &str);

    /// Show a bitmap in an icon region, or clear it with `None`.
    fn set_icon(&mut self, region: Region, icon: Option<Icon>);

    /// Release everything allocated by [`RenderSurface::create_screen`].
    fn destroy_screen(&mut self);
}

/// Wall clock and the user's clock-style preference.
pub trait ClockSource {
    /// Current local time.
    fn now(&self) -> DateTime<FixedOffset>;

    /// Whether the user prefers a 24-hour clock.
    fn is_24h_style(&self) -> bool;
}

/// Battery state (pull side; changes are pushed as events).
pub trait BatterySource {
    /// Current charge state.
    fn peek(&self) -> BatteryStatus;
}

/// Bluetooth link state (pull side; changes are pushed as events).
pub trait BluetoothSource {
    /// `true` when the phone is connected.
    fn peek(&self) -> bool;
}

/// Vibration motor.
pub trait Haptics {
    /// Play the pattern once. Does not wait for it to finish.
    fn vibrate(&mut self, pattern: &VibePattern);
}

/// Durable boolean slots keyed by a small integer.
///
/// Writes are synchronous. Callers treat them as best-effort.
pub trait KeyValueStore {
    /// Read a slot. `Ok(None)` means it was never written.
    fn read_bool(&self, key: u32) -> Result<Option<bool>, Error>;

    /// Write a slot.
    fn write_bool(&mut self, key: u32, value: bool) -> Result<(), Error>;
}

/// Everything the display controller talks to, except storage.
pub trait Host:
    RenderSurface + ClockSource + BatterySource + BluetoothSource + Haptics
{
}

impl<T> Host for T where T: RenderSurface + ClockSource + BatterySource + BluetoothSource + Haptics
{}
