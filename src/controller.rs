//! The face itself: owns formatter, presenter and settings, reacts to events.
//!
//! ```text
//!  Uninitialized ──start()──▶ Active ──stop()──▶ Destroyed
//!                              │  ▲
//!                     handle() └──┘
//! ```
//!
//! Events are handled one at a time, each to completion, which is why every
//! handler takes `&mut self` and nothing here needs a lock.

use chrono::{DateTime, FixedOffset, Timelike};

use crate::clock::ClockFormatter;
use crate::host::{BatterySource, BluetoothSource, Host, KeyValueStore};
use crate::layout::{Icon, Layout, Region};
use crate::settings::{ConfigMessage, SettingsStore};
use crate::status::{BatteryStatus, StatusPresenter, DISCONNECT_VIBE};
use crate::FaceConfig;

/// Battery is re-read on ticks whose minute is a multiple of this
pub const BATTERY_REFRESH_MINUTES: u32 = 30;

/// Something that happened on the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Minute boundary
    Tick(DateTime<FixedOffset>),
    /// Battery state changed
    BatteryChanged(BatteryStatus),
    /// Bluetooth link changed; `true` when connected
    BluetoothChanged(bool),
    /// Configuration from the companion app
    Config(ConfigMessage),
    /// Tear the face down
    Shutdown,
}

/// Lifecycle of the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, no screen yet
    Uninitialized,
    /// Screen up, handling events
    Active,
    /// Screen released; further events are ignored
    Destroyed,
}

/// Drives the host from events.
pub struct DisplayController<H, S> {
    host: H,
    settings: SettingsStore<S>,
    formatter: ClockFormatter,
    presenter: StatusPresenter,
    layout: Layout,
    compact_date: bool,
    clock_24h: Option<bool>,
    battery_refresh_minutes: u32,
    last_connected: Option<bool>,
    state: Lifecycle,
}

impl<H: Host, S: KeyValueStore> DisplayController<H, S> {
    /// Create a face with default configuration.
    pub fn new(host: H, store: S) -> Self {
        Self::with_config(host, store, &FaceConfig::default())
    }

    /// Create a face from a [`FaceConfig`].
    pub fn with_config(host: H, store: S, config: &FaceConfig) -> Self {
        let layout = Layout::for_shape(config.shape);
        Self {
            host,
            settings: SettingsStore::new(store, config.default_vibrate),
            formatter: ClockFormatter::from_locale_name(&config.locale),
            presenter: StatusPresenter::new(),
            compact_date: config.compact_date.unwrap_or(layout.shape.compact_date()),
            layout,
            clock_24h: config.clock_24h,
            battery_refresh_minutes: config.battery_refresh_minutes.max(1),
            last_connected: None,
            state: Lifecycle::Uninitialized,
        }
    }

    /// Load settings, build the screen and draw the first full frame.
    ///
    /// Does nothing unless the face is still uninitialized.
    pub fn start(&mut self) {
        if self.state != Lifecycle::Uninitialized {
            tracing::debug!("start() ignored in state {:?}", self.state);
            return;
        }

        self.settings.load();
        self.host.create_screen(&self.layout);
        self.state = Lifecycle::Active;
        tracing::info!("Face active ({:?} display)", self.layout.shape);

        // Battery first: the disconnect rule needs the plugged-in state
        let now = self.host.now();
        self.render_time(&now);
        let battery = BatterySource::peek(&self.host);
        self.render_battery(battery);
        let connected = BluetoothSource::peek(&self.host);
        self.render_bluetooth(connected);
    }

    /// Handle one event.
    pub fn handle(&mut self, event: Event) {
        if self.state != Lifecycle::Active {
            tracing::debug!("Dropping {:?} in state {:?}", event, self.state);
            return;
        }

        match event {
            Event::Tick(now) => {
                self.render_time(&now);
                if now.minute() % self.battery_refresh_minutes == 0 {
                    tracing::debug!("Periodic battery refresh at minute {}", now.minute());
                    let battery = BatterySource::peek(&self.host);
                    self.render_battery(battery);
                }
            }
            Event::BatteryChanged(status) => self.render_battery(status),
            Event::BluetoothChanged(connected) => self.render_bluetooth(connected),
            Event::Config(message) => {
                self.settings.apply(&message);
            }
            Event::Shutdown => self.stop(),
        }
    }

    /// Release the screen. Safe to call more than once or before `start()`.
    pub fn stop(&mut self) {
        match self.state {
            Lifecycle::Active => {
                self.host.destroy_screen();
                self.state = Lifecycle::Destroyed;
                tracing::info!("Face destroyed");
            }
            Lifecycle::Uninitialized => {
                tracing::debug!("stop() before start(); nothing to release");
            }
            Lifecycle::Destroyed => {}
        }
    }

    /// Current lifecycle stage.
    pub fn state(&self) -> Lifecycle {
        self.state
    }

    /// The device this face draws on.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the device.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Whether a disconnect may buzz.
    pub fn vibrate_enabled(&self) -> bool {
        self.settings.vibrate_enabled()
    }

    /// Give back the host and store.
    pub fn into_parts(self) -> (H, S) {
        (self.host, self.settings.into_store())
    }

    fn render_time(&mut self, now: &DateTime<FixedOffset>) {
        let use_24h = self.clock_24h.unwrap_or_else(|| self.host.is_24h_style());
        let display = self.formatter.format(now, use_24h, self.compact_date);
        self.host.set_text(Region::Time, &display.time_text);
        self.host.set_text(Region::Date, &display.date_text);
    }

    fn render_battery(&mut self, status: BatteryStatus) {
        let display = self.presenter.on_battery_changed(status);
        self.host.set_text(Region::Battery, &display.percent_text);
        self.host.set_icon(
            Region::ChargeIcon,
            display.show_charging_icon.then_some(Icon::Charge),
        );
    }

    fn render_bluetooth(&mut self, connected: bool) {
        let display = StatusPresenter::on_bluetooth_changed(
            connected,
            self.presenter.last_plugged(),
            self.settings.vibrate_enabled(),
        );

        self.host.set_icon(
            Region::BluetoothIcon,
            display.show_disconnect_icon.then_some(Icon::NoBluetooth),
        );

        // Buzz on the transition into "disconnected", not on repeats of it
        let repeated = self.last_connected == Some(false) && !connected;
        self.last_connected = Some(connected);

        tracing::debug!(
            "Bluetooth connected={} plugged={} vibrate={} repeated={}",
            connected,
            self.presenter.last_plugged(),
            self.settings.vibrate_enabled(),
            repeated
        );

        if display.should_vibrate && !repeated {
            self.host.vibrate(&DISCONNECT_VIBE);
        }
    }
}
