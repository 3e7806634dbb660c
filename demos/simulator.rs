//! Run the watchface in a terminal.
//!
//! Run with:
//! ```sh
//! RUST_LOG=yaswf=debug cargo run --example simulator --features full -- face.yaml
//! ```
//!
//! Then type commands on stdin:
//!
//! ```text
//! battery 42          battery at 42%, unplugged
//! battery 80 plugged  battery at 80%, charging
//! bt off | bt on      phone disconnects / reconnects
//! vibrate on|off      companion app setting
//! config <payload>    raw settings page response, e.g. %7B%22vibrate%22%3A%22off%22%7D
//! quit
//! ```
//!
//! The final frame is printed on exit.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use yaswf::companion::parse_webview_response;
use yaswf::sim::{SimControls, SimHost};
use yaswf::store::JsonFileStore;
use yaswf::{
    spawn_minute_ticker, BatteryStatus, ClockSource, ConfigMessage, DisplayController, Event,
    FaceConfig, FaceRuntime, SystemClock,
};

/// Translate one stdin line into an event.
///
/// Battery and Bluetooth commands also update `controls`, so the face reads the
/// same state when it polls on the half hour.
fn parse_command(line: &str, controls: &SimControls) -> Result<Option<Event>, String> {
    let mut words = line.split_whitespace();
    let event = match (words.next(), words.next(), words.next()) {
        (None, _, _) => return Ok(None),
        (Some("battery"), Some(level), plugged) => {
            let level: u8 = level
                .parse()
                .map_err(|_| format!("bad battery level '{}'", level))?;
            controls.battery_changed(BatteryStatus::new(level, plugged == Some("plugged")))
        }
        (Some("bt"), Some("on"), _) => controls.bluetooth_changed(true),
        (Some("bt"), Some("off"), _) => controls.bluetooth_changed(false),
        (Some("vibrate"), Some(value), _) => Event::Config(ConfigMessage::vibrate(value)),
        (Some("config"), Some(payload), _) => match parse_webview_response(payload) {
            Ok(Some(message)) => Event::Config(message),
            Ok(None) => return Ok(None),
            Err(e) => return Err(e.to_string()),
        },
        (Some("quit"), _, _) => Event::Shutdown,
        _ => return Err(format!("unknown command '{}'", line.trim())),
    };
    Ok(Some(event))
}

#[tokio::main]
async fn main() -> Result<(), yaswf::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("yaswf=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => FaceConfig::load_or_default(path),
        None => FaceConfig::default(),
    };

    let clock = SystemClock::new(config.clock_24h.unwrap_or(true)).with_timezone(config.tz());
    let mut host = SimHost::new();
    host.set_now(clock.now());
    host.set_clock_24h(clock.is_24h_style());
    let controls = host.controls();

    let store = JsonFileStore::open(&config.store_path)?;
    let face = DisplayController::with_config(host, store, &config);
    let (runtime, events) = FaceRuntime::new(face);

    spawn_minute_ticker(events.clone(), clock);

    let face = tokio::spawn(runtime.run());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line, &controls) {
            Ok(Some(event)) => {
                let quit = matches!(event, Event::Shutdown);
                events.send(event)?;
                if quit {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => eprintln!("{}", e),
        }
    }
    // The ticker holds a sender too, so end the loop explicitly on EOF
    let _ = events.send(Event::Shutdown);

    let face = face
        .await
        .map_err(|e| yaswf::Error::Channel(e.to_string()))?;
    println!("{}", face.host().describe());
    Ok(())
}
