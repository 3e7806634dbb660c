use chrono::{DateTime, FixedOffset, TimeZone};
use proptest::prelude::*;
use regex::Regex;
use yaswf::sim::SimHost;
use yaswf::store::MemoryStore;
use yaswf::{
    BatteryStatus, ClockFormatter, DisplayController, Event, Region, StatusPresenter,
};

/// Generate timestamps between 1970 and 9998 in any whole-minute UTC offset
fn timestamp_strategy() -> impl Strategy<Value = DateTime<FixedOffset>> {
    (0i64..253_370_000_000, -720i32..=840).prop_map(|(secs, offset_min)| {
        FixedOffset::east_opt(offset_min * 60)
            .unwrap()
            .timestamp_opt(secs, 0)
            .single()
            .unwrap()
    })
}

/// Property tests for time and date text
#[cfg(test)]
mod clock_format_tests {
    use super::*;

    proptest! {
        /// 24h clock text is always a valid HH:MM between 00:00 and 23:59
        #[test]
        fn test_24h_time_shape(now in timestamp_strategy(), compact in any::<bool>()) {
            let re = Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap();
            let display = ClockFormatter::default().format(&now, true, compact);
            prop_assert!(re.is_match(&display.time_text), "bad 24h text {}", display.time_text);
        }

        /// 12h clock text is always a valid HH:MM between 01:00 and 12:59
        #[test]
        fn test_12h_time_shape(now in timestamp_strategy(), compact in any::<bool>()) {
            let re = Regex::new(r"^(0[1-9]|1[0-2]):[0-5]\d$").unwrap();
            let display = ClockFormatter::default().format(&now, false, compact);
            prop_assert!(re.is_match(&display.time_text), "bad 12h text {}", display.time_text);
        }

        /// The full date is the compact date plus a space and a 4-digit year
        #[test]
        fn test_full_date_appends_year(now in timestamp_strategy(), use_24h in any::<bool>()) {
            let formatter = ClockFormatter::default();
            let compact = formatter.format(&now, use_24h, true);
            let full = formatter.format(&now, use_24h, false);

            prop_assert_eq!(&compact.time_text, &full.time_text);
            let suffix = full.date_text.strip_prefix(compact.date_text.as_str());
            prop_assert!(suffix.is_some(), "{} vs {}", full.date_text, compact.date_text);

            let year = suffix.unwrap();
            let re = Regex::new(r"^ \d{4}$").unwrap();
            prop_assert!(re.is_match(year), "bad year suffix '{}'", year);
        }

        /// Date text never exceeds the display buffer
        #[test]
        fn test_date_length_bounded(now in timestamp_strategy()) {
            let display = ClockFormatter::from_locale_name("de_DE").format(&now, true, false);
            prop_assert!(display.date_text.chars().count() <= yaswf::MAX_DATE_LEN);
        }
    }
}

/// Property tests for status presentation
#[cfg(test)]
mod status_tests {
    use super::*;

    proptest! {
        /// Percentage text is the number followed by '%'
        #[test]
        fn test_percent_text(percent in 0u8..=100, plugged in any::<bool>()) {
            let mut presenter = StatusPresenter::new();
            let display = presenter.on_battery_changed(BatteryStatus::new(percent, plugged));
            prop_assert_eq!(display.percent_text, format!("{}%", percent));
            prop_assert_eq!(display.show_charging_icon, plugged);
            prop_assert_eq!(presenter.last_plugged(), plugged);
        }

        /// Only a disconnect while unplugged with vibration enabled buzzes
        #[test]
        fn test_vibrate_rule(connected in any::<bool>(), plugged in any::<bool>(), vibrate in any::<bool>()) {
            let display = StatusPresenter::on_bluetooth_changed(connected, plugged, vibrate);
            prop_assert_eq!(display.show_disconnect_icon, !connected);
            prop_assert_eq!(display.should_vibrate, !connected && !plugged && vibrate);
        }

        /// Ticks refresh the battery exactly on minutes 0 and 30
        #[test]
        fn test_tick_battery_refresh(hour in 0u32..24, minute in 0u32..60) {
            let mut face = DisplayController::new(SimHost::new(), MemoryStore::new());
            face.start();
            face.host_mut().set_battery(BatteryStatus::new(3, false));

            let now = FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2026, 3, 14, hour, minute, 0)
                .unwrap();
            face.handle(Event::Tick(now));

            let refreshed = face.host().text(Region::Battery) == Some("3%");
            prop_assert_eq!(refreshed, minute % 30 == 0);
        }
    }
}
