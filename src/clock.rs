//! Time and date text for the face.
//!
//! [`ClockFormatter`] turns a timestamp into the two strings the face shows:
//! a fixed-width `HH:MM` and a short date line. Weekday and month names follow
//! the formatter's locale.
//!
//! # Example
//!
//! ```
//! use chrono::{FixedOffset, TimeZone};
//! use yaswf::ClockFormatter;
//!
//! let now = FixedOffset::east_opt(0)
//!     .unwrap()
//!     .with_ymd_and_hms(2026, 1, 5, 14, 7, 0)
//!     .unwrap();
//!
//! let display = ClockFormatter::default().format(&now, false, false);
//! assert_eq!(display.time_text, "02:07");
//! assert_eq!(display.date_text, "Mon 05 Jan 2026");
//! ```

use std::fmt::Display;

use chrono::{DateTime, FixedOffset, Local, Locale, TimeZone};

use crate::host::ClockSource;

/// Maximum length of the date line in characters
pub const MAX_DATE_LEN: usize = 200;

const TIME_FORMAT_24H: &str = "%H:%M";
const TIME_FORMAT_12H: &str = "%I:%M";
const DATE_FORMAT_COMPACT: &str = "%a %d %b";
const DATE_FORMAT_FULL: &str = "%a %d %b %Y";

/// Rendered clock strings for one minute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeDisplay {
    /// Zero-padded `HH:MM`
    pub time_text: String,
    /// Abbreviated weekday, day, abbreviated month, optional year
    pub date_text: String,
}

/// Formats timestamps into [`TimeDisplay`] values.
#[derive(Debug, Clone, Copy)]
pub struct ClockFormatter {
    locale: Locale,
}

impl ClockFormatter {
    /// Create a formatter using the given locale's weekday and month names.
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Create a formatter from a POSIX locale name such as `"fr_FR"`.
    ///
    /// Unknown names fall back to the POSIX (English) names.
    pub fn from_locale_name(name: &str) -> Self {
        // Accept "fr_FR.UTF-8" as produced by LANG
        let base = name.split('.').next().unwrap_or(name);
        if base.is_empty() || base == "C" || base == "POSIX" {
            return Self::default();
        }
        match Locale::try_from(base) {
            Ok(locale) => Self::new(locale),
            Err(_) => {
                tracing::warn!("Unknown locale '{}', using POSIX names", name);
                Self::default()
            }
        }
    }

    /// Locale used for weekday and month names.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Format `now` into time and date text.
    ///
    /// * `use_24h` - `%H` hours (00-23) instead of `%I` (01-12)
    /// * `compact_date` - omit the year from the date line
    pub fn format<Tz>(&self, now: &DateTime<Tz>, use_24h: bool, compact_date: bool) -> TimeDisplay
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let time_format = if use_24h {
            TIME_FORMAT_24H
        } else {
            TIME_FORMAT_12H
        };
        let date_format = if compact_date {
            DATE_FORMAT_COMPACT
        } else {
            DATE_FORMAT_FULL
        };

        let time_text = now.format(time_format).to_string();
        let date_text: String = now
            .format_localized(date_format, self.locale)
            .to_string()
            .chars()
            .take(MAX_DATE_LEN)
            .collect();

        TimeDisplay {
            time_text,
            date_text,
        }
    }
}

impl Default for ClockFormatter {
    fn default() -> Self {
        Self::new(Locale::POSIX)
    }
}

/// Wall clock backed by the operating system.
///
/// Uses the local timezone unless a named zone is configured.
#[derive(Debug, Clone, Default)]
pub struct SystemClock {
    #[cfg(feature = "config")]
    timezone: Option<chrono_tz::Tz>,
    clock_24h: bool,
}

impl SystemClock {
    /// Create a clock in the local timezone.
    pub fn new(clock_24h: bool) -> Self {
        Self {
            clock_24h,
            ..Default::default()
        }
    }

    /// Report times in a named timezone instead of the local one.
    #[cfg(feature = "config")]
    #[must_use]
    pub fn with_timezone(mut self, timezone: chrono_tz::Tz) -> Self {
        self.timezone = Some(timezone);
        self
    }
}

impl ClockSource for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        #[cfg(feature = "config")]
        {
            if let Some(tz) = self.timezone {
                return chrono::Utc::now().with_timezone(&tz).fixed_offset();
            }
        }
        Local::now().fixed_offset()
    }

    fn is_24h_style(&self) -> bool {
        self.clock_24h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2026, 1, 5, hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_24h_time() {
        let fmt = ClockFormatter::default();
        assert_eq!(fmt.format(&at(0, 0), true, false).time_text, "00:00");
        assert_eq!(fmt.format(&at(9, 5), true, false).time_text, "09:05");
        assert_eq!(fmt.format(&at(23, 59), true, false).time_text, "23:59");
    }

    #[test]
    fn test_12h_time() {
        let fmt = ClockFormatter::default();
        assert_eq!(fmt.format(&at(0, 0), false, false).time_text, "12:00");
        assert_eq!(fmt.format(&at(9, 5), false, false).time_text, "09:05");
        assert_eq!(fmt.format(&at(13, 30), false, false).time_text, "01:30");
        assert_eq!(fmt.format(&at(23, 59), false, false).time_text, "11:59");
    }

    #[test]
    fn test_date_full_and_compact() {
        let fmt = ClockFormatter::default();
        let full = fmt.format(&at(10, 0), true, false);
        let compact = fmt.format(&at(10, 0), true, true);
        assert_eq!(full.date_text, "Mon 05 Jan 2026");
        assert_eq!(compact.date_text, "Mon 05 Jan");
        assert_eq!(full.time_text, compact.time_text);
    }

    #[test]
    fn test_localized_names() {
        let fmt = ClockFormatter::from_locale_name("fr_FR");
        let display = fmt.format(&at(10, 0), true, false);
        assert!(!display.date_text.starts_with("Mon"));
        assert!(display.date_text.contains("05"));
        assert!(display.date_text.ends_with("2026"));
    }

    #[test]
    fn test_locale_name_with_encoding_suffix() {
        let fmt = ClockFormatter::from_locale_name("fr_FR.UTF-8");
        assert_eq!(fmt.locale(), Locale::fr_FR);
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        let fmt = ClockFormatter::from_locale_name("xx_NOPE");
        assert_eq!(fmt.locale(), Locale::POSIX);
    }

    #[test]
    fn test_system_clock_style() {
        assert!(SystemClock::new(true).is_24h_style());
        assert!(!SystemClock::new(false).is_24h_style());
    }
}
