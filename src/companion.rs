//! Companion-app configuration payloads.
//!
//! The settings page runs on the phone and hands back its result as a
//! URI-encoded JSON object:
//!
//! ```text
//! %7B%22vibrate%22%3A%22off%22%7D   ->   {"vibrate":"off"}
//! ```
//!
//! [`parse_webview_response`] turns that into the [`ConfigMessage`] the watch
//! receives.

use serde::Deserialize;

use crate::settings::ConfigMessage;
use crate::Error;

/// Settings page result.
#[derive(Debug, Clone, Deserialize)]
struct WebviewConfig {
    #[serde(default)]
    vibrate: Option<String>,

    /// Any additional fields
    #[serde(flatten)]
    #[allow(dead_code)]
    extra: std::collections::HashMap<String, serde_json::Value>,
}

/// Decode a settings page response.
///
/// Returns `Ok(None)` when the page was dismissed (empty response) or did not
/// include a vibrate choice.
///
/// # Example
///
/// ```
/// use yaswf::companion::parse_webview_response;
/// use yaswf::ConfigMessage;
///
/// let message = parse_webview_response("%7B%22vibrate%22%3A%22on%22%7D").unwrap();
/// assert_eq!(message, Some(ConfigMessage::vibrate("on")));
/// ```
pub fn parse_webview_response(response: &str) -> Result<Option<ConfigMessage>, Error> {
    // decodeURIComponent semantics: only %XX escapes are decoded, '+' stays '+'
    let decoded = percent_encoding::percent_decode_str(response.trim())
        .decode_utf8()
        .map_err(|e| Error::Serialization(format!("Settings response is not UTF-8: {}", e)))?;

    if decoded.trim().is_empty() {
        tracing::debug!("Settings page closed without a response");
        return Ok(None);
    }

    let config: WebviewConfig = serde_json::from_str(&decoded)?;
    tracing::debug!("Settings page returned {}", decoded);

    Ok(config.vibrate.map(ConfigMessage::vibrate))
}
