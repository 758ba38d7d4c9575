//! # Messenger Handoff
//!
//! Builds the deep link that opens a Messenger chat with the order summary
//! prefilled.
//!
//! ```text
//! https://m.me/PrimosPares.Leg?text=%F0%9F%9B%92%20Primos'%20Pares%20ORDER%0A...
//! └────┬─────┘ └──────┬──────┘      └──────────────────┬──────────────────┘
//!    base     encoded business handle    encodeURIComponent(summary)
//! ```
//!
//! Nothing is sent from here. The storefront returns the URL and the browser
//! opens it; staff confirm manually.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use url::Url;

use crate::error::{CoreError, CoreResult};

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped, matching
/// JavaScript's `encodeURIComponent`.
pub const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const DEFAULT_MESSENGER_BASE_URL: &str = "https://m.me";
pub const DEFAULT_BUSINESS_HANDLE: &str = "PrimosPares.Leg";

/// Where order summaries are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffConfig {
    pub base_url: String,
    pub business_handle: String,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        HandoffConfig {
            base_url: DEFAULT_MESSENGER_BASE_URL.to_string(),
            business_handle: DEFAULT_BUSINESS_HANDLE.to_string(),
        }
    }
}

impl HandoffConfig {
    pub fn new(base_url: impl Into<String>, business_handle: impl Into<String>) -> Self {
        HandoffConfig {
            base_url: base_url.into(),
            business_handle: business_handle.into(),
        }
    }

    /// Checks that the base is an absolute http(s) URL and the handle is a
    /// single non-empty path segment.
    pub fn validate(&self) -> CoreResult<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| CoreError::InvalidHandoffUrl(format!("{}: {}", self.base_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(CoreError::InvalidHandoffUrl(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }

        let handle = self.business_handle.trim();
        if handle.is_empty() || handle.contains('/') || handle.contains('?') {
            return Err(CoreError::InvalidHandoffUrl(format!(
                "invalid business handle '{}'",
                self.business_handle
            )));
        }

        Ok(())
    }

    /// `{base}/{encoded handle}?text={encoded message}`.
    pub fn link_for(&self, message: &str) -> CoreResult<String> {
        self.validate()?;
        Ok(format!(
            "{}/{}?text={}",
            self.base_url.trim_end_matches('/'),
            encode_uri_component(self.business_handle.trim()),
            encode_uri_component(message)
        ))
    }
}

/// Percent-encodes text the way `encodeURIComponent` does.
///
/// ```rust
/// use pares_core::handoff::encode_uri_component;
///
/// assert_eq!(encode_uri_component("Primos' Pares x2"), "Primos'%20Pares%20x2");
/// assert_eq!(encode_uri_component("₱240"), "%E2%82%B1240");
/// ```
pub fn encode_uri_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// The composed summary and the link that carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderHandoff {
    pub message: String,
    pub url: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    #[test]
    fn test_unreserved_marks_are_kept() {
        assert_eq!(encode_uri_component("a-b_c.d!e~f*g'h(i)j"), "a-b_c.d!e~f*g'h(i)j");
        assert_eq!(encode_uri_component("a b\nc&d=e/f?"), "a%20b%0Ac%26d%3De%2Ff%3F");
    }

    #[test]
    fn test_link_shape_and_round_trip() {
        let config = HandoffConfig::default();
        let message = "🛒 Primos' Pares ORDER\n\n💰 TOTAL: ₱240";
        let link = config.link_for(message).unwrap();

        assert!(link.starts_with("https://m.me/PrimosPares.Leg?text="));

        let parsed = Url::parse(&link).unwrap();
        let text = parsed
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(text, message);

        let raw = link.split_once("?text=").unwrap().1;
        assert_eq!(percent_decode_str(raw).decode_utf8().unwrap(), message);
    }

    #[test]
    fn test_trailing_slash_on_base() {
        let config = HandoffConfig::new("https://m.me/", "PrimosPares.Leg");
        assert_eq!(config.link_for("hi").unwrap(), "https://m.me/PrimosPares.Leg?text=hi");
    }

    #[test]
    fn test_handle_is_encoded() {
        let config = HandoffConfig::new("https://m.me", "Primos Pares#1&co");
        let link = config.link_for("hi").unwrap();
        assert_eq!(link, "https://m.me/Primos%20Pares%231%26co?text=hi");

        let parsed = Url::parse(&link).unwrap();
        assert_eq!(parsed.fragment(), None);
        assert_eq!(parsed.query(), Some("text=hi"));
    }

    #[test]
    fn test_invalid_configs() {
        assert!(HandoffConfig::new("not a url", "x").validate().is_err());
        assert!(HandoffConfig::new("ftp://m.me", "x").validate().is_err());
        assert!(HandoffConfig::new("https://m.me", "").validate().is_err());
        assert!(HandoffConfig::new("https://m.me", "a/b").validate().is_err());
    }
}
