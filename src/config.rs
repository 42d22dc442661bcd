use serde::Serialize;

use crate::logging::LogLevel;

pub const DEFAULT_NAV_SCROLL_THRESHOLD_PX: u32 = 50;
pub const DEFAULT_REVEAL_STAGGER_MS: u32 = 100;
pub const DEFAULT_QUOTE_DURATION_MS: u32 = 4_000;
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const NAV_SCROLL_THRESHOLD_PX_BOUNDS: (u32, u32) = (0, 2_000);
const REVEAL_STAGGER_MS_BOUNDS: (u32, u32) = (0, 2_000);
const QUOTE_DURATION_MS_BOUNDS: (u32, u32) = (500, 60_000);

pub const REVEAL_VISIBILITY_THRESHOLD: f64 = 0.1;
pub const HERO_VISIBILITY_THRESHOLD: f64 = 0.5;
pub const SKILL_BAR_VISIBILITY_THRESHOLD: f64 = 0.5;

pub const QUOTE_ENTER_DELAY_MS: u32 = 10;
pub const QUOTE_EXIT_MS: u32 = 500;
pub const FLASH_DURATION_MS: u32 = 1_000;

/// Page-wide tunables, read once from `data-*` attributes on `<body>`.
///
/// Every value has a default and inclusive bounds. Anything missing,
/// malformed or out of range falls back to the default.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorConfig {
    pub nav_scroll_threshold_px: u32,
    pub reveal_stagger_ms: u32,
    pub quote_duration_ms: u32,
    pub log_level: LogLevel,
    pub typing_effect: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            nav_scroll_threshold_px: DEFAULT_NAV_SCROLL_THRESHOLD_PX,
            reveal_stagger_ms: DEFAULT_REVEAL_STAGGER_MS,
            quote_duration_ms: DEFAULT_QUOTE_DURATION_MS,
            log_level: DEFAULT_LOG_LEVEL,
            typing_effect: false,
        }
    }
}

impl BehaviorConfig {
    /// Builds the config from an attribute lookup such as `Element::get_attribute`.
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let nav_scroll_threshold_px = parse_u32_with_bounds(
            lookup("data-nav-scroll-threshold").as_deref(),
            DEFAULT_NAV_SCROLL_THRESHOLD_PX,
            NAV_SCROLL_THRESHOLD_PX_BOUNDS,
        );
        let reveal_stagger_ms = parse_u32_with_bounds(
            lookup("data-reveal-stagger-ms").as_deref(),
            DEFAULT_REVEAL_STAGGER_MS,
            REVEAL_STAGGER_MS_BOUNDS,
        );
        let quote_duration_ms = parse_u32_with_bounds(
            lookup("data-quote-duration-ms").as_deref(),
            DEFAULT_QUOTE_DURATION_MS,
            QUOTE_DURATION_MS_BOUNDS,
        );
        let log_level = parse_log_level(lookup("data-log-level").as_deref(), DEFAULT_LOG_LEVEL);
        let typing_effect = parse_switch(lookup("data-typing-effect").as_deref(), false);

        Self {
            nav_scroll_threshold_px,
            reveal_stagger_ms,
            quote_duration_ms,
            log_level,
            typing_effect,
        }
    }
}

fn parse_u32_with_bounds(raw: Option<&str>, default: u32, bounds: (u32, u32)) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_log_level(raw: Option<&str>, default: LogLevel) -> LogLevel {
    match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        Some("debug") => LogLevel::Debug,
        Some("info") => LogLevel::Info,
        _ => default,
    }
}

fn parse_switch(raw: Option<&str>, default: bool) -> bool {
    match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        Some("on" | "true" | "1") => true,
        Some("off" | "false" | "0") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> BehaviorConfig {
        let attributes: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        BehaviorConfig::from_attributes(|name| attributes.get(name).cloned())
    }

    #[test]
    fn missing_attributes_use_defaults() {
        assert_eq!(config_from(&[]), BehaviorConfig::default());
    }

    #[test]
    fn valid_attributes_override_defaults() {
        let config = config_from(&[
            ("data-nav-scroll-threshold", " 80 "),
            ("data-reveal-stagger-ms", "150"),
            ("data-quote-duration-ms", "2500"),
            ("data-log-level", "DEBUG"),
            ("data-typing-effect", "on"),
        ]);

        assert_eq!(config.nav_scroll_threshold_px, 80);
        assert_eq!(config.reveal_stagger_ms, 150);
        assert_eq!(config.quote_duration_ms, 2_500);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.typing_effect);
    }

    #[test]
    fn out_of_range_and_malformed_values_fall_back() {
        let config = config_from(&[
            ("data-nav-scroll-threshold", "-5"),
            ("data-reveal-stagger-ms", "99999"),
            ("data-quote-duration-ms", "100"),
            ("data-log-level", "trace"),
            ("data-typing-effect", "maybe"),
        ]);

        assert_eq!(config, BehaviorConfig::default());
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(parse_u32_with_bounds(Some("500"), 4_000, QUOTE_DURATION_MS_BOUNDS), 500);
        assert_eq!(parse_u32_with_bounds(Some("60000"), 4_000, QUOTE_DURATION_MS_BOUNDS), 60_000);
        assert_eq!(parse_u32_with_bounds(Some("0"), 50, NAV_SCROLL_THRESHOLD_PX_BOUNDS), 0);
    }
}
