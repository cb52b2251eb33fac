//! Application-level configuration: constants plus the embedded site copy.

use log::warn;
use serde::Deserialize;
use std::fmt;

use crate::typewriter::{TimingError, TypewriterTiming};

// Typewriter
pub const TYPEWRITER_TEXT: &str = "drop 000";
pub const TYPE_DELAY_MS: u32 = 120;
pub const PAUSE_DELAY_MS: u32 = 900;

// Marquees
pub const TOP_MARQUEE: &str =
    "THIRD SPACER   •   A COMMUNITY-POWERED EXPERIMENT IN CREATIVE ABSURDITY.";
pub const BOTTOM_MARQUEE: &str =
    "SUBMIT AN IDEA. VOTE FOR YOUR FAVORITE. GET IT IN THE MAIL. ONE PHYSICAL DROP. EVERY MONTH.";
pub const MARQUEE_SPEED_SECS: f64 = 18.0;
pub const MEASURE_RETRY_MS: u32 = 50;
pub const MAX_MEASURE_RETRIES: u32 = 20;
pub const RESIZE_DEBOUNCE_MS: u32 = 150;

// Hero
pub const FADE_IN_DELAY_MS: u32 = 100;
pub const VIDEO_PLAYBACK_RATE: f64 = 0.7;
pub const FLASH_INTERVAL_MS: u32 = 1_400;

// Waitlist form (Netlify Forms convention)
pub const FORM_NAME: &str = "waitlist";
pub const FORM_ENDPOINT: &str = "/";
pub const EMAIL_PLACEHOLDER: &str = "enter your email";

/// Site copy and tunables, embedded at build time.
pub const SITE_JSON: &str = include_str!("site.json");

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub typewriter_text: String,
    pub type_delay_ms: u32,
    pub pause_delay_ms: u32,
    pub top_marquee: String,
    pub bottom_marquee: String,
    pub marquee_speed_secs: f64,
    pub flash_words: Vec<String>,
    pub form_name: String,
    pub form_endpoint: String,
    pub share_text: String,
    pub share_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            typewriter_text: TYPEWRITER_TEXT.to_string(),
            type_delay_ms: TYPE_DELAY_MS,
            pause_delay_ms: PAUSE_DELAY_MS,
            top_marquee: TOP_MARQUEE.to_string(),
            bottom_marquee: BOTTOM_MARQUEE.to_string(),
            marquee_speed_secs: MARQUEE_SPEED_SECS,
            flash_words: Vec::new(),
            form_name: FORM_NAME.to_string(),
            form_endpoint: FORM_ENDPOINT.to_string(),
            share_text: "I just joined the Third Spacer waitlist.".to_string(),
            share_url: "https://thirdspacer.com".to_string(),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Parse(String),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "Site config is not valid JSON: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "Site config rejected: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<TimingError> for ConfigError {
    fn from(err: TimingError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

impl SiteConfig {
    /// Parse and validate a config document. Missing keys take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The embedded config, or the defaults if it does not pass validation.
    pub fn load() -> Self {
        Self::from_json(SITE_JSON).unwrap_or_else(|err| {
            warn!("{}; falling back to built-in defaults", err);
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.typewriter_timing()?;
        if !(self.marquee_speed_secs.is_finite() && self.marquee_speed_secs > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "marquee speed must be positive, got {}",
                self.marquee_speed_secs
            )));
        }
        if self.form_name.trim().is_empty() {
            return Err(ConfigError::Invalid("form name cannot be empty".to_string()));
        }
        if self.form_endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("form endpoint cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn typewriter_timing(&self) -> Result<TypewriterTiming, TimingError> {
        TypewriterTiming::new(self.type_delay_ms, self.pause_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_is_valid() {
        let config = SiteConfig::from_json(SITE_JSON).expect("site.json should validate");
        assert_eq!(config.form_name, FORM_NAME);
        assert!(!config.flash_words.is_empty());
    }

    #[test]
    fn missing_keys_take_defaults() {
        let config = SiteConfig::from_json(r#"{ "typewriter_text": "drop 001" }"#).unwrap();
        assert_eq!(config.typewriter_text, "drop 001");
        assert_eq!(config.type_delay_ms, TYPE_DELAY_MS);
        assert_eq!(config.pause_delay_ms, PAUSE_DELAY_MS);
        assert_eq!(config.top_marquee, TOP_MARQUEE);
    }

    #[test]
    fn rejects_pause_not_longer_than_type_delay() {
        let err = SiteConfig::from_json(r#"{ "type_delay_ms": 200, "pause_delay_ms": 200 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_non_positive_marquee_speed() {
        let err = SiteConfig::from_json(r#"{ "marquee_speed_secs": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_blank_form_name() {
        let err = SiteConfig::from_json(r#"{ "form_name": "  " }"#).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid("form name cannot be empty".to_string())
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            SiteConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
