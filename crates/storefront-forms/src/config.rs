// File: src/config.rs
// Purpose: Form behavior configuration, optionally read from storefront.toml

use crate::banner::BannerTiming;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Timings and texts used by a form validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    /// How long the simulated submission takes
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,

    /// How long a banner stays fully visible
    #[serde(default = "default_banner_visible_ms")]
    pub banner_visible_ms: u64,

    /// How long the fade-out plays before the banner is removed
    #[serde(default = "default_banner_fade_ms")]
    pub banner_fade_ms: u64,

    /// Submit control label while a submission is in flight (HTML)
    #[serde(default = "default_loading_label")]
    pub loading_label: String,

    /// Success banner text when the form has no `data-success-message`
    #[serde(default = "default_success_message")]
    pub success_message: String,

    /// Error banner text after a failed submission
    #[serde(default = "default_error_message")]
    pub error_message: String,

    /// Label used in messages for fields without a name
    #[serde(default = "default_field_name")]
    pub default_field_name: String,
}

// Default values
fn default_submit_delay_ms() -> u64 {
    1500
}

fn default_banner_visible_ms() -> u64 {
    5000
}

fn default_banner_fade_ms() -> u64 {
    300
}

fn default_loading_label() -> String {
    "<div class=\"spinner\"></div> Sending...".to_string()
}

fn default_success_message() -> String {
    "Thank you! Your message has been sent successfully.".to_string()
}

fn default_error_message() -> String {
    "An error occurred. Please try again.".to_string()
}

fn default_field_name() -> String {
    storefront_validation::DEFAULT_FIELD_LABEL.to_string()
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
            banner_visible_ms: default_banner_visible_ms(),
            banner_fade_ms: default_banner_fade_ms(),
            loading_label: default_loading_label(),
            success_message: default_success_message(),
            error_message: default_error_message(),
            default_field_name: default_field_name(),
        }
    }
}

impl FormConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, fall back to defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from the default path (./storefront.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("storefront.toml")
    }

    /// Parse configuration from TOML text; empty text yields defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn banner_timing(&self) -> BannerTiming {
        BannerTiming {
            visible: Duration::from_millis(self.banner_visible_ms),
            fade: Duration::from_millis(self.banner_fade_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = FormConfig::default();
        assert_eq!(config.submit_delay(), Duration::from_millis(1500));
        assert_eq!(config.banner_timing(), BannerTiming::default());
        assert_eq!(config.error_message, "An error occurred. Please try again.");
        assert_eq!(config.default_field_name, "This field");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = FormConfig::from_toml(
            r#"
submitDelayMs = 250
successMessage = "Thanks for subscribing!"
"#,
        )
        .unwrap();
        assert_eq!(config.submit_delay_ms, 250);
        assert_eq!(config.success_message, "Thanks for subscribing!");
        assert_eq!(config.banner_visible_ms, 5000);
        assert_eq!(config.loading_label, "<div class=\"spinner\"></div> Sending...");
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(FormConfig::from_toml("  \n").unwrap(), FormConfig::default());
    }

    #[test]
    fn test_malformed_toml_errors() {
        assert!(FormConfig::from_toml("submitDelayMs = \"soon\"").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = FormConfig::load("does/not/exist/storefront.toml").unwrap();
        assert_eq!(config, FormConfig::default());
    }
}
