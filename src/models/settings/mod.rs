// Settings module
// Application configuration loaded from TOML

use serde::{Deserialize, Serialize};

use crate::models::aperture::TimeDerivation;

pub const DEFAULT_API_BASE_URL: &str = "https://vertical-garden-api.onrender.com";
pub const DEFAULT_VALVE_ID: &str = "6616ab38b02730a362d05327";
pub const DEFAULT_DISMISS_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub valve_id: String,
    /// Request timeout in seconds; unset leaves the HTTP client's default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    /// Downward drag distance, in layout units, that dismisses the modal
    pub dismiss_threshold: f32,
    pub time_derivation: TimeDerivation,
    pub notification_title: String,
    pub notification_body: String,
    pub notification_sound: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            valve_id: DEFAULT_VALVE_ID.to_string(),
            request_timeout_secs: None,
            dismiss_threshold: DEFAULT_DISMISS_THRESHOLD,
            time_derivation: TimeDerivation::default(),
            notification_title: "The valve is open!".to_string(),
            notification_body: "The risk is started!".to_string(),
            notification_sound: "default".to_string(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.api_base_url.starts_with("https://") || self.api_base_url.starts_with("http://"))
        {
            return Err(format!(
                "API base URL must start with http:// or https://, got '{}'",
                self.api_base_url
            ));
        }

        if self.valve_id.trim().is_empty() {
            return Err("Valve id cannot be empty".to_string());
        }

        if self.valve_id.contains('/') {
            return Err(format!("Valve id '{}' cannot contain '/'", self.valve_id));
        }

        if !self.dismiss_threshold.is_finite() || self.dismiss_threshold <= 0.0 {
            return Err(format!(
                "Dismiss threshold must be a positive number, got {}",
                self.dismiss_threshold
            ));
        }

        if self.request_timeout_secs == Some(0) {
            return Err("Request timeout must be at least one second".to_string());
        }

        if self.notification_title.trim().is_empty() {
            return Err("Notification title cannot be empty".to_string());
        }

        Ok(())
    }

    /// Full URL of the aperture-time resource for the configured valve
    pub fn aperture_endpoint(&self) -> String {
        format!(
            "{}/api/aperture-time/{}",
            self.api_base_url.trim_end_matches('/'),
            self.valve_id
        )
    }
}
