use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Base URL for resource endpoints (`/contacts`, `/products`, ...).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL for the identity endpoints (`/login`, `/logout`,
    /// `/callback`, `/refresh-token`).
    #[serde(default = "default_auth_base_url")]
    pub auth_base_url: String,

    /// How many seconds before expiry the proactive refresh fires.
    #[serde(default = "default_refresh_lead_secs")]
    pub refresh_lead_secs: u64,

    /// Per-request timeout applied to every HTTP call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_auth_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_refresh_lead_secs() -> u64 {
    60
}

fn default_request_timeout_secs() -> u64 {
    15
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path = std::env::var("CRM_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(config::Environment::with_prefix("CRM").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_base_url.is_empty() {
            return Err("api_base_url is required".to_string());
        }
        if self.auth_base_url.is_empty() {
            return Err("auth_base_url is required".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn login_url(&self) -> String {
        format!("{}/login", self.auth_base_url)
    }

    pub fn logout_url(&self) -> String {
        format!("{}/logout", self.auth_base_url)
    }

    pub fn callback_url(&self) -> String {
        format!("{}/callback", self.auth_base_url)
    }

    pub fn refresh_url(&self) -> String {
        format!("{}/refresh-token", self.auth_base_url)
    }

    pub fn whoami_url(&self) -> String {
        format!("{}/users/me", self.api_base_url)
    }

    pub fn refresh_lead(&self) -> Duration {
        Duration::from_secs(self.refresh_lead_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            auth_base_url: default_auth_base_url(),
            refresh_lead_secs: default_refresh_lead_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let settings = Settings::default();
        assert_eq!(settings.refresh_lead_secs, 60);
        assert_eq!(settings.request_timeout_secs, 15);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn derived_urls() {
        let settings = Settings {
            auth_base_url: "https://auth.example.com".to_string(),
            api_base_url: "https://api.example.com/api".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.refresh_url(), "https://auth.example.com/refresh-token");
        assert_eq!(settings.whoami_url(), "https://api.example.com/api/users/me");
    }

    #[test]
    fn zero_timeout_rejected() {
        let settings = Settings {
            request_timeout_secs: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
