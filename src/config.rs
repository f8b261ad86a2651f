use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Legacy variable name the credential is also read from
pub const LEGACY_API_KEY_VAR: &str = "RESEND_API_KEY";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub relay: RelaySettings,
    pub email: EmailSettings,
    pub rate_limit: RateLimitSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub environment: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RelaySettings {
    pub path: String,
    pub form_path: String,
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    pub max_body_bytes: usize,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Resend,
    Outbox,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailSettings {
    pub provider: ProviderKind,
    #[serde(default)]
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub timeout_secs: u64,
}

impl EmailSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitSettings {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl RateLimitSettings {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_overrides(&[])
    }

    /// Load settings, applying `overrides` (key, value) on top of every source
    pub fn with_overrides(overrides: &[(&str, &str)]) -> Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let mut builder = Config::builder()
            // Start with default values
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 8080)?
            .set_default("application.environment", environment.clone())?
            .set_default("relay.path", "/api/send-email")?
            .set_default("relay.form_path", "/contact")?
            .set_default("relay.sender", "Portfolio <noreply@anthony-ip.netlify.app>")?
            .set_default("relay.recipient", "anthonyip.pro8@gmail.com")?
            .set_default("relay.subject", "Nouveau message de contact - Portfolio")?
            .set_default("relay.max_body_bytes", 16 * 1024)?
            .set_default("email.provider", "resend")?
            .set_default(
                "email.api_base_url",
                crate::providers::constants::resend::DEFAULT_BASE_URL,
            )?
            .set_default("email.timeout_secs", 10)?
            .set_default("rate_limit.max_requests", 5)?
            .set_default("rate_limit.window_secs", 60)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            // Add configuration file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with prefix
            .add_source(Environment::with_prefix("CONTACT_RELAY").separator("__"));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let mut settings: Settings = builder.build()?.try_deserialize()?;

        if settings.email.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            settings.email.api_key = env::var(LEGACY_API_KEY_VAR)
                .ok()
                .filter(|k| !k.trim().is_empty());
        }

        Ok(settings)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.application.host, self.application.port)
    }
}
