use crate::server::error::config::ConfigError;

pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub cron_secret: Option<String>,
    pub web_admin_phone: Option<String>,
    pub office_admin_phone: Option<String>,
    pub notify: NotifyConfig,
}

/// Outbound channel credentials; every field is optional and a missing value
/// disables the channel it belongs to rather than failing startup.
pub struct NotifyConfig {
    pub resend_api_key: Option<String>,
    pub email_from: String,
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_from_number: Option<String>,
    pub twilio_verify_service_sid: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            listen_addr: optional("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            cron_secret: optional("CRON_SECRET"),
            web_admin_phone: optional("WEB_ADMIN_PHONE"),
            office_admin_phone: optional("OFFICE_ADMIN_PHONE"),
            notify: NotifyConfig::from_env(),
        })
    }
}

impl NotifyConfig {
    pub fn from_env() -> Self {
        Self {
            resend_api_key: optional("RESEND_API_KEY"),
            email_from: optional("EMAIL_FROM")
                .unwrap_or_else(|| "Heimdall License Monitor <onboarding@resend.dev>".to_string()),
            twilio_account_sid: optional("TWILIO_ACCOUNT_SID"),
            twilio_auth_token: optional("TWILIO_AUTH_TOKEN"),
            twilio_from_number: optional("TWILIO_PHONE_NUMBER"),
            twilio_verify_service_sid: optional("TWILIO_VERIFY_SERVICE_SID"),
        }
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
