//! Outbound notification channels.
//!
//! Thin HTTP clients for the email and SMS providers. Both take their base URL at
//! construction so tests can point them at a local mock server. Channel availability is
//! decided here once, from configuration; callers treat a `None` channel as disabled.

pub mod email;
pub mod sms;

pub use email::EmailClient;
pub use sms::SmsClient;

use crate::server::{config::NotifyConfig, error::notify::NotifyError};

/// The set of notification channels the application managed to configure.
///
/// A channel missing its credentials is simply absent; the expiry sweep and
/// the login flow each decide how loudly to treat that.
pub struct Notifier {
    pub email: Option<EmailClient>,
    pub sms: Option<SmsClient>,
}

impl Notifier {
    /// Builds the channels that have credentials configured
    pub fn from_config(config: &NotifyConfig) -> Result<Self, NotifyError> {
        let email = match &config.resend_api_key {
            Some(api_key) => Some(EmailClient::new(
                email::RESEND_API_URL,
                api_key,
                &config.email_from,
            )?),
            None => None,
        };

        let sms = match (&config.twilio_account_sid, &config.twilio_auth_token) {
            (Some(account_sid), Some(auth_token)) => Some(SmsClient::new(
                sms::TWILIO_API_URL,
                sms::TWILIO_VERIFY_API_URL,
                account_sid,
                auth_token,
                config.twilio_from_number.clone(),
                config.twilio_verify_service_sid.clone(),
            )?),
            _ => None,
        };

        Ok(Self { email, sms })
    }

    /// A notifier with every channel disabled
    pub fn disabled() -> Self {
        Self {
            email: None,
            sms: None,
        }
    }
}
