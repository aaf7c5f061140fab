//! SMS one-time-password login flow.
//!
//! Administrators pick a role, receive a verification code on the role's
//! configured phone number, and exchange it for a session. Both endpoints
//! are rate limited per source address before anything else happens.

pub mod rate_limit;

use tower_sessions::Session;

use crate::server::{
    config::Config,
    error::{auth::AuthError, notify::NotifyError, Error},
    model::session::SessionRole,
    notify::Notifier,
    service::auth::rate_limit::{RateLimitDecision, RateLimitOp, RateLimiter},
};

/// Administrator role selectable on the login screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminRole {
    Web,
    Office,
}

impl AdminRole {
    pub fn parse(role: &str) -> Option<Self> {
        match role {
            "web" => Some(Self::Web),
            "office" => Some(Self::Office),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Office => "office",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Web => "WEB Admin",
            Self::Office => "OFFICE Admin",
        }
    }
}

pub struct AuthService<'a> {
    config: &'a Config,
    notifier: &'a Notifier,
    rate_limiter: &'a RateLimiter,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(config: &'a Config, notifier: &'a Notifier, rate_limiter: &'a RateLimiter) -> Self {
        Self {
            config,
            notifier,
            rate_limiter,
        }
    }

    /// Sends a login code to the phone number configured for the role.
    ///
    /// Returns the role's display label on success. Missing SMS provider
    /// credentials fail loudly here, unlike the expiry sweep which degrades.
    pub async fn send_code(&self, role: &str, source_addr: &str) -> Result<String, Error> {
        if let RateLimitDecision::Limited {
            retry_after_seconds,
        } = self.rate_limiter.check(source_addr, RateLimitOp::SendCode)
        {
            return Err(AuthError::RateLimited {
                retry_after_seconds,
            }
            .into());
        }

        let role = AdminRole::parse(role).ok_or(AuthError::InvalidRole)?;
        let phone = self.admin_phone(role).ok_or(AuthError::InvalidRole)?;

        let sms = self.notifier.sms.as_ref().ok_or(AuthError::SmsNotConfigured)?;

        match sms.start_verification(phone).await {
            Ok(()) => Ok(role.label().to_string()),
            Err(NotifyError::NotConfigured(_)) => Err(AuthError::SmsNotConfigured.into()),
            Err(e) => {
                tracing::error!("Send code error: {}", e);
                Err(e.into())
            }
        }
    }

    /// Verifies a submitted login code and stores the role in the session
    pub async fn verify_code(
        &self,
        role: &str,
        code: &str,
        source_addr: &str,
        session: &Session,
    ) -> Result<(), Error> {
        if let RateLimitDecision::Limited {
            retry_after_seconds,
        } = self
            .rate_limiter
            .check(source_addr, RateLimitOp::VerifyCode)
        {
            return Err(AuthError::RateLimited {
                retry_after_seconds,
            }
            .into());
        }

        if role.is_empty() || code.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }

        let role = AdminRole::parse(role).ok_or(AuthError::InvalidRole)?;
        let phone = self.admin_phone(role).ok_or(AuthError::InvalidRole)?;

        let sms = self.notifier.sms.as_ref().ok_or(AuthError::SmsNotConfigured)?;

        let approved = match sms.check_verification(phone, code).await {
            Ok(approved) => approved,
            Err(NotifyError::NotConfigured(_)) => {
                return Err(AuthError::SmsNotConfigured.into());
            }
            Err(e) => {
                tracing::error!("Verify code error: {}", e);
                return Err(e.into());
            }
        };

        if !approved {
            return Err(AuthError::CodeRejected.into());
        }

        SessionRole::insert(session, role).await?;

        Ok(())
    }

    fn admin_phone(&self, role: AdminRole) -> Option<&str> {
        match role {
            AdminRole::Web => self.config.web_admin_phone.as_deref(),
            AdminRole::Office => self.config.office_admin_phone.as_deref(),
        }
    }
}
