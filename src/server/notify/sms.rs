use std::time::Duration;

use crate::server::error::notify::NotifyError;

pub static TWILIO_API_URL: &str = "https://api.twilio.com";
pub static TWILIO_VERIFY_API_URL: &str = "https://verify.twilio.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the SMS provider's messaging and OTP verification APIs.
///
/// The messaging and verification products live on different hosts, so both
/// base URLs are taken at construction; tests point them at a mock server.
#[derive(Clone)]
pub struct SmsClient {
    http: reqwest::Client,
    api_url: String,
    verify_url: String,
    account_sid: String,
    auth_token: String,
    from_number: Option<String>,
    verify_service_sid: Option<String>,
}

impl SmsClient {
    /// Creates a new instance of [`SmsClient`]
    pub fn new(
        api_url: &str,
        verify_url: &str,
        account_sid: &str,
        auth_token: &str,
        from_number: Option<String>,
        verify_service_sid: Option<String>,
    ) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            verify_url: verify_url.trim_end_matches('/').to_string(),
            account_sid: account_sid.to_string(),
            auth_token: auth_token.to_string(),
            from_number,
            verify_service_sid,
        })
    }

    /// Sends an SMS message from the configured sender number
    pub async fn send_message(&self, to: &str, body: &str) -> Result<(), NotifyError> {
        let from = self
            .from_number
            .as_deref()
            .ok_or(NotifyError::NotConfigured("SMS sender phone number"))?;

        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_url, self.account_sid
        );

        let response = self
            .http
            .post(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", from), ("Body", body)])
            .send()
            .await?;

        self.check_response("SMS", response).await
    }

    /// Starts an OTP verification, sending a code to the given phone number
    pub async fn start_verification(&self, to: &str) -> Result<(), NotifyError> {
        let service_sid = self.verify_service_sid()?;

        let url = format!("{}/v2/Services/{}/Verifications", self.verify_url, service_sid);

        let response = self
            .http
            .post(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("Channel", "sms")])
            .send()
            .await?;

        self.check_response("SMS verification", response).await
    }

    /// Checks a submitted OTP code, returning whether the provider approved it
    pub async fn check_verification(&self, to: &str, code: &str) -> Result<bool, NotifyError> {
        let service_sid = self.verify_service_sid()?;

        let url = format!(
            "{}/v2/Services/{}/VerificationCheck",
            self.verify_url, service_sid
        );

        let response = self
            .http
            .post(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("Code", code)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                service: "SMS verification",
                status,
                body,
            });
        }

        let body: serde_json::Value = response.json().await?;

        Ok(body.get("status").and_then(|s| s.as_str()) == Some("approved"))
    }

    fn verify_service_sid(&self) -> Result<&str, NotifyError> {
        self.verify_service_sid
            .as_deref()
            .ok_or(NotifyError::NotConfigured("SMS verification service"))
    }

    async fn check_response(
        &self,
        service: &'static str,
        response: reqwest::Response,
    ) -> Result<(), NotifyError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                service,
                status,
                body,
            });
        }

        Ok(())
    }
}
