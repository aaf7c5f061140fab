use std::time::Duration;

use crate::server::error::notify::NotifyError;

pub static RESEND_API_URL: &str = "https://api.resend.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the transactional email provider's HTTP API.
#[derive(Clone)]
pub struct EmailClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl EmailClient {
    /// Creates a new instance of [`EmailClient`]
    ///
    /// `api_url` is the provider base URL; tests pass a mock server URL here.
    pub fn new(api_url: &str, api_key: &str, from: &str) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            from: from.to_string(),
        })
    }

    /// Sends a plain-text email
    pub async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        let response = self
            .http
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "from": self.from,
                "to": to,
                "subject": subject,
                "text": body,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                service: "Email",
                status,
                body,
            });
        }

        Ok(())
    }
}
