//! Rendering of alert notification content.

use chrono::NaiveDate;
use sea_orm::ActiveEnum;

use entity::alert_log::AlertLevel;

/// Subject line for an expiry alert email
pub fn email_subject(
    worker_name: &str,
    license_type: &str,
    license_code: Option<&str>,
    level: &AlertLevel,
) -> String {
    let code = code_suffix(license_code);

    match level {
        AlertLevel::Expired => format!("EXPIRED: {worker_name} - {license_type}{code}"),
        _ => format!("License Expiring: {worker_name} - {license_type}{code}"),
    }
}

/// Plain-text body for an expiry alert email
pub fn email_body(
    worker_name: &str,
    license_type: &str,
    license_code: Option<&str>,
    expiry_date: NaiveDate,
    level: &AlertLevel,
) -> String {
    let code = code_suffix(license_code);
    let expiry = expiry_date.format("%B %-d, %Y");

    match level {
        AlertLevel::Expired => format!(
            "The following license has EXPIRED:\n\n\
             Worker: {worker_name}\n\
             License: {license_type}{code}\n\
             Expired on: {expiry}\n\n\
             Please arrange renewal immediately."
        ),
        _ => format!(
            "The following license is expiring soon:\n\n\
             Worker: {worker_name}\n\
             License: {license_type}{code}\n\
             Expiry Date: {expiry}\n\
             Alert Level: {}\n\n\
             Please arrange renewal before the expiry date.",
            level.to_value()
        ),
    }
}

/// Single-line body for an expiry alert SMS
pub fn sms_body(
    worker_name: &str,
    license_type: &str,
    expiry_date: NaiveDate,
    level: &AlertLevel,
) -> String {
    let expiry = expiry_date.format("%b %-d, %Y");

    match level {
        AlertLevel::Expired => format!(
            "ALERT: {worker_name}'s {license_type} has EXPIRED ({expiry}). Renew immediately."
        ),
        _ => format!(
            "ALERT: {worker_name}'s {license_type} expires {expiry} ({}). Please arrange renewal.",
            level.to_value()
        ),
    }
}

fn code_suffix(license_code: Option<&str>) -> String {
    match license_code {
        Some(code) => format!(" ({code})"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use entity::alert_log::AlertLevel;

    use super::{email_body, email_subject, sms_body};

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()
    }

    /// Expect expired subjects to be marked loudly and include the code
    #[test]
    fn test_email_subject_expired() {
        let subject = email_subject(
            "Dana Ironside",
            "Working at Heights",
            Some("WH-1042"),
            &AlertLevel::Expired,
        );

        assert_eq!(
            subject,
            "EXPIRED: Dana Ironside - Working at Heights (WH-1042)"
        );
    }

    /// Expect upcoming-expiry subjects to omit a missing code cleanly
    #[test]
    fn test_email_subject_expiring_without_code() {
        let subject = email_subject(
            "Dana Ironside",
            "Working at Heights",
            None,
            &AlertLevel::Days30,
        );

        assert_eq!(subject, "License Expiring: Dana Ironside - Working at Heights");
    }

    /// Expect the email body to spell out the date and alert level
    #[test]
    fn test_email_body_expiring() {
        let body = email_body(
            "Dana Ironside",
            "Working at Heights",
            None,
            expiry(),
            &AlertLevel::Days30,
        );

        assert!(body.contains("Expiry Date: March 2, 2025"));
        assert!(body.contains("Alert Level: 30_days"));
        assert!(body.contains("before the expiry date"));
    }

    /// Expect the SMS body to stay on one line with a short date
    #[test]
    fn test_sms_body_expired() {
        let body = sms_body(
            "Dana Ironside",
            "Working at Heights",
            expiry(),
            &AlertLevel::Expired,
        );

        assert_eq!(
            body,
            "ALERT: Dana Ironside's Working at Heights has EXPIRED (Mar 2, 2025). Renew immediately."
        );
        assert!(!body.contains('\n'));
    }
}
