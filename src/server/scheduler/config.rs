//! Schedule configuration for background jobs.

/// Expiry sweep schedule: daily at 09:00 server time.
///
/// The sweep is idempotent within its 7-day dedup window, so a more frequent
/// schedule only costs redundant reads, never duplicate alerts.
pub const EXPIRY_SWEEP_CRON_EXPRESSION: &str = "0 0 9 * * *";
