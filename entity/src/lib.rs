pub mod alert_log;
pub mod alert_setting;
pub mod license;
pub mod license_type;
pub mod prelude;
pub mod worker;
pub mod worker_required_license_type;
