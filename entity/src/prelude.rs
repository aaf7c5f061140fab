pub use super::alert_log::Entity as AlertLog;
pub use super::alert_setting::Entity as AlertSetting;
pub use super::license::Entity as License;
pub use super::license_type::Entity as LicenseType;
pub use super::worker::Entity as Worker;
pub use super::worker_required_license_type::Entity as WorkerRequiredLicenseType;
