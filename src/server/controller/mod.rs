pub mod alert;
pub mod auth;
pub mod dashboard;
pub mod license;
pub mod license_type;
pub mod setting;
pub mod util;
pub mod worker;
