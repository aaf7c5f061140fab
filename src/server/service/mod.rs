pub mod alert;
pub mod auth;
pub mod license;
pub mod license_type;
pub mod requirement;
pub mod setting;
pub mod stats;
pub mod worker;
