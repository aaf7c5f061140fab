//! Database repositories.
//!
//! Each repository wraps a borrowed [`sea_orm::DatabaseConnection`] and owns the queries for
//! one table. Services compose repositories; repositories never call each other.

pub mod alert_log;
pub mod alert_setting;
pub mod license;
pub mod license_type;
pub mod required_license_type;
pub mod worker;
