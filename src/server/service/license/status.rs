//! Expiry classification for licenses.
//!
//! Classification is pure: callers pass the reference date in, so results are
//! deterministic for a given clock reading and trivially testable. Thresholds
//! are calendar-day differences with the lowest matching bound winning.

use chrono::NaiveDate;

use entity::license::LicenseState;

/// Urgency bucket for a license expiry date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LicenseStatus {
    /// Expiry date has passed
    Expired,
    /// 30 days or fewer remaining
    Critical,
    /// 31 to 60 days remaining
    Warning,
    /// 61 to 90 days remaining
    Caution,
    /// More than 90 days remaining
    Valid,
    /// Superseded by a newer license of the same type
    Replaced,
}

impl LicenseStatus {
    /// Wire representation used in DTOs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Caution => "caution",
            Self::Valid => "valid",
            Self::Replaced => "replaced",
        }
    }
}

/// Classification result for a single license.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusInfo {
    pub status: LicenseStatus,
    /// Calendar days until expiry; negative once expired
    pub days_until: i64,
    pub label: String,
}

impl From<StatusInfo> for crate::model::license::StatusInfoDto {
    fn from(info: StatusInfo) -> Self {
        Self {
            status: info.status.as_str().to_string(),
            days_until: info.days_until,
            label: info.label,
        }
    }
}

/// Classifies an expiry date against the given reference date.
///
/// Any date is a valid input, including dates in the past.
pub fn classify(expiry_date: NaiveDate, today: NaiveDate) -> StatusInfo {
    let days_until = (expiry_date - today).num_days();

    let (status, label) = if days_until < 0 {
        (LicenseStatus::Expired, "Expired".to_string())
    } else if days_until <= 30 {
        (LicenseStatus::Critical, format!("{days_until}d left"))
    } else if days_until <= 60 {
        (LicenseStatus::Warning, format!("{days_until}d left"))
    } else if days_until <= 90 {
        (LicenseStatus::Caution, format!("{days_until}d left"))
    } else {
        (LicenseStatus::Valid, "Valid".to_string())
    };

    StatusInfo {
        status,
        days_until,
        label,
    }
}

/// Classifies a license taking its lifecycle state into account.
///
/// A replaced license is always reported as replaced; `days_until` is still
/// computed so callers can sort superseded records chronologically.
pub fn classify_state(state: &LicenseState, expiry_date: NaiveDate, today: NaiveDate) -> StatusInfo {
    match state {
        LicenseState::Replaced => StatusInfo {
            status: LicenseStatus::Replaced,
            days_until: (expiry_date - today).num_days(),
            label: "Replaced".to_string(),
        },
        LicenseState::Active => classify(expiry_date, today),
    }
}

/// Returns the most urgent classification across a worker's licenses.
///
/// Replaced licenses are skipped entirely. On equal `days_until` the earlier
/// license in input order wins, keeping the pick stable across runs. Returns
/// None when no active license remains.
pub fn worst_status(licenses: &[entity::license::Model], today: NaiveDate) -> Option<StatusInfo> {
    let mut worst: Option<StatusInfo> = None;

    for license in licenses {
        if license.state == LicenseState::Replaced {
            continue;
        }

        let info = classify(license.expiry_date, today);
        match &worst {
            Some(current) if info.days_until >= current.days_until => {}
            _ => worst = Some(info),
        }
    }

    worst
}
