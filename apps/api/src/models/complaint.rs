use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Complaint lifecycle states. Transitions are unrestricted: any status may
/// move to any other, including backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "complaint_status", rename_all = "snake_case")]
pub enum ComplaintStatus {
    New,
    Assigned,
    InProgress,
    Resolved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Complaint {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub address: Option<String>,
    /// Derived national-assembly constituency code, e.g. "NA-247"
    pub area_code_na: Option<String>,
    /// Derived provincial-assembly constituency code, e.g. "PS-110"
    pub area_code_ps: Option<String>,
    pub mna_id: Option<i64>,
    pub mpa_id: Option<i64>,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Stamped the first time status reaches `Resolved`; never cleared.
    pub resolved_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&ComplaintStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(serde_json::from_str::<ComplaintStatus>("\"closed\"").is_err());
    }
}
