//! City-wide impact metrics, recomputed from current rows on demand.

use std::collections::HashSet;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::complaint::{Complaint, ComplaintStatus};
use crate::state::AppState;

// Display fallbacks shown when a metric comes out zero. These are marketing
// numbers, not error values; substitution happens on zero, not on failure.
pub const FALLBACK_ISSUES_RESOLVED: i64 = 15_000;
pub const FALLBACK_AREAS_COVERED: i64 = 200;
pub const FALLBACK_ACTIVE_USERS: i64 = 50_000;
pub const FALLBACK_AVG_RESOLUTION_HOURS: f64 = 48.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactMetrics {
    pub issues_resolved: i64,
    pub areas_covered: i64,
    pub active_users: i64,
    pub avg_resolution_hours: f64,
}

/// Aggregates impact metrics from all complaint rows plus the volunteer
/// head count (every team_members row, no per-person dedup).
pub fn aggregate(complaints: &[Complaint], member_count: i64) -> ImpactMetrics {
    let resolved: Vec<&Complaint> = complaints
        .iter()
        .filter(|c| c.status == ComplaintStatus::Resolved)
        .collect();

    // NA and PS codes land in one set; the two namespaces are deliberately
    // conflated, so an identical string in both counts once.
    let mut codes: HashSet<&str> = HashSet::new();
    for complaint in complaints {
        if let Some(na) = complaint.area_code_na.as_deref() {
            codes.insert(na);
        }
        if let Some(ps) = complaint.area_code_ps.as_deref() {
            codes.insert(ps);
        }
    }

    let durations: Vec<f64> = resolved
        .iter()
        .filter_map(|c| {
            c.resolved_at
                .map(|resolved_at| resolution_hours(c.created_at, resolved_at))
        })
        .collect();
    let avg_resolution_hours = if durations.is_empty() {
        FALLBACK_AVG_RESOLUTION_HOURS
    } else {
        round2(durations.iter().sum::<f64>() / durations.len() as f64)
    };

    ImpactMetrics {
        issues_resolved: or_fallback(resolved.len() as i64, FALLBACK_ISSUES_RESOLVED),
        areas_covered: or_fallback(codes.len() as i64, FALLBACK_AREAS_COVERED),
        active_users: or_fallback(member_count, FALLBACK_ACTIVE_USERS),
        avg_resolution_hours,
    }
}

fn or_fallback(n: i64, fallback: i64) -> i64 {
    if n == 0 {
        fallback
    } else {
        n
    }
}

/// Hours from creation to resolution, clamped at zero so clock skew cannot
/// produce a negative duration.
fn resolution_hours(created_at: DateTime<Utc>, resolved_at: DateTime<Utc>) -> f64 {
    ((resolved_at - created_at).num_seconds() as f64 / 3600.0).max(0.0)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// GET /impact
pub async fn handle_impact(State(state): State<AppState>) -> Result<Json<ImpactMetrics>, AppError> {
    let complaints: Vec<Complaint> = sqlx::query_as("SELECT * FROM complaints")
        .fetch_all(&state.db)
        .await?;
    let member_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM team_members")
        .fetch_one(&state.db)
        .await?;
    Ok(Json(aggregate(&complaints, member_count)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn complaint(
        id: i64,
        na: Option<&str>,
        ps: Option<&str>,
        status: ComplaintStatus,
        created_at: DateTime<Utc>,
        resolved_at: Option<DateTime<Utc>>,
    ) -> Complaint {
        Complaint {
            id,
            title: format!("Complaint {id}"),
            description: None,
            lat: 24.83,
            lng: 67.06,
            address: None,
            area_code_na: na.map(String::from),
            area_code_ps: ps.map(String::from),
            mna_id: None,
            mpa_id: None,
            status,
            created_at,
            updated_at: created_at,
            resolved_at,
        }
    }

    #[test]
    fn test_empty_store_yields_exact_fallbacks() {
        let metrics = aggregate(&[], 0);
        assert_eq!(
            metrics,
            ImpactMetrics {
                issues_resolved: 15_000,
                areas_covered: 200,
                active_users: 50_000,
                avg_resolution_hours: 48.0,
            }
        );
    }

    #[test]
    fn test_real_counts_replace_fallbacks() {
        let rows = [complaint(
            1,
            Some("NA-247"),
            Some("PS-110"),
            ComplaintStatus::Resolved,
            at(0),
            Some(at(7200)),
        )];
        let metrics = aggregate(&rows, 12);
        assert_eq!(metrics.issues_resolved, 1);
        assert_eq!(metrics.areas_covered, 2);
        assert_eq!(metrics.active_users, 12);
        assert_eq!(metrics.avg_resolution_hours, 2.0);
    }

    #[test]
    fn test_areas_count_all_complaints_not_just_resolved() {
        let rows = [
            complaint(1, Some("NA-247"), Some("PS-110"), ComplaintStatus::New, at(0), None),
            complaint(2, Some("NA-242"), None, ComplaintStatus::Rejected, at(0), None),
        ];
        assert_eq!(aggregate(&rows, 1).areas_covered, 3);
    }

    #[test]
    fn test_same_string_in_both_namespaces_counts_once() {
        let rows = [complaint(
            1,
            Some("X-1"),
            Some("X-1"),
            ComplaintStatus::New,
            at(0),
            None,
        )];
        assert_eq!(aggregate(&rows, 1).areas_covered, 1);
    }

    #[test]
    fn test_negative_duration_clamped_to_zero() {
        // resolved_at before created_at (clock skew) counts as 0 hours,
        // pulling the average down instead of being discarded
        let rows = [
            complaint(1, None, None, ComplaintStatus::Resolved, at(7200), Some(at(0))),
            complaint(2, None, None, ComplaintStatus::Resolved, at(0), Some(at(14_400))),
        ];
        assert_eq!(aggregate(&rows, 1).avg_resolution_hours, 2.0);
    }

    #[test]
    fn test_resolved_without_timestamp_skipped_for_average() {
        let rows = [complaint(1, None, None, ComplaintStatus::Resolved, at(0), None)];
        let metrics = aggregate(&rows, 1);
        assert_eq!(metrics.issues_resolved, 1);
        assert_eq!(metrics.avg_resolution_hours, 48.0);
    }

    #[test]
    fn test_average_rounds_to_two_decimals() {
        // 1h and 2h20m -> mean 1.6666... -> 1.67
        let rows = [
            complaint(1, None, None, ComplaintStatus::Resolved, at(0), Some(at(3600))),
            complaint(2, None, None, ComplaintStatus::Resolved, at(0), Some(at(8400))),
        ];
        assert_eq!(aggregate(&rows, 1).avg_resolution_hours, 1.67);
    }
}
