use chrono::{DateTime, Utc};

use crate::models::complaint::ComplaintStatus;

/// Computes the resolved_at value after a transition to `new_status`.
/// resolved_at is a one-way latch: the first transition to Resolved stamps
/// it, and later transitions (including away from Resolved and back) leave
/// the original stamp untouched.
pub fn resolved_at_after(
    new_status: ComplaintStatus,
    current: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match (new_status, current) {
        (ComplaintStatus::Resolved, None) => Some(now),
        (_, current) => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_first_resolve_stamps() {
        assert_eq!(
            resolved_at_after(ComplaintStatus::Resolved, None, at(100)),
            Some(at(100))
        );
    }

    #[test]
    fn test_non_resolve_leaves_unset() {
        assert_eq!(
            resolved_at_after(ComplaintStatus::InProgress, None, at(100)),
            None
        );
    }

    #[test]
    fn test_latch_survives_leaving_resolved() {
        assert_eq!(
            resolved_at_after(ComplaintStatus::Rejected, Some(at(50)), at(100)),
            Some(at(50))
        );
    }

    #[test]
    fn test_second_resolve_keeps_first_stamp() {
        assert_eq!(
            resolved_at_after(ComplaintStatus::Resolved, Some(at(50)), at(100)),
            Some(at(50))
        );
    }
}
