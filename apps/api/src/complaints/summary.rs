use serde::Serialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::complaint::Complaint;
use crate::models::representative::Representative;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoteTally {
    pub votes_up: i64,
    pub votes_down: i64,
    /// Signed tally: up-count minus down-count, NOT the number of votes.
    pub votes_total: i64,
}

/// Tallies raw vote values: positives count up, negatives count down.
pub fn tally(values: &[i32]) -> VoteTally {
    let votes_up = values.iter().filter(|v| **v > 0).count() as i64;
    let votes_down = values.iter().filter(|v| **v < 0).count() as i64;
    VoteTally {
        votes_up,
        votes_down,
        votes_total: votes_up - votes_down,
    }
}

/// Full read model for one complaint: its fields, the representatives
/// attached at creation, and the current vote tallies.
#[derive(Debug, Clone, Serialize)]
pub struct ComplaintSummary {
    #[serde(flatten)]
    pub complaint: Complaint,
    pub mna: Option<Representative>,
    pub mpa: Option<Representative>,
    #[serde(flatten)]
    pub votes: VoteTally,
}

/// Builds the summary for a complaint, recomputing tallies from the current
/// vote rows. Fails with NotFound only for a missing complaint; a dangling
/// representative link is reported as absent, not as an error.
pub async fn build_summary(pool: &PgPool, complaint_id: i64) -> Result<ComplaintSummary, AppError> {
    let complaint: Option<Complaint> = sqlx::query_as("SELECT * FROM complaints WHERE id = $1")
        .bind(complaint_id)
        .fetch_optional(pool)
        .await?;
    let complaint = complaint
        .ok_or_else(|| AppError::NotFound(format!("Complaint {complaint_id} not found")))?;

    let values: Vec<i32> = sqlx::query_scalar("SELECT value FROM votes WHERE complaint_id = $1")
        .bind(complaint_id)
        .fetch_all(pool)
        .await?;
    let votes = tally(&values);

    let mna = fetch_rep(pool, complaint.mna_id).await?;
    let mpa = fetch_rep(pool, complaint.mpa_id).await?;

    Ok(ComplaintSummary {
        complaint,
        mna,
        mpa,
        votes,
    })
}

async fn fetch_rep(pool: &PgPool, id: Option<i64>) -> Result<Option<Representative>, AppError> {
    let Some(id) = id else {
        return Ok(None);
    };
    Ok(sqlx::query_as("SELECT * FROM representatives WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tally() {
        assert_eq!(tally(&[]), VoteTally::default());
    }

    #[test]
    fn test_total_is_up_minus_down() {
        let t = tally(&[1, 1, 1, -1, -1]);
        assert_eq!(t.votes_up, 3);
        assert_eq!(t.votes_down, 2);
        assert_eq!(t.votes_total, 1);
    }

    #[test]
    fn test_single_upvote() {
        assert_eq!(tally(&[1]).votes_total, 1);
    }

    #[test]
    fn test_revote_shifts_total_by_two() {
        // one voter flipping +1 -> -1 replaces the row's value
        let before = tally(&[1]);
        let after = tally(&[-1]);
        assert_eq!(after.votes_total - before.votes_total, -2);
    }

    #[test]
    fn test_all_downvotes() {
        let t = tally(&[-1, -1, -1]);
        assert_eq!(t.votes_up, 0);
        assert_eq!(t.votes_total, -3);
    }
}
