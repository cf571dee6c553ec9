use sqlx::PgPool;

use crate::errors::AppError;

/// Normalizes a raw vote to exactly +1 or -1. Anything >= 1 is an upvote;
/// everything else, including 0, is a downvote.
pub fn normalize(raw_value: i32) -> i32 {
    if raw_value >= 1 {
        1
    } else {
        -1
    }
}

/// Inserts or overwrites this voter's vote on a complaint. The unique
/// (complaint_id, voter_id) constraint makes concurrent re-votes from the
/// same voter last-writer-wins instead of duplicate rows.
pub async fn upsert_vote(
    pool: &PgPool,
    complaint_id: i64,
    voter_id: &str,
    value: i32,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO votes (complaint_id, voter_id, value)
        VALUES ($1, $2, $3)
        ON CONFLICT (complaint_id, voter_id) DO UPDATE SET value = EXCLUDED.value
        "#,
    )
    .bind(complaint_id)
    .bind(voter_id)
    .bind(value)
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_is_upvote() {
        assert_eq!(normalize(1), 1);
        assert_eq!(normalize(7), 1);
    }

    #[test]
    fn test_zero_is_downvote() {
        assert_eq!(normalize(0), -1);
    }

    #[test]
    fn test_negative_is_downvote() {
        assert_eq!(normalize(-1), -1);
        assert_eq!(normalize(-100), -1);
    }
}
