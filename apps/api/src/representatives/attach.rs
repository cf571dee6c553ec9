use chrono::Utc;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::representative::RepRole;

/// Finds the representative holding `role` for an exact, case-sensitive
/// constituency code. If seed data contains duplicates for the pair, the
/// first row found wins; no ordering is guaranteed.
async fn find_rep_id(pool: &PgPool, role: RepRole, code: &str) -> Result<Option<i64>, AppError> {
    Ok(
        sqlx::query_scalar("SELECT id FROM representatives WHERE role = $1 AND code = $2 LIMIT 1")
            .bind(role)
            .bind(code)
            .fetch_optional(pool)
            .await?,
    )
}

/// Links a complaint to the representatives matching its constituency codes,
/// clearing the link for any role without a match. Runs once, right after
/// the complaint is created.
pub async fn attach_representatives(
    pool: &PgPool,
    complaint_id: i64,
    area_code_na: Option<&str>,
    area_code_ps: Option<&str>,
) -> Result<(), AppError> {
    let mna_id = match area_code_na {
        Some(code) => find_rep_id(pool, RepRole::Mna, code).await?,
        None => None,
    };
    let mpa_id = match area_code_ps {
        Some(code) => find_rep_id(pool, RepRole::Mpa, code).await?,
        None => None,
    };

    sqlx::query("UPDATE complaints SET mna_id = $1, mpa_id = $2, updated_at = $3 WHERE id = $4")
        .bind(mna_id)
        .bind(mpa_id)
        .bind(Utc::now())
        .bind(complaint_id)
        .execute(pool)
        .await?;

    Ok(())
}
