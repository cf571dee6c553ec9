use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::complaints::status::resolved_at_after;
use crate::complaints::summary::{build_summary, ComplaintSummary};
use crate::complaints::voting::{normalize, upsert_vote};
use crate::constituency;
use crate::errors::AppError;
use crate::models::complaint::{Complaint, ComplaintStatus};
use crate::representatives::attach::attach_representatives;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ComplaintCreate {
    pub title: String,
    pub description: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub address: Option<String>,
    pub area_code_na: Option<String>,
    pub area_code_ps: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: ComplaintStatus,
}

#[derive(Debug, Deserialize)]
pub struct VoteCreate {
    pub voter_id: String,
    /// +1 for upvote, -1 for downvote; other values are normalized.
    pub value: i32,
}

/// POST /complaints
pub async fn handle_create_complaint(
    State(state): State<AppState>,
    Json(req): Json<ComplaintCreate>,
) -> Result<Json<ComplaintSummary>, AppError> {
    // The resolver fills only the codes the caller left out, each field
    // independently. A supplied code is taken as-is, even if it disagrees
    // with the coordinates.
    let (area_code_na, area_code_ps) = match (req.area_code_na, req.area_code_ps) {
        (Some(na), Some(ps)) => (na, ps),
        (na, ps) => {
            let (resolved_na, resolved_ps) = constituency::resolve(req.lat, req.lng);
            (
                na.unwrap_or_else(|| resolved_na.to_string()),
                ps.unwrap_or_else(|| resolved_ps.to_string()),
            )
        }
    };

    let complaint: Complaint = sqlx::query_as(
        r#"
        INSERT INTO complaints (title, description, lat, lng, address, area_code_na, area_code_ps)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(&req.title)
    .bind(&req.description)
    .bind(req.lat)
    .bind(req.lng)
    .bind(&req.address)
    .bind(&area_code_na)
    .bind(&area_code_ps)
    .fetch_one(&state.db)
    .await?;

    // Second write, not atomic with the insert: a crash in between leaves
    // the complaint without representative links.
    attach_representatives(
        &state.db,
        complaint.id,
        Some(area_code_na.as_str()),
        Some(area_code_ps.as_str()),
    )
    .await?;

    info!(
        "Created complaint {} in {}/{}",
        complaint.id, area_code_na, area_code_ps
    );

    Ok(Json(build_summary(&state.db, complaint.id).await?))
}

/// GET /complaints
pub async fn handle_list_complaints(
    State(state): State<AppState>,
) -> Result<Json<Vec<Complaint>>, AppError> {
    let rows: Vec<Complaint> =
        sqlx::query_as("SELECT * FROM complaints ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?;
    Ok(Json(rows))
}

/// GET /complaints/:id
pub async fn handle_get_complaint(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Complaint>, AppError> {
    let complaint: Option<Complaint> = sqlx::query_as("SELECT * FROM complaints WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    let complaint =
        complaint.ok_or_else(|| AppError::NotFound(format!("Complaint {id} not found")))?;
    Ok(Json(complaint))
}

/// PATCH /complaints/:id/status
/// Transitions are unrestricted; resolved_at is stamped on the first move to
/// Resolved and kept thereafter.
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<StatusUpdate>,
) -> Result<Json<Complaint>, AppError> {
    let existing: Option<Complaint> = sqlx::query_as("SELECT * FROM complaints WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    let existing =
        existing.ok_or_else(|| AppError::NotFound(format!("Complaint {id} not found")))?;

    let now = Utc::now();
    let resolved_at = resolved_at_after(req.status, existing.resolved_at, now);

    let updated: Complaint = sqlx::query_as(
        r#"
        UPDATE complaints
        SET status = $1, updated_at = $2, resolved_at = $3
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(req.status)
    .bind(now)
    .bind(resolved_at)
    .bind(id)
    .fetch_one(&state.db)
    .await?;

    info!("Complaint {id} status set to {:?}", req.status);

    Ok(Json(updated))
}

/// POST /complaints/:id/vote
pub async fn handle_vote(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<VoteCreate>,
) -> Result<Json<ComplaintSummary>, AppError> {
    if req.voter_id.len() < 3 {
        return Err(AppError::Validation(
            "voter_id must be at least 3 characters".to_string(),
        ));
    }

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM complaints WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    if exists.is_none() {
        return Err(AppError::NotFound(format!("Complaint {id} not found")));
    }

    upsert_vote(&state.db, id, &req.voter_id, normalize(req.value)).await?;

    Ok(Json(build_summary(&state.db, id).await?))
}

/// GET /complaints/:id/summary
pub async fn handle_summary(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ComplaintSummary>, AppError> {
    Ok(Json(build_summary(&state.db, id).await?))
}
