use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::team::{Team, TeamMember};
use crate::state::AppState;
use crate::teams::membership::{join_team, TeamMemberJoin};

#[derive(Debug, Deserialize)]
pub struct TeamCreate {
    pub name: String,
    pub area: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub area: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ActiveFilter {
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamRead {
    #[serde(flatten)]
    pub team: Team,
    pub member_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamDetail {
    #[serde(flatten)]
    pub team: Team,
    pub member_count: i64,
    pub members: Vec<TeamMember>,
}

async fn team_read(pool: &PgPool, team: Team) -> Result<TeamRead, AppError> {
    let member_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM team_members WHERE team_id = $1")
            .bind(team.id)
            .fetch_one(pool)
            .await?;
    Ok(TeamRead { team, member_count })
}

async fn team_detail(pool: &PgPool, team: Team) -> Result<TeamDetail, AppError> {
    let members: Vec<TeamMember> =
        sqlx::query_as("SELECT * FROM team_members WHERE team_id = $1 ORDER BY joined_at ASC")
            .bind(team.id)
            .fetch_all(pool)
            .await?;
    Ok(TeamDetail {
        member_count: members.len() as i64,
        team,
        members,
    })
}

async fn fetch_team(pool: &PgPool, team_id: i64) -> Result<Team, AppError> {
    let team: Option<Team> = sqlx::query_as("SELECT * FROM teams WHERE id = $1")
        .bind(team_id)
        .fetch_optional(pool)
        .await?;
    team.ok_or_else(|| AppError::NotFound(format!("Team {team_id} not found")))
}

/// POST /teams
pub async fn handle_create_team(
    State(state): State<AppState>,
    Json(req): Json<TeamCreate>,
) -> Result<Json<TeamRead>, AppError> {
    let team: Team = sqlx::query_as(
        "INSERT INTO teams (name, area, description) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&req.name)
    .bind(&req.area)
    .bind(&req.description)
    .fetch_one(&state.db)
    .await?;
    Ok(Json(team_read(&state.db, team).await?))
}

/// GET /teams?active=
pub async fn handle_list_teams(
    State(state): State<AppState>,
    Query(filter): Query<ActiveFilter>,
) -> Result<Json<Vec<TeamRead>>, AppError> {
    let teams: Vec<Team> = match filter.active {
        Some(active) => {
            sqlx::query_as("SELECT * FROM teams WHERE is_active = $1 ORDER BY created_at DESC")
                .bind(active)
                .fetch_all(&state.db)
                .await?
        }
        None => {
            sqlx::query_as("SELECT * FROM teams ORDER BY created_at DESC")
                .fetch_all(&state.db)
                .await?
        }
    };

    let mut reads = Vec::with_capacity(teams.len());
    for team in teams {
        reads.push(team_read(&state.db, team).await?);
    }
    Ok(Json(reads))
}

/// GET /teams/active
pub async fn handle_list_active_teams(
    State(state): State<AppState>,
) -> Result<Json<Vec<TeamRead>>, AppError> {
    let teams: Vec<Team> =
        sqlx::query_as("SELECT * FROM teams WHERE is_active = TRUE ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?;
    let mut reads = Vec::with_capacity(teams.len());
    for team in teams {
        reads.push(team_read(&state.db, team).await?);
    }
    Ok(Json(reads))
}

/// GET /teams/:id
pub async fn handle_get_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TeamDetail>, AppError> {
    let team = fetch_team(&state.db, id).await?;
    Ok(Json(team_detail(&state.db, team).await?))
}

/// PATCH /teams/:id
/// Partial update; teams are deactivated via is_active, never deleted.
pub async fn handle_update_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<TeamUpdate>,
) -> Result<Json<TeamRead>, AppError> {
    let existing = fetch_team(&state.db, id).await?;

    let updated: Team = sqlx::query_as(
        r#"
        UPDATE teams
        SET name = $1, area = $2, description = $3, is_active = $4, updated_at = $5
        WHERE id = $6
        RETURNING *
        "#,
    )
    .bind(req.name.as_deref().unwrap_or(&existing.name))
    .bind(req.area.as_ref().or(existing.area.as_ref()))
    .bind(req.description.as_ref().or(existing.description.as_ref()))
    .bind(req.is_active.unwrap_or(existing.is_active))
    .bind(Utc::now())
    .bind(id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(team_read(&state.db, updated).await?))
}

/// POST /teams/:id/join
pub async fn handle_join_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<TeamMemberJoin>,
) -> Result<Json<TeamDetail>, AppError> {
    let team = join_team(&state.db, id, &req).await?;
    Ok(Json(team_detail(&state.db, team).await?))
}
