use axum::{extract::State, Json};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::representative::{RepRole, Representative};
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct SeedRep {
    pub role: RepRole,
    pub code: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub district: Option<String>,
}

/// Upserts representatives keyed by (role, code): an existing pair gets its
/// name and contact fields refreshed, a new pair is inserted.
pub async fn seed_representatives(
    pool: &PgPool,
    items: &[SeedRep],
) -> Result<Vec<Representative>, AppError> {
    let mut reps = Vec::with_capacity(items.len());
    for item in items {
        let rep: Representative = sqlx::query_as(
            r#"
            INSERT INTO representatives (role, code, name, phone, email, district)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (role, code) DO UPDATE
                SET name = EXCLUDED.name,
                    phone = EXCLUDED.phone,
                    email = EXCLUDED.email,
                    district = EXCLUDED.district
            RETURNING *
            "#,
        )
        .bind(item.role)
        .bind(&item.code)
        .bind(&item.name)
        .bind(&item.phone)
        .bind(&item.email)
        .bind(&item.district)
        .fetch_one(pool)
        .await?;
        reps.push(rep);
    }
    info!("Seeded {} representatives", reps.len());
    Ok(reps)
}

/// POST /seed/representatives
pub async fn handle_seed_representatives(
    State(state): State<AppState>,
    Json(items): Json<Vec<SeedRep>>,
) -> Result<Json<Vec<Representative>>, AppError> {
    Ok(Json(seed_representatives(&state.db, &items).await?))
}

/// GET /representatives
pub async fn handle_list_representatives(
    State(state): State<AppState>,
) -> Result<Json<Vec<Representative>>, AppError> {
    let rows: Vec<Representative> = sqlx::query_as("SELECT * FROM representatives")
        .fetch_all(&state.db)
        .await?;
    Ok(Json(rows))
}

/// POST /seed/example
/// Seeds the example Karachi representatives through the regular upsert path.
pub async fn handle_seed_example(
    State(state): State<AppState>,
) -> Result<Json<Vec<Representative>>, AppError> {
    let items = vec![
        SeedRep {
            role: RepRole::Mna,
            code: "NA-247".to_string(),
            name: "Example MNA South".to_string(),
            phone: Some("0300-0000000".to_string()),
            email: Some("mna.south@example.pk".to_string()),
            district: Some("Karachi South".to_string()),
        },
        SeedRep {
            role: RepRole::Mpa,
            code: "PS-110".to_string(),
            name: "Example MPA South".to_string(),
            phone: Some("0301-0000000".to_string()),
            email: Some("mpa.south@example.pk".to_string()),
            district: Some("Karachi South".to_string()),
        },
        SeedRep {
            role: RepRole::Mna,
            code: "NA-242".to_string(),
            name: "Example MNA East".to_string(),
            phone: Some("0302-0000000".to_string()),
            email: Some("mna.east@example.pk".to_string()),
            district: Some("Karachi East".to_string()),
        },
        SeedRep {
            role: RepRole::Mpa,
            code: "PS-102".to_string(),
            name: "Example MPA East".to_string(),
            phone: Some("0303-0000000".to_string()),
            email: Some("mpa.east@example.pk".to_string()),
            district: Some("Karachi East".to_string()),
        },
    ];
    Ok(Json(seed_representatives(&state.db, &items).await?))
}
