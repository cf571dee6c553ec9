use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::team::{Team, TeamMember};

pub const DEFAULT_ROLE: &str = "Volunteer";

#[derive(Debug, Deserialize)]
pub struct TeamMemberJoin {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
}

/// Finds the member a join request refers to: exact email match first, then
/// exact phone match. Matching never crosses team boundaries because the
/// caller passes only this team's members.
pub fn find_member_match<'a>(
    members: &'a [TeamMember],
    email: Option<&str>,
    phone: Option<&str>,
) -> Option<&'a TeamMember> {
    if let Some(email) = email {
        if let Some(found) = members.iter().find(|m| m.email.as_deref() == Some(email)) {
            return Some(found);
        }
    }
    if let Some(phone) = phone {
        return members.iter().find(|m| m.phone.as_deref() == Some(phone));
    }
    None
}

/// Handles a volunteer joining a team. A repeat join (matched by email or
/// phone) refreshes name and role but never touches the stored contact
/// fields; a first join inserts a new member.
pub async fn join_team(pool: &PgPool, team_id: i64, req: &TeamMemberJoin) -> Result<Team, AppError> {
    let team: Option<Team> = sqlx::query_as("SELECT * FROM teams WHERE id = $1")
        .bind(team_id)
        .fetch_optional(pool)
        .await?;
    let team = team.ok_or_else(|| AppError::NotFound(format!("Team {team_id} not found")))?;

    if req.email.is_none() && req.phone.is_none() {
        return Err(AppError::Validation(
            "Provide at least one of email or phone".to_string(),
        ));
    }

    let members: Vec<TeamMember> = sqlx::query_as("SELECT * FROM team_members WHERE team_id = $1")
        .bind(team_id)
        .fetch_all(pool)
        .await?;

    match find_member_match(&members, req.email.as_deref(), req.phone.as_deref()) {
        Some(existing) => {
            // keep the stored name when the new one is empty
            let name = if req.name.is_empty() {
                existing.name.as_str()
            } else {
                req.name.as_str()
            };
            let role = req.role.as_deref().unwrap_or(existing.role.as_str());
            sqlx::query("UPDATE team_members SET name = $1, role = $2 WHERE id = $3")
                .bind(name)
                .bind(role)
                .bind(existing.id)
                .execute(pool)
                .await?;
            info!("Refreshed member {} of team {team_id}", existing.id);
        }
        None => {
            sqlx::query(
                r#"
                INSERT INTO team_members (team_id, name, email, phone, role)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(team_id)
            .bind(&req.name)
            .bind(&req.email)
            .bind(&req.phone)
            .bind(req.role.as_deref().unwrap_or(DEFAULT_ROLE))
            .execute(pool)
            .await?;
            info!("New member joined team {team_id}");
        }
    }

    Ok(team)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn member(id: i64, email: Option<&str>, phone: Option<&str>) -> TeamMember {
        TeamMember {
            id,
            team_id: 1,
            name: format!("Member {id}"),
            email: email.map(String::from),
            phone: phone.map(String::from),
            role: DEFAULT_ROLE.to_string(),
            joined_at: Utc::now(),
        }
    }

    #[test]
    fn test_email_match_found() {
        let members = [member(1, Some("a@x.pk"), None), member(2, Some("b@x.pk"), None)];
        let found = find_member_match(&members, Some("b@x.pk"), None).unwrap();
        assert_eq!(found.id, 2);
    }

    #[test]
    fn test_email_match_wins_over_phone() {
        let members = [member(1, Some("a@x.pk"), None), member(2, None, Some("0300-1"))];
        let found = find_member_match(&members, Some("a@x.pk"), Some("0300-1")).unwrap();
        assert_eq!(found.id, 1);
    }

    #[test]
    fn test_phone_fallback_when_email_unknown() {
        let members = [member(1, Some("a@x.pk"), None), member(2, None, Some("0300-1"))];
        let found = find_member_match(&members, Some("new@x.pk"), Some("0300-1")).unwrap();
        assert_eq!(found.id, 2);
    }

    #[test]
    fn test_no_match() {
        let members = [member(1, Some("a@x.pk"), Some("0300-1"))];
        assert!(find_member_match(&members, Some("b@x.pk"), Some("0300-2")).is_none());
    }

    #[test]
    fn test_none_identifiers_never_match_null_fields() {
        let members = [member(1, None, None)];
        assert!(find_member_match(&members, None, None).is_none());
    }
}
