// Volunteer teams: CRUD with soft-deactivate, and joins deduplicated by
// email-or-phone identity within a team.

pub mod handlers;
pub mod membership;
