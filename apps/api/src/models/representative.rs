use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Which assembly a representative sits in. Wire format matches the
/// Postgres `rep_role` enum ("MNA" / "MPA").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "rep_role", rename_all = "UPPERCASE")]
pub enum RepRole {
    /// Member of the National Assembly
    Mna,
    /// Member of the Provincial Assembly
    Mpa,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Representative {
    pub id: i64,
    pub role: RepRole,
    /// Constituency code, e.g. "NA-247" or "PS-110"
    pub code: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub district: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&RepRole::Mna).unwrap(), "\"MNA\"");
        assert_eq!(serde_json::to_string(&RepRole::Mpa).unwrap(), "\"MPA\"");
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(serde_json::from_str::<RepRole>("\"SENATOR\"").is_err());
    }
}
