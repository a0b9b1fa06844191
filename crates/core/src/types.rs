use serde::{Deserialize, Serialize};

/// A matched access/refresh credential pair.
///
/// At most one pair is active per session; storing a new one overwrites the
/// previous pair without keeping history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// A role attached to a staff account (e.g. `ROLE_ADMIN`, `ROLE_STAFF`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    pub name: String,
}

/// Staff profile as returned by the backend and persisted under the `user`
/// session key.
///
/// Older backend builds return a flat `role` string instead of a `roles`
/// list; both are kept so callers can check either.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl UserProfile {
    /// Whether any of the account's roles matches `name` (either the
    /// structured list or the flat fallback field).
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r.name == name) || self.role.as_deref() == Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_role_lookup_checks_both_shapes() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"id": 7, "username": "ana", "roles": [{"name": "ROLE_ADMIN"}]}"#,
        )
        .unwrap();
        assert!(profile.has_role("ROLE_ADMIN"));
        assert!(!profile.has_role("ROLE_STAFF"));

        let flat: UserProfile =
            serde_json::from_str(r#"{"id": 8, "username": "bo", "role": "ROLE_STAFF"}"#).unwrap();
        assert!(flat.has_role("ROLE_STAFF"));
    }
}
