//! Client-related types shared between the backend contract and the panel
//!
//! The login endpoint and the identity endpoint do not agree on how the
//! role is shaped: one may send `roles: [..]`, the other `role: ".."`.
//! Both go through [`IdentityResponse::normalized_role`].

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login form (sent form-encoded, not JSON)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: IdentityResponse,
}

/// Raw identity record as returned by `/auth/login` and `/auth/me`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityResponse {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

impl IdentityResponse {
    /// First element of `roles`, else `role`, else empty string.
    ///
    /// An empty `roles` list yields an empty role rather than falling
    /// through to `role`.
    pub fn normalized_role(&self) -> String {
        match (&self.roles, &self.role) {
            (Some(roles), _) => roles.first().cloned().unwrap_or_default(),
            (None, Some(role)) => role.clone(),
            (None, None) => String::new(),
        }
    }
}

/// Resolved user identity held by the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub role: String,
}

impl UserInfo {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

impl From<IdentityResponse> for UserInfo {
    fn from(identity: IdentityResponse) -> Self {
        let role = identity.normalized_role();
        Self {
            id: identity.id,
            username: identity.username,
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(json: &str) -> IdentityResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_role_from_roles_list() {
        let id = identity(r#"{"id":1,"username":"ala","roles":["admin","manager"]}"#);
        assert_eq!(id.normalized_role(), "admin");
    }

    #[test]
    fn test_role_from_singular_field() {
        let id = identity(r#"{"id":1,"username":"ala","role":"manager"}"#);
        assert_eq!(id.normalized_role(), "manager");
    }

    #[test]
    fn test_role_missing() {
        let id = identity(r#"{"id":1,"username":"ala"}"#);
        assert_eq!(id.normalized_role(), "");
    }

    #[test]
    fn test_roles_list_wins_over_role() {
        let id = identity(r#"{"id":1,"username":"ala","role":"manager","roles":["admin"]}"#);
        assert_eq!(id.normalized_role(), "admin");

        let empty = identity(r#"{"id":1,"username":"ala","role":"manager","roles":[]}"#);
        assert_eq!(empty.normalized_role(), "");
    }

    #[test]
    fn test_user_info_from_login_payload() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"access_token":"t0k","user":{"id":7,"username":"szef","roles":["admin"]}}"#,
        )
        .unwrap();
        let user = UserInfo::from(resp.user);
        assert_eq!(user.id, 7);
        assert!(user.is_admin());
    }
}
