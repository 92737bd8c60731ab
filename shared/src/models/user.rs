//! User Model

use serde::{Deserialize, Serialize};

/// Panel user (password is write-only and never read back)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub role: String,
}

/// Create/update user payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub username: String,
    pub password: String,
    pub role: String,
}

/// Roles the panel can assign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserRole {
    Admin,
    #[default]
    Manager,
}

impl UserRole {
    pub const ALL: [UserRole; 2] = [UserRole::Admin, UserRole::Manager];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Manager => "Manager",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }
}
