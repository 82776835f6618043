//! User model.

use serde::{Deserialize, Serialize};

/// Role of a user within their team.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    TeamLead,
    #[default]
    Member,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::TeamLead => "team_lead",
            UserRole::Member => "member",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "team_lead" => Some(UserRole::TeamLead),
            "member" => Some(UserRole::Member),
            _ => None,
        }
    }
}

/// A registered athlete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub team: String,
    pub role: UserRole,
    pub avatar: String,
    pub created_at: String,
}

/// Request body for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub team: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub avatar: String,
}

/// Request body for updating an existing user. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Equality filters accepted by the user list.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub team: Option<String>,
    pub role: Option<UserRole>,
}
