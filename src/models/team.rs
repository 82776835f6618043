//! Team model.

use serde::{Deserialize, Serialize};

/// A team of users competing for points.
///
/// `total_points` is derived from the team's activities and is only ever
/// written by the seed routine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub description: String,
    pub leader: String,
    pub members: Vec<String>,
    pub total_points: i64,
    pub created_at: String,
}

/// Request body for creating a new team.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub leader: String,
    #[serde(default)]
    pub members: Vec<String>,
}

/// Request body for updating an existing team.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTeamRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub leader: Option<String>,
    #[serde(default)]
    pub members: Option<Vec<String>>,
}
