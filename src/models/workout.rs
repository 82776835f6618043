//! Workout suggestion model.

use serde::{Deserialize, Serialize};

/// A suggested workout, independent of users and teams.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub difficulty: String,
    pub duration_minutes: i64,
    pub exercises: Vec<String>,
    pub target_muscles: Vec<String>,
    pub recommended_for: Vec<String>,
}

/// Request body for creating a new workout.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkoutRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub difficulty: String,
    pub duration_minutes: i64,
    #[serde(default)]
    pub exercises: Vec<String>,
    #[serde(default)]
    pub target_muscles: Vec<String>,
    #[serde(default)]
    pub recommended_for: Vec<String>,
}

/// Request body for updating an existing workout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorkoutRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub exercises: Option<Vec<String>>,
    #[serde(default)]
    pub target_muscles: Option<Vec<String>>,
    #[serde(default)]
    pub recommended_for: Option<Vec<String>>,
}

/// Equality filters accepted by the workout list.
#[derive(Debug, Clone, Default)]
pub struct WorkoutFilter {
    pub category: Option<String>,
    pub difficulty: Option<String>,
}
