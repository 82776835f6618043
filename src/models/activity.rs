//! Activity model.

use serde::{Deserialize, Serialize};

/// A logged workout session.
///
/// The row only stores `user_id`; `user_name`, `user_email` and `team` are
/// resolved from the owning user when the activity is read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub team: String,
    pub activity_type: String,
    pub duration_minutes: i64,
    pub distance_km: f64,
    pub calories_burned: i64,
    pub points: i64,
    pub date: String,
    pub notes: String,
}

/// Request body for logging a new activity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivityRequest {
    /// Email of the user the activity belongs to.
    pub user_email: String,
    pub activity_type: String,
    pub duration_minutes: i64,
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub calories_burned: i64,
    #[serde(default)]
    pub points: i64,
    /// RFC 3339 timestamp; defaults to now.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub notes: String,
}

/// Request body for editing an activity. Measurements are immutable once logged.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateActivityRequest {
    pub notes: String,
}

/// Equality filters accepted by the activity list.
#[derive(Debug, Clone, Default)]
pub struct ActivityFilter {
    pub user_email: Option<String>,
    pub team: Option<String>,
    pub activity_type: Option<String>,
}
