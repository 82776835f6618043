//! Leaderboard model.

use serde::{Deserialize, Serialize};

/// A ranked standing for one user. Entries are only produced by the seed routine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub team: String,
    pub total_points: i64,
    pub rank: i64,
    pub last_updated: String,
}

/// Equality filters accepted by the leaderboard list.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardFilter {
    pub team: Option<String>,
}
