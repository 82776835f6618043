//! Point aggregation and leaderboard ranking.

use std::collections::{BTreeMap, HashMap};

use crate::models::{Activity, LeaderboardEntry, User};

/// Points summed per user and, independently, per team.
#[derive(Debug, Default)]
pub struct Standings {
    /// Keyed by user email.
    pub user_points: HashMap<String, i64>,
    /// Keyed by team name.
    pub team_points: BTreeMap<String, i64>,
}

impl Standings {
    /// Sum activity points. Each activity counts once for its user and once for its team.
    pub fn tally(activities: &[Activity]) -> Self {
        let mut standings = Self::default();
        for activity in activities {
            *standings
                .user_points
                .entry(activity.user_email.clone())
                .or_default() += activity.points;
            *standings
                .team_points
                .entry(activity.team.clone())
                .or_default() += activity.points;
        }
        standings
    }

    pub fn user_total(&self, email: &str) -> i64 {
        self.user_points.get(email).copied().unwrap_or(0)
    }

    pub fn team_total(&self, team: &str) -> i64 {
        self.team_points.get(team).copied().unwrap_or(0)
    }

    /// One entry per user, ranked 1..=N by descending points.
    ///
    /// The sort is stable, so users with equal points keep their order in
    /// `users` and still receive distinct consecutive ranks.
    pub fn leaderboard(&self, users: &[User], last_updated: &str) -> Vec<LeaderboardEntry> {
        let mut entries: Vec<LeaderboardEntry> = users
            .iter()
            .map(|user| LeaderboardEntry {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: user.id.clone(),
                user_name: user.name.clone(),
                user_email: user.email.clone(),
                team: user.team.clone(),
                total_points: self.user_total(&user.email),
                rank: 0,
                last_updated: last_updated.to_string(),
            })
            .collect();

        entries.sort_by(|a, b| b.total_points.cmp(&a.total_points));
        for (position, entry) in entries.iter_mut().enumerate() {
            entry.rank = position as i64 + 1;
        }
        entries
    }
}
