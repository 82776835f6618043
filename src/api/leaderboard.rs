//! Leaderboard API endpoints. Read-only; entries are written by the seed routine.

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::{present, required_param, success, ApiResult};
use crate::db::ListOptions;
use crate::errors::AppError;
use crate::models::{LeaderboardEntry, LeaderboardFilter};
use crate::AppState;

const DEFAULT_TOP_USERS: u32 = 10;

#[derive(Debug, Default, Deserialize)]
pub struct ListLeaderboardQuery {
    pub team: Option<String>,
    pub ordering: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TopUsersQuery {
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardByTeamQuery {
    pub team: Option<String>,
}

/// GET /api/leaderboard - List entries by rank.
pub async fn list_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<ListLeaderboardQuery>,
) -> ApiResult<Vec<LeaderboardEntry>> {
    let options = ListOptions {
        filter: LeaderboardFilter {
            team: present(query.team),
        },
        ordering: present(query.ordering),
        ..ListOptions::default()
    };
    success(state.repo.list_leaderboard(&options).await?)
}

/// GET /api/leaderboard/top_users?limit= - The first N entries by rank.
pub async fn top_users(
    State(state): State<AppState>,
    Query(query): Query<TopUsersQuery>,
) -> ApiResult<Vec<LeaderboardEntry>> {
    let limit = parse_limit(query.limit)?;

    let options = ListOptions {
        limit: Some(limit),
        ..ListOptions::default()
    };
    success(state.repo.list_leaderboard(&options).await?)
}

/// GET /api/leaderboard/by_team?team= - Entries of one team, by rank.
pub async fn leaderboard_by_team(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardByTeamQuery>,
) -> ApiResult<Vec<LeaderboardEntry>> {
    let team = required_param(query.team, "Team parameter is required")?;

    let options = ListOptions::filtered(LeaderboardFilter { team: Some(team) });
    success(state.repo.list_leaderboard(&options).await?)
}

/// GET /api/leaderboard/{id} - Get a single entry.
pub async fn get_leaderboard_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<LeaderboardEntry> {
    match state.repo.get_leaderboard_entry(&id).await? {
        Some(entry) => success(entry),
        None => Err(AppError::NotFound(format!(
            "Leaderboard entry {} not found",
            id
        ))),
    }
}

fn parse_limit(raw: Option<String>) -> Result<u32, AppError> {
    match present(raw) {
        None => Ok(DEFAULT_TOP_USERS),
        Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
            AppError::BadRequest(format!(
                "Limit must be a non-negative integer, got '{}'",
                raw
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None).unwrap(), 10);
        assert_eq!(parse_limit(Some(String::new())).unwrap(), 10);
        assert_eq!(parse_limit(Some("3".to_string())).unwrap(), 3);
        assert!(matches!(
            parse_limit(Some("three".to_string())),
            Err(AppError::BadRequest(_))
        ));
        assert!(parse_limit(Some("-1".to_string())).is_err());
    }
}
