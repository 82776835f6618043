//! Team API endpoints.

use std::collections::HashSet;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{
    created, index_entity, list_options, require_field, success, unindex_entities, ApiResult,
};
use crate::db::{Collection, ListOptions};
use crate::errors::AppError;
use crate::models::{CreateTeamRequest, Team, UpdateTeamRequest, User, UserFilter};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListTeamsQuery {
    pub search: Option<String>,
    pub ordering: Option<String>,
}

/// GET /api/teams - List teams, highest points first unless ordered otherwise.
pub async fn list_teams(
    State(state): State<AppState>,
    Query(query): Query<ListTeamsQuery>,
) -> ApiResult<Vec<Team>> {
    let options = list_options(&state, Collection::Teams, (), query.search, query.ordering)?;
    success(state.repo.list_teams(&options).await?)
}

/// GET /api/teams/{id} - Get a single team.
pub async fn get_team(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Team> {
    match state.repo.get_team(&id).await? {
        Some(team) => success(team),
        None => Err(AppError::NotFound(format!("Team {} not found", id))),
    }
}

/// GET /api/teams/{id}/members - Users whose team is this team's name.
pub async fn team_members(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<User>> {
    let team = state
        .repo
        .get_team(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))?;

    let options = ListOptions::filtered(UserFilter {
        team: Some(team.name),
        role: None,
    });
    success(state.repo.list_users(&options).await?)
}

/// POST /api/teams - Create a new team.
pub async fn create_team(
    State(state): State<AppState>,
    Json(request): Json<CreateTeamRequest>,
) -> ApiResult<Team> {
    require_field(&request.name, "Name")?;

    let team = state.repo.create_team(&request).await?;
    index_entity(&state, &team).await;
    tracing::info!("Created team {}", team.name);
    created(team)
}

/// PUT|PATCH /api/teams/{id} - Update a team.
pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTeamRequest>,
) -> ApiResult<Team> {
    if let Some(name) = &request.name {
        require_field(name, "Name")?;
    }

    let team = state.repo.update_team(&id, &request).await?;
    index_entity(&state, &team).await;
    success(team)
}

/// DELETE /api/teams/{id} - Delete a team. Its users keep their team name.
pub async fn delete_team(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.repo.delete_team(&id).await?;
    unindex_entities(&state, &HashSet::from([id])).await;
    success(())
}
