//! User API endpoints.

use std::collections::HashSet;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{
    created, index_entity, list_options, present, require_field, required_param, success,
    unindex_entities, ApiResult,
};
use crate::db::{Collection, ListOptions};
use crate::errors::AppError;
use crate::models::{
    ActivityFilter, CreateUserRequest, UpdateUserRequest, User, UserFilter, UserRole,
};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub team: Option<String>,
    pub role: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UsersByTeamQuery {
    pub team: Option<String>,
}

/// GET /api/users - List users.
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Vec<User>> {
    let role = match present(query.role) {
        Some(raw) => Some(
            UserRole::parse(&raw)
                .ok_or_else(|| AppError::BadRequest(format!("Invalid role '{}'", raw)))?,
        ),
        None => None,
    };
    let filter = UserFilter {
        team: present(query.team),
        role,
    };

    let options = list_options(&state, Collection::Users, filter, query.search, query.ordering)?;
    success(state.repo.list_users(&options).await?)
}

/// GET /api/users/by_team?team= - Users of one team.
pub async fn users_by_team(
    State(state): State<AppState>,
    Query(query): Query<UsersByTeamQuery>,
) -> ApiResult<Vec<User>> {
    let team = required_param(query.team, "Team parameter is required")?;

    let options = ListOptions::filtered(UserFilter {
        team: Some(team),
        role: None,
    });
    success(state.repo.list_users(&options).await?)
}

/// GET /api/users/{id} - Get a single user.
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<User> {
    match state.repo.get_user(&id).await? {
        Some(user) => success(user),
        None => Err(AppError::NotFound(format!("User {} not found", id))),
    }
}

/// POST /api/users - Create a new user.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<User> {
    require_field(&request.name, "Name")?;
    require_field(&request.email, "Email")?;
    require_field(&request.team, "Team")?;
    validate_email(&request.email)?;

    let user = state.repo.create_user(&request).await?;
    index_entity(&state, &user).await;
    tracing::info!("Created user {} ({})", user.id, user.email);
    created(user)
}

/// PUT|PATCH /api/users/{id} - Update a user.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<User> {
    if let Some(name) = &request.name {
        require_field(name, "Name")?;
    }
    if let Some(email) = &request.email {
        validate_email(email)?;
    }
    if let Some(team) = &request.team {
        require_field(team, "Team")?;
    }

    let user = state.repo.update_user(&id, &request).await?;
    index_entity(&state, &user).await;

    // Activity documents carry the owner's name.
    let activities = state
        .repo
        .list_activities(&ListOptions::filtered(ActivityFilter {
            user_email: Some(user.email.clone()),
            ..ActivityFilter::default()
        }))
        .await?;
    for activity in &activities {
        index_entity(&state, activity).await;
    }

    success(user)
}

/// DELETE /api/users/{id} - Delete a user and everything that references them.
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let user = state
        .repo
        .get_user(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;
    let activities = state
        .repo
        .list_activities(&ListOptions::filtered(ActivityFilter {
            user_email: Some(user.email.clone()),
            ..ActivityFilter::default()
        }))
        .await?;

    state.repo.delete_user(&id).await?;

    let mut removed: HashSet<String> = activities.into_iter().map(|a| a.id).collect();
    removed.insert(id);
    unindex_entities(&state, &removed).await;

    tracing::info!("Deleted user {}", user.email);
    success(())
}

fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(AppError::Validation(format!(
            "Enter a valid email address: '{}'",
            email
        )));
    }
    Ok(())
}
