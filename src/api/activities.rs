//! Activity API endpoints.

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
use crate::models::{Activity, ActivityFilter, CreateActivityRequest, UpdateActivityRequest};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListActivitiesQuery {
    pub user_email: Option<String>,
    pub team: Option<String>,
    pub activity_type: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActivitiesByUserQuery {
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActivitiesByTeamQuery {
    pub team: Option<String>,
}

/// GET /api/activities - List activities, newest first unless ordered otherwise.
pub async fn list_activities(
    State(state): State<AppState>,
    Query(query): Query<ListActivitiesQuery>,
) -> ApiResult<Vec<Activity>> {
    let filter = ActivityFilter {
        user_email: present(query.user_email),
        team: present(query.team),
        activity_type: present(query.activity_type),
    };

    let options = list_options(
        &state,
        Collection::Activities,
        filter,
        query.search,
        query.ordering,
    )?;
    success(state.repo.list_activities(&options).await?)
}

/// GET /api/activities/by_user?email= - Activities of one user.
pub async fn activities_by_user(
    State(state): State<AppState>,
    Query(query): Query<ActivitiesByUserQuery>,
) -> ApiResult<Vec<Activity>> {
    let email = required_param(query.email, "Email parameter is required")?;

    let options = ListOptions::filtered(ActivityFilter {
        user_email: Some(email),
        ..ActivityFilter::default()
    });
    success(state.repo.list_activities(&options).await?)
}

/// GET /api/activities/by_team?team= - Activities of one team.
pub async fn activities_by_team(
    State(state): State<AppState>,
    Query(query): Query<ActivitiesByTeamQuery>,
) -> ApiResult<Vec<Activity>> {
    let team = required_param(query.team, "Team parameter is required")?;

    let options = ListOptions::filtered(ActivityFilter {
        team: Some(team),
        ..ActivityFilter::default()
    });
    success(state.repo.list_activities(&options).await?)
}

/// GET /api/activities/{id} - Get a single activity.
pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Activity> {
    match state.repo.get_activity(&id).await? {
        Some(activity) => success(activity),
        None => Err(AppError::NotFound(format!("Activity {} not found", id))),
    }
}

/// POST /api/activities - Log an activity for an existing user.
///
/// Points and totals elsewhere are not recomputed; only a reseed does that.
pub async fn create_activity(
    State(state): State<AppState>,
    Json(request): Json<CreateActivityRequest>,
) -> ApiResult<Activity> {
    require_field(&request.user_email, "User email")?;
    require_field(&request.activity_type, "Activity type")?;
    if request.duration_minutes <= 0 {
        return Err(AppError::Validation(
            "Duration must be a positive number of minutes".to_string(),
        ));
    }
    if request.distance_km < 0.0 || request.calories_burned < 0 || request.points < 0 {
        return Err(AppError::Validation(
            "Distance, calories and points cannot be negative".to_string(),
        ));
    }

    let activity = state.repo.create_activity(&request).await?;
    index_entity(&state, &activity).await;
    tracing::info!(
        "Logged {} for {} ({} points)",
        activity.activity_type,
        activity.user_email,
        activity.points
    );
    created(activity)
}

/// PUT|PATCH /api/activities/{id} - Edit the note on an activity.
pub async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateActivityRequest>,
) -> ApiResult<Activity> {
    success(state.repo.update_activity_notes(&id, &request.notes).await?)
}

/// DELETE /api/activities/{id} - Delete an activity.
pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_activity(&id).await?;
    unindex_entities(&state, &HashSet::from([id])).await;
    success(())
}
