//! Workout suggestion API endpoints.

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
use crate::models::{CreateWorkoutRequest, UpdateWorkoutRequest, Workout, WorkoutFilter};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListWorkoutsQuery {
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkoutsByDifficultyQuery {
    pub difficulty: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkoutsByCategoryQuery {
    pub category: Option<String>,
}

/// GET /api/workouts - List workouts.
pub async fn list_workouts(
    State(state): State<AppState>,
    Query(query): Query<ListWorkoutsQuery>,
) -> ApiResult<Vec<Workout>> {
    let filter = WorkoutFilter {
        category: present(query.category),
        difficulty: present(query.difficulty),
    };

    let options = list_options(
        &state,
        Collection::Workouts,
        filter,
        query.search,
        query.ordering,
    )?;
    success(state.repo.list_workouts(&options).await?)
}

/// GET /api/workouts/by_difficulty?difficulty=
pub async fn workouts_by_difficulty(
    State(state): State<AppState>,
    Query(query): Query<WorkoutsByDifficultyQuery>,
) -> ApiResult<Vec<Workout>> {
    let difficulty = required_param(query.difficulty, "Difficulty parameter is required")?;

    let options = ListOptions::filtered(WorkoutFilter {
        difficulty: Some(difficulty),
        ..WorkoutFilter::default()
    });
    success(state.repo.list_workouts(&options).await?)
}

/// GET /api/workouts/by_category?category=
pub async fn workouts_by_category(
    State(state): State<AppState>,
    Query(query): Query<WorkoutsByCategoryQuery>,
) -> ApiResult<Vec<Workout>> {
    let category = required_param(query.category, "Category parameter is required")?;

    let options = ListOptions::filtered(WorkoutFilter {
        category: Some(category),
        ..WorkoutFilter::default()
    });
    success(state.repo.list_workouts(&options).await?)
}

/// GET /api/workouts/{id} - Get a single workout.
pub async fn get_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Workout> {
    match state.repo.get_workout(&id).await? {
        Some(workout) => success(workout),
        None => Err(AppError::NotFound(format!("Workout {} not found", id))),
    }
}

/// POST /api/workouts - Create a new workout suggestion.
pub async fn create_workout(
    State(state): State<AppState>,
    Json(request): Json<CreateWorkoutRequest>,
) -> ApiResult<Workout> {
    require_field(&request.name, "Name")?;
    require_field(&request.category, "Category")?;
    require_field(&request.difficulty, "Difficulty")?;
    validate_duration(request.duration_minutes)?;

    let workout = state.repo.create_workout(&request).await?;
    index_entity(&state, &workout).await;
    created(workout)
}

/// PUT|PATCH /api/workouts/{id} - Update a workout.
pub async fn update_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateWorkoutRequest>,
) -> ApiResult<Workout> {
    if let Some(name) = &request.name {
        require_field(name, "Name")?;
    }
    if let Some(duration) = request.duration_minutes {
        validate_duration(duration)?;
    }

    let workout = state.repo.update_workout(&id, &request).await?;
    index_entity(&state, &workout).await;
    success(workout)
}

/// DELETE /api/workouts/{id} - Delete a workout.
pub async fn delete_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_workout(&id).await?;
    unindex_entities(&state, &HashSet::from([id])).await;
    success(())
}

fn validate_duration(minutes: i64) -> Result<(), AppError> {
    if minutes <= 0 {
        return Err(AppError::Validation(
            "Duration must be a positive number of minutes".to_string(),
        ));
    }
    Ok(())
}
