//! REST API module.
//!
//! Contains all API routes and handlers. Every handler answers with the
//! `{success, data}` envelope or an [`AppError`].

mod activities;
mod leaderboard;
mod root;
mod teams;
mod users;
mod workouts;

pub use activities::*;
pub use leaderboard::*;
pub use root::*;
pub use teams::*;
pub use users::*;
pub use workouts::*;

use std::collections::HashSet;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::db::{Collection, ListOptions, Repository};
use crate::errors::AppError;
use crate::search::{SearchIndex, Searchable};
use crate::AppState;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            status: StatusCode::OK,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}

/// Create a `201 Created` API response.
pub fn created<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data).with_status(StatusCode::CREATED))
}

/// Treat an empty or blank query parameter as absent.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A query parameter that must be present and non-empty.
pub fn required_param(value: Option<String>, message: &str) -> Result<String, AppError> {
    present(value).ok_or_else(|| AppError::BadRequest(message.to_string()))
}

/// Reject a blank required body field.
pub fn require_field(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// List options with the search restriction and ordering applied.
pub fn list_options<F: Default>(
    state: &AppState,
    collection: Collection,
    filter: F,
    search: Option<String>,
    ordering: Option<String>,
) -> Result<ListOptions<F>, AppError> {
    let only_ids = match present(search) {
        Some(query) => Some(state.search.matching_ids(collection, &query)?),
        None => None,
    };

    Ok(ListOptions {
        filter,
        only_ids,
        ordering: present(ordering),
        limit: None,
    })
}

/// Index or re-index an entity. Failures are logged, not returned.
pub async fn index_entity(state: &AppState, entity: &impl Searchable) {
    let doc = entity.search_doc();
    if let Err(e) = state.search.index(&doc).await {
        tracing::warn!(
            "Failed to index {} {}: {}",
            doc.collection.name(),
            doc.id,
            e
        );
    }
}

/// Drop entities from the search index. Failures are logged, not returned.
pub async fn unindex_entities(state: &AppState, ids: &HashSet<String>) {
    for id in ids {
        if let Err(e) = state.search.remove(id).await {
            tracing::warn!("Failed to remove {} from index: {}", id, e);
        }
    }
}

/// Rebuild the search index from everything in the store.
pub async fn refresh_search_index(
    repo: &Repository,
    search: &SearchIndex,
) -> Result<usize, AppError> {
    let mut docs = Vec::new();
    docs.extend(
        repo.list_users(&ListOptions::default())
            .await?
            .iter()
            .map(Searchable::search_doc),
    );
    docs.extend(
        repo.list_teams(&ListOptions::default())
            .await?
            .iter()
            .map(Searchable::search_doc),
    );
    docs.extend(
        repo.list_activities(&ListOptions::default())
            .await?
            .iter()
            .map(Searchable::search_doc),
    );
    docs.extend(
        repo.list_workouts(&ListOptions::default())
            .await?
            .iter()
            .map(Searchable::search_doc),
    );

    search.rebuild(&docs).await?;
    Ok(docs.len())
}
