//! API root: a directory of the collections.

use std::collections::BTreeMap;

use axum::{
    extract::State,
    http::{header, HeaderMap},
};
use serde::Serialize;

use super::{success, ApiResult};
use crate::db::Collection;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ApiRoot {
    pub message: &'static str,
    pub endpoints: BTreeMap<&'static str, String>,
    pub documentation: BTreeMap<&'static str, &'static str>,
}

/// GET /api/ - Describe the available collections.
pub async fn api_root(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<ApiRoot> {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| state.config.bind_addr.to_string());

    let endpoints = Collection::ALL
        .iter()
        .map(|c| (c.name(), format!("http://{}/api/{}", host, c.name())))
        .collect();

    let documentation = Collection::ALL
        .iter()
        .map(|c| (c.name(), describe(*c)))
        .collect();

    success(ApiRoot {
        message: "Welcome to the OctoFit Tracker API",
        endpoints,
        documentation,
    })
}

fn describe(collection: Collection) -> &'static str {
    match collection {
        Collection::Users => "Manage user profiles and authentication",
        Collection::Teams => "Manage team creation and membership",
        Collection::Activities => "Log and track fitness activities",
        Collection::Leaderboard => "View competitive rankings",
        Collection::Workouts => "Get personalized workout suggestions",
    }
}
