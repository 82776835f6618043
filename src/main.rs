//! OctoFit Tracker Backend
//!
//! REST backend for a team fitness tracker with SQLite persistence and Tantivy
//! full-text search, plus a seed command that fills the store with sample data.

mod api;
mod config;
mod db;
mod errors;
mod models;
mod search;
mod seed;

use std::path::Path;
use std::sync::Arc;

use axum::{routing::get, Router};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use search::SearchIndex;
use seed::{SeedPlan, SeedReport};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub search: Arc<SearchIndex>,
    pub config: Arc<Config>,
}

#[derive(Parser)]
#[command(name = "octofit-backend", about = "OctoFit Tracker backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API server (default)
    Serve,
    /// Replace the database contents with the sample superhero dataset
    Seed {
        /// Seed the random generator for a reproducible dataset
        #[arg(long)]
        rng_seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Seed { rng_seed } => seed_database(config, rng_seed).await,
    }
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting OctoFit Tracker Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Index path: {:?}", config.index_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Initialize search index
    let search = Arc::new(SearchIndex::open(&config.index_path)?);

    // Build initial search index from database
    tracing::info!("Building search index...");
    let indexed = api::refresh_search_index(&repo, &search).await?;
    tracing::info!("Search index built with {} documents", indexed);

    let bind_addr = config.bind_addr;
    let state = AppState {
        repo,
        search,
        config: Arc::new(config),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn seed_database(
    config: Config,
    rng_seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Seeding database at {:?}", config.db_path);

    let pool = db::init_database(&config.db_path).await?;
    let repo = Repository::new(pool);

    let mut rng = match rng_seed {
        Some(value) => {
            tracing::info!("Using RNG seed {}", value);
            StdRng::seed_from_u64(value)
        }
        None => StdRng::from_entropy(),
    };

    seed_store(&repo, &config.index_path, &mut rng).await?;
    Ok(())
}

/// Reseed the store, then rebuild the on-disk search index.
///
/// A running server holds the index writer lock. In that case the index is
/// left alone with a warning and the server rebuilds it on its next start.
async fn seed_store(
    repo: &Repository,
    index_path: &Path,
    rng: &mut StdRng,
) -> Result<SeedReport, errors::AppError> {
    let search = match SearchIndex::open(index_path) {
        Ok(search) => Some(search),
        Err(e) => {
            tracing::warn!(
                "Search index at {:?} is in use (is the server running?): {}. \
                 It will be rebuilt when the server restarts.",
                index_path,
                e
            );
            None
        }
    };

    let report = seed::run(repo, &SeedPlan::default(), rng).await?;

    if let Some(search) = search {
        match api::refresh_search_index(repo, &search).await {
            Ok(indexed) => tracing::info!("Search index rebuilt with {} documents", indexed),
            Err(e) => tracing::warn!("Failed to rebuild search index: {}", e),
        }
    }

    Ok(report)
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/", get(api::api_root))
        // Users
        .route("/users", get(api::list_users).post(api::create_user))
        .route("/users/by_team", get(api::users_by_team))
        .route(
            "/users/{id}",
            get(api::get_user)
                .put(api::update_user)
                .patch(api::update_user)
                .delete(api::delete_user),
        )
        // Teams
        .route("/teams", get(api::list_teams).post(api::create_team))
        .route(
            "/teams/{id}",
            get(api::get_team)
                .put(api::update_team)
                .patch(api::update_team)
                .delete(api::delete_team),
        )
        .route("/teams/{id}/members", get(api::team_members))
        // Activities
        .route(
            "/activities",
            get(api::list_activities).post(api::create_activity),
        )
        .route("/activities/by_user", get(api::activities_by_user))
        .route("/activities/by_team", get(api::activities_by_team))
        .route(
            "/activities/{id}",
            get(api::get_activity)
                .put(api::update_activity)
                .patch(api::update_activity)
                .delete(api::delete_activity),
        )
        // Leaderboard
        .route("/leaderboard", get(api::list_leaderboard))
        .route("/leaderboard/top_users", get(api::top_users))
        .route("/leaderboard/by_team", get(api::leaderboard_by_team))
        .route("/leaderboard/{id}", get(api::get_leaderboard_entry))
        // Workouts
        .route("/workouts", get(api::list_workouts).post(api::create_workout))
        .route("/workouts/by_difficulty", get(api::workouts_by_difficulty))
        .route("/workouts/by_category", get(api::workouts_by_category))
        .route(
            "/workouts/{id}",
            get(api::get_workout)
                .put(api::update_workout)
                .patch(api::update_workout)
                .delete(api::delete_workout),
        );

    // Health check and the trailing-slash form of the API root
    let root_routes = Router::new()
        .route("/api/", get(api::api_root))
        .route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(root_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
