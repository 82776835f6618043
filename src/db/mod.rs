//! Database module for SQLite persistence.
//!
//! SQLite is the source of truth for all application data.

mod query;
mod repository;

pub use query::*;
pub use repository::*;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// The five entity collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Teams,
    Activities,
    Leaderboard,
    Workouts,
}

impl Collection {
    /// Every collection, dependents before the tables they reference.
    pub const ALL: [Collection; 5] = [
        Collection::Leaderboard,
        Collection::Activities,
        Collection::Users,
        Collection::Teams,
        Collection::Workouts,
    ];

    /// Table name, also used as the URL segment and search tag.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Teams => "teams",
            Collection::Activities => "activities",
            Collection::Leaderboard => "leaderboard",
            Collection::Workouts => "workouts",
        }
    }
}

/// Render a timestamp in the fixed-width form stored in every table.
///
/// Microsecond precision with a `Z` suffix keeps lexical and chronological
/// order identical, which the `ORDER BY` clauses rely on.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time in storage form.
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            team TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'member',
            avatar TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS teams (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT '',
            leader TEXT NOT NULL DEFAULT '',
            members TEXT NOT NULL DEFAULT '[]',
            total_points INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS activities (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            activity_type TEXT NOT NULL,
            duration_minutes INTEGER NOT NULL,
            distance_km REAL NOT NULL DEFAULT 0,
            calories_burned INTEGER NOT NULL DEFAULT 0,
            points INTEGER NOT NULL DEFAULT 0,
            date TEXT NOT NULL,
            notes TEXT NOT NULL DEFAULT ''
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS leaderboard (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            total_points INTEGER NOT NULL DEFAULT 0,
            rank INTEGER NOT NULL,
            last_updated TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS workouts (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            category TEXT NOT NULL,
            difficulty TEXT NOT NULL,
            duration_minutes INTEGER NOT NULL,
            exercises TEXT NOT NULL DEFAULT '[]',
            target_muscles TEXT NOT NULL DEFAULT '[]',
            recommended_for TEXT NOT NULL DEFAULT '[]'
        );
        "#,
    )
    .execute(pool)
    .await?;

    ensure_email_index(pool).await?;

    // Create indexes for common queries
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_users_team ON users(team);
        CREATE INDEX IF NOT EXISTS idx_activities_user_id ON activities(user_id);
        CREATE INDEX IF NOT EXISTS idx_activities_date ON activities(date);
        CREATE INDEX IF NOT EXISTS idx_leaderboard_rank ON leaderboard(rank);
        CREATE INDEX IF NOT EXISTS idx_workouts_category ON workouts(category);
        CREATE INDEX IF NOT EXISTS idx_workouts_difficulty ON workouts(difficulty);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
