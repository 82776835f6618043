//! Sample data seeding.
//!
//! Generation is pure: [`SeedData::generate`] turns a plan, a clock reading and
//! a random source into every record. [`apply`] then replaces the contents of
//! the store with those records inside one transaction.

mod plan;
mod standings;

pub use plan::*;
pub use standings::*;

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::db::{
    delete_all, ensure_email_index, format_timestamp, insert_activity, insert_leaderboard_entry,
    insert_team, insert_user, insert_workout, update_team_points, Collection, Repository,
};
use crate::errors::AppError;
use crate::models::{Activity, LeaderboardEntry, Team, User, Workout};

pub const ACTIVITY_TYPES: [&str; 6] = [
    "running",
    "cycling",
    "swimming",
    "strength_training",
    "yoga",
    "hiking",
];

pub const ACTIVITIES_PER_USER: RangeInclusive<usize> = 5..=10;
pub const DURATION_MINUTES: RangeInclusive<i64> = 20..=120;
pub const DISTANCE_KM: RangeInclusive<f64> = 2.0..=15.0;
pub const CALORIES_BURNED: RangeInclusive<i64> = 150..=800;
pub const POINTS: RangeInclusive<i64> = 10..=50;
pub const DAYS_AGO: RangeInclusive<i64> = 1..=30;

/// Every record one seed run writes.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub users: Vec<User>,
    pub teams: Vec<Team>,
    pub activities: Vec<Activity>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub workouts: Vec<Workout>,
    /// Final `total_points` per team name, zero for teams without activities.
    pub team_points: BTreeMap<String, i64>,
}

impl SeedData {
    pub fn generate<R: Rng>(plan: &SeedPlan, now: DateTime<Utc>, rng: &mut R) -> Self {
        let users = plan.users(now);
        let teams = plan.teams(now);

        let mut activities = Vec::new();
        for user in &users {
            activities.extend(random_activities(user, now, rng));
        }

        let standings = Standings::tally(&activities);
        let leaderboard = standings.leaderboard(&users, &format_timestamp(now));
        let team_points = teams
            .iter()
            .map(|team| (team.name.clone(), standings.team_total(&team.name)))
            .collect();

        Self {
            users,
            teams,
            activities,
            leaderboard,
            workouts: plan.workouts(),
            team_points,
        }
    }
}

fn random_activities<R: Rng>(
    user: &User,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Activity> {
    let count = rng.gen_range(ACTIVITIES_PER_USER);
    (0..count)
        .map(|session| {
            let activity_type = ACTIVITY_TYPES[rng.gen_range(0..ACTIVITY_TYPES.len())];
            let distance: f64 = rng.gen_range(DISTANCE_KM);
            Activity {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: user.id.clone(),
                user_name: user.name.clone(),
                user_email: user.email.clone(),
                team: user.team.clone(),
                activity_type: activity_type.to_string(),
                duration_minutes: rng.gen_range(DURATION_MINUTES),
                distance_km: (distance * 100.0).round() / 100.0,
                calories_burned: rng.gen_range(CALORIES_BURNED),
                points: rng.gen_range(POINTS),
                date: format_timestamp(now - Duration::days(rng.gen_range(DAYS_AGO))),
                notes: format!("Training session {}", session + 1),
            }
        })
        .collect()
}

/// Counts read back from the store after a seed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub users: i64,
    pub teams: i64,
    pub activities: i64,
    pub leaderboard: i64,
    pub workouts: i64,
    pub team_points: BTreeMap<String, i64>,
}

impl SeedReport {
    pub fn log(&self) {
        tracing::info!(
            users = self.users,
            teams = self.teams,
            activities = self.activities,
            leaderboard = self.leaderboard,
            workouts = self.workouts,
            "Database populated"
        );
        for (team, points) in &self.team_points {
            tracing::info!("{}: {} points", team, points);
        }
    }
}

/// Replace the store contents with `data`.
///
/// Runs in one transaction. Any failure, such as a duplicate email, rolls back
/// and leaves the previous contents in place.
pub async fn apply(repo: &Repository, data: &SeedData) -> Result<SeedReport, AppError> {
    let mut tx = repo.begin().await?;

    for collection in Collection::ALL {
        let removed = delete_all(&mut *tx, collection).await?;
        tracing::debug!("Cleared {} {}", removed, collection.name());
    }
    ensure_email_index(&mut *tx).await?;

    for user in &data.users {
        insert_user(&mut *tx, user).await?;
    }
    for team in &data.teams {
        insert_team(&mut *tx, team).await?;
    }
    for activity in &data.activities {
        insert_activity(&mut *tx, activity).await?;
    }
    for entry in &data.leaderboard {
        insert_leaderboard_entry(&mut *tx, entry).await?;
    }
    for (team, points) in &data.team_points {
        update_team_points(&mut *tx, team, *points).await?;
    }
    for workout in &data.workouts {
        insert_workout(&mut *tx, workout).await?;
    }

    tx.commit().await?;

    Ok(SeedReport {
        users: repo.count(Collection::Users).await?,
        teams: repo.count(Collection::Teams).await?,
        activities: repo.count(Collection::Activities).await?,
        leaderboard: repo.count(Collection::Leaderboard).await?,
        workouts: repo.count(Collection::Workouts).await?,
        team_points: data.team_points.clone(),
    })
}

/// Generate a fresh dataset from `plan` and write it.
pub async fn run<R: Rng>(
    repo: &Repository,
    plan: &SeedPlan,
    rng: &mut R,
) -> Result<SeedReport, AppError> {
    let data = SeedData::generate(plan, Utc::now(), rng);
    tracing::info!(
        "Seeding {} users, {} activities, {} workouts",
        data.users.len(),
        data.activities.len(),
        data.workouts.len()
    );

    let report = apply(repo, &data).await?;
    report.log();
    Ok(report)
}
