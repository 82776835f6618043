//! Database repository for CRUD operations.
//!
//! Write helpers are generic over the executor so the seed routine can run
//! them inside a single transaction.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, QueryBuilder, Row, Sqlite, SqlitePool, Transaction};

use super::{format_timestamp, now_timestamp, Collection, ListOptions, SortSpec};
use crate::errors::AppError;
use crate::models::{
    Activity, ActivityFilter, CreateActivityRequest, CreateTeamRequest, CreateUserRequest,
    CreateWorkoutRequest, LeaderboardEntry, LeaderboardFilter, Team, UpdateTeamRequest,
    UpdateUserRequest, UpdateWorkoutRequest, User, UserFilter, UserRole, Workout, WorkoutFilter,
};

const USER_SELECT: &str =
    "SELECT u.id, u.name, u.email, u.team, u.role, u.avatar, u.created_at FROM users u";

const TEAM_SELECT: &str = "SELECT t.id, t.name, t.description, t.leader, t.members, t.total_points, t.created_at FROM teams t";

const ACTIVITY_SELECT: &str = r#"SELECT a.id, a.user_id, u.name AS user_name, u.email AS user_email,
                  u.team AS team, a.activity_type, a.duration_minutes, a.distance_km,
                  a.calories_burned, a.points, a.date, a.notes
           FROM activities a JOIN users u ON u.id = a.user_id"#;

const LEADERBOARD_SELECT: &str = r#"SELECT l.id, l.user_id, u.name AS user_name, u.email AS user_email,
                  u.team AS team, l.total_points, l.rank, l.last_updated
           FROM leaderboard l JOIN users u ON u.id = l.user_id"#;

const WORKOUT_SELECT: &str = r#"SELECT w.id, w.name, w.description, w.category, w.difficulty,
                  w.duration_minutes, w.exercises, w.target_muscles, w.recommended_for
           FROM workouts w"#;

const USER_SORT: SortSpec = SortSpec {
    fields: &[("name", "u.name"), ("created_at", "u.created_at")],
    default: "name",
};

const TEAM_SORT: SortSpec = SortSpec {
    fields: &[
        ("name", "t.name"),
        ("total_points", "t.total_points"),
        ("created_at", "t.created_at"),
    ],
    default: "-total_points",
};

const ACTIVITY_SORT: SortSpec = SortSpec {
    fields: &[
        ("date", "a.date"),
        ("points", "a.points"),
        ("calories_burned", "a.calories_burned"),
    ],
    default: "-date",
};

const LEADERBOARD_SORT: SortSpec = SortSpec {
    fields: &[("rank", "l.rank"), ("total_points", "l.total_points")],
    default: "rank",
};

const WORKOUT_SORT: SortSpec = SortSpec {
    fields: &[("name", "w.name"), ("duration_minutes", "w.duration_minutes")],
    default: "name",
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Start a transaction on the underlying pool.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, AppError> {
        Ok(self.pool.begin().await?)
    }

    /// Number of records in a collection.
    pub async fn count(&self, collection: Collection) -> Result<i64, AppError> {
        let row = sqlx::query(&format!(
            "SELECT COUNT(*) AS count FROM {}",
            collection.name()
        ))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get("count"))
    }

    // ==================== USER OPERATIONS ====================

    /// List users matching the options.
    pub async fn list_users(&self, options: &ListOptions<UserFilter>) -> Result<Vec<User>, AppError> {
        if restricts_to_nothing(options) {
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::<Sqlite>::new(USER_SELECT);
        qb.push(" WHERE 1 = 1");
        if let Some(team) = &options.filter.team {
            qb.push(" AND u.team = ").push_bind(team.clone());
        }
        if let Some(role) = options.filter.role {
            qb.push(" AND u.role = ").push_bind(role.as_str());
        }
        push_list_tail(&mut qb, "u.id", options, &USER_SORT);

        let rows = qb.build().fetch_all(&self.pool).await?;
        Ok(rows.iter().map(user_from_row).collect())
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(&format!("{} WHERE u.id = ?", USER_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Get a user by email.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(&format!("{} WHERE u.email = ?", USER_SELECT))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Create a new user.
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User, AppError> {
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            name: request.name.clone(),
            email: request.email.clone(),
            team: request.team.clone(),
            role: request.role,
            avatar: request.avatar.clone(),
            created_at: now_timestamp(),
        };

        insert_user(&self.pool, &user).await?;
        Ok(user)
    }

    /// Apply a partial update to a user.
    pub async fn update_user(&self, id: &str, request: &UpdateUserRequest) -> Result<User, AppError> {
        let existing = self
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        let updated = User {
            name: request.name.clone().unwrap_or(existing.name),
            email: request.email.clone().unwrap_or(existing.email),
            team: request.team.clone().unwrap_or(existing.team),
            role: request.role.unwrap_or(existing.role),
            avatar: request.avatar.clone().unwrap_or(existing.avatar),
            ..existing
        };

        sqlx::query("UPDATE users SET name = ?, email = ?, team = ?, role = ?, avatar = ? WHERE id = ?")
            .bind(&updated.name)
            .bind(&updated.email)
            .bind(&updated.team)
            .bind(updated.role.as_str())
            .bind(&updated.avatar)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(updated)
    }

    /// Delete a user. Their activities and leaderboard entry go with them.
    pub async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }

    // ==================== TEAM OPERATIONS ====================

    /// List teams.
    pub async fn list_teams(&self, options: &ListOptions<()>) -> Result<Vec<Team>, AppError> {
        if restricts_to_nothing(options) {
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::<Sqlite>::new(TEAM_SELECT);
        qb.push(" WHERE 1 = 1");
        push_list_tail(&mut qb, "t.id", options, &TEAM_SORT);

        let rows = qb.build().fetch_all(&self.pool).await?;
        Ok(rows.iter().map(team_from_row).collect())
    }

    /// Get a team by ID.
    pub async fn get_team(&self, id: &str) -> Result<Option<Team>, AppError> {
        let row = sqlx::query(&format!("{} WHERE t.id = ?", TEAM_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(team_from_row))
    }

    /// Get a team by its unique name.
    pub async fn get_team_by_name(&self, name: &str) -> Result<Option<Team>, AppError> {
        let row = sqlx::query(&format!("{} WHERE t.name = ?", TEAM_SELECT))
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(team_from_row))
    }

    /// Create a new team with zero points.
    pub async fn create_team(&self, request: &CreateTeamRequest) -> Result<Team, AppError> {
        let team = Team {
            id: uuid::Uuid::new_v4().to_string(),
            name: request.name.clone(),
            description: request.description.clone(),
            leader: request.leader.clone(),
            members: request.members.clone(),
            total_points: 0,
            created_at: now_timestamp(),
        };

        insert_team(&self.pool, &team).await?;
        Ok(team)
    }

    /// Apply a partial update to a team. Points are never touched here.
    pub async fn update_team(&self, id: &str, request: &UpdateTeamRequest) -> Result<Team, AppError> {
        let existing = self
            .get_team(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))?;

        let updated = Team {
            name: request.name.clone().unwrap_or(existing.name),
            description: request.description.clone().unwrap_or(existing.description),
            leader: request.leader.clone().unwrap_or(existing.leader),
            members: request.members.clone().unwrap_or(existing.members),
            ..existing
        };

        sqlx::query("UPDATE teams SET name = ?, description = ?, leader = ?, members = ? WHERE id = ?")
            .bind(&updated.name)
            .bind(&updated.description)
            .bind(&updated.leader)
            .bind(to_json_array(&updated.members))
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(updated)
    }

    /// Delete a team.
    pub async fn delete_team(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM teams WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Team {} not found", id)));
        }
        Ok(())
    }

    // ==================== ACTIVITY OPERATIONS ====================

    /// List activities matching the options.
    pub async fn list_activities(
        &self,
        options: &ListOptions<ActivityFilter>,
    ) -> Result<Vec<Activity>, AppError> {
        if restricts_to_nothing(options) {
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::<Sqlite>::new(ACTIVITY_SELECT);
        qb.push(" WHERE 1 = 1");
        if let Some(email) = &options.filter.user_email {
            qb.push(" AND u.email = ").push_bind(email.clone());
        }
        if let Some(team) = &options.filter.team {
            qb.push(" AND u.team = ").push_bind(team.clone());
        }
        if let Some(activity_type) = &options.filter.activity_type {
            qb.push(" AND a.activity_type = ")
                .push_bind(activity_type.clone());
        }
        push_list_tail(&mut qb, "a.id", options, &ACTIVITY_SORT);

        let rows = qb.build().fetch_all(&self.pool).await?;
        Ok(rows.iter().map(activity_from_row).collect())
    }

    /// Get an activity by ID.
    pub async fn get_activity(&self, id: &str) -> Result<Option<Activity>, AppError> {
        let row = sqlx::query(&format!("{} WHERE a.id = ?", ACTIVITY_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(activity_from_row))
    }

    /// Log a new activity for the user owning `request.user_email`.
    pub async fn create_activity(
        &self,
        request: &CreateActivityRequest,
    ) -> Result<Activity, AppError> {
        let user = self
            .get_user_by_email(&request.user_email)
            .await?
            .ok_or_else(|| {
                AppError::Validation(format!("No user with email {}", request.user_email))
            })?;

        let date = match &request.date {
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map(|d| format_timestamp(d.with_timezone(&Utc)))
                .map_err(|e| AppError::Validation(format!("Invalid date '{}': {}", raw, e)))?,
            None => now_timestamp(),
        };

        let activity = Activity {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user.id,
            user_name: user.name,
            user_email: user.email,
            team: user.team,
            activity_type: request.activity_type.clone(),
            duration_minutes: request.duration_minutes,
            distance_km: request.distance_km,
            calories_burned: request.calories_burned,
            points: request.points,
            date,
            notes: request.notes.clone(),
        };

        insert_activity(&self.pool, &activity).await?;
        Ok(activity)
    }

    /// Replace the note on an activity.
    pub async fn update_activity_notes(&self, id: &str, notes: &str) -> Result<Activity, AppError> {
        let result = sqlx::query("UPDATE activities SET notes = ? WHERE id = ?")
            .bind(notes)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Activity {} not found", id)));
        }

        self.get_activity(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", id)))
    }

    /// Delete an activity.
    pub async fn delete_activity(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Activity {} not found", id)));
        }
        Ok(())
    }

    // ==================== LEADERBOARD OPERATIONS ====================

    /// List leaderboard entries matching the options.
    pub async fn list_leaderboard(
        &self,
        options: &ListOptions<LeaderboardFilter>,
    ) -> Result<Vec<LeaderboardEntry>, AppError> {
        if restricts_to_nothing(options) {
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::<Sqlite>::new(LEADERBOARD_SELECT);
        qb.push(" WHERE 1 = 1");
        if let Some(team) = &options.filter.team {
            qb.push(" AND u.team = ").push_bind(team.clone());
        }
        push_list_tail(&mut qb, "l.id", options, &LEADERBOARD_SORT);

        let rows = qb.build().fetch_all(&self.pool).await?;
        Ok(rows.iter().map(leaderboard_from_row).collect())
    }

    /// Get a leaderboard entry by ID.
    pub async fn get_leaderboard_entry(
        &self,
        id: &str,
    ) -> Result<Option<LeaderboardEntry>, AppError> {
        let row = sqlx::query(&format!("{} WHERE l.id = ?", LEADERBOARD_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(leaderboard_from_row))
    }

    // ==================== WORKOUT OPERATIONS ====================

    /// List workouts matching the options.
    pub async fn list_workouts(
        &self,
        options: &ListOptions<WorkoutFilter>,
    ) -> Result<Vec<Workout>, AppError> {
        if restricts_to_nothing(options) {
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::<Sqlite>::new(WORKOUT_SELECT);
        qb.push(" WHERE 1 = 1");
        if let Some(category) = &options.filter.category {
            qb.push(" AND w.category = ").push_bind(category.clone());
        }
        if let Some(difficulty) = &options.filter.difficulty {
            qb.push(" AND w.difficulty = ").push_bind(difficulty.clone());
        }
        push_list_tail(&mut qb, "w.id", options, &WORKOUT_SORT);

        let rows = qb.build().fetch_all(&self.pool).await?;
        Ok(rows.iter().map(workout_from_row).collect())
    }

    /// Get a workout by ID.
    pub async fn get_workout(&self, id: &str) -> Result<Option<Workout>, AppError> {
        let row = sqlx::query(&format!("{} WHERE w.id = ?", WORKOUT_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(workout_from_row))
    }

    /// Create a new workout.
    pub async fn create_workout(&self, request: &CreateWorkoutRequest) -> Result<Workout, AppError> {
        let workout = Workout {
            id: uuid::Uuid::new_v4().to_string(),
            name: request.name.clone(),
            description: request.description.clone(),
            category: request.category.clone(),
            difficulty: request.difficulty.clone(),
            duration_minutes: request.duration_minutes,
            exercises: request.exercises.clone(),
            target_muscles: request.target_muscles.clone(),
            recommended_for: request.recommended_for.clone(),
        };

        insert_workout(&self.pool, &workout).await?;
        Ok(workout)
    }

    /// Apply a partial update to a workout.
    pub async fn update_workout(
        &self,
        id: &str,
        request: &UpdateWorkoutRequest,
    ) -> Result<Workout, AppError> {
        let existing = self
            .get_workout(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))?;

        let updated = Workout {
            name: request.name.clone().unwrap_or(existing.name),
            description: request.description.clone().unwrap_or(existing.description),
            category: request.category.clone().unwrap_or(existing.category),
            difficulty: request.difficulty.clone().unwrap_or(existing.difficulty),
            duration_minutes: request.duration_minutes.unwrap_or(existing.duration_minutes),
            exercises: request.exercises.clone().unwrap_or(existing.exercises),
            target_muscles: request.target_muscles.clone().unwrap_or(existing.target_muscles),
            recommended_for: request
                .recommended_for
                .clone()
                .unwrap_or(existing.recommended_for),
            ..existing
        };

        sqlx::query(
            r#"UPDATE workouts SET
                name = ?, description = ?, category = ?, difficulty = ?, duration_minutes = ?,
                exercises = ?, target_muscles = ?, recommended_for = ?
            WHERE id = ?"#,
        )
        .bind(&updated.name)
        .bind(&updated.description)
        .bind(&updated.category)
        .bind(&updated.difficulty)
        .bind(updated.duration_minutes)
        .bind(to_json_array(&updated.exercises))
        .bind(to_json_array(&updated.target_muscles))
        .bind(to_json_array(&updated.recommended_for))
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a workout.
    pub async fn delete_workout(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Workout {} not found", id)));
        }
        Ok(())
    }
}

// ==================== EXECUTOR-GENERIC WRITES ====================

/// Remove every record from a collection.
pub async fn delete_all<'e, E>(executor: E, collection: Collection) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(&format!("DELETE FROM {}", collection.name()))
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Create the unique index on `users.email` if it is missing.
pub async fn ensure_email_index<'e, E>(executor: E) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email)")
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn insert_user<'e, E>(executor: E, user: &User) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO users (id, name, email, team, role, avatar, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.team)
    .bind(user.role.as_str())
    .bind(&user.avatar)
    .bind(&user.created_at)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn insert_team<'e, E>(executor: E, team: &Team) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO teams (id, name, description, leader, members, total_points, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&team.id)
    .bind(&team.name)
    .bind(&team.description)
    .bind(&team.leader)
    .bind(to_json_array(&team.members))
    .bind(team.total_points)
    .bind(&team.created_at)
    .execute(executor)
    .await?;
    Ok(())
}

/// Insert an activity row. Only `user_id` is stored; the user fields are joined on read.
pub async fn insert_activity<'e, E>(executor: E, activity: &Activity) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"INSERT INTO activities (
            id, user_id, activity_type, duration_minutes, distance_km,
            calories_burned, points, date, notes
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&activity.id)
    .bind(&activity.user_id)
    .bind(&activity.activity_type)
    .bind(activity.duration_minutes)
    .bind(activity.distance_km)
    .bind(activity.calories_burned)
    .bind(activity.points)
    .bind(&activity.date)
    .bind(&activity.notes)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn insert_leaderboard_entry<'e, E>(
    executor: E,
    entry: &LeaderboardEntry,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO leaderboard (id, user_id, total_points, rank, last_updated) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&entry.id)
    .bind(&entry.user_id)
    .bind(entry.total_points)
    .bind(entry.rank)
    .bind(&entry.last_updated)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn insert_workout<'e, E>(executor: E, workout: &Workout) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"INSERT INTO workouts (
            id, name, description, category, difficulty, duration_minutes,
            exercises, target_muscles, recommended_for
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&workout.id)
    .bind(&workout.name)
    .bind(&workout.description)
    .bind(&workout.category)
    .bind(&workout.difficulty)
    .bind(workout.duration_minutes)
    .bind(to_json_array(&workout.exercises))
    .bind(to_json_array(&workout.target_muscles))
    .bind(to_json_array(&workout.recommended_for))
    .execute(executor)
    .await?;
    Ok(())
}

/// Overwrite a team's derived point total. Returns the number of teams touched.
pub async fn update_team_points<'e, E>(
    executor: E,
    team_name: &str,
    total_points: i64,
) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("UPDATE teams SET total_points = ? WHERE name = ?")
        .bind(total_points)
        .bind(team_name)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

// Helper functions for query building and row conversion

fn restricts_to_nothing<F>(options: &ListOptions<F>) -> bool {
    options.only_ids.as_ref().is_some_and(|ids| ids.is_empty())
}

fn push_list_tail<F>(
    qb: &mut QueryBuilder<'_, Sqlite>,
    id_column: &str,
    options: &ListOptions<F>,
    sort: &SortSpec,
) {
    if let Some(ids) = &options.only_ids {
        qb.push(format!(" AND {} IN (", id_column));
        let mut separated = qb.separated(", ");
        for id in ids {
            separated.push_bind(id.clone());
        }
        separated.push_unseparated(")");
    }

    qb.push(" ");
    qb.push(sort.order_by(options.ordering.as_deref()));

    if let Some(limit) = options.limit {
        qb.push(" LIMIT ").push_bind(i64::from(limit));
    }
}

fn user_from_row(row: &SqliteRow) -> User {
    let role: String = row.get("role");
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        team: row.get("team"),
        role: UserRole::parse(&role).unwrap_or_default(),
        avatar: row.get("avatar"),
        created_at: row.get("created_at"),
    }
}

fn team_from_row(row: &SqliteRow) -> Team {
    let members: String = row.get("members");
    Team {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        leader: row.get("leader"),
        members: parse_json_array(&members),
        total_points: row.get("total_points"),
        created_at: row.get("created_at"),
    }
}

fn activity_from_row(row: &SqliteRow) -> Activity {
    Activity {
        id: row.get("id"),
        user_id: row.get("user_id"),
        user_name: row.get("user_name"),
        user_email: row.get("user_email"),
        team: row.get("team"),
        activity_type: row.get("activity_type"),
        duration_minutes: row.get("duration_minutes"),
        distance_km: row.get("distance_km"),
        calories_burned: row.get("calories_burned"),
        points: row.get("points"),
        date: row.get("date"),
        notes: row.get("notes"),
    }
}

fn leaderboard_from_row(row: &SqliteRow) -> LeaderboardEntry {
    LeaderboardEntry {
        id: row.get("id"),
        user_id: row.get("user_id"),
        user_name: row.get("user_name"),
        user_email: row.get("user_email"),
        team: row.get("team"),
        total_points: row.get("total_points"),
        rank: row.get("rank"),
        last_updated: row.get("last_updated"),
    }
}

fn workout_from_row(row: &SqliteRow) -> Workout {
    let exercises: String = row.get("exercises");
    let target_muscles: String = row.get("target_muscles");
    let recommended_for: String = row.get("recommended_for");
    Workout {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        category: row.get("category"),
        difficulty: row.get("difficulty"),
        duration_minutes: row.get("duration_minutes"),
        exercises: parse_json_array(&exercises),
        target_muscles: parse_json_array(&target_muscles),
        recommended_for: parse_json_array(&recommended_for),
    }
}

fn to_json_array(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

fn parse_json_array(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}
