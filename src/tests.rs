//! Integration tests for the OctoFit backend.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::api::refresh_search_index;
use crate::config::Config;
use crate::db::{init_database, Collection, Repository};
use crate::search::SearchIndex;
use crate::seed::{self, SeedPlan};
use crate::{create_router, seed_store, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    repo: Arc<Repository>,
    _temp_dir: TempDir,
}

impl TestFixture {
    /// Server over an empty store.
    async fn new() -> Self {
        Self::build(None).await
    }

    /// Server over a store filled with the sample dataset.
    async fn seeded() -> Self {
        Self::build(Some(2024)).await
    }

    async fn build(rng_seed: Option<u64>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");
        let index_path = temp_dir.path().join("index");

        // Initialize database
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool));

        if let Some(value) = rng_seed {
            seed::run(&repo, &SeedPlan::default(), &mut StdRng::seed_from_u64(value))
                .await
                .expect("Failed to seed");
        }

        // Initialize search index
        let search = Arc::new(SearchIndex::open(&index_path).expect("Failed to init search"));
        refresh_search_index(&repo, &search)
            .await
            .expect("Failed to build index");

        let config = Config {
            db_path,
            index_path,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
        };

        let state = AppState {
            repo: repo.clone(),
            search,
            config: Arc::new(config),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            repo,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET with query parameters, returning status and JSON body.
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> (u16, Value) {
        let resp = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }
}

fn data_array(body: &Value) -> &Vec<Value> {
    body["data"].as_array().expect("data is not an array")
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_api_root_lists_collections() {
    let fixture = TestFixture::new().await;

    for path in ["/api", "/api/"] {
        let (status, body) = fixture.get(path, &[]).await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["message"], "Welcome to the OctoFit Tracker API");
        assert!(body["data"]["endpoints"]["users"]
            .as_str()
            .unwrap()
            .ends_with("/api/users"));
        assert_eq!(
            body["data"]["documentation"]["leaderboard"],
            "View competitive rankings"
        );
    }
}

#[tokio::test]
async fn test_seeded_collection_counts() {
    let fixture = TestFixture::seeded().await;

    let (_, users) = fixture.get("/api/users", &[]).await;
    assert_eq!(data_array(&users).len(), 10);

    let (_, teams) = fixture.get("/api/teams", &[]).await;
    assert_eq!(data_array(&teams).len(), 2);

    let (_, workouts) = fixture.get("/api/workouts", &[]).await;
    assert_eq!(data_array(&workouts).len(), 5);

    let (_, leaderboard) = fixture.get("/api/leaderboard", &[]).await;
    assert_eq!(data_array(&leaderboard).len(), 10);

    let (_, activities) = fixture.get("/api/activities", &[]).await;
    let count = data_array(&activities).len();
    assert!((50..=100).contains(&count), "got {} activities", count);
}

#[tokio::test]
async fn test_leaderboard_ranks_and_top_users() {
    let fixture = TestFixture::seeded().await;

    let (status, body) = fixture.get("/api/leaderboard", &[]).await;
    assert_eq!(status, 200);
    let entries = data_array(&body);
    let ranks: Vec<i64> = entries.iter().map(|e| e["rank"].as_i64().unwrap()).collect();
    assert_eq!(ranks, (1..=10).collect::<Vec<i64>>());
    let points: Vec<i64> = entries
        .iter()
        .map(|e| e["total_points"].as_i64().unwrap())
        .collect();
    assert!(points.windows(2).all(|w| w[0] >= w[1]));

    let (status, body) = fixture
        .get("/api/leaderboard/top_users", &[("limit", "3")])
        .await;
    assert_eq!(status, 200);
    let top: Vec<i64> = data_array(&body)
        .iter()
        .map(|e| e["rank"].as_i64().unwrap())
        .collect();
    assert_eq!(top, vec![1, 2, 3]);

    let (_, body) = fixture.get("/api/leaderboard/top_users", &[]).await;
    assert_eq!(data_array(&body).len(), 10);

    let (status, body) = fixture
        .get("/api/leaderboard/top_users", &[("limit", "lots")])
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_activities_by_user() {
    let fixture = TestFixture::seeded().await;

    let (status, body) = fixture
        .get(
            "/api/activities/by_user",
            &[("email", "tony.stark@marvel.com")],
        )
        .await;
    assert_eq!(status, 200);
    let activities = data_array(&body);
    assert!((5..=10).contains(&activities.len()));
    for activity in activities {
        assert_eq!(activity["user_email"], "tony.stark@marvel.com");
        assert_eq!(activity["user_name"], "Tony Stark");
        assert_eq!(activity["team"], "Team Marvel");
    }

    let (status, body) = fixture.get("/api/activities/by_user", &[]).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["message"], "Email parameter is required");
}

#[tokio::test]
async fn test_users_by_team_requires_team() {
    let fixture = TestFixture::seeded().await;

    let (status, body) = fixture.get("/api/users/by_team", &[]).await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["message"], "Team parameter is required");

    let (status, _) = fixture.get("/api/users/by_team", &[("team", "")]).await;
    assert_eq!(status, 400);

    let (status, body) = fixture
        .get("/api/users/by_team", &[("team", "Team DC")])
        .await;
    assert_eq!(status, 200);
    let users = data_array(&body);
    assert_eq!(users.len(), 5);
    assert!(users.iter().all(|u| u["team"] == "Team DC"));
}

#[tokio::test]
async fn test_team_totals_match_activity_sums() {
    let fixture = TestFixture::seeded().await;

    let (_, teams) = fixture.get("/api/teams", &[]).await;
    for team in data_array(&teams) {
        let name = team["name"].as_str().unwrap();
        let (status, activities) = fixture
            .get("/api/activities/by_team", &[("team", name)])
            .await;
        assert_eq!(status, 200);

        let sum: i64 = data_array(&activities)
            .iter()
            .map(|a| a["points"].as_i64().unwrap())
            .sum();
        assert_eq!(team["total_points"].as_i64().unwrap(), sum, "team {}", name);
    }

    let (_, marvel) = fixture
        .get("/api/leaderboard/by_team", &[("team", "Team Marvel")])
        .await;
    assert_eq!(data_array(&marvel).len(), 5);
}

#[tokio::test]
async fn test_team_members_and_default_ordering() {
    let fixture = TestFixture::seeded().await;

    let (_, teams) = fixture.get("/api/teams", &[]).await;
    let teams = data_array(&teams);
    assert!(teams[0]["total_points"].as_i64() >= teams[1]["total_points"].as_i64());

    let marvel = teams.iter().find(|t| t["name"] == "Team Marvel").unwrap();
    assert_eq!(marvel["leader"], "Tony Stark");
    let id = marvel["id"].as_str().unwrap();

    let (status, members) = fixture
        .get(&format!("/api/teams/{}/members", id), &[])
        .await;
    assert_eq!(status, 200);
    let members = data_array(&members);
    assert_eq!(members.len(), 5);
    assert!(members.iter().all(|m| m["team"] == "Team Marvel"));
    let leads: Vec<&Value> = members.iter().filter(|m| m["role"] == "team_lead").collect();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0]["name"], "Tony Stark");

    let (status, _) = fixture.get("/api/teams/missing/members", &[]).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_search_and_ordering() {
    let fixture = TestFixture::seeded().await;

    let (_, body) = fixture.get("/api/users", &[("search", "stark")]).await;
    let users = data_array(&body);
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["name"], "Tony Stark");

    let (status, body) = fixture
        .get("/api/users", &[("search", "stark:tony")])
        .await;
    assert_eq!(status, 200);
    assert_eq!(data_array(&body).len(), 1);

    let (_, body) = fixture.get("/api/users", &[("search", "bruce")]).await;
    assert_eq!(data_array(&body).len(), 2);

    let (_, body) = fixture.get("/api/teams", &[("search", "justice")]).await;
    let teams = data_array(&body);
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0]["name"], "Team DC");

    let (_, body) = fixture.get("/api/users", &[]).await;
    assert_eq!(data_array(&body)[0]["name"], "Arthur Curry");

    let (_, body) = fixture.get("/api/users", &[("ordering", "-name")]).await;
    assert_eq!(data_array(&body)[0]["name"], "Tony Stark");

    let (_, body) = fixture
        .get("/api/users", &[("ordering", "no_such_field")])
        .await;
    assert_eq!(data_array(&body)[0]["name"], "Arthur Curry");

    let (_, body) = fixture
        .get("/api/activities", &[("ordering", "points")])
        .await;
    let points: Vec<i64> = data_array(&body)
        .iter()
        .map(|a| a["points"].as_i64().unwrap())
        .collect();
    assert!(points.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn test_workout_lookups() {
    let fixture = TestFixture::seeded().await;

    let (status, body) = fixture
        .get("/api/workouts/by_difficulty", &[("difficulty", "advanced")])
        .await;
    assert_eq!(status, 200);
    let names: Vec<&str> = data_array(&body)
        .iter()
        .map(|w| w["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Flash Speed Run", "Mountain Conquest"]);

    let (_, body) = fixture
        .get("/api/workouts/by_category", &[("category", "yoga")])
        .await;
    let yoga = data_array(&body);
    assert_eq!(yoga.len(), 1);
    assert_eq!(yoga[0]["exercises"][3], "Savasana - 5 minutes");

    let (status, body) = fixture.get("/api/workouts/by_category", &[]).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["message"], "Category parameter is required");

    let (status, body) = fixture.get("/api/workouts/by_difficulty", &[]).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["message"], "Difficulty parameter is required");

    let (_, body) = fixture.get("/api/workouts", &[("search", "swimming")]).await;
    let found = data_array(&body);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["name"], "Aquatic Endurance");
}

#[tokio::test]
async fn test_user_crud() {
    let fixture = TestFixture::new().await;

    // Create user
    let (status, body) = fixture
        .post(
            "/api/users",
            json!({
                "name": "Peter Parker",
                "email": "peter.parker@marvel.com",
                "team": "Team Marvel"
            }),
        )
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["role"], "member");
    let user_id = body["data"]["id"].as_str().unwrap().to_string();

    // Duplicate email
    let (status, body) = fixture
        .post(
            "/api/users",
            json!({
                "name": "Spider-Man",
                "email": "peter.parker@marvel.com",
                "team": "Team Marvel"
            }),
        )
        .await;
    assert_eq!(status, 409);
    assert_eq!(body["error"]["code"], "CONFLICT");

    // Partial update
    let resp = fixture
        .client
        .patch(fixture.url(&format!("/api/users/{}", user_id)))
        .json(&json!({ "avatar": "spiderman.png" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["avatar"], "spiderman.png");
    assert_eq!(body["data"]["name"], "Peter Parker");

    // Searchable after creation
    let (_, body) = fixture.get("/api/users", &[("search", "parker")]).await;
    assert_eq!(data_array(&body).len(), 1);

    // Delete user
    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/users/{}", user_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let (status, body) = fixture
        .get(&format!("/api/users/{}", user_id), &[])
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_activity_lifecycle() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture
        .post(
            "/api/users",
            json!({
                "name": "Wanda Maximoff",
                "email": "wanda.maximoff@marvel.com",
                "team": "Team Marvel"
            }),
        )
        .await;
    let user_id = body["data"]["id"].as_str().unwrap().to_string();

    // Unknown owner
    let (status, body) = fixture
        .post(
            "/api/activities",
            json!({
                "user_email": "nobody@marvel.com",
                "activity_type": "yoga",
                "duration_minutes": 30
            }),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    // Log an activity
    let (status, body) = fixture
        .post(
            "/api/activities",
            json!({
                "user_email": "wanda.maximoff@marvel.com",
                "activity_type": "yoga",
                "duration_minutes": 45,
                "points": 20,
                "date": "2025-03-01T08:00:00Z"
            }),
        )
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["data"]["user_name"], "Wanda Maximoff");
    assert_eq!(body["data"]["team"], "Team Marvel");
    let activity_id = body["data"]["id"].as_str().unwrap().to_string();

    // Edit the note
    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/activities/{}", activity_id)))
        .json(&json!({ "notes": "Morning flow" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["notes"], "Morning flow");
    assert_eq!(body["data"]["points"], 20);

    // Deleting the owner removes the activity
    fixture
        .client
        .delete(fixture.url(&format!("/api/users/{}", user_id)))
        .send()
        .await
        .unwrap();
    let (status, _) = fixture
        .get(&format!("/api/activities/{}", activity_id), &[])
        .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_validation_errors() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post(
            "/api/users",
            json!({ "name": "", "email": "x@y.io", "team": "A" }),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = fixture
        .post(
            "/api/users",
            json!({ "name": "X", "email": "not-an-email", "team": "A" }),
        )
        .await;
    assert_eq!(status, 400);

    let (status, _) = fixture.post("/api/teams", json!({ "name": "  " })).await;
    assert_eq!(status, 400);

    let (status, _) = fixture
        .post(
            "/api/workouts",
            json!({
                "name": "Plank",
                "category": "core",
                "difficulty": "beginner",
                "duration_minutes": 0
            }),
        )
        .await;
    assert_eq!(status, 400);

    let (status, _) = fixture
        .get("/api/users", &[("role", "captain")])
        .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_team_crud_and_name_conflict() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post(
            "/api/teams",
            json!({
                "name": "Team X",
                "description": "Mutants",
                "leader": "Charles Xavier",
                "members": ["Charles Xavier"]
            }),
        )
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["data"]["total_points"], 0);
    let team_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = fixture.post("/api/teams", json!({ "name": "Team X" })).await;
    assert_eq!(status, 409);

    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/teams/{}", team_id)))
        .json(&json!({ "description": "Gifted youngsters" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["description"], "Gifted youngsters");
    assert_eq!(body["data"]["leader"], "Charles Xavier");

    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/teams/{}", team_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/teams/{}", team_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_leaderboard_is_read_only() {
    let fixture = TestFixture::seeded().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/leaderboard"))
        .json(&json!({ "rank": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 405);

    let (_, body) = fixture.get("/api/leaderboard", &[]).await;
    let first_id = data_array(&body)[0]["id"].as_str().unwrap().to_string();
    let (status, body) = fixture
        .get(&format!("/api/leaderboard/{}", first_id), &[])
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["rank"], 1);
}

#[tokio::test]
async fn test_reseed_keeps_counts() {
    let fixture = TestFixture::seeded().await;

    let (_, before) = fixture.get("/api/activities", &[]).await;
    let before = data_array(&before).len();

    let report = seed::run(
        &fixture.repo,
        &SeedPlan::default(),
        &mut StdRng::seed_from_u64(2024),
    )
    .await
    .unwrap();
    assert_eq!(report.users, 10);
    assert_eq!(report.activities as usize, before);

    let (_, users) = fixture.get("/api/users", &[]).await;
    assert_eq!(data_array(&users).len(), 10);
    let (_, activities) = fixture.get("/api/activities", &[]).await;
    assert_eq!(data_array(&activities).len(), before);
}

#[tokio::test]
async fn test_router_without_network() {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    let temp_dir = TempDir::new().unwrap();
    let pool = init_database(&temp_dir.path().join("test.sqlite"))
        .await
        .unwrap();
    let search = SearchIndex::open(&temp_dir.path().join("index")).unwrap();
    let state = AppState {
        repo: Arc::new(Repository::new(pool)),
        search: Arc::new(search),
        config: Arc::new(Config {
            db_path: temp_dir.path().join("test.sqlite"),
            index_path: temp_dir.path().join("index"),
            bind_addr: "127.0.0.1:8000".parse().unwrap(),
            log_level: "warn".to_string(),
        }),
    };

    let resp = create_router(state.clone())
        .oneshot(
            Request::builder()
                .uri("/api/workouts/missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = create_router(state)
        .oneshot(
            Request::builder()
                .uri("/api/leaderboard/top_users?limit=5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_deleting_user_removes_leaderboard_entry() {
    let fixture = TestFixture::seeded().await;

    let (_, body) = fixture.get("/api/leaderboard", &[]).await;
    let entry = data_array(&body)[0].clone();
    let entry_id = entry["id"].as_str().unwrap();
    let user_id = entry["user_id"].as_str().unwrap();

    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/users/{}", user_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    assert_eq!(
        fixture.repo.count(Collection::Leaderboard).await.unwrap(),
        9
    );
    let (status, body) = fixture
        .get(&format!("/api/leaderboard/{}", entry_id), &[])
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (_, body) = fixture
        .get("/api/activities", &[("user_email", entry["user_email"].as_str().unwrap())])
        .await;
    assert!(data_array(&body).is_empty());
}

#[tokio::test]
async fn test_seed_store_with_index_held_by_server() {
    let temp_dir = TempDir::new().unwrap();
    let index_path = temp_dir.path().join("index");
    let pool = init_database(&temp_dir.path().join("test.sqlite"))
        .await
        .unwrap();
    let repo = Repository::new(pool);

    // A running server keeps the writer lock for its whole lifetime.
    let server_index = SearchIndex::open(&index_path).unwrap();

    let report = seed_store(&repo, &index_path, &mut StdRng::seed_from_u64(5))
        .await
        .unwrap();
    assert_eq!(report.users, 10);
    assert_eq!(repo.count(Collection::Users).await.unwrap(), 10);

    // The server's index was left untouched.
    assert!(server_index
        .matching_ids(Collection::Users, "stark")
        .unwrap()
        .is_empty());
    drop(server_index);

    // With the lock free, the seed rebuilds the index.
    seed_store(&repo, &index_path, &mut StdRng::seed_from_u64(5))
        .await
        .unwrap();
    let index = SearchIndex::open(&index_path).unwrap();
    assert_eq!(
        index.matching_ids(Collection::Users, "stark").unwrap().len(),
        1
    );
}
