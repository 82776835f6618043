//! The fixed part of the sample dataset: rosters, teams and workout suggestions.

use chrono::{DateTime, Duration, Utc};

use crate::db::format_timestamp;
use crate::models::{Team, User, UserRole, Workout};

/// One athlete on a seeded roster.
#[derive(Debug, Clone)]
pub struct RosterMember {
    pub name: &'static str,
    pub email: &'static str,
    pub avatar: &'static str,
    pub joined_days_ago: i64,
}

/// A seeded team. The first roster member leads it.
#[derive(Debug, Clone)]
pub struct TeamPlan {
    pub name: &'static str,
    pub description: &'static str,
    pub created_days_ago: i64,
    pub roster: Vec<RosterMember>,
}

#[derive(Debug, Clone)]
pub struct WorkoutPlan {
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub difficulty: &'static str,
    pub duration_minutes: i64,
    pub exercises: &'static [&'static str],
    pub target_muscles: &'static [&'static str],
    pub recommended_for: &'static [&'static str],
}

/// Everything the seed routine inserts verbatim.
#[derive(Debug, Clone)]
pub struct SeedPlan {
    pub teams: Vec<TeamPlan>,
    pub workouts: Vec<WorkoutPlan>,
}

impl SeedPlan {
    /// Users for every roster, team lead first within each team.
    pub fn users(&self, now: DateTime<Utc>) -> Vec<User> {
        self.teams
            .iter()
            .flat_map(|team| {
                team.roster.iter().enumerate().map(move |(position, member)| User {
                    id: uuid::Uuid::new_v4().to_string(),
                    name: member.name.to_string(),
                    email: member.email.to_string(),
                    team: team.name.to_string(),
                    role: if position == 0 {
                        UserRole::TeamLead
                    } else {
                        UserRole::Member
                    },
                    avatar: member.avatar.to_string(),
                    created_at: format_timestamp(now - Duration::days(member.joined_days_ago)),
                })
            })
            .collect()
    }

    /// Teams with their rosters and zero points.
    pub fn teams(&self, now: DateTime<Utc>) -> Vec<Team> {
        self.teams
            .iter()
            .map(|team| Team {
                id: uuid::Uuid::new_v4().to_string(),
                name: team.name.to_string(),
                description: team.description.to_string(),
                leader: team
                    .roster
                    .first()
                    .map(|lead| lead.name.to_string())
                    .unwrap_or_default(),
                members: team.roster.iter().map(|m| m.name.to_string()).collect(),
                total_points: 0,
                created_at: format_timestamp(now - Duration::days(team.created_days_ago)),
            })
            .collect()
    }

    pub fn workouts(&self) -> Vec<Workout> {
        self.workouts
            .iter()
            .map(|plan| Workout {
                id: uuid::Uuid::new_v4().to_string(),
                name: plan.name.to_string(),
                description: plan.description.to_string(),
                category: plan.category.to_string(),
                difficulty: plan.difficulty.to_string(),
                duration_minutes: plan.duration_minutes,
                exercises: to_strings(plan.exercises),
                target_muscles: to_strings(plan.target_muscles),
                recommended_for: to_strings(plan.recommended_for),
            })
            .collect()
    }
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            teams: vec![marvel(), dc()],
            workouts: default_workouts(),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn member(
    name: &'static str,
    email: &'static str,
    avatar: &'static str,
    joined_days_ago: i64,
) -> RosterMember {
    RosterMember {
        name,
        email,
        avatar,
        joined_days_ago,
    }
}

fn marvel() -> TeamPlan {
    TeamPlan {
        name: "Team Marvel",
        description: "Earth's Mightiest Heroes",
        created_days_ago: 30,
        roster: vec![
            member("Tony Stark", "tony.stark@marvel.com", "ironman.png", 30),
            member("Steve Rogers", "steve.rogers@marvel.com", "captainamerica.png", 28),
            member("Natasha Romanoff", "natasha.romanoff@marvel.com", "blackwidow.png", 27),
            member("Bruce Banner", "bruce.banner@marvel.com", "hulk.png", 26),
            member("Thor Odinson", "thor.odinson@marvel.com", "thor.png", 25),
        ],
    }
}

fn dc() -> TeamPlan {
    TeamPlan {
        name: "Team DC",
        description: "Justice League United",
        created_days_ago: 30,
        roster: vec![
            member("Bruce Wayne", "bruce.wayne@dc.com", "batman.png", 30),
            member("Clark Kent", "clark.kent@dc.com", "superman.png", 29),
            member("Diana Prince", "diana.prince@dc.com", "wonderwoman.png", 28),
            member("Barry Allen", "barry.allen@dc.com", "flash.png", 27),
            member("Arthur Curry", "arthur.curry@dc.com", "aquaman.png", 26),
        ],
    }
}

fn default_workouts() -> Vec<WorkoutPlan> {
    vec![
        WorkoutPlan {
            name: "Hero's Strength Training",
            description: "Build superhero strength with compound exercises",
            category: "strength_training",
            difficulty: "intermediate",
            duration_minutes: 45,
            exercises: &[
                "Bench Press - 3 sets of 10 reps",
                "Squats - 3 sets of 12 reps",
                "Deadlifts - 3 sets of 8 reps",
                "Pull-ups - 3 sets of max reps",
            ],
            target_muscles: &["chest", "legs", "back", "core"],
            recommended_for: &["beginner", "intermediate"],
        },
        WorkoutPlan {
            name: "Flash Speed Run",
            description: "Interval training for speed and endurance",
            category: "running",
            difficulty: "advanced",
            duration_minutes: 30,
            exercises: &[
                "5 min warm-up jog",
                "8x 400m sprints with 90s recovery",
                "5 min cool-down jog",
            ],
            target_muscles: &["legs", "cardiovascular"],
            recommended_for: &["intermediate", "advanced"],
        },
        WorkoutPlan {
            name: "Warrior Yoga Flow",
            description: "Flexibility and mindfulness training",
            category: "yoga",
            difficulty: "beginner",
            duration_minutes: 30,
            exercises: &[
                "Sun Salutation A - 5 rounds",
                "Warrior Poses I, II, III",
                "Tree Pose",
                "Savasana - 5 minutes",
            ],
            target_muscles: &["full_body", "flexibility"],
            recommended_for: &["all_levels"],
        },
        WorkoutPlan {
            name: "Aquatic Endurance",
            description: "Swimming workout for full-body conditioning",
            category: "swimming",
            difficulty: "intermediate",
            duration_minutes: 60,
            exercises: &[
                "400m freestyle warm-up",
                "8x 100m intervals (various strokes)",
                "200m cool-down",
            ],
            target_muscles: &["full_body", "cardiovascular"],
            recommended_for: &["intermediate", "advanced"],
        },
        WorkoutPlan {
            name: "Mountain Conquest",
            description: "Hiking workout with elevation gains",
            category: "hiking",
            difficulty: "advanced",
            duration_minutes: 120,
            exercises: &["Steady uphill climb", "Peak summit", "Controlled descent"],
            target_muscles: &["legs", "cardiovascular", "endurance"],
            recommended_for: &["advanced"],
        },
    ]
}
