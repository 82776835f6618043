//! Data models for the OctoFit tracker.
//!
//! Field names follow the snake_case JSON the web frontend consumes.

mod activity;
mod leaderboard;
mod team;
mod user;
mod workout;

pub use activity::*;
pub use leaderboard::*;
pub use team::*;
pub use user::*;
pub use workout::*;
