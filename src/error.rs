use thiserror::Error;

use crate::state::{FixtureStatus, UserId};

#[derive(Error, Debug)]
pub enum LeagueError {
    // Registration errors
    #[error("Team '{name}' is already registered")]
    DuplicateTeam { name: String },

    #[error("Team limit reached ({limit} teams)")]
    CapacityExceeded { limit: u32 },

    #[error("Team limit must be at least 2, got {limit}")]
    InvalidLimit { limit: u32 },

    // Fixture generation errors
    #[error("Not enough teams to generate fixtures: {current}/{required}")]
    InsufficientTeams { current: u32, required: u32 },

    #[error("Too many teams to generate fixtures: {current}/{required}")]
    TooManyTeams { current: u32, required: u32 },

    // Match errors
    #[error("Fixture {id} not found")]
    FixtureNotFound { id: u32 },

    #[error("Fixture {id} is {status}")]
    InvalidState { id: u32, status: FixtureStatus },

    #[error("Invalid score: {score}")]
    InvalidScore { score: i32 },

    // Roster errors
    #[error("Team '{name}' not found")]
    TeamNotFound { name: String },

    #[error("User {user_id} is already on team '{team}'")]
    AlreadyRostered { user_id: UserId, team: String },

    #[error("User {user_id} is not on team '{team}'")]
    NotRostered { user_id: UserId, team: String },

    #[error("User {user_id} already holds a leadership role in team '{team}'")]
    AlreadyCoCaptain { user_id: UserId, team: String },

    #[error("User {user_id} is not a co-captain of team '{team}'")]
    NotCoCaptain { user_id: UserId, team: String },

    // Permission errors
    #[error("Permission denied: {message}")]
    Unauthorized { message: String },

    // State errors
    #[error("Failed to save state to '{path}': {source}")]
    StateSave {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load state from '{path}': {source}")]
    StateLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid state data in '{path}': {source}")]
    StateParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, LeagueError>;
