//! League engine for a chat-bot-run amateur football league.
//!
//! The crate keeps a season in memory behind a shared handle: team
//! registration, double round-robin fixture generation, the
//! pending/active/completed match lifecycle, rosters with captains and
//! co-captains, and the computed standings table. Operations take
//! pre-validated, typed arguments and return typed results or errors.
//! Parsing chat commands, rendering replies, and enforcing admin
//! permissions are the embedding bot's job, as is persisting the
//! [`state::LeagueState`] snapshot between mutations.

pub mod error;
pub mod managers;
pub mod state;

pub use error::{LeagueError, Result};
pub use managers::{FixtureManager, MatchManager, RosterManager, TeamManager};
pub use state::{
    create_shared_league_state, Fixture, FixtureStatus, LeagueState, SharedLeagueState, Team,
    TeamStats, UserId, DEFAULT_TEAM_LIMIT,
};
