pub mod fixture;
pub mod league_state;
pub mod team;

pub use fixture::{Fixture, FixtureStatus};
pub use league_state::{
    create_shared_league_state, LeagueState, SharedLeagueState, DEFAULT_TEAM_LIMIT,
};
pub use team::{Team, TeamStats, UserId};
