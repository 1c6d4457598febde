use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{LeagueError, Result};
use crate::state::{Fixture, FixtureStatus, SharedLeagueState, UserId};

/// Drives fixtures through start/cancel/record and folds recorded
/// results into both teams' aggregates.
pub struct MatchManager {
    state: SharedLeagueState,
}

impl MatchManager {
    pub fn new(state: SharedLeagueState) -> Self {
        Self { state }
    }

    /// Open a pending fixture for play. Only a captain or co-captain of
    /// one of the two teams may start it.
    pub async fn start_match(&self, fixture_id: u32, requester_id: UserId) -> Result<Fixture> {
        let mut state = self.state.write().await;

        let fixture = state
            .fixture(fixture_id)
            .ok_or(LeagueError::FixtureNotFound { id: fixture_id })?;
        if fixture.status != FixtureStatus::Pending {
            return Err(LeagueError::InvalidState {
                id: fixture_id,
                status: fixture.status,
            });
        }
        let home = fixture.home_team.clone();
        let away = fixture.away_team.clone();

        let authorized = state.team(&home).is_some_and(|t| t.is_leader(requester_id))
            || state.team(&away).is_some_and(|t| t.is_leader(requester_id));
        if !authorized {
            return Err(LeagueError::Unauthorized {
                message: "only captains or co-captains of the playing teams can start a match"
                    .to_string(),
            });
        }

        let fixture = state
            .fixtures
            .get_mut(&fixture_id)
            .ok_or(LeagueError::FixtureNotFound { id: fixture_id })?;
        fixture.status = FixtureStatus::Active;
        fixture.started_by = Some(requester_id);
        fixture.scheduled_at = Some(Utc::now());
        let started = fixture.clone();
        state.touch();

        info!("Fixture {} started: {} vs {}", fixture_id, home, away);
        Ok(started)
    }

    /// Abort an active match and return it to pending. Nothing has been
    /// recorded yet, so team stats stay untouched. Only the member who
    /// started the match or a captain of either team may cancel.
    pub async fn cancel_match(&self, fixture_id: u32, requester_id: UserId) -> Result<()> {
        let mut state = self.state.write().await;

        let fixture = state
            .fixture(fixture_id)
            .ok_or(LeagueError::FixtureNotFound { id: fixture_id })?;
        if fixture.status != FixtureStatus::Active {
            return Err(LeagueError::InvalidState {
                id: fixture_id,
                status: fixture.status,
            });
        }
        let home = fixture.home_team.clone();
        let away = fixture.away_team.clone();
        let started_by = fixture.started_by;

        let is_captain = state.team(&home).is_some_and(|t| t.captain_id == requester_id)
            || state.team(&away).is_some_and(|t| t.captain_id == requester_id);
        if started_by != Some(requester_id) && !is_captain {
            return Err(LeagueError::Unauthorized {
                message: "only the match starter or a team captain can cancel a match".to_string(),
            });
        }

        let fixture = state
            .fixtures
            .get_mut(&fixture_id)
            .ok_or(LeagueError::FixtureNotFound { id: fixture_id })?;
        fixture.status = FixtureStatus::Pending;
        fixture.started_by = None;
        fixture.scheduled_at = None;
        state.touch();

        info!("Fixture {} cancelled, back to pending", fixture_id);
        Ok(())
    }

    /// Record the final score of an active match. The fixture completes
    /// and both teams' aggregates update in the same step; any validation
    /// failure leaves fixture and stats exactly as they were.
    pub async fn record_result(
        &self,
        fixture_id: u32,
        home_score: i32,
        away_score: i32,
    ) -> Result<Fixture> {
        let mut state = self.state.write().await;

        let fixture = state
            .fixture(fixture_id)
            .ok_or(LeagueError::FixtureNotFound { id: fixture_id })?;
        if fixture.status != FixtureStatus::Active {
            return Err(LeagueError::InvalidState {
                id: fixture_id,
                status: fixture.status,
            });
        }
        if home_score < 0 {
            return Err(LeagueError::InvalidScore { score: home_score });
        }
        if away_score < 0 {
            return Err(LeagueError::InvalidScore { score: away_score });
        }
        let home = fixture.home_team.clone();
        let away = fixture.away_team.clone();
        for name in [&home, &away] {
            if state.team(name).is_none() {
                return Err(LeagueError::TeamNotFound { name: name.clone() });
            }
        }

        let (home_goals, away_goals) = (home_score as u32, away_score as u32);

        let fixture = state
            .fixtures
            .get_mut(&fixture_id)
            .ok_or(LeagueError::FixtureNotFound { id: fixture_id })?;
        fixture.status = FixtureStatus::Completed;
        fixture.home_score = Some(home_goals);
        fixture.away_score = Some(away_goals);
        let completed = fixture.clone();

        if let Some(team) = state.team_mut(&home) {
            team.stats.apply_result(home_goals, away_goals);
        }
        if let Some(team) = state.team_mut(&away) {
            team.stats.apply_result(away_goals, home_goals);
        }
        state.touch();

        info!(
            "Fixture {} recorded: {} {}-{} {}",
            fixture_id, home, home_goals, away_goals, away
        );
        Ok(completed)
    }

    /// Pre-book a kick-off time for a pending fixture. Like starting a
    /// match, this is reserved for the two teams' leadership.
    pub async fn schedule_match(
        &self,
        fixture_id: u32,
        requester_id: UserId,
        when: DateTime<Utc>,
    ) -> Result<()> {
        let mut state = self.state.write().await;

        let fixture = state
            .fixture(fixture_id)
            .ok_or(LeagueError::FixtureNotFound { id: fixture_id })?;
        if fixture.status != FixtureStatus::Pending {
            return Err(LeagueError::InvalidState {
                id: fixture_id,
                status: fixture.status,
            });
        }
        let home = fixture.home_team.clone();
        let away = fixture.away_team.clone();

        let authorized = state.team(&home).is_some_and(|t| t.is_leader(requester_id))
            || state.team(&away).is_some_and(|t| t.is_leader(requester_id));
        if !authorized {
            return Err(LeagueError::Unauthorized {
                message: "only captains or co-captains of the playing teams can schedule a match"
                    .to_string(),
            });
        }

        let fixture = state
            .fixtures
            .get_mut(&fixture_id)
            .ok_or(LeagueError::FixtureNotFound { id: fixture_id })?;
        fixture.scheduled_at = Some(when);
        state.touch();

        info!("Fixture {} scheduled for {}", fixture_id, when);
        Ok(())
    }
}
