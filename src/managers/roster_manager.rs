use tracing::info;

use crate::error::{LeagueError, Result};
use crate::state::{SharedLeagueState, Team, UserId};

/// Squad membership and team leadership rules.
pub struct RosterManager {
    state: SharedLeagueState,
}

impl RosterManager {
    pub fn new(state: SharedLeagueState) -> Self {
        Self { state }
    }

    /// Add a member to a team's squad. A member can play for only one
    /// team in the league at a time.
    pub async fn add_player(&self, team_name: &str, user_id: UserId) -> Result<()> {
        let mut state = self.state.write().await;

        if state.team(team_name).is_none() {
            return Err(LeagueError::TeamNotFound {
                name: team_name.to_string(),
            });
        }
        if let Some(team) = state.team_of_player(user_id) {
            return Err(LeagueError::AlreadyRostered {
                user_id,
                team: team.name.clone(),
            });
        }

        if let Some(team) = state.team_mut(team_name) {
            team.player_ids.push(user_id);
        }
        state.touch();

        info!("Added player {} to '{}'", user_id, team_name);
        Ok(())
    }

    /// Drop a member from the squad. Captains and co-captains of the team
    /// may do this.
    pub async fn remove_player(
        &self,
        team_name: &str,
        user_id: UserId,
        requester_id: UserId,
    ) -> Result<()> {
        let mut state = self.state.write().await;

        let team = state.team(team_name).ok_or_else(|| LeagueError::TeamNotFound {
            name: team_name.to_string(),
        })?;
        if !team.is_leader(requester_id) {
            return Err(LeagueError::Unauthorized {
                message: "only the captain or a co-captain can remove players".to_string(),
            });
        }
        if !team.has_player(user_id) {
            return Err(LeagueError::NotRostered {
                user_id,
                team: team_name.to_string(),
            });
        }

        if let Some(team) = state.team_mut(team_name) {
            team.player_ids.retain(|id| *id != user_id);
        }
        state.touch();

        info!("Removed player {} from '{}'", user_id, team_name);
        Ok(())
    }

    /// Hand the captaincy to another member. The new captain leaves the
    /// co-captain set so the two roles stay disjoint.
    pub async fn transfer_captaincy(
        &self,
        team_name: &str,
        new_captain_id: UserId,
        requester_id: UserId,
    ) -> Result<()> {
        let mut state = self.state.write().await;

        let team = state.team(team_name).ok_or_else(|| LeagueError::TeamNotFound {
            name: team_name.to_string(),
        })?;
        if team.captain_id != requester_id {
            return Err(LeagueError::Unauthorized {
                message: "only the current captain can transfer captaincy".to_string(),
            });
        }

        if let Some(team) = state.team_mut(team_name) {
            team.captain_id = new_captain_id;
            team.co_captain_ids.retain(|id| *id != new_captain_id);
        }
        state.touch();

        info!("Captaincy of '{}' transferred to {}", team_name, new_captain_id);
        Ok(())
    }

    /// Appoint a co-captain. Captain-only; the captain cannot double as
    /// their own co-captain.
    pub async fn add_co_captain(
        &self,
        team_name: &str,
        user_id: UserId,
        requester_id: UserId,
    ) -> Result<()> {
        let mut state = self.state.write().await;

        let team = state.team(team_name).ok_or_else(|| LeagueError::TeamNotFound {
            name: team_name.to_string(),
        })?;
        if team.captain_id != requester_id {
            return Err(LeagueError::Unauthorized {
                message: "only the captain can add co-captains".to_string(),
            });
        }
        if team.captain_id == user_id || team.co_captain_ids.contains(&user_id) {
            return Err(LeagueError::AlreadyCoCaptain {
                user_id,
                team: team_name.to_string(),
            });
        }

        if let Some(team) = state.team_mut(team_name) {
            team.co_captain_ids.push(user_id);
        }
        state.touch();

        info!("Added co-captain {} to '{}'", user_id, team_name);
        Ok(())
    }

    /// Strip a co-captain of the role. Captain-only.
    pub async fn remove_co_captain(
        &self,
        team_name: &str,
        user_id: UserId,
        requester_id: UserId,
    ) -> Result<()> {
        let mut state = self.state.write().await;

        let team = state.team(team_name).ok_or_else(|| LeagueError::TeamNotFound {
            name: team_name.to_string(),
        })?;
        if team.captain_id != requester_id {
            return Err(LeagueError::Unauthorized {
                message: "only the captain can remove co-captains".to_string(),
            });
        }
        if !team.co_captain_ids.contains(&user_id) {
            return Err(LeagueError::NotCoCaptain {
                user_id,
                team: team_name.to_string(),
            });
        }

        if let Some(team) = state.team_mut(team_name) {
            team.co_captain_ids.retain(|id| *id != user_id);
        }
        state.touch();

        info!("Removed co-captain {} from '{}'", user_id, team_name);
        Ok(())
    }

    /// The team whose squad the member plays in, if any.
    pub async fn find_team_of(&self, user_id: UserId) -> Option<Team> {
        self.state.read().await.team_of_player(user_id).cloned()
    }
}
