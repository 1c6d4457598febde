use tracing::info;

use crate::error::{LeagueError, Result};
use crate::state::{SharedLeagueState, Team, UserId};

/// Team registration, the season capacity setting, and the standings
/// table.
pub struct TeamManager {
    state: SharedLeagueState,
}

impl TeamManager {
    pub fn new(state: SharedLeagueState) -> Self {
        Self { state }
    }

    /// Register a new team with the requester as captain.
    pub async fn register_team(&self, name: &str, requester_id: UserId) -> Result<Team> {
        let mut state = self.state.write().await;

        if state.team(name).is_some() {
            return Err(LeagueError::DuplicateTeam {
                name: name.to_string(),
            });
        }
        if state.team_count() as u32 >= state.team_limit {
            return Err(LeagueError::CapacityExceeded {
                limit: state.team_limit,
            });
        }

        let team = Team::new(name.to_string(), requester_id);
        state.teams.push(team.clone());
        state.touch();

        info!(
            "Registered team '{}' ({}/{} teams)",
            name,
            state.team_count(),
            state.team_limit
        );
        Ok(team)
    }

    /// Change the season's team cap. Teams already registered above a
    /// lowered cap stay; only future registrations are blocked.
    pub async fn set_team_limit(&self, limit: u32) -> Result<()> {
        if limit < 2 {
            return Err(LeagueError::InvalidLimit { limit });
        }

        let mut state = self.state.write().await;
        let old = state.team_limit;
        state.team_limit = limit;
        state.touch();

        info!("Team limit changed from {} to {}", old, limit);
        Ok(())
    }

    pub async fn team_limit(&self) -> u32 {
        self.state.read().await.team_limit
    }

    pub async fn team_count(&self) -> usize {
        self.state.read().await.team_count()
    }

    /// All teams in registration order.
    pub async fn get_teams(&self) -> Vec<Team> {
        self.state.read().await.teams.clone()
    }

    pub async fn get_team(&self, name: &str) -> Result<Team> {
        self.state
            .read()
            .await
            .team(name)
            .cloned()
            .ok_or_else(|| LeagueError::TeamNotFound {
                name: name.to_string(),
            })
    }

    /// The league table: points, then goal difference, then goals scored,
    /// all descending. The sort is stable, so teams with identical stat
    /// tuples keep registration order.
    pub async fn get_standings(&self) -> Vec<Team> {
        let mut teams = self.state.read().await.teams.clone();
        teams.sort_by(|a, b| {
            (b.stats.points, b.stats.goal_difference, b.stats.goals_for).cmp(&(
                a.stats.points,
                a.stats.goal_difference,
                a.stats.goals_for,
            ))
        });
        teams
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{create_shared_league_state, LeagueState};

    fn manager() -> TeamManager {
        TeamManager::new(create_shared_league_state(LeagueState::new()))
    }

    #[tokio::test]
    async fn test_register_team() {
        let manager = manager();

        let team = manager.register_team("Alpha", 1).await.unwrap();
        assert_eq!(team.name, "Alpha");
        assert_eq!(team.captain_id, 1);
        assert_eq!(team.stats.points, 0);
        assert_eq!(manager.team_count().await, 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_name_fails() {
        let manager = manager();
        manager.register_team("Alpha", 1).await.unwrap();

        let err = manager.register_team("Alpha", 2).await.unwrap_err();
        assert!(matches!(err, LeagueError::DuplicateTeam { .. }));
        assert_eq!(manager.team_count().await, 1);
    }

    #[tokio::test]
    async fn test_thirteenth_team_exceeds_default_limit() {
        let manager = manager();
        for i in 0..12 {
            manager
                .register_team(&format!("Team {}", i), i)
                .await
                .unwrap();
        }

        let err = manager.register_team("Team 13", 99).await.unwrap_err();
        assert!(matches!(err, LeagueError::CapacityExceeded { limit: 12 }));
    }

    #[tokio::test]
    async fn test_set_team_limit_rejects_below_two() {
        let manager = manager();

        assert!(matches!(
            manager.set_team_limit(1).await.unwrap_err(),
            LeagueError::InvalidLimit { limit: 1 }
        ));
        manager.set_team_limit(4).await.unwrap();
        assert_eq!(manager.team_limit().await, 4);
    }

    #[tokio::test]
    async fn test_lowering_limit_keeps_existing_teams() {
        let manager = manager();
        manager.set_team_limit(4).await.unwrap();
        for i in 0..4 {
            manager
                .register_team(&format!("Team {}", i), i)
                .await
                .unwrap();
        }

        manager.set_team_limit(2).await.unwrap();

        // Nobody is evicted, but registration is closed.
        assert_eq!(manager.team_count().await, 4);
        let err = manager.register_team("Team 5", 9).await.unwrap_err();
        assert!(matches!(err, LeagueError::CapacityExceeded { limit: 2 }));
    }

    #[tokio::test]
    async fn test_standings_order_and_tie_break() {
        let manager = manager();
        manager.register_team("First", 1).await.unwrap();
        manager.register_team("Second", 2).await.unwrap();
        manager.register_team("Third", 3).await.unwrap();

        {
            let state = manager.state.clone();
            let mut state = state.write().await;
            // Third wins a match; First and Second stay level on zeros.
            state.team_mut("Third").unwrap().stats.apply_result(1, 0);
        }

        let standings = manager.get_standings().await;
        assert_eq!(standings[0].name, "Third");
        // Identical stat tuples fall back to registration order.
        assert_eq!(standings[1].name, "First");
        assert_eq!(standings[2].name, "Second");

        // Standings are a pure read: asking twice gives the same table.
        let again = manager.get_standings().await;
        assert_eq!(standings, again);
    }

    #[tokio::test]
    async fn test_standings_goal_difference_then_goals_for() {
        let manager = manager();
        manager.register_team("Blunt", 1).await.unwrap();
        manager.register_team("Sharp", 2).await.unwrap();
        manager.register_team("Loud", 3).await.unwrap();

        {
            let state = manager.state.clone();
            let mut state = state.write().await;
            // All three win once (3 points each).
            state.team_mut("Blunt").unwrap().stats.apply_result(1, 0);
            state.team_mut("Sharp").unwrap().stats.apply_result(4, 1);
            state.team_mut("Loud").unwrap().stats.apply_result(5, 2);
        }

        let standings = manager.get_standings().await;
        // Sharp and Loud are +3 on goal difference; Loud scored more.
        assert_eq!(standings[0].name, "Loud");
        assert_eq!(standings[1].name, "Sharp");
        assert_eq!(standings[2].name, "Blunt");
    }
}
