use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{LeagueError, Result};

use super::fixture::Fixture;
use super::team::{Team, UserId};

/// Number of teams a season admits unless an admin overrides it.
pub const DEFAULT_TEAM_LIMIT: u32 = 12;

/// Full league snapshot: teams, fixtures, and season settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueState {
    /// Schema version for migrations.
    pub version: u32,

    /// Last update timestamp (Unix seconds).
    pub last_updated: u64,

    /// Registered teams in registration order. Standings tie-breaks rely
    /// on this order, so it must survive serialization unchanged.
    pub teams: Vec<Team>,

    /// Season fixtures keyed by id.
    pub fixtures: BTreeMap<u32, Fixture>,

    /// Maximum number of teams admitted this season.
    pub team_limit: u32,
}

impl Default for LeagueState {
    fn default() -> Self {
        Self {
            version: 1,
            last_updated: current_timestamp(),
            teams: Vec::new(),
            fixtures: BTreeMap::new(),
            team_limit: DEFAULT_TEAM_LIMIT,
        }
    }
}

impl LeagueState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file, or start fresh if the file does not exist.
    pub async fn load(path: &str) -> Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| LeagueError::StateParse {
                    path: path.to_string(),
                    source: e,
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(LeagueError::StateLoad {
                path: path.to_string(),
                source: e,
            }),
        }
    }

    /// Save to a JSON file atomically.
    pub async fn save(&self, path: &str) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(|e| LeagueError::StateParse {
            path: path.to_string(),
            source: e,
        })?;

        // Write to temp file first, then rename for atomicity
        let temp_path = format!("{}.tmp", path);
        tokio::fs::write(&temp_path, &content)
            .await
            .map_err(|e| LeagueError::StateSave {
                path: path.to_string(),
                source: e,
            })?;

        tokio::fs::rename(&temp_path, path)
            .await
            .map_err(|e| LeagueError::StateSave {
                path: path.to_string(),
                source: e,
            })?;

        Ok(())
    }

    /// Wipe the season: teams, fixtures, and the limit override all go
    /// back to defaults in one step.
    pub fn reset(&mut self) {
        self.teams.clear();
        self.fixtures.clear();
        self.team_limit = DEFAULT_TEAM_LIMIT;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.last_updated = current_timestamp();
    }

    /// Find a team by name.
    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name == name)
    }

    pub fn team_mut(&mut self, name: &str) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.name == name)
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// The team whose squad contains the given member, if any.
    pub fn team_of_player(&self, user_id: UserId) -> Option<&Team> {
        self.teams.iter().find(|t| t.has_player(user_id))
    }

    pub fn fixture(&self, id: u32) -> Option<&Fixture> {
        self.fixtures.get(&id)
    }
}

/// Shared league state type
pub type SharedLeagueState = Arc<tokio::sync::RwLock<LeagueState>>;

pub fn create_shared_league_state(state: LeagueState) -> SharedLeagueState {
    Arc::new(tokio::sync::RwLock::new(state))
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixture::FixtureStatus;

    fn sample_state() -> LeagueState {
        let mut state = LeagueState::new();

        let mut alpha = Team::new("Alpha".to_string(), 1);
        alpha.co_captain_ids.push(10);
        alpha.player_ids.extend([11, 12]);
        alpha.stats.apply_result(2, 1);
        state.teams.push(alpha);

        let mut beta = Team::new("Beta".to_string(), 2);
        beta.stats.apply_result(1, 2);
        state.teams.push(beta);

        let mut fixture = Fixture::new(1, "Alpha".to_string(), "Beta".to_string(), 1);
        fixture.status = FixtureStatus::Completed;
        fixture.home_score = Some(2);
        fixture.away_score = Some(1);
        state.fixtures.insert(1, fixture);
        state.fixtures.insert(
            2,
            Fixture::new(2, "Beta".to_string(), "Alpha".to_string(), 2),
        );

        state
    }

    #[test]
    fn test_snapshot_round_trip() {
        let state = sample_state();

        let json = serde_json::to_string_pretty(&state).unwrap();
        let restored: LeagueState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, state);
        // Registration order is what standings tie-breaks key on.
        assert_eq!(restored.teams[0].name, "Alpha");
        assert_eq!(restored.teams[1].name, "Beta");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = sample_state();
        state.team_limit = 16;

        state.reset();

        assert!(state.teams.is_empty());
        assert!(state.fixtures.is_empty());
        assert_eq!(state.team_limit, DEFAULT_TEAM_LIMIT);
    }

    #[test]
    fn test_team_of_player() {
        let state = sample_state();

        assert_eq!(state.team_of_player(11).map(|t| t.name.as_str()), Some("Alpha"));
        assert!(state.team_of_player(99).is_none());
        // Leadership is not squad membership.
        assert!(state.team_of_player(1).is_none());
    }

    #[tokio::test]
    async fn test_load_missing_file_starts_fresh() {
        let path = std::env::temp_dir().join("kickoff-league-does-not-exist.json");
        let state = LeagueState::load(path.to_str().unwrap()).await.unwrap();

        assert!(state.teams.is_empty());
        assert_eq!(state.team_limit, DEFAULT_TEAM_LIMIT);
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let state = sample_state();
        let path = std::env::temp_dir().join("kickoff-league-state-test.json");
        let path = path.to_str().unwrap();

        state.save(path).await.unwrap();
        let restored = LeagueState::load(path).await.unwrap();
        tokio::fs::remove_file(path).await.ok();

        assert_eq!(restored, state);
    }
}
