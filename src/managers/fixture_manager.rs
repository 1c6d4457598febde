use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::error::{LeagueError, Result};
use crate::state::{Fixture, FixtureStatus, SharedLeagueState};

/// Round-robin schedule generation and fixture queries.
pub struct FixtureManager {
    state: SharedLeagueState,
}

impl FixtureManager {
    pub fn new(state: SharedLeagueState) -> Self {
        Self { state }
    }

    /// Generate the season's double round-robin schedule.
    ///
    /// The registry must be full: exactly `team_limit` teams, and an even
    /// count so every team has an opponent each matchday. Regeneration
    /// replaces the whole fixture list, so validation happens before any
    /// existing fixture is discarded.
    pub async fn generate_fixtures(&self) -> Result<Vec<Fixture>> {
        let mut state = self.state.write().await;

        let current = state.team_count() as u32;
        let required = state.team_limit;
        if current > required {
            return Err(LeagueError::TooManyTeams { current, required });
        }
        if current < required || current % 2 != 0 {
            return Err(LeagueError::InsufficientTeams { current, required });
        }

        let names: Vec<String> = state.teams.iter().map(|t| t.name.clone()).collect();
        let fixtures = build_round_robin(&names);

        let discarded = state
            .fixtures
            .values()
            .filter(|f| f.status != FixtureStatus::Pending)
            .count();
        if discarded > 0 {
            warn!(
                "Regenerating fixtures discards {} started or completed matches",
                discarded
            );
        }

        state.fixtures = fixtures.iter().map(|f| (f.id, f.clone())).collect();
        state.touch();

        info!(
            "Generated {} fixtures over {} matchdays for {} teams",
            fixtures.len(),
            2 * (current - 1),
            current
        );
        Ok(fixtures)
    }

    /// All fixtures in id order.
    pub async fn get_fixtures(&self) -> Vec<Fixture> {
        self.state.read().await.fixtures.values().cloned().collect()
    }

    /// Fixtures grouped by matchday.
    pub async fn fixtures_by_matchday(&self) -> BTreeMap<u32, Vec<Fixture>> {
        let state = self.state.read().await;
        let mut grouped: BTreeMap<u32, Vec<Fixture>> = BTreeMap::new();
        for fixture in state.fixtures.values() {
            grouped.entry(fixture.matchday).or_default().push(fixture.clone());
        }
        grouped
    }

    /// A team's full schedule, home and away.
    pub async fn fixtures_for_team(&self, name: &str) -> Result<Vec<Fixture>> {
        let state = self.state.read().await;
        if state.team(name).is_none() {
            return Err(LeagueError::TeamNotFound {
                name: name.to_string(),
            });
        }
        Ok(state
            .fixtures
            .values()
            .filter(|f| f.involves(name))
            .cloned()
            .collect())
    }

    /// Completed fixtures in id order.
    pub async fn results(&self) -> Vec<Fixture> {
        self.state
            .read()
            .await
            .fixtures
            .values()
            .filter(|f| f.status == FixtureStatus::Completed)
            .cloned()
            .collect()
    }
}

/// Circle-method double round-robin.
///
/// The first team stays fixed while the rest rotate one step each round;
/// position `i` pairs with position `n-1-i`. That yields `n-1` matchdays
/// of `n/2` pairings in which every pair meets exactly once. The second
/// half of the season repeats those matchdays with home and away swapped.
/// Ids count up from 1 in generation order.
fn build_round_robin(names: &[String]) -> Vec<Fixture> {
    let n = names.len();
    let rounds = (n - 1) as u32;
    let matches_per_day = n / 2;

    let mut order: Vec<String> = names.to_vec();
    let mut fixtures: Vec<Fixture> = Vec::with_capacity(n * (n - 1));
    let mut id = 1;

    for matchday in 1..=rounds {
        if matchday > 1 {
            order[1..].rotate_right(1);
        }
        for i in 0..matches_per_day {
            fixtures.push(Fixture::new(
                id,
                order[i].clone(),
                order[n - 1 - i].clone(),
                matchday,
            ));
            id += 1;
        }
    }

    let first_half: Vec<Fixture> = fixtures.clone();
    for fixture in first_half {
        fixtures.push(Fixture::new(
            id,
            fixture.away_team,
            fixture.home_team,
            fixture.matchday + rounds,
        ));
        id += 1;
    }

    fixtures
}
