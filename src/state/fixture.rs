use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::team::UserId;

/// Where a fixture sits in its lifecycle.
///
/// Valid moves are pending -> active -> completed, plus active -> pending
/// when a match is cancelled. Completed is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureStatus {
    Pending,
    Active,
    Completed,
}

impl FixtureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixtureStatus::Pending => "pending",
            FixtureStatus::Active => "active",
            FixtureStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for FixtureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled match between two teams on a given matchday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    /// Unique id, assigned from 1 in generation order.
    pub id: u32,

    pub home_team: String,
    pub away_team: String,

    /// Round this fixture belongs to, starting at 1.
    pub matchday: u32,

    pub status: FixtureStatus,

    /// Final score, present once the fixture is completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_score: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_score: Option<u32>,

    /// Member who started the match, while it is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_by: Option<UserId>,

    /// Kick-off time, stamped when the match is scheduled or started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl Fixture {
    pub fn new(id: u32, home_team: String, away_team: String, matchday: u32) -> Self {
        Self {
            id,
            home_team,
            away_team,
            matchday,
            status: FixtureStatus::Pending,
            home_score: None,
            away_score: None,
            started_by: None,
            scheduled_at: None,
        }
    }

    pub fn involves(&self, team_name: &str) -> bool {
        self.home_team == team_name || self.away_team == team_name
    }
}
