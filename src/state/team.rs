use serde::{Deserialize, Serialize};

/// Chat-platform member id (snowflake).
pub type UserId = u64;

/// Aggregate record of a team's results over the season.
///
/// `goal_difference` is derived from `goals_for - goals_against` and is
/// recomputed on every mutation, never edited on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStats {
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
    pub clean_sheets: u32,
}

impl TeamStats {
    /// Fold one final score into the aggregate: 3 points for a win, 1 for
    /// a draw, and a clean sheet when the opponent did not score.
    pub fn apply_result(&mut self, scored: u32, conceded: u32) {
        self.matches_played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        self.goal_difference = self.goals_for as i32 - self.goals_against as i32;

        if scored > conceded {
            self.wins += 1;
            self.points += 3;
        } else if scored < conceded {
            self.losses += 1;
        } else {
            self.draws += 1;
            self.points += 1;
        }

        if conceded == 0 {
            self.clean_sheets += 1;
        }
    }
}

/// A registered team: leadership, squad, and season statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Unique team name, fixed at registration.
    pub name: String,

    /// The member who runs the team.
    pub captain_id: UserId,

    /// Co-captains; never contains the captain.
    #[serde(default)]
    pub co_captain_ids: Vec<UserId>,

    /// Squad members in the order they joined.
    #[serde(default)]
    pub player_ids: Vec<UserId>,

    pub stats: TeamStats,
}

impl Team {
    pub fn new(name: String, captain_id: UserId) -> Self {
        Self {
            name,
            captain_id,
            co_captain_ids: Vec::new(),
            player_ids: Vec::new(),
            stats: TeamStats::default(),
        }
    }

    /// Captain or co-captain.
    pub fn is_leader(&self, user_id: UserId) -> bool {
        self.captain_id == user_id || self.co_captain_ids.contains(&user_id)
    }

    pub fn has_player(&self, user_id: UserId) -> bool {
        self.player_ids.contains(&user_id)
    }
}
