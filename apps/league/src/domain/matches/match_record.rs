use super::value_objects::{MatchOutcome, Score};
use crate::domain::scoring::{compute_delta, ResultDelta};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A finalized result between two teams
///
/// Scores are fixed at construction. A correction is modelled as removing
/// the match and recording a new one.
///
/// # Invariants
/// - `home_team_id != away_team_id`
///
/// # Example
/// ```
/// use chrono::Utc;
/// use saturday_league::domain::matches::{Match, MatchOutcome, Score};
/// use uuid::Uuid;
///
/// let game = Match::new(
///     Uuid::new_v4(),
///     Uuid::new_v4(),
///     Score::new(2).unwrap(),
///     Score::new(2).unwrap(),
///     Utc::now(),
/// )
/// .expect("distinct teams");
///
/// assert_eq!(game.outcome(), MatchOutcome::Draw);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    id: Uuid,
    home_team_id: Uuid,
    away_team_id: Uuid,
    home_score: Score,
    away_score: Score,
    played_at: DateTime<Utc>,
}

impl Match {
    /// Creates a new match record
    ///
    /// # Returns
    /// * `Err(String)` - If both sides are the same team
    pub fn new(
        home_team_id: Uuid,
        away_team_id: Uuid,
        home_score: Score,
        away_score: Score,
        played_at: DateTime<Utc>,
    ) -> Result<Self, String> {
        if home_team_id == away_team_id {
            return Err(format!("Team {} cannot play itself", home_team_id));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            home_team_id,
            away_team_id,
            home_score,
            away_score,
            played_at,
        })
    }

    /// Deltas this result contributes to the (home, away) aggregates
    pub fn deltas(&self) -> (ResultDelta, ResultDelta) {
        compute_delta(self.home_score, self.away_score)
    }

    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome::from_scores(self.home_score, self.away_score)
    }

    /// Checks whether `team_id` played in this match
    pub fn involves(&self, team_id: Uuid) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn home_team_id(&self) -> Uuid {
        self.home_team_id
    }

    pub fn away_team_id(&self) -> Uuid {
        self.away_team_id
    }

    pub fn home_score(&self) -> Score {
        self.home_score
    }

    pub fn away_score(&self) -> Score {
        self.away_score
    }

    pub fn played_at(&self) -> DateTime<Utc> {
        self.played_at
    }

    /// Reconstructs a Match from persistence layer data
    ///
    /// # Note
    /// Only to be used by repository implementations for data reconstruction.
    pub fn from_persistence(
        id: Uuid,
        home_team_id: Uuid,
        away_team_id: Uuid,
        home_score: Score,
        away_score: Score,
        played_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            home_team_id,
            away_team_id,
            home_score,
            away_score,
            played_at,
        }
    }
}
