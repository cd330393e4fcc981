use crate::domain::matches::{MatchOutcome, Score};

/// Points awarded for a win
pub const POINTS_FOR_WIN: u32 = 3;
/// Points awarded for a draw
pub const POINTS_FOR_DRAW: u32 = 1;

/// Change one match result contributes to a single team's aggregate
///
/// Counter fields are unsigned: a delta is always added (apply) or
/// subtracted (reverse) as a whole. Only `goal_difference` carries a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResultDelta {
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goal_difference: i64,
    pub points: u32,
}

/// Computes the deltas a result produces for the home and away sides
///
/// Total over every pair of scores. The two goal differences are always
/// exact negatives of each other.
///
/// # Example
/// ```
/// use saturday_league::domain::matches::Score;
/// use saturday_league::domain::scoring::compute_delta;
///
/// let (home, away) = compute_delta(Score::new(3).unwrap(), Score::new(1).unwrap());
/// assert_eq!((home.wins, home.points, home.goal_difference), (1, 3, 2));
/// assert_eq!((away.losses, away.points, away.goal_difference), (1, 0, -2));
/// ```
pub fn compute_delta(home_score: Score, away_score: Score) -> (ResultDelta, ResultDelta) {
    let margin = i64::from(home_score.value()) - i64::from(away_score.value());

    let mut home = ResultDelta {
        played: 1,
        goal_difference: margin,
        ..ResultDelta::default()
    };
    let mut away = ResultDelta {
        played: 1,
        goal_difference: -margin,
        ..ResultDelta::default()
    };

    match MatchOutcome::from_scores(home_score, away_score) {
        MatchOutcome::HomeWin => {
            home.wins = 1;
            home.points = POINTS_FOR_WIN;
            away.losses = 1;
        }
        MatchOutcome::AwayWin => {
            away.wins = 1;
            away.points = POINTS_FOR_WIN;
            home.losses = 1;
        }
        MatchOutcome::Draw => {
            home.draws = 1;
            home.points = POINTS_FOR_DRAW;
            away.draws = 1;
            away.points = POINTS_FOR_DRAW;
        }
    }

    (home, away)
}

/// Cumulative statistics of one team
///
/// # Invariants
/// - `played == wins + draws + losses`
/// - `points == 3 * wins + draws`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Aggregate {
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goal_difference: i64,
    pub points: u32,
}

impl Aggregate {
    /// Returns the aggregate with `delta` added
    pub fn apply(&self, delta: &ResultDelta) -> Self {
        Self {
            played: self.played.saturating_add(delta.played),
            wins: self.wins.saturating_add(delta.wins),
            draws: self.draws.saturating_add(delta.draws),
            losses: self.losses.saturating_add(delta.losses),
            goal_difference: self.goal_difference.saturating_add(delta.goal_difference),
            points: self.points.saturating_add(delta.points),
        }
    }

    /// Returns the aggregate with `delta` subtracted
    ///
    /// Unsigned counters floor at zero. This only engages when reversing a
    /// result that was never applied to this aggregate; a floored aggregate
    /// still satisfies the invariants when every counter floors together.
    pub fn reverse(&self, delta: &ResultDelta) -> Self {
        Self {
            played: self.played.saturating_sub(delta.played),
            wins: self.wins.saturating_sub(delta.wins),
            draws: self.draws.saturating_sub(delta.draws),
            losses: self.losses.saturating_sub(delta.losses),
            goal_difference: self.goal_difference.saturating_sub(delta.goal_difference),
            points: self.points.saturating_sub(delta.points),
        }
    }

    /// Verifies the aggregate invariants
    ///
    /// # Returns
    /// * `Ok(())` - Counters are consistent
    /// * `Err(String)` - Description of the first violated invariant
    pub fn check_invariants(&self) -> Result<(), String> {
        let results = u64::from(self.wins) + u64::from(self.draws) + u64::from(self.losses);
        if u64::from(self.played) != results {
            return Err(format!(
                "played ({}) does not equal wins + draws + losses ({})",
                self.played, results
            ));
        }

        let expected_points = u64::from(POINTS_FOR_WIN) * u64::from(self.wins)
            + u64::from(POINTS_FOR_DRAW) * u64::from(self.draws);
        if u64::from(self.points) != expected_points {
            return Err(format!(
                "points ({}) does not equal 3 * wins + draws ({})",
                self.points, expected_points
            ));
        }

        Ok(())
    }
}
