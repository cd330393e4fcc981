use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Goals scored by one side in a match
///
/// # Invariants
/// - Never negative
/// - Fits the storage column (`i32`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Score(u32);

impl Score {
    /// Largest score accepted
    pub const MAX: u32 = i32::MAX as u32;

    /// Creates a Score from a signed goal count
    ///
    /// # Example
    /// ```
    /// use saturday_league::domain::matches::Score;
    ///
    /// assert_eq!(Score::new(3).unwrap().value(), 3);
    /// assert!(Score::new(-1).is_err());
    /// ```
    pub fn new(goals: i64) -> Result<Self, String> {
        if goals < 0 {
            return Err(format!("Score cannot be negative: {}", goals));
        }

        u32::try_from(goals)
            .ok()
            .filter(|g| *g <= Self::MAX)
            .map(Score)
            .ok_or_else(|| format!("Score is out of range: {}", goals))
    }

    /// Returns the number of goals
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl FromStr for Score {
    type Err = String;

    /// Parses a score typed by a user, ignoring surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let goals = s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("Score is not a number: {:?}", s))?;
        Score::new(goals)
    }
}

impl TryFrom<i64> for Score {
    type Error = String;

    fn try_from(goals: i64) -> Result<Self, Self::Error> {
        Score::new(goals)
    }
}

impl From<Score> for i64 {
    fn from(score: Score) -> Self {
        i64::from(score.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a match from the home side's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl MatchOutcome {
    /// Decides the outcome for a pair of scores
    pub fn from_scores(home: Score, away: Score) -> Self {
        match home.cmp(&away) {
            std::cmp::Ordering::Greater => MatchOutcome::HomeWin,
            std::cmp::Ordering::Less => MatchOutcome::AwayWin,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOutcome::HomeWin => write!(f, "home_win"),
            MatchOutcome::AwayWin => write!(f, "away_win"),
            MatchOutcome::Draw => write!(f, "draw"),
        }
    }
}
