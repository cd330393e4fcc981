use super::value_objects::TeamName;
use crate::domain::scoring::{Aggregate, ResultDelta};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Team aggregate root
///
/// Holds a team's identity and its cumulative statistics. The statistics
/// are only ever changed by applying or reversing a [`ResultDelta`].
///
/// # Invariants
/// - Name is non-empty and trimmed
/// - `played == wins + draws + losses`
/// - `points == 3 * wins + draws`
///
/// # Example
/// ```
/// use saturday_league::domain::team::{Team, TeamName};
///
/// let team = Team::new(TeamName::new("Red").expect("valid name"));
///
/// assert_eq!(team.name().as_str(), "Red");
/// assert_eq!(team.played(), 0);
/// assert_eq!(team.points(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: Uuid,
    name: TeamName,
    aggregate: Aggregate,
    created_at: DateTime<Utc>,
}

impl Team {
    /// Creates a newly registered team with all counters at zero
    pub fn new(name: TeamName) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            aggregate: Aggregate::default(),
            created_at: Utc::now(),
        }
    }

    /// Returns a copy of this team with `delta` applied
    pub fn with_result_applied(&self, delta: &ResultDelta) -> Self {
        Self {
            aggregate: self.aggregate.apply(delta),
            ..self.clone()
        }
    }

    /// Returns a copy of this team with `delta` reversed
    pub fn with_result_reversed(&self, delta: &ResultDelta) -> Self {
        Self {
            aggregate: self.aggregate.reverse(delta),
            ..self.clone()
        }
    }

    /// Returns a copy of this team carrying `aggregate` instead
    pub fn with_aggregate(&self, aggregate: Aggregate) -> Self {
        Self {
            aggregate,
            ..self.clone()
        }
    }

    // ===== Getters =====

    /// Returns the team's ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the team's name
    pub fn name(&self) -> &TeamName {
        &self.name
    }

    /// Returns the full statistics block
    pub fn aggregate(&self) -> &Aggregate {
        &self.aggregate
    }

    pub fn played(&self) -> u32 {
        self.aggregate.played
    }

    pub fn wins(&self) -> u32 {
        self.aggregate.wins
    }

    pub fn draws(&self) -> u32 {
        self.aggregate.draws
    }

    pub fn losses(&self) -> u32 {
        self.aggregate.losses
    }

    pub fn goal_difference(&self) -> i64 {
        self.aggregate.goal_difference
    }

    pub fn points(&self) -> u32 {
        self.aggregate.points
    }

    /// Returns the registration timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// Skips validation; callers that load untrusted rows should run
    /// [`Aggregate::check_invariants`] on the result.
    ///
    /// # Note
    /// Only to be used by repository implementations for data reconstruction.
    pub fn from_persistence(
        id: Uuid,
        name: TeamName,
        aggregate: Aggregate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            aggregate,
            created_at,
        }
    }
}
