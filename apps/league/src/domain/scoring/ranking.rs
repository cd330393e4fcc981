use std::cmp::Ordering;

use crate::domain::team::Team;

/// Compares two teams for the standings table
///
/// Points descending, then goal difference descending. Anything else is
/// treated as a tie.
fn standings_order(a: &Team, b: &Team) -> Ordering {
    b.points()
        .cmp(&a.points())
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
}

/// Orders teams for the standings table
///
/// Uses a stable sort, so tied teams keep their input order and repeated
/// calls on unchanged data give identical output.
pub fn rank(teams: impl IntoIterator<Item = Team>) -> Vec<Team> {
    let mut ranked: Vec<Team> = teams.into_iter().collect();
    ranked.sort_by(standings_order);
    ranked
}

/// One line of the rendered standings table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingRow {
    /// 1-based place in the table
    pub position: usize,
    pub team: Team,
}

/// Ranks teams and numbers them from 1
pub fn standings_table(teams: impl IntoIterator<Item = Team>) -> Vec<StandingRow> {
    rank(teams)
        .into_iter()
        .enumerate()
        .map(|(index, team)| StandingRow {
            position: index + 1,
            team,
        })
        .collect()
}
