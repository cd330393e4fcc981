// Scoring rules
// Pure functions only: result deltas and the standings order

pub mod delta;
pub mod ranking;

pub use delta::{compute_delta, Aggregate, ResultDelta, POINTS_FOR_DRAW, POINTS_FOR_WIN};
pub use ranking::{rank, standings_table, StandingRow};
