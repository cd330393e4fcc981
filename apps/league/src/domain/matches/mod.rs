// Match domain module
// Contains the match record entity and its value objects

pub mod match_record;
pub mod value_objects;

pub use match_record::Match;
pub use value_objects::{MatchOutcome, Score};
