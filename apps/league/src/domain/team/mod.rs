// Team domain module
// Contains the team aggregate root and its value objects

#![allow(clippy::module_inception)]

pub mod team;
pub mod value_objects;

// Re-export main types for convenience
pub use team::Team;
pub use value_objects::{normalize_team_name, TeamName};
