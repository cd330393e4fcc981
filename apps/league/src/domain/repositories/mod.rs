// Repository traits (ports)
// Storage collaborators the ledger is constructed with

pub mod errors;
pub mod match_repository;
pub mod team_repository;

pub use errors::RepositoryError;
pub use match_repository::MatchRepository;
pub use team_repository::TeamRepository;
