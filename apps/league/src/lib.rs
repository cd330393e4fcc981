//! Saturday League standings library
//!
//! Tracks a round-robin league: teams, match results and the derived points
//! table. The [`ledger::Ledger`] owns the authoritative view and talks to
//! storage only through the repository traits in [`domain::repositories`].

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ledger;
