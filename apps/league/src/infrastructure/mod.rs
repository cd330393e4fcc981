// Infrastructure layer module
// Storage adapters for the ledger: in-memory and PostgreSQL

pub mod repositories;
