// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod matches;
pub mod repositories;
pub mod scoring;
pub mod team;
