pub mod health;
pub mod matches;
pub mod standings;
pub mod teams;
