pub mod discover;
pub mod health;
pub mod metrics;
