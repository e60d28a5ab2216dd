//! HTTP API handlers

mod health;
mod stats;

pub use health::{health_check, health_routes};
pub use stats::{assemble, community_stats, StatsError, StatsQuery, StatsResponse};
