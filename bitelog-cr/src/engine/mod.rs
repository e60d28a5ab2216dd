//! Cross-source review reconciliation and aggregation engine
//!
//! Pipeline: identifier(s) in -> resolver fans out to both sources ->
//! dedup -> aggregation -> caller. The engine holds no state of its own;
//! each invocation is a pure function of the source tables at call time.

use bitelog_common::Result;
use sqlx::SqlitePool;

pub mod aggregate;
pub mod dedupe;
pub mod resolver;
pub mod types;

pub use types::CommunityStats;

/// Run the full reconciliation pipeline for one restaurant.
///
/// Fails with `InvalidInput` when both identifiers are blank; a restaurant
/// nobody has reviewed yields zeroed statistics, not an error.
pub async fn community_stats(
    pool: &SqlitePool,
    place_id: Option<&str>,
    name: Option<&str>,
) -> Result<CommunityStats> {
    let matches = resolver::resolve(pool, place_id, name).await?;
    let matches = dedupe::dedupe(matches);
    aggregate::aggregate(pool, &matches).await
}
