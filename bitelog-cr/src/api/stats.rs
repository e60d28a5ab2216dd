//! Community statistics endpoint
//!
//! Shapes the engine's `CommunityStats` into the wire payload. Malformed
//! requests are rejected before any strategy runs; internal aggregation
//! faults surface as a generic 500 with the detail kept in the logs.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::error;

use crate::engine::types::{CommunityStats, PhotoEntry, RatingDistribution};
use crate::{engine, AppState};

/// Query parameters for community statistics
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    /// Platform place identifier (optional, but one of the two is required)
    pub place_id: Option<String>,
    /// Free-text restaurant name
    pub restaurant_name: Option<String>,
}

/// Wire payload for community statistics
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub average_rating: f64,
    pub total_reviews: i64,
    pub rating_distribution: RatingDistribution,
    pub recent_photos: Vec<PhotoEntry>,
    pub debug: DebugInfo,
}

/// Strategy provenance, for diagnostics only
#[derive(Debug, Serialize)]
pub struct DebugInfo {
    pub strategies_used: BTreeMap<&'static str, i64>,
}

/// GET /api/community-stats?place_id=...&restaurant_name=...
///
/// At least one of the two parameters must be non-blank. A restaurant with
/// no reviews anywhere returns zeroed statistics with status 200.
pub async fn community_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, StatsError> {
    let stats = engine::community_stats(
        &state.db,
        query.place_id.as_deref(),
        query.restaurant_name.as_deref(),
    )
    .await
    .map_err(|e| match e {
        bitelog_common::Error::InvalidInput(msg) => StatsError::MissingIdentifier(msg),
        other => {
            error!("Community stats aggregation failed: {}", other);
            StatsError::Internal
        }
    })?;

    Ok(Json(assemble(stats)))
}

/// Package engine output into the wire payload. Pure shaping, never fails.
pub fn assemble(stats: CommunityStats) -> StatsResponse {
    StatsResponse {
        average_rating: stats.average_rating,
        total_reviews: stats.total_reviews,
        rating_distribution: stats.rating_distribution,
        recent_photos: stats.recent_photos,
        debug: DebugInfo {
            strategies_used: stats.strategies_used,
        },
    }
}

/// Community statistics errors
#[derive(Debug)]
pub enum StatsError {
    MissingIdentifier(String),
    Internal,
}

impl IntoResponse for StatsError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            StatsError::MissingIdentifier(msg) => (StatusCode::BAD_REQUEST, msg),
            StatsError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to compute community statistics".to_string(),
            ),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
