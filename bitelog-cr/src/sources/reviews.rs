//! Narrative review source (reviews table)

use bitelog_common::db::models::{decode_string_list, Review};
use bitelog_common::Result;
use sqlx::SqlitePool;

use crate::engine::types::{MatchStrategy, ReconciledMatch};

const REVIEW_COLUMNS: &str = "guid, user_id, place_id, restaurant_name, rating, body,
                photos, photo_captions, photo_dish_names, helpful_count, created_at";

/// Fetch narrative reviews with an exact platform id
pub async fn by_place_id(pool: &SqlitePool, place_id: &str) -> Result<Vec<Review>> {
    let rows = sqlx::query_as::<_, Review>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews WHERE place_id = ?"
    ))
    .bind(place_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetch narrative reviews whose stored restaurant name contains the given
/// fragment, case-insensitive (used by the cross-reference strategy)
pub async fn by_name_fragment(pool: &SqlitePool, fragment: &str) -> Result<Vec<Review>> {
    // LIKE metacharacters in the fragment are literal text, not wildcards
    let escaped = fragment
        .trim()
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    let pattern = format!("%{escaped}%");
    let rows = sqlx::query_as::<_, Review>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews WHERE lower(restaurant_name) LIKE ? ESCAPE '\\'"
    ))
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Convert a narrative review row into the engine's match unit
pub fn to_match(row: &Review, strategy: MatchStrategy) -> ReconciledMatch {
    ReconciledMatch {
        record_id: row.guid.clone(),
        rating: row.rating,
        author_id: row.user_id.clone(),
        photos: decode_string_list(&row.photos),
        photo_captions: decode_string_list(&row.photo_captions),
        photo_dish_names: decode_string_list(&row.photo_dish_names),
        created_at: row.created_at,
        helpful_count: row.helpful_count,
        strategy,
    }
}
