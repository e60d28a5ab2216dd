//! Direct rating source (saved_restaurants table)

use bitelog_common::db::models::{decode_string_list, SavedRestaurant};
use bitelog_common::Result;
use sqlx::SqlitePool;

use crate::engine::types::{MatchStrategy, ReconciledMatch};

// Only rows that carry a real rating and are not wishlist bookmarks
// participate in aggregation.
const RATED_FILTER: &str = "rating IS NOT NULL AND rating > 0 AND is_bookmark = 0";

/// Fetch rated, non-bookmark saved restaurants with an exact platform id
pub async fn rated_by_place_id(pool: &SqlitePool, place_id: &str) -> Result<Vec<SavedRestaurant>> {
    let rows = sqlx::query_as::<_, SavedRestaurant>(&format!(
        "SELECT guid, user_id, place_id, name, rating, is_bookmark,
                photos, photo_captions, photo_dish_names, created_at
         FROM saved_restaurants
         WHERE place_id = ? AND {RATED_FILTER}"
    ))
    .bind(place_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetch every rated, non-bookmark saved restaurant (full corpus scan,
/// used by the fuzzy-name strategy)
pub async fn all_rated(pool: &SqlitePool) -> Result<Vec<SavedRestaurant>> {
    let rows = sqlx::query_as::<_, SavedRestaurant>(&format!(
        "SELECT guid, user_id, place_id, name, rating, is_bookmark,
                photos, photo_captions, photo_dish_names, created_at
         FROM saved_restaurants
         WHERE {RATED_FILTER}"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Convert a saved restaurant row into the engine's match unit.
///
/// Returns None for rows without a rating; callers query with the rated
/// filter so this only guards against racing schema drift.
pub fn to_match(row: &SavedRestaurant, strategy: MatchStrategy) -> Option<ReconciledMatch> {
    let rating = row.rating?;
    Some(ReconciledMatch {
        record_id: row.guid.clone(),
        rating,
        author_id: row.user_id.clone(),
        photos: decode_string_list(&row.photos),
        photo_captions: decode_string_list(&row.photo_captions),
        photo_dish_names: decode_string_list(&row.photo_dish_names),
        created_at: row.created_at,
        helpful_count: 0,
        strategy,
    })
}
