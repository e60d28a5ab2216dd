//! Database row models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row from the saved_restaurants table (direct rating source)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SavedRestaurant {
    pub guid: String,
    pub user_id: String,
    pub place_id: Option<String>,
    pub name: String,
    pub rating: Option<f64>,
    pub is_bookmark: bool,
    /// JSON array of photo URIs
    pub photos: String,
    /// JSON array, parallel to `photos`
    pub photo_captions: String,
    /// JSON array, parallel to `photos`
    pub photo_dish_names: String,
    pub created_at: DateTime<Utc>,
}

/// Row from the reviews table (narrative review source)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub guid: String,
    pub user_id: String,
    pub place_id: String,
    pub restaurant_name: String,
    pub rating: f64,
    pub body: String,
    pub photos: String,
    pub photo_captions: String,
    pub photo_dish_names: String,
    pub helpful_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Row from the users table (author profiles)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub guid: String,
    pub display_name: String,
}

/// Decode a JSON-array text column into a string list.
///
/// Legacy rows may carry malformed JSON; those decode to an empty list
/// rather than failing the read.
pub fn decode_string_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}
