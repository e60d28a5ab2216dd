//! Author profile source (users table)

use bitelog_common::db::models::User;
use bitelog_common::Result;
use sqlx::SqlitePool;
use std::collections::HashMap;

/// Batched display-name lookup for a list of author ids.
///
/// One query regardless of list size; ids without a profile row are simply
/// absent from the returned map.
pub async fn display_names(pool: &SqlitePool, author_ids: &[String]) -> Result<HashMap<String, String>> {
    if author_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let placeholders = vec!["?"; author_ids.len()].join(", ");
    let sql = format!("SELECT guid, display_name FROM users WHERE guid IN ({placeholders})");

    let mut query = sqlx::query_as::<_, User>(&sql);
    for id in author_ids {
        query = query.bind(id);
    }

    let rows = query.fetch_all(pool).await?;
    Ok(rows.into_iter().map(|u| (u.guid, u.display_name)).collect())
}
