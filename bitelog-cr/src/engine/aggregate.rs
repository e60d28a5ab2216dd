//! Statistics aggregation over the deduplicated match set

use bitelog_common::Result;
use sqlx::SqlitePool;
use std::collections::{BTreeMap, HashSet};

use crate::engine::types::{CommunityStats, PhotoEntry, RatingDistribution, ReconciledMatch};
use crate::sources::profiles;

/// Maximum number of entries in the recent photo feed
const MAX_RECENT_PHOTOS: usize = 20;

/// Display name used when an author has no profile row
const ANONYMOUS: &str = "Anonymous";

/// Compute community statistics from the deduplicated match set.
///
/// The only read issued here is the single batched author-profile lookup
/// for the photo feed; everything else is pure arithmetic.
pub async fn aggregate(pool: &SqlitePool, matches: &[ReconciledMatch]) -> Result<CommunityStats> {
    if matches.is_empty() {
        return Ok(CommunityStats::empty());
    }

    let total_reviews = matches.len() as i64;
    let sum: f64 = matches.iter().map(|m| m.rating).sum();
    let average_rating = round2(sum / matches.len() as f64);

    let mut rating_distribution = RatingDistribution::default();
    for m in matches {
        bucket(&mut rating_distribution, m.rating);
    }

    let mut strategies_used: BTreeMap<&'static str, i64> = BTreeMap::new();
    for m in matches {
        *strategies_used.entry(m.strategy.as_str()).or_insert(0) += 1;
    }

    let recent_photos = photo_feed(pool, matches).await?;

    Ok(CommunityStats {
        average_rating,
        total_reviews,
        rating_distribution,
        recent_photos,
        strategies_used,
    })
}

/// Build the bounded, recency-ordered photo feed with resolved author names
async fn photo_feed(pool: &SqlitePool, matches: &[ReconciledMatch]) -> Result<Vec<PhotoEntry>> {
    let mut with_photos: Vec<&ReconciledMatch> =
        matches.iter().filter(|m| !m.photos.is_empty()).collect();

    // Newest first; record id breaks timestamp ties so the feed is stable
    with_photos.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.record_id.cmp(&b.record_id))
    });
    with_photos.truncate(MAX_RECENT_PHOTOS);

    // One batched lookup over the distinct author ids, not one per entry
    let mut seen = HashSet::new();
    let author_ids: Vec<String> = with_photos
        .iter()
        .map(|m| m.author_id.clone())
        .filter(|id| seen.insert(id.clone()))
        .collect();
    let display_names = profiles::display_names(pool, &author_ids).await?;

    Ok(with_photos
        .into_iter()
        .map(|m| PhotoEntry {
            review_id: m.record_id.clone(),
            user_id: m.author_id.clone(),
            username: display_names
                .get(&m.author_id)
                .cloned()
                .unwrap_or_else(|| ANONYMOUS.to_string()),
            photos: m.photos.clone(),
            captions: m.photo_captions.clone(),
            dish_names: m.photo_dish_names.clone(),
            created_at: m.created_at,
            helpful_count: m.helpful_count,
        })
        .collect())
}

/// Count a rating into its histogram bucket.
///
/// Buckets are inclusive-lower/exclusive-upper: exactly 9 counts as "9-10",
/// exactly 7 counts as "7-8". Anything below 3 lands in the bottom bucket so
/// every rating falls in exactly one place.
fn bucket(dist: &mut RatingDistribution, rating: f64) {
    if rating >= 9.0 {
        dist.nine_to_ten += 1;
    } else if rating >= 7.0 {
        dist.seven_to_eight += 1;
    } else if rating >= 5.0 {
        dist.five_to_six += 1;
    } else if rating >= 3.0 {
        dist.three_to_four += 1;
    } else {
        dist.one_to_two += 1;
    }
}

/// Round to 2 decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
