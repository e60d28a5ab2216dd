//! Engine data types
//!
//! `ReconciledMatch` is the unit the deduplicator and aggregator operate on:
//! one logical review, regardless of which source table it came from or which
//! matching strategy discovered it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Matching strategy that discovered a record.
///
/// Strategies run in a fixed order (the enum order below) and a record keeps
/// the strategy that found it first, so provenance is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    DirectId,
    NarrativeId,
    FuzzyName,
    CrossReference,
}

impl MatchStrategy {
    /// Stable string key used in diagnostics output
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStrategy::DirectId => "direct-id",
            MatchStrategy::NarrativeId => "narrative-id",
            MatchStrategy::FuzzyName => "fuzzy-name",
            MatchStrategy::CrossReference => "cross-reference",
        }
    }
}

/// One review/rating record reconciled from either source table
#[derive(Debug, Clone)]
pub struct ReconciledMatch {
    /// Globally unique per origin record; the sole deduplication key
    pub record_id: String,
    pub rating: f64,
    pub author_id: String,
    pub photos: Vec<String>,
    pub photo_captions: Vec<String>,
    pub photo_dish_names: Vec<String>,
    pub created_at: DateTime<Utc>,
    /// 0 when the origin record carries no helpfulness counter
    pub helpful_count: i64,
    pub strategy: MatchStrategy,
}

/// Rating histogram over the 1-10 scale.
///
/// Buckets are inclusive-lower/exclusive-upper except the top bucket, which
/// includes 10: [9,10], [7,9), [5,7), [3,5), [1,3).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RatingDistribution {
    #[serde(rename = "9-10")]
    pub nine_to_ten: i64,
    #[serde(rename = "7-8")]
    pub seven_to_eight: i64,
    #[serde(rename = "5-6")]
    pub five_to_six: i64,
    #[serde(rename = "3-4")]
    pub three_to_four: i64,
    #[serde(rename = "1-2")]
    pub one_to_two: i64,
}

impl RatingDistribution {
    /// Sum across all buckets; always equals the total review count
    pub fn total(&self) -> i64 {
        self.nine_to_ten + self.seven_to_eight + self.five_to_six + self.three_to_four + self.one_to_two
    }
}

/// One entry in the recent photo feed
#[derive(Debug, Clone, Serialize)]
pub struct PhotoEntry {
    pub review_id: String,
    pub user_id: String,
    pub username: String,
    pub photos: Vec<String>,
    pub captions: Vec<String>,
    pub dish_names: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub helpful_count: i64,
}

/// Aggregated community statistics for one restaurant
#[derive(Debug, Clone, Serialize)]
pub struct CommunityStats {
    /// Mean rating rounded to 2 decimal places; 0 when there are no reviews
    pub average_rating: f64,
    pub total_reviews: i64,
    pub rating_distribution: RatingDistribution,
    /// At most 20 entries, newest first
    pub recent_photos: Vec<PhotoEntry>,
    /// Matches contributed per strategy; observability only, never feeds
    /// back into the statistics
    pub strategies_used: BTreeMap<&'static str, i64>,
}

impl CommunityStats {
    /// Zero-review statistics (legitimate empty result, not an error)
    pub fn empty() -> Self {
        CommunityStats {
            average_rating: 0.0,
            total_reviews: 0,
            rating_distribution: RatingDistribution::default(),
            recent_photos: Vec::new(),
            strategies_used: BTreeMap::new(),
        }
    }
}
