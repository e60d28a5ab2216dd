//! Identity resolver
//!
//! Given a platform place id and/or a free-text restaurant name, collects
//! every record from both review sources that plausibly refers to the same
//! real-world restaurant. Four independent strategies run concurrently and
//! their results are combined in a fixed order (direct-id, narrative-id,
//! fuzzy-name, cross-reference) so downstream dedup is deterministic.
//!
//! A single strategy's read failing never aborts the request: the failure
//! is logged and that strategy contributes zero matches.

use bitelog_common::{Error, Result};
use sqlx::SqlitePool;
use tracing::warn;

use crate::engine::types::{MatchStrategy, ReconciledMatch};
use crate::sources::{ratings, reviews};

/// Words ignored when comparing stripped restaurant names
const NAME_STOP_WORDS: &[&str] = &[
    "the",
    "restaurant",
    "bar",
    "grill",
    "cafe",
    "kitchen",
    "house",
    "dining",
];

/// Resolve all records referring to the identified restaurant.
///
/// At least one of `place_id` / `name` must be non-blank.
pub async fn resolve(
    pool: &SqlitePool,
    place_id: Option<&str>,
    name: Option<&str>,
) -> Result<Vec<ReconciledMatch>> {
    let place_id = place_id.map(str::trim).filter(|s| !s.is_empty());
    let name = name.map(str::trim).filter(|s| !s.is_empty());

    if place_id.is_none() && name.is_none() {
        return Err(Error::InvalidInput(
            "either place_id or restaurant_name is required".to_string(),
        ));
    }

    // All four strategies are independent; only the final union is a join
    // point, so issue the reads concurrently and wait for all of them.
    let (direct, narrative, fuzzy, cross) = tokio::join!(
        direct_id(pool, place_id),
        narrative_id(pool, place_id),
        fuzzy_name(pool, place_id, name),
        cross_reference(pool, place_id, name),
    );

    let mut matches = Vec::new();
    matches.extend(absorb(direct, MatchStrategy::DirectId));
    matches.extend(absorb(narrative, MatchStrategy::NarrativeId));
    matches.extend(absorb(fuzzy, MatchStrategy::FuzzyName));
    matches.extend(absorb(cross, MatchStrategy::CrossReference));

    Ok(matches)
}

/// Absorb a strategy-level failure: log it and contribute nothing
fn absorb(result: Result<Vec<ReconciledMatch>>, strategy: MatchStrategy) -> Vec<ReconciledMatch> {
    match result {
        Ok(found) => found,
        Err(e) => {
            warn!("{} strategy read failed, contributing no matches: {}", strategy.as_str(), e);
            Vec::new()
        }
    }
}

/// Strategy 1: rated saved restaurants carrying the exact platform id
async fn direct_id(pool: &SqlitePool, place_id: Option<&str>) -> Result<Vec<ReconciledMatch>> {
    let Some(id) = place_id else {
        return Ok(Vec::new());
    };

    let rows = ratings::rated_by_place_id(pool, id).await?;
    Ok(rows
        .iter()
        .filter_map(|row| ratings::to_match(row, MatchStrategy::DirectId))
        .collect())
}

/// Strategy 2: narrative reviews carrying the exact platform id
async fn narrative_id(pool: &SqlitePool, place_id: Option<&str>) -> Result<Vec<ReconciledMatch>> {
    let Some(id) = place_id else {
        return Ok(Vec::new());
    };

    let rows = reviews::by_place_id(pool, id).await?;
    Ok(rows
        .iter()
        .map(|row| reviews::to_match(row, MatchStrategy::NarrativeId))
        .collect())
}

/// Strategy 3: scan the rated corpus for name matches.
///
/// Records whose place id equals the input id are skipped; direct-id already
/// captured those and re-labeling them here would hide their provenance.
async fn fuzzy_name(
    pool: &SqlitePool,
    place_id: Option<&str>,
    name: Option<&str>,
) -> Result<Vec<ReconciledMatch>> {
    let Some(target) = name else {
        return Ok(Vec::new());
    };

    let rows = ratings::all_rated(pool).await?;
    Ok(rows
        .iter()
        .filter(|row| place_id.is_none() || row.place_id.as_deref() != place_id)
        .filter(|row| names_match(&row.name, target))
        .filter_map(|row| ratings::to_match(row, MatchStrategy::FuzzyName))
        .collect())
}

/// Strategy 4: recover records saved under a different platform id.
///
/// Narrative reviews whose stored name contains the requested name may carry
/// an alternate id for the same restaurant; every rated saved restaurant
/// under such an alternate id is pulled in.
async fn cross_reference(
    pool: &SqlitePool,
    place_id: Option<&str>,
    name: Option<&str>,
) -> Result<Vec<ReconciledMatch>> {
    let Some(target) = name else {
        return Ok(Vec::new());
    };

    let referencing = reviews::by_name_fragment(pool, target).await?;

    // Distinct alternate ids, in first-seen order for determinism
    let mut alternate_ids: Vec<&str> = Vec::new();
    for review in &referencing {
        let alt = review.place_id.trim();
        if alt.is_empty() || Some(alt) == place_id {
            continue;
        }
        if !alternate_ids.contains(&alt) {
            alternate_ids.push(alt);
        }
    }

    let mut matches = Vec::new();
    for alt in alternate_ids {
        let rows = ratings::rated_by_place_id(pool, alt).await?;
        matches.extend(
            rows.iter()
                .filter_map(|row| ratings::to_match(row, MatchStrategy::CrossReference)),
        );
    }

    Ok(matches)
}

/// Heuristic name comparison, in order of strength:
/// equality, containment, matching first words longer than 3 characters,
/// then equality/containment after stripping common venue stop words.
fn names_match(candidate: &str, target: &str) -> bool {
    let a = normalize_name(candidate);
    let b = normalize_name(target);
    if a.is_empty() || b.is_empty() {
        return false;
    }

    if a == b || a.contains(&b) || b.contains(&a) {
        return true;
    }

    if let (Some(first_a), Some(first_b)) = (a.split_whitespace().next(), b.split_whitespace().next()) {
        if first_a == first_b && first_a.len() > 3 {
            return true;
        }
    }

    let stripped_a = strip_stop_words(&a);
    let stripped_b = strip_stop_words(&b);
    if stripped_a.is_empty() || stripped_b.is_empty() {
        return false;
    }
    stripped_a == stripped_b || stripped_a.contains(&stripped_b) || stripped_b.contains(&stripped_a)
}

/// Lowercase, drop punctuation, collapse whitespace.
/// "Joe's Pizza" and "joes pizza" normalize identically.
fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove venue stop words from an already-normalized name
fn strip_stop_words(normalized: &str) -> String {
    normalized
        .split_whitespace()
        .filter(|word| !NAME_STOP_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_normalized_names_match() {
        assert!(names_match("Joe's Pizza", "joes pizza"));
        assert!(names_match("  SUSHI ZEN  ", "sushi zen"));
    }

    #[test]
    fn containment_matches() {
        assert!(names_match("Blue Hill at Stone Barns", "Blue Hill"));
        assert!(names_match("Nopa", "Nopa Annex"));
    }

    #[test]
    fn long_first_words_match() {
        // First words equal and longer than 3 characters
        assert!(names_match("Maialino Mare", "Maialino Uptown"));
        // Short first word is not enough on its own
        assert!(!names_match("La Taqueria", "La Fontana"));
    }

    #[test]
    fn stop_word_stripped_names_match() {
        assert!(names_match("The Harbor House", "Harbor House Restaurant"));
        assert!(names_match("Oak Grill", "Oak Bar"));
    }

    #[test]
    fn blank_names_never_match() {
        assert!(!names_match("", "Joe's Pizza"));
        assert!(!names_match("   ", "Joe's Pizza"));
        assert!(!names_match("Joe's Pizza", ""));
    }

    #[test]
    fn all_stop_word_names_never_match() {
        // Stripping leaves nothing, so the weakest tier cannot fire
        assert!(!names_match("The Restaurant", "The Bar"));
    }

    #[test]
    fn unrelated_names_do_not_match() {
        assert!(!names_match("Sushi Zen", "Taco Haven"));
    }
}
