//! Deduplication of reconciled matches
//!
//! A record can be discovered by more than one strategy (a direct-id hit is
//! often rediscovered by cross-reference). The record id is the sole dedup
//! key; the first occurrence wins, so with the fixed strategy ordering the
//! surviving provenance is deterministic.

use std::collections::HashSet;

use crate::engine::types::ReconciledMatch;

/// Keep the first occurrence per record id, preserving input order
pub fn dedupe(matches: Vec<ReconciledMatch>) -> Vec<ReconciledMatch> {
    let mut seen = HashSet::new();
    matches
        .into_iter()
        .filter(|m| seen.insert(m.record_id.clone()))
        .collect()
}
