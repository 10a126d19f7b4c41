//! Label normalization and synonym consolidation.
//!
//! # Responsibility
//! - Canonicalize raw labels: lowercase, trim, resolve synonyms.
//! - Produce a deduplicated, alphabetically sorted label list.
//!
//! # Invariants
//! - A synonym source never survives to the output, even when it was also
//!   present independently in the input.
//! - `consolidate(consolidate(l)) == consolidate(l)` for any input `l`.

use crate::rules::CompiledRules;
use std::collections::BTreeSet;

/// Normalizes one raw label. Blank values normalize to `None`.
pub fn normalize_label(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Canonicalizes a raw label list against the compiled synonym table.
pub fn consolidate(rules: &CompiledRules, raw_labels: &[String]) -> Vec<String> {
    let mut canonical = BTreeSet::new();
    for raw in raw_labels {
        if let Some(label) = normalize_label(raw) {
            canonical.insert(rules.canonical_label(&label));
        }
    }
    canonical.into_iter().collect()
}
