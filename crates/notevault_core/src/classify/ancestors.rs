//! Ancestor label inference.
//!
//! # Responsibility
//! - Add category and intermediate labels implied by a label's compiled path.
//!
//! # Invariants
//! - Exactly one pass over the pre-inference label set; labels added during
//!   the pass are not themselves expanded (single-level closure).
//! - A second invocation is a no-op when every needed ancestor was already
//!   reachable from the original set's compiled paths.

use crate::rules::CompiledRules;
use std::collections::BTreeSet;

/// Adds ancestor labels implied by compiled paths.
///
/// Returns the augmented sorted label set and whether anything was added.
/// Labels without a compiled path are carried through untouched.
pub fn infer_ancestors(rules: &CompiledRules, labels: &[String]) -> (Vec<String>, bool) {
    let mut resolved: BTreeSet<String> = labels.iter().cloned().collect();
    let mut added = false;

    for label in labels {
        let Some(path) = rules.label_path(label) else {
            continue;
        };
        if let Some(root_label) = rules.root_label_for_folder(&path[0]) {
            if resolved.insert(root_label.to_string()) {
                added = true;
            }
        }
        for segment in &path[1..path.len() - 1] {
            if resolved.insert(segment.to_lowercase()) {
                added = true;
            }
        }
    }

    (resolved.into_iter().collect(), added)
}
