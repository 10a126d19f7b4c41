//! Category path resolution.
//!
//! # Responsibility
//! - Choose the single destination for a note from its final label set.
//!
//! # Invariants
//! - Total function: every label set, including the empty one, yields
//!   exactly one `Classification`; resolution never fails.
//! - Primary category is the earliest-declared matching root label; the
//!   subcategory is the deepest path under it, depth ties broken by
//!   declaration order.

use crate::model::note::Classification;
use crate::rules::CompiledRules;

/// Resolves the destination for a consolidated, inferred label set.
pub fn resolve(rules: &CompiledRules, labels: &[String]) -> Classification {
    let mut primary: Option<(&str, usize)> = None;
    for label in labels {
        let Some(folder) = rules.root_folder(label) else {
            continue;
        };
        let index = rules.declaration_index(label).unwrap_or(usize::MAX);
        if primary.map_or(true, |(_, best)| index < best) {
            primary = Some((folder, index));
        }
    }

    let Some((folder, _)) = primary else {
        return Classification::fallback(rules.fallback_category(), labels);
    };

    // deepest path under the primary folder; depth ties break by declaration
    let mut best: Option<(&[String], usize)> = None;
    for label in labels {
        let Some(path) = rules.label_path(label) else {
            continue;
        };
        if path.len() < 2 || path[0] != folder {
            continue;
        }
        let index = rules.declaration_index(label).unwrap_or(usize::MAX);
        let wins = match best {
            None => true,
            Some((current, current_index)) => {
                path.len() > current.len() || (path.len() == current.len() && index < current_index)
            }
        };
        if wins {
            best = Some((path, index));
        }
    }

    Classification {
        category: folder.to_string(),
        subcategory: best.map(|(path, _)| path[1..].to_vec()),
        labels: labels.to_vec(),
    }
}
