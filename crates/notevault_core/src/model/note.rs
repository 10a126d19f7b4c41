//! Classification result model.
//!
//! # Responsibility
//! - Define the sole engine output consumed by file placement and
//!   metadata persistence.
//!
//! # Invariants
//! - `labels` is deduplicated and alphabetically sorted.
//! - `subcategory` segments always lie under `category`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Engine output for one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Destination category folder, e.g. `2_Locations`.
    pub category: String,
    /// Subcategory segments under the category folder, most general first,
    /// e.g. `["Settlements", "Cities"]`. `None` when the category alone applies.
    pub subcategory: Option<Vec<String>>,
    /// Final resolved label set, sorted.
    pub labels: Vec<String>,
}

impl Classification {
    pub(crate) fn fallback(category: &str, labels: &[String]) -> Self {
        Self {
            category: category.to_string(),
            subcategory: None,
            labels: labels.to_vec(),
        }
    }

    /// Vault-relative destination directory for this classification.
    pub fn target_dir(&self) -> PathBuf {
        let mut dir = PathBuf::from(&self.category);
        if let Some(segments) = &self.subcategory {
            for segment in segments {
                dir.push(segment);
            }
        }
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::Classification;
    use std::path::Path;

    #[test]
    fn target_dir_joins_category_and_subcategory() {
        let classification = Classification {
            category: "2_Locations".to_string(),
            subcategory: Some(vec!["Settlements".to_string(), "Cities".to_string()]),
            labels: vec![],
        };
        assert_eq!(
            classification.target_dir(),
            Path::new("2_Locations/Settlements/Cities")
        );
    }

    #[test]
    fn target_dir_without_subcategory_is_category_alone() {
        let classification = Classification {
            category: "9_Miscellaneous".to_string(),
            subcategory: None,
            labels: vec![],
        };
        assert_eq!(classification.target_dir(), Path::new("9_Miscellaneous"));
    }
}
