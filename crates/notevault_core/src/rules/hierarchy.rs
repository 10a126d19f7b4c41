//! Compiled rule lookup structures.
//!
//! # Responsibility
//! - Flatten the ordered rule hierarchy into read-only lookup maps.
//! - Provide path, declaration-order, and root lookups to the classifier.
//!
//! # Invariants
//! - All lookups are immutable after `compile`; safe to share across calls.
//! - First registration wins for both paths and declaration order; later
//!   duplicates only emit a `rule_shadowed` warning.

use crate::rules::config::{RuleHierarchy, RuleNode};
use log::warn;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Immutable lookup structures compiled from one `RuleHierarchy`.
#[derive(Debug, Clone, Default)]
pub struct CompiledRules {
    fallback: String,
    path_by_label: HashMap<String, Vec<String>>,
    declaration_order: Vec<String>,
    declaration_index: HashMap<String, usize>,
    folder_by_root: HashMap<String, String>,
    root_by_folder: HashMap<String, String>,
    synonyms: HashMap<String, String>,
    infobox_aliases: HashMap<String, String>,
}

impl RuleHierarchy {
    /// Compiles the hierarchy into lookup structures.
    ///
    /// Category root labels are registered first, in declaration order, and
    /// carry no compiled path; hierarchy labels follow depth-first, each
    /// branch key before its children.
    pub fn compile(&self) -> CompiledRules {
        let mut rules = CompiledRules {
            fallback: self.fallback.clone(),
            ..CompiledRules::default()
        };

        for category in &self.categories {
            rules.register_order(&category.label);
            match rules.folder_by_root.entry(category.label.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(category.folder.clone());
                }
                Entry::Occupied(existing) => {
                    warn!(
                        "event=rule_shadowed module=rules kind=category label={} kept={} ignored={}",
                        category.label,
                        existing.get(),
                        category.folder
                    );
                }
            }
            rules
                .root_by_folder
                .entry(category.folder.clone())
                .or_insert_with(|| category.label.clone());
        }

        for (folder, nodes) in &self.trees {
            let base = vec![folder.clone()];
            for node in nodes {
                rules.register_node(node, &base);
            }
        }

        rules.synonyms = self.synonyms.iter().cloned().collect();
        rules.infobox_aliases = self.infobox_aliases.iter().cloned().collect();
        rules
    }
}

impl CompiledRules {
    /// Folder used when no label matches a category root.
    pub fn fallback_category(&self) -> &str {
        &self.fallback
    }

    /// Full path segments for one hierarchy label, category folder first.
    pub fn label_path(&self, label: &str) -> Option<&[String]> {
        self.path_by_label.get(label).map(Vec::as_slice)
    }

    /// First-seen position of one label during compilation.
    pub fn declaration_index(&self, label: &str) -> Option<usize> {
        self.declaration_index.get(label).copied()
    }

    /// All labels in first-seen order.
    pub fn declaration_order(&self) -> &[String] {
        &self.declaration_order
    }

    /// Folder for one category root label.
    pub fn root_folder(&self, label: &str) -> Option<&str> {
        self.folder_by_root.get(label).map(String::as_str)
    }

    /// First-declared category root label for one folder.
    pub fn root_label_for_folder(&self, folder: &str) -> Option<&str> {
        self.root_by_folder.get(folder).map(String::as_str)
    }

    /// All configured category folders.
    pub fn category_folders(&self) -> impl Iterator<Item = &str> {
        self.root_by_folder.keys().map(String::as_str)
    }

    /// Category root label mapped from one infobox marker.
    pub fn infobox_label(&self, marker: &str) -> Option<&str> {
        self.infobox_aliases.get(marker).map(String::as_str)
    }

    /// Resolves one label through the synonym table.
    ///
    /// Chains resolve transitively; a cyclic chain resolves every member to
    /// the lexicographically smallest label in the cycle, so resolution is
    /// deterministic and idempotent for any table.
    pub fn canonical_label(&self, label: &str) -> String {
        let mut seen: Vec<&str> = vec![label];
        let mut current: &str = label;
        while let Some(next) = self.synonyms.get(current) {
            if let Some(start) = seen.iter().position(|step| *step == next.as_str()) {
                let mut representative = seen[start];
                for step in &seen[start..] {
                    if *step < representative {
                        representative = step;
                    }
                }
                return representative.to_string();
            }
            seen.push(next);
            current = next;
        }
        current.to_string()
    }

    fn register_node(&mut self, node: &RuleNode, parent: &[String]) {
        let mut path = parent.to_vec();
        path.push(display_segment(node.name()));
        self.register_label(node.name(), path.clone());
        if let RuleNode::Branch { children, .. } = node {
            for child in children {
                self.register_node(child, &path);
            }
        }
    }

    fn register_label(&mut self, label: &str, path: Vec<String>) {
        self.register_order(label);
        match self.path_by_label.entry(label.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(path);
            }
            Entry::Occupied(existing) => {
                warn!(
                    "event=rule_shadowed module=rules kind=path label={label} kept={} ignored={}",
                    existing.get().join("/"),
                    path.join("/")
                );
            }
        }
    }

    fn register_order(&mut self, label: &str) {
        if !self.declaration_index.contains_key(label) {
            self.declaration_index
                .insert(label.to_string(), self.declaration_order.len());
            self.declaration_order.push(label.to_string());
        }
    }
}

/// Display form of one label used as a path segment: `fighting pits` becomes
/// `Fighting Pits`. Category folders are never passed through here.
fn display_segment(label: &str) -> String {
    label
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::display_segment;
    use crate::rules::RuleHierarchy;

    #[test]
    fn display_segment_title_cases_words() {
        assert_eq!(display_segment("cities"), "Cities");
        assert_eq!(display_segment("fighting pits"), "Fighting Pits");
    }

    #[test]
    fn roots_precede_hierarchy_labels_in_declaration_order() {
        let yaml = r#"
fallback: Misc
categories:
  locations: 2_Locations
hierarchy:
  2_Locations:
    - ruins
"#;
        let rules = RuleHierarchy::load_from_str(yaml)
            .expect("fixture should parse")
            .compile();
        assert_eq!(rules.declaration_order(), ["locations", "ruins"]);
        assert!(rules.label_path("locations").is_none());
        assert_eq!(
            rules.label_path("ruins"),
            Some(&["2_Locations".to_string(), "Ruins".to_string()][..])
        );
    }

    #[test]
    fn duplicate_label_keeps_first_compiled_path() {
        let yaml = r#"
fallback: Misc
categories:
  locations: 2_Locations
  lore: 6_Lore
hierarchy:
  2_Locations:
    - ruins
  6_Lore:
    - ruins
"#;
        let rules = RuleHierarchy::load_from_str(yaml)
            .expect("fixture should parse")
            .compile();
        let path = rules.label_path("ruins").expect("ruins should compile");
        assert_eq!(path[0], "2_Locations");
        assert_eq!(
            rules.declaration_index("ruins"),
            Some(2),
            "re-visit must not change recorded order"
        );
    }

    #[test]
    fn reverse_root_lookup_prefers_first_declared_label() {
        let yaml = r#"
fallback: Misc
categories:
  characters: 1_People
  dragons: 1_People
"#;
        let rules = RuleHierarchy::load_from_str(yaml)
            .expect("fixture should parse")
            .compile();
        assert_eq!(rules.root_label_for_folder("1_People"), Some("characters"));
        assert_eq!(rules.root_folder("dragons"), Some("1_People"));
    }
}
