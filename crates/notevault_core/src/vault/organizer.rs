//! Vault organization service.
//!
//! # Responsibility
//! - Drive one classification pass over every note in the vault.
//! - Apply retagging, moves, deletions, and index regeneration.
//!
//! # Invariants
//! - Per-note I/O failures are logged and skipped, never fatal to the pass.
//! - Already-organized category folders and `_indexes/` are not re-scanned.
//! - The label -> notes association is accumulated here, not in the engine.

use crate::classify::{normalize_label, Classifier};
use crate::rules::CompiledRules;
use crate::vault::frontmatter::{extract_meta, is_redirect, replace_tags};
use crate::vault::index::{sync_indexes, INDEX_DIR};
use crate::vault::store::NoteStore;
use crate::vault::VaultResult;
use log::{info, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Counters from one organization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrganizeReport {
    pub scanned: usize,
    pub moved: usize,
    pub retagged: usize,
    pub deleted_templates: usize,
    pub deleted_redirects: usize,
    pub indexes_written: usize,
    pub indexes_removed: usize,
}

/// Organization service over a note store.
pub struct Organizer<'r, S: NoteStore> {
    classifier: Classifier<'r>,
    store: S,
}

impl<'r, S: NoteStore> Organizer<'r, S> {
    /// Creates the service from an engine and a store implementation.
    pub fn new(classifier: Classifier<'r>, store: S) -> Self {
        Self { classifier, store }
    }

    /// Runs one full organization pass and regenerates label indexes.
    pub fn organize(&self) -> VaultResult<OrganizeReport> {
        let skip_dirs = organized_dirs(self.classifier.rules());
        let notes = self.store.list_notes(&skip_dirs)?;

        let mut report = OrganizeReport::default();
        let mut notes_by_label: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

        for note in notes {
            report.scanned += 1;
            if let Err(err) = self.organize_note(&note, &mut report, &mut notes_by_label) {
                warn!(
                    "event=note_skipped module=vault status=error note={} error={err}",
                    note.display()
                );
            }
        }

        let (written, removed) = sync_indexes(&self.store, &notes_by_label)?;
        report.indexes_written = written;
        report.indexes_removed = removed;

        info!(
            "event=organize_done module=vault status=ok scanned={} moved={} retagged={} \
             templates={} redirects={} indexes_written={} indexes_removed={}",
            report.scanned,
            report.moved,
            report.retagged,
            report.deleted_templates,
            report.deleted_redirects,
            report.indexes_written,
            report.indexes_removed
        );
        Ok(report)
    }

    fn organize_note(
        &self,
        note: &Path,
        report: &mut OrganizeReport,
        notes_by_label: &mut BTreeMap<String, Vec<PathBuf>>,
    ) -> VaultResult<()> {
        if is_template(note) {
            self.store.remove_note(note)?;
            report.deleted_templates += 1;
            return Ok(());
        }

        let content = self.store.read_note(note)?;
        if is_redirect(&content) {
            self.store.remove_note(note)?;
            report.deleted_redirects += 1;
            return Ok(());
        }

        let meta = extract_meta(&content);
        let mut raw_labels = meta.tags.clone();
        if let Some(marker) = meta.infobox.as_deref() {
            if let Some(label) = self.classifier.rules().infobox_label(marker) {
                raw_labels.push(label.to_string());
            }
        }

        let classification = self.classifier.classify(&raw_labels);

        let original: BTreeSet<String> = meta
            .tags
            .iter()
            .filter_map(|tag| normalize_label(tag))
            .collect();
        let resolved: BTreeSet<String> = classification.labels.iter().cloned().collect();
        if original != resolved {
            let updated = replace_tags(&content, &classification.labels);
            self.store.write_note(note, &updated)?;
            report.retagged += 1;
        }

        let target_dir = classification.target_dir();
        let current_dir = note.parent().unwrap_or(Path::new(""));
        let final_path = if current_dir == target_dir {
            note.to_path_buf()
        } else {
            let moved = self.store.move_note(note, &target_dir)?;
            report.moved += 1;
            moved
        };

        for label in &classification.labels {
            notes_by_label
                .entry(label.clone())
                .or_default()
                .push(final_path.clone());
        }
        Ok(())
    }
}

fn is_template(note: &Path) -> bool {
    note.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("Template_"))
}

fn organized_dirs(rules: &CompiledRules) -> Vec<String> {
    let mut dirs: BTreeSet<String> = rules.category_folders().map(str::to_string).collect();
    dirs.insert(rules.fallback_category().to_string());
    dirs.insert(INDEX_DIR.to_string());
    dirs.into_iter().collect()
}
