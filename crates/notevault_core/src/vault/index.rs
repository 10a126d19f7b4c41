//! Per-label index document generation.
//!
//! # Responsibility
//! - Render one markdown listing per label under `_indexes/`.
//! - Remove listings for labels that no longer occur in the vault.

use crate::vault::store::NoteStore;
use crate::vault::VaultResult;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Directory holding generated index documents.
pub const INDEX_DIR: &str = "_indexes";

/// Renders the markdown index document for one label.
pub fn render_index(label: &str, notes: &[PathBuf]) -> String {
    let mut sorted: Vec<&PathBuf> = notes.iter().collect();
    sorted.sort();

    let mut lines = vec![format!("# Index for `{label}`\n")];
    for note in sorted {
        let link = wiki_link_path(note);
        let name = note
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("note");
        lines.push(format!("- [[{link}|{name}]]"));
    }
    lines.join("\n")
}

/// Rewrites index documents to match `notes_by_label`, removing obsolete
/// ones. Returns `(written, removed)` counts.
pub fn sync_indexes<S: NoteStore>(
    store: &S,
    notes_by_label: &BTreeMap<String, Vec<PathBuf>>,
) -> VaultResult<(usize, usize)> {
    let index_dir = Path::new(INDEX_DIR);

    let mut removed = 0;
    for file_name in store.list_dir(index_dir)? {
        if !file_name.ends_with(".md") {
            continue;
        }
        let Some(label) = Path::new(&file_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
        else {
            continue;
        };
        if !notes_by_label.contains_key(&label.to_lowercase()) {
            store.remove_note(&index_dir.join(&file_name))?;
            removed += 1;
        }
    }

    let mut written = 0;
    for (label, notes) in notes_by_label {
        let content = render_index(label, notes);
        store.write_note(&index_dir.join(format!("{label}.md")), &content)?;
        written += 1;
    }

    Ok((written, removed))
}

// wiki links always use forward slashes, regardless of platform
fn wiki_link_path(note: &Path) -> String {
    note.iter()
        .filter_map(|part| part.to_str())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::render_index;
    use std::path::PathBuf;

    #[test]
    fn render_sorts_notes_and_uses_wiki_links() {
        let notes = vec![
            PathBuf::from("6_Lore/second.md"),
            PathBuf::from("2_Locations/Ruins/first.md"),
        ];
        let rendered = render_index("ruins", &notes);
        assert!(rendered.starts_with("# Index for `ruins`\n"));
        let first_at = rendered
            .find("[[2_Locations/Ruins/first.md|first]]")
            .expect("first link should render");
        let second_at = rendered
            .find("[[6_Lore/second.md|second]]")
            .expect("second link should render");
        assert!(first_at < second_at);
    }
}
