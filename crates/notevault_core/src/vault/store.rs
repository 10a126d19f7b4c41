//! Vault note store contract and filesystem implementation.
//!
//! # Responsibility
//! - Define the I/O seam used by the organizer.
//! - Keep path and conflict-rename details inside the store boundary.
//!
//! # Invariants
//! - All paths exchanged with callers are vault-relative.
//! - Moves never overwrite an existing note; conflicts rename to `name_1.md`.

use crate::vault::{VaultError, VaultResult};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Store interface for vault note I/O.
pub trait NoteStore {
    /// Lists vault-relative markdown note paths in sorted order, skipping
    /// notes whose first path component is in `skip_dirs` and anything under
    /// an `_indexes` directory.
    fn list_notes(&self, skip_dirs: &[String]) -> VaultResult<Vec<PathBuf>>;
    /// Reads one note's full content.
    fn read_note(&self, note: &Path) -> VaultResult<String>;
    /// Writes one note's full content, creating parent directories.
    fn write_note(&self, note: &Path, content: &str) -> VaultResult<()>;
    /// Removes one note.
    fn remove_note(&self, note: &Path) -> VaultResult<()>;
    /// Moves one note into `dest_dir`, renaming on conflicts; returns the new path.
    fn move_note(&self, note: &Path, dest_dir: &Path) -> VaultResult<PathBuf>;
    /// Lists file names directly under `dir`; empty when the directory is absent.
    fn list_dir(&self, dir: &Path) -> VaultResult<Vec<String>>;
}

/// Filesystem-backed note store rooted at one vault directory.
pub struct FsNoteStore {
    root: PathBuf,
}

impl FsNoteStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn absolute(&self, note: &Path) -> PathBuf {
        self.root.join(note)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> VaultError {
        VaultError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

impl NoteStore for FsNoteStore {
    fn list_notes(&self, skip_dirs: &[String]) -> VaultResult<Vec<PathBuf>> {
        let mut notes = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(|err| self.io_error(&self.root, err.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            if relative.extension().and_then(|ext| ext.to_str()) != Some("md") {
                continue;
            }
            if is_skipped(relative, skip_dirs) {
                continue;
            }
            notes.push(relative.to_path_buf());
        }
        notes.sort();
        Ok(notes)
    }

    fn read_note(&self, note: &Path) -> VaultResult<String> {
        fs::read_to_string(self.absolute(note)).map_err(|err| self.io_error(note, err))
    }

    fn write_note(&self, note: &Path, content: &str) -> VaultResult<()> {
        let absolute = self.absolute(note);
        if let Some(parent) = absolute.parent() {
            fs::create_dir_all(parent).map_err(|err| self.io_error(note, err))?;
        }
        fs::write(&absolute, content).map_err(|err| self.io_error(note, err))
    }

    fn remove_note(&self, note: &Path) -> VaultResult<()> {
        fs::remove_file(self.absolute(note)).map_err(|err| self.io_error(note, err))
    }

    fn move_note(&self, note: &Path, dest_dir: &Path) -> VaultResult<PathBuf> {
        fs::create_dir_all(self.absolute(dest_dir)).map_err(|err| self.io_error(dest_dir, err))?;

        let (stem, extension) = split_name(note)?;
        let mut destination = dest_dir.join(format!("{stem}{extension}"));
        let mut attempt = 1;
        while self.absolute(&destination).exists() {
            destination = dest_dir.join(format!("{stem}_{attempt}{extension}"));
            attempt += 1;
        }

        fs::rename(self.absolute(note), self.absolute(&destination))
            .map_err(|err| self.io_error(note, err))?;
        Ok(destination)
    }

    fn list_dir(&self, dir: &Path) -> VaultResult<Vec<String>> {
        let absolute = self.absolute(dir);
        if !absolute.is_dir() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        let entries = fs::read_dir(&absolute).map_err(|err| self.io_error(dir, err))?;
        for entry in entries {
            let entry = entry.map_err(|err| self.io_error(dir, err))?;
            if entry.path().is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

fn is_skipped(relative: &Path, skip_dirs: &[String]) -> bool {
    if relative
        .components()
        .any(|component| component.as_os_str() == "_indexes")
    {
        return true;
    }
    let Some(first) = relative.components().next() else {
        return true;
    };
    let Some(first) = first.as_os_str().to_str() else {
        return true;
    };
    // top-level files have their file name as first component; never skip those
    relative.parent().is_some_and(|parent| parent != Path::new(""))
        && skip_dirs.iter().any(|dir| dir == first)
}

fn split_name(note: &Path) -> VaultResult<(String, String)> {
    let stem = note
        .file_stem()
        .and_then(|value| value.to_str())
        .ok_or_else(|| VaultError::InvalidPath(note.display().to_string()))?;
    let extension = match note.extension().and_then(|value| value.to_str()) {
        Some(ext) => format!(".{ext}"),
        None => String::new(),
    };
    Ok((stem.to_string(), extension))
}

#[cfg(test)]
mod tests {
    use super::{FsNoteStore, NoteStore};
    use std::path::Path;

    fn store_with_notes(files: &[(&str, &str)]) -> (tempfile::TempDir, FsNoteStore) {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        for (path, content) in files {
            let absolute = dir.path().join(path);
            if let Some(parent) = absolute.parent() {
                std::fs::create_dir_all(parent).expect("parent dirs should be created");
            }
            std::fs::write(absolute, content).expect("fixture file should be written");
        }
        let store = FsNoteStore::new(dir.path().to_path_buf());
        (dir, store)
    }

    #[test]
    fn list_notes_skips_organized_dirs_and_indexes() {
        let (_dir, store) = store_with_notes(&[
            ("loose.md", "a"),
            ("drafts/inner.md", "b"),
            ("2_Locations/placed.md", "c"),
            ("_indexes/cities.md", "d"),
            ("not_markdown.txt", "e"),
        ]);
        let notes = store
            .list_notes(&["2_Locations".to_string()])
            .expect("listing should succeed");
        assert_eq!(
            notes,
            [Path::new("drafts/inner.md"), Path::new("loose.md")]
        );
    }

    #[test]
    fn move_note_renames_on_conflict() {
        let (dir, store) = store_with_notes(&[
            ("a/note.md", "first"),
            ("b/note.md", "second"),
        ]);
        let dest = Path::new("6_Lore");

        let first = store
            .move_note(Path::new("a/note.md"), dest)
            .expect("first move should succeed");
        let second = store
            .move_note(Path::new("b/note.md"), dest)
            .expect("second move should succeed");

        assert_eq!(first, Path::new("6_Lore/note.md"));
        assert_eq!(second, Path::new("6_Lore/note_1.md"));
        assert!(dir.path().join("6_Lore/note.md").exists());
        assert!(dir.path().join("6_Lore/note_1.md").exists());
    }

    #[test]
    fn list_dir_is_empty_for_missing_directory() {
        let (_dir, store) = store_with_notes(&[]);
        let names = store
            .list_dir(Path::new("_indexes"))
            .expect("listing a missing dir should succeed");
        assert!(names.is_empty());
    }
}
