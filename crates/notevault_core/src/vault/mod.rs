//! Vault I/O collaborators around the classification engine.
//!
//! # Responsibility
//! - Keep filesystem, frontmatter, and index details out of the engine.
//! - Provide the organizer service driving one classification pass.
//!
//! # Invariants
//! - The engine itself never performs I/O; all of it lives behind this module.
//! - Store APIs exchange vault-relative paths only.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod frontmatter;
pub mod index;
pub mod organizer;
pub mod store;

pub use frontmatter::{extract_meta, is_redirect, replace_tags, NoteMeta};
pub use index::{render_index, sync_indexes, INDEX_DIR};
pub use organizer::{OrganizeReport, Organizer};
pub use store::{FsNoteStore, NoteStore};

pub type VaultResult<T> = Result<T, VaultError>;

/// Vault I/O failure, carrying the offending path.
#[derive(Debug)]
pub enum VaultError {
    Io {
        path: String,
        source: std::io::Error,
    },
    /// Path has no usable UTF-8 file name.
    InvalidPath(String),
}

impl Display for VaultError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "vault i/o failed at `{path}`: {source}"),
            Self::InvalidPath(path) => write!(f, "unusable note path: `{path}`"),
        }
    }
}

impl Error for VaultError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidPath(_) => None,
        }
    }
}
