//! Core domain logic for NoteVault.
//! This crate is the single source of truth for classification invariants.

pub mod classify;
pub mod logging;
pub mod model;
pub mod rules;
pub mod vault;

pub use classify::{consolidate, infer_ancestors, normalize_label, resolve, Classifier};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::Classification;
pub use rules::{CompiledRules, ConfigError, RuleHierarchy, RuleNode};
pub use vault::{FsNoteStore, NoteStore, OrganizeReport, Organizer, VaultError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
