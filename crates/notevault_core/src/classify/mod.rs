//! Classification engine.
//!
//! # Responsibility
//! - Orchestrate consolidation, ancestor inference, and path resolution.
//!
//! # Invariants
//! - Classification is a pure, synchronous function of its inputs; the
//!   compiled rules are never mutated and may be shared across threads.
//! - Every raw label list yields exactly one result.

pub mod ancestors;
pub mod consolidate;
pub mod resolver;

pub use ancestors::infer_ancestors;
pub use consolidate::{consolidate, normalize_label};
pub use resolver::resolve;

use crate::model::note::Classification;
use crate::rules::CompiledRules;

/// Classification engine bound to one compiled rule set.
///
/// Cheap to copy; multiple classifiers over distinct rule sets can coexist
/// without shared state.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'r> {
    rules: &'r CompiledRules,
}

impl<'r> Classifier<'r> {
    /// Binds the engine to one compiled rule set.
    pub fn new(rules: &'r CompiledRules) -> Self {
        Self { rules }
    }

    /// The bound rule set.
    pub fn rules(&self) -> &'r CompiledRules {
        self.rules
    }

    /// Full pipeline: consolidate, infer ancestors, resolve.
    pub fn classify(&self, raw_labels: &[String]) -> Classification {
        let consolidated = consolidate(self.rules, raw_labels);
        let (resolved, _) = infer_ancestors(self.rules, &consolidated);
        resolve(self.rules, &resolved)
    }
}
