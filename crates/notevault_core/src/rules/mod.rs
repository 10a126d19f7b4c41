//! Declarative rule configuration and compilation.
//!
//! # Responsibility
//! - Own the rule file format and its validated in-memory form.
//! - Compile rules once into immutable lookup structures.
//!
//! # Invariants
//! - Compiled lookups never change after construction.
//! - Structural errors surface at load time, never during classification.

pub mod config;
pub mod hierarchy;

pub use config::{CategoryRule, ConfigError, ConfigResult, RuleHierarchy, RuleNode};
pub use hierarchy::CompiledRules;
