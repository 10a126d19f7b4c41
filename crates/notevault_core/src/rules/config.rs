//! Rule file loading and validation.
//!
//! # Responsibility
//! - Parse the YAML rule file into a typed, ordered rule hierarchy.
//! - Reject malformed rule structures at startup instead of per note.
//!
//! # Invariants
//! - `RuleHierarchy` preserves the declaration order of categories and nodes.
//! - Node trees are bounded to `MAX_RULE_DEPTH` nesting levels.

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub(crate) const MAX_RULE_DEPTH: usize = 16;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Fatal rule-file error. Raised at startup only; classification never errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Rule file could not be read.
    Io {
        path: String,
        source: std::io::Error,
    },
    /// Rule file is not valid YAML or misses a required key.
    Parse(String),
    /// A mapping key that must be a plain string is not one.
    NonStringKey { section: &'static str },
    /// A mapping value that must be a plain string is not one.
    NonStringValue { section: &'static str, key: String },
    /// A hierarchy node is neither string, sequence, mapping, nor null.
    UnsupportedNode { context: String, found: &'static str },
    /// Hierarchy nesting exceeds `MAX_RULE_DEPTH`.
    DepthExceeded { context: String, max: usize },
    /// A label is blank after trimming.
    EmptyLabel { context: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read rule file `{path}`: {source}"),
            Self::Parse(message) => write!(f, "invalid rule file: {message}"),
            Self::NonStringKey { section } => {
                write!(f, "`{section}` contains a non-string key")
            }
            Self::NonStringValue { section, key } => {
                write!(f, "`{section}.{key}` must be a plain string")
            }
            Self::UnsupportedNode { context, found } => {
                write!(f, "unsupported node type {found} in hierarchy at `{context}`")
            }
            Self::DepthExceeded { context, max } => {
                write!(f, "hierarchy at `{context}` exceeds maximum depth {max}")
            }
            Self::EmptyLabel { context } => write!(f, "blank label in `{context}`"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// One `category label -> category folder` pair, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    /// Category root label, lowercased.
    pub label: String,
    /// Destination folder name, kept verbatim (e.g. `2_Locations`).
    pub folder: String,
}

/// One node of a category's subcategory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleNode {
    /// Terminal label.
    Leaf(String),
    /// Label with nested subcategories.
    Branch {
        name: String,
        children: Vec<RuleNode>,
    },
}

impl RuleNode {
    /// Label of this node, lowercased at parse time.
    pub fn name(&self) -> &str {
        match self {
            Self::Leaf(name) => name,
            Self::Branch { name, .. } => name,
        }
    }
}

/// Validated, ordered rule configuration. Built once, immutable thereafter.
#[derive(Debug, Clone)]
pub struct RuleHierarchy {
    pub(crate) fallback: String,
    pub(crate) categories: Vec<CategoryRule>,
    pub(crate) trees: Vec<(String, Vec<RuleNode>)>,
    pub(crate) synonyms: Vec<(String, String)>,
    pub(crate) infobox_aliases: Vec<(String, String)>,
}

#[derive(Debug, Deserialize)]
struct RawRulesConfig {
    fallback: String,
    categories: Mapping,
    #[serde(default)]
    hierarchy: Mapping,
    #[serde(default)]
    synonyms: Mapping,
    #[serde(default)]
    infobox: Mapping,
}

impl RuleHierarchy {
    /// Loads and validates a rule file.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&content)
    }

    /// Loads and validates rules from YAML text.
    ///
    /// Mapping order in the document is the declaration order used for
    /// tie-breaking later; it is preserved end to end.
    pub fn load_from_str(text: &str) -> ConfigResult<Self> {
        let raw: RawRulesConfig =
            serde_yaml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;

        let fallback = raw.fallback.trim().to_string();
        if fallback.is_empty() {
            return Err(ConfigError::EmptyLabel {
                context: "fallback".to_string(),
            });
        }

        Ok(Self {
            fallback,
            categories: convert_categories(&raw.categories)?,
            trees: convert_hierarchy(&raw.hierarchy)?,
            synonyms: convert_string_map(&raw.synonyms, "synonyms")?,
            infobox_aliases: convert_string_map(&raw.infobox, "infobox")?,
        })
    }

    /// Fallback folder used when no label matches a category root.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

fn convert_categories(mapping: &Mapping) -> ConfigResult<Vec<CategoryRule>> {
    let mut categories = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let label = string_key(key, "categories")?;
        let Some(folder) = value.as_str().map(str::trim).filter(|v| !v.is_empty()) else {
            return Err(ConfigError::NonStringValue {
                section: "categories",
                key: label,
            });
        };
        categories.push(CategoryRule {
            label,
            folder: folder.to_string(),
        });
    }
    Ok(categories)
}

fn convert_string_map(
    mapping: &Mapping,
    section: &'static str,
) -> ConfigResult<Vec<(String, String)>> {
    let mut pairs = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let source = string_key(key, section)?;
        let Some(target) = value.as_str().map(str::trim).filter(|v| !v.is_empty()) else {
            return Err(ConfigError::NonStringValue {
                section,
                key: source,
            });
        };
        pairs.push((source, target.to_lowercase()));
    }
    Ok(pairs)
}

fn convert_hierarchy(mapping: &Mapping) -> ConfigResult<Vec<(String, Vec<RuleNode>)>> {
    let mut trees = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let Some(folder) = key.as_str().map(str::trim).filter(|v| !v.is_empty()) else {
            return Err(ConfigError::NonStringKey {
                section: "hierarchy",
            });
        };
        let children = convert_children(value, folder, 1)?;
        trees.push((folder.to_string(), children));
    }
    Ok(trees)
}

/// Converts one YAML node into rule children.
///
/// Accepted forms: string (leaf), sequence (list of nodes), mapping (each
/// entry a branch), null (no children). Everything else is rejected, as is
/// nesting deeper than `MAX_RULE_DEPTH` levels.
fn convert_children(value: &Value, context: &str, depth: usize) -> ConfigResult<Vec<RuleNode>> {
    if depth > MAX_RULE_DEPTH {
        return Err(ConfigError::DepthExceeded {
            context: context.to_string(),
            max: MAX_RULE_DEPTH,
        });
    }

    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(raw) => Ok(vec![RuleNode::Leaf(leaf_label(raw, context)?)]),
        Value::Sequence(items) => {
            let mut children = Vec::new();
            for item in items {
                children.extend(convert_children(item, context, depth + 1)?);
            }
            Ok(children)
        }
        Value::Mapping(entries) => {
            let mut children = Vec::with_capacity(entries.len());
            for (key, child_value) in entries {
                let Some(raw) = key.as_str() else {
                    return Err(ConfigError::NonStringKey {
                        section: "hierarchy",
                    });
                };
                let name = leaf_label(raw, context)?;
                let nested_context = format!("{context}/{name}");
                let grandchildren = convert_children(child_value, &nested_context, depth + 1)?;
                children.push(RuleNode::Branch {
                    name,
                    children: grandchildren,
                });
            }
            Ok(children)
        }
        other => Err(ConfigError::UnsupportedNode {
            context: context.to_string(),
            found: value_kind(other),
        }),
    }
}

fn leaf_label(raw: &str, context: &str) -> ConfigResult<String> {
    let label = raw.trim().to_lowercase();
    if label.is_empty() {
        return Err(ConfigError::EmptyLabel {
            context: context.to_string(),
        });
    }
    Ok(label)
}

fn string_key(key: &Value, section: &'static str) -> ConfigResult<String> {
    let Some(raw) = key.as_str().map(str::trim).filter(|v| !v.is_empty()) else {
        return Err(ConfigError::NonStringKey { section });
    };
    Ok(raw.to_lowercase())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
