//! YAML frontmatter extraction and rewrite.
//!
//! # Responsibility
//! - Extract note metadata leniently: bad frontmatter degrades to empty.
//! - Rewrite only the `tags` key, preserving all other frontmatter keys.
//!
//! # Invariants
//! - Extraction never fails a note; non-string tag entries are filtered.
//! - Key order of untouched frontmatter entries survives a rewrite.

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::{Mapping, Value};

static FRONTMATTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A---\r?\n(.*?)\r?\n---\r?\n").expect("valid frontmatter regex")
});

/// Metadata extracted from one note's frontmatter block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteMeta {
    /// Infobox marker, lowercased.
    pub infobox: Option<String>,
    /// Raw tag values as written; non-string entries are dropped.
    pub tags: Vec<String>,
}

/// Extracts metadata from note content.
///
/// Absent frontmatter, YAML errors, and non-string entries all degrade to an
/// empty or partial `NoteMeta` instead of failing the note.
pub fn extract_meta(content: &str) -> NoteMeta {
    let Some(mapping) = frontmatter_mapping(content) else {
        return NoteMeta::default();
    };

    let infobox = mapping
        .get(&Value::String("infobox".to_string()))
        .and_then(Value::as_str)
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty());

    let tags = mapping
        .get(&Value::String("tags".to_string()))
        .and_then(Value::as_sequence)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    NoteMeta { infobox, tags }
}

/// Replaces the `tags` key in the frontmatter, creating a block when absent.
pub fn replace_tags(content: &str, tags: &[String]) -> String {
    let tags_value = Value::Sequence(tags.iter().map(|tag| Value::String(tag.clone())).collect());

    let (mut mapping, body_start) = match FRONTMATTER_RE.find(content) {
        Some(found) => (
            frontmatter_mapping(content).unwrap_or_default(),
            found.end(),
        ),
        None => (Mapping::new(), 0),
    };
    mapping.insert(Value::String("tags".to_string()), tags_value);

    let Ok(block) = serde_yaml::to_string(&mapping) else {
        warn!("event=frontmatter_render_failed module=vault status=skip");
        return content.to_string();
    };

    if body_start > 0 {
        format!("---\n{block}---\n{}", &content[body_start..])
    } else {
        format!("---\n{block}---\n\n{content}")
    }
}

/// Reports whether the note body (frontmatter stripped) is a redirect stub.
pub fn is_redirect(content: &str) -> bool {
    FRONTMATTER_RE
        .replace(content, "")
        .trim_start()
        .starts_with("1.  REDIRECT")
}

fn frontmatter_mapping(content: &str) -> Option<Mapping> {
    let captures = FRONTMATTER_RE.captures(content)?;
    let block = captures.get(1)?.as_str();
    match serde_yaml::from_str::<Mapping>(block) {
        Ok(mapping) => Some(mapping),
        Err(err) => {
            warn!("event=frontmatter_parse_failed module=vault status=skip error={err}");
            None
        }
    }
}
