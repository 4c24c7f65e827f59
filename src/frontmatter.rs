//! Frontmatter parsing for content files.
//!
//! Content entries are source documents whose metadata lives in a
//! frontmatter block. Because each collection declares its own schema, the
//! block is parsed into a raw field map rather than a fixed struct; the
//! collection's schema decides which fields matter.

use std::path::Path;

use crate::error::{Result, SiteError};
use crate::validate::Record;

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
///
/// Returns `None` when the document carries no frontmatter block.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();
    let after_open = &content[delimiter.len()..];
    let closing = after_open.find(delimiter)?;

    let frontmatter = after_open[..closing].trim();
    let body = after_open[closing + delimiter.len()..].trim_start();

    Some((format, frontmatter, body))
}

/// Parse a content document into its raw field record and body.
///
/// A document without a frontmatter block yields an empty record; whether
/// that is acceptable is the collection schema's decision, not the
/// parser's.
///
/// # Errors
///
/// Returns [`SiteError::Frontmatter`] with the file path when the block is
/// not valid YAML/TOML, is not a field mapping, or opens with a delimiter
/// that is never closed. The last case would otherwise demote the
/// author's metadata into the document body and skip validation.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(Record, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        let head = content.trim_start();
        if head.starts_with("---") || head.starts_with("+++") {
            return Err(SiteError::frontmatter(
                path,
                "unterminated frontmatter block: opening delimiter has no closing delimiter",
            ));
        }
        return Ok((Record::new(), content.to_string()));
    };

    let record = match format {
        FrontmatterFormat::Yaml => record_from_yaml(fm_str, path)?,
        FrontmatterFormat::Toml => record_from_toml(fm_str, path)?,
    };

    Ok((record, body.to_string()))
}

fn record_from_yaml(fm_str: &str, path: &Path) -> Result<Record> {
    if fm_str.is_empty() {
        return Ok(Record::new());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(fm_str)
        .map_err(|e| SiteError::frontmatter(path, e.to_string()))?;

    match value {
        serde_yaml::Value::Mapping(record) => Ok(record),
        serde_yaml::Value::Null => Ok(Record::new()),
        other => Err(SiteError::frontmatter(
            path,
            format!("frontmatter must be a field mapping, got {other:?}"),
        )),
    }
}

fn record_from_toml(fm_str: &str, path: &Path) -> Result<Record> {
    let table: toml::Table =
        toml::from_str(fm_str).map_err(|e| SiteError::frontmatter(path, e.to_string()))?;

    let mut record = Record::new();
    for (key, value) in table {
        record.insert(serde_yaml::Value::String(key), toml_to_yaml_value(value));
    }
    Ok(record)
}

/// Convert a TOML value into the YAML value space shared by all records.
///
/// TOML datetimes become their string representation so that date fields
/// from YAML and TOML frontmatter validate identically.
fn toml_to_yaml_value(value: toml::Value) -> serde_yaml::Value {
    use serde_yaml::Value;

    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Value::Number(f.into()),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            Value::Sequence(items.into_iter().map(toml_to_yaml_value).collect())
        }
        toml::Value::Table(table) => {
            let mut mapping = serde_yaml::Mapping::new();
            for (key, value) in table {
                mapping.insert(Value::String(key), toml_to_yaml_value(value));
            }
            Value::Mapping(mapping)
        }
    }
}
