//! Content collection schemas and the schema registry.
//!
//! Each named content collection is governed by a schema: either a list of
//! typed field descriptors checked by [`crate::validate::validate_record`],
//! or an externally defined schema treated as a pass-through contract.
//! The registry is built once at startup and passed by reference to
//! validation callers; it is not a global singleton.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteError};
use crate::validate::{validate_record, Record};

/// The type a schema field is declared to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Text string.
    String,
    /// Calendar date or timestamp.
    Date,
    /// Integer or float.
    Number,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Date => write!(f, "date"),
            Self::Number => write!(f, "number"),
        }
    }
}

/// Descriptor for a single schema field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as it appears in frontmatter.
    pub name: String,

    /// Whether the field must be present.
    pub required: bool,

    /// Declared type of the field.
    pub kind: FieldKind,

    /// Whether a string value must be non-empty. Plain string fields
    /// accept the empty string.
    #[serde(default)]
    pub non_empty: bool,
}

impl FieldSpec {
    /// A required field of the given kind.
    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            required: true,
            kind,
            non_empty: false,
        }
    }

    /// An optional field of the given kind.
    pub fn optional(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            required: false,
            kind,
            non_empty: false,
        }
    }

    /// Reject the empty string for this field.
    pub fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }
}

/// Schema for one content collection.
#[derive(Debug, Clone)]
pub enum CollectionSchema {
    /// Schema is defined by an external theme or framework and opaque to
    /// this system; entries pass through unvalidated.
    Delegated,

    /// Record schema described by a list of field descriptors.
    Record(Vec<FieldSpec>),
}

/// Registry mapping collection names to their schemas.
#[derive(Debug, Clone, Default)]
pub struct CollectionRegistry {
    schemas: HashMap<String, CollectionSchema>,
}

impl CollectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed registry for this site: `docs` entries follow the theme
    /// plugin's own schema, `release_notes` entries must carry a title,
    /// a date, and a version string.
    ///
    /// `semver` is deliberately a plain string; no version-format pattern
    /// is enforced and the empty string is accepted. Only `title` must be
    /// non-empty.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register("docs", CollectionSchema::Delegated)
            .expect("empty registry");
        registry
            .register(
                "release_notes",
                CollectionSchema::Record(vec![
                    FieldSpec::required("title", FieldKind::String).non_empty(),
                    FieldSpec::required("date", FieldKind::Date),
                    FieldSpec::required("semver", FieldKind::String),
                ]),
            )
            .expect("empty registry");
        registry
    }

    /// Associate a collection name with a schema.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the name is already registered;
    /// the registry is append-only and names must be unique.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        schema: CollectionSchema,
    ) -> Result<()> {
        let name = name.into();
        if self.schemas.contains_key(&name) {
            return Err(SiteError::config(format!(
                "collection '{name}' is already registered"
            )));
        }
        self.schemas.insert(name, schema);
        Ok(())
    }

    /// Look up the schema for a collection name.
    pub fn get(&self, name: &str) -> Option<&CollectionSchema> {
        self.schemas.get(name)
    }

    /// True if a schema is registered for the name.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Names of all registered collections, sorted alphabetically.
    pub fn collection_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Validate a record against the named collection's schema.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::UnknownCollection`] if no schema is registered
    /// for the name, and [`SiteError::Validation`] with the full violation
    /// list if the record does not conform. On success the record is
    /// unchanged; validation performs no coercion.
    pub fn validate(&self, collection: &str, record: &Record) -> Result<()> {
        let schema = self
            .get(collection)
            .ok_or_else(|| SiteError::unknown_collection(collection))?;

        validate_record(schema, record)
            .map_err(|violations| SiteError::validation(collection, violations))
    }
}
