//! Record validation against collection schemas.
//!
//! A record is an unordered mapping from field name to raw value, as parsed
//! from a content file's frontmatter. Validation checks every declared field
//! and collects all violations before failing, so an author sees every
//! problem in a document at once rather than one at a time.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde_yaml::Value;

use crate::schema::{CollectionSchema, FieldKind, FieldSpec};

/// A raw content record: field name to raw value.
pub type Record = serde_yaml::Mapping;

/// What went wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// A required field is absent.
    Missing,
    /// A required string field is present but empty.
    Empty,
    /// A field is present but has the wrong type.
    TypeMismatch {
        expected: FieldKind,
        actual: String,
    },
}

/// A single validation violation with the field it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Name of the violating field.
    pub field: String,
    /// What went wrong.
    pub problem: Problem,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.problem {
            Problem::Missing => write!(f, "  {}: missing required field", self.field),
            Problem::Empty => write!(f, "  {}: must not be empty", self.field),
            Problem::TypeMismatch { expected, actual } => {
                write!(f, "  {}: expected {expected}, got {actual}", self.field)
            }
        }
    }
}

/// Collection of validation violations for one record.
#[derive(Debug, Clone, Default)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// True if some violation concerns the named field.
    pub fn names_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Validate a record against a collection schema.
///
/// Single-pass and field-order-independent. Checks every declared field and
/// returns the full violation list on failure; a record with any invalid
/// field is rejected as a whole. Fields not declared in the schema are
/// ignored, matching the permissive behavior of externally delegated
/// schemas. The record itself is never mutated or coerced.
pub fn validate_record(
    schema: &CollectionSchema,
    record: &Record,
) -> std::result::Result<(), Violations> {
    let fields = match schema {
        // Externally defined schema: pass-through contract.
        CollectionSchema::Delegated => return Ok(()),
        CollectionSchema::Record(fields) => fields,
    };

    let mut violations = Vec::new();

    for spec in fields {
        match record.get(spec.name.as_str()) {
            None => {
                if spec.required {
                    violations.push(Violation {
                        field: spec.name.clone(),
                        problem: Problem::Missing,
                    });
                }
            }
            Some(value) => {
                if let Some(problem) = check_kind(spec, value) {
                    violations.push(Violation {
                        field: spec.name.clone(),
                        problem,
                    });
                }
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(Violations { violations })
    }
}

/// Check a present value against its field descriptor.
fn check_kind(spec: &FieldSpec, value: &Value) -> Option<Problem> {
    let kind = spec.kind;
    match kind {
        FieldKind::String => match value.as_str() {
            Some(s) if s.is_empty() && spec.non_empty => Some(Problem::Empty),
            Some(_) => None,
            None => Some(Problem::TypeMismatch {
                expected: kind,
                actual: type_name(value).to_string(),
            }),
        },
        FieldKind::Date => match value.as_str() {
            Some(s) if parses_as_date(s) => None,
            Some(s) => Some(Problem::TypeMismatch {
                expected: kind,
                actual: format!("\"{s}\""),
            }),
            None => Some(Problem::TypeMismatch {
                expected: kind,
                actual: type_name(value).to_string(),
            }),
        },
        FieldKind::Number => {
            if value.is_number() {
                None
            } else {
                Some(Problem::TypeMismatch {
                    expected: kind,
                    actual: type_name(value).to_string(),
                })
            }
        }
    }
}

/// True if the string is a calendar date (`YYYY-MM-DD`) or an RFC 3339
/// timestamp.
fn parses_as_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(s).is_ok()
}

/// Human-readable name for a YAML value's type.
fn type_name(value: &Value) -> &'static str {
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
