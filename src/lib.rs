//! Docsite Core Library
//!
//! Configuration and content-collection validation for a documentation
//! website. The site itself is rendered by an external framework; this
//! library owns the data contract in front of it: the declarative site
//! configuration (title, logo, sidebar, stylesheets) and the schema
//! validation of content entries before any page is generated.

pub mod collections;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod schema;
pub mod validate;

pub use collections::{CollectionLoader, Entry, EntryFailure, LoadReport};
pub use config::{LogoConfig, SidebarEntry, SiteConfig, TocConfig};
pub use error::{Result, SiteError};
pub use schema::{CollectionRegistry, CollectionSchema, FieldKind, FieldSpec};
pub use validate::{Problem, Record, Violation, Violations};
