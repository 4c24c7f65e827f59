//! Site configuration management.
//!
//! The site configuration is declarative data handed through to the
//! rendering framework: title, logo, stylesheets, social links, component
//! overrides, the sidebar navigation tree, and table-of-contents depth.
//! This module parses it, applies defaults, and sanity-checks the few
//! fields that have constraints.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteError};

/// Top-level site configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Directory holding content collections.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Custom stylesheets, in load order.
    #[serde(default)]
    pub custom_css: Vec<String>,

    /// Site logo settings.
    #[serde(default)]
    pub logo: Option<LogoConfig>,

    /// Social links (name to URL).
    #[serde(default)]
    pub social: BTreeMap<String, String>,

    /// Theme component overrides (slot name to component path).
    #[serde(default)]
    pub components: BTreeMap<String, String>,

    /// Sidebar navigation tree.
    #[serde(default)]
    pub sidebar: Vec<SidebarEntry>,

    /// Table-of-contents settings.
    #[serde(default)]
    pub table_of_contents: TocConfig,
}

/// Logo configuration with light/dark variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoConfig {
    /// Logo shown on light backgrounds.
    pub light: String,

    /// Logo shown on dark backgrounds.
    pub dark: String,

    /// Whether the logo replaces the title text in the header.
    #[serde(default)]
    pub replaces_title: bool,
}

/// One entry in the sidebar navigation tree.
///
/// The variants are distinguished by their field sets, so the TOML form
/// needs no explicit tag: a `slug` makes a link, a `directory` delegates a
/// subtree to the framework's autogeneration, and `items` nests a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarEntry {
    /// A labeled group of nested entries.
    Group {
        label: String,
        items: Vec<SidebarEntry>,
    },

    /// A subtree autogenerated by the framework from a content directory.
    Autogenerate { label: String, directory: String },

    /// An explicit link to a page by slug.
    Link { label: String, slug: String },
}

impl SidebarEntry {
    /// The entry's display label.
    pub fn label(&self) -> &str {
        match self {
            Self::Group { label, .. }
            | Self::Autogenerate { label, .. }
            | Self::Link { label, .. } => label,
        }
    }
}

/// Table-of-contents configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocConfig {
    /// Deepest heading level included in the table of contents (1-6).
    #[serde(default = "default_max_heading_level")]
    pub max_heading_level: u8,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_max_heading_level() -> u8 {
    3
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            max_heading_level: default_max_heading_level(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SiteError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: SiteConfig = toml::from_str(&content).map_err(|e| {
            SiteError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with a `DOCSITE`-prefixed environment overlay.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("DOCSITE").separator("__"))
            .build()?;

        let config: SiteConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(SiteError::config("title cannot be empty"));
        }

        let depth = self.table_of_contents.max_heading_level;
        if !(1..=6).contains(&depth) {
            return Err(SiteError::config(format!(
                "table_of_contents.max_heading_level must be between 1 and 6, got {depth}"
            )));
        }

        Ok(())
    }
}
