//! Packaged alternate icon configuration.
//!
//! The portable form of the `CFBundleAlternateIcons` table an iOS bundle
//! carries: a list of alternate icon names and the image assets behind each.
//! It is produced at build time and only ever read at runtime.

use crate::{CoreResult, IconError};

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One alternate icon entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternateIcon {
    /// Name callers switch to.
    pub name: String,

    /// Image asset names backing this icon.
    #[serde(default)]
    pub files: Vec<String>,

    /// Whether the images are already rendered with the platform gloss.
    #[serde(default)]
    pub prerendered: bool,
}

/// Packaged list of alternate icons, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconManifest {
    /// Declared alternate icons.
    #[serde(default, rename = "alternate_icon")]
    pub alternate_icons: Vec<AlternateIcon>,
}

impl IconManifest {
    /// Build a manifest from bare names, with no asset files.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            alternate_icons: names
                .into_iter()
                .map(|name| AlternateIcon {
                    name: name.into(),
                    files: Vec::new(),
                    prerendered: false,
                })
                .collect(),
        }
    }

    /// Parse a manifest from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationUnreadable` if the text is not a valid manifest.
    #[track_caller]
    pub fn from_toml_str(contents: &str) -> CoreResult<Self> {
        toml::from_str(contents).map_err(|e| {
            IconError::configuration_unreadable(format!("Failed to parse icon manifest: {}", e))
        })
    }

    /// Read and parse a manifest file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationUnreadable` if the file cannot be read or parsed.
    #[track_caller]
    #[instrument(skip(path), fields(path = ?path.as_ref()))]
    pub fn load<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|e| {
            IconError::configuration_unreadable(format!(
                "Failed to read icon manifest {:?}: {}",
                path, e
            ))
        })?;

        let manifest = Self::from_toml_str(&contents)?;

        debug!(
            icon_count = manifest.alternate_icons.len(),
            "Icon manifest loaded"
        );

        Ok(manifest)
    }

    /// Alternate icon names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.alternate_icons.iter().map(|icon| icon.name.as_str())
    }

    /// Whether `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|declared| declared == name)
    }
}
