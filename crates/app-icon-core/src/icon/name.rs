use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};

/// Identifier of an app icon variant.
///
/// The reserved value [`IconName::DEFAULT`] stands for the application's
/// primary icon. It is never handed to the host as an alternate name: the
/// host receives "no alternate" instead, and a host reply of "no alternate"
/// comes back as `DEFAULT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct IconName(Cow<'static, str>);

impl IconName {
    /// Sentinel string for the primary icon.
    pub const DEFAULT_STR: &'static str = "DEFAULT";

    /// The primary icon.
    pub const DEFAULT: IconName = IconName(Cow::Borrowed(Self::DEFAULT_STR));

    /// Create an identifier from any string. Only `"DEFAULT"` names the
    /// primary icon; every other string, empty included, is passed to the
    /// host as-is.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Map the host's "current alternate" answer back to an identifier.
    /// An absent or empty answer means the primary icon.
    pub fn from_platform(name: Option<String>) -> Self {
        match name {
            Some(name) if !name.is_empty() => Self::new(name),
            _ => Self::DEFAULT,
        }
    }

    /// Whether this is the primary icon.
    pub fn is_default(&self) -> bool {
        self.0 == Self::DEFAULT_STR
    }

    /// The name the host should receive: `None` clears the alternate icon.
    pub fn platform_name(&self) -> Option<&str> {
        if self.is_default() {
            None
        } else {
            Some(self.0.as_ref())
        }
    }

    /// Caller-facing string, `"DEFAULT"` for the primary icon.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for IconName {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for IconName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for IconName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for IconName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for IconName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<IconName> for String {
    fn from(name: IconName) -> Self {
        name.0.into_owned()
    }
}

impl PartialEq<str> for IconName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for IconName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
