use std::{fmt, panic::Location};

use error_location::ErrorLocation;
use thiserror::Error;

/// Icon switching errors with source location tracking.
///
/// None of these are retried. Each one is the single, final outcome of the
/// call that produced it.
#[derive(Error, Debug)]
pub enum IconError {
    /// The host does not support alternate icons at all.
    #[error("Alternate icons not supported {location}")]
    UnsupportedPlatform {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The host's icon switch procedure could not be resolved or invoked.
    #[error("Icon switch mechanism unavailable: {reason} {location}")]
    MechanismUnavailable {
        /// Why the probe or invocation failed.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The host reported an error while switching icons.
    #[error("Failed to change app icon: {message} {location}")]
    PlatformRejected {
        /// Message reported by the host, preserved verbatim.
        message: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The packaged icon configuration could not be read.
    #[error("Icon configuration unreadable: {reason} {location}")]
    ConfigurationUnreadable {
        /// Description of the read or parse failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Location-free discriminant of an [`IconError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconErrorKind {
    /// See [`IconError::UnsupportedPlatform`].
    UnsupportedPlatform,
    /// See [`IconError::MechanismUnavailable`].
    MechanismUnavailable,
    /// See [`IconError::PlatformRejected`].
    PlatformRejected,
    /// See [`IconError::ConfigurationUnreadable`].
    ConfigurationUnreadable,
}

impl fmt::Display for IconErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IconErrorKind::UnsupportedPlatform => "UnsupportedPlatform",
            IconErrorKind::MechanismUnavailable => "MechanismUnavailable",
            IconErrorKind::PlatformRejected => "PlatformRejected",
            IconErrorKind::ConfigurationUnreadable => "ConfigurationUnreadable",
        };
        f.write_str(name)
    }
}

impl IconError {
    /// Which failure this is, without the location payload.
    pub fn kind(&self) -> IconErrorKind {
        match self {
            IconError::UnsupportedPlatform { .. } => IconErrorKind::UnsupportedPlatform,
            IconError::MechanismUnavailable { .. } => IconErrorKind::MechanismUnavailable,
            IconError::PlatformRejected { .. } => IconErrorKind::PlatformRejected,
            IconError::ConfigurationUnreadable { .. } => IconErrorKind::ConfigurationUnreadable,
        }
    }

    /// Human-readable detail without the source location.
    pub fn detail(&self) -> String {
        match self {
            IconError::UnsupportedPlatform { .. } => "Alternate icons not supported".to_string(),
            IconError::MechanismUnavailable { reason, .. } => reason.clone(),
            IconError::PlatformRejected { message, .. } => message.clone(),
            IconError::ConfigurationUnreadable { reason, .. } => reason.clone(),
        }
    }

    /// Build an [`IconError::UnsupportedPlatform`] at the caller's location.
    #[track_caller]
    pub fn unsupported() -> Self {
        IconError::UnsupportedPlatform {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Build an [`IconError::MechanismUnavailable`] at the caller's location.
    #[track_caller]
    pub fn mechanism_unavailable(reason: impl Into<String>) -> Self {
        IconError::MechanismUnavailable {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Build an [`IconError::PlatformRejected`] at the caller's location.
    #[track_caller]
    pub fn platform_rejected(message: impl Into<String>) -> Self {
        IconError::PlatformRejected {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Build an [`IconError::ConfigurationUnreadable`] at the caller's location.
    #[track_caller]
    pub fn configuration_unreadable(reason: impl Into<String>) -> Self {
        IconError::ConfigurationUnreadable {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result type alias using [`IconError`].
pub type Result<T> = std::result::Result<T, IconError>;
