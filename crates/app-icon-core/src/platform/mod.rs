mod completion;
mod simulated;
#[cfg(target_os = "ios")]
mod uikit;

pub(crate) use completion::HostOutcome;

pub use {
    completion::IconChangeCompletion,
    simulated::{CompletionDelivery, SimulatedIconSetter, SimulatedPlatform},
};

#[cfg(target_os = "ios")]
pub use uikit::{UIKitIconSetter, UIKitPlatform};

use crate::CoreResult;

/// Host that owns the displayed app icon.
///
/// All icon state lives behind this trait. The bridge queries it on every
/// call and never keeps a copy.
pub trait IconPlatform: Send + Sync {
    /// Resolved switch procedure returned by [`resolve_icon_setter`](Self::resolve_icon_setter).
    type Setter: IconSetter;

    /// Whether this host can show alternate icons. Returns `false` when the
    /// question cannot be answered.
    fn supports_alternate_icons(&self) -> bool;

    /// Name of the alternate icon currently shown, `None` for the primary
    /// icon or when the host cannot say.
    fn alternate_icon_name(&self) -> Option<String>;

    /// Alternate icon names declared in the packaged configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationUnreadable` if the configuration cannot be read.
    fn packaged_alternate_icons(&self) -> CoreResult<Vec<String>>;

    /// Look up the procedure that switches icons.
    ///
    /// # Errors
    ///
    /// Returns `MechanismUnavailable` when the procedure is missing or
    /// cannot be called on this host version.
    fn resolve_icon_setter(&self) -> CoreResult<Self::Setter>;
}

/// A resolved icon switch procedure.
pub trait IconSetter {
    /// Issue exactly one switch request. `None` clears the alternate icon.
    ///
    /// The host reports the outcome through `completion`, at most once and
    /// possibly on another thread.
    fn set_alternate_icon_name(&self, name: Option<&str>, completion: IconChangeCompletion);
}
