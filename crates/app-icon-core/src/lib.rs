//! App-icon Core Library
//!
//! Switches an application's home-screen icon at runtime through a small
//! typed bridge over the host platform.
//!
//! # Example
//!
//! ```no_run
//! use app_icon_core::{CoreResult, IconBridge, IconManifest, SimulatedPlatform};
//!
//! #[tokio::main]
//! async fn main() -> CoreResult<()> {
//!     let manifest = IconManifest::load("icons.toml")?;
//!     let bridge = IconBridge::new(SimulatedPlatform::new(manifest));
//!
//!     if bridge.supports_alternate_icons() {
//!         for icon in bridge.available_icons() {
//!             println!("available: {}", icon);
//!         }
//!         let active = bridge.set_icon("red").await?;
//!         println!("Active icon: {}", active);
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod icon;
mod manifest;
mod platform;

pub use {
    error::{IconError, IconErrorKind, Result as CoreResult},
    icon::{IconBridge, IconName},
    manifest::{AlternateIcon, IconManifest},
    platform::{
        CompletionDelivery, IconChangeCompletion, IconPlatform, IconSetter, SimulatedIconSetter,
        SimulatedPlatform,
    },
};

#[cfg(target_os = "ios")]
pub use platform::{UIKitIconSetter, UIKitPlatform};

#[cfg(target_os = "ios")]
/// Bridge over the running iOS application.
pub type NativeIconBridge = IconBridge<UIKitPlatform>;
