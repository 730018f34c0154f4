use crate::{
    CoreResult, IconError, IconName,
    platform::{HostOutcome, IconChangeCompletion, IconPlatform, IconSetter},
};

use std::collections::HashSet;

use futures::executor;
use tokio::sync::oneshot;
use tracing::{Instrument, debug, info, info_span, instrument, warn};
use uuid::Uuid;

/// Typed front for switching the app icon on an [`IconPlatform`].
///
/// Holds no icon state of its own. Every query goes to the host, and every
/// [`set_icon`](Self::set_icon) call is one independent request with no
/// retry.
///
/// # Example
///
/// ```
/// use app_icon_core::{IconBridge, IconManifest, IconName, SimulatedPlatform};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> app_icon_core::CoreResult<()> {
/// let platform = SimulatedPlatform::new(IconManifest::from_names(["red", "gray"]));
/// let bridge = IconBridge::new(platform);
///
/// let active = bridge.set_icon("red").await?;
/// assert_eq!(active, "red");
/// assert_eq!(bridge.current_icon(), "red");
///
/// bridge.set_icon(IconName::DEFAULT).await?;
/// assert!(bridge.current_icon().is_default());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IconBridge<P> {
    platform: P,
}

impl<P: IconPlatform> IconBridge<P> {
    /// Wrap a host platform.
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    /// The wrapped host platform.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Whether the host can show alternate icons at all.
    pub fn supports_alternate_icons(&self) -> bool {
        self.platform.supports_alternate_icons()
    }

    /// The icon the host shows right now, [`IconName::DEFAULT`] if no
    /// alternate is active or the host cannot tell.
    pub fn current_icon(&self) -> IconName {
        if !self.platform.supports_alternate_icons() {
            return IconName::DEFAULT;
        }
        IconName::from_platform(self.platform.alternate_icon_name())
    }

    /// Every icon the app can switch to: [`IconName::DEFAULT`] first, then
    /// the packaged alternates in declaration order.
    ///
    /// An unreadable configuration is logged and leaves only `DEFAULT`.
    #[instrument(skip(self))]
    pub fn available_icons(&self) -> Vec<IconName> {
        let mut icons = vec![IconName::DEFAULT];

        let packaged = match self.platform.packaged_alternate_icons() {
            Ok(names) => names,
            Err(e) => {
                warn!(error = %e, "Packaged icon configuration unreadable, offering DEFAULT only");
                return icons;
            }
        };

        let mut seen = HashSet::with_capacity(packaged.len());
        for name in packaged {
            if name.is_empty() {
                warn!("Packaged configuration declares an empty icon name, skipping");
                continue;
            }
            let icon = IconName::new(name);
            if icon.is_default() {
                warn!("Packaged configuration declares the reserved DEFAULT icon, skipping");
                continue;
            }
            if !seen.insert(icon.clone()) {
                warn!(icon = %icon, "Duplicate packaged icon name, skipping");
                continue;
            }
            icons.push(icon);
        }

        debug!(icon_count = icons.len(), "Available icons listed");

        icons
    }

    /// Switch the displayed icon to `name` and resolve with the icon now
    /// active.
    ///
    /// Requesting [`IconName::DEFAULT`] clears the alternate icon on the host
    /// and resolves with `DEFAULT`. Names are not checked against
    /// [`available_icons`](Self::available_icons); the host decides.
    ///
    /// If the host never answers, the returned future never completes.
    ///
    /// # Errors
    ///
    /// - `UnsupportedPlatform` if the host has no alternate icon support;
    ///   the switch procedure is not touched.
    /// - `MechanismUnavailable` if the switch procedure cannot be resolved,
    ///   or the host drops the request without answering.
    /// - `PlatformRejected` if the host reports an error, message preserved.
    pub async fn set_icon(&self, name: impl Into<IconName>) -> CoreResult<IconName> {
        let name = name.into();
        let span = info_span!("set_icon", request_id = %Uuid::new_v4(), icon = %name);

        async {
            let pending = self.request_icon_change(&name)?;
            settle(name, pending.await)
        }
        .instrument(span)
        .await
    }

    /// Blocking form of [`set_icon`](Self::set_icon) for callers without an
    /// async runtime.
    ///
    /// Returns the active icon, or `None` on any failure. `None` never means
    /// the default icon; a switch to the default icon returns
    /// `Some(IconName::DEFAULT)`. The failure itself is logged.
    ///
    /// Safe to call from any thread, runtime workers included, but it parks
    /// that thread until the host answers. Calling it on the thread the host
    /// answers from (the UIKit main thread, or a current-thread runtime
    /// whose task delivers the answer) never returns.
    pub fn set_icon_blocking(&self, name: impl Into<IconName>) -> Option<IconName> {
        let name = name.into();
        let span = info_span!("set_icon_blocking", request_id = %Uuid::new_v4(), icon = %name);
        let _entered = span.enter();

        let result = self
            .request_icon_change(&name)
            .and_then(|pending| settle(name, executor::block_on(pending)));

        match result {
            Ok(active) => Some(active),
            Err(e) => {
                warn!(error = %e, kind = %e.kind(), "Blocking icon change failed");
                None
            }
        }
    }

    /// Run the synchronous half of a switch: capability check, probe, and
    /// the single host request.
    ///
    /// Any error here is returned before a completion exists, so it can
    /// never be reported a second time through the completion.
    #[track_caller]
    fn request_icon_change(&self, name: &IconName) -> CoreResult<oneshot::Receiver<HostOutcome>> {
        if !self.platform.supports_alternate_icons() {
            warn!("Icon change requested on a host without alternate icon support");
            return Err(IconError::unsupported());
        }

        let setter = self.platform.resolve_icon_setter()?;

        let (completion, pending) = IconChangeCompletion::channel();
        setter.set_alternate_icon_name(name.platform_name(), completion);

        debug!("Icon change request issued");

        Ok(pending)
    }
}

#[track_caller]
fn settle(
    name: IconName,
    outcome: Result<HostOutcome, oneshot::error::RecvError>,
) -> CoreResult<IconName> {
    match outcome {
        Ok(Ok(())) => {
            info!(icon = %name, "App icon changed");
            Ok(name)
        }
        Ok(Err(message)) => {
            warn!(icon = %name, message = %message, "Host rejected icon change");
            Err(IconError::platform_rejected(message))
        }
        Err(_) => Err(IconError::mechanism_unavailable(
            "Completion handler dropped without being invoked",
        )),
    }
}
