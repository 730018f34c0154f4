//! In-process icon host.
//!
//! Behaves like a device that honors alternate icons: it keeps the active
//! icon, rejects names missing from its packaged manifest, and answers each
//! request through the completion handle. Used by the desktop harness and
//! the test suite.

use crate::{
    CoreResult, IconError, IconManifest,
    platform::{IconChangeCompletion, IconPlatform, IconSetter},
};

use std::{
    sync::{Arc, Mutex, MutexGuard},
    thread,
    time::Duration,
};

use tracing::{debug, instrument, trace};

/// When a [`SimulatedPlatform`] answers a switch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionDelivery {
    /// Answer on the requesting thread before the request call returns.
    #[default]
    Immediate,
    /// Answer from a background thread after the given delay.
    Deferred(Duration),
    /// Never answer. The completion is held until the platform is dropped.
    Never,
}

#[derive(Debug, Default)]
struct HostState {
    current: Option<String>,
    setter_invocations: usize,
    held_completions: Vec<IconChangeCompletion>,
}

/// Simulated icon host backed by an [`IconManifest`].
#[derive(Debug, Clone)]
pub struct SimulatedPlatform {
    manifest: Arc<IconManifest>,
    supported: bool,
    mechanism_available: bool,
    unreadable_reason: Option<String>,
    delivery: CompletionDelivery,
    state: Arc<Mutex<HostState>>,
}

impl SimulatedPlatform {
    /// Supported host, switch procedure present, immediate answers.
    pub fn new(manifest: IconManifest) -> Self {
        Self {
            manifest: Arc::new(manifest),
            supported: true,
            mechanism_available: true,
            unreadable_reason: None,
            delivery: CompletionDelivery::Immediate,
            state: Arc::new(Mutex::new(HostState::default())),
        }
    }

    /// Set whether the host reports alternate icon support.
    pub fn with_support(mut self, supported: bool) -> Self {
        self.supported = supported;
        self
    }

    /// Set whether the switch procedure can be resolved.
    pub fn with_mechanism(mut self, available: bool) -> Self {
        self.mechanism_available = available;
        self
    }

    /// Set when switch requests are answered.
    pub fn with_delivery(mut self, delivery: CompletionDelivery) -> Self {
        self.delivery = delivery;
        self
    }

    /// Make the packaged configuration unreadable with the given reason.
    pub fn with_unreadable_configuration(mut self, reason: impl Into<String>) -> Self {
        self.unreadable_reason = Some(reason.into());
        self
    }

    /// How many times the switch procedure has been invoked.
    pub fn setter_invocations(&self) -> usize {
        self.lock_state().setter_invocations
    }

    /// Change the active icon without going through a switch request, the
    /// way the OS or another process might.
    pub fn set_external_icon(&self, name: Option<&str>) {
        self.lock_state().current = name.map(str::to_string);
    }

    fn lock_state(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl IconPlatform for SimulatedPlatform {
    type Setter = SimulatedIconSetter;

    fn supports_alternate_icons(&self) -> bool {
        self.supported
    }

    fn alternate_icon_name(&self) -> Option<String> {
        if !self.supported {
            return None;
        }
        self.lock_state().current.clone()
    }

    #[track_caller]
    fn packaged_alternate_icons(&self) -> CoreResult<Vec<String>> {
        if let Some(reason) = &self.unreadable_reason {
            return Err(IconError::configuration_unreadable(reason.clone()));
        }
        Ok(self.manifest.names().map(str::to_string).collect())
    }

    #[track_caller]
    fn resolve_icon_setter(&self) -> CoreResult<Self::Setter> {
        if !self.mechanism_available {
            return Err(IconError::mechanism_unavailable(
                "Method not found: _setAlternateIconName:completionHandler:",
            ));
        }

        Ok(SimulatedIconSetter {
            manifest: Arc::clone(&self.manifest),
            delivery: self.delivery,
            state: Arc::clone(&self.state),
        })
    }
}

/// Switch procedure resolved from a [`SimulatedPlatform`].
#[derive(Debug)]
pub struct SimulatedIconSetter {
    manifest: Arc<IconManifest>,
    delivery: CompletionDelivery,
    state: Arc<Mutex<HostState>>,
}

impl IconSetter for SimulatedIconSetter {
    #[instrument(skip(self, completion))]
    fn set_alternate_icon_name(&self, name: Option<&str>, completion: IconChangeCompletion) {
        let requested = name.map(str::to_string);

        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .setter_invocations += 1;

        match self.delivery {
            CompletionDelivery::Immediate => {
                apply_switch(&self.manifest, &self.state, requested, completion);
            }
            CompletionDelivery::Deferred(delay) => {
                let manifest = Arc::clone(&self.manifest);
                let state = Arc::clone(&self.state);
                thread::spawn(move || {
                    thread::sleep(delay);
                    apply_switch(&manifest, &state, requested, completion);
                });
                trace!(delay_ms = delay.as_millis(), "Icon switch answer deferred");
            }
            CompletionDelivery::Never => {
                self.state
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .held_completions
                    .push(completion);
                debug!("Icon switch request held without answer");
            }
        }
    }
}

fn apply_switch(
    manifest: &IconManifest,
    state: &Mutex<HostState>,
    requested: Option<String>,
    completion: IconChangeCompletion,
) {
    let error = match requested.as_deref() {
        Some(name) if !manifest.contains(name) => Some(format!(
            "No alternate icon named {:?} is registered in the app bundle",
            name
        )),
        _ => None,
    };

    if error.is_none() {
        state.lock().unwrap_or_else(|e| e.into_inner()).current = requested;
    }

    // Lock released before answering; the completion may wake the caller.
    completion.complete(error);
}
