use crate::config::{default_delivery_delay_ms, default_mechanism_available, default_supported};

use std::time::Duration;

use app_icon_core::CompletionDelivery;
use serde::{Deserialize, Serialize};

/// Behaviour of the simulated icon host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Whether the host reports alternate icon support.
    #[serde(default = "default_supported")]
    pub supported: bool,

    /// Whether the host's switch procedure can be resolved.
    #[serde(default = "default_mechanism_available")]
    pub mechanism_available: bool,

    /// Delay before the host answers a switch (0 = answer immediately).
    #[serde(default = "default_delivery_delay_ms")]
    pub delivery_delay_ms: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            supported: default_supported(),
            mechanism_available: default_mechanism_available(),
            delivery_delay_ms: default_delivery_delay_ms(),
        }
    }
}

impl SimulatorConfig {
    /// When the simulated host answers switch requests.
    pub fn delivery(&self) -> CompletionDelivery {
        match self.delivery_delay_ms {
            0 => CompletionDelivery::Immediate,
            ms => CompletionDelivery::Deferred(Duration::from_millis(ms)),
        }
    }
}
