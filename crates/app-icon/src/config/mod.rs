#[allow(clippy::module_inception)]
mod config;
mod simulator_config;

pub(crate) use {config::Config, simulator_config::SimulatorConfig};

pub(crate) const DEFAULT_SUPPORTED: bool = true;
pub(crate) const DEFAULT_MECHANISM_AVAILABLE: bool = true;
pub(crate) const DEFAULT_DELIVERY_DELAY_MS: u64 = 0;
pub(crate) const MANIFEST_FILE_NAME: &str = "icons.toml";

pub(crate) fn default_supported() -> bool {
    DEFAULT_SUPPORTED
}

pub(crate) fn default_mechanism_available() -> bool {
    DEFAULT_MECHANISM_AVAILABLE
}

pub(crate) fn default_delivery_delay_ms() -> u64 {
    DEFAULT_DELIVERY_DELAY_MS
}
