mod bridge;
mod name;

pub use {bridge::IconBridge, name::IconName};
