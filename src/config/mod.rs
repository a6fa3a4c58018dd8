//! Configuration types and TOML loading.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{AlertConfig, Config, GateConfig, GuardConfig};
