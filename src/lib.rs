pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{StaticReferenceData, TomlSettingsStore};
pub use config::payment::PaymentSettings;
pub use config::shipping::ShippingSettings;
pub use crate::core::configure::{ConfigureEngine, PaymentConfigurator, ShippingConfigurator};
pub use utils::error::{PluginError, Result};
