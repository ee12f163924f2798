pub mod payment;
pub mod shipping;

use crate::utils::error::{PluginError, Result};
use std::str::FromStr;

/// Parses a stored scalar string into a typed setting value.
pub(crate) fn parse_setting<T>(field_name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| PluginError::InvalidSettingValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_path, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "shop-plugins")]
    #[command(about = "Admin configuration tool for the storefront payment and shipping plugins")]
    pub struct CliConfig {
        #[arg(long, default_value = "./settings.toml")]
        pub settings_path: String,

        #[arg(long, help = "List the carrier service catalog with the current selection")]
        pub list_services: bool,

        #[arg(
            long,
            value_delimiter = ',',
            help = "Save this carrier service selection (an empty selection falls back to the default set)"
        )]
        pub select: Option<Vec<String>>,

        #[arg(long, help = "Emit JSON logs instead of the compact format")]
        pub log_json: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("settings_path", &self.settings_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_setting_success_and_failure() {
        let parsed: u32 = parse_setting("shipping.default_shipped_from_country_id", "42").unwrap();
        assert_eq!(parsed, 42);
        assert!(parse_setting::<u32>("shipping.default_shipped_from_country_id", "many").is_err());
        let parsed: bool = parse_setting("payment.use_sandbox", "true").unwrap();
        assert!(parsed);
    }
}
