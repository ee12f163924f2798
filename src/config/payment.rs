use crate::config::parse_setting;
use crate::domain::ports::SettingsStore;
use crate::utils::error::{PluginError, Result};
use crate::utils::validation::{validate_range, Validate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a payment is only authorized or captured immediately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactMode {
    #[default]
    Authorize,
    AuthorizeAndCapture,
}

impl TransactMode {
    pub fn all() -> [TransactMode; 2] {
        [TransactMode::Authorize, TransactMode::AuthorizeAndCapture]
    }
}

impl fmt::Display for TransactMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactMode::Authorize => "Authorize",
            TransactMode::AuthorizeAndCapture => "AuthorizeAndCapture",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for TransactMode {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Authorize" => Ok(TransactMode::Authorize),
            "AuthorizeAndCapture" => Ok(TransactMode::AuthorizeAndCapture),
            other => Err(PluginError::InvalidSettingValue {
                field: "transact_mode".to_string(),
                value: other.to_string(),
                reason: "unknown transaction mode".to_string(),
            }),
        }
    }
}

/// Credit-card payment plugin settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSettings {
    pub use_sandbox: bool,
    pub transact_mode: TransactMode,
    pub transaction_key: String,
    pub login_id: String,
    pub additional_fee: Decimal,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            // 新安裝一律先指向沙盒,避免誤打正式閘道
            use_sandbox: true,
            transact_mode: TransactMode::default(),
            transaction_key: String::new(),
            login_id: String::new(),
            additional_fee: Decimal::ZERO,
        }
    }
}

impl PaymentSettings {
    pub async fn load<S: SettingsStore>(store: &S) -> Result<Self> {
        let mut settings = Self::default();
        if let Some(v) = store.get("payment.use_sandbox").await? {
            settings.use_sandbox = parse_setting("payment.use_sandbox", &v)?;
        }
        if let Some(v) = store.get("payment.transact_mode").await? {
            settings.transact_mode = parse_setting("payment.transact_mode", &v)?;
        }
        if let Some(v) = store.get("payment.transaction_key").await? {
            settings.transaction_key = v;
        }
        if let Some(v) = store.get("payment.login_id").await? {
            settings.login_id = v;
        }
        if let Some(v) = store.get("payment.additional_fee").await? {
            settings.additional_fee = parse_setting("payment.additional_fee", &v)?;
        }
        Ok(settings)
    }

    pub async fn save<S: SettingsStore>(&self, store: &mut S) -> Result<()> {
        store
            .set("payment.use_sandbox", self.use_sandbox.to_string())
            .await?;
        store
            .set("payment.transact_mode", self.transact_mode.to_string())
            .await?;
        store
            .set("payment.transaction_key", self.transaction_key.clone())
            .await?;
        store
            .set("payment.login_id", self.login_id.clone())
            .await?;
        store
            .set("payment.additional_fee", self.additional_fee.to_string())
            .await?;
        store.flush().await
    }
}

impl Validate for PaymentSettings {
    fn validate(&self) -> Result<()> {
        validate_range(
            "payment.additional_fee",
            self.additional_fee,
            Decimal::ZERO,
            Decimal::MAX,
        )?;
        Ok(())
    }
}
