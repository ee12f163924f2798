use crate::config::parse_setting;
use crate::domain::ports::SettingsStore;
use crate::utils::error::{PluginError, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerClassification {
    #[default]
    Wholesale,
    Occasional,
    Retail,
}

impl fmt::Display for CustomerClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CustomerClassification::Wholesale => "Wholesale",
            CustomerClassification::Occasional => "Occasional",
            CustomerClassification::Retail => "Retail",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for CustomerClassification {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Wholesale" => Ok(CustomerClassification::Wholesale),
            "Occasional" => Ok(CustomerClassification::Occasional),
            "Retail" => Ok(CustomerClassification::Retail),
            other => Err(PluginError::InvalidSettingValue {
                field: "customer_classification".to_string(),
                value: other.to_string(),
                reason: "unknown customer classification".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupType {
    #[default]
    DailyPickup,
    CustomerCounter,
    OneTimePickup,
    OnCallAir,
    SuggestedRetailRates,
    LetterCenter,
    AirServiceCenter,
}

impl fmt::Display for PickupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PickupType::DailyPickup => "DailyPickup",
            PickupType::CustomerCounter => "CustomerCounter",
            PickupType::OneTimePickup => "OneTimePickup",
            PickupType::OnCallAir => "OnCallAir",
            PickupType::SuggestedRetailRates => "SuggestedRetailRates",
            PickupType::LetterCenter => "LetterCenter",
            PickupType::AirServiceCenter => "AirServiceCenter",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for PickupType {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "DailyPickup" => Ok(PickupType::DailyPickup),
            "CustomerCounter" => Ok(PickupType::CustomerCounter),
            "OneTimePickup" => Ok(PickupType::OneTimePickup),
            "OnCallAir" => Ok(PickupType::OnCallAir),
            "SuggestedRetailRates" => Ok(PickupType::SuggestedRetailRates),
            "LetterCenter" => Ok(PickupType::LetterCenter),
            "AirServiceCenter" => Ok(PickupType::AirServiceCenter),
            other => Err(PluginError::InvalidSettingValue {
                field: "pickup_type".to_string(),
                value: other.to_string(),
                reason: "unknown pickup type".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackagingType {
    #[default]
    Unknown,
    Letter,
    CustomerSuppliedPackage,
    Tube,
    Pak,
    ExpressBox,
    TwentyFiveKgBox,
    TenKgBox,
}

impl fmt::Display for PackagingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PackagingType::Unknown => "Unknown",
            PackagingType::Letter => "Letter",
            PackagingType::CustomerSuppliedPackage => "CustomerSuppliedPackage",
            PackagingType::Tube => "Tube",
            PackagingType::Pak => "Pak",
            PackagingType::ExpressBox => "ExpressBox",
            PackagingType::TwentyFiveKgBox => "TwentyFiveKgBox",
            PackagingType::TenKgBox => "TenKgBox",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for PackagingType {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Unknown" => Ok(PackagingType::Unknown),
            "Letter" => Ok(PackagingType::Letter),
            "CustomerSuppliedPackage" => Ok(PackagingType::CustomerSuppliedPackage),
            "Tube" => Ok(PackagingType::Tube),
            "Pak" => Ok(PackagingType::Pak),
            "ExpressBox" => Ok(PackagingType::ExpressBox),
            "TwentyFiveKgBox" => Ok(PackagingType::TwentyFiveKgBox),
            "TenKgBox" => Ok(PackagingType::TenKgBox),
            other => Err(PluginError::InvalidSettingValue {
                field: "packaging_type".to_string(),
                value: other.to_string(),
                reason: "unknown packaging type".to_string(),
            }),
        }
    }
}

/// Carrier shipping plugin settings. Plain data; the settings store owns
/// persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingSettings {
    pub url: String,
    pub access_key: String,
    pub username: String,
    pub password: String,
    pub additional_handling_charge: Decimal,
    pub insure_package: bool,
    pub customer_classification: CustomerClassification,
    pub pickup_type: PickupType,
    pub packaging_type: PackagingType,
    pub default_shipped_from_country_id: u32,
    pub default_shipped_from_zip_postal_code: String,
    /// Selection string, e.g. "[03]:[12]:[11]:[08]:". Empty means no explicit
    /// selection was ever saved.
    pub carrier_services_offered: String,
}

impl Default for ShippingSettings {
    fn default() -> Self {
        Self {
            url: "https://onlinetools.ups.com/ups.app/xml/Rate".to_string(),
            access_key: String::new(),
            username: String::new(),
            password: String::new(),
            additional_handling_charge: Decimal::ZERO,
            insure_package: false,
            customer_classification: CustomerClassification::default(),
            pickup_type: PickupType::default(),
            packaging_type: PackagingType::default(),
            default_shipped_from_country_id: 0,
            default_shipped_from_zip_postal_code: String::new(),
            carrier_services_offered: String::new(),
        }
    }
}

impl ShippingSettings {
    /// 缺 key 用預設值補上,所以第一次 render 不需要先存檔
    pub async fn load<S: SettingsStore>(store: &S) -> Result<Self> {
        let mut settings = Self::default();
        if let Some(v) = store.get("shipping.url").await? {
            settings.url = v;
        }
        if let Some(v) = store.get("shipping.access_key").await? {
            settings.access_key = v;
        }
        if let Some(v) = store.get("shipping.username").await? {
            settings.username = v;
        }
        if let Some(v) = store.get("shipping.password").await? {
            settings.password = v;
        }
        if let Some(v) = store.get("shipping.additional_handling_charge").await? {
            settings.additional_handling_charge =
                parse_setting("shipping.additional_handling_charge", &v)?;
        }
        if let Some(v) = store.get("shipping.insure_package").await? {
            settings.insure_package = parse_setting("shipping.insure_package", &v)?;
        }
        if let Some(v) = store.get("shipping.customer_classification").await? {
            settings.customer_classification =
                parse_setting("shipping.customer_classification", &v)?;
        }
        if let Some(v) = store.get("shipping.pickup_type").await? {
            settings.pickup_type = parse_setting("shipping.pickup_type", &v)?;
        }
        if let Some(v) = store.get("shipping.packaging_type").await? {
            settings.packaging_type = parse_setting("shipping.packaging_type", &v)?;
        }
        if let Some(v) = store.get("shipping.default_shipped_from_country_id").await? {
            settings.default_shipped_from_country_id =
                parse_setting("shipping.default_shipped_from_country_id", &v)?;
        }
        if let Some(v) = store
            .get("shipping.default_shipped_from_zip_postal_code")
            .await?
        {
            settings.default_shipped_from_zip_postal_code = v;
        }
        if let Some(v) = store.get("shipping.carrier_services_offered").await? {
            settings.carrier_services_offered = v;
        }
        Ok(settings)
    }

    pub async fn save<S: SettingsStore>(&self, store: &mut S) -> Result<()> {
        store.set("shipping.url", self.url.clone()).await?;
        store
            .set("shipping.access_key", self.access_key.clone())
            .await?;
        store
            .set("shipping.username", self.username.clone())
            .await?;
        store
            .set("shipping.password", self.password.clone())
            .await?;
        store
            .set(
                "shipping.additional_handling_charge",
                self.additional_handling_charge.to_string(),
            )
            .await?;
        store
            .set("shipping.insure_package", self.insure_package.to_string())
            .await?;
        store
            .set(
                "shipping.customer_classification",
                self.customer_classification.to_string(),
            )
            .await?;
        store
            .set("shipping.pickup_type", self.pickup_type.to_string())
            .await?;
        store
            .set("shipping.packaging_type", self.packaging_type.to_string())
            .await?;
        store
            .set(
                "shipping.default_shipped_from_country_id",
                self.default_shipped_from_country_id.to_string(),
            )
            .await?;
        store
            .set(
                "shipping.default_shipped_from_zip_postal_code",
                self.default_shipped_from_zip_postal_code.clone(),
            )
            .await?;
        store
            .set(
                "shipping.carrier_services_offered",
                self.carrier_services_offered.clone(),
            )
            .await?;
        store.flush().await
    }
}

impl Validate for ShippingSettings {
    fn validate(&self) -> Result<()> {
        validate_url("shipping.url", &self.url)?;
        validate_range(
            "shipping.additional_handling_charge",
            self.additional_handling_charge,
            Decimal::ZERO,
            Decimal::MAX,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_display_and_parse_roundtrip() {
        for classification in [
            CustomerClassification::Wholesale,
            CustomerClassification::Occasional,
            CustomerClassification::Retail,
        ] {
            let parsed: CustomerClassification =
                classification.to_string().parse().unwrap();
            assert_eq!(parsed, classification);
        }
        let parsed: PickupType = PickupType::OnCallAir.to_string().parse().unwrap();
        assert_eq!(parsed, PickupType::OnCallAir);
        let parsed: PackagingType = PackagingType::TenKgBox.to_string().parse().unwrap();
        assert_eq!(parsed, PackagingType::TenKgBox);
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        assert!("Bulk".parse::<CustomerClassification>().is_err());
        assert!("Drone".parse::<PickupType>().is_err());
        assert!("Crate".parse::<PackagingType>().is_err());
    }

    #[test]
    fn test_default_settings_pass_validation() {
        assert!(ShippingSettings::default().validate().is_ok());
    }

    #[test]
    fn test_negative_handling_charge_fails_validation() {
        let mut settings = ShippingSettings::default();
        settings.additional_handling_charge = "-1.50".parse().unwrap();
        assert!(settings.validate().is_err());
    }
}
