use crate::config::payment::{PaymentSettings, TransactMode};
use crate::config::shipping::ShippingSettings;
use crate::core::payment::CREDIT_CARD_TYPES;
use crate::core::selection::{decode_selection, encode_selection};
use crate::domain::model::Country;
use crate::domain::ports::{Configurator, ReferenceData, SettingsStore};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Written instead of an empty selection when the merchant unchecks every
/// service: Ground, 3 Day Select, Standard, Worldwide Expedited. Must stay
/// byte-for-byte stable; existing stores contain it.
pub const DEFAULT_CARRIER_SERVICES: &str = "[03]:[12]:[11]:[08]:";

/// Everything the shipping configuration page needs in one record.
#[derive(Debug, Clone, Serialize)]
pub struct ShippingConfigModel {
    pub settings: ShippingSettings,
    pub available_carrier_services: Vec<String>,
    pub carrier_services_offered: BTreeSet<String>,
    pub available_countries: Vec<Country>,
}

/// Submitted shipping configuration form. Enum-valued fields arrive as the
/// raw submitted strings and are parsed during save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingConfigForm {
    pub url: String,
    pub access_key: String,
    pub username: String,
    pub password: String,
    pub additional_handling_charge: Decimal,
    pub insure_package: bool,
    pub customer_classification: String,
    pub pickup_type: String,
    pub packaging_type: String,
    pub default_shipped_from_country_id: u32,
    pub default_shipped_from_zip_postal_code: String,
    /// The checked service names (multi-valued form field).
    pub checked_carrier_services: Vec<String>,
}

impl ShippingConfigForm {
    /// Prefills the form from the stored settings, with nothing checked.
    pub fn from_settings(settings: &ShippingSettings) -> Self {
        Self {
            url: settings.url.clone(),
            access_key: settings.access_key.clone(),
            username: settings.username.clone(),
            password: settings.password.clone(),
            additional_handling_charge: settings.additional_handling_charge,
            insure_package: settings.insure_package,
            customer_classification: settings.customer_classification.to_string(),
            pickup_type: settings.pickup_type.to_string(),
            packaging_type: settings.packaging_type.to_string(),
            default_shipped_from_country_id: settings.default_shipped_from_country_id,
            default_shipped_from_zip_postal_code: settings
                .default_shipped_from_zip_postal_code
                .clone(),
            checked_carrier_services: Vec::new(),
        }
    }
}

pub struct ShippingConfigurator<S: SettingsStore, R: ReferenceData> {
    store: S,
    reference: R,
}

impl<S: SettingsStore, R: ReferenceData> ShippingConfigurator<S, R> {
    pub fn new(store: S, reference: R) -> Self {
        Self { store, reference }
    }
}

#[async_trait]
impl<S: SettingsStore, R: ReferenceData> Configurator for ShippingConfigurator<S, R> {
    type Model = ShippingConfigModel;
    type Form = ShippingConfigForm;

    fn plugin_name(&self) -> &'static str {
        "shipping"
    }

    async fn render(&self) -> Result<ShippingConfigModel> {
        let settings = ShippingSettings::load(&self.store).await?;
        let catalog = self.reference.carrier_services();
        let carrier_services_offered =
            decode_selection(&settings.carrier_services_offered, catalog);

        Ok(ShippingConfigModel {
            available_carrier_services: catalog.names(),
            carrier_services_offered,
            available_countries: self.reference.countries().to_vec(),
            settings,
        })
    }

    async fn save(&mut self, form: ShippingConfigForm) -> Result<()> {
        let mut settings = ShippingSettings::load(&self.store).await?;

        settings.url = form.url;
        // 憑證欄位一律去頭尾空白再存
        settings.access_key = form.access_key.trim().to_string();
        settings.username = form.username.trim().to_string();
        settings.password = form.password.trim().to_string();
        settings.additional_handling_charge = form.additional_handling_charge;
        settings.insure_package = form.insure_package;
        settings.customer_classification = form.customer_classification.parse()?;
        settings.pickup_type = form.pickup_type.parse()?;
        settings.packaging_type = form.packaging_type.parse()?;
        settings.default_shipped_from_country_id = form.default_shipped_from_country_id;
        settings.default_shipped_from_zip_postal_code =
            form.default_shipped_from_zip_postal_code;

        if form.checked_carrier_services.is_empty() {
            // Business rule on the save path, not in the codec: an empty
            // selection persists the fixed default set.
            settings.carrier_services_offered = DEFAULT_CARRIER_SERVICES.to_string();
        } else {
            let catalog = self.reference.carrier_services();
            settings.carrier_services_offered = encode_selection(
                form.checked_carrier_services.iter().map(String::as_str),
                catalog,
            );
            tracing::debug!(
                "encoded {} of {} checked services",
                decode_selection(&settings.carrier_services_offered, catalog).len(),
                form.checked_carrier_services.len()
            );
        }

        settings.validate()?;
        settings.save(&mut self.store).await?;
        tracing::info!("shipping plugin settings saved");
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentConfigModel {
    pub settings: PaymentSettings,
    pub transact_modes: Vec<String>,
    pub credit_card_types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfigForm {
    pub use_sandbox: bool,
    pub transact_mode: String,
    pub transaction_key: String,
    pub login_id: String,
    pub additional_fee: Decimal,
}

impl PaymentConfigForm {
    pub fn from_settings(settings: &PaymentSettings) -> Self {
        Self {
            use_sandbox: settings.use_sandbox,
            transact_mode: settings.transact_mode.to_string(),
            transaction_key: settings.transaction_key.clone(),
            login_id: settings.login_id.clone(),
            additional_fee: settings.additional_fee,
        }
    }
}

pub struct PaymentConfigurator<S: SettingsStore> {
    store: S,
}

impl<S: SettingsStore> PaymentConfigurator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: SettingsStore> Configurator for PaymentConfigurator<S> {
    type Model = PaymentConfigModel;
    type Form = PaymentConfigForm;

    fn plugin_name(&self) -> &'static str {
        "payment"
    }

    async fn render(&self) -> Result<PaymentConfigModel> {
        let settings = PaymentSettings::load(&self.store).await?;
        Ok(PaymentConfigModel {
            settings,
            transact_modes: TransactMode::all().iter().map(|m| m.to_string()).collect(),
            credit_card_types: CREDIT_CARD_TYPES.iter().map(|t| t.to_string()).collect(),
        })
    }

    async fn save(&mut self, form: PaymentConfigForm) -> Result<()> {
        let mut settings = PaymentSettings::load(&self.store).await?;

        settings.use_sandbox = form.use_sandbox;
        settings.transact_mode = form.transact_mode.parse()?;
        settings.transaction_key = form.transaction_key.trim().to_string();
        settings.login_id = form.login_id.trim().to_string();
        settings.additional_fee = form.additional_fee;

        settings.validate()?;
        settings.save(&mut self.store).await?;
        tracing::info!("payment plugin settings saved");
        Ok(())
    }
}

/// Small driver around a configurator: save, then re-render the fresh state.
pub struct ConfigureEngine<C: Configurator> {
    configurator: C,
}

impl<C: Configurator> ConfigureEngine<C> {
    pub fn new(configurator: C) -> Self {
        Self { configurator }
    }

    pub async fn apply(&mut self, form: C::Form) -> Result<C::Model> {
        tracing::info!("applying {} plugin configuration", self.configurator.plugin_name());
        self.configurator.save(form).await?;
        self.configurator.render().await
    }

    pub fn into_inner(self) -> C {
        self.configurator
    }
}
