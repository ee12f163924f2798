use anyhow::Result;
use shop_plugins::core::configure::{
    ConfigureEngine, PaymentConfigForm, ShippingConfigForm, DEFAULT_CARRIER_SERVICES,
};
use shop_plugins::core::Configurator;
use shop_plugins::domain::ports::SettingsStore;
use shop_plugins::{
    PaymentConfigurator, PaymentSettings, ShippingConfigurator, StaticReferenceData,
    TomlSettingsStore,
};
use tempfile::TempDir;

fn settings_path(dir: &TempDir) -> String {
    dir.path()
        .join("settings.toml")
        .to_string_lossy()
        .to_string()
}

fn shipping_form() -> ShippingConfigForm {
    ShippingConfigForm {
        url: "https://onlinetools.ups.com/ups.app/xml/Rate".to_string(),
        access_key: "AK123".to_string(),
        username: "merchant".to_string(),
        password: "hunter2".to_string(),
        additional_handling_charge: "2.50".parse().unwrap(),
        insure_package: true,
        customer_classification: "Retail".to_string(),
        pickup_type: "OneTimePickup".to_string(),
        packaging_type: "ExpressBox".to_string(),
        default_shipped_from_country_id: 1,
        default_shipped_from_zip_postal_code: "10001".to_string(),
        checked_carrier_services: vec!["UPS Ground".to_string(), "UPS Standard".to_string()],
    }
}

#[tokio::test]
async fn test_shipping_save_persists_and_renders_back() -> Result<()> {
    let dir = TempDir::new()?;
    let path = settings_path(&dir);

    let store = TomlSettingsStore::load(path.as_str()).await?;
    let mut configurator = ShippingConfigurator::new(store, StaticReferenceData::new());
    configurator.save(shipping_form()).await?;

    // 重新從磁碟載入,確認真的有寫出去
    let reloaded = TomlSettingsStore::load(path.as_str()).await?;
    assert_eq!(
        reloaded.get("shipping.carrier_services_offered").await?,
        Some("[03]:[11]:".to_string())
    );

    let configurator = ShippingConfigurator::new(reloaded, StaticReferenceData::new());
    let model = configurator.render().await?;
    assert_eq!(model.settings.access_key, "AK123");
    assert!(model.settings.insure_package);
    assert_eq!(
        model.settings.additional_handling_charge,
        "2.50".parse().unwrap()
    );
    assert_eq!(model.settings.customer_classification.to_string(), "Retail");
    assert_eq!(
        model.carrier_services_offered,
        ["UPS Ground", "UPS Standard"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    );
    assert_eq!(model.available_carrier_services.len(), 12);
    assert!(!model.available_countries.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_empty_selection_falls_back_to_default_services() -> Result<()> {
    let dir = TempDir::new()?;
    let path = settings_path(&dir);

    let store = TomlSettingsStore::load(path.as_str()).await?;
    let mut configurator = ShippingConfigurator::new(store, StaticReferenceData::new());

    let mut form = shipping_form();
    form.checked_carrier_services.clear();
    configurator.save(form).await?;

    let reloaded = TomlSettingsStore::load(path.as_str()).await?;
    assert_eq!(
        reloaded.get("shipping.carrier_services_offered").await?,
        Some(DEFAULT_CARRIER_SERVICES.to_string())
    );

    let configurator = ShippingConfigurator::new(reloaded, StaticReferenceData::new());
    let model = configurator.render().await?;
    assert_eq!(model.carrier_services_offered.len(), 4);
    Ok(())
}

#[tokio::test]
async fn test_credentials_are_trimmed_on_save() -> Result<()> {
    let dir = TempDir::new()?;
    let path = settings_path(&dir);

    let store = TomlSettingsStore::load(path.as_str()).await?;
    let mut configurator = ShippingConfigurator::new(store, StaticReferenceData::new());

    let mut form = shipping_form();
    form.access_key = "  AK123  ".to_string();
    form.username = " merchant ".to_string();
    form.password = " hunter2 ".to_string();
    configurator.save(form).await?;

    let model = configurator.render().await?;
    assert_eq!(model.settings.access_key, "AK123");
    assert_eq!(model.settings.username, "merchant");
    assert_eq!(model.settings.password, "hunter2");
    Ok(())
}

#[tokio::test]
async fn test_unknown_enum_value_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let store = TomlSettingsStore::load(settings_path(&dir).as_str()).await?;
    let mut configurator = ShippingConfigurator::new(store, StaticReferenceData::new());

    let mut form = shipping_form();
    form.customer_classification = "Bulk".to_string();
    assert!(configurator.save(form).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_payment_configuration_roundtrip() -> Result<()> {
    let dir = TempDir::new()?;
    let path = settings_path(&dir);

    let store = TomlSettingsStore::load(path.as_str()).await?;
    let configurator = PaymentConfigurator::new(store);
    let mut engine = ConfigureEngine::new(configurator);

    let mut form = PaymentConfigForm::from_settings(&PaymentSettings::default());
    form.use_sandbox = false;
    form.transact_mode = "AuthorizeAndCapture".to_string();
    form.transaction_key = "  key-123  ".to_string();
    form.login_id = " login-9 ".to_string();
    form.additional_fee = "1.50".parse().unwrap();
    let model = engine.apply(form).await?;
    assert!(!model.settings.use_sandbox);
    assert_eq!(model.settings.transaction_key, "key-123");
    assert_eq!(model.settings.login_id, "login-9");

    let reloaded = TomlSettingsStore::load(path.as_str()).await?;
    let configurator = PaymentConfigurator::new(reloaded);
    let model = configurator.render().await?;
    assert_eq!(model.settings.transact_mode.to_string(), "AuthorizeAndCapture");
    assert_eq!(model.settings.additional_fee, "1.50".parse().unwrap());
    assert_eq!(model.transact_modes.len(), 2);
    assert_eq!(
        model.credit_card_types,
        vec!["Visa", "MasterCard", "Discover", "Amex"]
    );
    Ok(())
}

#[tokio::test]
async fn test_first_render_before_any_save_uses_defaults() -> Result<()> {
    let dir = TempDir::new()?;
    let store = TomlSettingsStore::load(settings_path(&dir).as_str()).await?;
    let configurator = ShippingConfigurator::new(store, StaticReferenceData::new());

    let model = configurator.render().await?;
    // 還沒存過任何選擇:呼叫端看到的是空集合,不是預設集合
    assert!(model.carrier_services_offered.is_empty());
    assert!(model.settings.carrier_services_offered.is_empty());
    Ok(())
}
