use clap::Parser;
use shop_plugins::core::configure::{ConfigureEngine, ShippingConfigForm};
use shop_plugins::core::Configurator;
use shop_plugins::utils::{logger, validation::Validate};
use shop_plugins::{
    CliConfig, PaymentConfigurator, ShippingConfigurator, StaticReferenceData, TomlSettingsStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting shop-plugins CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if let Err(e) = run(&config).await {
        tracing::error!("❌ Configuration command failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    Ok(())
}

async fn run(config: &CliConfig) -> shop_plugins::Result<()> {
    let store = TomlSettingsStore::load(config.settings_path.as_str()).await?;
    let mut shipping = ShippingConfigurator::new(store.clone(), StaticReferenceData::new());

    if let Some(selection) = &config.select {
        // 空白項目過濾掉;全部清空時由存檔流程補上預設服務
        let checked: Vec<String> = selection
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let current = shipping.render().await?;
        let mut form = ShippingConfigForm::from_settings(&current.settings);
        form.checked_carrier_services = checked;

        let mut engine = ConfigureEngine::new(shipping);
        let model = engine.apply(form).await?;
        shipping = engine.into_inner();

        println!("✅ Carrier service selection saved");
        println!(
            "📦 Services offered: {}",
            model
                .carrier_services_offered
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    if config.list_services {
        let model = shipping.render().await?;
        println!("Available carrier services:");
        for name in &model.available_carrier_services {
            let mark = if model.carrier_services_offered.contains(name) {
                "[x]"
            } else {
                "[ ]"
            };
            println!("  {} {}", mark, name);
        }
        return Ok(());
    }

    let shipping_model = shipping.render().await?;
    println!("Shipping plugin");
    println!("  endpoint: {}", shipping_model.settings.url);
    println!(
        "  handling charge: {}",
        shipping_model.settings.additional_handling_charge
    );
    println!("  insure package: {}", shipping_model.settings.insure_package);
    println!(
        "  services offered: {}",
        shipping_model
            .carrier_services_offered
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    );

    let payment = PaymentConfigurator::new(store);
    let payment_model = payment.render().await?;
    println!("Payment plugin");
    println!("  sandbox: {}", payment_model.settings.use_sandbox);
    println!(
        "  transaction mode: {}",
        payment_model.settings.transact_mode
    );
    println!("  additional fee: {}", payment_model.settings.additional_fee);
    println!(
        "  card types: {}",
        payment_model.credit_card_types.join(", ")
    );

    Ok(())
}
