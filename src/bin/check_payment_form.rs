use chrono::{Datelike, Utc};
use clap::Parser;
use shop_plugins::core::payment::{payment_info_view, payment_summary, validate_payment_form};
use shop_plugins::domain::model::PaymentForm;
use shop_plugins::utils::logger;

/// Checks a checkout payment form the same way the storefront does before
/// handing the data to the payment processor.
#[derive(Debug, Clone, Parser)]
#[command(name = "check_payment_form")]
#[command(about = "Validate a JSON payment-form dump and print the redacted summary")]
struct Args {
    #[arg(long, help = "JSON file with the submitted form fields")]
    form: String,

    #[arg(long, help = "Print the postback view (card types, expiry options) as JSON")]
    echo: bool,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let payload = std::fs::read_to_string(&args.form)?;
    let form = PaymentForm::from_json_str(&payload)?;
    tracing::debug!("parsed form: {:?}", form);

    if args.echo {
        let view = payment_info_view(&form, Utc::now().year());
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let issues = validate_payment_form(&form);
    if issues.is_empty() {
        println!("✅ Payment form is acceptable");
        println!("💳 {}", payment_summary(&form));
    } else {
        for issue in &issues {
            eprintln!("❌ {}: {}", issue.field, issue);
        }
        std::process::exit(2);
    }

    Ok(())
}
