use clap::Parser;
use sos_relay::utils::error::{ErrorCategory, RelayError};
use sos_relay::utils::logger;
use sos_relay::{
    invoke, CallableEnvelope, CliConfig, DryRunGateway, GatewayConfig, SosRelay, TwilioClient,
};

const DRY_RUN_SENDER: &str = "dry-run";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting sos-relay CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let request = config.load_request().unwrap_or_else(|e| fail(e));

    let outcome = if config.dry_run {
        tracing::info!("🔍 Dry run, no SMS will be sent");
        let sender = std::env::var(sos_relay::config::NUMBER_ENV)
            .unwrap_or_else(|_| DRY_RUN_SENDER.to_string());
        let relay = SosRelay::new(DryRunGateway, sender);
        invoke(&relay, request).await
    } else {
        let relay = build_relay(&config).unwrap_or_else(|e| fail(e));
        invoke(&relay, request).await
    };

    let rejected = outcome.is_err();
    let envelope = CallableEnvelope::from(outcome);
    println!("{}", serde_json::to_string_pretty(&envelope)?);

    if rejected {
        std::process::exit(1);
    }
    Ok(())
}

fn build_relay(config: &CliConfig) -> sos_relay::Result<SosRelay<TwilioClient>> {
    let gateway_config = GatewayConfig::load(config.config.as_deref())?;
    let client = TwilioClient::from_config(&gateway_config)?;
    Ok(SosRelay::new(client, gateway_config.from_number))
}

fn fail(e: RelayError) -> ! {
    tracing::error!("❌ sos-relay failed: {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.category() {
        ErrorCategory::Validation | ErrorCategory::Provider => 1,
        ErrorCategory::Configuration => 2,
        ErrorCategory::System => 3,
    };
    std::process::exit(exit_code);
}
