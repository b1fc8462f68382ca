use clap::Parser;
use dehydrated_cloudflare_hook::utils::logger;
use dehydrated_cloudflare_hook::{
    ChallengeHook, CliConfig, CloudflareClient, HookError, HookOperation, HookOutcome,
};

async fn execute(config: &CliConfig, operation: &HookOperation) -> Result<HookOutcome, HookError> {
    let settings = config.resolve()?;
    let client = CloudflareClient::from_settings(&settings)?;
    let hook = ChallengeHook::new(client, settings.propagation_delay);
    hook.run(operation, &config.args).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    let operation = HookOperation::parse(&config.operation);
    tracing::debug!("Hook invoked: {} with {} argument(s)", operation, config.args.len());

    match execute(&config, &operation).await {
        Ok(HookOutcome::Deployed(count)) => {
            tracing::info!("Deployed {} challenge record(s)", count);
        }
        Ok(HookOutcome::Cleaned(count)) => {
            tracing::info!("Cleaned {} challenge record(s)", count);
        }
        Ok(HookOutcome::Ignored) => {}
        Err(e) => {
            tracing::error!("Failed to execute {}, error {}", operation, e);
            std::process::exit(e.exit_code());
        }
    }
}
