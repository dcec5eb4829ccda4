use clap::Parser;
use verbum_malum::utils::{logger, validation::Validate};
use verbum_malum::{AppConfig, CliConfig, DomainTarget, EntryEngine, RdapError, ReqwestTransport};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    match run(&cli).await {
        Ok(location) => {
            println!("Wrote entry to {}", location.display());
        }
        Err(e) => {
            tracing::error!("❌ Lookup for {} failed: {}", cli.domain, e);
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}

async fn run(cli: &CliConfig) -> Result<std::path::PathBuf, RdapError> {
    // 驗證配置
    cli.validate()?;
    let domain = DomainTarget::parse(&cli.domain)?;

    let config = AppConfig::from_env()?.with_entries_dir(&cli.entries_dir);
    config.validate()?;
    tracing::debug!("Bootstrap cache: {}", config.cache_file.display());

    let transport = ReqwestTransport::new(&config.user_agent)?;
    let engine = EntryEngine::from_config(&config, transport);

    let outcome = engine.run(&domain).await?;
    Ok(outcome.location)
}
