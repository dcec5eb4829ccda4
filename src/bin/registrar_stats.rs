use clap::Parser;
use std::path::Path;
use verbum_malum::core::stats;
use verbum_malum::utils::logger;
use verbum_malum::{StatsConfig, StatsFormat};

fn main() -> anyhow::Result<()> {
    let args = StatsConfig::parse();

    logger::init_cli_logger(args.verbose);

    let root = Path::new(&args.entries_dir);
    tracing::info!("📊 Counting registrars under {}", root.display());

    let counts = stats::count_registrars(root)?;
    if counts.is_empty() {
        tracing::warn!("No registry responses with a registrar entity found");
        return Ok(());
    }

    let stdout = std::io::stdout();
    match args.format {
        StatsFormat::Table => stats::write_table(&mut stdout.lock(), &counts)?,
        StatsFormat::Csv => stats::write_csv(stdout.lock(), &counts)?,
    }

    Ok(())
}
