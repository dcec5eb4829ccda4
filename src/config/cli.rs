use crate::utils::error::Result;
use crate::utils::validation::{validate_domain, validate_path, Validate};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "verbum-malum")]
#[command(about = "Look up a domain over RDAP and store the registry and registrar responses")]
#[command(version)]
pub struct CliConfig {
    /// The domain to add an entry for
    pub domain: String,

    /// Root of the entry tree
    #[arg(long, default_value = crate::config::DEFAULT_ENTRIES_DIR)]
    pub entries_dir: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_domain(&self.domain)?;
        validate_path("entries_dir", &self.entries_dir)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatsFormat {
    Table,
    Csv,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "registrar_stats")]
#[command(about = "Count stored entries per registrar")]
pub struct StatsConfig {
    /// Root of the entry tree
    #[arg(long, default_value = crate::config::DEFAULT_ENTRIES_DIR)]
    pub entries_dir: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = StatsFormat::Table)]
    pub format: StatsFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_domain_argument() {
        let config = CliConfig::try_parse_from(["verbum-malum", "example.com"]).unwrap();
        assert_eq!(config.domain, "example.com");
        assert_eq!(config.entries_dir, "entries");
        assert!(!config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_domain_argument_is_required() {
        assert!(CliConfig::try_parse_from(["verbum-malum"]).is_err());
    }

    #[test]
    fn test_invalid_domain_fails_validation() {
        let config = CliConfig::try_parse_from(["verbum-malum", "../escape"]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_stats_format() {
        let config =
            StatsConfig::try_parse_from(["registrar_stats", "--format", "csv"]).unwrap();
        assert_eq!(config.format, StatsFormat::Csv);

        let config = StatsConfig::try_parse_from(["registrar_stats"]).unwrap();
        assert_eq!(config.format, StatsFormat::Table);
    }
}
