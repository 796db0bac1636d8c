use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "silent-auction")]
#[command(about = "Run a silent auction scenario and report the results")]
pub struct CliConfig {
    /// Path to the TOML scenario file
    #[arg(short, long, default_value = "auction.toml")]
    pub scenario: String,

    /// Extra attendees from a CSV file with a `name,budget` header
    #[arg(long)]
    pub roster: Option<String>,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Only report the open auction, do not close it
    #[arg(long)]
    pub no_close: bool,

    /// Reject budgets that are not plain dollar amounts
    #[arg(long)]
    pub strict_budgets: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("scenario", &self.scenario)?;
        if let Some(roster) = &self.roster {
            validate_path("roster", roster)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["silent-auction"]);
        assert_eq!(config.scenario, "auction.toml");
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.no_close);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags() {
        let config = CliConfig::parse_from([
            "silent-auction",
            "--scenario",
            "gala.toml",
            "--roster",
            "people.csv",
            "--format",
            "json",
            "--no-close",
            "--strict-budgets",
        ]);
        assert_eq!(config.roster.as_deref(), Some("people.csv"));
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.no_close);
        assert!(config.strict_budgets);
    }

    #[test]
    fn test_empty_scenario_path_is_invalid() {
        let config = CliConfig::parse_from(["silent-auction", "--scenario", ""]);
        assert!(config.validate().is_err());
    }
}
