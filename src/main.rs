use anyhow::Context;
use clap::Parser;
use silent_auction::adapters::roster::load_roster;
use silent_auction::utils::error::{AuctionError, ErrorSeverity};
use silent_auction::utils::{logger, validation::Validate};
use silent_auction::{
    run_auction, AuctionReport, CliConfig, OutputFormat, ScenarioConfig, SystemClock,
};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // logging
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting silent-auction");
    tracing::debug!("CLI config: {:?}", config);

    let report = match build_report(&config) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(
                "❌ Auction run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    };

    let output = match config.format {
        OutputFormat::Text => report.render_text(),
        OutputFormat::Json => report.to_json().context("failed to serialize report")?,
    };
    println!("{}", output);

    Ok(())
}

fn build_report(config: &CliConfig) -> Result<AuctionReport, AuctionError> {
    config.validate()?;

    tracing::info!("📁 Loading scenario from: {}", config.scenario);
    let mut scenario = ScenarioConfig::from_file(&config.scenario)?;
    if config.strict_budgets {
        scenario.set_strict(true);
    }
    scenario.validate()?;

    let mut roster = scenario.roster_attendees()?;
    if let Some(path) = &config.roster {
        roster.extend(load_roster(path, scenario.is_strict())?);
    }
    let mut auction = scenario.build_auction_with(roster)?;

    let report = run_auction(
        &scenario.auction.name,
        &mut auction,
        !config.no_close,
        &SystemClock::new(),
    )?;
    if report.closing.is_some() {
        tracing::info!("✅ Auction '{}' closed", scenario.auction.name);
    }
    Ok(report)
}
