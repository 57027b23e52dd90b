use analytics::AnalyticsEngine;
use anyhow::Context;
use clap::Parser;
use configuration::{CliOverrides, Config, init_tracing, load_config};
use data_handler::CsvReturnSource;
use reporter::{Reporter, render_summary};
use std::path::PathBuf;
use std::process::ExitCode;

/// The main entry point for the Spreadlab portfolio analysis tool.
fn main() -> ExitCode {
    // A missing .env file is normal; overrides may also come from the real environment.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = format!("{e:#}"), "Analysis aborted.");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Compares two leveraged ETF spread portfolios against three long-only
/// holdings over a shared daily history.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file (default: ./spreadlab.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: CliOverrides,

    /// Skip rendering the growth chart.
    #[arg(long)]
    no_plot: bool,

    /// Do not print the console summary.
    #[arg(long)]
    quiet: bool,
}

// ==============================================================================
// Run Logic
// ==============================================================================

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = prepare_config(&cli)?;
    let _log_guard = init_tracing(&config.logging).context("Failed to initialise logging")?;

    tracing::info!(
        start_date = %config.analysis.start_date,
        initial_investment = %config.analysis.initial_investment,
        leverage = %config.analysis.leverage,
        "Starting analysis."
    );

    let source = CsvReturnSource::from_paths(|asset| config.data.path_for(asset).to_path_buf());
    let outcome = AnalyticsEngine::new()
        .run(&source, &config.analysis)
        .context("Analysis failed")?;

    let summary = Reporter::new(config.output.clone()).emit_all(&outcome, !cli.no_plot);

    if !cli.quiet {
        println!("{}", render_summary(&outcome));
        for path in &summary.written {
            println!("Wrote {}", path.display());
        }
    }

    if summary.failures > 0 {
        anyhow::bail!("{} report artifact(s) could not be written", summary.failures);
    }
    Ok(())
}

/// Layers file, environment and command-line settings, then re-validates.
fn prepare_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    config.apply_overrides(&cli.overrides);
    config.validate().context("Invalid command-line override")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn command_line_overrides_the_config_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[analysis]\ninitial_investment = 250\n").unwrap();

        let cli = Cli::parse_from([
            "spreadlab",
            "--config",
            file.path().to_str().unwrap(),
            "--leverage",
            "3",
            "--no-plot",
        ]);
        let config = prepare_config(&cli).unwrap();

        assert_eq!(config.analysis.initial_investment, dec!(250));
        assert_eq!(config.analysis.leverage, dec!(3));
        assert!(cli.no_plot);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let cli = Cli::parse_from([
            "spreadlab",
            "--config",
            file.path().to_str().unwrap(),
            "--initial-investment",
            "0",
        ]);

        assert!(prepare_config(&cli).is_err());
    }
}
