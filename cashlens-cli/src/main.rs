use anyhow::{Context, Result};
use cashlens_finance::analyse_bank_statements;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

#[derive(Parser, Debug)]
#[command(name = "cashlens", version, about = "Deterministic cash-flow analysis of bank statement CSVs")]
struct Cli {
    /// Log more to stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyse statement CSVs and emit the JSON report
    Analyze {
        /// Statement CSV files (one per account)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Employer keyword; inflows whose merchant contains it count as salary
        #[arg(long, default_value = "")]
        employer: String,

        /// Where to write the report (`-` or `stdout` prints it)
        #[arg(long, default_value = "-")]
        output: String,

        /// Analyzer config TOML (defaults to ~/.cashlens/config.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the number of statement files a run requires
        #[arg(long)]
        expected_sources: Option<usize>,
    },

    /// Manage the analyzer config
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config to ~/.cashlens/config.toml
    Init,

    /// Print the effective config as TOML
    Show {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Analyze {
            files,
            employer,
            output,
            config,
            expected_sources,
        } => {
            let mut cfg = config::load_config(config.as_deref())?;
            if let Some(n) = expected_sources {
                cfg.expected_sources = n;
            }
            analyze(&files, &employer, &output, &cfg)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                config::init_config()?;
            }
            ConfigCommand::Show { config } => {
                let cfg = config::load_config(config.as_deref())?;
                print!("{}", config::render_config(&cfg)?);
            }
        },
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn analyze(
    files: &[PathBuf],
    employer: &str,
    output: &str,
    cfg: &cashlens_finance::AnalyzerConfig,
) -> Result<()> {
    let report = analyse_bank_statements(files, employer, cfg)?;
    let json = serde_json::to_string_pretty(&report).context("serialize report")?;

    if writes_to_stdout(output) {
        println!("{json}");
        return Ok(());
    }

    let out = Path::new(output);
    fs::write(out, json).with_context(|| format!("write {}", out.display()))?;
    info!(path = %out.display(), "report written");
    eprintln!("Wrote analysis to {}", out.display());
    Ok(())
}

fn writes_to_stdout(output: &str) -> bool {
    output == "-" || output.eq_ignore_ascii_case("stdout")
}
