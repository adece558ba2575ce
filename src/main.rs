use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use legislative_tally::logging::{self, Profile};
use legislative_tally::{
    check_inputs, run_all, run_bill_report, run_legislator_report, PipelineConfig, RunSummary,
};

#[derive(Debug, Parser)]
#[command(name = "legislative-tally", version)]
#[command(about = "Bill sponsor and vote tallies from legislative CSV exports", long_about = None)]
struct Cli {
    /// JSON config file (defaults: input/ → output/)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding bills.csv, legislators.csv, votes.csv, vote_results.csv
    #[arg(long, global = true)]
    input_dir: Option<PathBuf>,

    /// Directory reports are written to
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Column delimiter for input and output files
    #[arg(long, global = true)]
    delimiter: Option<char>,

    /// Check every reference before tallying
    #[arg(long, global = true)]
    strict: bool,

    /// Log format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// Print run summaries as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Bills with primary sponsor and supporter/opposer counts
    Bills {
        /// Omit sponsor_id from the report
        #[arg(long)]
        compact: bool,
    },
    /// Legislators with supported/opposed bill counts
    Legislators,
    /// Both reports, written only if every pass succeeds
    All {
        #[arg(long)]
        compact: bool,
    },
    /// Report dangling references and unknown sponsors without writing anything
    Check,
}

fn main() {
    let cli = Cli::parse();

    logging::init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = cli.input_dir {
        config.input_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(delimiter) = cli.delimiter {
        config.delimiter = delimiter;
    }
    config.strict |= cli.strict;

    match cli.command {
        Commands::Bills { compact } => {
            config.compact |= compact;
            report(&run_bill_report(&config)?, cli.json)?;
        }
        Commands::Legislators => {
            report(&run_legislator_report(&config)?, cli.json)?;
        }
        Commands::All { compact } => {
            config.compact |= compact;
            for summary in run_all(&config)? {
                report(&summary, cli.json)?;
            }
        }
        Commands::Check => {
            let integrity = check_inputs(&config)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&integrity)?);
            } else {
                println!("{}", integrity.summary());
                for reference in &integrity.dangling {
                    println!("  ✗ {}", reference);
                }
                for bill_id in &integrity.unmatched_sponsors {
                    println!("  ? bill {} has an unknown sponsor", bill_id);
                }
            }

            if !integrity.is_clean() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn report(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(summary)?);
    } else {
        println!("✓ {}", summary.summary());
        if summary.unmatched_sponsors > 0 {
            println!("  {} bill(s) kept sponsor \"Unknown\"", summary.unmatched_sponsors);
        }
    }
    Ok(())
}
