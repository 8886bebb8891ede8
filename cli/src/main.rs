use anyhow::Result;
use clap::{Parser, Subcommand};
use fastago_core::Case;
use std::path::PathBuf;

mod commands;
mod config;
mod error;
mod streams;

use config::Config;

#[derive(Parser)]
#[command(name = "fastago")]
#[command(about = "fastago - streaming FASTA statistics and transforms")]
#[command(version)]
#[command(long_about = "
fastago reads FASTA records as a stream and computes statistics over them
or re-emits them transformed, without loading the whole file in memory.

Examples:
  fastago stats length -i genome.fa
  fastago stats length -i reads.fa.gz --mode average
  cat contigs.fa | fastago transform lower -w 80 > contigs.lower.fa
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Input FASTA file (stdin if omitted or '-'; .gz is decompressed)
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Output file (stdout if omitted or '-')
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute statistics over the records
    Stats {
        #[command(subcommand)]
        command: StatsCommands,
    },

    /// Re-emit the records with a transformation applied
    Transform {
        #[command(subcommand)]
        command: TransformCommands,
    },

    /// Print the effective configuration as TOML (or save it with -o)
    Config,
}

#[derive(Subcommand)]
pub enum StatsCommands {
    /// Get the length of sequences in the input
    #[command(long_about = "
By default this command outputs the length of each sequence.
It is also possible to retrieve the minimum, maximum or average length
with -m/--mode:
  each              length of each sequence
  average, mean     average length
  min, minimum      minimum length
  max, maximum      maximum length")]
    Length {
        /// How to display lengths (defaults to [stats] length_mode)
        #[arg(short, long)]
        mode: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TransformCommands {
    /// Lowercase all sequence residues
    Lower {
        /// Residues per output line (0 or negative for no wrapping)
        #[arg(short = 'w', long, allow_negative_numbers = true)]
        line_width: Option<isize>,
    },

    /// Uppercase all sequence residues
    Upper {
        /// Residues per output line (0 or negative for no wrapping)
        #[arg(short = 'w', long, allow_negative_numbers = true)]
        line_width: Option<isize>,
    },
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    // Execute the requested command
    match cli.command {
        Commands::Stats {
            command: StatsCommands::Length { mode },
        } => {
            commands::length::execute(&config, cli.input, cli.output, mode)?;
        }

        Commands::Transform { command } => {
            let (case, line_width) = match command {
                TransformCommands::Lower { line_width } => (Case::Lower, line_width),
                TransformCommands::Upper { line_width } => (Case::Upper, line_width),
            };
            commands::transform::execute(&config, cli.input, cli.output, case, line_width)?;
        }

        Commands::Config => match cli.output {
            Some(path) => {
                config.save_to_file(&path)?;
                log::info!("Configuration written to: {}", path.display());
            }
            None => print!("{}", config.to_toml()?),
        },
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        error::print_error_and_exit(&err);
    }
}
