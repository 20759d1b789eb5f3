use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod error;
mod interactive;

use config::Config;
use error::CliError;
use interactive::InteractiveDriver;
use seqdot_render::DotPlotExporter;

#[derive(Parser)]
#[command(name = "seqdot")]
#[command(about = "seqdot - Nucleotide dot plots with diagonal window filtering")]
#[command(version)]
#[command(long_about = "
seqdot compares two DNA sequences cell by cell and draws the result as a dot
plot. A sliding window along each diagonal removes isolated matches so that
conserved runs stand out.

Examples:
  seqdot plot --seq1 a.fa --seq2 b.fa
  seqdot plot --seq1 a.fa --seq2 b.fa --window 10 --threshold 7 --filtered-out filtered.svg
  seqdot interactive
  seqdot config --example > seqdot.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plot two FASTA/FASTQ files against each other
    Plot {
        /// Sequence drawn along the x axis (last record is used)
        #[arg(long)]
        seq1: PathBuf,

        /// Sequence drawn along the y axis (last record is used)
        #[arg(long)]
        seq2: PathBuf,

        /// Window length along each diagonal
        #[arg(short, long)]
        window: Option<usize>,

        /// Minimum number of matches inside a window
        #[arg(short, long)]
        threshold: Option<usize>,

        /// Output for the unfiltered plot (.png or .svg)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Output for the filtered plot (.png or .svg)
        #[arg(long)]
        filtered_out: Option<PathBuf>,

        /// Label for the x axis (defaults to the file name)
        #[arg(long)]
        name1: Option<String>,

        /// Label for the y axis (defaults to the file name)
        #[arg(long)]
        name2: Option<String>,
    },

    /// Enter or load sequences at prompts and filter them step by step
    Interactive,

    /// Configuration management
    Config {
        /// Print an example configuration
        #[arg(long)]
        example: bool,

        /// Write the example configuration to this file instead
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Default log filter; status lines such as "Dot plot saved to" are logged at
/// info and therefore hidden by `--quiet`
fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = log_level(verbose, quiet);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Plot {
            seq1,
            seq2,
            window,
            threshold,
            out,
            filtered_out,
            name1,
            name2,
        } => commands::plot::execute(
            &config,
            seq1,
            seq2,
            window,
            threshold,
            out,
            filtered_out,
            name1,
            name2,
        ),

        Commands::Interactive => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut driver = InteractiveDriver::new(
                stdin.lock(),
                stdout.lock(),
                DotPlotExporter::new(config.render.export_config()),
                config.render.raw_output.clone(),
                config.render.filtered_output.clone(),
            );
            driver.run()
        }

        Commands::Config { example, output } => {
            match output {
                Some(path) => {
                    Config::default().save_to_file(&path)?;
                    log::info!("Wrote example configuration to {}", path.display());
                }
                None if example => print!("{}", Config::example_toml()),
                None => print!("{}", toml::to_string_pretty(&config)?),
            }
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => Ok(()),
        Err(e) => match e.downcast_ref::<CliError>() {
            Some(cli_error) => error::print_error_and_exit(cli_error),
            None => Err(e),
        },
    }
}
