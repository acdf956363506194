//! Command implementations for the WOS CLI.
//!
//! Provides subcommands for running the Weeks-of-Stock backtest over a
//! snapshot export and for inspecting which weekly uploads an export
//! contains.

use clap::Subcommand;

pub mod analyze;
pub mod inspect;

#[derive(Subcommand)]
pub enum Command {
    /// Reconstruct the Weeks-of-Stock backtest for one material/plant/site
    Analyze {
        /// Path to the snapshot export CSV
        #[arg(short = 's', long)]
        snapshots_csv: String,

        /// Material number to analyze
        #[arg(short, long)]
        material: String,

        /// Plant identifier
        #[arg(short, long)]
        plant: String,

        /// Site identifier
        #[arg(long)]
        site: String,

        /// Analysis start week, as a "WWnn" label
        #[arg(short = 'w', long)]
        start_week: String,

        /// Number of weeks before the start week to backtest (1-52)
        #[arg(long, default_value_t = 12)]
        horizon_weeks: u8,

        /// Write the JSON report to this path instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Summarize which weekly uploads a snapshot export contains
    Inspect {
        /// Path to the snapshot export CSV
        #[arg(short = 's', long)]
        snapshots_csv: String,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Analyze {
            snapshots_csv,
            material,
            plant,
            site,
            start_week,
            horizon_weeks,
            output,
        } => analyze::run_analyze(
            &snapshots_csv,
            &material,
            &plant,
            &site,
            &start_week,
            horizon_weeks,
            output.as_deref(),
        ),
        Command::Inspect { snapshots_csv } => inspect::run_inspect(&snapshots_csv),
    }
}
