//! WOS CLI - Command line tool for Weeks-of-Stock backtest analysis.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "wos-cli",
    version,
    about = "Weeks-of-Stock inventory backtest toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: wos_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    wos_cmd::run(cli.command)
}
