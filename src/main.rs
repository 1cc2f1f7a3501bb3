mod catalog;
mod cli;
mod config;
mod utils;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    pretty_env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan { containers, system, web_only, output, verbose } => {
            // With no selection flags, scan both sources.
            let both = !containers && !system;
            catalog::run_scan(containers || both, system || both, web_only, &output, verbose)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
