use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "docklet")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_TIME"), ")"))]
#[command(about = "Unified service catalog for Docker containers and native system services", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the host and print the service catalog
    Scan {
        /// Only scan Docker containers
        #[arg(long, conflicts_with = "system")]
        containers: bool,

        /// Only scan native system services
        #[arg(long)]
        system: bool,

        /// Only list system services that look like web services
        #[arg(short, long)]
        web_only: bool,

        /// Output format (text or json)
        #[arg(short, long, default_value = "text")]
        output: String,

        /// Show detailed information (raw labels)
        #[arg(short, long, default_value = "false")]
        verbose: bool,
    },
}
