//! Command-line interface definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// DNX - domain analysis and IP geolocation
#[derive(Parser, Debug)]
#[command(name = "dnx")]
#[command(version)]
#[command(about = "Analyze a domain through the DNX API and locate its IP addresses", long_about = None)]
pub struct Cli {
    /// Configuration file (default: <config dir>/dnx/config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Override the domain analysis endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a domain (WHOIS, DNS, SSL, email authentication) and locate its IPs
    Analyze {
        /// Full domain name, including the extension (e.g. example.com)
        domain: String,

        /// Print the raw result and locations as JSON
        #[arg(long)]
        json: bool,

        /// Skip IP geolocation
        #[arg(long)]
        no_geo: bool,
    },

    /// Locate one or more IP addresses through the provider chain
    Locate {
        #[arg(required = true)]
        ips: Vec<String>,

        /// Print the locations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the configured geolocation provider chain
    Providers {
        /// Print provider metadata as JSON
        #[arg(long)]
        json: bool,
    },
}
