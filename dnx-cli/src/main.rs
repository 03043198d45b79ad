//! `dnx` command-line entry point
//!
//! Loads the configuration, builds a session (analysis client plus
//! geolocation resolver) and runs one subcommand. Results go to stdout,
//! logs to stderr.

mod cli;
mod config;
mod logging;
mod render;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dnx_core::{AnalysisService, CoreError, GeolocationService, Session};
use dnx_provider::get_all_provider_metadata;
use futures::future::join_all;

use cli::{Cli, Commands};
use config::Config;
use render::{AnalyzeOutput, chain_entries, render_chain, render_location, render_report};

/// Exit code for input rejected before any request
const EXIT_INVALID_INPUT: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.override_endpoint(cli.endpoint);

    let geolocation = Arc::new(
        GeolocationService::from_settings(
            &config.provider_chain(),
            config.geolocation.resolver.clone(),
        )
        .context("Failed to set up geolocation providers")?,
    );

    match cli.command {
        Commands::Analyze {
            domain,
            json,
            no_geo,
        } => {
            let analysis = AnalysisService::new(config.analysis.clone())?;
            tracing::debug!("Analysis endpoint: {}", analysis.endpoint());
            let session = Session::new(analysis, geolocation);
            analyze(&session, &domain, json, no_geo).await
        }
        Commands::Locate { ips, json } => {
            let entries = join_all(ips.iter().map(|ip| geolocation.resolve_location(ip))).await;
            let located: Vec<_> = ips.into_iter().zip(entries).collect();
            if json {
                let map: std::collections::BTreeMap<_, _> = located.into_iter().collect();
                println!("{}", serde_json::to_string_pretty(&map)?);
            } else {
                for (ip, entry) in &located {
                    println!("{}", render_location(ip, entry).trim_start());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Providers { json } => {
            let entries = chain_entries(&config.provider_chain(), &get_all_provider_metadata());
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                println!("{}", render_chain(&entries));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn analyze(session: &Session, domain: &str, json: bool, no_geo: bool) -> anyhow::Result<ExitCode> {
    let result = match session.submit(domain).await {
        Ok(result) => result,
        Err(CoreError::ValidationError(message)) => {
            eprintln!("{message}");
            return Ok(ExitCode::from(EXIT_INVALID_INPUT));
        }
        Err(e) => return Err(e.into()),
    };

    let located = if no_geo || !result.shows_infrastructure() {
        Vec::new()
    } else {
        session.locate_result_ips(&result).await
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&AnalyzeOutput::new(&result, &located))?
        );
    } else {
        println!("{}", render_report(&result, &located));
    }

    Ok(if result.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
