//! otp - One-Time Password Tool
//!
//! Generate secrets and HOTP/TOTP codes, verify codes and print
//! provisioning URIs from the command line.

use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use otp_engine::TotpEngine;

mod app;

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "otp_engine=warn,otp=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (command, config) = app::parse_args(&args)?;

    let output = app::run(&command, &config, &TotpEngine::new()).context("command failed")?;
    println!("{}", output.render(&config)?);

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
