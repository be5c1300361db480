//! handray - hand-tracked ray pointer interaction
//!
//! Headless runner: loads a scene from config, replays scripted hand input
//! through the interaction controller and logs selectable notifications.

mod config;
mod headless;
mod scripted_input;

use anyhow::Result;
use config::AppConfig;
use headless::HeadlessConfig;
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting handray v{}", env!("CARGO_PKG_VERSION"));
    handray_interaction::init();

    let cli = CliOptions::parse(env::args().skip(1));
    if cli.help {
        println!("{}", CliOptions::USAGE);
        return Ok(());
    }

    let app = match cli.config.as_deref() {
        Some(path) => AppConfig::load_from_path(path),
        None => AppConfig::load(),
    };

    let summary = headless::run(HeadlessConfig {
        app,
        scripted_input: cli.script,
        event_log: cli.event_log,
        max_ticks: cli.max_ticks,
        dt: cli.dt,
    })?;

    println!(
        "ticks={} transitions={} notifications={} state={}",
        summary.ticks, summary.transitions, summary.notifications, summary.final_state
    );
    Ok(())
}

#[derive(Debug)]
struct CliOptions {
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    event_log: Option<PathBuf>,
    max_ticks: Option<u64>,
    dt: f32,
    help: bool,
}

impl CliOptions {
    const USAGE: &'static str = "usage: handray [--config <path>] [--script <path>] \
[--event-log <path>] [--max-ticks <n>] [--dt <seconds>]";

    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions {
            config: None,
            script: None,
            event_log: None,
            max_ticks: None,
            dt: 1.0 / 72.0,
            help: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--script" => {
                    if let Some(path) = args.next() {
                        opts.script = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--script requires a file path");
                    }
                }
                "--event-log" => {
                    if let Some(path) = args.next() {
                        opts.event_log = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--event-log requires a file path");
                    }
                }
                "--max-ticks" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.max_ticks = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--max-ticks must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--max-ticks requires an integer");
                    }
                }
                "--dt" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<f32>() {
                            Ok(value) if value > 0.0 && value.is_finite() => opts.dt = value,
                            Ok(value) => {
                                tracing::error!(value, "--dt must be a positive number of seconds");
                            }
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--dt must be a number");
                            }
                        }
                    } else {
                        tracing::error!("--dt requires a number of seconds");
                    }
                }
                "--help" | "-h" => opts.help = true,
                other => {
                    tracing::warn!(arg = %other, "Ignoring unknown argument");
                }
            }
        }

        opts
    }
}
