// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod shell;

use anyhow::{Context, Result, anyhow, bail};
use config::{Config, DOTENV_FILE, MISSING_CREDENTIALS_MESSAGE};
use shell::Shell;
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "TICKETVIEW_LOG";

fn main() {
    init_logging();
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let invocation = Invocation::parse(env::args().skip(1))?;
    if invocation.mode == Mode::Help {
        print_help();
        return Ok(());
    }

    let config_path = match invocation.config_path {
        Some(path) => path,
        None => Config::default_path()?,
    };
    match invocation.mode {
        Mode::PrintConfigPath => {
            println!("{}", config_path.display());
            return Ok(());
        }
        Mode::PrintExampleConfig => {
            print!("{}", Config::example_config(&config_path));
            return Ok(());
        }
        Mode::Help | Mode::Check | Mode::Browse => {}
    }

    let config = Config::load(&config_path).with_context(|| {
        format!(
            "load config {}; run `ticketview --print-example-config` to generate a template",
            config_path.display()
        )
    })?;

    let dotenv = config::load_dotenv(Path::new(DOTENV_FILE))?;
    let Some(credentials) =
        config::resolve_credentials(&config, &dotenv, |key| env::var(key).ok())
    else {
        println!("{MISSING_CREDENTIALS_MESSAGE}");
        std::process::exit(1);
    };

    let client = ticketview_api::Client::new(
        &credentials.url,
        &credentials.email,
        &credentials.password,
        config.timeout()?,
    )
    .with_context(|| {
        format!(
            "invalid helpdesk settings from {} or {}; fix url/email/password values",
            DOTENV_FILE,
            config_path.display()
        )
    })?;
    info!(
        url = client.base_url(),
        email = client.email(),
        timeout_ms = client.timeout().as_millis() as u64,
        "helpdesk client ready"
    );

    if invocation.mode == Mode::Check {
        let total = ticketview_api::ping(&client)?;
        println!("ok: {} has {total} tickets", client.base_url());
        return Ok(());
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    Shell::new(client).run(stdin.lock(), &mut stdout)
}

/// Logs are discarded unless `TICKETVIEW_LOG` holds a filter; when set,
/// they go to stderr so they never mix with the tables on stdout.
fn init_logging() {
    match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .try_init();
        }
        Err(_) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(io::sink)
                .try_init();
        }
    }
}

/// What a single invocation does. When several flags are given, the one
/// that touches the least wins, so `--help` beats everything and `--check`
/// only beats the interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Mode {
    Browse,
    Check,
    PrintExampleConfig,
    PrintConfigPath,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Invocation {
    mode: Mode,
    /// `None` means the platform default or `TICKETVIEW_CONFIG_PATH`.
    config_path: Option<PathBuf>,
}

impl Invocation {
    fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mode = Mode::Browse;
        let mut config_path = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            let flag_mode = match arg {
                "--check" => Mode::Check,
                "--print-example-config" => Mode::PrintExampleConfig,
                "--print-config-path" => Mode::PrintConfigPath,
                "--help" | "-h" => Mode::Help,
                "--config" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--config requires a file path"))?;
                    config_path = Some(config_value(value.as_ref())?);
                    continue;
                }
                other => match other.strip_prefix("--config=") {
                    Some(value) => {
                        config_path = Some(config_value(value)?);
                        continue;
                    }
                    None => bail!(
                        "unknown argument {other:?}; run with --help to see supported options"
                    ),
                },
            };
            mode = mode.max(flag_mode);
        }

        Ok(Self { mode, config_path })
    }
}

fn config_value(raw: &str) -> Result<PathBuf> {
    if raw.trim().is_empty() || raw.starts_with("--") {
        bail!("--config requires a file path, got {raw:?}");
    }
    Ok(PathBuf::from(raw))
}

fn print_help() {
    println!("ticketview -- browse helpdesk tickets from the terminal");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config + credentials against the helpdesk");
    println!("  --help                   Show this help");
    println!();
    println!("Credentials come from secretUrl, secretEmail and secretPassword in the");
    println!("environment or ./.env, falling back to the [api] section of the config.");
    println!("Set {LOG_ENV} (for example {LOG_ENV}=debug) to log to stderr.");
}
