// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "ticketview";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_TIMEOUT: &str = "10s";

pub const CONFIG_PATH_ENV: &str = "TICKETVIEW_CONFIG_PATH";
pub const URL_KEY: &str = "secretUrl";
pub const EMAIL_KEY: &str = "secretEmail";
pub const PASSWORD_KEY: &str = "secretPassword";
pub const DOTENV_FILE: &str = ".env";

pub const MISSING_CREDENTIALS_MESSAGE: &str =
    "Some values are missing from the .env file. Please check the file and try again.";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub api: Api,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api: Api::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Api {
    pub url: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub timeout: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put credentials under [api]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(timeout) = &self.api.timeout {
            let parsed = parse_duration(timeout)
                .with_context(|| format!("api.timeout in {}", path.display()))?;
            if parsed <= Duration::ZERO {
                bail!(
                    "api.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }
        Ok(())
    }

    pub fn timeout(&self) -> Result<Duration> {
        parse_duration(self.api.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# ticketview config\n# Place this file at: {}\n\nversion = 1\n\n[api]\n# Values set here are overridden by {URL_KEY}, {EMAIL_KEY} and {PASSWORD_KEY}\n# from the environment or a {DOTENV_FILE} file in the working directory.\n# url = \"https://yourcompany.zendesk.com\"\n# email = \"agent@yourcompany.com\"\n# password = \"\"\ntimeout = \"{DEFAULT_TIMEOUT}\"\n",
            path.display(),
        )
    }
}

/// Helpdesk location and login. Every field is non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub url: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Picks each credential from the process environment first, then the
/// `.env` values, then the config file. Returns `None` when any of the
/// three stays empty.
pub fn resolve_credentials<F>(
    config: &Config,
    dotenv: &HashMap<String, String>,
    env_lookup: F,
) -> Option<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    let pick = |key: &str, fallback: Option<&String>| {
        env_lookup(key)
            .or_else(|| dotenv.get(key).cloned())
            .or_else(|| fallback.cloned())
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
    };

    Some(Credentials {
        url: pick(URL_KEY, config.api.url.as_ref())?,
        email: pick(EMAIL_KEY, config.api.email.as_ref())?,
        password: pick(PASSWORD_KEY, config.api.password.as_ref())?,
    })
}

/// Reads a `.env` file. A missing file yields no values.
pub fn load_dotenv(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("read env file {}", path.display()))?;
    Ok(parse_dotenv_contents(&contents))
}

pub fn parse_dotenv_contents(contents: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for raw_line in contents.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        map.insert(key.to_owned(), parse_dotenv_value(value));
    }
    map
}

fn parse_dotenv_value(raw: &str) -> String {
    let trimmed = raw.trim();
    for quote in ['"', '\''] {
        if let Some(rest) = trimmed.strip_prefix(quote)
            && let Some(end) = rest.find(quote)
        {
            let remainder = rest[end + 1..].trim_start();
            if remainder.is_empty() || remainder.starts_with('#') {
                return rest[..end].to_owned();
            }
        }
    }

    // Unquoted values end at an inline comment.
    match trimmed.find(" #") {
        Some(index) => trimmed[..index].trim_end().to_owned(),
        None => trimmed.to_owned(),
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        let Some(secs) = mins.checked_mul(60) else {
            bail!("timeout duration {raw:?} is too large");
        };
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 5s)")
}
