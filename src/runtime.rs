//! Runtime helpers shared across binaries.
//!
//! Centralizes environment-variable names, logging setup, and flag parsing
//! helpers so both CLIs behave the same way.

use anyhow::{Context, Result, bail};
use std::env;
use tracing_subscriber::EnvFilter;

/// Repository root override.
pub const ROOT_ENV: &str = "RIGCHECK_ROOT";
/// Catalog file override (wins over the repo default, loses to `--catalog`).
pub const CATALOG_ENV: &str = "RIGCHECK_CATALOG";
/// `tracing` filter directives, e.g. `rigcheck=debug`.
pub const LOG_ENV: &str = "RIGCHECK_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the stderr log subscriber.
///
/// Stdout stays reserved for JSON results. Calling this twice is harmless;
/// the second install is ignored.
pub fn init_logging() {
    let filter = env::var(LOG_ENV)
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Non-empty environment variable value.
pub fn env_value(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Pull the value that follows a flag out of an argument iterator.
pub fn next_value<I>(args: &mut I, flag: &str) -> Result<String>
where
    I: Iterator<Item = String>,
{
    match args.next() {
        Some(value) if !value.starts_with("--") => Ok(value),
        _ => bail!("{flag} requires a value"),
    }
}

pub fn parse_u64(raw: &str, what: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .with_context(|| format!("{what} must be a non-negative integer, got '{raw}'"))
}

pub fn parse_price(raw: &str, what: &str) -> Result<f64> {
    let value = raw
        .trim()
        .parse::<f64>()
        .with_context(|| format!("{what} must be a number, got '{raw}'"))?;
    if !value.is_finite() {
        bail!("{what} must be finite, got '{raw}'");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_value_rejects_missing_and_flag_values() {
        let mut args = vec!["--pretty".to_string()].into_iter();
        assert!(next_value(&mut args, "--build").is_err());

        let mut args = Vec::<String>::new().into_iter();
        assert!(next_value(&mut args, "--build").is_err());

        let mut args = vec!["7".to_string()].into_iter();
        assert_eq!(next_value(&mut args, "--build").unwrap(), "7");
    }

    #[test]
    fn numeric_parsers() {
        assert_eq!(parse_u64(" 12 ", "id").unwrap(), 12);
        assert!(parse_u64("-1", "id").is_err());
        assert_eq!(parse_price("99.5", "min").unwrap(), 99.5);
        assert!(parse_price("inf", "min").is_err());
        assert!(parse_price("cheap", "min").is_err());
    }
}
