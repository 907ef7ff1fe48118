//! Config loader (strict YAML + environment overrides).
//!
//! Resolution order: built-in defaults, then the YAML file (if present), then
//! environment variables, then `validate()`. The variable names are the ones
//! operators of the original bot already set: `PORT`, `AUTO_TIMEOUT_SECONDS`,
//! `PURGE_INTERVAL_SECONDS`, `ADMIN_IDS`, `ADMIN_TOKEN`.

pub mod schema;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use onduty_core::error::{OndutyError, Result};

pub use schema::{AdminSection, GatewaySection, OndutyConfig, PresenceSection};

pub const DEFAULT_CONFIG_PATH: &str = "onduty.yaml";

/// Load a config file, apply process environment overrides, and validate.
///
/// A missing file is only tolerated when `required` is false.
pub fn load(path: &Path, required: bool) -> Result<OndutyConfig> {
    let mut cfg = match fs::read_to_string(path) {
        Ok(s) => parse_str(&s)?,
        Err(e) if e.kind() == ErrorKind::NotFound && !required => {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            OndutyConfig::default()
        }
        Err(e) => {
            return Err(OndutyError::Internal(format!(
                "read config {} failed: {e}",
                path.display()
            )))
        }
    };
    apply_env(&mut cfg, |k| std::env::var(k).ok())?;
    cfg.validate()?;
    Ok(cfg)
}

/// Parse and validate YAML without consulting the environment.
pub fn load_from_str(s: &str) -> Result<OndutyConfig> {
    let cfg = parse_str(s)?;
    cfg.validate()?;
    Ok(cfg)
}

fn parse_str(s: &str) -> Result<OndutyConfig> {
    serde_yaml::from_str(s).map_err(|e| OndutyError::BadRequest(format!("invalid yaml: {e}")))
}

/// Apply environment overrides through `lookup` (injectable for tests).
pub fn apply_env<F>(cfg: &mut OndutyConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT") {
        let port: u16 = parse_var("PORT", &port)?;
        let mut addr = cfg.gateway.listen_addr()?;
        addr.set_port(port);
        cfg.gateway.listen = addr.to_string();
    }
    if let Some(v) = lookup("AUTO_TIMEOUT_SECONDS") {
        cfg.presence.timeout_secs = parse_var("AUTO_TIMEOUT_SECONDS", &v)?;
    }
    if let Some(v) = lookup("PURGE_INTERVAL_SECONDS") {
        cfg.presence.sweep_interval_secs = parse_var("PURGE_INTERVAL_SECONDS", &v)?;
    }
    if let Some(v) = lookup("ADMIN_IDS") {
        cfg.admin.ids = v
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }
    if let Some(v) = lookup("ADMIN_TOKEN") {
        cfg.admin.token = Some(v);
    }
    Ok(())
}

/// Outcome of a `.env` load worth reporting. A missing file is not one.
pub fn dotenv_error<T>(res: std::result::Result<T, dotenvy::Error>) -> Option<dotenvy::Error> {
    match res {
        Err(e) if !e.not_found() => Some(e),
        _ => None,
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| OndutyError::BadRequest(format!("{name} is not a valid number: {raw:?}")))
}
