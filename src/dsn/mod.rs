// src/dsn/mod.rs

//! Connection-string detection and parsing.
//!
//! The probed dependency is configured through an environment variable
//! holding a URL of the shape `scheme://[user[:pass]@]host[:port]/db`.
//! Only relational-database schemes are probed; anything else (including an
//! unset or empty variable) means the deployment has no TCP dependency to
//! wait for and probing is skipped.

use crate::errors::{PreflightError, Result};

/// Schemes that mark the connection string as a probed relational database.
const DB_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

/// A reachable TCP endpoint extracted from the connection string.
///
/// Computed once per boot; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

/// Outcome of inspecting the configured connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// A database endpoint to probe before running tasks.
    Endpoint(Endpoint),
    /// No probed dependency is configured; boot proceeds straight to
    /// classification.
    NotApplicable,
}

/// Inspect the raw connection-string value and extract an [`Endpoint`].
///
/// - `None`, empty, or a non-database scheme yields
///   [`Detection::NotApplicable`].
/// - A database scheme with an empty host, an unparsable port, or port 0 is
///   a [`PreflightError::ConfigError`].
/// - A missing port falls back to `default_port`, never to the host text.
pub fn detect(raw: Option<&str>, default_port: u16) -> Result<Detection> {
    let raw = match raw {
        Some(s) if !s.trim().is_empty() => s.trim(),
        _ => return Ok(Detection::NotApplicable),
    };

    let rest = match DB_SCHEMES.iter().find_map(|scheme| raw.strip_prefix(scheme)) {
        Some(rest) => rest,
        None => return Ok(Detection::NotApplicable),
    };

    // Authority is everything up to the first '/' (the database name).
    let authority = rest.split('/').next().unwrap_or("");

    // Credentials end at the last '@' of the authority.
    let host_port = match authority.rsplit_once('@') {
        Some((_credentials, host_port)) => host_port,
        None => authority,
    };

    let (host, port_text) = match host_port.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (host_port, None),
    };

    if host.is_empty() {
        return Err(PreflightError::ConfigError(format!(
            "connection string '{raw}' has an empty host"
        )));
    }

    let port = match port_text {
        Some(text) => text.parse::<u16>().map_err(|_| {
            PreflightError::ConfigError(format!(
                "connection string '{raw}' has invalid port '{text}'"
            ))
        })?,
        None => default_port,
    };

    if port == 0 {
        return Err(PreflightError::ConfigError(format!(
            "connection string '{raw}' has port 0"
        )));
    }

    Ok(Detection::Endpoint(Endpoint {
        host: host.to_string(),
        port,
    }))
}
