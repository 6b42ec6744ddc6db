//! One-shot database connectivity probe run at startup.
//!
//! The probe validates the five DB_* settings and, when they are complete,
//! opens a single Postgres connection with a bounded timeout and immediately
//! closes it again. This is a reachability check, not a pool: no handle
//! survives the probe and requests never touch the database. Whether a
//! missing configuration or a failed connection aborts startup is governed
//! by the DB_REQUIRED policy.

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

use crate::config::{AppConfig, DB_CONNECT_TIMEOUT};

/// Outcome of the startup probe, produced exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProbeResult {
    Connected,
    MissingConfig,
    ConnectionFailed,
}

/// Fatal probe outcomes under the required policy.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Missing DB environment variables: {0}")]
    MissingConfig(String),

    #[error("Failed to connect to Postgres: {0}")]
    ConnectionFailed(String),
}

const DB_ENV_KEYS: [&str; 5] = ["DB_USER", "DB_PASSWORD", "DB_HOST", "DB_PORT", "DB_NAME"];

/// Runs the startup probe once, before the listener binds.
///
/// Under the required policy a missing configuration or a failed connection
/// is returned as an error so the process exits non-zero; otherwise the
/// outcome is logged and startup continues without database connectivity.
pub async fn run_startup_probe(config: &AppConfig) -> Result<DbProbeResult, ProbeError> {
    let missing = missing_keys(config);
    if !missing.is_empty() {
        let missing = missing.join(", ");
        if config.db_required.enabled() {
            tracing::error!(%missing, "Missing DB environment variables, aborting startup");
            return Err(ProbeError::MissingConfig(missing));
        }
        tracing::info!(
            %missing,
            "Missing DB environment variables, continuing because DB_REQUIRED is not set"
        );
        return Ok(DbProbeResult::MissingConfig);
    }

    tracing::info!("All DB environment variables are set");

    match attempt_connection(config).await {
        Ok(()) => {
            tracing::info!("Connected to Postgres successfully");
            Ok(DbProbeResult::Connected)
        }
        Err(error) => {
            if config.db_required.enabled() {
                tracing::error!(%error, "Failed to connect to Postgres, aborting startup");
                Err(ProbeError::ConnectionFailed(error))
            } else {
                tracing::warn!(
                    %error,
                    "Failed to connect to Postgres, continuing because DB_REQUIRED is not set"
                );
                Ok(DbProbeResult::ConnectionFailed)
            }
        }
    }
}

/// A setting counts as missing when it is unset or empty.
fn missing_keys(config: &AppConfig) -> Vec<&'static str> {
    let values = [
        &config.db_user,
        &config.db_password,
        &config.db_host,
        &config.db_port,
        &config.db_name,
    ];
    DB_ENV_KEYS
        .iter()
        .zip(values)
        .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
        .map(|(key, _)| *key)
        .collect()
}

/// Opens and immediately closes one connection, bounded by the probe timeout.
async fn attempt_connection(config: &AppConfig) -> Result<(), String> {
    let (Some(user), Some(password), Some(host), Some(port), Some(name)) = (
        config.db_user.as_deref(),
        config.db_password.as_deref(),
        config.db_host.as_deref(),
        config.db_port.as_deref(),
        config.db_name.as_deref(),
    ) else {
        return Err("incomplete DB configuration".to_string());
    };

    // A non-numeric DB_PORT surfaces as a failed connection, not a config gap.
    let port: u16 = port
        .parse()
        .map_err(|_| format!("invalid DB_PORT value '{port}'"))?;

    let options = PgConnectOptions::new()
        .host(host)
        .port(port)
        .username(user)
        .password(password)
        .database(name);

    match tokio::time::timeout(DB_CONNECT_TIMEOUT, PgConnection::connect_with(&options)).await {
        Ok(Ok(connection)) => {
            // Fire-and-discard: the probe only proves reachability.
            let _ = connection.close().await;
            Ok(())
        }
        Ok(Err(error)) => Err(error.to_string()),
        Err(_) => Err(format!(
            "connection attempt timed out after {}s",
            DB_CONNECT_TIMEOUT.as_secs()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envconfig::Envconfig;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::init_from_hashmap(&vars).expect("config")
    }

    fn full_db_pairs<'a>(host: &'a str, port: &'a str) -> Vec<(&'a str, &'a str)> {
        vec![
            ("DB_USER", "demo"),
            ("DB_PASSWORD", "demo"),
            ("DB_HOST", host),
            ("DB_PORT", port),
            ("DB_NAME", "demo"),
        ]
    }

    #[tokio::test]
    async fn missing_config_is_fatal_when_required() {
        let config = config_from(&[("DB_REQUIRED", "true"), ("DB_USER", "demo")]);
        let result = run_startup_probe(&config).await;
        assert!(matches!(result, Err(ProbeError::MissingConfig(_))));
    }

    #[tokio::test]
    async fn missing_config_degrades_when_optional() {
        let config = config_from(&[]);
        let result = run_startup_probe(&config).await.expect("non-fatal");
        assert_eq!(result, DbProbeResult::MissingConfig);
    }

    #[test]
    fn empty_values_count_as_missing() {
        let config = config_from(&[("DB_USER", ""), ("DB_HOST", "db.internal")]);
        let missing = missing_keys(&config);
        assert!(missing.contains(&"DB_USER"));
        assert!(missing.contains(&"DB_PORT"));
        assert!(!missing.contains(&"DB_HOST"));
    }

    #[tokio::test]
    async fn unreachable_database_degrades_when_optional() {
        // Port 1 on loopback is refused immediately on any sane host.
        let mut pairs = full_db_pairs("127.0.0.1", "1");
        pairs.push(("DB_REQUIRED", "false"));
        let config = config_from(&pairs);
        let result = run_startup_probe(&config).await.expect("non-fatal");
        assert_eq!(result, DbProbeResult::ConnectionFailed);
    }

    #[tokio::test]
    async fn unreachable_database_is_fatal_when_required() {
        let mut pairs = full_db_pairs("127.0.0.1", "1");
        pairs.push(("DB_REQUIRED", "true"));
        let config = config_from(&pairs);
        let result = run_startup_probe(&config).await;
        assert!(matches!(result, Err(ProbeError::ConnectionFailed(_))));
    }

    #[tokio::test]
    async fn non_numeric_port_is_a_connection_failure() {
        let config = config_from(&full_db_pairs("127.0.0.1", "not-a-port"));
        let result = run_startup_probe(&config).await.expect("non-fatal");
        assert_eq!(result, DbProbeResult::ConnectionFailed);
    }
}
