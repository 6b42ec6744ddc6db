//! Configuration loading and constants.
//!
//! Loads application configuration from environment variables and defines
//! constants for the deployment variant, health-toggle literals, the database
//! probe timeout, and default paths. `AppConfig` is the root configuration
//! struct containing all settings.

use std::convert::Infallible;
use std::str::FromStr;
use std::time::Duration;

use envconfig::Envconfig;

// =============================================================================
// Variant Rendering
// =============================================================================

/// Variant label served without banner rendering (original bytes pass through)
pub const PASSTHROUGH_VARIANT: &str = "v1";

// =============================================================================
// Health Toggle
// =============================================================================

/// Reason applied by `POST /health/fail` when no reason field is supplied
pub const DEFAULT_FAIL_REASON: &str = "manual";

/// Reason recorded when a failure is forced with an empty reason string
pub const FALLBACK_FAIL_REASON: &str = "forced-failure";

// =============================================================================
// Database Probe
// =============================================================================

/// Bounded connect timeout for the one-shot startup probe
pub const DB_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// CPU Load Demo
// =============================================================================

/// Default upper bound for the prime-counting endpoint
pub const DEFAULT_HEAVY_LIMIT: i64 = 90_000;

// =============================================================================
// Defaults
// =============================================================================

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "showroom=info,tower_http=info";

/// Directory of demo pages served when CONTENT_ROOT is not set
pub const DEFAULT_CONTENT_ROOT: &str = "web-pages";

/// Boolean-ish environment toggle.
///
/// Accepts "1", "true", or "yes" (case-insensitive) as enabled; any other
/// value, including the empty string, is disabled. Parsing never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flag(pub bool);

impl Flag {
    pub fn enabled(self) -> bool {
        self.0
    }
}

impl FromStr for Flag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let enabled = matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes"
        );
        Ok(Flag(enabled))
    }
}

#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Deployment variant label shown in the injected banner
    #[envconfig(from = "APP_VARIANT", default = "v3")]
    pub variant: String,

    /// Listen port (host is fixed to 0.0.0.0 for container use)
    #[envconfig(from = "PORT", default = "8080")]
    pub port: u16,

    /// Directory of served demo files
    #[envconfig(from = "CONTENT_ROOT", default = "web-pages")]
    pub content_root: String,

    /// Unconditional sleep before the database probe, in seconds
    #[envconfig(from = "STARTUP_DELAY", default = "0")]
    pub startup_delay_secs: u64,

    /// Whether a missing or failed database connection aborts startup
    #[envconfig(from = "DB_REQUIRED", default = "false")]
    pub db_required: Flag,

    #[envconfig(from = "DB_USER")]
    pub db_user: Option<String>,

    #[envconfig(from = "DB_PASSWORD")]
    pub db_password: Option<String>,

    #[envconfig(from = "DB_HOST")]
    pub db_host: Option<String>,

    #[envconfig(from = "DB_PORT")]
    pub db_port: Option<String>,

    #[envconfig(from = "DB_NAME")]
    pub db_name: Option<String>,

    /// Per-request logging middleware toggle
    #[envconfig(from = "REQUEST_LOGGING", default = "false")]
    pub request_logging: Flag,

    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[envconfig(from = "LOG_FORMAT", default = "text")]
    pub log_format: String,
}
