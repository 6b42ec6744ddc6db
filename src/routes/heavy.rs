//! CPU-load demo endpoint.
//!
//! Counts primes below a caller-supplied limit with deliberately naive
//! trial division, for driving autoscaling and resource-limit demos. The
//! work runs on a blocking worker thread so the async runtime keeps
//! serving probes while a load test is in flight.

use std::time::Instant;

use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::DEFAULT_HEAVY_LIMIT;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct HeavyParams {
    limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HeavyReport {
    limit: i64,
    prime_count: u64,
    duration_seconds: f64,
}

/// Prime-counting handler, e.g. `/heavy?limit=50000`.
///
/// A malformed limit yields 400 with a JSON error body; limits below 2
/// simply count zero primes.
#[instrument(name = "heavy::heavy")]
pub async fn heavy(Query(params): Query<HeavyParams>) -> Result<Json<HeavyReport>, AppError> {
    let limit = match params.limit.as_deref() {
        None => DEFAULT_HEAVY_LIMIT,
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::InvalidParameter("Invalid limit parameter".to_string()))?,
    };

    let start = Instant::now();
    let prime_count = tokio::task::spawn_blocking(move || count_primes(limit))
        .await
        .map_err(|err| AppError::Internal(format!("prime counter panicked: {err}")))?;

    Ok(Json(HeavyReport {
        limit,
        prime_count,
        duration_seconds: start.elapsed().as_secs_f64(),
    }))
}

/// Deliberately unoptimized trial-division primality check.
fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let ceiling = (n as f64).sqrt() as i64;
    (2..=ceiling).all(|i| n % i != 0)
}

/// Counts primes in `[2, limit)`.
fn count_primes(limit: i64) -> u64 {
    (2..limit).filter(|&n| is_prime(n)).count() as u64
}
