//! Adaptive iteration-count calibration.
//!
//! Searches for an iteration count whose measured derivation time lands
//! within a tolerance band around a target duration on the current hardware.

use crate::config::Config;
use crate::crypto::{derive_key, random_bytes};
use crate::error::Error;
use base64::prelude::*;
use std::time::{Duration, Instant};

/// Upper bound on measurement attempts before calibration gives up.
pub(crate) const MAX_ATTEMPTS: u32 = 32;

/// Floor for a measured duration, so the scaling ratio stays bounded when a
/// trial finishes faster than the clock resolution.
const MIN_MEASURED: Duration = Duration::from_micros(50);

pub(crate) fn find_optimal_iterations(
    config: &Config,
    target: Duration,
    tolerance: f64,
    probe: Option<&str>,
) -> Result<u32, Error> {
    if target.is_zero() {
        return Err(Error::InvalidConfiguration(
            "target duration must be positive".into(),
        ));
    }
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(Error::InvalidConfiguration(
            "tolerance must be a positive fraction".into(),
        ));
    }

    let generated;
    let probe = match probe {
        Some(p) => p,
        None => {
            generated = BASE64_STANDARD.encode(random_bytes(16)?);
            &generated
        }
    };

    let salt = random_bytes(config.salt_size())?;

    // The trial count is a local value; the owning instance is never touched.
    // Callers apply the returned count explicitly.
    let mut trial = config.default_iterations();

    // One untimed warm-up so one-time setup costs don't skew the first sample.
    derive_key(probe, &salt, trial, config.key_length(), config.digest())?;

    let target_secs = target.as_secs_f64();
    for _ in 0..MAX_ATTEMPTS {
        let start = Instant::now();
        derive_key(probe, &salt, trial, config.key_length(), config.digest())?;
        let measured = start.elapsed();

        if (measured.as_secs_f64() - target_secs).abs() <= target_secs * tolerance {
            return Ok(trial);
        }

        let ratio = measured.max(MIN_MEASURED).as_secs_f64() / target_secs;
        let next = (trial as f64 / ratio).round() as u32;
        if next == 0 {
            return Err(Error::CalibrationInfeasible(
                "target duration is out of reach for this hardware".into(),
            ));
        }
        trial = next;
    }

    Err(Error::CalibrationInfeasible(format!(
        "no stable iteration count after {MAX_ATTEMPTS} attempts"
    )))
}
