mod calibrate;
mod config;
mod crypto;
mod error;
mod fingerprint;
mod salt;
mod verify;

pub use crate::config::Config;
pub use crate::crypto::Digest;
pub use crate::error::Error;
pub use crate::salt::OpaqueSalt;

use base64::prelude::*;
use serde::Serialize;
use std::time::Duration;

/// A password hasher with a fixed configuration.
///
/// Salts produced by one instance are self-describing, so any instance can
/// verify hashes made by another, including instances configured with
/// different iteration counts, digests or key lengths.
pub struct Saltbox {
    config: Config,
}

impl Default for Saltbox {
    fn default() -> Self {
        Self {
            config: Config::default(),
        }
    }
}

impl Saltbox {
    pub fn new(config: Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fast fingerprint hash of a serializable value.
    ///
    /// For cache keys and deduplication only, never for secrets.
    pub fn weak_hash<T: Serialize>(&self, value: Option<&T>) -> Result<String, Error> {
        fingerprint::weak_hash(value)
    }

    /// Returns `n` cryptographically strong random bytes.
    pub fn random_bytes(&self, n: usize) -> Result<Vec<u8>, Error> {
        crypto::random_bytes(n)
    }

    /// Generates a fresh opaque salt.
    ///
    /// An explicit `iterations` override may strengthen but never weaken the
    /// instance default; lower values are rejected.
    pub fn generate_salt(&self, iterations: Option<u32>) -> Result<OpaqueSalt, Error> {
        let iterations = match iterations {
            Some(n) if n < self.config.default_iterations() => {
                return Err(Error::InvalidConfiguration(format!(
                    "iteration override {} is below the instance minimum {}",
                    n,
                    self.config.default_iterations()
                )));
            }
            Some(n) => n,
            None => self.config.default_iterations(),
        };

        let bytes = crypto::random_bytes(self.config.salt_size())?;
        Ok(salt::encode(iterations, self.config.digest(), &bytes))
    }

    /// Hashes `secret` under a freshly generated salt.
    ///
    /// Returns the derived hash together with the salt so the caller can
    /// persist both.
    pub fn hash(&self, secret: &str) -> Result<(String, OpaqueSalt), Error> {
        let salt = self.generate_salt(None)?;
        let hash = self.hash_with_salt(secret, &salt)?;
        Ok((hash, salt))
    }

    /// Hashes `secret` under a known salt, reproducing a prior derivation
    /// byte for byte.
    pub fn hash_with_salt(&self, secret: &str, salt: &OpaqueSalt) -> Result<String, Error> {
        self.check_secret(secret)?;

        let params = salt::decode(salt)?;
        crypto::derive_key(
            secret,
            &params.salt,
            params.iterations,
            self.config.key_length(),
            params.digest,
        )
    }

    /// Checks `secret` against a stored hash and its salt.
    ///
    /// A mismatched secret is a normal `Ok(false)`; only malformed inputs and
    /// derivation failures are errors. The expected key length is inferred
    /// from the stored hash, so hashes created under a different `key_length`
    /// than ours still verify. Comparison is constant-time over the textual
    /// encodings.
    pub fn verify(&self, salt: &OpaqueSalt, prior_hash: &str, secret: &str) -> Result<bool, Error> {
        if prior_hash.is_empty() {
            return Err(Error::InvalidHashInput("prior hash is empty".into()));
        }
        let decoded = BASE64_STANDARD
            .decode(prior_hash)
            .map_err(|_| Error::InvalidHashInput("prior hash is not valid base64".into()))?;
        if decoded.is_empty() {
            return Err(Error::InvalidHashInput("prior hash decodes to nothing".into()));
        }

        self.check_secret(secret)?;

        let params = salt::decode(salt)?;
        let candidate = crypto::derive_key(
            secret,
            &params.salt,
            params.iterations,
            decoded.len(),
            params.digest,
        )?;

        Ok(verify::constant_time_eq(&candidate, prior_hash))
    }

    /// Searches for an iteration count whose measured derivation time lands
    /// within `target ± target·tolerance` on this hardware.
    ///
    /// The search works on a local trial value and never modifies the
    /// instance; apply the result explicitly, e.g. by building a new
    /// [`Config`] around it. When `probe` is omitted a random probe secret is
    /// drawn.
    pub fn find_optimal_iterations(
        &self,
        target: Duration,
        tolerance: f64,
        probe: Option<&str>,
    ) -> Result<u32, Error> {
        calibrate::find_optimal_iterations(&self.config, target, tolerance, probe)
    }

    fn check_secret(&self, secret: &str) -> Result<(), Error> {
        if secret.is_empty() {
            return Err(Error::InvalidSecret("secret must not be empty".into()));
        }
        if let Some(max) = self.config.max_secret_length() {
            if secret.len() > max {
                return Err(Error::InvalidSecret(format!(
                    "secret exceeds maximum length of {max}"
                )));
            }
        }
        Ok(())
    }
}
