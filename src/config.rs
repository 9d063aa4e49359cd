use crate::crypto::{DEFAULT_ITERATIONS, DEFAULT_KEY_LEN, DEFAULT_SALT_LEN, Digest, MIN_SALT_LEN};
use crate::error::Error;

/// Derivation parameters for a hasher instance.
///
/// Constructed once and immutable afterwards. `max_secret_length` caps the
/// UTF-8 byte length of secrets; `None` disables the cap.
#[derive(Debug, Clone)]
pub struct Config {
    default_iterations: u32,
    digest: Digest,
    salt_size: usize,
    key_length: usize,
    max_secret_length: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_iterations: DEFAULT_ITERATIONS,
            digest: Digest::default(),
            salt_size: DEFAULT_SALT_LEN,
            key_length: DEFAULT_KEY_LEN,
            max_secret_length: None,
        }
    }
}

impl Config {
    pub fn new(
        default_iterations: u32,
        digest: Digest,
        salt_size: usize,
        key_length: usize,
        max_secret_length: Option<usize>,
    ) -> Result<Self, Error> {
        let config = Self {
            default_iterations,
            digest,
            salt_size,
            key_length,
            max_secret_length,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn default_iterations(&self) -> u32 {
        self.default_iterations
    }

    pub fn digest(&self) -> Digest {
        self.digest
    }

    pub fn salt_size(&self) -> usize {
        self.salt_size
    }

    pub fn key_length(&self) -> usize {
        self.key_length
    }

    pub fn max_secret_length(&self) -> Option<usize> {
        self.max_secret_length
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.default_iterations < 1 {
            return Err(Error::InvalidConfiguration(
                "iteration count must be >= 1".into(),
            ));
        }
        if self.salt_size < MIN_SALT_LEN {
            return Err(Error::InvalidConfiguration(format!(
                "salt size must be at least {MIN_SALT_LEN} bytes"
            )));
        }
        if self.key_length < 1 {
            return Err(Error::InvalidConfiguration(
                "key length must be >= 1".into(),
            ));
        }
        if self.max_secret_length == Some(0) {
            return Err(Error::InvalidConfiguration(
                "maximum secret length must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn zero_iterations_fail() {
        assert!(Config::new(0, Digest::Sha256, 32, 32, None).is_err());
    }

    #[test]
    fn undersized_salt_fails() {
        assert!(Config::new(1000, Digest::Sha256, 8, 32, None).is_err());
    }

    #[test]
    fn zero_key_length_fails() {
        assert!(Config::new(1000, Digest::Sha256, 32, 0, None).is_err());
    }

    #[test]
    fn zero_max_secret_length_fails() {
        assert!(Config::new(1000, Digest::Sha256, 32, 32, Some(0)).is_err());
    }
}
