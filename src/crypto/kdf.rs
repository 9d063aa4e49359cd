use crate::error::Error;
use base64::prelude::*;
use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use std::fmt;
use std::str::FromStr;

/// Digest algorithm backing the PBKDF2 pseudorandom function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Digest {
    Sha1,
    Sha256,
    Sha512,
}

impl Digest {
    /// Digest implied by salts created before the digest field was embedded.
    pub const LEGACY: Digest = Digest::Sha1;

    pub fn name(&self) -> &'static str {
        match self {
            Digest::Sha1 => "sha1",
            Digest::Sha256 => "sha256",
            Digest::Sha512 => "sha512",
        }
    }
}

impl Default for Digest {
    fn default() -> Self {
        Digest::Sha256
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "sha1" => Ok(Digest::Sha1),
            "sha256" => Ok(Digest::Sha256),
            "sha512" => Ok(Digest::Sha512),
            _ => Err(Error::InvalidConfiguration(format!(
                "unsupported digest '{s}'"
            ))),
        }
    }
}

/// Derives `key_length` bytes from `secret` via PBKDF2-HMAC and returns them
/// base64 encoded.
///
/// Deterministic for identical inputs; cost grows with `iterations`.
pub fn derive_key(
    secret: &str,
    salt: &[u8],
    iterations: u32,
    key_length: usize,
    digest: Digest,
) -> Result<String, Error> {
    if iterations == 0 {
        return Err(Error::Derivation("iteration count must be non-zero".into()));
    }
    if key_length == 0 {
        return Err(Error::Derivation("key length must be non-zero".into()));
    }

    let mut key = vec![0u8; key_length];
    match digest {
        Digest::Sha1 => pbkdf2_hmac::<Sha1>(secret.as_bytes(), salt, iterations, &mut key),
        Digest::Sha256 => pbkdf2_hmac::<Sha256>(secret.as_bytes(), salt, iterations, &mut key),
        Digest::Sha512 => pbkdf2_hmac::<Sha512>(secret.as_bytes(), salt, iterations, &mut key),
    }

    Ok(BASE64_STANDARD.encode(&key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let k1 = derive_key("password", b"0123456789abcdef", 1000, 32, Digest::Sha256).unwrap();
        let k2 = derive_key("password", b"0123456789abcdef", 1000, 32, Digest::Sha256).unwrap();

        assert_eq!(k1, k2);
    }

    #[test]
    fn digest_affects_output() {
        let salt = b"0123456789abcdef";

        let k1 = derive_key("pw", salt, 100, 32, Digest::Sha256).unwrap();
        let k2 = derive_key("pw", salt, 100, 32, Digest::Sha512).unwrap();

        assert_ne!(k1, k2);
    }

    #[test]
    fn iterations_affect_output() {
        let salt = b"0123456789abcdef";

        let k1 = derive_key("pw", salt, 100, 32, Digest::Sha256).unwrap();
        let k2 = derive_key("pw", salt, 101, 32, Digest::Sha256).unwrap();

        assert_ne!(k1, k2);
    }

    // RFC 6070 test vector for PBKDF2-HMAC-SHA1.
    #[test]
    fn sha1_known_answer() {
        let key = derive_key("password", b"salt", 4096, 20, Digest::Sha1).unwrap();
        assert_eq!(key, "SwB5AbdlSJq+rUnZJvch0GWkKcE=");
    }

    #[test]
    fn sha256_known_answer() {
        let key = derive_key("password", b"salt", 10_000, 32, Digest::Sha256).unwrap();
        assert_eq!(key, "XsArkaS1nG9Z3V++TKZJ7OT6hWjNuLo2z0FCbogFUis=");
    }

    #[test]
    fn sha512_known_answer() {
        let salt = BASE64_STANDARD.decode("Ig35AsUoPr8=").unwrap();
        let key = derive_key("aPQ8jMpc", &salt, 50, 16, Digest::Sha512).unwrap();
        assert_eq!(key, "ZdPyXwhKywPAihNOjJtQqg==");
    }

    #[test]
    fn zero_iterations_fail() {
        assert!(derive_key("pw", b"salt", 0, 32, Digest::Sha256).is_err());
    }

    #[test]
    fn zero_key_length_fails() {
        assert!(derive_key("pw", b"salt", 100, 0, Digest::Sha256).is_err());
    }

    #[test]
    fn digest_names_roundtrip() {
        for digest in [Digest::Sha1, Digest::Sha256, Digest::Sha512] {
            assert_eq!(digest.name().parse::<Digest>().unwrap(), digest);
        }
    }

    #[test]
    fn unknown_digest_name_fails() {
        assert!("md5".parse::<Digest>().is_err());
    }
}
