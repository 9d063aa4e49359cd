//! Opaque salt encoding.
//!
//! Wire format:
//! ```text
//! <hex-iterations> "." [<digest> "."] <base64-salt>
//! ```
//!
//! The format is append-only: new fields extend the grammar, existing fields
//! never move. Salts created before the digest field was embedded carry
//! exactly one delimiter and decode with [`Digest::LEGACY`].

use crate::crypto::kdf::Digest;
use crate::error::Error;
use base64::prelude::*;
use std::fmt;
use std::str::FromStr;

/// A self-describing salt token.
///
/// Bundles the iteration count, digest name and raw salt bytes into one
/// opaque string so a prior derivation can be reproduced from the token
/// alone. Callers treat the token as a capability and never take it apart;
/// all parsing lives in this module, which keeps the format free to evolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueSalt(String);

impl OpaqueSalt {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OpaqueSalt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for OpaqueSalt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let salt = OpaqueSalt(s.to_string());
        decode(&salt)?;
        Ok(salt)
    }
}

/// Parameters recovered from an [`OpaqueSalt`].
pub(crate) struct SaltParams {
    pub iterations: u32,
    pub digest: Digest,
    pub salt: Vec<u8>,
}

pub(crate) fn encode(iterations: u32, digest: Digest, salt: &[u8]) -> OpaqueSalt {
    OpaqueSalt(format!(
        "{:x}.{}.{}",
        iterations,
        digest,
        BASE64_STANDARD.encode(salt)
    ))
}

pub(crate) fn decode(salt: &OpaqueSalt) -> Result<SaltParams, Error> {
    let (head, rest) = salt
        .0
        .split_once('.')
        .ok_or_else(|| Error::MalformedSalt("missing delimiter".into()))?;

    let iterations = u32::from_str_radix(head, 16)
        .map_err(|_| Error::MalformedSalt(format!("invalid iteration field '{head}'")))?;
    if iterations == 0 {
        return Err(Error::MalformedSalt("iteration count must be non-zero".into()));
    }

    let (digest, payload) = match rest.split_once('.') {
        Some((name, payload)) => {
            let digest = name
                .parse()
                .map_err(|_| Error::MalformedSalt(format!("unrecognized digest '{name}'")))?;
            (digest, payload)
        }
        None => (Digest::LEGACY, rest),
    };

    let bytes = BASE64_STANDARD
        .decode(payload)
        .map_err(|_| Error::MalformedSalt("invalid base64 salt payload".into()))?;
    if bytes.is_empty() {
        return Err(Error::MalformedSalt("empty salt payload".into()));
    }

    Ok(SaltParams {
        iterations,
        digest,
        salt: bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        for digest in [Digest::Sha1, Digest::Sha256, Digest::Sha512] {
            let salt = encode(5024, digest, b"0123456789abcdef");
            let params = decode(&salt).unwrap();

            assert_eq!(params.iterations, 5024);
            assert_eq!(params.digest, digest);
            assert_eq!(params.salt, b"0123456789abcdef");
        }
    }

    #[test]
    fn encoded_form_matches_grammar() {
        let salt = encode(5024, Digest::Sha256, b"0123456789abcdef");
        let text = salt.as_str();

        assert!(text.starts_with("13a0.sha256."));
        assert_eq!(text.split('.').count(), 3);
    }

    #[test]
    fn legacy_salt_without_digest_decodes() {
        let legacy: OpaqueSalt = format!("13a0.{}", BASE64_STANDARD.encode(b"0123456789abcdef"))
            .parse()
            .unwrap();

        let params = decode(&legacy).unwrap();
        assert_eq!(params.iterations, 5024);
        assert_eq!(params.digest, Digest::LEGACY);
        assert_eq!(params.salt, b"0123456789abcdef");
    }

    #[test]
    fn uppercase_hex_is_accepted() {
        let salt: OpaqueSalt = format!("13A0.sha256.{}", BASE64_STANDARD.encode(b"0123456789abcdef"))
            .parse()
            .unwrap();

        assert_eq!(decode(&salt).unwrap().iterations, 5024);
    }

    #[test]
    fn missing_delimiter_fails() {
        assert!("no delimiter here".parse::<OpaqueSalt>().is_err());
        assert!("".parse::<OpaqueSalt>().is_err());
    }

    #[test]
    fn non_hex_iterations_fail() {
        assert!("zz.QUJDREVGR0g=".parse::<OpaqueSalt>().is_err());
        assert!(".QUJDREVGR0g=".parse::<OpaqueSalt>().is_err());
    }

    #[test]
    fn zero_iterations_fail() {
        assert!("0.sha256.QUJDREVGR0g=".parse::<OpaqueSalt>().is_err());
    }

    #[test]
    fn unrecognized_digest_fails() {
        let result = "13a0.md5.QUJDREVGR0g=".parse::<OpaqueSalt>();
        match result {
            Err(Error::MalformedSalt(msg)) => assert!(msg.contains("md5")),
            other => panic!("expected MalformedSalt, got: {other:?}"),
        }
    }

    #[test]
    fn invalid_base64_payload_fails() {
        assert!("13a0.sha256.!!!".parse::<OpaqueSalt>().is_err());
    }

    #[test]
    fn empty_payload_fails() {
        assert!("13a0.sha256.".parse::<OpaqueSalt>().is_err());
        assert!("13a0.".parse::<OpaqueSalt>().is_err());
    }

    #[test]
    fn display_preserves_wire_form() {
        let text = format!("13a0.sha512.{}", BASE64_STANDARD.encode(b"0123456789abcdef"));
        let salt: OpaqueSalt = text.parse().unwrap();

        assert_eq!(salt.to_string(), text);
    }
}
