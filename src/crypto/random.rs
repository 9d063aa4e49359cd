use crate::error::Error;
use getrandom::fill;

/// Fill buffer with cryptographically secure random bytes
pub fn secure_random(buf: &mut [u8]) -> Result<(), Error> {
    fill(buf).map_err(|_| Error::Entropy)
}

/// Returns `n` cryptographically secure random bytes.
///
/// Fails with [`Error::Entropy`] if the OS entropy source is unavailable.
/// There is no non-cryptographic fallback.
pub fn random_bytes(n: usize) -> Result<Vec<u8>, Error> {
    let mut buf = vec![0u8; n];
    secure_random(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_bytes_returns_requested_length() {
        let bytes = random_bytes(10).unwrap();
        assert_eq!(bytes.len(), 10);
    }

    #[test]
    fn consecutive_draws_differ() {
        let a = random_bytes(32).unwrap();
        let b = random_bytes(32).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn zero_length_draw_works() {
        let bytes = random_bytes(0).unwrap();
        assert!(bytes.is_empty());
    }
}
