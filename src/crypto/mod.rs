//! Cryptographic primitives for password hashing.
//!
//! Provides PBKDF2 key derivation, digest selection, and the CSPRNG wrapper.

pub mod kdf;
pub mod random;

pub use kdf::{Digest, derive_key};
pub use random::{random_bytes, secure_random};

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 100_000;
/// Default salt length (32 bytes).
pub const DEFAULT_SALT_LEN: usize = 32;
/// Minimum accepted salt length (16 bytes).
pub const MIN_SALT_LEN: usize = 16;
/// Default derived key length (32 bytes / 256 bits).
pub const DEFAULT_KEY_LEN: usize = 32;
