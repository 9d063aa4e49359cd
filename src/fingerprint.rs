use crate::error::Error;
use base64::prelude::*;
use serde::Serialize;
use sha1::{Digest as _, Sha1};

/// Collision-resistant fingerprint hash, relatively quick to compute.
///
/// Not suitable for passwords or sensitive information: no salt, no iteration
/// cost. The value is serialized to JSON before hashing; `None` hashes an
/// empty input. Identical serialized input always yields identical output.
pub fn weak_hash<T: Serialize>(value: Option<&T>) -> Result<String, Error> {
    let bytes = match value {
        Some(v) => serde_json::to_vec(v)
            .map_err(|e| Error::InvalidHashInput(format!("unserializable value: {e}")))?,
        None => Vec::new(),
    };

    let mut hasher = Sha1::new();
    hasher.update(&bytes);

    Ok(BASE64_STANDARD.encode(hasher.finalize()))
}
