//! Canonical hashing for content-addressed formulas.
//!
//! This module provides:
//! - `SetupHash`: the memoization key of a formula
//! - `Hashable`: hashes any serializable value through its canonical JSON form
//!
//! The canonical form is `serde_json`'s compact encoding. Struct fields come out in
//! declaration order and every map in a hashed type is a `BTreeMap`, so semantically
//! equal values always produce identical bytes.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha384};

pub type HashError = serde_json::Error;

/// Base58-encoded SHA-384 of a value's canonical serialization.
///
/// # Format
///
/// A base58 string (Bitcoin alphabet), e.g. `"5Jk8...hWq"`, roughly 65 characters long.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SetupHash(pub String);

impl std::fmt::Display for SetupHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

pub trait Hashable: Serialize {
  /// The canonical bytes that get hashed.
  fn canonical_bytes(&self) -> Result<Vec<u8>, HashError> {
    serde_json::to_vec(self)
  }

  fn setup_hash(&self) -> Result<SetupHash, HashError> {
    let serialized = self.canonical_bytes()?;
    let mut hasher = Sha384::new();
    hasher.update(&serialized);
    Ok(SetupHash(bs58::encode(hasher.finalize()).into_string()))
  }
}
