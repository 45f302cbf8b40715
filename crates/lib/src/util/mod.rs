//! Shared utilities.
//!
//! Common utilities used across the crate including hashing, string serialization,
//! and test helpers.

pub mod hash;
pub(crate) mod serde_str;

#[cfg(test)]
pub mod testutil;
