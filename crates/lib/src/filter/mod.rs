//! Fileset metadata filters.
//!
//! A filter says how ownership, timestamps and special mode bits are treated when a
//! fileset is packed into a ware ([`PackFilter`]) or unpacked from one ([`UnpackFilter`]).
//! Every one of the six fields (uid, gid, mtime, sticky, setid, dev) may be left
//! unspecified; [`PackFilter::apply`] layers a partial filter over a fully specified
//! preset, and only complete filters are usable for execution.
//!
//! The canonical string form is a comma-joined `key=value` list with unspecified keys
//! omitted, always in the order uid, gid, mtime, sticky, setid, dev.

mod fields;
mod pack;
mod unpack;

pub use fields::*;
pub use pack::*;
pub use unpack::*;

use thiserror::Error;

/// Default mtime applied by flattening filters: 2010-01-01T00:00:00Z.
pub const DEFAULT_MTIME: i64 = 1_262_304_000;

/// Keys in canonical order.
pub const FILTER_KEYS: [&str; 6] = ["uid", "gid", "mtime", "sticky", "setid", "dev"];

/// Error parsing a filter string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
  #[error("fileset filter: invalid format: {pair:?} is not a k=v pair")]
  Malformed { pair: String },

  #[error("fileset filter: unknown option: {key:?} is not recognized")]
  UnknownOption { key: String },

  #[error("fileset filter: cannot specify the same option repeatedly: {key}")]
  Duplicate { key: &'static str },

  #[error("fileset filter: invalid option: {key} must be {expected} (got {value:?})")]
  InvalidValue {
    key: &'static str,
    expected: &'static str,
    value: String,
  },

  #[error("no {kind} filter preset named {name:?}")]
  UnknownPreset { kind: &'static str, name: String },
}

/// One field of a filter.
///
/// `Default` is the unspecified state. Parsing never produces it.
pub trait FilterField: Copy + Default + PartialEq + std::fmt::Display {
  /// Human description of the accepted values, used in error messages.
  const EXPECTED: &'static str;

  fn parse_value(s: &str) -> Option<Self>;

  fn is_specified(&self) -> bool {
    *self != Self::default()
  }

  /// This value if specified, otherwise `fallback`.
  fn or(self, fallback: Self) -> Self {
    if self.is_specified() { self } else { fallback }
  }
}

/// Split a filter string into trimmed `(key, value)` pairs.
fn pairs(s: &str) -> impl Iterator<Item = Result<(&str, &str), FilterError>> {
  let s = if s.is_empty() { None } else { Some(s) };
  s.into_iter().flat_map(|s| s.split(',')).map(|pair| {
    pair.trim().split_once('=').ok_or_else(|| FilterError::Malformed {
      pair: pair.trim().to_string(),
    })
  })
}

/// Parse `value` into `slot`, rejecting a second assignment to the same key.
fn set_field<F: FilterField>(slot: &mut F, key: &'static str, value: &str) -> Result<(), FilterError> {
  if slot.is_specified() {
    return Err(FilterError::Duplicate { key });
  }
  *slot = F::parse_value(value).ok_or_else(|| FilterError::InvalidValue {
    key,
    expected: F::EXPECTED,
    value: value.to_string(),
  })?;
  Ok(())
}

/// Join the specified fields as `key=value`, in canonical order.
fn join_fields(values: [Option<String>; 6]) -> String {
  FILTER_KEYS
    .into_iter()
    .zip(values)
    .filter_map(|(key, value)| value.map(|v| format!("{}={}", key, v)))
    .collect::<Vec<_>>()
    .join(",")
}

fn specified<F: FilterField>(field: F) -> Option<String> {
  field.is_specified().then(|| field.to_string())
}
