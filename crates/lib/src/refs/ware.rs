use std::fmt;
use std::str::FromStr;

use super::{PackType, ParseError};
use crate::util::serde_str::string_serde;

/// Content identity of a packed fileset.
///
/// The pack type never contains `:`; the hash may.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WareId {
  pub pack_type: PackType,
  pub hash: String,
}

impl WareId {
  pub fn new(pack_type: impl Into<PackType>, hash: impl Into<String>) -> Self {
    Self {
      pack_type: pack_type.into(),
      hash: hash.into(),
    }
  }

  pub fn is_zero(&self) -> bool {
    self.pack_type.is_empty() && self.hash.is_empty()
  }
}

impl fmt::Display for WareId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.pack_type.is_empty() {
      Ok(())
    } else if self.hash.is_empty() {
      write!(f, "{}:-", self.pack_type)
    } else {
      write!(f, "{}:{}", self.pack_type, self.hash)
    }
  }
}

impl FromStr for WareId {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.is_empty() {
      return Ok(Self::default());
    }
    let err = |reason| ParseError::WareId {
      input: s.to_string(),
      reason,
    };
    let (pack_type, hash) = s.split_once(':').ok_or_else(|| err("expected the form 'type:hash'"))?;
    if pack_type.is_empty() {
      return Err(err("pack type must not be empty"));
    }
    let hash = if hash == "-" { "" } else { hash };
    Ok(Self::new(pack_type, hash))
  }
}

string_serde!(WareId);
