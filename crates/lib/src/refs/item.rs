use std::fmt;
use std::str::FromStr;

use super::{ItemName, ModuleName, ParseError, ReleaseName};
use crate::util::serde_str::string_serde;

/// Address of one item of one release in a module's catalog.
///
/// Canonical form is `module:release:item`, with trailing empty parts omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemRef {
  pub module_name: ModuleName,
  pub release_name: ReleaseName,
  pub item_name: ItemName,
}

impl ItemRef {
  pub fn new(
    module_name: impl Into<ModuleName>,
    release_name: impl Into<ReleaseName>,
    item_name: impl Into<ItemName>,
  ) -> Self {
    Self {
      module_name: module_name.into(),
      release_name: release_name.into(),
      item_name: item_name.into(),
    }
  }
}

impl fmt::Display for ItemRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.module_name.is_empty() {
      Ok(())
    } else if self.release_name.is_empty() {
      f.write_str(&self.module_name)
    } else if self.item_name.is_empty() {
      write!(f, "{}:{}", self.module_name, self.release_name)
    } else {
      write!(f, "{}:{}:{}", self.module_name, self.release_name, self.item_name)
    }
  }
}

impl FromStr for ItemRef {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let parts: Vec<&str> = s.split(':').collect();
    match parts.as_slice() {
      [module] => Ok(Self::new(*module, "", "")),
      [module, release] => Ok(Self::new(*module, *release, "")),
      [module, release, item] => Ok(Self::new(*module, *release, *item)),
      _ => Err(ParseError::ItemRef { input: s.to_string() }),
    }
  }
}

string_serde!(ItemRef);
