use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::LookupError;
use crate::refs::{ItemName, ItemRef, ModuleName, ReleaseName, WareId};

/// Release history of one module, newest release first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineage {
  pub name: ModuleName,
  #[serde(default)]
  pub releases: Vec<Release>,
}

/// One tagged group of wares published by a module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
  pub name: ReleaseName,
  #[serde(default)]
  pub items: BTreeMap<ItemName, WareId>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub metadata: BTreeMap<String, String>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub hazards: BTreeMap<String, String>,
}

impl Release {
  pub fn new(name: impl Into<ReleaseName>) -> Self {
    Self {
      name: name.into(),
      ..Default::default()
    }
  }

  pub fn with_item(mut self, item: impl Into<ItemName>, ware: WareId) -> Self {
    self.items.insert(item.into(), ware);
    self
  }
}

impl Lineage {
  pub fn new(name: impl Into<ModuleName>) -> Self {
    Self {
      name: name.into(),
      releases: Vec::new(),
    }
  }

  pub fn pluck_release(&self, release: &str) -> Result<&Release, LookupError> {
    self
      .releases
      .iter()
      .find(|r| r.name == release)
      .ok_or_else(|| LookupError::NoSuchRelease {
        module: self.name.clone(),
        release: release.to_string(),
      })
  }

  pub fn pluck_item(&self, release: &str, item: &str) -> Result<&WareId, LookupError> {
    self
      .pluck_release(release)?
      .items
      .get(item)
      .ok_or_else(|| LookupError::NoSuchItem {
        item: ItemRef::new(self.name.clone(), release, item),
      })
  }

  /// A copy of this lineage with `release` as the newest entry.
  ///
  /// Release names are unique within a lineage.
  pub fn prepend_release(&self, release: Release) -> Result<Lineage, LookupError> {
    if self.releases.iter().any(|r| r.name == release.name) {
      return Err(LookupError::NameCollision {
        module: self.name.clone(),
        release: release.name,
      });
    }
    let mut releases = Vec::with_capacity(self.releases.len() + 1);
    releases.push(release);
    releases.extend(self.releases.iter().cloned());
    Ok(Lineage {
      name: self.name.clone(),
      releases,
    })
  }
}
