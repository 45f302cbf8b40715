//! Where wares can be fetched from and saved to.
//!
//! [`WareSourcing`] suggests locations for reading wares, indexed three ways: by
//! exact ware ID, by module name and pack type, or by pack type alone. Only
//! content-addressable warehouses make sense in the broader indexes, since they
//! are offered for more than one ware.
//!
//! [`WareStaging`] names a single write location per pack type for outputs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::refs::{ModuleName, PackType, WareId};

/// URL-like address of a warehouse, such as `ca+file:///srv/wares`.
pub type WarehouseLocation = String;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WareSourcing {
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub by_pack_type: BTreeMap<PackType, Vec<WarehouseLocation>>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub by_module: BTreeMap<ModuleName, BTreeMap<PackType, Vec<WarehouseLocation>>>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub by_ware: BTreeMap<WareId, Vec<WarehouseLocation>>,
}

impl WareSourcing {
  pub fn is_empty(&self) -> bool {
    self.by_pack_type.is_empty() && self.by_module.is_empty() && self.by_ware.is_empty()
  }

  /// Merge every index of `other` into this one. Locations are appended in order.
  pub fn append(&mut self, other: WareSourcing) {
    for (pack_type, locations) in other.by_pack_type {
      self.append_by_pack_type(pack_type, locations);
    }
    for (module, by_pack_type) in other.by_module {
      for (pack_type, locations) in by_pack_type {
        self.append_by_module(module.clone(), pack_type, locations);
      }
    }
    for (ware, locations) in other.by_ware {
      self.append_by_ware(ware, locations);
    }
  }

  pub fn append_by_pack_type(
    &mut self,
    pack_type: impl Into<PackType>,
    locations: impl IntoIterator<Item = WarehouseLocation>,
  ) {
    self.by_pack_type.entry(pack_type.into()).or_default().extend(locations);
  }

  pub fn append_by_module(
    &mut self,
    module: impl Into<ModuleName>,
    pack_type: impl Into<PackType>,
    locations: impl IntoIterator<Item = WarehouseLocation>,
  ) {
    self
      .by_module
      .entry(module.into())
      .or_default()
      .entry(pack_type.into())
      .or_default()
      .extend(locations);
  }

  pub fn append_by_ware(&mut self, ware: WareId, locations: impl IntoIterator<Item = WarehouseLocation>) {
    self.by_ware.entry(ware).or_default().extend(locations);
  }

  /// Narrow this sourcing to one ware published by `module`.
  ///
  /// The result carries only a `by_ware` entry for `ware`, listing exact matches first,
  /// then locations for the module and pack type, then locations for the pack type.
  pub fn pivot_to_module_ware(&self, ware: &WareId, module: &str) -> WareSourcing {
    let mut locations: Vec<WarehouseLocation> = self.by_ware.get(ware).cloned().unwrap_or_default();
    if let Some(by_pack_type) = self.by_module.get(module) {
      locations.extend(by_pack_type.get(&ware.pack_type).into_iter().flatten().cloned());
    }
    locations.extend(self.by_pack_type.get(&ware.pack_type).into_iter().flatten().cloned());

    let mut pivoted = WareSourcing::default();
    if !locations.is_empty() {
      pivoted.append_by_ware(ware.clone(), locations);
    }
    pivoted
  }

  /// Candidate locations for `ware`: exact matches, then its pack type.
  ///
  /// Module-indexed entries are ignored here; narrow them with
  /// [`pivot_to_module_ware`](Self::pivot_to_module_ware) while the module is known.
  pub fn pivot_to_ware(&self, ware: &WareId) -> Vec<WarehouseLocation> {
    self
      .by_ware
      .get(ware)
      .into_iter()
      .flatten()
      .chain(self.by_pack_type.get(&ware.pack_type).into_iter().flatten())
      .cloned()
      .collect()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WareStaging {
  #[serde(default)]
  pub by_pack_type: BTreeMap<PackType, WarehouseLocation>,
}

impl WareStaging {
  pub fn for_pack_type(&self, pack_type: &str) -> Option<&WarehouseLocation> {
    self.by_pack_type.get(pack_type)
  }
}
