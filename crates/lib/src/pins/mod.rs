//! Resolving module imports to concrete ware IDs.
//!
//! [`resolve_pins`] walks a module tree, asks the catalog and ingest collaborators for
//! the ware behind each import, and returns one flat [`Pins`] map keyed by
//! `(submodule path, slot)`. Parent imports are left unresolved: they are filled from the
//! enclosing module's step results at run time.

mod resolve;

pub use resolve::*;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::refs::{SlotRef, SubmoduleRef, SubmoduleSlotRef, WareId};

/// Resolved wares for every import slot in a module tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pins(BTreeMap<SubmoduleSlotRef, WareId>);

impl Pins {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn get(&self, key: &SubmoduleSlotRef) -> Option<&WareId> {
    self.0.get(key)
  }

  pub fn insert(&mut self, key: SubmoduleSlotRef, ware: WareId) -> Option<WareId> {
    self.0.insert(key, ware)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&SubmoduleSlotRef, &WareId)> {
    self.0.iter()
  }

  /// Fold a submodule's pins into this map, prefixing each key with `step`.
  pub fn append_subtree(&mut self, step: &str, child: Pins) {
    for (key, ware) in child.0 {
      self.0.insert(key.contextualize(step), ware);
    }
  }

  /// The pins belonging under `step`, re-rooted at that submodule.
  pub fn detach_subtree(&self, step: &str) -> Pins {
    Pins(
      self
        .0
        .iter()
        .filter(|(key, _)| key.first() == step)
        .map(|(key, ware)| (key.decontextualize(), ware.clone()))
        .collect(),
    )
  }

  /// The pins visible inside exactly one module scope, keyed by local slot reference.
  pub fn scope(&self, submodule: &SubmoduleRef) -> BTreeMap<SlotRef, WareId> {
    self
      .0
      .iter()
      .filter(|(key, _)| &key.submodule_ref == submodule)
      .map(|(key, ware)| (key.slot_ref.clone(), ware.clone()))
      .collect()
  }
}

impl FromIterator<(SubmoduleSlotRef, WareId)> for Pins {
  fn from_iter<I: IntoIterator<Item = (SubmoduleSlotRef, WareId)>>(iter: I) -> Self {
    Pins(iter.into_iter().collect())
  }
}

impl IntoIterator for Pins {
  type Item = (SubmoduleSlotRef, WareId);
  type IntoIter = std::collections::btree_map::IntoIter<SubmoduleSlotRef, WareId>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.into_iter()
  }
}
