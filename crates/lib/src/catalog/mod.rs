//! Module catalogs: the release history of named modules.
//!
//! A [`Lineage`] is an ordered list of releases, newest first. Each release maps item
//! names to ware IDs. Catalog imports in a module graph resolve through
//! [`Lineage::pluck_item`].

mod name;
mod types;

pub use name::*;
pub use types::*;

use thiserror::Error;

use crate::refs::{ItemRef, ModuleName, ReleaseName};

/// Boxed error from a collaborator outside this crate.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failed lookups, kept distinct so callers can choose between creating and failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
  #[error("no such catalog '{module}'")]
  NoSuchCatalog { module: ModuleName },

  #[error("no such release '{release}' in catalog '{module}'")]
  NoSuchRelease { module: ModuleName, release: ReleaseName },

  #[error("no such item '{}' in release '{}:{}'", .item.item_name, .item.module_name, .item.release_name)]
  NoSuchItem { item: ItemRef },

  #[error("catalog '{module}' already has a release named '{release}'")]
  NameCollision { module: ModuleName, release: ReleaseName },
}

/// Errors reported by catalog and warehouse views.
#[derive(Debug, Error)]
pub enum CatalogError {
  #[error(transparent)]
  Lookup(#[from] LookupError),

  #[error("catalog view failed: {0}")]
  Other(#[source] BoxError),
}

impl CatalogError {
  pub fn is_no_such_catalog(&self) -> bool {
    matches!(self, CatalogError::Lookup(LookupError::NoSuchCatalog { .. }))
  }
}
