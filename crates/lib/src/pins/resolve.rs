use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::Pins;
use crate::catalog::{BoxError, CatalogError, Lineage};
use crate::module::{Module, StepUnion};
use crate::refs::{ImportRef, ModuleName, SlotName, SlotRef, StepName, SubmoduleRef, SubmoduleSlotRef, WareId};
use crate::warehouse::WareSourcing;

/// Read access to module release histories.
#[async_trait]
pub trait CatalogView: Send + Sync {
  async fn view_catalog(&self, module: &str) -> Result<Lineage, CatalogError>;
}

/// Read access to warehouse hints published alongside a module's releases.
#[async_trait]
pub trait WarehouseView: Send + Sync {
  async fn view_warehouses(&self, module: &str) -> Result<WareSourcing, CatalogError>;
}

/// Brings out-of-band content (a git checkout, a local directory) into the ware world.
#[async_trait]
pub trait Ingestor: Send + Sync {
  async fn ingest(&self, kind: &str, args: &str) -> Result<(WareId, WareSourcing), IngestError>;
}

#[derive(Debug, Error)]
pub enum IngestError {
  #[error("unsupported ingest kind '{kind}'")]
  UnsupportedKind { kind: String },

  #[error("ingest failed: {0}")]
  Other(#[source] BoxError),
}

#[derive(Debug, Error)]
pub enum ResolveError {
  #[error("cannot resolve catalog import '{slot}' from module '{module}'")]
  Catalog {
    slot: SlotName,
    module: ModuleName,
    #[source]
    source: CatalogError,
  },

  #[error("cannot ingest import '{slot}'")]
  Ingest {
    slot: SlotName,
    #[source]
    source: IngestError,
  },

  #[error("ingest import '{slot}' is only allowed in the top module")]
  IngestInSubmodule { slot: SlotName },

  #[error("in submodule '{step}'")]
  Submodule {
    step: StepName,
    #[source]
    source: Box<ResolveError>,
  },
}

type ResolveFuture<'a> = Pin<Box<dyn Future<Output = Result<(Pins, WareSourcing), ResolveError>> + Send + 'a>>;

/// Resolve every catalog and ingest import in `module` and its submodules.
///
/// Returns the pins keyed by submodule path and slot, plus all warehouse hints gathered
/// along the way. Parent imports are never pinned here. Ingest imports are only legal in
/// the top module. The first collaborator error aborts the whole resolution.
pub async fn resolve_pins(
  module: &Module,
  catalogs: &dyn CatalogView,
  warehouses: &dyn WarehouseView,
  ingestor: &dyn Ingestor,
) -> Result<(Pins, WareSourcing), ResolveError> {
  let (pins, sourcing) = resolve_module(module, catalogs, warehouses, Some(ingestor)).await?;
  info!(pins = pins.len(), "resolved module pins");
  Ok((pins, sourcing))
}

fn resolve_module<'a>(
  module: &'a Module,
  catalogs: &'a dyn CatalogView,
  warehouses: &'a dyn WarehouseView,
  ingestor: Option<&'a dyn Ingestor>,
) -> ResolveFuture<'a> {
  Box::pin(async move {
    let mut pins = Pins::new();
    let mut sourcing = WareSourcing::default();

    for (slot, import) in &module.imports {
      let key = SubmoduleSlotRef::new(SubmoduleRef::root(), SlotRef::import(slot.clone()));
      match import {
        ImportRef::Catalog(item) => {
          let catalog_err = |source: CatalogError| ResolveError::Catalog {
            slot: slot.clone(),
            module: item.module_name.clone(),
            source,
          };
          let lineage = catalogs.view_catalog(&item.module_name).await.map_err(catalog_err)?;
          let ware = lineage
            .pluck_item(&item.release_name, &item.item_name)
            .map_err(|e| catalog_err(e.into()))?
            .clone();

          let hints = match warehouses.view_warehouses(&item.module_name).await {
            Ok(hints) => hints,
            Err(e) if e.is_no_such_catalog() => {
              warn!(module = %item.module_name, "no warehouse hints for catalog");
              WareSourcing::default()
            }
            Err(e) => return Err(catalog_err(e)),
          };
          sourcing.append(hints.pivot_to_module_ware(&ware, &item.module_name));

          debug!(slot = %slot, import = %import, ware = %ware, "pinned catalog import");
          pins.insert(key, ware);
        }
        ImportRef::Parent(_) => {}
        ImportRef::Ingest { kind, args } => {
          let Some(ingestor) = ingestor else {
            return Err(ResolveError::IngestInSubmodule { slot: slot.clone() });
          };
          let (ware, hints) = ingestor
            .ingest(kind, args)
            .await
            .map_err(|source| ResolveError::Ingest {
              slot: slot.clone(),
              source,
            })?;
          sourcing.append(hints);

          debug!(slot = %slot, import = %import, ware = %ware, "pinned ingest import");
          pins.insert(key, ware);
        }
      }
    }

    for (step, union) in &module.steps {
      match union {
        StepUnion::Operation(_) => {}
        StepUnion::Module(submodule) => {
          let (sub_pins, sub_sourcing) = resolve_module(submodule, catalogs, warehouses, None)
            .await
            .map_err(|e| ResolveError::Submodule {
              step: step.clone(),
              source: Box::new(e),
            })?;
          pins.append_subtree(step, sub_pins);
          sourcing.append(sub_sourcing);
        }
      }
    }

    Ok((pins, sourcing))
  })
}
