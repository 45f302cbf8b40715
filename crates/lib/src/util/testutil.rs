//! Shared fixtures for wareplan-lib tests.
//!
//! Module fixtures mirror realistic pipelines; the mocks stand in for the catalog,
//! warehouse, ingest and executor collaborators.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::catalog::{CatalogError, Lineage, LookupError, Release};
use crate::execute::{Executor, ExecutorError, Monitor};
use crate::formula::{Formula, FormulaAction, FormulaContext, RunRecord};
use crate::module::{Module, Operation};
use crate::pins::{CatalogView, IngestError, Ingestor, WarehouseView};
use crate::refs::{AbsPath, ImportRef, ModuleName, SlotRef, WareId};
use crate::warehouse::WareSourcing;

/// An operation with the given input slot refs mounted under `/in/` and outputs under `/out/`.
pub fn op(inputs: &[&str], outputs: &[&str]) -> Operation {
  let mut op = Operation::new(FormulaAction::exec(["/bin/true"]));
  for input in inputs {
    let slot_ref: SlotRef = input.parse().unwrap();
    op = op.with_input(slot_ref, format!("/in/{}", input));
  }
  for output in outputs {
    op = op.with_output(*output, format!("/out/{}", output));
  }
  op
}

/// Three levels deep: `stepSub.deeper` reaches two modules up for `stepFoo.slot`.
pub fn deep_submodule_fixture() -> Module {
  let deeper = Module::new()
    .with_import("suby", ImportRef::Parent(SlotRef::import("subx")))
    .with_step("rlydeep", op(&["suby"], &["slot"]))
    .with_export("zowslot", SlotRef::new("rlydeep", "slot"));
  let sub = Module::new()
    .with_import("subx", ImportRef::Parent(SlotRef::new("stepFoo", "slot")))
    .with_step("deeper", deeper)
    .with_step("midstep", op(&["deeper.zowslot"], &["slot"]))
    .with_export("wowslot", SlotRef::new("midstep", "slot"));
  Module::new()
    .with_step("stepFoo", op(&[], &["slot"]))
    .with_step("stepBar", op(&[], &["slot"]))
    .with_step("stepSub", sub)
    .with_step("stepWub", op(&["stepSub.wowslot"], &[]))
}

/// A module whose submodule pins a different release of `bar` than its parent.
pub fn pinning_fixture() -> Module {
  let step_a = Operation::new(FormulaAction::exec(["mv", "/foo/thinger", "/out/thinger"]))
    .with_input(SlotRef::import("base"), "/")
    .with_input(SlotRef::import("foo"), "/foo")
    .with_input(SlotRef::import("bar"), "/bar")
    .with_output("intermediate", "/out");
  let step_b = Module::new()
    .with_import("base", ImportRef::catalog("publishing.group/base", "v2018", "bin-linux-amd64"))
    .with_import("bar", ImportRef::catalog("publishing.group/bar", "v2.2", "bin-linux-amd64"))
    .with_import("wodget", ImportRef::Parent(SlotRef::new("stepA", "intermediate")))
    .with_step(
      "op",
      Operation::new(FormulaAction::exec(["/bar/tool", "/src", "/out/thinger"]))
        .with_input(SlotRef::import("base"), "/")
        .with_input(SlotRef::import("bar"), "/bar")
        .with_input(SlotRef::import("wodget"), "/src")
        .with_output("intermediate", "/out"),
    )
    .with_export("barred", SlotRef::new("op", "intermediate"));
  let step_c = Operation::new(FormulaAction::exec(["/bar/thinger"]))
    .with_input(SlotRef::import("base"), "/")
    .with_input(SlotRef::new("stepB", "barred"), "/bar")
    .with_output("final", "/bar");

  Module::new()
    .with_import("base", ImportRef::catalog("publishing.group/base", "v2018", "bin-linux-amd64"))
    .with_import("foo", ImportRef::ingest("git", ".:HEAD"))
    .with_import("bar", ImportRef::catalog("publishing.group/bar", "v2.0", "bin-linux-amd64"))
    .with_step("stepA", step_a)
    .with_step("stepB", step_b)
    .with_step("stepC", step_c)
    .with_export("src", SlotRef::import("foo"))
    .with_export("bin-linux-amd64", SlotRef::new("stepC", "final"))
}

/// In-memory catalogs and warehouse hints.
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
  pub lineages: BTreeMap<ModuleName, Lineage>,
  pub warehouses: BTreeMap<ModuleName, WareSourcing>,
}

impl MockCatalog {
  /// Catalogs for `publishing.group/base` and `publishing.group/bar`; only `base`
  /// publishes warehouse hints.
  pub fn fixture() -> Self {
    let base = Lineage {
      name: "publishing.group/base".into(),
      releases: vec![Release::new("v2018").with_item("bin-linux-amd64", WareId::new("tar", "asdflkjgh"))],
    };
    let bar = Lineage {
      name: "publishing.group/bar".into(),
      releases: vec![
        Release::new("v2.2").with_item("bin-linux-amd64", WareId::new("tar", "qwer2")),
        Release::new("v2.0").with_item("bin-linux-amd64", WareId::new("tar", "qwer1")),
      ],
    };
    let mut base_hints = WareSourcing::default();
    base_hints.append_by_module(
      "publishing.group/base",
      "tar",
      ["ca+https://warehouse.publishing.group/base".to_string()],
    );

    Self {
      lineages: [(base.name.clone(), base), (bar.name.clone(), bar)].into(),
      warehouses: [("publishing.group/base".to_string(), base_hints)].into(),
    }
  }
}

#[async_trait]
impl CatalogView for MockCatalog {
  async fn view_catalog(&self, module: &str) -> Result<Lineage, CatalogError> {
    self.lineages.get(module).cloned().ok_or_else(|| {
      LookupError::NoSuchCatalog {
        module: module.to_string(),
      }
      .into()
    })
  }
}

#[async_trait]
impl WarehouseView for MockCatalog {
  async fn view_warehouses(&self, module: &str) -> Result<WareSourcing, CatalogError> {
    self.warehouses.get(module).cloned().ok_or_else(|| {
      LookupError::NoSuchCatalog {
        module: module.to_string(),
      }
      .into()
    })
  }
}

/// Ingest that answers from a fixed table keyed by `kind:args`.
#[derive(Debug, Clone, Default)]
pub struct MockIngestor {
  pub wares: BTreeMap<String, (WareId, WareSourcing)>,
}

impl MockIngestor {
  /// Knows `git:.:HEAD` only.
  pub fn fixture() -> Self {
    let ware = WareId::new("git", "f00f");
    let mut hints = WareSourcing::default();
    hints.append_by_ware(ware.clone(), ["https://example.org/foo.git".to_string()]);
    Self {
      wares: [("git:.:HEAD".to_string(), (ware, hints))].into(),
    }
  }
}

#[async_trait]
impl Ingestor for MockIngestor {
  async fn ingest(&self, kind: &str, args: &str) -> Result<(WareId, WareSourcing), IngestError> {
    self
      .wares
      .get(&format!("{}:{}", kind, args))
      .cloned()
      .ok_or_else(|| IngestError::UnsupportedKind { kind: kind.to_string() })
  }
}

/// Executor that "produces" one ware per output, named after its path.
///
/// The ware for output `/out/x` of pack type `tar` is `tar:/out/x`. Each run echoes its
/// exec line to the monitor and records the context it was given.
#[derive(Debug, Clone, Default)]
pub struct MockExecutor {
  extra_results: BTreeMap<AbsPath, WareId>,
  fail: bool,
  contexts: Arc<Mutex<Vec<FormulaContext>>>,
}

impl MockExecutor {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_extra_result(mut self, path: impl Into<AbsPath>, ware: WareId) -> Self {
    self.extra_results.insert(path.into(), ware);
    self
  }

  pub fn failing(mut self) -> Self {
    self.fail = true;
    self
  }

  pub fn contexts(&self) -> Vec<FormulaContext> {
    self.contexts.lock().unwrap().clone()
  }
}

#[async_trait]
impl Executor for MockExecutor {
  async fn run(&self, formula: &Formula, context: &FormulaContext, monitor: &Monitor) -> Result<RunRecord, ExecutorError> {
    if self.fail {
      return Err(ExecutorError::JobInvalid {
        reason: "mock executor told to fail".into(),
      });
    }
    self.contexts.lock().unwrap().push(context.clone());
    monitor.output(formula.action.exec.join(" "));

    let mut results: BTreeMap<AbsPath, WareId> = formula
      .outputs
      .iter()
      .map(|(path, spec)| (path.clone(), WareId::new(spec.packtype.clone(), path.clone())))
      .collect();
    results.extend(self.extra_results.clone());
    Ok(RunRecord {
      guid: "mock-run".into(),
      results,
      ..Default::default()
    })
  }
}
