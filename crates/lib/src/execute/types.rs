//! Types for running formulas through an executor.
//!
//! The executor itself lives outside this crate; [`Executor`] is the seam it plugs into.
//! Progress flows back through a [`Monitor`] as [`Event`]s.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::trace;

use crate::catalog::BoxError;
use crate::config::EngineConfig;
use crate::formula::{BindError, Formula, FormulaContext, RunRecord};
use crate::refs::{AbsPath, WareId};
use crate::util::hash::{HashError, SetupHash};
use crate::warehouse::{WareSourcing, WareStaging, WarehouseLocation};

/// Runs a bound formula in containment and reports the wares it produced.
#[async_trait]
pub trait Executor: Send + Sync {
  async fn run(&self, formula: &Formula, context: &FormulaContext, monitor: &Monitor) -> Result<RunRecord, ExecutorError>;
}

/// Failures reported by an [`Executor`].
#[derive(Debug, Error)]
pub enum ExecutorError {
  /// The formula could not be launched as specified (bad cwd, missing binary).
  #[error("job invalid: {reason}")]
  JobInvalid { reason: String },

  #[error("ware '{ware}' not found in any warehouse")]
  WareNotFound { ware: WareId },

  #[error("warehouse '{location}' is unavailable")]
  WarehouseUnavailable { location: WarehouseLocation },

  #[error("executor failed: {0}")]
  Other(#[source] BoxError),
}

/// Errors from [`run_operation`](super::run_operation).
#[derive(Debug, Error)]
pub enum RunError {
  #[error(transparent)]
  Bind(#[from] BindError),

  #[error("cannot hash formula")]
  Hash(#[source] HashError),

  #[error(transparent)]
  Executor(#[from] ExecutorError),

  #[error("executor reported formula '{actual}', expected '{expected}'")]
  FormulaMismatch { expected: SetupHash, actual: SetupHash },

  #[error("executor returned a result for '{path}', which is not an output path")]
  UnexpectedResult { path: AbsPath },
}

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Event {
  /// A log line from the executor itself.
  Log {
    /// Unix seconds.
    time: i64,
    level: u8,
    msg: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    detail: Vec<(String, String)>,
  },
  /// Output of the contained process, stdout and stderr conjoined.
  Output { time: i64, msg: String },
}

/// Optional sink for run [`Event`]s. The default monitor discards everything.
#[derive(Debug, Clone, Default)]
pub struct Monitor {
  tx: Option<mpsc::UnboundedSender<Event>>,
}

impl Monitor {
  pub fn disabled() -> Self {
    Self::default()
  }

  pub fn channel() -> (Self, mpsc::UnboundedReceiver<Event>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Self { tx: Some(tx) }, rx)
  }

  /// Deliver `event` if anyone is listening. A dropped receiver is not an error.
  pub fn send(&self, event: Event) {
    let Some(tx) = &self.tx else {
      return;
    };
    if tx.send(event).is_err() {
      trace!("monitor receiver dropped");
    }
  }

  pub fn log(&self, level: u8, msg: impl Into<String>) {
    self.send(Event::Log {
      time: chrono::Utc::now().timestamp(),
      level,
      msg: msg.into(),
      detail: Vec::new(),
    });
  }

  pub fn output(&self, msg: impl Into<String>) {
    self.send(Event::Output {
      time: chrono::Utc::now().timestamp(),
      msg: msg.into(),
    });
  }
}

/// Everything a run needs besides the operation and its scope.
#[derive(Debug, Clone, Default)]
pub struct ExecuteConfig {
  pub engine: EngineConfig,
  /// Where inputs may be fetched from.
  pub sourcing: WareSourcing,
  /// Where outputs are saved, per pack type.
  pub staging: WareStaging,
}
