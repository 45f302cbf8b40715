//! Module graphs and their execution order.
//!
//! This module provides:
//! - [`Module`], [`StepUnion`] and [`Operation`]: the recursive graph model
//! - [`order_steps`] / [`order_steps_deep`]: deterministic topological ordering with
//!   reference validation and cycle detection

mod order;
mod types;

pub use order::*;
pub use types::*;
