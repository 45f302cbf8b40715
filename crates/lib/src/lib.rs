//! wareplan-lib: the graph model and planning core of wareplan
//!
//! This crate provides the types and algorithms for content-addressed build pipelines:
//! - `refs`: ware IDs, slot/submodule/item/import references and their string forms
//! - `filter`: fileset metadata filters for packing and unpacking
//! - `module`: recursive module graphs and their deterministic step order
//! - `catalog` / `warehouse`: release histories and where wares live
//! - `pins`: resolving module imports to concrete ware IDs
//! - `formula`: bound operations and their canonical setup hash
//! - `execute`: handing formulas to an executor and collecting results

pub mod catalog;
pub mod config;
pub mod consts;
pub mod execute;
pub mod filter;
pub mod formula;
pub mod module;
pub mod pins;
pub mod refs;
pub mod util;
pub mod warehouse;
