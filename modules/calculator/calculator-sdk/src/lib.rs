//! Calculator SDK
//!
//! Transport-agnostic types shared by the calculator module and its consumers:
//! - `Operation` and its `Arity`
//! - `Action`, the immutable record of one successful computation
//! - `Flavor` and `HistoryFilter` for partitioning and querying history
//! - `OperationParseError` for rejected operation names

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod error;
pub mod models;

pub use error::OperationParseError;
pub use models::{Action, Arity, Flavor, HistoryFilter, Operation};
