//! Calculator module.
//!
//! A stateless calculator plus a calculator driven by one shared, mutable
//! stack. Every successful computation is recorded in an append-only
//! history partitioned by [`Flavor`](calculator_sdk::Flavor).
//!
//! - [`domain`]: validation, evaluation, the stack store and the history ledger
//! - [`api::rest`]: HTTP surface, error mapping and request logging

pub mod api;
pub mod domain;

pub use api::rest::routes::build_router;
pub use domain::error::DomainError;
pub use domain::service::CalculatorService;
