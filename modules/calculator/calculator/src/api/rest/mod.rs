//! REST API layer for the calculator module.

pub mod dto;
pub mod error;
mod handlers;
mod request_log;
pub mod routes;
