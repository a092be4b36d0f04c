pub mod engine;
pub mod error;
pub mod history;
pub mod service;
pub mod stack;
pub mod validator;
