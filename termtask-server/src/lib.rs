//! `TermTask` demo API server library.
//!
//! Exposes the task API server for use in tests and embedding. The server
//! keeps the task collection in memory and implements the JSON contract
//! the `termtask` client speaks.

pub mod config;
pub mod server;
pub mod store;
