//! Wire contract and task model shared by the `TermTask` client and server.

pub mod task;
pub mod wire;
