//! onduty gateway library entry.
//!
//! Wires config, the shared presence registry, the sweeper, and the HTTP and
//! command front ends into one service. Consumed by the binary (`main.rs`)
//! and by integration tests.

pub mod api;
pub mod app_state;
pub mod clock;
pub mod commands;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod sweeper;
