//! Top-level facade crate for onduty.
//!
//! Re-exports the core registry types and the gateway library so users can
//! depend on a single crate.

pub mod core {
    pub use onduty_core::*;
}

pub mod gateway {
    pub use onduty_gateway::*;
}
