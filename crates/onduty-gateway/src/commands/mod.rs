//! Chat command front end.
//!
//! Transport-agnostic: a platform adapter (or the `/v1/commands` webhook)
//! hands over an already-decoded message and gets a `Reply` back.

pub mod dispatcher;
pub mod roster;

use std::sync::Arc;

pub use dispatcher::{Command, CommandCtx, CommandInfo, CommandRouter, Reply};

/// Router with every built-in roster command registered.
pub fn builtin() -> CommandRouter {
    let router = CommandRouter::new();
    router.register(Arc::new(roster::ClockIn));
    router.register(Arc::new(roster::ClockOut));
    router.register(Arc::new(roster::Ping));
    router.register(Arc::new(roster::Drivers));
    router.register(Arc::new(roster::Reset));
    router
}
