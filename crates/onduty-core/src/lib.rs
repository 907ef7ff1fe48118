//! onduty core: the presence registry, the admin authorization gate, and the
//! error surface shared by every front end.
//!
//! This crate carries no transport or runtime dependencies. Callers pass the
//! current instant into every time-based operation, so the registry behaves
//! the same under a real clock, a paused tokio clock, or a hand-built
//! `Instant` in a unit test.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod auth;
pub mod error;
pub mod identity;
pub mod registry;

pub use auth::{AdminPolicy, AdminToken, Caller, Capabilities};
/// Shared result type.
pub use error::{OndutyError, Result};
pub use identity::UserId;
pub use registry::{PresenceRegistry, Transition};
