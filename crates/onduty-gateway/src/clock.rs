//! Time source for registry calls.
//!
//! Reads the tokio clock so tests running under `tokio::time::pause` move the
//! registry, the sweeper, and the front ends together.

use std::time::Instant;

pub fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}
