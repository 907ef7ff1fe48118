//! HTTP front ends: the polled counter, the token-gated reset, and the
//! command webhook.

pub mod commands;
pub mod error;
pub mod status;

pub use error::ApiError;
