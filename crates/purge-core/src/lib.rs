//! Core logic for the account message purge.
//!
//! This crate knows nothing about HTTP. The Discord REST surface lives behind
//! the [`api::port::DiscordApi`] port, implemented in `purge-discord`.

pub mod api;
pub mod config;
pub mod domain;
pub mod drain;
pub mod errors;
pub mod identity;
pub mod logging;
pub mod run;
pub mod search;
pub mod targets;

#[cfg(test)]
pub(crate) mod test_support;

pub use errors::{Error, Result};
