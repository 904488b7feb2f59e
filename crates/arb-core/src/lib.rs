//! Core domain + routing logic for the admin-relay bot.
//!
//! This crate is intentionally framework-agnostic. The Telegram transport
//! lives behind the messaging port (trait) implemented in the adapter crate.

pub mod config;
pub mod directive;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod router;

pub use errors::{Error, Result};
