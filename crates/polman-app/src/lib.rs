//! Use case orchestration for polman.
//!
//! This crate provides the application layer: it resolves configuration, opens the persistent
//! store, maps a typed [`Request`] onto store operations and renders the result. The CLI crate
//! depends on this; it only handles argument parsing, printing and exit codes.

#![forbid(unsafe_code)]

mod config;
mod execute;
mod present;
mod request;

pub use config::{load_config, open_store};
pub use execute::{Outcome, execute};
pub use request::{LibraryRequest, Request};
