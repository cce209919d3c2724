//! Message Board Core - Shared types library.
//!
//! This crate provides the domain types used across all message board components:
//! - `web` - The public message board server
//! - `cli` - Command-line tools for listing, posting, and collection setup
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - The `Message` entity and its creation input

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
