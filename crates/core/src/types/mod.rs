//! Core types for the message board.

pub mod message;

pub use message::{Message, NewMessage};
