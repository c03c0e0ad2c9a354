//! Core of a ground-station command uplink: the s-expression data model,
//! the text grammar operators type commands in, and the binary wire format
//! those commands travel over.
//!
//! The pipeline is `parse` (operator text to [`Sexp`]), `encode` ([`Sexp`]
//! to wire bytes), transport (not this crate), `decode` (wire bytes back to
//! [`Sexp`]), dispatch (not this crate). Every step either fully succeeds
//! or returns an error value; corruption on the wire is detected, never
//! reinterpreted as a different valid command.

pub mod error;
pub mod parser;
pub mod sexp;
pub mod wire;
pub mod writer;

/// Maximum group-nesting depth accepted by both `parse` and `decode`.
///
/// Shared so that anything the parser accepts survives the wire, and so
/// that a corrupted byte stream cannot recurse the decoder off a small
/// stack on the receiving hardware.
pub const MAX_DEPTH: usize = 32;

pub use error::{ConstructionError, DecodeError, ParseError};
pub use parser::parse;
pub use sexp::Sexp;
pub use wire::{decode, encode};
pub use writer::to_text;
