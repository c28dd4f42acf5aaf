//! Core types shared by the SoftSell chat widget crates.
//!
//! This crate provides the identifiers and the error-handling foundation
//! used by the generation boundary, the conversation resolver and the
//! widget host.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{MessageId, ParseIdError, WidgetId};
