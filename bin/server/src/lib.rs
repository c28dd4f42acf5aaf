//! Widget host for the SoftSell chat assistant.
//!
//! Serves a small JSON API that owns chat widget instances in memory. The
//! generation credential stays on this side of the wire.

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod types;
