//! Coursereel - course video catalog server
//!
//! This library crate exposes the configuration and HTTP layer for
//! integration testing. The catalog itself lives in `coursereel-catalog`.

pub mod config;
pub mod server;

pub use coursereel_catalog as catalog;
