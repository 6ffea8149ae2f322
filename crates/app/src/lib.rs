//! Application layer: session context, configuration, and export sinks.
//!
//! Everything here is thin glue over the domain crates; the interactive
//! binary in `main.rs` only parses lines and calls into [`session::Session`].

pub mod config;
pub mod export;
pub mod session;

pub use config::Config;
pub use export::{ExportBundle, ExportFile};
pub use session::Session;
