//! Common utilities for the crunchcss tools.
//!
//! This crate provides shared infrastructure used by the bundler and the CLI:
//! - **Web Paths** - normalisation of document-root relative paths
//! - **Warning System** - de-duplicated warnings routed through `tracing`

pub mod path;
pub mod warning;
