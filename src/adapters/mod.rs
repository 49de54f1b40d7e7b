// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing source, parser and watcher implementations.
//!
//! This module contains concrete implementations of the traits defined in the ports
//! layer. Each source adapter implements `DocumentSource` to serve raw documents from
//! a specific transport.

#[cfg(feature = "fs")]
pub mod file;
#[cfg(feature = "http")]
pub mod http;
pub mod json_parser;
pub mod memory;

pub mod watchers;

// Re-export adapters based on feature flags
#[cfg(feature = "fs")]
pub use file::FileSource;
#[cfg(feature = "http")]
pub use http::HttpSource;
pub use json_parser::JsonParser;
pub use memory::InMemorySource;
#[cfg(feature = "reload")]
pub use watchers::FileWatcher;
