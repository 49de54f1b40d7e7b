// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory document source adapter.
//!
//! This module provides a source that serves documents from a map held in memory. It
//! is mainly useful for tests and for hosts that embed their configuration.

use crate::domain::Result;
use crate::ports::{DocumentSource, SourceResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Document source backed by an in-memory map.
///
/// Names that have not been registered answer with status 404. Documents and statuses
/// can be replaced while the source is in use, which lets tests simulate a source that
/// becomes unavailable or starts serving different content.
///
/// # Examples
///
/// ```rust
/// use vib34d_config::adapters::InMemorySource;
/// use vib34d_config::ports::DocumentSource;
///
/// let source = InMemorySource::new()
///     .with_document("behavior.json", r#"{"interactionBlueprints": {}}"#);
///
/// let response = tokio_test::block_on(source.fetch("behavior.json")).unwrap();
/// assert!(response.is_success());
/// let response = tokio_test::block_on(source.fetch("missing.json")).unwrap();
/// assert_eq!(response.status, 404);
/// ```
#[derive(Debug, Default)]
pub struct InMemorySource {
    responses: RwLock<HashMap<String, SourceResponse>>,
}

impl InMemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document that is served with status 200.
    pub fn with_document(self, name: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.set_document(name, body);
        self
    }

    /// Makes a name answer with the given status and an empty body.
    pub fn with_status(self, name: impl Into<String>, status: u16) -> Self {
        self.set_status(name, status);
        self
    }

    /// Replaces the document served for a name.
    pub fn set_document(&self, name: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.insert(name.into(), SourceResponse::ok(body));
    }

    /// Makes a name answer with the given status from now on.
    pub fn set_status(&self, name: impl Into<String>, status: u16) {
        self.insert(name.into(), SourceResponse::with_status(status));
    }

    /// Removes a name, so it answers 404.
    pub fn remove(&self, name: &str) {
        self.responses
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }

    fn insert(&self, name: String, response: SourceResponse) {
        self.responses
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, response);
    }
}

#[async_trait]
impl DocumentSource for InMemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, name: &str) -> Result<SourceResponse> {
        let response = self
            .responses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .unwrap_or_else(SourceResponse::not_found);
        Ok(response)
    }
}
