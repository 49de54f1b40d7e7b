// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document source trait definition.
//!
//! This module defines the `DocumentSource` trait, the port through which raw
//! configuration documents are retrieved by name. Any transport (HTTP, the file
//! system, in-memory fixtures) can back the configuration system by implementing it.

use crate::domain::Result;
use async_trait::async_trait;

/// The raw answer of a source to a retrieval request.
///
/// Status codes follow HTTP conventions regardless of the transport: anything in the
/// 2xx range is a success, everything else is a failure that the loader turns into a
/// `RetrievalError`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceResponse {
    /// The transport status code
    pub status: u16,
    /// The raw document bytes
    pub body: Vec<u8>,
}

impl SourceResponse {
    /// Creates a successful (`200`) response.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Creates a response with an explicit status and an empty body.
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }

    /// Creates a `404` response.
    pub fn not_found() -> Self {
        Self::with_status(404)
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A trait for retrieving raw configuration documents by name.
///
/// Returning `Ok` with a non-success status means the source was reached but could
/// not serve the document; returning `Err` means the source could not be reached at
/// all. The loader attaches the category and source name to either failure.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a single source can serve concurrent
/// retrievals of different categories.
///
/// # Examples
///
/// ```rust
/// use vib34d_config::ports::{DocumentSource, SourceResponse};
/// use vib34d_config::domain::Result;
/// use async_trait::async_trait;
///
/// struct StaticSource;
///
/// #[async_trait]
/// impl DocumentSource for StaticSource {
///     fn name(&self) -> &str {
///         "static"
///     }
///
///     async fn fetch(&self, name: &str) -> Result<SourceResponse> {
///         match name {
///             "behavior.json" => Ok(SourceResponse::ok(r#"{"interactionBlueprints":{}}"#)),
///             _ => Ok(SourceResponse::not_found()),
///         }
///     }
/// }
///
/// let response = tokio_test::block_on(StaticSource.fetch("behavior.json")).unwrap();
/// assert!(response.is_success());
/// ```
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Returns the name of this source, used in logs.
    fn name(&self) -> &str;

    /// Retrieves the raw bytes of the named document.
    ///
    /// # Returns
    ///
    /// * `Ok(SourceResponse)` - The source answered; check `is_success()`
    /// * `Err(ConfigError)` - The source could not be reached
    async fn fetch(&self, name: &str) -> Result<SourceResponse>;
}
