// SPDX-License-Identifier: MIT OR Apache-2.0

//! File system document source adapter.
//!
//! This module provides an adapter that serves documents from files in a single
//! directory, answering with HTTP-style statuses so it is interchangeable with a
//! network source.

use crate::domain::{ConfigError, Result};
use crate::ports::{DocumentSource, SourceResponse};
use async_trait::async_trait;
use directories::ProjectDirs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Maximum allowed size for a configuration document (10MB).
const MAX_DOCUMENT_SIZE: u64 = 10 * 1024 * 1024;

/// Document source that reads files from a root directory.
///
/// Source names are resolved relative to the root. Statuses:
///
/// - **200**: the file was read
/// - **400**: the name is absolute or tries to leave the root
/// - **404**: no such file
/// - **413**: the file is larger than 10MB
///
/// Other I/O failures are returned as errors.
///
/// # Examples
///
/// ```rust,no_run
/// use vib34d_config::adapters::FileSource;
///
/// // Serve documents from a specific directory
/// let source = FileSource::from_dir("/srv/vib34d/config").unwrap();
///
/// // Serve documents from the OS configuration directory
/// let source = FileSource::from_default_location("vib34d", "com.example").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileSource {
    /// Canonical root directory
    root: PathBuf,
}

impl FileSource {
    /// Creates a source serving files from `dir`.
    ///
    /// The directory must exist; it is canonicalized once here.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let root = dir.canonicalize()?;
        if !root.is_dir() {
            return Err(ConfigError::IoError(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("not a directory: {}", dir.display()),
            )));
        }
        Ok(Self { root })
    }

    /// Creates a source serving files from the OS-appropriate configuration directory.
    ///
    /// This method uses the `directories` crate to determine the directory for the
    /// current operating system.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "vib34d")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        let proj_dirs = ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                ErrorKind::NotFound,
                "Failed to determine project directories",
            ))
        })?;

        Self::from_dir(proj_dirs.config_dir())
    }

    /// Returns the root directory documents are served from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a source name to a path under the root, or `None` if the name is not a
    /// plain relative path.
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        let mut components = relative.components().peekable();
        components.peek()?;
        if components.all(|c| matches!(c, Component::Normal(_))) {
            Some(self.root.join(relative))
        } else {
            None
        }
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self, name: &str) -> Result<SourceResponse> {
        let Some(path) = self.resolve(name) else {
            tracing::warn!("Rejected source name outside the root: {}", name);
            return Ok(SourceResponse::with_status(400));
        };

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(SourceResponse::not_found());
            }
            Err(e) => return Err(e.into()),
        };

        if !metadata.is_file() {
            return Ok(SourceResponse::not_found());
        }

        if metadata.len() > MAX_DOCUMENT_SIZE {
            tracing::warn!(
                "Configuration file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_DOCUMENT_SIZE
            );
            return Ok(SourceResponse::with_status(413));
        }

        let body = tokio::fs::read(&path).await?;
        Ok(SourceResponse::ok(body))
    }
}
