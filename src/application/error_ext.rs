//! Error conversion helpers for collaborator I/O
//!
//! Provides extension traits for cleaner error handling with context.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add a free-form context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// source.fetch(&query).with_context("fetch root records")?;
    /// ```
    fn with_context(self, context: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_context(self, context: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: context.to_string(),
            source: Box::new(e),
        })
    }
}
