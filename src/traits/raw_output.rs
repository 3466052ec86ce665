//! Write operations for raw output streams.

use crate::StreamError;

use super::RawStream;

/// A raw stream that can be written to.
///
/// Truncation is an optional capability:
/// [`can_truncate`](RawOutput::can_truncate) defaults to `false` and
/// [`truncate`](RawOutput::truncate) to an unsupported-operation error;
/// resizable streams override both.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn RawOutput`.
pub trait RawOutput: RawStream {
    /// Write `data` to the stream at the current position.
    ///
    /// Returns the number of bytes the provider reports as written, which
    /// may legitimately be less than `data.len()`. A single underlying
    /// write request is issued; no retry loop.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Closed`] if the stream is closed
    /// - [`StreamError::Io`] for provider-level failures
    fn write(&mut self, data: &[u8]) -> Result<usize, StreamError>;

    /// Flush provider-side write buffers.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Io`] for provider-level failures
    fn flush(&mut self) -> Result<(), StreamError>;

    /// Whether the stream supports truncation.
    fn can_truncate(&self) -> bool {
        false
    }

    /// Resize the underlying resource to `size` bytes.
    ///
    /// Does not reposition the stream beyond what the provider's own
    /// truncation implies.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Unsupported`] if the stream cannot truncate
    /// - [`StreamError::Io`] for provider-level failures
    fn truncate(&mut self, size: u64) -> Result<(), StreamError> {
        let _ = size;
        Err(StreamError::Unsupported {
            operation: "truncate",
        })
    }
}
