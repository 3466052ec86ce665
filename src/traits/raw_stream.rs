//! Common lifecycle and position operations for raw streams.

use crate::{RawSeekOrigin, StreamError};

/// Common operations every raw stream supports, plus optional capabilities.
///
/// A raw stream is a primitive, unbuffered handle supplied by a provider.
/// It is stateful (position, closed flag), so operations that move state
/// take `&mut self`; the adapter built on top is a single-threaded,
/// blocking wrapper and provides no locking of its own.
///
/// # Optional Capabilities
///
/// [`descriptor`](RawStream::descriptor),
/// [`configured_buffer_size`](RawStream::configured_buffer_size) and
/// [`known_size`](RawStream::known_size) default to `None`. Implementations
/// backed by descriptors, internal buffers, or sized resources override
/// them; callers treat `None` as "capability absent" rather than probing.
///
/// # Object Safety
///
/// This trait is object-safe and is typically consumed as a boxed trait
/// object inside a [`RawHandle`](crate::RawHandle).
pub trait RawStream: Send {
    /// Close the stream, releasing provider-side resources.
    ///
    /// Providers may treat repeated closes as no-ops; the adapter never
    /// issues a second close.
    fn close(&mut self) -> Result<(), StreamError>;

    /// Whether the stream has been closed. Always reports live state.
    fn is_closed(&self) -> bool;

    /// Whether the stream supports seeking.
    fn can_seek(&self) -> bool;

    /// Move the stream position.
    ///
    /// `origin` uses the provider-side encoding ([`RawSeekOrigin`]); the
    /// adapter translates from the conventional encoding before calling.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Unsupported`] if the stream is not seekable
    /// - [`StreamError::Io`] for provider-level failures
    fn seek(&mut self, offset: i64, origin: RawSeekOrigin) -> Result<(), StreamError>;

    /// Current stream position in bytes from the start.
    fn tell(&self) -> u64;

    /// The underlying OS descriptor, for descriptor-backed streams.
    fn descriptor(&self) -> Option<i32> {
        None
    }

    /// The stream's own configured buffer size, for streams that buffer
    /// internally.
    fn configured_buffer_size(&self) -> Option<usize> {
        None
    }

    /// Total size of the underlying resource, when cheap to determine —
    /// from an explicit size accessor or a metadata query.
    fn known_size(&self) -> Option<u64> {
        None
    }
}
