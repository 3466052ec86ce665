//! The provider-side resource contract.

use std::path::PathBuf;

use crate::{RawDuplex, RawInput, RawOutput, ResourceType, StreamError};

/// A target resource a provider can open streams on.
///
/// This is the storage-side half of the boundary: a reference to one
/// file-like resource (local file, packed asset, network-backed object)
/// with primitive openers for every create/read/write/append intent, plain
/// or read-write. Each opener returns a raw handle already classified as
/// input-only, output-only, or combined; the
/// [`StreamAdapter`](crate::StreamAdapter) then exposes the standard
/// file-object contract over it.
///
/// Opening is a "cold path": handles are returned as boxed trait objects
/// for flexibility across providers.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; methods take `&self`. The
/// streams handed out are owned by their callers and are not required to
/// be shareable.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn Resource`.
pub trait Resource: Send + Sync {
    /// Open the resource for reading.
    ///
    /// # Errors
    ///
    /// - [`StreamError::NotFound`] if the resource does not exist
    /// - [`StreamError::IsADirectory`] if the resource is a directory
    fn open_read(&self) -> Result<Box<dyn RawInput>, StreamError>;

    /// Create the resource exclusively and open it for writing.
    ///
    /// # Errors
    ///
    /// - [`StreamError::AlreadyExists`] if the resource already exists
    fn create(&self) -> Result<Box<dyn RawOutput>, StreamError>;

    /// Open the resource for writing, replacing (truncating) existing
    /// content.
    fn replace(&self) -> Result<Box<dyn RawOutput>, StreamError>;

    /// Open the resource for writing at the end, creating it if missing.
    fn append_to(&self) -> Result<Box<dyn RawOutput>, StreamError>;

    /// Open the resource for reading and writing over one shared position.
    ///
    /// # Errors
    ///
    /// - [`StreamError::NotFound`] if the resource does not exist
    fn open_readwrite(&self) -> Result<Box<dyn RawDuplex>, StreamError>;

    /// Create the resource exclusively and open it for reading and writing.
    ///
    /// # Errors
    ///
    /// - [`StreamError::AlreadyExists`] if the resource already exists
    fn create_readwrite(&self) -> Result<Box<dyn RawDuplex>, StreamError>;

    /// Open the resource for reading and writing, replacing existing
    /// content.
    fn replace_readwrite(&self) -> Result<Box<dyn RawDuplex>, StreamError>;

    /// The resource's type: file, directory, or other.
    fn resource_type(&self) -> ResourceType;

    /// Whether the resource currently exists.
    fn exists(&self) -> bool;

    /// Human-readable name for error messages — a path where one exists,
    /// else whatever identifies the resource best.
    fn display_name(&self) -> String;

    /// Local filesystem path, for resources that have one.
    ///
    /// A `Some` return enables the boundary's native fast path.
    fn local_path(&self) -> Option<PathBuf> {
        None
    }

    /// Preferred I/O block size of the underlying storage, when known.
    ///
    /// Consumed by the buffering heuristic of
    /// [`recommended_buffer_size`](crate::recommended_buffer_size).
    fn block_size(&self) -> Option<u64> {
        None
    }
}
