//! # anystream
//!
//! File-object adapter and raw stream contracts for **pluggable
//! byte-stream providers**.
//!
//! This crate lets code written against a conventional file API operate on
//! resources from any storage abstraction — local files, packed assets,
//! network-backed objects, in-memory buffers — without knowing where they
//! came from. A provider implements the raw stream contracts; the
//! [`StreamAdapter`] exposes the standard contract (read, write, seek,
//! tell, truncate, close, flush, capability queries) over whatever handle
//! the provider supplied.
//!
//! ---
//!
//! ## Quick Start
//!
//! Open a resource through the boundary [`open`] and use the adapter like
//! any file object:
//!
//! ```rust
//! use anystream::{Resource, StreamError};
//!
//! // Generic function that works with any Resource implementation
//! fn copy_header<R: Resource>(source: &R, dest: &R) -> Result<(), StreamError> {
//!     let mut reader = anystream::open(source, "rb")?;
//!     let mut writer = anystream::open(dest, "wb")?;
//!     let header = reader.read(Some(16))?;
//!     writer.write(&header)?;
//!     writer.close()?;
//!     reader.close()
//! }
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`StreamAdapter`] | The file object: standard contract over one raw handle |
//! | [`RawHandle`] | A raw handle classified as input-only, output-only, or combined |
//! | [`RawStream`] / [`RawInput`] / [`RawOutput`] / [`RawDuplex`] | Contracts provider streams implement |
//! | [`Resource`] | Provider-side opener: resolves an intent to a classified handle |
//! | [`OpenMode`] | Parsed mode string (`"r"`, `"wb"`, `"a+"`, ...) |
//! | [`Whence`] / [`RawSeekOrigin`] | The two seek-origin encodings (caller / provider side) |
//! | [`StreamError`] | Error type with distinguishable closed/unsupported/not-found kinds |
//!
//! ---
//!
//! ## What the Adapter Guarantees
//!
//! - **Capability partition** — exactly one of read-only, write-only, or
//!   read-write holds, fixed at construction.
//! - **Single-call transfers** — sized reads and writes forward as one
//!   provider call each; short transfers are returned, never retried.
//! - **Adaptive whole-stream reads** — `read(None)` grows its chunk plan
//!   so provider calls scale logarithmically even when the stream size is
//!   unknown.
//! - **Exact edge semantics** — zero-length fast paths, `0`-at-EOF,
//!   idempotent close, closed/unsupported errors raised before any I/O.
//!
//! The adapter adds **no buffering and no decoding**. It implements
//! [`std::io::Read`], [`std::io::Write`] and [`std::io::Seek`], so
//! `BufReader`/`BufWriter` stack directly on top; size them with
//! [`recommended_buffer_size`].
//!
//! ---
//!
//! ## Error Handling
//!
//! All operations return `Result<T, StreamError>`. Kinds stay
//! distinguishable so outer layers can react correctly — an unsupported
//! operation is permanent, a closed stream may be reopened:
//!
//! ```rust
//! use anystream::StreamError;
//!
//! let err = StreamError::Closed { operation: "read" };
//! assert_eq!(err.to_string(), "read: stream is closed");
//!
//! let err = StreamError::NotFound { name: "assets/logo.png".into() };
//! assert!(err.to_string().contains("assets/logo.png"));
//! ```
//!
//! ---
//!
//! ## Concurrency
//!
//! The model is single-threaded, synchronous and blocking: every adapter
//! operation issues blocking provider calls and returns when they
//! complete. A single adapter is not safe for concurrent use — position
//! and the closed flag are multi-step state with no internal locking.
//! Handles are `Send`, so an adapter may move between threads.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Enable serialization for [`OpenMode`], [`Whence`], [`ResourceType`], etc. |

// Private modules
mod adapter;
mod error;
mod open;
mod traits;
mod types;

// Native streams for resources with a local path
pub mod native;

// Public re-exports - error type
pub use error::StreamError;

// Public re-exports - core types
pub use types::{Buffering, DEFAULT_CHUNK_SIZE, OpenMode, RawSeekOrigin, ResourceType, Whence};

// Public re-exports - stream contracts
pub use traits::{RawDuplex, RawInput, RawOutput, RawStream, Resource};

// Public re-exports - the adapter
pub use adapter::{RawHandle, StreamAdapter};

// Public re-exports - the boundary open
pub use open::{OpenOptions, open, open_with, recommended_buffer_size};

// Public re-exports - native fast path
pub use native::FileStream;
