//! # Stream Contracts
//!
//! The trait hierarchy that defines the AnyStream provider interface.
//!
//! ## Trait Layers
//!
//! Raw stream handles compose from small capability traits. A provider
//! implements only what its streams actually support:
//!
//! ```text
//! RawStream  — lifecycle, seek/tell, optional capabilities
//!     ├── RawInput   — chunk reads
//!     └── RawOutput  — chunk writes, flush, truncate
//!           RawInput + RawOutput = RawDuplex (combined, one position)
//! ```
//!
//! [`Resource`] sits beside the stream traits as the opener: it resolves a
//! create/read/write/append intent into a classified raw handle.
//!
//! ## Blanket Implementation
//!
//! [`RawDuplex`] has a blanket implementation: implement [`RawInput`] and
//! [`RawOutput`] on one type and the combined trait comes for free. The
//! combined case is deliberately a *single* object — its input and output
//! facets are two views of one position state, so seeking through either
//! view observes the same offset.
//!
//! ## Thread Safety
//!
//! Stream traits require `Send` and take `&mut self`: a raw stream is a
//! stateful, sequentially-used resource, and the adapter on top is
//! explicitly single-threaded. [`Resource`] requires `Send + Sync` with
//! `&self` methods, since a resource reference is just a target
//! description.
//!
//! ## Object Safety
//!
//! All traits are object-safe; handles travel as boxed trait objects:
//!
//! ```rust
//! use anystream::RawInput;
//!
//! fn consume(stream: Box<dyn RawInput>) {
//!     let _ = stream;
//! }
//! ```

mod raw_input;
mod raw_output;
mod raw_stream;
mod resource;

pub use raw_input::RawInput;
pub use raw_output::RawOutput;
pub use raw_stream::RawStream;
pub use resource::Resource;

/// A combined bidirectional stream: readable and writable over one shared
/// position.
///
/// Seek and tell through the input facet and the output facet observe the
/// same logical offset, because both facets are supertrait views of the
/// same object.
///
/// # Blanket Implementation
///
/// Automatically implemented for any type implementing both [`RawInput`]
/// and [`RawOutput`]. You never implement `RawDuplex` directly.
pub trait RawDuplex: RawInput + RawOutput {}

// Blanket implementation - one object with both facets is the shared
// position cell.
impl<T: RawInput + RawOutput> RawDuplex for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RawSeekOrigin, StreamError};

    struct Both;

    impl RawStream for Both {
        fn close(&mut self) -> Result<(), StreamError> {
            Ok(())
        }
        fn is_closed(&self) -> bool {
            false
        }
        fn can_seek(&self) -> bool {
            true
        }
        fn seek(&mut self, _: i64, _: RawSeekOrigin) -> Result<(), StreamError> {
            Ok(())
        }
        fn tell(&self) -> u64 {
            0
        }
    }

    impl RawInput for Both {
        fn read(&mut self, _: &mut [u8]) -> Result<usize, StreamError> {
            Ok(0)
        }
    }

    impl RawOutput for Both {
        fn write(&mut self, data: &[u8]) -> Result<usize, StreamError> {
            Ok(data.len())
        }
        fn flush(&mut self) -> Result<(), StreamError> {
            Ok(())
        }
    }

    #[test]
    fn duplex_blanket_impl() {
        fn assert_duplex<T: RawDuplex>() {}
        assert_duplex::<Both>();
    }

    #[test]
    fn duplex_is_object_safe() {
        let _boxed: Box<dyn RawDuplex> = Box::new(Both);
    }
}
