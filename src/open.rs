//! The boundary `open`: validate arguments, resolve the provider call,
//! wrap the handle.

use crate::types::DEFAULT_CHUNK_SIZE;
use crate::{
    Buffering, OpenMode, RawHandle, Resource, ResourceType, StreamAdapter, StreamError, native,
};

/// Options accepted by [`open_with`].
///
/// The buffering policy and the text-mode parameters are validated here
/// but consumed by outer layers: the adapter itself never buffers and
/// never decodes. `native` controls the local fast path.
#[derive(Debug, Clone)]
pub struct OpenOptions {
    /// Buffering policy for the chunked layer a caller may stack on top.
    pub buffering: Buffering,
    /// Text-mode encoding name. Rejected in binary mode.
    pub encoding: Option<String>,
    /// Text-mode encoding error policy. Rejected in binary mode.
    pub errors: Option<String>,
    /// Text-mode newline handling. Rejected in binary mode.
    pub newline: Option<String>,
    /// Open through the platform file API when the resource has a local
    /// path.
    pub native: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            buffering: Buffering::Default,
            encoding: None,
            errors: None,
            newline: None,
            native: true,
        }
    }
}

/// Open `resource` with default options and create a stream over it.
///
/// Equivalent to [`open_with`] with [`OpenOptions::default`]. See
/// [`OpenMode::parse`] for the accepted mode strings.
///
/// # Errors
///
/// See [`open_with`].
pub fn open<R: Resource + ?Sized>(
    resource: &R,
    mode: &str,
) -> Result<StreamAdapter, StreamError> {
    open_with(resource, mode, &OpenOptions::default())
}

/// Open `resource` and create a stream over it.
///
/// Validates the mode string and every option combination before touching
/// the resource, resolves the matching provider opener from the
/// (create/read/write/append) × (update or not) intent, and wraps the
/// resulting raw handle in a [`StreamAdapter`]. When `options.native` is
/// set and the resource reports a local path, the platform file API is
/// used instead of provider streams.
///
/// The returned adapter is unbuffered and byte-oriented; callers wanting
/// chunked buffering stack `std::io::BufReader`/`BufWriter` on top, sized
/// by [`recommended_buffer_size`]. All provider calls are blocking and
/// non-cancellable.
///
/// # Errors
///
/// - [`StreamError::InvalidMode`] / [`StreamError::InvalidArgument`] for
///   malformed modes and option combinations
/// - [`StreamError::IsADirectory`] if the resource is a directory
/// - [`StreamError::AlreadyExists`] on exclusive creation of an existing
///   resource
/// - [`StreamError::NotFound`] when opening a missing resource for
///   reading
pub fn open_with<R: Resource + ?Sized>(
    resource: &R,
    mode: &str,
    options: &OpenOptions,
) -> Result<StreamAdapter, StreamError> {
    let mode = OpenMode::parse(mode)?;
    if mode.binary {
        if options.encoding.is_some() {
            return Err(StreamError::InvalidArgument {
                message: "binary mode doesn't take an encoding argument".into(),
            });
        }
        if options.errors.is_some() {
            return Err(StreamError::InvalidArgument {
                message: "binary mode doesn't take an errors argument".into(),
            });
        }
        if options.newline.is_some() {
            return Err(StreamError::InvalidArgument {
                message: "binary mode doesn't take a newline argument".into(),
            });
        }
    }
    match options.buffering {
        Buffering::None if !mode.binary => {
            return Err(StreamError::InvalidArgument {
                message: "can't have unbuffered text I/O".into(),
            });
        }
        Buffering::Line if mode.binary => {
            return Err(StreamError::InvalidArgument {
                message: "line buffering is only usable in text mode".into(),
            });
        }
        Buffering::Size(0) => {
            return Err(StreamError::InvalidArgument {
                message: "buffer size must be strictly positive".into(),
            });
        }
        _ => {}
    }

    let name = resource.display_name();
    if resource.resource_type() == ResourceType::Directory {
        return Err(StreamError::IsADirectory { name });
    }
    if resource.exists() {
        if mode.creating {
            return Err(StreamError::AlreadyExists { name });
        }
    } else if mode.reading {
        return Err(StreamError::NotFound { name });
    }

    if options.native {
        if let Some(path) = resource.local_path() {
            log::debug!("opening {name} natively");
            return Ok(StreamAdapter::new(native::open_file(&path, &mode)?));
        }
    }

    // Match the intent to its opener. All calls are blocking and
    // non-cancellable.
    let handle = if mode.updating {
        if mode.creating {
            RawHandle::Duplex(resource.create_readwrite()?)
        } else if mode.writing {
            RawHandle::Duplex(resource.replace_readwrite()?)
        } else {
            RawHandle::Duplex(resource.open_readwrite()?)
        }
    } else if mode.creating {
        RawHandle::Output(resource.create()?)
    } else if mode.reading {
        RawHandle::Input(resource.open_read()?)
    } else if mode.writing {
        RawHandle::Output(resource.replace()?)
    } else {
        RawHandle::Output(resource.append_to()?)
    };
    log::debug!("opened {name}");
    Ok(StreamAdapter::new(handle))
}

/// Buffer size a chunked layer should use for `resource`.
///
/// The heuristic: the underlying storage's block size when it is known
/// and meaningful, else [`DEFAULT_CHUNK_SIZE`].
pub fn recommended_buffer_size<R: Resource + ?Sized>(resource: &R) -> usize {
    match resource.block_size() {
        Some(block) if block > 1 => block as usize,
        _ => DEFAULT_CHUNK_SIZE,
    }
}
