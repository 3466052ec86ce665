//! Core types for the AnyStream adapter.

use crate::StreamError;

/// Default chunk size for reads of unknown length, in bytes.
///
/// Used when the input stream exposes neither a configured buffer size nor
/// a usable total size, and as the fallback of
/// [`recommended_buffer_size`](crate::recommended_buffer_size).
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Reference point for a seek offset, in the conventional encoding.
///
/// This is the caller-facing enumeration: 0 = start, 1 = current, 2 = end.
/// Providers use [`RawSeekOrigin`], whose encoding transposes the first two
/// values; conversion between the two goes through `From`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum Whence {
    /// Relative to the start of the stream; offset should not be negative.
    Start = 0,
    /// Relative to the current position; offset may be negative.
    Current = 1,
    /// Relative to the end of the stream; offset is usually negative.
    End = 2,
}

/// Reference point for a seek offset, in the provider-side encoding.
///
/// Relative-to-current is 0 and relative-to-start is 1 — transposed from
/// [`Whence`]. Relative-to-end is 2 in both encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum RawSeekOrigin {
    /// Relative to the current position.
    Current = 0,
    /// Relative to the start of the stream.
    Start = 1,
    /// Relative to the end of the stream.
    End = 2,
}

impl From<Whence> for RawSeekOrigin {
    fn from(whence: Whence) -> Self {
        match whence {
            Whence::Start => RawSeekOrigin::Start,
            Whence::Current => RawSeekOrigin::Current,
            Whence::End => RawSeekOrigin::End,
        }
    }
}

/// Type of a target resource, as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceType {
    /// Regular file (or file-like resource).
    File,
    /// Directory.
    Directory,
    /// Anything else (special files, unknown).
    Other,
}

/// Parsed open mode.
///
/// Built from a mode string over the character set `{a, x, r, w, b, t, +}`
/// with at most one of `a`/`x`/`r`/`w`, at most one `+`, and `b`/`t`
/// mutually exclusive. Text mode (`t`) is the default.
///
/// # Examples
///
/// ```rust
/// use anystream::OpenMode;
///
/// let mode = OpenMode::parse("rb").unwrap();
/// assert!(mode.reading && mode.binary && !mode.updating);
/// assert!(mode.readable() && !mode.writable());
///
/// let mode = OpenMode::parse("w+b").unwrap();
/// assert!(mode.readable() && mode.writable());
///
/// assert!(OpenMode::parse("rw").is_err());
/// assert!(OpenMode::parse("bb").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenMode {
    /// Create a new resource, failing if it already exists (`x`).
    pub creating: bool,
    /// Open for reading (`r`).
    pub reading: bool,
    /// Open for writing, truncating first (`w`).
    pub writing: bool,
    /// Open for writing, appending to the end (`a`).
    pub appending: bool,
    /// Open for updating — reading and writing (`+`).
    pub updating: bool,
    /// Binary mode (`b`); text mode otherwise.
    pub binary: bool,
}

impl OpenMode {
    /// Open for reading in binary mode (`"rb"`).
    pub const READ: Self = Self {
        creating: false,
        reading: true,
        writing: false,
        appending: false,
        updating: false,
        binary: true,
    };

    /// Open for writing in binary mode, truncating first (`"wb"`).
    pub const WRITE: Self = Self {
        creating: false,
        reading: false,
        writing: true,
        appending: false,
        updating: false,
        binary: true,
    };

    /// Open for appending in binary mode (`"ab"`).
    pub const APPEND: Self = Self {
        creating: false,
        reading: false,
        writing: false,
        appending: true,
        updating: false,
        binary: true,
    };

    /// Open for reading and writing in binary mode (`"r+b"`).
    pub const READ_WRITE: Self = Self {
        creating: false,
        reading: true,
        writing: false,
        appending: false,
        updating: true,
        binary: true,
    };

    /// Parse a mode string.
    ///
    /// # Errors
    ///
    /// - [`StreamError::InvalidMode`] for characters outside the set or
    ///   duplicated characters
    /// - [`StreamError::InvalidArgument`] for invalid combinations (both
    ///   `b` and `t`, or not exactly one of `a`/`x`/`r`/`w`)
    pub fn parse(mode: &str) -> Result<Self, StreamError> {
        let mut parsed = Self::default();
        let mut text = false;
        let mut plus = false;
        for ch in mode.chars() {
            let flag = match ch {
                'a' => &mut parsed.appending,
                'x' => &mut parsed.creating,
                'r' => &mut parsed.reading,
                'w' => &mut parsed.writing,
                'b' => &mut parsed.binary,
                't' => &mut text,
                '+' => &mut plus,
                _ => {
                    return Err(StreamError::InvalidMode { mode: mode.into() });
                }
            };
            if *flag {
                // Duplicate character.
                return Err(StreamError::InvalidMode { mode: mode.into() });
            }
            *flag = true;
        }
        parsed.updating = plus;
        if parsed.binary && text {
            return Err(StreamError::InvalidArgument {
                message: "can't have text and binary mode at once".into(),
            });
        }
        let bases = [
            parsed.creating,
            parsed.reading,
            parsed.writing,
            parsed.appending,
        ]
        .iter()
        .filter(|&&b| b)
        .count();
        if bases != 1 {
            return Err(StreamError::InvalidArgument {
                message: "must have exactly one of create/read/write/append mode".into(),
            });
        }
        Ok(parsed)
    }

    /// Whether a stream opened with this mode can be read from.
    #[inline]
    pub fn readable(&self) -> bool {
        self.reading || self.updating
    }

    /// Whether a stream opened with this mode can be written to.
    #[inline]
    pub fn writable(&self) -> bool {
        self.creating || self.writing || self.appending || self.updating
    }
}

/// Buffering policy accepted by the boundary `open`.
///
/// The adapter itself never buffers; this policy is validated at the
/// boundary and describes the chunked layer a caller may stack on top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Buffering {
    /// Heuristic default: the resource's block size when known, else
    /// [`DEFAULT_CHUNK_SIZE`].
    #[default]
    Default,
    /// No buffering; only legal in binary mode.
    None,
    /// Line buffering; only legal in text mode.
    Line,
    /// Fixed-size chunk buffer of the given size (must be at least 1).
    Size(usize),
}
