//! Native raw streams over local files.
//!
//! When a [`Resource`](crate::Resource) reports a local path, the boundary
//! [`open`](crate::open()) can bypass provider streams and drive the
//! platform file API directly. [`FileStream`] is that route: a raw stream
//! over [`std::fs::File`] honoring the same contract provider streams do —
//! short reads surfaced as-is, `0` exactly at end-of-stream, seek in the
//! provider-side origin encoding.

use std::fs;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::{
    OpenMode, RawHandle, RawInput, RawOutput, RawSeekOrigin, RawStream, StreamError,
};

/// A raw stream over a local file.
///
/// Keeps a shadow position that is refreshed from the file after every
/// positioning operation, so [`tell`](RawStream::tell) stays authoritative
/// even in append mode.
#[derive(Debug)]
pub struct FileStream {
    file: Option<fs::File>,
    name: String,
    position: u64,
    readable: bool,
    writable: bool,
}

impl FileStream {
    /// Open `path` according to `mode`.
    ///
    /// # Errors
    ///
    /// - [`StreamError::NotFound`] when reading a missing file
    /// - [`StreamError::AlreadyExists`] on exclusive creation of an
    ///   existing file
    /// - [`StreamError::IsADirectory`] when the path is a directory
    pub fn open(path: &Path, mode: &OpenMode) -> Result<Self, StreamError> {
        let mut options = fs::OpenOptions::new();
        options.read(mode.readable());
        if mode.appending {
            options.append(true).create(true);
        } else if mode.writing {
            options.write(true).create(true).truncate(true);
        } else if mode.creating {
            options.write(true).create_new(true);
        } else if mode.updating {
            options.write(true);
        }
        let name = path.display().to_string();
        let file = options.open(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => StreamError::NotFound { name: name.clone() },
            std::io::ErrorKind::AlreadyExists => StreamError::AlreadyExists { name: name.clone() },
            std::io::ErrorKind::IsADirectory => StreamError::IsADirectory { name: name.clone() },
            _ => StreamError::Io {
                operation: "open",
                name: name.clone(),
                source,
            },
        })?;
        Ok(Self {
            file: Some(file),
            name,
            position: 0,
            readable: mode.readable(),
            writable: mode.writable(),
        })
    }

    fn file_mut(&mut self, operation: &'static str) -> Result<&mut fs::File, StreamError> {
        self.file.as_mut().ok_or(StreamError::Closed { operation })
    }

    fn io_error(&self, operation: &'static str, source: std::io::Error) -> StreamError {
        StreamError::Io {
            operation,
            name: self.name.clone(),
            source,
        }
    }
}

impl RawStream for FileStream {
    fn close(&mut self) -> Result<(), StreamError> {
        if let Some(mut file) = self.file.take() {
            if self.writable {
                file.flush()
                    .map_err(|source| self.io_error("close", source))?;
            }
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.file.is_none()
    }

    fn can_seek(&self) -> bool {
        self.file.is_some()
    }

    fn seek(&mut self, offset: i64, origin: RawSeekOrigin) -> Result<(), StreamError> {
        let target = match origin {
            RawSeekOrigin::Start => {
                if offset < 0 {
                    return Err(StreamError::InvalidArgument {
                        message: "negative seek position".into(),
                    });
                }
                SeekFrom::Start(offset as u64)
            }
            RawSeekOrigin::Current => SeekFrom::Current(offset),
            RawSeekOrigin::End => SeekFrom::End(offset),
        };
        let result = self.file_mut("seek")?.seek(target);
        match result {
            Ok(position) => {
                self.position = position;
                Ok(())
            }
            Err(source) => Err(self.io_error("seek", source)),
        }
    }

    fn tell(&self) -> u64 {
        self.position
    }

    #[cfg(unix)]
    fn descriptor(&self) -> Option<i32> {
        use std::os::fd::AsRawFd;
        self.file.as_ref().map(|file| file.as_raw_fd())
    }

    fn known_size(&self) -> Option<u64> {
        let metadata = self.file.as_ref()?.metadata().ok()?;
        Some(metadata.len())
    }
}

impl RawInput for FileStream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, StreamError> {
        if !self.readable {
            return Err(StreamError::Unsupported { operation: "read" });
        }
        let result = self.file_mut("read")?.read(buf);
        match result {
            Ok(n) => {
                self.position += n as u64;
                Ok(n)
            }
            Err(source) => Err(self.io_error("read", source)),
        }
    }
}

impl RawOutput for FileStream {
    fn write(&mut self, data: &[u8]) -> Result<usize, StreamError> {
        if !self.writable {
            return Err(StreamError::Unsupported { operation: "write" });
        }
        let file = self.file_mut("write")?;
        match file.write(data) {
            Ok(n) => {
                // Append mode writes land at the end wherever the shadow
                // position was; re-read the real offset.
                match file.stream_position() {
                    Ok(position) => self.position = position,
                    Err(_) => self.position += n as u64,
                }
                Ok(n)
            }
            Err(source) => Err(self.io_error("write", source)),
        }
    }

    fn flush(&mut self) -> Result<(), StreamError> {
        let result = self.file_mut("flush")?.flush();
        result.map_err(|source| self.io_error("flush", source))
    }

    fn can_truncate(&self) -> bool {
        self.writable && self.file.is_some()
    }

    fn truncate(&mut self, size: u64) -> Result<(), StreamError> {
        if !self.writable {
            return Err(StreamError::Unsupported {
                operation: "truncate",
            });
        }
        let result = self.file_mut("truncate")?.set_len(size);
        result.map_err(|source| self.io_error("truncate", source))
    }
}

/// Open `path` according to `mode` and classify the resulting stream.
///
/// The handle shape follows the mode's capability set: input-only for
/// plain reads, output-only for plain writes, combined for updating modes.
pub fn open_file(path: &Path, mode: &OpenMode) -> Result<RawHandle, StreamError> {
    let stream = FileStream::open(path, mode)?;
    Ok(match (mode.readable(), mode.writable()) {
        (true, true) => RawHandle::Duplex(Box::new(stream)),
        (true, false) => RawHandle::Input(Box::new(stream)),
        _ => RawHandle::Output(Box::new(stream)),
    })
}
