//! The stream adapter: a standard file object over one raw handle.

use std::io;

use crate::{RawDuplex, RawInput, RawOutput, RawSeekOrigin, RawStream, StreamError, Whence};
use crate::types::DEFAULT_CHUNK_SIZE;

/// A raw handle classified by capability shape.
///
/// Providers hand out handles already classified as input-only,
/// output-only, or combined, so a [`StreamAdapter`] can only ever be
/// constructed around a valid shape. The combined variant is one object
/// whose input and output facets share a single position state.
pub enum RawHandle {
    /// Input-only handle.
    Input(Box<dyn RawInput>),
    /// Output-only handle.
    Output(Box<dyn RawOutput>),
    /// Combined bidirectional handle over one shared position.
    Duplex(Box<dyn RawDuplex>),
}

impl From<Box<dyn RawInput>> for RawHandle {
    fn from(stream: Box<dyn RawInput>) -> Self {
        RawHandle::Input(stream)
    }
}

impl From<Box<dyn RawOutput>> for RawHandle {
    fn from(stream: Box<dyn RawOutput>) -> Self {
        RawHandle::Output(stream)
    }
}

impl From<Box<dyn RawDuplex>> for RawHandle {
    fn from(stream: Box<dyn RawDuplex>) -> Self {
        RawHandle::Duplex(stream)
    }
}

/// Wraps one raw handle as a standard file object.
///
/// The adapter exposes the conventional contract — read, write, seek,
/// tell, truncate, close, flush, capability queries — over whatever raw
/// handle a provider supplied. It adds no buffering of its own: reads and
/// writes forward as single calls, short transfers are returned as-is,
/// and an outer layer loops if it needs full transfers.
///
/// The capability shape (readable, writable, or both) is fixed at
/// construction and never changes. After [`close`](StreamAdapter::close),
/// every operation fails with [`StreamError::Closed`]; operations outside
/// the capability set fail with [`StreamError::Unsupported`].
///
/// `StreamAdapter` implements [`std::io::Read`], [`std::io::Write`] and
/// [`std::io::Seek`], so standard buffering layers stack directly on top:
///
/// ```rust
/// use std::io::BufReader;
/// # use anystream::{RawHandle, RawInput, RawSeekOrigin, RawStream, StreamAdapter, StreamError};
/// # struct Empty;
/// # impl RawStream for Empty {
/// #     fn close(&mut self) -> Result<(), StreamError> { Ok(()) }
/// #     fn is_closed(&self) -> bool { false }
/// #     fn can_seek(&self) -> bool { false }
/// #     fn seek(&mut self, _: i64, _: RawSeekOrigin) -> Result<(), StreamError> {
/// #         Err(StreamError::Unsupported { operation: "seek" })
/// #     }
/// #     fn tell(&self) -> u64 { 0 }
/// # }
/// # impl RawInput for Empty {
/// #     fn read(&mut self, _: &mut [u8]) -> Result<usize, StreamError> { Ok(0) }
/// # }
/// let adapter = StreamAdapter::new(RawHandle::Input(Box::new(Empty)));
/// let mut reader = BufReader::new(adapter);
/// ```
///
/// A single adapter instance is not safe for concurrent use: position and
/// the closed flag are read-modify-use state with no internal locking.
pub struct StreamAdapter {
    handle: RawHandle,
}

impl std::fmt::Debug for RawHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let variant = match self {
            RawHandle::Input(_) => "Input",
            RawHandle::Output(_) => "Output",
            RawHandle::Duplex(_) => "Duplex",
        };
        f.debug_tuple(variant).finish()
    }
}

impl std::fmt::Debug for StreamAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamAdapter")
            .field("handle", &self.handle)
            .finish()
    }
}

impl StreamAdapter {
    /// Wrap a classified raw handle.
    pub fn new(handle: RawHandle) -> Self {
        Self { handle }
    }

    /// The handle used for status queries: the input facet when present,
    /// else the output stream.
    fn reference(&self) -> &dyn RawStream {
        match &self.handle {
            RawHandle::Input(stream) => &**stream,
            RawHandle::Output(stream) => &**stream,
            RawHandle::Duplex(stream) => &**stream,
        }
    }

    fn check_closed(&self, operation: &'static str) -> Result<(), StreamError> {
        if self.reference().is_closed() {
            Err(StreamError::Closed { operation })
        } else {
            Ok(())
        }
    }

    fn input_mut(&mut self, operation: &'static str) -> Result<&mut dyn RawInput, StreamError> {
        match &mut self.handle {
            RawHandle::Input(stream) => Ok(&mut **stream),
            RawHandle::Duplex(stream) => Ok(&mut **stream),
            RawHandle::Output(_) => Err(StreamError::Unsupported { operation }),
        }
    }

    fn output_mut(&mut self, operation: &'static str) -> Result<&mut dyn RawOutput, StreamError> {
        match &mut self.handle {
            RawHandle::Output(stream) => Ok(&mut **stream),
            RawHandle::Duplex(stream) => Ok(&mut **stream),
            RawHandle::Input(_) => Err(StreamError::Unsupported { operation }),
        }
    }

    /// Whether the stream can be read from.
    pub fn readable(&self) -> bool {
        matches!(self.handle, RawHandle::Input(_) | RawHandle::Duplex(_))
    }

    /// Whether the stream can be written to.
    pub fn writable(&self) -> bool {
        matches!(self.handle, RawHandle::Output(_) | RawHandle::Duplex(_))
    }

    /// Whether the stream supports seeking.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Closed`] if the stream is closed
    pub fn seekable(&self) -> Result<bool, StreamError> {
        self.check_closed("seekable")?;
        Ok(self.reference().can_seek())
    }

    /// `true` if the underlying stream is closed. Always queries live
    /// state; never cached.
    pub fn is_closed(&self) -> bool {
        self.reference().is_closed()
    }

    /// Close the underlying stream.
    ///
    /// Closing a combined handle closes both facets atomically. Calling
    /// this more than once is allowed; only the first call has an effect.
    /// Once closed, every other operation fails with
    /// [`StreamError::Closed`].
    pub fn close(&mut self) -> Result<(), StreamError> {
        if self.is_closed() {
            return Ok(());
        }
        log::trace!("closing stream");
        match &mut self.handle {
            RawHandle::Input(stream) => stream.close(),
            RawHandle::Output(stream) => stream.close(),
            RawHandle::Duplex(stream) => stream.close(),
        }
    }

    /// Flush provider-side write buffers if applicable.
    ///
    /// Does nothing for read-only streams.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Closed`] if the stream is closed
    pub fn flush(&mut self) -> Result<(), StreamError> {
        self.check_closed("flush")?;
        match &mut self.handle {
            RawHandle::Output(stream) => stream.flush(),
            RawHandle::Duplex(stream) => stream.flush(),
            RawHandle::Input(_) => Ok(()),
        }
    }

    /// The underlying OS descriptor, if the stream is descriptor-backed.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Closed`] if the stream is closed
    /// - [`StreamError::Unsupported`] if the stream has no descriptor
    pub fn descriptor(&self) -> Result<i32, StreamError> {
        self.check_closed("descriptor")?;
        self.reference()
            .descriptor()
            .ok_or(StreamError::Unsupported {
                operation: "descriptor",
            })
    }

    /// Read up to `size` bytes and return them; `None` reads to
    /// end-of-stream.
    ///
    /// With `Some(n)`, a single underlying read request is issued and its
    /// result returned — possibly fewer than `n` bytes; this is not a
    /// read-until-filled guarantee. With `None`, bytes are accumulated
    /// until a zero-length chunk signals end-of-stream, growing the chunk
    /// plan so the number of underlying calls scales with the logarithm of
    /// the stream length rather than linearly.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Closed`] if the stream is closed
    /// - [`StreamError::Unsupported`] if the stream is not readable
    pub fn read(&mut self, size: Option<usize>) -> Result<Vec<u8>, StreamError> {
        self.check_closed("read")?;
        if !self.readable() {
            return Err(StreamError::Unsupported { operation: "read" });
        }
        match size {
            Some(0) => Ok(Vec::new()),
            Some(n) => {
                let mut buf = vec![0u8; n];
                let got = self.input_mut("read")?.read(&mut buf)?;
                buf.truncate(got);
                Ok(buf)
            }
            None => self.read_to_eof(),
        }
    }

    /// Read and return all bytes until end-of-stream.
    ///
    /// Equivalent to [`read(None)`](StreamAdapter::read).
    pub fn read_all(&mut self) -> Result<Vec<u8>, StreamError> {
        self.read(None)
    }

    fn read_to_eof(&mut self) -> Result<Vec<u8>, StreamError> {
        let position = self.reference().tell();
        let input = self.input_mut("read")?;
        // Initial plan: the input stream's own buffer size if it has one,
        // else total size relative to position, else the default.
        let configured = input.configured_buffer_size();
        let default_chunk = configured.unwrap_or(DEFAULT_CHUNK_SIZE);
        let mut plan = match configured {
            Some(size) => size,
            None => match input.known_size() {
                Some(end) if end >= position => (end - position + 1) as usize,
                _ => DEFAULT_CHUNK_SIZE,
            },
        };
        let mut result = Vec::new();
        loop {
            if result.len() >= plan {
                plan = result.len();
                plan += plan.max(default_chunk);
            }
            let start = result.len();
            result.resize(plan, 0);
            let got = input.read(&mut result[start..])?;
            result.truncate(start + got);
            if got == 0 {
                // EOF reached
                break;
            }
        }
        Ok(result)
    }

    /// Read bytes into the front of a pre-allocated buffer.
    ///
    /// A single underlying read request of up to `buf.len()` bytes is
    /// issued; returns the number of bytes actually placed in `buf`. The
    /// buffer is not guaranteed to be filled, and bytes past the returned
    /// count are left untouched.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Closed`] if the stream is closed
    /// - [`StreamError::Unsupported`] if the stream is not readable
    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<usize, StreamError> {
        self.check_closed("read_into")?;
        if !self.readable() {
            return Err(StreamError::Unsupported {
                operation: "read_into",
            });
        }
        self.input_mut("read_into")?.read(buf)
    }

    /// Change the stream position.
    ///
    /// `offset` is interpreted relative to `whence`. The conventional
    /// [`Whence`] encoding is translated to the provider's
    /// [`RawSeekOrigin`] before the underlying call. The seek is applied
    /// to the input facet if readable and the output facet if writable;
    /// for a combined handle both facets are one shared position, so a
    /// single underlying call covers both.
    ///
    /// Returns the new absolute position as read back from the stream —
    /// the provider's authoritative resulting offset, not the requested
    /// target.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Closed`] if the stream is closed
    /// - [`StreamError::Unsupported`] if the stream is not seekable
    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64, StreamError> {
        self.check_closed("seek")?;
        if !self.reference().can_seek() {
            return Err(StreamError::Unsupported { operation: "seek" });
        }
        let origin = RawSeekOrigin::from(whence);
        match &mut self.handle {
            RawHandle::Input(stream) => stream.seek(offset, origin)?,
            RawHandle::Output(stream) => stream.seek(offset, origin)?,
            RawHandle::Duplex(stream) => stream.seek(offset, origin)?,
        }
        Ok(self.reference().tell())
    }

    /// Current stream position. A pure query, no seek side effect.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Closed`] if the stream is closed
    pub fn tell(&self) -> Result<u64, StreamError> {
        self.check_closed("tell")?;
        Ok(self.reference().tell())
    }

    /// Resize the underlying resource to `size` bytes; `None` uses the
    /// output stream's current position.
    ///
    /// Returns the size used. Does not reposition afterward beyond what
    /// the provider's truncation itself implies.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Closed`] if the stream is closed
    /// - [`StreamError::Unsupported`] if the stream is not writable or
    ///   cannot truncate
    pub fn truncate(&mut self, size: Option<u64>) -> Result<u64, StreamError> {
        self.check_closed("truncate")?;
        let output = self.output_mut("truncate")?;
        if !output.can_truncate() {
            return Err(StreamError::Unsupported {
                operation: "truncate",
            });
        }
        let target = size.unwrap_or_else(|| output.tell());
        output.truncate(target)?;
        Ok(target)
    }

    /// Write `data` to the stream.
    ///
    /// Empty input returns `0` without touching the provider. Otherwise a
    /// single underlying write is issued and the provider's count is
    /// returned — possibly less than `data.len()`; the adapter performs no
    /// retry loop.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Closed`] if the stream is closed
    /// - [`StreamError::Unsupported`] if the stream is not writable
    pub fn write(&mut self, data: &[u8]) -> Result<usize, StreamError> {
        self.check_closed("write")?;
        if !self.writable() {
            return Err(StreamError::Unsupported { operation: "write" });
        }
        if data.is_empty() {
            return Ok(0);
        }
        self.output_mut("write")?.write(data)
    }
}

impl Drop for StreamAdapter {
    /// Best-effort close. Explicit [`close`](StreamAdapter::close) is the
    /// sanctioned release path; this is only a backstop.
    fn drop(&mut self) {
        if !self.is_closed() {
            if let Err(error) = self.close() {
                log::debug!("close during drop failed: {error}");
            }
        }
    }
}

impl io::Read for StreamAdapter {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read_into(buf).map_err(Into::into)
    }
}

impl io::Write for StreamAdapter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        StreamAdapter::write(self, buf).map_err(Into::into)
    }

    fn flush(&mut self) -> io::Result<()> {
        StreamAdapter::flush(self).map_err(Into::into)
    }
}

impl io::Seek for StreamAdapter {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        let (offset, whence) = match pos {
            io::SeekFrom::Start(offset) => (offset as i64, Whence::Start),
            io::SeekFrom::Current(offset) => (offset, Whence::Current),
            io::SeekFrom::End(offset) => (offset, Whence::End),
        };
        StreamAdapter::seek(self, offset, whence).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Mock input stream over a fixed byte vector.
    struct MockInput {
        data: Vec<u8>,
        position: u64,
        closed: Arc<AtomicBool>,
        seekable: bool,
        size_hint: bool,
        configured: Option<usize>,
        descriptor: Option<i32>,
        // Requested chunk sizes, one entry per underlying read call.
        requests: Arc<Mutex<Vec<usize>>>,
    }

    impl MockInput {
        fn new(data: &[u8]) -> Self {
            Self {
                data: data.to_vec(),
                position: 0,
                closed: Arc::new(AtomicBool::new(false)),
                seekable: true,
                size_hint: true,
                configured: None,
                descriptor: None,
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    fn mock_seek(
        position: &mut u64,
        len: u64,
        offset: i64,
        origin: RawSeekOrigin,
    ) -> Result<(), StreamError> {
        let base = match origin {
            RawSeekOrigin::Start => 0,
            RawSeekOrigin::Current => *position as i64,
            RawSeekOrigin::End => len as i64,
        };
        let target = base + offset;
        if target < 0 {
            return Err(StreamError::InvalidArgument {
                message: "negative seek position".into(),
            });
        }
        *position = target as u64;
        Ok(())
    }

    impl RawStream for MockInput {
        fn close(&mut self) -> Result<(), StreamError> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
        fn is_closed(&self) -> bool {
            self.closed.load(Ordering::SeqCst)
        }
        fn can_seek(&self) -> bool {
            self.seekable
        }
        fn seek(&mut self, offset: i64, origin: RawSeekOrigin) -> Result<(), StreamError> {
            mock_seek(&mut self.position, self.data.len() as u64, offset, origin)
        }
        fn tell(&self) -> u64 {
            self.position
        }
        fn descriptor(&self) -> Option<i32> {
            self.descriptor
        }
        fn configured_buffer_size(&self) -> Option<usize> {
            self.configured
        }
        fn known_size(&self) -> Option<u64> {
            self.size_hint.then(|| self.data.len() as u64)
        }
    }

    impl RawInput for MockInput {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, StreamError> {
            self.requests.lock().unwrap().push(buf.len());
            let remaining = self.data.len().saturating_sub(self.position as usize);
            let n = buf.len().min(remaining);
            let start = self.position as usize;
            buf[..n].copy_from_slice(&self.data[start..start + n]);
            self.position += n as u64;
            Ok(n)
        }
    }

    /// Mock output stream writing into a shared byte vector.
    struct MockOutput {
        data: Arc<Mutex<Vec<u8>>>,
        position: u64,
        closed: Arc<AtomicBool>,
        seekable: bool,
        truncatable: bool,
        // Caps each write to simulate short writes.
        write_limit: Option<usize>,
        writes: Arc<Mutex<Vec<usize>>>,
        flushes: Arc<Mutex<usize>>,
    }

    impl MockOutput {
        fn new() -> Self {
            Self {
                data: Arc::new(Mutex::new(Vec::new())),
                position: 0,
                closed: Arc::new(AtomicBool::new(false)),
                seekable: true,
                truncatable: true,
                write_limit: None,
                writes: Arc::new(Mutex::new(Vec::new())),
                flushes: Arc::new(Mutex::new(0)),
            }
        }
    }

    impl RawStream for MockOutput {
        fn close(&mut self) -> Result<(), StreamError> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
        fn is_closed(&self) -> bool {
            self.closed.load(Ordering::SeqCst)
        }
        fn can_seek(&self) -> bool {
            self.seekable
        }
        fn seek(&mut self, offset: i64, origin: RawSeekOrigin) -> Result<(), StreamError> {
            let len = self.data.lock().unwrap().len() as u64;
            mock_seek(&mut self.position, len, offset, origin)
        }
        fn tell(&self) -> u64 {
            self.position
        }
    }

    impl RawOutput for MockOutput {
        fn write(&mut self, data: &[u8]) -> Result<usize, StreamError> {
            let n = self.write_limit.map_or(data.len(), |cap| cap.min(data.len()));
            self.writes.lock().unwrap().push(data.len());
            let mut stored = self.data.lock().unwrap();
            let start = self.position as usize;
            if stored.len() < start + n {
                stored.resize(start + n, 0);
            }
            stored[start..start + n].copy_from_slice(&data[..n]);
            self.position += n as u64;
            Ok(n)
        }
        fn flush(&mut self) -> Result<(), StreamError> {
            *self.flushes.lock().unwrap() += 1;
            Ok(())
        }
        fn can_truncate(&self) -> bool {
            self.truncatable
        }
        fn truncate(&mut self, size: u64) -> Result<(), StreamError> {
            if !self.truncatable {
                return Err(StreamError::Unsupported {
                    operation: "truncate",
                });
            }
            self.data.lock().unwrap().resize(size as usize, 0);
            Ok(())
        }
    }

    /// Mock combined stream: one buffer, one position, both facets.
    struct MockDuplex {
        data: Vec<u8>,
        position: u64,
        closed: Arc<AtomicBool>,
        seekable: bool,
        truncatable: bool,
        flushes: Arc<Mutex<usize>>,
    }

    impl MockDuplex {
        fn new(data: &[u8]) -> Self {
            Self {
                data: data.to_vec(),
                position: 0,
                closed: Arc::new(AtomicBool::new(false)),
                seekable: true,
                truncatable: true,
                flushes: Arc::new(Mutex::new(0)),
            }
        }
    }

    impl RawStream for MockDuplex {
        fn close(&mut self) -> Result<(), StreamError> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
        fn is_closed(&self) -> bool {
            self.closed.load(Ordering::SeqCst)
        }
        fn can_seek(&self) -> bool {
            self.seekable
        }
        fn seek(&mut self, offset: i64, origin: RawSeekOrigin) -> Result<(), StreamError> {
            mock_seek(&mut self.position, self.data.len() as u64, offset, origin)
        }
        fn tell(&self) -> u64 {
            self.position
        }
        fn known_size(&self) -> Option<u64> {
            Some(self.data.len() as u64)
        }
    }

    impl RawInput for MockDuplex {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, StreamError> {
            let remaining = self.data.len().saturating_sub(self.position as usize);
            let n = buf.len().min(remaining);
            let start = self.position as usize;
            buf[..n].copy_from_slice(&self.data[start..start + n]);
            self.position += n as u64;
            Ok(n)
        }
    }

    impl RawOutput for MockDuplex {
        fn write(&mut self, data: &[u8]) -> Result<usize, StreamError> {
            let start = self.position as usize;
            if self.data.len() < start + data.len() {
                self.data.resize(start + data.len(), 0);
            }
            self.data[start..start + data.len()].copy_from_slice(data);
            self.position += data.len() as u64;
            Ok(data.len())
        }
        fn flush(&mut self) -> Result<(), StreamError> {
            *self.flushes.lock().unwrap() += 1;
            Ok(())
        }
        fn can_truncate(&self) -> bool {
            self.truncatable
        }
        fn truncate(&mut self, size: u64) -> Result<(), StreamError> {
            self.data.resize(size as usize, 0);
            Ok(())
        }
    }

    fn input_adapter(input: MockInput) -> StreamAdapter {
        StreamAdapter::new(RawHandle::Input(Box::new(input)))
    }

    fn output_adapter(output: MockOutput) -> StreamAdapter {
        StreamAdapter::new(RawHandle::Output(Box::new(output)))
    }

    fn duplex_adapter(duplex: MockDuplex) -> StreamAdapter {
        StreamAdapter::new(RawHandle::Duplex(Box::new(duplex)))
    }

    #[test]
    fn capability_partition() {
        let reader = input_adapter(MockInput::new(b"abc"));
        assert!(reader.readable() && !reader.writable());

        let writer = output_adapter(MockOutput::new());
        assert!(!writer.readable() && writer.writable());

        let both = duplex_adapter(MockDuplex::new(b""));
        assert!(both.readable() && both.writable());
    }

    #[test]
    fn close_is_idempotent() {
        let input = MockInput::new(b"abc");
        let closed = input.closed.clone();
        let mut adapter = input_adapter(input);

        assert!(!adapter.is_closed());
        adapter.close().unwrap();
        assert!(adapter.is_closed());
        assert!(closed.load(Ordering::SeqCst));
        // Second close is a no-op, not an error.
        adapter.close().unwrap();
        assert!(adapter.is_closed());
    }

    #[test]
    fn every_operation_fails_after_close() {
        let mut adapter = duplex_adapter(MockDuplex::new(b"abcdef"));
        adapter.close().unwrap();

        assert!(matches!(
            adapter.read(Some(1)),
            Err(StreamError::Closed { .. })
        ));
        assert!(matches!(adapter.read(None), Err(StreamError::Closed { .. })));
        let mut buf = [0u8; 4];
        assert!(matches!(
            adapter.read_into(&mut buf),
            Err(StreamError::Closed { .. })
        ));
        assert!(matches!(
            adapter.write(b"x"),
            Err(StreamError::Closed { .. })
        ));
        assert!(matches!(
            adapter.seek(0, Whence::Start),
            Err(StreamError::Closed { .. })
        ));
        assert!(matches!(adapter.tell(), Err(StreamError::Closed { .. })));
        assert!(matches!(
            adapter.truncate(None),
            Err(StreamError::Closed { .. })
        ));
        assert!(matches!(adapter.flush(), Err(StreamError::Closed { .. })));
        assert!(matches!(
            adapter.descriptor(),
            Err(StreamError::Closed { .. })
        ));
        assert!(matches!(
            adapter.seekable(),
            Err(StreamError::Closed { .. })
        ));
    }

    #[test]
    fn zero_length_read_skips_provider() {
        let input = MockInput::new(b"abc");
        let requests = input.requests.clone();
        let mut adapter = input_adapter(input);

        assert_eq!(adapter.read(Some(0)).unwrap(), b"");
        assert!(requests.lock().unwrap().is_empty());
    }

    #[test]
    fn zero_length_write_skips_provider() {
        let output = MockOutput::new();
        let writes = output.writes.clone();
        let mut adapter = output_adapter(output);

        assert_eq!(adapter.write(b"").unwrap(), 0);
        assert!(writes.lock().unwrap().is_empty());
    }

    #[test]
    fn read_size_contract() {
        let data: Vec<u8> = (0u8..20).collect();
        let mut adapter = input_adapter(MockInput::new(&data));

        assert_eq!(adapter.read(Some(5)).unwrap(), &data[..5]);
        assert_eq!(adapter.read(Some(5)).unwrap(), &data[5..10]);
        assert_eq!(adapter.read(None).unwrap(), &data[10..]);
        assert_eq!(adapter.read(None).unwrap(), b"");
    }

    #[test]
    fn sized_read_issues_one_request() {
        let input = MockInput::new(b"hello world");
        let requests = input.requests.clone();
        let mut adapter = input_adapter(input);

        adapter.read(Some(5)).unwrap();
        assert_eq!(*requests.lock().unwrap(), vec![5]);
    }

    #[test]
    fn read_all_is_read_to_eof() {
        let data: Vec<u8> = (0u8..20).collect();
        let mut adapter = input_adapter(MockInput::new(&data));
        assert_eq!(adapter.read_all().unwrap(), data);
    }

    #[test]
    fn read_past_eof_returns_empty() {
        let mut adapter = input_adapter(MockInput::new(b"ab"));
        assert_eq!(adapter.read(Some(10)).unwrap(), b"ab");
        assert_eq!(adapter.read(Some(10)).unwrap(), b"");
        assert_eq!(adapter.read(None).unwrap(), b"");
    }

    #[test]
    fn unknown_length_read_scales_logarithmically() {
        let data = vec![7u8; DEFAULT_CHUNK_SIZE * 10];
        let mut input = MockInput::new(&data);
        input.size_hint = false;
        let requests = input.requests.clone();
        let mut adapter = input_adapter(input);

        assert_eq!(adapter.read(None).unwrap(), data);
        // Growth doubles the outstanding headroom, so call count stays
        // logarithmic in size/DEFAULT_CHUNK_SIZE instead of linear.
        let calls = requests.lock().unwrap().len();
        assert!(calls <= 8, "expected few provider reads, got {calls}");
    }

    #[test]
    fn known_size_read_uses_remaining_plus_one() {
        let data = vec![3u8; 100];
        let input = MockInput::new(&data);
        let requests = input.requests.clone();
        let mut adapter = input_adapter(input);

        adapter.seek(40, Whence::Start).unwrap();
        assert_eq!(adapter.read(None).unwrap(), &data[40..]);
        // First request covers the remaining bytes plus one; the second
        // observes EOF.
        assert_eq!(*requests.lock().unwrap(), vec![61, 1]);
    }

    #[test]
    fn configured_buffer_size_seeds_the_plan() {
        let data = vec![9u8; 1000];
        let mut input = MockInput::new(&data);
        input.configured = Some(64);
        let requests = input.requests.clone();
        let mut adapter = input_adapter(input);

        assert_eq!(adapter.read(None).unwrap(), data);
        let requests = requests.lock().unwrap();
        assert_eq!(requests[0], 64);
        assert!(requests.len() <= 8, "got {} provider reads", requests.len());
    }

    #[test]
    fn read_into_does_not_fill() {
        let mut adapter = input_adapter(MockInput::new(b"hi"));
        let mut buf = [0xAAu8; 10];

        let n = adapter.read_into(&mut buf).unwrap();
        assert_eq!(n, 2);
        assert_eq!(&buf[..2], b"hi");
        // Bytes past the returned count are untouched.
        assert!(buf[2..].iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn seek_tell_round_trip() {
        let mut adapter = duplex_adapter(MockDuplex::new(&[0u8; 20]));

        assert_eq!(adapter.seek(0, Whence::Start).unwrap(), 0);
        assert_eq!(adapter.seek(10, Whence::Start).unwrap(), 10);
        assert_eq!(adapter.seek(5, Whence::Current).unwrap(), 15);
        assert_eq!(adapter.seek(-5, Whence::Current).unwrap(), 10);
        assert_eq!(adapter.seek(-5, Whence::End).unwrap(), 15);
        assert_eq!(adapter.tell().unwrap(), 15);
    }

    #[test]
    fn tell_has_no_side_effects() {
        let mut adapter = input_adapter(MockInput::new(b"abcdef"));
        adapter.seek(3, Whence::Start).unwrap();
        assert_eq!(adapter.tell().unwrap(), 3);
        assert_eq!(adapter.tell().unwrap(), 3);
        assert_eq!(adapter.read(Some(1)).unwrap(), b"d");
    }

    #[test]
    fn unsupported_operation_surface() {
        let mut writer = output_adapter(MockOutput::new());
        assert!(matches!(
            writer.read(Some(1)),
            Err(StreamError::Unsupported { .. })
        ));
        let mut buf = [0u8; 1];
        assert!(matches!(
            writer.read_into(&mut buf),
            Err(StreamError::Unsupported { .. })
        ));

        let mut reader = input_adapter(MockInput::new(b"abc"));
        assert!(matches!(
            reader.write(b"x"),
            Err(StreamError::Unsupported { .. })
        ));
        assert!(matches!(
            reader.truncate(None),
            Err(StreamError::Unsupported { .. })
        ));

        let mut input = MockInput::new(b"abc");
        input.seekable = false;
        let mut unseekable = input_adapter(input);
        assert!(!unseekable.seekable().unwrap());
        assert!(matches!(
            unseekable.seek(0, Whence::Start),
            Err(StreamError::Unsupported { .. })
        ));

        let mut output = MockOutput::new();
        output.truncatable = false;
        let mut fixed = output_adapter(output);
        assert!(matches!(
            fixed.truncate(Some(0)),
            Err(StreamError::Unsupported { .. })
        ));
    }

    #[test]
    fn descriptor_probe() {
        let mut input = MockInput::new(b"");
        input.descriptor = Some(42);
        let adapter = input_adapter(input);
        assert_eq!(adapter.descriptor().unwrap(), 42);

        let bare = input_adapter(MockInput::new(b""));
        assert!(matches!(
            bare.descriptor(),
            Err(StreamError::Unsupported {
                operation: "descriptor"
            })
        ));
    }

    #[test]
    fn flush_is_noop_for_read_only() {
        let mut adapter = input_adapter(MockInput::new(b"abc"));
        adapter.flush().unwrap();
    }

    #[test]
    fn flush_forwards_to_output() {
        let duplex = MockDuplex::new(b"");
        let flushes = duplex.flushes.clone();
        let mut adapter = duplex_adapter(duplex);

        adapter.flush().unwrap();
        assert_eq!(*flushes.lock().unwrap(), 1);
    }

    #[test]
    fn truncate_defaults_to_output_position() {
        let mut adapter = duplex_adapter(MockDuplex::new(&[1u8; 20]));
        adapter.seek(5, Whence::Start).unwrap();

        assert_eq!(adapter.truncate(None).unwrap(), 5);
        assert_eq!(adapter.seek(0, Whence::End).unwrap(), 5);
    }

    #[test]
    fn truncate_with_explicit_size() {
        let output = MockOutput::new();
        let data = output.data.clone();
        let mut adapter = output_adapter(output);

        adapter.write(b"hello world").unwrap();
        assert_eq!(adapter.truncate(Some(5)).unwrap(), 5);
        assert_eq!(&*data.lock().unwrap(), b"hello");
    }

    #[test]
    fn short_writes_are_returned_not_retried() {
        let mut output = MockOutput::new();
        output.write_limit = Some(3);
        let writes = output.writes.clone();
        let mut adapter = output_adapter(output);

        assert_eq!(adapter.write(b"hello").unwrap(), 3);
        // Exactly one underlying call, carrying the full data.
        assert_eq!(*writes.lock().unwrap(), vec![5]);
    }

    #[test]
    fn write_reports_provider_count() {
        let output = MockOutput::new();
        let data = output.data.clone();
        let mut adapter = output_adapter(output);

        assert_eq!(adapter.write(b"spam").unwrap(), 4);
        assert_eq!(&*data.lock().unwrap(), b"spam");
    }

    #[test]
    fn duplex_facets_share_position() {
        let mut adapter = duplex_adapter(MockDuplex::new(b"abcdef"));

        assert_eq!(adapter.read(Some(3)).unwrap(), b"abc");
        // A write continues from the shared position the read advanced.
        adapter.write(b"XY").unwrap();
        adapter.seek(0, Whence::Start).unwrap();
        assert_eq!(adapter.read(None).unwrap(), b"abcXYf");
    }

    #[test]
    fn drop_closes_the_stream() {
        let input = MockInput::new(b"abc");
        let closed = input.closed.clone();
        {
            let _adapter = input_adapter(input);
        }
        assert!(closed.load(Ordering::SeqCst));
    }

    #[test]
    fn drop_after_close_does_not_reclose() {
        let mut adapter = input_adapter(MockInput::new(b"abc"));
        adapter.close().unwrap();
        drop(adapter);
    }

    #[test]
    fn std_io_read_write_seek() {
        use std::io::{Read, Seek, SeekFrom, Write};

        let mut adapter = duplex_adapter(MockDuplex::new(b""));
        Write::write_all(&mut adapter, b"hello world").unwrap();
        Seek::seek(&mut adapter, SeekFrom::Start(6)).unwrap();

        let mut buf = String::new();
        Read::read_to_string(&mut adapter, &mut buf).unwrap();
        assert_eq!(buf, "world");

        assert_eq!(Seek::seek(&mut adapter, SeekFrom::End(-5)).unwrap(), 6);
        Write::flush(&mut adapter).unwrap();
    }

    #[test]
    fn std_io_errors_keep_their_kind() {
        use std::io::Read;

        let mut writer = output_adapter(MockOutput::new());
        let mut buf = [0u8; 1];
        let err = Read::read(&mut writer, &mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }
}
