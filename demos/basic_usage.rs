//! Basic usage of the stream adapter.
//!
//! This example demonstrates the file-object contract the adapter exposes
//! over any raw stream: reads, writes, seeking, truncation, capability
//! queries, and the closed/unsupported error surface.
//!
//! Run with: `cargo run --example basic_usage`

use anystream::*;

// =============================================================================
// Step 1: Create a minimal raw stream implementation
// =============================================================================

/// A simple in-memory bidirectional stream: one buffer, one position.
///
/// This is the minimum viable provider stream. Because it implements both
/// `RawInput` and `RawOutput`, it is a `RawDuplex` automatically and can
/// back a read-write adapter.
struct MemStream {
    data: Vec<u8>,
    position: u64,
    closed: bool,
}

impl MemStream {
    fn new() -> Self {
        Self {
            data: Vec::new(),
            position: 0,
            closed: false,
        }
    }
}

impl RawStream for MemStream {
    fn close(&mut self) -> Result<(), StreamError> {
        self.closed = true;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn can_seek(&self) -> bool {
        true
    }

    fn seek(&mut self, offset: i64, origin: RawSeekOrigin) -> Result<(), StreamError> {
        let base = match origin {
            RawSeekOrigin::Start => 0,
            RawSeekOrigin::Current => self.position as i64,
            RawSeekOrigin::End => self.data.len() as i64,
        };
        let target = base + offset;
        if target < 0 {
            return Err(StreamError::InvalidArgument {
                message: "negative seek position".into(),
            });
        }
        self.position = target as u64;
        Ok(())
    }

    fn tell(&self) -> u64 {
        self.position
    }

    fn known_size(&self) -> Option<u64> {
        Some(self.data.len() as u64)
    }
}

impl RawInput for MemStream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, StreamError> {
        let start = (self.position as usize).min(self.data.len());
        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        self.position += n as u64;
        Ok(n)
    }
}

impl RawOutput for MemStream {
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
        Ok(())
    }

    fn can_truncate(&self) -> bool {
        true
    }

    fn truncate(&mut self, size: u64) -> Result<(), StreamError> {
        self.data.resize(size as usize, 0);
        Ok(())
    }
}

// =============================================================================
// Step 2: Use the adapter
// =============================================================================

fn main() {
    println!("=== anystream Basic Usage Example ===\n");

    // Wrap a combined (read + write) raw stream
    let mut stream = StreamAdapter::new(RawHandle::Duplex(Box::new(MemStream::new())));

    // --- Capability queries ---
    println!("1. Capability queries...");
    println!("   readable: {}", stream.readable());
    println!("   writable: {}", stream.writable());
    println!("   seekable: {}", stream.seekable().unwrap());

    // --- Writing ---
    println!("\n2. Writing...");
    let written = stream.write(b"Hello, World!").unwrap();
    println!("   wrote {written} bytes");
    println!("   position is now {}", stream.tell().unwrap());

    // --- Seeking and reading ---
    println!("\n3. Seeking and reading...");
    stream.seek(0, Whence::Start).unwrap();
    let hello = stream.read(Some(5)).unwrap();
    println!("   first 5 bytes: {}", String::from_utf8_lossy(&hello));

    stream.seek(-6, Whence::End).unwrap();
    let world = stream.read_all().unwrap();
    println!("   last 6 bytes: {}", String::from_utf8_lossy(&world));

    // --- Reading into a fixed buffer ---
    println!("\n4. Reading into a pre-allocated buffer...");
    stream.seek(7, Whence::Start).unwrap();
    let mut buf = [0u8; 32];
    let n = stream.read_into(&mut buf).unwrap();
    println!(
        "   got {n} bytes (buffer not filled): {}",
        String::from_utf8_lossy(&buf[..n])
    );

    // --- Truncating ---
    println!("\n5. Truncating...");
    let size = stream.truncate(Some(5)).unwrap();
    println!("   truncated to {size} bytes");
    stream.seek(0, Whence::Start).unwrap();
    println!(
        "   content now: {}",
        String::from_utf8_lossy(&stream.read_all().unwrap())
    );

    // --- Error handling ---
    println!("\n6. Error handling...");
    let mut read_only =
        StreamAdapter::new(RawHandle::Input(Box::new(MemStream::new())));
    match read_only.write(b"nope") {
        Err(StreamError::Unsupported { operation }) => {
            println!("   write on read-only stream: unsupported ({operation})");
        }
        other => println!("   unexpected: {other:?}"),
    }

    stream.close().unwrap();
    stream.close().unwrap(); // second close is a no-op
    match stream.read(Some(1)) {
        Err(StreamError::Closed { operation }) => {
            println!("   read after close: closed ({operation})");
        }
        other => println!("   unexpected: {other:?}"),
    }

    // --- Standard io layering ---
    println!("\n7. Layering std::io::BufReader on top...");
    let mut source = MemStream::new();
    RawOutput::write(&mut source, b"buffered line\n").unwrap();
    RawStream::seek(&mut source, 0, RawSeekOrigin::Start).unwrap();

    let adapter = StreamAdapter::new(RawHandle::Input(Box::new(source)));
    let mut reader = std::io::BufReader::new(adapter);
    let mut line = String::new();
    std::io::BufRead::read_line(&mut reader, &mut line).unwrap();
    println!("   read through BufReader: {line:?}");

    println!("\n=== Example complete! ===");
}
