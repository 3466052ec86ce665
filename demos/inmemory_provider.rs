//! A complete in-memory provider behind the boundary `open`.
//!
//! This example implements the `Resource` contract over a shared
//! in-memory store and drives it exclusively through `anystream::open`,
//! the way application code would drive any provider.
//!
//! Run with: `cargo run --example inmemory_provider`

use anystream::*;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

// =============================================================================
// Step 1: Implement the Resource contract
// =============================================================================

type SharedStore = Arc<RwLock<HashMap<String, Vec<u8>>>>;

/// One named target inside the shared store.
struct MemoryResource {
    store: SharedStore,
    name: String,
}

impl MemoryResource {
    fn new(store: &SharedStore, name: &str) -> Self {
        Self {
            store: store.clone(),
            name: name.to_string(),
        }
    }

    fn stream(&self, readable: bool, writable: bool, append: bool) -> MemoryStream {
        MemoryStream {
            store: self.store.clone(),
            name: self.name.clone(),
            position: 0,
            closed: false,
            readable,
            writable,
            append,
        }
    }
}

/// Raw stream over one store entry; capability flags gate the facets.
struct MemoryStream {
    store: SharedStore,
    name: String,
    position: u64,
    closed: bool,
    readable: bool,
    writable: bool,
    append: bool,
}

impl MemoryStream {
    fn len(&self) -> u64 {
        self.store
            .read()
            .unwrap()
            .get(&self.name)
            .map_or(0, |data| data.len() as u64)
    }
}

impl RawStream for MemoryStream {
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
            RawSeekOrigin::End => self.len() as i64,
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
        Some(self.len())
    }
}

impl RawInput for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, StreamError> {
        if !self.readable {
            return Err(StreamError::Unsupported { operation: "read" });
        }
        let store = self.store.read().unwrap();
        let data = store.get(&self.name).map_or(&[][..], |data| data);
        let start = (self.position as usize).min(data.len());
        let n = buf.len().min(data.len() - start);
        buf[..n].copy_from_slice(&data[start..start + n]);
        drop(store);
        self.position += n as u64;
        Ok(n)
    }
}

impl RawOutput for MemoryStream {
    fn write(&mut self, data: &[u8]) -> Result<usize, StreamError> {
        if !self.writable {
            return Err(StreamError::Unsupported { operation: "write" });
        }
        let mut store = self.store.write().unwrap();
        let stored = store.entry(self.name.clone()).or_default();
        if self.append {
            self.position = stored.len() as u64;
        }
        let start = self.position as usize;
        if stored.len() < start + data.len() {
            stored.resize(start + data.len(), 0);
        }
        stored[start..start + data.len()].copy_from_slice(data);
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
        self.store
            .write()
            .unwrap()
            .entry(self.name.clone())
            .or_default()
            .resize(size as usize, 0);
        Ok(())
    }
}

impl Resource for MemoryResource {
    fn open_read(&self) -> Result<Box<dyn RawInput>, StreamError> {
        if !self.exists() {
            return Err(StreamError::NotFound {
                name: self.name.clone(),
            });
        }
        Ok(Box::new(self.stream(true, false, false)))
    }

    fn create(&self) -> Result<Box<dyn RawOutput>, StreamError> {
        let mut store = self.store.write().unwrap();
        if store.contains_key(&self.name) {
            return Err(StreamError::AlreadyExists {
                name: self.name.clone(),
            });
        }
        store.insert(self.name.clone(), Vec::new());
        drop(store);
        Ok(Box::new(self.stream(false, true, false)))
    }

    fn replace(&self) -> Result<Box<dyn RawOutput>, StreamError> {
        self.store
            .write()
            .unwrap()
            .insert(self.name.clone(), Vec::new());
        Ok(Box::new(self.stream(false, true, false)))
    }

    fn append_to(&self) -> Result<Box<dyn RawOutput>, StreamError> {
        self.store
            .write()
            .unwrap()
            .entry(self.name.clone())
            .or_default();
        Ok(Box::new(self.stream(false, true, true)))
    }

    fn open_readwrite(&self) -> Result<Box<dyn RawDuplex>, StreamError> {
        if !self.exists() {
            return Err(StreamError::NotFound {
                name: self.name.clone(),
            });
        }
        Ok(Box::new(self.stream(true, true, false)))
    }

    fn create_readwrite(&self) -> Result<Box<dyn RawDuplex>, StreamError> {
        let mut store = self.store.write().unwrap();
        if store.contains_key(&self.name) {
            return Err(StreamError::AlreadyExists {
                name: self.name.clone(),
            });
        }
        store.insert(self.name.clone(), Vec::new());
        drop(store);
        Ok(Box::new(self.stream(true, true, false)))
    }

    fn replace_readwrite(&self) -> Result<Box<dyn RawDuplex>, StreamError> {
        self.store
            .write()
            .unwrap()
            .insert(self.name.clone(), Vec::new());
        Ok(Box::new(self.stream(true, true, false)))
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::File
    }

    fn exists(&self) -> bool {
        self.store.read().unwrap().contains_key(&self.name)
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}

// =============================================================================
// Step 2: Drive the provider through the boundary open
// =============================================================================

fn main() {
    println!("=== anystream In-Memory Provider Example ===\n");

    let store: SharedStore = Arc::new(RwLock::new(HashMap::new()));
    let resource = MemoryResource::new(&store, "notes/today.txt");

    // --- Create and write ---
    println!("1. Creating with mode \"x\"...");
    let mut writer = open(&resource, "x").unwrap();
    writer.write(b"first entry\n").unwrap();
    writer.close().unwrap();
    println!("   wrote the initial content");

    // --- Exclusive create now fails ---
    println!("\n2. Exclusive create again...");
    match open(&resource, "x") {
        Err(StreamError::AlreadyExists { name }) => {
            println!("   correctly refused: already exists ({name})");
        }
        other => println!("   unexpected: {other:?}"),
    }

    // --- Append ---
    println!("\n3. Appending with mode \"a\"...");
    let mut appender = open(&resource, "a").unwrap();
    appender.write(b"second entry\n").unwrap();
    appender.close().unwrap();
    println!("   appended a line");

    // --- Read back ---
    println!("\n4. Reading with mode \"r\"...");
    let mut reader = open(&resource, "r").unwrap();
    let content = reader.read_all().unwrap();
    print!("{}", String::from_utf8_lossy(&content));
    reader.close().unwrap();

    // --- Update in place ---
    println!("\n5. Updating in place with mode \"r+\"...");
    let mut stream = open(&resource, "r+").unwrap();
    stream.write(b"FIRST").unwrap();
    stream.seek(0, Whence::Start).unwrap();
    let content = stream.read_all().unwrap();
    print!("{}", String::from_utf8_lossy(&content));
    stream.close().unwrap();

    // --- Missing resources ---
    println!("\n6. Opening a missing resource...");
    let missing = MemoryResource::new(&store, "notes/missing.txt");
    match open(&missing, "r") {
        Err(StreamError::NotFound { name }) => {
            println!("   correctly refused: not found ({name})");
        }
        other => println!("   unexpected: {other:?}"),
    }

    // --- Buffer sizing for outer layers ---
    println!("\n7. Buffer sizing...");
    println!(
        "   recommended buffer size: {} bytes",
        recommended_buffer_size(&resource)
    );

    println!("\n=== Example complete! ===");
}
