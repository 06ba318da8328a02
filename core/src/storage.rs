//! Sequential byte cursors over dictionary media.
//!
//! A dictionary image may live in a file, in flash, or in a test vector;
//! everything above this layer only needs "read the next byte" and "jump to
//! an offset". Multi-byte integers in the container are little-endian, so
//! the trait provides the LE readers once.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use anyhow::{Context, Result};

/// Sequential cursor over a read-only dictionary image.
///
/// `read` returns `None` at end of data; all multi-byte readers inherit
/// that behavior (a partial read is `None`).
pub trait DictStorage {
    /// Read one byte and advance, or `None` at end of data.
    fn read(&mut self) -> Option<u8>;

    /// Current absolute offset.
    fn position(&self) -> u32;

    /// Move the cursor to an absolute offset and return the new position.
    fn seek(&mut self, pos: u32) -> u32;

    /// Move the cursor relative to the current position.
    fn seek_delta(&mut self, delta: i32) -> u32 {
        let pos = (self.position() as i64 + delta as i64).max(0) as u32;
        self.seek(pos)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.read()
    }

    fn read_u16(&mut self) -> Option<u16> {
        let lo = self.read()? as u16;
        let hi = self.read()? as u16;
        Some(lo | hi << 8)
    }

    /// 3-byte little-endian integer, as used for file offsets and section
    /// lengths in the container.
    fn read_u24(&mut self) -> Option<u32> {
        let b0 = self.read()? as u32;
        let b1 = self.read()? as u32;
        let b2 = self.read()? as u32;
        Some(b0 | b1 << 8 | b2 << 16)
    }

    fn read_u32(&mut self) -> Option<u32> {
        let lo = self.read_u16()? as u32;
        let hi = self.read_u16()? as u32;
        Some(lo | hi << 16)
    }
}

/// In-memory dictionary image. Tests and the builder round-trip use this.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Vec<u8>,
    pos: u32,
}

impl MemoryStorage {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl DictStorage for MemoryStorage {
    fn read(&mut self) -> Option<u8> {
        let b = self.data.get(self.pos as usize).copied()?;
        self.pos += 1;
        Some(b)
    }

    fn position(&self) -> u32 {
        self.pos
    }

    fn seek(&mut self, pos: u32) -> u32 {
        self.pos = pos;
        self.pos
    }
}

/// Buffered file-backed dictionary image.
pub struct FileStorage {
    reader: BufReader<File>,
    pos: u32,
}

impl FileStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("cannot open dictionary {}", path.as_ref().display()))?;
        Ok(Self {
            reader: BufReader::new(file),
            pos: 0,
        })
    }
}

impl DictStorage for FileStorage {
    fn read(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match self.reader.read(&mut buf) {
            Ok(1) => {
                self.pos += 1;
                Some(buf[0])
            }
            _ => None,
        }
    }

    fn position(&self) -> u32 {
        self.pos
    }

    fn seek(&mut self, pos: u32) -> u32 {
        if self.reader.seek(SeekFrom::Start(pos as u64)).is_ok() {
            self.pos = pos;
        }
        self.pos
    }
}
