//! Capacity-capped byte buffers for pending romaji and kana.
//!
//! Appends never grow past the capacity chosen at construction; a full
//! buffer rejects the byte (or truncates the slice) and reports it, so the
//! caller can decide whether to drop or flush.

use crate::sjis;

#[derive(Debug, Clone)]
pub struct BoundedBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl BoundedBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Append one byte. Returns false (and drops the byte) when full.
    pub fn push(&mut self, b: u8) -> bool {
        if self.bytes.len() >= self.capacity {
            return false;
        }
        self.bytes.push(b);
        true
    }

    /// Append as much of `s` as fits; returns the number of bytes taken.
    pub fn extend(&mut self, s: &[u8]) -> usize {
        let room = self.capacity - self.bytes.len();
        let take = s.len().min(room);
        self.bytes.extend_from_slice(&s[..take]);
        take
    }

    /// Remove the last whole Shift-JIS character. Returns false when empty.
    pub fn remove_tail_char(&mut self) -> bool {
        match sjis::last_char_offset(&self.bytes) {
            Some(off) => {
                self.bytes.truncate(off);
                true
            }
            None => false,
        }
    }

    /// Drop the first `n` bytes, shifting the rest down.
    pub fn drain_front(&mut self, n: usize) {
        let n = n.min(self.bytes.len());
        self.bytes.drain(..n);
    }
}
