//! Binary dictionary store: header parse and the two-phase search.
//!
//! The container is a single stream: header, an "IDX" section of coarse
//! jump points, and a "TBL" section of sorted entries. Search is linear
//! from a seek position; there is no random-access structure beyond the
//! index jumps. All multi-byte integers are little-endian.

use anyhow::{anyhow, bail, Result};
use tracing::debug;

use crate::candidates::CandidateReader;
use crate::storage::DictStorage;

/// Sentinel for "no bound known" on the table tail.
pub const INVALID_ADDR: u32 = u32::MAX;

/// Result of an index scan: where to start the table scan and how many
/// key bytes the index entry covered.
#[derive(Debug, Clone, Copy)]
pub struct IndexHit {
    pub jump_addr: u32,
    pub key_len: u8,
}

pub struct SkkDict<S: DictStorage> {
    storage: S,
    file_size: u32,
    yomigana_max_length: u16,
    index_head: u32,
    index_tail: u32,
    table_head: u32,
    table_tail: u32,
    key_buf: Vec<u8>,
}

fn need<T>(v: Option<T>) -> Result<T> {
    v.ok_or_else(|| anyhow!("unexpected end of dictionary data"))
}

impl<S: DictStorage> SkkDict<S> {
    /// Parse the container header. A missing "IDX" or "TBL" tag is fatal;
    /// the 3-byte magic is accepted without validation.
    pub fn open(storage: S) -> Result<Self> {
        let mut dict = Self {
            storage,
            file_size: 0,
            yomigana_max_length: 0,
            index_head: 0,
            index_tail: 0,
            table_head: 0,
            table_tail: 0,
            key_buf: Vec::new(),
        };
        dict.load_headers()?;
        dict.key_buf = Vec::with_capacity(dict.yomigana_max_length as usize + 1);
        Ok(dict)
    }

    fn load_headers(&mut self) -> Result<()> {
        let st = &mut self.storage;
        st.seek(0);
        for _ in 0..3 {
            need(st.read())?;
        }
        self.file_size = need(st.read_u24())?;
        let comment_length = need(st.read_u16())?;
        st.seek_delta(comment_length as i32);
        self.yomigana_max_length = need(st.read_u16())?;

        if need(st.read())? != b'I' || need(st.read())? != b'D' || need(st.read())? != b'X' {
            bail!("'IDX' tag not found");
        }
        let index_length = need(st.read_u24())?;
        self.index_head = st.position();
        self.index_tail = self.index_head + index_length;
        st.seek(self.index_tail);

        if need(st.read())? != b'T' || need(st.read())? != b'B' || need(st.read())? != b'L' {
            bail!("'TBL' tag not found");
        }
        let table_length = need(st.read_u24())?;
        self.table_head = st.position();
        self.table_tail = if table_length > 0 {
            self.table_head + table_length
        } else if self.file_size > 0 {
            self.file_size
        } else {
            INVALID_ADDR
        };

        debug!(
            file_size = self.file_size,
            yomigana_max_length = self.yomigana_max_length,
            index_head = self.index_head,
            index_tail = self.index_tail,
            table_head = self.table_head,
            table_tail = self.table_tail,
            "dictionary headers loaded"
        );
        Ok(())
    }

    /// Longest yomigana the dictionary declares, in bytes.
    pub fn yomigana_max_length(&self) -> u16 {
        self.yomigana_max_length
    }

    pub(crate) fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Linear scan of the index section.
    ///
    /// Hit rule: the query is at least as long as the entry key and the
    /// entry key is a byte prefix of the query. The first such entry
    /// wins, so a one-character index key catches every query starting
    /// with that character. Intentional: the index is coarse and the
    /// table scan does the exact match.
    pub fn search_index(&mut self, yomigana: &[u8]) -> Option<IndexHit> {
        self.storage.seek(self.index_head);
        while self.storage.position() < self.index_tail {
            let key_len = self.storage.read()?;
            self.key_buf.clear();
            for _ in 0..key_len {
                self.key_buf.push(self.storage.read()?);
            }
            let jump_addr = self.storage.read_u24()?;
            if yomigana.len() >= key_len as usize && self.key_buf[..] == yomigana[..key_len as usize]
            {
                debug!(jump_addr, key_len, "index hit");
                return Some(IndexHit { jump_addr, key_len });
            }
        }
        debug!("no index entry matched");
        None
    }

    /// Sequential scan of the table section from `start_addr` (table head
    /// when absent or zero). An exact length-and-bytes key match opens a
    /// reader at the entry's first candidate.
    ///
    /// With `allow_abort`, the scan stops as soon as an entry's first
    /// `compare_len` key bytes differ from the query's: entries sharing an
    /// index prefix are stored contiguously, so nothing further can match.
    pub fn search_entry(
        &mut self,
        start_addr: Option<u32>,
        allow_abort: bool,
        compare_len: usize,
        yomigana: &[u8],
    ) -> Option<CandidateReader> {
        match start_addr {
            Some(addr) if addr > 0 && addr < INVALID_ADDR => self.storage.seek(addr),
            _ => self.storage.seek(self.table_head),
        };
        while self.storage.position() < self.table_tail {
            // Bit 7 of the length byte marks a disabled entry. The length
            // is used unmasked, so a flagged entry never survives the
            // exact-length comparison below.
            let entry_key_len = self.storage.read()?;
            self.key_buf.clear();
            for _ in 0..entry_key_len {
                self.key_buf.push(self.storage.read()?);
            }
            let candidates_count = self.storage.read()?;
            let candidates_length = self.storage.read_u16()?;
            let entry_addr = self.storage.position();

            if entry_key_len as usize == yomigana.len() && self.key_buf[..] == *yomigana {
                debug!(entry_addr, candidates_count, "table entry matched");
                return CandidateReader::open(self, candidates_count, candidates_length, entry_addr);
            }

            if allow_abort {
                let diverged = self.key_buf.len() < compare_len
                    || yomigana.len() < compare_len
                    || self.key_buf[..compare_len] != yomigana[..compare_len];
                if diverged {
                    debug!(reached = entry_addr, "shared prefix ended, scan aborted");
                    return None;
                }
            }

            self.storage.seek_delta(candidates_length as i32);
        }
        debug!("no table entry matched");
        None
    }
}
