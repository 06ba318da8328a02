//! Cursor over one dictionary entry's candidate list.
//!
//! Candidates are stored back to back as (u8 length, bytes). The reader
//! tracks a 1-based current index; `is_reached_end` turns true once the
//! index has moved past the declared candidate count. The reader holds no
//! storage reference of its own: every operation that touches bytes takes
//! the owning `SkkDict`, so a reader can be kept across key events while
//! the dictionary stays usable.

use crate::dict::SkkDict;
use crate::storage::DictStorage;

#[derive(Debug, Clone)]
pub struct CandidateReader {
    start_addr: u32,
    candidates_count: u8,
    total_length: u16,
    current_index: u8,
    current_length: u8,
    current_remains: u8,
}

impl CandidateReader {
    /// Open a reader at the first candidate's length byte.
    pub(crate) fn open<S: DictStorage>(
        dict: &mut SkkDict<S>,
        candidates_count: u8,
        total_length: u16,
        start_addr: u32,
    ) -> Option<Self> {
        let st = dict.storage_mut();
        st.seek(start_addr);
        let first_length = st.read()?;
        Some(Self {
            start_addr,
            candidates_count,
            total_length,
            current_index: 1,
            current_length: first_length,
            current_remains: first_length,
        })
    }

    pub fn candidates_count(&self) -> u8 {
        self.candidates_count
    }

    pub fn total_length(&self) -> u16 {
        self.total_length
    }

    /// 1-based index of the current candidate.
    pub fn current_index(&self) -> u8 {
        self.current_index
    }

    /// Declared byte length of the current candidate.
    pub fn current_candidate_length(&self) -> u8 {
        self.current_length
    }

    /// True once the cursor has moved past the last candidate.
    pub fn is_reached_end(&self) -> bool {
        self.current_index > self.candidates_count
    }

    /// Read the next byte of the current candidate, or `None` when the
    /// candidate is exhausted (or the cursor is past the end).
    pub fn read<S: DictStorage>(&mut self, dict: &mut SkkDict<S>) -> Option<u8> {
        if self.is_reached_end() || self.current_remains == 0 {
            return None;
        }
        self.current_remains -= 1;
        dict.storage_mut().read()
    }

    /// Skip whatever remains of the current candidate and step to the
    /// next one. Returns false when already past the end.
    pub fn move_next<S: DictStorage>(&mut self, dict: &mut SkkDict<S>) -> bool {
        if self.is_reached_end() {
            return false;
        }
        while self.current_remains > 0 {
            if self.read(dict).is_none() {
                break;
            }
        }
        self.current_index += 1;
        if self.is_reached_end() {
            self.current_length = 0;
            self.current_remains = 0;
            return true;
        }
        match dict.storage_mut().read() {
            Some(len) => {
                self.current_length = len;
                self.current_remains = len;
            }
            None => {
                self.current_length = 0;
                self.current_remains = 0;
            }
        }
        true
    }

    /// Rewind to the first candidate.
    pub fn move_head<S: DictStorage>(&mut self, dict: &mut SkkDict<S>) {
        let st = dict.storage_mut();
        st.seek(self.start_addr);
        let first_length = st.read().unwrap_or(0);
        self.current_index = 1;
        self.current_length = first_length;
        self.current_remains = first_length;
    }

    /// Collect the current candidate's remaining bytes.
    pub fn read_current<S: DictStorage>(&mut self, dict: &mut SkkDict<S>) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.current_remains as usize);
        while let Some(b) = self.read(dict) {
            out.push(b);
        }
        out
    }
}
