//! Dictionary image builder.
//!
//! Assembles a complete binary container from (yomigana, candidates)
//! pairs: header, "IDX" section, "TBL" section. Entries are sorted by key
//! bytes so the abort optimization of the table scan holds. The index is
//! auto-generated with one entry per distinct leading character unless
//! explicit index keys are supplied.

use crate::sjis;

const HEADER_MAGIC: &[u8; 3] = b"SKD";

#[derive(Debug, Clone)]
struct Entry {
    key: Vec<u8>,
    candidates: Vec<Vec<u8>>,
    disabled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DictBuilder {
    comment: Vec<u8>,
    entries: Vec<Entry>,
    index_keys: Option<Vec<Vec<u8>>>,
}

impl DictBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_comment(&mut self, comment: &str) {
        self.comment = comment.as_bytes().to_vec();
    }

    pub fn add_entry(&mut self, yomigana: &[u8], candidates: &[&[u8]]) {
        self.push_entry(yomigana, candidates, false);
    }

    /// Entry with the disabled marker in its length byte. Unreachable by
    /// search; kept for format coverage.
    pub fn add_disabled_entry(&mut self, yomigana: &[u8], candidates: &[&[u8]]) {
        self.push_entry(yomigana, candidates, true);
    }

    fn push_entry(&mut self, yomigana: &[u8], candidates: &[&[u8]], disabled: bool) {
        debug_assert!(yomigana.len() <= 0x7F);
        debug_assert!(candidates.len() <= u8::MAX as usize);
        self.entries.push(Entry {
            key: yomigana.to_vec(),
            candidates: candidates.iter().map(|c| c.to_vec()).collect(),
            disabled,
        });
    }

    /// Replace the auto-generated index with explicit keys. Keys that
    /// prefix no entry are dropped.
    pub fn set_index_keys(&mut self, keys: &[&[u8]]) {
        self.index_keys = Some(keys.iter().map(|k| k.to_vec()).collect());
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Emit the complete byte image.
    pub fn build(&self) -> Vec<u8> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| a.key.cmp(&b.key));

        // table body, remembering each entry's offset within it
        let mut table = Vec::new();
        let mut offsets = Vec::with_capacity(entries.len());
        for entry in &entries {
            offsets.push((entry.key.clone(), table.len() as u32));
            let mut key_len = entry.key.len() as u8;
            if entry.disabled {
                key_len |= 0x80;
            }
            table.push(key_len);
            table.extend_from_slice(&entry.key);
            table.push(entry.candidates.len() as u8);
            let block_len: usize = entry.candidates.iter().map(|c| 1 + c.len()).sum();
            table.extend_from_slice(&(block_len as u16).to_le_bytes());
            for candidate in &entry.candidates {
                table.push(candidate.len() as u8);
                table.extend_from_slice(candidate);
            }
        }

        let index_keys = match &self.index_keys {
            Some(keys) => keys.clone(),
            None => leading_char_keys(&entries),
        };

        // drop keys that prefix no entry before sizing the section, so
        // the jump addresses account for exactly the keys emitted
        let resolved: Vec<(&Vec<u8>, u32)> = index_keys
            .iter()
            .filter_map(|key| {
                offsets
                    .iter()
                    .find(|(entry_key, _)| entry_key.starts_with(key))
                    .map(|(_, off)| (key, *off))
            })
            .collect();

        let header_len = 3 + 3 + 2 + self.comment.len() + 2;
        let index_len: usize = resolved.iter().map(|(k, _)| 1 + k.len() + 3).sum();
        let table_head = (header_len + 3 + 3 + index_len + 3 + 3) as u32;

        let mut index = Vec::with_capacity(index_len);
        for (key, offset) in &resolved {
            index.push(key.len() as u8);
            index.extend_from_slice(key);
            push_u24(&mut index, table_head + offset);
        }

        let yomigana_max = entries.iter().map(|e| e.key.len()).max().unwrap_or(0) as u16;

        let mut image = Vec::with_capacity(table_head as usize + table.len());
        image.extend_from_slice(HEADER_MAGIC);
        push_u24(&mut image, 0); // file size, patched below
        image.extend_from_slice(&(self.comment.len() as u16).to_le_bytes());
        image.extend_from_slice(&self.comment);
        image.extend_from_slice(&yomigana_max.to_le_bytes());
        image.extend_from_slice(b"IDX");
        push_u24(&mut image, index.len() as u32);
        image.extend_from_slice(&index);
        image.extend_from_slice(b"TBL");
        push_u24(&mut image, table.len() as u32);
        image.extend_from_slice(&table);

        let file_size = image.len() as u32;
        image[3] = file_size as u8;
        image[4] = (file_size >> 8) as u8;
        image[5] = (file_size >> 16) as u8;
        image
    }
}

fn push_u24(buf: &mut Vec<u8>, v: u32) {
    buf.push(v as u8);
    buf.push((v >> 8) as u8);
    buf.push((v >> 16) as u8);
}

/// One index key per distinct leading Shift-JIS character, in sorted
/// entry order.
fn leading_char_keys(entries: &[Entry]) -> Vec<Vec<u8>> {
    let mut keys: Vec<Vec<u8>> = Vec::new();
    for entry in entries {
        if entry.key.is_empty() {
            continue;
        }
        let width = sjis::char_width(entry.key[0]).min(entry.key.len());
        let lead = entry.key[..width].to_vec();
        if keys.last() != Some(&lead) {
            keys.push(lead);
        }
    }
    keys.dedup();
    keys
}
