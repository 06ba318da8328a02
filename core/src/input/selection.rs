//! Candidate paging state.
//!
//! Candidates are packed onto a page against the display byte budget.
//! Each 2-byte display cell can carry one selector key, so cell `i` of
//! the page maps through `assoc` to the candidate shown there; a page
//! never offers more selectors than the configuration has keys. The
//! reader advances page by page and is rewound for the wrap back to the
//! first page.

use crate::engine::{HenkanHit, SkkEngine};
use crate::storage::DictStorage;

pub(crate) const MAX_SELECTORS: usize = 10;
const NO_CANDIDATE: u8 = u8::MAX;

pub(crate) struct SelectionState {
    hit: HenkanHit,
    candidate_count: u8,
    next_start_index: u8,
    assoc: [u8; MAX_SELECTORS],
    resume_romaji: bool,
}

impl SelectionState {
    pub fn new(hit: HenkanHit, candidate_count: u8, resume_romaji: bool) -> Self {
        Self {
            hit,
            candidate_count,
            next_start_index: 0,
            assoc: [NO_CANDIDATE; MAX_SELECTORS],
            resume_romaji,
        }
    }

    /// True when the conversion was triggered mid-okurigana and the
    /// leftover romaji must be transliterated after the selection ends.
    pub fn resume_romaji(&self) -> bool {
        self.resume_romaji
    }

    /// All candidates have been paged through.
    pub fn exhausted(&self) -> bool {
        self.next_start_index >= self.candidate_count
    }

    /// Wrap back to the first candidate.
    pub fn rewind<S: DictStorage>(&mut self, skk: &mut SkkEngine<S>) {
        let dict = skk.dict_mut(self.hit.slot);
        self.hit.reader.move_head(dict);
        self.next_start_index = 0;
    }

    /// Candidate index behind selector slot `slot` on the current page.
    pub fn candidate_at(&self, slot: usize) -> Option<u8> {
        match self.assoc.get(slot).copied() {
            Some(NO_CANDIDATE) | None => None,
            Some(index) => Some(index),
        }
    }

    /// Pack the next page and return its display bytes. The reader is
    /// left on the first candidate after the page.
    pub fn pack_page<S: DictStorage>(
        &mut self,
        skk: &mut SkkEngine<S>,
        budget: usize,
        selector_keys: usize,
    ) -> Vec<u8> {
        let per_page = selector_keys.min(MAX_SELECTORS);
        self.assoc = [NO_CANDIDATE; MAX_SELECTORS];
        let mut display: Vec<u8> = Vec::with_capacity(budget);
        let dict = skk.dict_mut(self.hit.slot);

        let mut packed: u8 = 0;
        while (packed as usize) < per_page && !self.hit.reader.is_reached_end() {
            let length = self.hit.reader.current_candidate_length() as usize;
            if packed == 0 && length > budget {
                // an oversized candidate gets a page of its own
                self.assoc[0] = self.next_start_index;
                while let Some(b) = self.hit.reader.read(dict) {
                    display.push(b);
                }
                self.hit.reader.move_next(dict);
                packed = 1;
                break;
            }
            if display.len() + length > budget {
                break;
            }
            while let Some(b) = self.hit.reader.read(dict) {
                let cell = display.len() / 2;
                if display.len() % 2 == 0 && cell < per_page {
                    self.assoc[cell] = self.next_start_index + packed;
                }
                display.push(b);
            }
            self.hit.reader.move_next(dict);
            packed += 1;
        }

        self.next_start_index += packed;
        display
    }

    /// Rewind and advance to `index`, handing the hit back for commit.
    pub fn select<S: DictStorage>(mut self, skk: &mut SkkEngine<S>, index: u8) -> HenkanHit {
        let dict = skk.dict_mut(self.hit.slot);
        self.hit.reader.move_head(dict);
        for _ in 0..index {
            self.hit.reader.move_next(dict);
        }
        self.hit
    }
}
