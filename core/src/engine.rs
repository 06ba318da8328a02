//! Dictionary precedence for kana-to-kanji conversion.
//!
//! One mandatory system dictionary, at most one user dictionary. The user
//! dictionary is consulted first and scanned without the sorted-order
//! abort (user entries are appended in arbitrary order); the system
//! dictionary is scanned second with the abort enabled. The first
//! dictionary that yields wins; results are never merged.

use tracing::debug;

use crate::candidates::CandidateReader;
use crate::dict::SkkDict;
use crate::storage::DictStorage;

/// Which dictionary a conversion hit came from. A `CandidateReader` must
/// be driven against the dictionary that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictSlot {
    User,
    System,
}

pub struct HenkanHit {
    pub reader: CandidateReader,
    pub slot: DictSlot,
}

pub struct SkkEngine<S: DictStorage> {
    userdict: Option<SkkDict<S>>,
    sysdict: SkkDict<S>,
}

impl<S: DictStorage> SkkEngine<S> {
    pub fn new(sysdict: SkkDict<S>) -> Self {
        Self {
            userdict: None,
            sysdict,
        }
    }

    pub fn set_userdict(&mut self, dict: SkkDict<S>) {
        self.userdict = Some(dict);
    }

    pub fn has_userdict(&self) -> bool {
        self.userdict.is_some()
    }

    /// The dictionary a hit's reader belongs to.
    pub fn dict_mut(&mut self, slot: DictSlot) -> &mut SkkDict<S> {
        match slot {
            DictSlot::User => self
                .userdict
                .as_mut()
                .expect("hit slot refers to an unset user dictionary"),
            DictSlot::System => &mut self.sysdict,
        }
    }

    fn search(dict: &mut SkkDict<S>, yomigana: &[u8], allow_abort: bool) -> Option<CandidateReader> {
        let hit = dict.search_index(yomigana)?;
        dict.search_entry(
            Some(hit.jump_addr),
            allow_abort,
            hit.key_len as usize,
            yomigana,
        )
    }

    /// Look the yomigana up, user dictionary first.
    pub fn henkan(&mut self, yomigana: &[u8]) -> Option<HenkanHit> {
        if let Some(user) = self.userdict.as_mut() {
            if let Some(reader) = Self::search(user, yomigana, false) {
                debug!(count = reader.candidates_count(), "user dictionary hit");
                return Some(HenkanHit {
                    reader,
                    slot: DictSlot::User,
                });
            }
        }
        if let Some(reader) = Self::search(&mut self.sysdict, yomigana, true) {
            debug!(count = reader.candidates_count(), "system dictionary hit");
            return Some(HenkanHit {
                reader,
                slot: DictSlot::System,
            });
        }
        debug!("no dictionary hit");
        None
    }
}
