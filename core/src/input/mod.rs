//! Key-driven input orchestration.
//!
//! `InputEngine` owns the conversion engine, the pending romaji and kana
//! buffers and the mode state, and advances on one key event at a time
//! through [`InputEngine::step`]. The poll loop with SandS and cursor
//! blink lives in [`InputEngine::run`]; hosts with their own scheduler
//! call `step` directly.

mod run;
mod selection;

use tracing::debug;

use crate::buffer::BoundedBuffer;
use crate::engine::{HenkanHit, SkkEngine};
use crate::keys::{InputHooks, Key, Renderer};
use crate::romaji;
use crate::sjis;
use crate::storage::DictStorage;
use crate::Config;

use selection::SelectionState;

/// Markers wrapped around an auto-decided commit that had other
/// candidates, so the text can be revisited later.
pub const AUTODECIDE_OPEN_MARK: &[u8] = b"{";
pub const AUTODECIDE_CLOSE_MARK: &[u8] = b"}";

/// Display units per byte: one half-width cell.
pub(crate) const COLS_PER_BYTE: u8 = 7;

const INPUT_LINE: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys pass through as typed.
    Direct,
    /// Romaji to hiragana, kanji conversion available.
    #[default]
    HenkanHiragana,
    /// Romaji to katakana, kanji conversion available.
    HenkanKatakana,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HenkanOutcome {
    Committed,
    Failed,
    Selecting,
}

pub struct InputEngine<S: DictStorage> {
    skk: SkkEngine<S>,
    config: Config,
    mode: InputMode,
    romaji: BoundedBuffer,
    kana: BoundedBuffer,
    henkan_waiting: bool,
    selection: Option<SelectionState>,
    running: bool,
}

impl<S: DictStorage> InputEngine<S> {
    pub fn new(skk: SkkEngine<S>) -> Self {
        Self::with_config(skk, Config::default())
    }

    pub fn with_config(skk: SkkEngine<S>, config: Config) -> Self {
        // a conversion buffer below 17 bytes cannot hold a full yomigana
        // plus okurigana; a romaji buffer below 5 cannot hold a digraph
        let kana_capacity = config.kana_capacity.max(17);
        let romaji_capacity = config.romaji_capacity.max(5);
        Self {
            skk,
            config,
            mode: InputMode::default(),
            romaji: BoundedBuffer::new(romaji_capacity),
            kana: BoundedBuffer::new(kana_capacity),
            henkan_waiting: false,
            selection: None,
            running: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    pub fn is_henkan_waiting(&self) -> bool {
        self.henkan_waiting
    }

    pub fn is_selecting(&self) -> bool {
        self.selection.is_some()
    }

    /// Pending hiragana, not yet committed.
    pub fn pending_kana(&self) -> &[u8] {
        self.kana.as_bytes()
    }

    /// Pending romaji, not yet transliterated.
    pub fn pending_romaji(&self) -> &[u8] {
        self.romaji.as_bytes()
    }

    /// Drop all pending input without committing.
    pub fn clear(&mut self) {
        self.romaji.clear();
        self.kana.clear();
        self.henkan_waiting = false;
        self.selection = None;
    }

    /// Commit pending kana (and pending romaji when `include_romaji`)
    /// through the emit hook, then clear what was committed.
    pub fn flush<H: InputHooks>(&mut self, include_romaji: bool, hooks: &mut H) {
        if !self.kana.is_empty() {
            hooks.emit(self.kana.as_bytes());
        }
        self.kana.clear();
        if include_romaji {
            if !self.romaji.is_empty() {
                hooks.emit(self.romaji.as_bytes());
            }
            self.romaji.clear();
        }
    }

    /// Process one key event.
    pub fn step<H: InputHooks, R: Renderer>(&mut self, key: Key, hooks: &mut H, screen: &mut R) {
        // an emptied composition leaves the conversion-pending state
        if self.romaji.is_empty() && self.kana.is_empty() && self.selection.is_none() {
            self.henkan_waiting = false;
        }

        if hooks.on_key_prehook(key) {
            return;
        }

        if self.selection.is_some() {
            self.step_selection(key, hooks, screen);
            return;
        }

        match key {
            Key::Backspace => {
                if !self.romaji.is_empty() {
                    self.romaji.remove_tail_char();
                    self.draw_texts(screen);
                } else if !self.kana.is_empty() {
                    self.kana.remove_tail_char();
                    self.draw_texts(screen);
                } else {
                    hooks.on_key_uncaught(key);
                }
            }

            Key::Enter if self.henkan_waiting => {
                // decide the composition as it stands
                self.henkan_waiting = false;
                self.flush(true, hooks);
                self.draw_texts(screen);
            }

            Key::Char(b' ') if self.henkan_waiting => {
                match self.do_henkan(hooks, screen, false) {
                    HenkanOutcome::Committed => {
                        self.henkan_waiting = false;
                        self.draw_texts(screen);
                    }
                    HenkanOutcome::Failed => {
                        self.draw_texts(screen);
                    }
                    HenkanOutcome::Selecting => {}
                }
            }

            Key::Muhenkan => {
                debug!("mode change to direct input");
                self.mode = InputMode::Direct;
                self.henkan_waiting = false;
                self.flush(true, hooks);
                self.draw_texts(screen);
            }

            Key::Henkan => {
                if self.henkan_waiting {
                    // decide the composition as katakana; no mode change
                    sjis::hiragana_to_katakana(self.kana.as_mut_slice());
                    self.flush(true, hooks);
                    self.draw_texts(screen);
                } else {
                    self.flush(true, hooks);
                    self.mode = if self.mode == InputMode::HenkanHiragana {
                        debug!("mode change to katakana input");
                        InputMode::HenkanKatakana
                    } else {
                        debug!("mode change to hiragana input");
                        InputMode::HenkanHiragana
                    };
                    self.draw_texts(screen);
                }
            }

            Key::Char(c) if c.is_ascii_alphabetic() => {
                self.handle_alphabet(c, hooks, screen);
            }

            Key::Char(c) if is_symbol_byte(c) => {
                self.handle_symbol(c, hooks, screen);
            }

            other => hooks.on_key_uncaught(other),
        }
    }

    fn handle_alphabet<H: InputHooks, R: Renderer>(
        &mut self,
        ch: u8,
        hooks: &mut H,
        screen: &mut R,
    ) {
        let mut is_upper = ch.is_ascii_uppercase();

        if self.mode == InputMode::Direct {
            hooks.emit(&[ch]);
            self.draw_texts(screen);
            return;
        }

        if !self.romaji.push(ch.to_ascii_lowercase()) {
            debug!("romaji buffer full, key dropped");
        }

        if self.henkan_waiting && is_upper {
            // okurigana start: convert what is staged, romaji included
            let tail = self.romaji.as_bytes().to_vec();
            self.kana.extend(&tail);
            match self.do_henkan(hooks, screen, true) {
                HenkanOutcome::Selecting => return,
                _ => {
                    self.henkan_waiting = false;
                    is_upper = false;
                }
            }
        }

        let (produced, include_romaji) = self.resolve_romaji();

        if !self.henkan_waiting && is_upper {
            debug!("conversion section opened");
            self.henkan_waiting = true;
        } else if !self.henkan_waiting && produced {
            if self.mode == InputMode::HenkanKatakana {
                sjis::hiragana_to_katakana(self.kana.as_mut_slice());
            }
            self.flush(include_romaji, hooks);
        }

        self.draw_texts(screen);
    }

    fn handle_symbol<H: InputHooks, R: Renderer>(&mut self, ch: u8, hooks: &mut H, screen: &mut R) {
        self.henkan_waiting = false;
        if self.mode == InputMode::HenkanKatakana {
            sjis::hiragana_to_katakana(self.kana.as_mut_slice());
        }
        self.flush(true, hooks);

        if self.mode == InputMode::Direct {
            hooks.emit(&[ch]);
        } else if let Some(fullwidth) = sjis::fullwidth_symbol(ch) {
            hooks.emit(fullwidth);
        } else {
            hooks.emit(&[ch]);
        }
        self.draw_texts(screen);
    }

    /// Try the romaji buffer against the transliteration table and move
    /// the produced kana over. Returns (produced anything, all romaji
    /// consumed).
    fn resolve_romaji(&mut self) -> (bool, bool) {
        let Some(t) = romaji::transliterate(self.romaji.as_bytes()) else {
            return (false, false);
        };
        self.kana.extend(t.kana);
        if t.consumed == self.romaji.len() {
            self.romaji.clear();
            (true, true)
        } else {
            // the unconsumed tail starts the next syllable
            self.romaji.drain_front(t.consumed);
            (true, false)
        }
    }

    /// Run the dictionary lookup for the pending kana. Commits directly
    /// for a single candidate (or with auto-decide), otherwise opens the
    /// candidate selection.
    fn do_henkan<H: InputHooks, R: Renderer>(
        &mut self,
        hooks: &mut H,
        screen: &mut R,
        resume_romaji: bool,
    ) -> HenkanOutcome {
        let yomigana = self.kana.as_bytes().to_vec();
        let Some(mut hit) = self.skk.henkan(&yomigana) else {
            debug!("conversion found nothing");
            screen.flash();
            return HenkanOutcome::Failed;
        };

        let count = hit.reader.candidates_count();
        if count <= 1 || self.config.autodecide {
            let multiple = count > 1;
            self.commit_candidate(&mut hit, multiple, hooks);
            self.kana.clear();
            return HenkanOutcome::Committed;
        }

        let mut selection = SelectionState::new(hit, count, resume_romaji);
        let page = selection.pack_page(
            &mut self.skk,
            self.config.max_display_bytes,
            self.config.select_keys.len(),
        );
        screen.clear_rect(INPUT_LINE, 0, u8::MAX);
        screen.draw_text(INPUT_LINE, 0, &page);
        self.selection = Some(selection);
        HenkanOutcome::Selecting
    }

    /// Keys routed here while a candidate page is on screen.
    fn step_selection<H: InputHooks, R: Renderer>(
        &mut self,
        key: Key,
        hooks: &mut H,
        screen: &mut R,
    ) {
        let Some(mut selection) = self.selection.take() else {
            return;
        };
        match key {
            Key::Escape | Key::Backspace => {
                // back out; the composition is untouched
                debug!("candidate selection canceled");
                if selection.resume_romaji() {
                    self.henkan_waiting = false;
                }
                self.draw_texts(screen);
            }

            Key::Char(c) if c == self.config.next_page_key as u8 => {
                if selection.exhausted() {
                    selection.rewind(&mut self.skk);
                }
                let page = selection.pack_page(
                    &mut self.skk,
                    self.config.max_display_bytes,
                    self.config.select_keys.len(),
                );
                screen.clear_rect(INPUT_LINE, 0, u8::MAX);
                screen.draw_text(INPUT_LINE, 0, &page);
                self.selection = Some(selection);
            }

            Key::Char(c) => match self.config.selection_key_index(c) {
                Some(slot) => match selection.candidate_at(slot) {
                    Some(index) => {
                        let resume = selection.resume_romaji();
                        let mut hit = selection.select(&mut self.skk, index);
                        self.commit_candidate(&mut hit, false, hooks);
                        self.kana.clear();
                        self.henkan_waiting = false;
                        if resume {
                            let (produced, include_romaji) = self.resolve_romaji();
                            if produced {
                                if self.mode == InputMode::HenkanKatakana {
                                    sjis::hiragana_to_katakana(self.kana.as_mut_slice());
                                }
                                self.flush(include_romaji, hooks);
                            }
                        }
                        self.draw_texts(screen);
                    }
                    None => {
                        debug!(key = c, "selector maps to no candidate on this page");
                        self.selection = Some(selection);
                    }
                },
                None => {
                    self.selection = Some(selection);
                }
            },

            _ => {
                self.selection = Some(selection);
            }
        }
    }

    /// Emit the candidate under the reader's cursor. In katakana mode the
    /// bytes are converted pairwise; single-byte content passes through.
    fn commit_candidate<H: InputHooks>(
        &mut self,
        hit: &mut HenkanHit,
        multiple: bool,
        hooks: &mut H,
    ) {
        let mark = self.config.autodecide && multiple;
        if mark {
            hooks.emit(AUTODECIDE_OPEN_MARK);
        }

        let dict = self.skk.dict_mut(hit.slot);
        if self.mode == InputMode::HenkanKatakana {
            let mut out = Vec::with_capacity(hit.reader.current_candidate_length() as usize);
            while let Some(b0) = hit.reader.read(dict) {
                if sjis::char_width(b0) == 1 {
                    out.push(b0);
                    continue;
                }
                match hit.reader.read(dict) {
                    Some(b1) => out.extend_from_slice(&sjis::hiragana_pair_to_katakana(b0, b1)),
                    None => {
                        out.push(b0);
                        break;
                    }
                }
            }
            hooks.emit(&out);
        } else {
            let out = hit.reader.read_current(dict);
            hooks.emit(&out);
        }

        if mark {
            hooks.emit(AUTODECIDE_CLOSE_MARK);
        }
    }

    fn draw_texts<R: Renderer>(&self, screen: &mut R) {
        screen.clear_rect(INPUT_LINE, 0, u8::MAX);
        screen.draw_text(INPUT_LINE, 0, self.kana.as_bytes());
        let col = (self.kana.len() as u8).saturating_mul(COLS_PER_BYTE);
        screen.draw_text(INPUT_LINE, col, self.romaji.as_bytes());
    }
}

fn is_symbol_byte(ch: u8) -> bool {
    matches!(ch, b' '..=b'~' | 0xA1..=0xA5 | 0xB0 | 0xDE..=0xDF)
}
