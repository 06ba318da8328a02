//! The polling front end: SandS resolution and cursor blink.

use std::thread;
use std::time::{Duration, Instant};

use crate::keys::{InputHooks, Key, KeySource, Renderer};
use crate::storage::DictStorage;

use super::{InputEngine, InputMode, COLS_PER_BYTE, INPUT_LINE};

const LOOP_INTERVAL: Duration = Duration::from_millis(5);
const BLINK_INTERVAL: Duration = Duration::from_millis(400);
const IDLE_SLEEP: Duration = Duration::from_micros(250);

// cursor widths in display units
const CURSOR_FULLWIDTH: u8 = 14;
const CURSOR_SLIM: u8 = 3;
const CURSOR_LINE: u8 = 1;

impl<S: DictStorage> InputEngine<S> {
    /// Poll loop around [`InputEngine::step`]. Returns when [`stop`] was
    /// called from a hook or `keep_running` turns false.
    ///
    /// SandS (space-and-shift): while the space bar is held, alphabetic
    /// keys are shifted; a tap of space with nothing else pressed in
    /// between becomes an ordinary space on release.
    ///
    /// [`stop`]: InputEngine::stop
    pub fn run<K, R, H>(&mut self, keys: &mut K, screen: &mut R, hooks: &mut H)
    where
        K: KeySource,
        R: Renderer,
        H: InputHooks,
    {
        self.running = true;
        let mut blink_timer = Instant::now();
        let mut blink_drawn = false;
        let mut loop_timer = Instant::now();
        let mut space_pressed = false;
        let mut suppress_space_release = false;

        while self.running && hooks.keep_running() {
            if blink_timer.elapsed() > BLINK_INTERVAL {
                self.draw_cursor(screen, keys, blink_drawn);
                blink_drawn = !blink_drawn;
                blink_timer = Instant::now();
            }

            if self.pending_romaji().is_empty()
                && self.pending_kana().is_empty()
                && !self.is_selecting()
            {
                self.henkan_waiting = false;
            }

            if loop_timer.elapsed() < LOOP_INTERVAL {
                thread::sleep(IDLE_SLEEP);
                continue;
            }
            loop_timer = Instant::now();

            let mut key: Option<Key> = None;
            let mut shift_by_sands = false;
            if self.config.sands {
                let space_down = keys.is_space_down();
                if !space_pressed {
                    if space_down {
                        suppress_space_release = false;
                        space_pressed = true;
                        shift_by_sands = true;
                    }
                } else if space_down {
                    shift_by_sands = true;
                } else {
                    space_pressed = false;
                    if !suppress_space_release {
                        key = Some(Key::Char(b' '));
                    }
                }
            }

            let key = match key.or_else(|| keys.poll()) {
                Some(k) => k,
                None => continue,
            };

            if key != Key::Char(b' ') {
                // something else was typed during the space hold
                suppress_space_release = true;
            }
            if key == Key::Char(b' ')
                && self.config.sands
                && (space_pressed || suppress_space_release)
            {
                continue;
            }

            let key = match key {
                Key::Char(c) if shift_by_sands && c.is_ascii_lowercase() => {
                    Key::Char(c.to_ascii_uppercase())
                }
                other => other,
            };

            self.step(key, hooks, screen);
        }
    }

    /// Ask `run` to leave its loop.
    pub fn stop(&mut self) {
        self.running = false;
    }

    fn draw_cursor<R: Renderer, K: KeySource>(&self, screen: &mut R, keys: &K, erase: bool) {
        let col = ((self.pending_kana().len() + self.pending_romaji().len()) as u8)
            .saturating_mul(COLS_PER_BYTE);
        screen.clear_rect(INPUT_LINE, col, CURSOR_FULLWIDTH);
        if erase {
            return;
        }
        let width = if self.mode == InputMode::Direct {
            CURSOR_LINE
        } else if self.henkan_waiting || keys.is_shift_down() {
            CURSOR_FULLWIDTH
        } else {
            CURSOR_SLIM
        };
        let half_height = self.mode == InputMode::HenkanKatakana;
        screen.fill_rect(INPUT_LINE, col, width, half_height);
    }
}
