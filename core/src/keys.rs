//! Key events and the seams to the host: key source, renderer, hooks.

/// One decoded key event. `Char` carries the byte the keymap produced
/// (ASCII, or a half-width code such as 0xA5 for ・).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(u8),
    Escape,
    Backspace,
    Enter,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Left,
    Right,
    Up,
    Down,
    /// Dedicated muhenkan key: force direct mode.
    Muhenkan,
    /// Dedicated henkan / hiragana-katakana key.
    Henkan,
    Function(u8),
}

/// Source of decoded key events plus the raw modifier state the SandS
/// resolution needs.
pub trait KeySource {
    /// Next pending key event, if any. Debouncing is the source's job.
    fn poll(&mut self) -> Option<Key>;

    /// Raw state of the physical shift, for cursor rendering.
    fn is_shift_down(&self) -> bool {
        false
    }

    /// Raw state of the physical space bar, for SandS.
    fn is_space_down(&self) -> bool {
        false
    }
}

/// Composition-line renderer. Coordinates are (line, column); column
/// units are the host's, the engine only derives them from byte counts.
pub trait Renderer {
    fn draw_text(&mut self, line: u8, col: u8, sjis: &[u8]);

    /// Clear `width` columns from (line, col); the width saturates at the
    /// right edge.
    fn clear_rect(&mut self, line: u8, col: u8, width: u8);

    /// Cursor block. `half_height` distinguishes the katakana cursor.
    fn fill_rect(&mut self, line: u8, col: u8, width: u8, half_height: bool);

    /// Attention flash on a failed conversion.
    fn flash(&mut self) {}
}

/// Host callbacks for one input engine.
pub trait InputHooks {
    /// Runs before any engine handling; return true to claim the key.
    fn on_key_prehook(&mut self, _key: Key) -> bool {
        false
    }

    /// A key the engine had no use for.
    fn on_key_uncaught(&mut self, _key: Key) {}

    /// Committed Shift-JIS output.
    fn emit(&mut self, sjis: &[u8]);

    /// Polled by `run`; return false to leave the loop.
    fn keep_running(&self) -> bool {
        true
    }
}
