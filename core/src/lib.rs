//! libskk-core: SKK-style kana-kanji conversion.
//!
//! The crate has three layers:
//! - a binary dictionary store searched through a sequential cursor
//!   ([`dict::SkkDict`] over a [`storage::DictStorage`]),
//! - a conversion engine with user/system dictionary precedence
//!   ([`engine::SkkEngine`]),
//! - a key-driven input orchestrator with romaji transliteration, mode
//!   switching and candidate paging ([`input::InputEngine`]).
//!
//! All text is Shift-JIS byte strings; there is no Unicode conversion
//! anywhere in the pipeline.

pub mod buffer;
pub mod builder;
pub mod candidates;
pub mod dict;
pub mod engine;
pub mod input;
pub mod keys;
pub mod romaji;
pub mod sjis;
pub mod storage;

pub use buffer::BoundedBuffer;
pub use builder::DictBuilder;
pub use candidates::CandidateReader;
pub use dict::{IndexHit, SkkDict};
pub use engine::{DictSlot, HenkanHit, SkkEngine};
pub use input::{InputEngine, InputMode};
pub use keys::{InputHooks, Key, KeySource, Renderer};
pub use storage::{DictStorage, FileStorage, MemoryStorage};

use serde::{Deserialize, Serialize};

/// Runtime configuration for the input orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Candidate selector keys, in page order. At most ten are used.
    pub select_keys: String,

    /// Key that advances the candidate page.
    pub next_page_key: char,

    /// Byte budget of one candidate page.
    pub max_display_bytes: usize,

    /// Capacity of the pending romaji buffer, in bytes.
    pub romaji_capacity: usize,

    /// Capacity of the pending kana buffer, in bytes.
    pub kana_capacity: usize,

    /// Commit the first candidate without paging, wrapping the output in
    /// `{`/`}` when other candidates existed.
    pub autodecide: bool,

    /// Space-and-shift: holding space shifts alphabetic keys.
    pub sands: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            select_keys: "qwertyuiop".to_string(),
            next_page_key: 'n',
            max_display_bytes: 16,
            romaji_capacity: 8,
            kana_capacity: 34,
            autodecide: false,
            sands: false,
        }
    }
}

impl Config {
    /// Load from a TOML file.
    pub fn load_toml(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save to a TOML file.
    pub fn save_toml(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Position of `key` among the selector keys, if it is one.
    pub fn selection_key_index(&self, key: u8) -> Option<usize> {
        self.select_keys.bytes().position(|b| b == key)
    }
}
