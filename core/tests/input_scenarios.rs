//! End-to-end key sequences through the input orchestrator.

use libskk_core::{
    Config, DictBuilder, InputEngine, InputHooks, InputMode, Key, MemoryStorage, Renderer,
    SkkDict, SkkEngine,
};

#[derive(Default)]
struct RecordingHooks {
    emitted: Vec<Vec<u8>>,
    uncaught: Vec<Key>,
}

impl InputHooks for RecordingHooks {
    fn emit(&mut self, sjis: &[u8]) {
        self.emitted.push(sjis.to_vec());
    }

    fn on_key_uncaught(&mut self, key: Key) {
        self.uncaught.push(key);
    }
}

#[derive(Default)]
struct TestScreen {
    flashes: usize,
    drawn: Vec<(u8, u8, Vec<u8>)>,
}

impl TestScreen {
    fn last_drawn(&self) -> &[u8] {
        &self.drawn.last().expect("nothing drawn").2
    }
}

impl Renderer for TestScreen {
    fn draw_text(&mut self, line: u8, col: u8, sjis: &[u8]) {
        self.drawn.push((line, col, sjis.to_vec()));
    }

    fn clear_rect(&mut self, _line: u8, _col: u8, _width: u8) {}

    fn fill_rect(&mut self, _line: u8, _col: u8, _width: u8, _half_height: bool) {}

    fn flash(&mut self) {
        self.flashes += 1;
    }
}

// Shift-JIS fragments used below
const KA: &[u8] = b"\x82\xa9";
const KO: &[u8] = b"\x82\xb1";
const TA: &[u8] = b"\x82\xbd";
const RU: &[u8] = b"\x82\xe9";
const N: &[u8] = b"\x82\xf1";
const SMALL_TSU: &[u8] = b"\x82\xc1";
const KAWA: &[u8] = b"\x82\xa9\x82\xed";
const KOKUMIN: &[u8] = b"\x82\xb1\x82\xad\x82\xdd\x82\xf1"; // こくみん
const NJAMENA: &[u8] = b"\x82\xf1\x82\xb6\x82\xe1\x82\xdf\x82\xc8"; // んじゃめな
const KOKUMIN_KANJI: &[u8] = b"\x8d\x91\x96\xaf"; // 国民
const KAWA_KANJI: &[u8] = b"\x90\xec"; // 川
const KATA_KAWA: &[u8] = b"\x83\x4a\x83\x8f"; // カワ
const CHOON: &[u8] = b"\x81\x5b"; // ー

fn engine_with(entries: &[(&[u8], &[&[u8]])]) -> InputEngine<MemoryStorage> {
    engine_with_config(entries, Config::default())
}

fn engine_with_config(
    entries: &[(&[u8], &[&[u8]])],
    config: Config,
) -> InputEngine<MemoryStorage> {
    let mut builder = DictBuilder::new();
    for (key, candidates) in entries {
        builder.add_entry(key, candidates);
    }
    let dict = SkkDict::open(MemoryStorage::new(builder.build())).unwrap();
    InputEngine::with_config(SkkEngine::new(dict), config)
}

fn type_str(
    engine: &mut InputEngine<MemoryStorage>,
    text: &str,
    hooks: &mut RecordingHooks,
    screen: &mut TestScreen,
) {
    for b in text.bytes() {
        engine.step(Key::Char(b), hooks, screen);
    }
}

#[test]
fn test_single_candidate_conversion() {
    let mut engine = engine_with(&[(KOKUMIN, &[KOKUMIN_KANJI])]);
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();

    type_str(&mut engine, "Kokuminn", &mut hooks, &mut screen);
    assert!(engine.is_henkan_waiting());
    assert_eq!(engine.pending_kana(), KOKUMIN);
    assert!(hooks.emitted.is_empty());

    engine.step(Key::Char(b' '), &mut hooks, &mut screen);
    assert_eq!(hooks.emitted, vec![KOKUMIN_KANJI.to_vec()]);
    assert!(engine.pending_kana().is_empty());
    assert!(!engine.is_henkan_waiting());
}

#[test]
fn test_failed_conversion_flashes_and_keeps_buffers() {
    let mut engine = engine_with(&[(KOKUMIN, &[KOKUMIN_KANJI])]);
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();

    type_str(&mut engine, "Nnjamena", &mut hooks, &mut screen);
    assert_eq!(engine.pending_kana(), NJAMENA);

    engine.step(Key::Char(b' '), &mut hooks, &mut screen);
    assert_eq!(screen.flashes, 1);
    assert!(hooks.emitted.is_empty());
    assert_eq!(engine.pending_kana(), NJAMENA);
    assert!(engine.is_henkan_waiting());
}

#[test]
fn test_lowercase_typing_commits_kana_as_it_resolves() {
    let mut engine = engine_with(&[]);
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();

    type_str(&mut engine, "konn", &mut hooks, &mut screen);
    assert_eq!(hooks.emitted, vec![KO.to_vec(), N.to_vec()]);
    assert!(engine.pending_romaji().is_empty());
    assert!(engine.pending_kana().is_empty());
}

#[test]
fn test_doubled_consonant_keeps_tail_letter() {
    let mut engine = engine_with(&[]);
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();

    type_str(&mut engine, "katt", &mut hooks, &mut screen);
    // "tt" stages っ; the second t stays for the next syllable
    assert_eq!(hooks.emitted, vec![KA.to_vec(), SMALL_TSU.to_vec()]);
    assert_eq!(engine.pending_romaji(), b"t");

    type_str(&mut engine, "a", &mut hooks, &mut screen);
    assert_eq!(
        hooks.emitted,
        vec![KA.to_vec(), SMALL_TSU.to_vec(), TA.to_vec()]
    );
    assert!(engine.pending_romaji().is_empty());
}

#[test]
fn test_enter_commits_composition_verbatim() {
    let mut engine = engine_with(&[]);
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();

    type_str(&mut engine, "Kon", &mut hooks, &mut screen);
    assert!(engine.is_henkan_waiting());
    engine.step(Key::Enter, &mut hooks, &mut screen);
    // kana first, then the unresolved romaji
    assert_eq!(hooks.emitted, vec![KO.to_vec(), b"n".to_vec()]);
    assert!(!engine.is_henkan_waiting());
}

#[test]
fn test_enter_without_composition_is_uncaught() {
    let mut engine = engine_with(&[]);
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();

    engine.step(Key::Enter, &mut hooks, &mut screen);
    assert_eq!(hooks.uncaught, vec![Key::Enter]);
}

#[test]
fn test_backspace_eats_romaji_then_kana_then_falls_through() {
    let mut engine = engine_with(&[]);
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();

    type_str(&mut engine, "Kak", &mut hooks, &mut screen);
    assert_eq!(engine.pending_kana(), KA);
    assert_eq!(engine.pending_romaji(), b"k");

    engine.step(Key::Backspace, &mut hooks, &mut screen);
    assert!(engine.pending_romaji().is_empty());
    assert_eq!(engine.pending_kana(), KA);

    engine.step(Key::Backspace, &mut hooks, &mut screen);
    assert!(engine.pending_kana().is_empty());
    assert!(hooks.uncaught.is_empty());

    engine.step(Key::Backspace, &mut hooks, &mut screen);
    assert_eq!(hooks.uncaught, vec![Key::Backspace]);
}

#[test]
fn test_muhenkan_forces_direct_mode() {
    let mut engine = engine_with(&[]);
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();

    type_str(&mut engine, "k", &mut hooks, &mut screen);
    engine.step(Key::Muhenkan, &mut hooks, &mut screen);
    assert_eq!(engine.mode(), InputMode::Direct);
    // the pending romaji was committed as-is
    assert_eq!(hooks.emitted, vec![b"k".to_vec()]);

    type_str(&mut engine, "aB", &mut hooks, &mut screen);
    engine.step(Key::Char(b'-'), &mut hooks, &mut screen);
    assert_eq!(
        hooks.emitted,
        vec![b"k".to_vec(), b"a".to_vec(), b"B".to_vec(), b"-".to_vec()]
    );
}

#[test]
fn test_henkan_key_toggles_kana_mode() {
    let mut engine = engine_with(&[]);
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();

    assert_eq!(engine.mode(), InputMode::HenkanHiragana);
    engine.step(Key::Henkan, &mut hooks, &mut screen);
    assert_eq!(engine.mode(), InputMode::HenkanKatakana);

    // romaji now lands as katakana
    type_str(&mut engine, "ka", &mut hooks, &mut screen);
    assert_eq!(hooks.emitted, vec![b"\x83\x4a".to_vec()]); // カ

    engine.step(Key::Henkan, &mut hooks, &mut screen);
    assert_eq!(engine.mode(), InputMode::HenkanHiragana);
}

#[test]
fn test_henkan_key_while_waiting_commits_katakana() {
    let mut engine = engine_with(&[]);
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();

    type_str(&mut engine, "Kawa", &mut hooks, &mut screen);
    engine.step(Key::Henkan, &mut hooks, &mut screen);
    assert_eq!(hooks.emitted, vec![KATA_KAWA.to_vec()]);
    // no mode change happened
    assert_eq!(engine.mode(), InputMode::HenkanHiragana);
}

#[test]
fn test_punctuation_becomes_fullwidth_in_conversion_modes() {
    let mut engine = engine_with(&[]);
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();

    type_str(&mut engine, "ka", &mut hooks, &mut screen);
    engine.step(Key::Char(b'-'), &mut hooks, &mut screen);
    engine.step(Key::Char(b','), &mut hooks, &mut screen);
    engine.step(Key::Char(b'.'), &mut hooks, &mut screen);
    engine.step(Key::Char(0xA5), &mut hooks, &mut screen);
    assert_eq!(
        hooks.emitted,
        vec![
            KA.to_vec(),
            CHOON.to_vec(),
            b"\x81\x41".to_vec(), // 、
            b"\x81\x42".to_vec(), // 。
            b"\x81\x45".to_vec(), // ・
        ]
    );
}

#[test]
fn test_katakana_commit_converts_pairs_and_passes_ascii() {
    // candidate contains hiragana around a single-byte character
    let candidate: &[u8] = b"\x82\xa9x\x82\xed"; // かxわ
    let mut engine = engine_with(&[(KAWA, &[candidate])]);
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();

    engine.step(Key::Henkan, &mut hooks, &mut screen);
    assert_eq!(engine.mode(), InputMode::HenkanKatakana);

    type_str(&mut engine, "Kawa", &mut hooks, &mut screen);
    engine.step(Key::Char(b' '), &mut hooks, &mut screen);
    assert_eq!(hooks.emitted, vec![b"\x83\x4ax\x83\x8f".to_vec()]); // カxワ
}

#[test]
fn test_katakana_commit_keeps_kanji_with_low_trail_byte() {
    // 0x8940 has a trail byte below the even-cell ranges; the kuten
    // mapping must leave it untouched on a katakana-mode commit
    let candidate: &[u8] = b"\x89\x40";
    let mut engine = engine_with(&[(KA, &[candidate])]);
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();

    engine.step(Key::Henkan, &mut hooks, &mut screen);
    type_str(&mut engine, "Ka", &mut hooks, &mut screen);
    engine.step(Key::Char(b' '), &mut hooks, &mut screen);
    assert_eq!(hooks.emitted, vec![candidate.to_vec()]);
}

#[test]
fn test_okurigana_conversion_then_trailing_kana() {
    // かわr: yomigana with the okurigana consonant appended
    let key: &[u8] = b"\x82\xa9\x82\xedr";
    let mut engine = engine_with(&[(key, &[b"\x89\xf1"])]); // 回
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();

    type_str(&mut engine, "KawaRu", &mut hooks, &mut screen);
    assert_eq!(hooks.emitted, vec![b"\x89\xf1".to_vec(), RU.to_vec()]);
    assert!(!engine.is_henkan_waiting());
    assert!(engine.pending_romaji().is_empty());
}

#[test]
fn test_autodecide_wraps_multi_candidate_commit() {
    let mut config = Config::default();
    config.autodecide = true;
    let mut engine = engine_with_config(
        &[(KAWA, &[KAWA_KANJI, b"\x89\xcd"])],
        config,
    );
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();

    type_str(&mut engine, "Kawa", &mut hooks, &mut screen);
    engine.step(Key::Char(b' '), &mut hooks, &mut screen);
    assert_eq!(
        hooks.emitted,
        vec![b"{".to_vec(), KAWA_KANJI.to_vec(), b"}".to_vec()]
    );
}

fn twelve_candidates() -> Vec<Vec<u8>> {
    (0..12u8).map(|i| vec![0x88, 0x40 + i]).collect()
}

fn paging_engine() -> InputEngine<MemoryStorage> {
    let candidates = twelve_candidates();
    let refs: Vec<&[u8]> = candidates.iter().map(|c| c.as_slice()).collect();
    let mut config = Config::default();
    config.select_keys = "qwertyui".to_string(); // eight selectors
    config.max_display_bytes = 16;
    engine_with_config(&[(b"\x82\xa0", &refs)], config)
}

#[test]
fn test_candidate_paging_wraps_to_first_page() {
    let mut engine = paging_engine();
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();
    let candidates = twelve_candidates();

    type_str(&mut engine, "A", &mut hooks, &mut screen);
    engine.step(Key::Char(b' '), &mut hooks, &mut screen);
    assert!(engine.is_selecting());

    let page1: Vec<u8> = candidates[..8].concat();
    assert_eq!(screen.last_drawn(), &page1[..]);

    engine.step(Key::Char(b'n'), &mut hooks, &mut screen);
    let page2: Vec<u8> = candidates[8..].concat();
    assert_eq!(screen.last_drawn(), &page2[..]);

    // past the last candidate: wrap back to the first page
    engine.step(Key::Char(b'n'), &mut hooks, &mut screen);
    assert_eq!(screen.last_drawn(), &page1[..]);
}

#[test]
fn test_selection_key_commits_candidate() {
    let mut engine = paging_engine();
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();
    let candidates = twelve_candidates();

    type_str(&mut engine, "A", &mut hooks, &mut screen);
    engine.step(Key::Char(b' '), &mut hooks, &mut screen);

    // 'w' is the second selector on the first page
    engine.step(Key::Char(b'w'), &mut hooks, &mut screen);
    assert_eq!(hooks.emitted, vec![candidates[1].clone()]);
    assert!(!engine.is_selecting());
    assert!(engine.pending_kana().is_empty());
}

#[test]
fn test_selection_on_second_page() {
    let mut engine = paging_engine();
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();
    let candidates = twelve_candidates();

    type_str(&mut engine, "A", &mut hooks, &mut screen);
    engine.step(Key::Char(b' '), &mut hooks, &mut screen);
    engine.step(Key::Char(b'n'), &mut hooks, &mut screen);

    // 'e' is the third selector, so the eleventh candidate overall
    engine.step(Key::Char(b'e'), &mut hooks, &mut screen);
    assert_eq!(hooks.emitted, vec![candidates[10].clone()]);
}

#[test]
fn test_escape_cancels_selection_without_commit() {
    let mut engine = paging_engine();
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();

    type_str(&mut engine, "A", &mut hooks, &mut screen);
    engine.step(Key::Char(b' '), &mut hooks, &mut screen);
    assert!(engine.is_selecting());

    engine.step(Key::Escape, &mut hooks, &mut screen);
    assert!(!engine.is_selecting());
    assert!(hooks.emitted.is_empty());
    assert_eq!(engine.pending_kana(), b"\x82\xa0");

    // the composition is still live; conversion can be retried
    engine.step(Key::Char(b' '), &mut hooks, &mut screen);
    assert!(engine.is_selecting());
}

#[test]
fn test_selector_outside_page_is_ignored() {
    let mut engine = paging_engine();
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();

    type_str(&mut engine, "A", &mut hooks, &mut screen);
    engine.step(Key::Char(b' '), &mut hooks, &mut screen);
    engine.step(Key::Char(b'n'), &mut hooks, &mut screen);

    // page two holds four candidates; the eighth selector maps nowhere
    engine.step(Key::Char(b'i'), &mut hooks, &mut screen);
    assert!(engine.is_selecting());
    assert!(hooks.emitted.is_empty());
}

#[test]
fn test_oversized_first_candidate_shown_alone() {
    let long: Vec<u8> = (0..20u8).map(|i| if i % 2 == 0 { 0x88 } else { 0x40 }).collect();
    let refs: [&[u8]; 2] = [&long, b"\x90\xec"];
    let mut config = Config::default();
    config.max_display_bytes = 16;
    let mut engine = engine_with_config(&[(b"\x82\xa0", &refs)], config);
    let mut hooks = RecordingHooks::default();
    let mut screen = TestScreen::default();

    type_str(&mut engine, "A", &mut hooks, &mut screen);
    engine.step(Key::Char(b' '), &mut hooks, &mut screen);
    assert_eq!(screen.last_drawn(), &long[..]);

    engine.step(Key::Char(b'n'), &mut hooks, &mut screen);
    assert_eq!(screen.last_drawn(), b"\x90\xec");

    // the oversized candidate is still selectable from its page
    engine.step(Key::Char(b'n'), &mut hooks, &mut screen);
    engine.step(Key::Char(b'q'), &mut hooks, &mut screen);
    assert_eq!(hooks.emitted, vec![long]);
}
