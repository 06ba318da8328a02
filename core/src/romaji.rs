//! Romaji to hiragana transliteration.
//!
//! One static table, matched against the whole pending romaji buffer at
//! once. Most entries consume the entire buffer; keep-tail entries leave
//! the final letter in place (doubled consonants stage a sokuon, `n`
//! before a consonant stages ん, and the consonant still starts the next
//! syllable). Kana output is Shift-JIS.

use phf::phf_map;

pub struct RomajiKana {
    pub kana: &'static [u8],
    pub keep_tail: bool,
}

/// Result of a table hit: the kana bytes to append and how many romaji
/// bytes were consumed.
pub struct Transliteration {
    pub kana: &'static [u8],
    pub consumed: usize,
}

/// Match `romaji` against the table as a whole. `None` means the buffer
/// is not (yet) a complete syllable.
pub fn transliterate(romaji: &[u8]) -> Option<Transliteration> {
    let key = std::str::from_utf8(romaji).ok()?;
    let entry = TABLE.get(key)?;
    let consumed = if entry.keep_tail {
        romaji.len() - 1
    } else {
        romaji.len()
    };
    Some(Transliteration {
        kana: entry.kana,
        consumed,
    })
}

static TABLE: phf::Map<&'static str, RomajiKana> = phf_map! {
    "a" => RomajiKana { kana: b"\x82\xa0", keep_tail: false },
    "i" => RomajiKana { kana: b"\x82\xa2", keep_tail: false },
    "u" => RomajiKana { kana: b"\x82\xa4", keep_tail: false },
    "e" => RomajiKana { kana: b"\x82\xa6", keep_tail: false },
    "o" => RomajiKana { kana: b"\x82\xa8", keep_tail: false },
    "ka" => RomajiKana { kana: b"\x82\xa9", keep_tail: false },
    "ki" => RomajiKana { kana: b"\x82\xab", keep_tail: false },
    "ku" => RomajiKana { kana: b"\x82\xad", keep_tail: false },
    "ke" => RomajiKana { kana: b"\x82\xaf", keep_tail: false },
    "ko" => RomajiKana { kana: b"\x82\xb1", keep_tail: false },
    "ga" => RomajiKana { kana: b"\x82\xaa", keep_tail: false },
    "gi" => RomajiKana { kana: b"\x82\xac", keep_tail: false },
    "gu" => RomajiKana { kana: b"\x82\xae", keep_tail: false },
    "ge" => RomajiKana { kana: b"\x82\xb0", keep_tail: false },
    "go" => RomajiKana { kana: b"\x82\xb2", keep_tail: false },
    "sa" => RomajiKana { kana: b"\x82\xb3", keep_tail: false },
    "si" => RomajiKana { kana: b"\x82\xb5", keep_tail: false },
    "shi" => RomajiKana { kana: b"\x82\xb5", keep_tail: false },
    "su" => RomajiKana { kana: b"\x82\xb7", keep_tail: false },
    "se" => RomajiKana { kana: b"\x82\xb9", keep_tail: false },
    "so" => RomajiKana { kana: b"\x82\xbb", keep_tail: false },
    "za" => RomajiKana { kana: b"\x82\xb4", keep_tail: false },
    "zi" => RomajiKana { kana: b"\x82\xb6", keep_tail: false },
    "ji" => RomajiKana { kana: b"\x82\xb6", keep_tail: false },
    "zu" => RomajiKana { kana: b"\x82\xb8", keep_tail: false },
    "ze" => RomajiKana { kana: b"\x82\xba", keep_tail: false },
    "zo" => RomajiKana { kana: b"\x82\xbc", keep_tail: false },
    "ta" => RomajiKana { kana: b"\x82\xbd", keep_tail: false },
    "ti" => RomajiKana { kana: b"\x82\xbf", keep_tail: false },
    "chi" => RomajiKana { kana: b"\x82\xbf", keep_tail: false },
    "tu" => RomajiKana { kana: b"\x82\xc2", keep_tail: false },
    "tsu" => RomajiKana { kana: b"\x82\xc2", keep_tail: false },
    "te" => RomajiKana { kana: b"\x82\xc4", keep_tail: false },
    "to" => RomajiKana { kana: b"\x82\xc6", keep_tail: false },
    "da" => RomajiKana { kana: b"\x82\xbe", keep_tail: false },
    "di" => RomajiKana { kana: b"\x82\xc0", keep_tail: false },
    "du" => RomajiKana { kana: b"\x82\xc3", keep_tail: false },
    "de" => RomajiKana { kana: b"\x82\xc5", keep_tail: false },
    "do" => RomajiKana { kana: b"\x82\xc7", keep_tail: false },
    "na" => RomajiKana { kana: b"\x82\xc8", keep_tail: false },
    "ni" => RomajiKana { kana: b"\x82\xc9", keep_tail: false },
    "nu" => RomajiKana { kana: b"\x82\xca", keep_tail: false },
    "ne" => RomajiKana { kana: b"\x82\xcb", keep_tail: false },
    "no" => RomajiKana { kana: b"\x82\xcc", keep_tail: false },
    "ha" => RomajiKana { kana: b"\x82\xcd", keep_tail: false },
    "hi" => RomajiKana { kana: b"\x82\xd0", keep_tail: false },
    "hu" => RomajiKana { kana: b"\x82\xd3", keep_tail: false },
    "fu" => RomajiKana { kana: b"\x82\xd3", keep_tail: false },
    "he" => RomajiKana { kana: b"\x82\xd6", keep_tail: false },
    "ho" => RomajiKana { kana: b"\x82\xd9", keep_tail: false },
    "ba" => RomajiKana { kana: b"\x82\xce", keep_tail: false },
    "bi" => RomajiKana { kana: b"\x82\xd1", keep_tail: false },
    "bu" => RomajiKana { kana: b"\x82\xd4", keep_tail: false },
    "be" => RomajiKana { kana: b"\x82\xd7", keep_tail: false },
    "bo" => RomajiKana { kana: b"\x82\xda", keep_tail: false },
    "pa" => RomajiKana { kana: b"\x82\xcf", keep_tail: false },
    "pi" => RomajiKana { kana: b"\x82\xd2", keep_tail: false },
    "pu" => RomajiKana { kana: b"\x82\xd5", keep_tail: false },
    "pe" => RomajiKana { kana: b"\x82\xd8", keep_tail: false },
    "po" => RomajiKana { kana: b"\x82\xdb", keep_tail: false },
    "ma" => RomajiKana { kana: b"\x82\xdc", keep_tail: false },
    "mi" => RomajiKana { kana: b"\x82\xdd", keep_tail: false },
    "mu" => RomajiKana { kana: b"\x82\xde", keep_tail: false },
    "me" => RomajiKana { kana: b"\x82\xdf", keep_tail: false },
    "mo" => RomajiKana { kana: b"\x82\xe0", keep_tail: false },
    "ya" => RomajiKana { kana: b"\x82\xe2", keep_tail: false },
    "yu" => RomajiKana { kana: b"\x82\xe4", keep_tail: false },
    "yo" => RomajiKana { kana: b"\x82\xe6", keep_tail: false },
    "ra" => RomajiKana { kana: b"\x82\xe7", keep_tail: false },
    "ri" => RomajiKana { kana: b"\x82\xe8", keep_tail: false },
    "ru" => RomajiKana { kana: b"\x82\xe9", keep_tail: false },
    "re" => RomajiKana { kana: b"\x82\xea", keep_tail: false },
    "ro" => RomajiKana { kana: b"\x82\xeb", keep_tail: false },
    "wa" => RomajiKana { kana: b"\x82\xed", keep_tail: false },
    "wo" => RomajiKana { kana: b"\x82\xf0", keep_tail: false },
    "nn" => RomajiKana { kana: b"\x82\xf1", keep_tail: false },
    "kya" => RomajiKana { kana: b"\x82\xab\x82\xe1", keep_tail: false },
    "kyu" => RomajiKana { kana: b"\x82\xab\x82\xe3", keep_tail: false },
    "kyo" => RomajiKana { kana: b"\x82\xab\x82\xe5", keep_tail: false },
    "gya" => RomajiKana { kana: b"\x82\xac\x82\xe1", keep_tail: false },
    "gyu" => RomajiKana { kana: b"\x82\xac\x82\xe3", keep_tail: false },
    "gyo" => RomajiKana { kana: b"\x82\xac\x82\xe5", keep_tail: false },
    "sha" => RomajiKana { kana: b"\x82\xb5\x82\xe1", keep_tail: false },
    "shu" => RomajiKana { kana: b"\x82\xb5\x82\xe3", keep_tail: false },
    "sho" => RomajiKana { kana: b"\x82\xb5\x82\xe5", keep_tail: false },
    "sya" => RomajiKana { kana: b"\x82\xb5\x82\xe1", keep_tail: false },
    "syu" => RomajiKana { kana: b"\x82\xb5\x82\xe3", keep_tail: false },
    "syo" => RomajiKana { kana: b"\x82\xb5\x82\xe5", keep_tail: false },
    "ja" => RomajiKana { kana: b"\x82\xb6\x82\xe1", keep_tail: false },
    "ju" => RomajiKana { kana: b"\x82\xb6\x82\xe3", keep_tail: false },
    "jo" => RomajiKana { kana: b"\x82\xb6\x82\xe5", keep_tail: false },
    "jya" => RomajiKana { kana: b"\x82\xb6\x82\xe1", keep_tail: false },
    "jyu" => RomajiKana { kana: b"\x82\xb6\x82\xe3", keep_tail: false },
    "jyo" => RomajiKana { kana: b"\x82\xb6\x82\xe5", keep_tail: false },
    "zya" => RomajiKana { kana: b"\x82\xb6\x82\xe1", keep_tail: false },
    "zyu" => RomajiKana { kana: b"\x82\xb6\x82\xe3", keep_tail: false },
    "zyo" => RomajiKana { kana: b"\x82\xb6\x82\xe5", keep_tail: false },
    "cha" => RomajiKana { kana: b"\x82\xbf\x82\xe1", keep_tail: false },
    "chu" => RomajiKana { kana: b"\x82\xbf\x82\xe3", keep_tail: false },
    "cho" => RomajiKana { kana: b"\x82\xbf\x82\xe5", keep_tail: false },
    "tya" => RomajiKana { kana: b"\x82\xbf\x82\xe1", keep_tail: false },
    "tyu" => RomajiKana { kana: b"\x82\xbf\x82\xe3", keep_tail: false },
    "tyo" => RomajiKana { kana: b"\x82\xbf\x82\xe5", keep_tail: false },
    "dya" => RomajiKana { kana: b"\x82\xc0\x82\xe1", keep_tail: false },
    "dyu" => RomajiKana { kana: b"\x82\xc0\x82\xe3", keep_tail: false },
    "dyo" => RomajiKana { kana: b"\x82\xc0\x82\xe5", keep_tail: false },
    "nya" => RomajiKana { kana: b"\x82\xc9\x82\xe1", keep_tail: false },
    "nyu" => RomajiKana { kana: b"\x82\xc9\x82\xe3", keep_tail: false },
    "nyo" => RomajiKana { kana: b"\x82\xc9\x82\xe5", keep_tail: false },
    "hya" => RomajiKana { kana: b"\x82\xd0\x82\xe1", keep_tail: false },
    "hyu" => RomajiKana { kana: b"\x82\xd0\x82\xe3", keep_tail: false },
    "hyo" => RomajiKana { kana: b"\x82\xd0\x82\xe5", keep_tail: false },
    "bya" => RomajiKana { kana: b"\x82\xd1\x82\xe1", keep_tail: false },
    "byu" => RomajiKana { kana: b"\x82\xd1\x82\xe3", keep_tail: false },
    "byo" => RomajiKana { kana: b"\x82\xd1\x82\xe5", keep_tail: false },
    "pya" => RomajiKana { kana: b"\x82\xd2\x82\xe1", keep_tail: false },
    "pyu" => RomajiKana { kana: b"\x82\xd2\x82\xe3", keep_tail: false },
    "pyo" => RomajiKana { kana: b"\x82\xd2\x82\xe5", keep_tail: false },
    "mya" => RomajiKana { kana: b"\x82\xdd\x82\xe1", keep_tail: false },
    "myu" => RomajiKana { kana: b"\x82\xdd\x82\xe3", keep_tail: false },
    "myo" => RomajiKana { kana: b"\x82\xdd\x82\xe5", keep_tail: false },
    "rya" => RomajiKana { kana: b"\x82\xe8\x82\xe1", keep_tail: false },
    "ryu" => RomajiKana { kana: b"\x82\xe8\x82\xe3", keep_tail: false },
    "ryo" => RomajiKana { kana: b"\x82\xe8\x82\xe5", keep_tail: false },
    "fa" => RomajiKana { kana: b"\x82\xd3\x82\x9f", keep_tail: false },
    "fi" => RomajiKana { kana: b"\x82\xd3\x82\xa1", keep_tail: false },
    "fe" => RomajiKana { kana: b"\x82\xd3\x82\xa5", keep_tail: false },
    "fo" => RomajiKana { kana: b"\x82\xd3\x82\xa7", keep_tail: false },
    "xa" => RomajiKana { kana: b"\x82\x9f", keep_tail: false },
    "xi" => RomajiKana { kana: b"\x82\xa1", keep_tail: false },
    "xu" => RomajiKana { kana: b"\x82\xa3", keep_tail: false },
    "xe" => RomajiKana { kana: b"\x82\xa5", keep_tail: false },
    "xo" => RomajiKana { kana: b"\x82\xa7", keep_tail: false },
    "la" => RomajiKana { kana: b"\x82\x9f", keep_tail: false },
    "li" => RomajiKana { kana: b"\x82\xa1", keep_tail: false },
    "lu" => RomajiKana { kana: b"\x82\xa3", keep_tail: false },
    "le" => RomajiKana { kana: b"\x82\xa5", keep_tail: false },
    "lo" => RomajiKana { kana: b"\x82\xa7", keep_tail: false },
    "xya" => RomajiKana { kana: b"\x82\xe1", keep_tail: false },
    "xyu" => RomajiKana { kana: b"\x82\xe3", keep_tail: false },
    "xyo" => RomajiKana { kana: b"\x82\xe5", keep_tail: false },
    "xtu" => RomajiKana { kana: b"\x82\xc1", keep_tail: false },
    "ltu" => RomajiKana { kana: b"\x82\xc1", keep_tail: false },
    "kk" => RomajiKana { kana: b"\x82\xc1", keep_tail: true },
    "ss" => RomajiKana { kana: b"\x82\xc1", keep_tail: true },
    "tt" => RomajiKana { kana: b"\x82\xc1", keep_tail: true },
    "pp" => RomajiKana { kana: b"\x82\xc1", keep_tail: true },
    "cc" => RomajiKana { kana: b"\x82\xc1", keep_tail: true },
    "gg" => RomajiKana { kana: b"\x82\xc1", keep_tail: true },
    "hh" => RomajiKana { kana: b"\x82\xc1", keep_tail: true },
    "zz" => RomajiKana { kana: b"\x82\xc1", keep_tail: true },
    "jj" => RomajiKana { kana: b"\x82\xc1", keep_tail: true },
    "dd" => RomajiKana { kana: b"\x82\xc1", keep_tail: true },
    "bb" => RomajiKana { kana: b"\x82\xc1", keep_tail: true },
    "mm" => RomajiKana { kana: b"\x82\xc1", keep_tail: true },
    "rr" => RomajiKana { kana: b"\x82\xc1", keep_tail: true },
    "ww" => RomajiKana { kana: b"\x82\xc1", keep_tail: true },
    "ff" => RomajiKana { kana: b"\x82\xc1", keep_tail: true },
    "vv" => RomajiKana { kana: b"\x82\xc1", keep_tail: true },
    "nk" => RomajiKana { kana: b"\x82\xf1", keep_tail: true },
    "ns" => RomajiKana { kana: b"\x82\xf1", keep_tail: true },
    "nt" => RomajiKana { kana: b"\x82\xf1", keep_tail: true },
    "nc" => RomajiKana { kana: b"\x82\xf1", keep_tail: true },
    "ng" => RomajiKana { kana: b"\x82\xf1", keep_tail: true },
    "nh" => RomajiKana { kana: b"\x82\xf1", keep_tail: true },
    "nz" => RomajiKana { kana: b"\x82\xf1", keep_tail: true },
    "nj" => RomajiKana { kana: b"\x82\xf1", keep_tail: true },
    "nd" => RomajiKana { kana: b"\x82\xf1", keep_tail: true },
    "nb" => RomajiKana { kana: b"\x82\xf1", keep_tail: true },
    "np" => RomajiKana { kana: b"\x82\xf1", keep_tail: true },
    "nm" => RomajiKana { kana: b"\x82\xf1", keep_tail: true },
    "nr" => RomajiKana { kana: b"\x82\xf1", keep_tail: true },
    "nw" => RomajiKana { kana: b"\x82\xf1", keep_tail: true },
    "nf" => RomajiKana { kana: b"\x82\xf1", keep_tail: true },
};
