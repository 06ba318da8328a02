//! Shift-JIS byte-level helpers.
//!
//! Everything in the dictionary and on the wire is Shift-JIS, so the
//! buffers are plain byte strings and character boundaries are derived
//! from the lead-byte ranges. The 0xE0..=0xFF range is treated as
//! double-byte lead bytes wholesale; dictionary content stays inside the
//! JIS X 0208 area so the shortcut holds.

/// True if `b` starts a two-byte Shift-JIS sequence.
///
/// 0xA0..=0xDF (half-width katakana) is single-byte.
pub fn is_lead_byte(b: u8) -> bool {
    matches!(b, 0x81..=0x9F | 0xE0..=0xFF)
}

/// Byte width of the character whose first byte is `b`.
pub fn char_width(b: u8) -> usize {
    if is_lead_byte(b) {
        2
    } else {
        1
    }
}

/// Offset of the last character in `s`, or `None` for an empty string.
pub fn last_char_offset(s: &[u8]) -> Option<usize> {
    if s.is_empty() {
        return None;
    }
    let mut i = 0;
    let mut last = 0;
    while i < s.len() {
        last = i;
        i += char_width(s[i]);
    }
    Some(last)
}

/// Decompose a Shift-JIS character into JIS ku/ten numbers.
///
/// Single-byte characters come back as ku 0 with the byte itself as ten.
pub fn to_kuten(b0: u8, b1: u8) -> (u8, u8) {
    if !is_lead_byte(b0) {
        return (0, b0);
    }

    // One Shift-JIS lead byte covers two ku.
    let mut ku: u8 = match b0 {
        0x81..=0x9F => b0 - 0x81,
        0xE0..=0xFF => b0 - 0xE0 + 62 / 2,
        _ => 0xFF / 2,
    };
    ku = ku * 2 + 1;

    let ten: u8;
    if b1 >= 0x9F {
        // even ku
        ku += 1;
        ten = b1 - 0x9F + 1;
    } else if b1 >= 0x80 {
        ten = b1 - 0x80 + 63 + 1;
    } else {
        // trail bytes start at 0x40, which is ten 1
        ten = b1 - 0x3F;
    }
    (ku, ten)
}

/// Compose a two-byte Shift-JIS character from JIS ku/ten numbers.
/// `ku` must be at least 1 (ku 0 is the single-byte passthrough).
pub fn from_kuten(ku: u8, ten: u8) -> [u8; 2] {
    debug_assert!(ku >= 1);
    let b0 = if ku < 63 {
        0x81 + (ku - 1) / 2
    } else {
        0xE0 + (ku - 63) / 2
    };
    let b1 = if ku & 0x01 != 0 {
        if ten < 64 {
            0x40 + (ten - 1)
        } else {
            0x80 + (ten - 64)
        }
    } else {
        0x9F + (ten - 1)
    };
    [b0, b1]
}

/// Map one two-byte character from hiragana (ku 4) to katakana (ku 5).
/// Anything outside ku 4 is returned unchanged.
pub fn hiragana_pair_to_katakana(b0: u8, b1: u8) -> [u8; 2] {
    let (ku, ten) = to_kuten(b0, b1);
    if ku == 4 {
        from_kuten(5, ten)
    } else {
        [b0, b1]
    }
}

/// Convert all hiragana in a byte string to katakana, in place.
/// Single-byte characters are left as they are.
pub fn hiragana_to_katakana(s: &mut [u8]) {
    let mut i = 0;
    while i < s.len() {
        let w = char_width(s[i]);
        if w == 2 && i + 1 < s.len() {
            let [b0, b1] = hiragana_pair_to_katakana(s[i], s[i + 1]);
            s[i] = b0;
            s[i + 1] = b1;
        }
        i += w;
    }
}

/// Full-width substitution for punctuation typed in a conversion mode.
pub fn fullwidth_symbol(b: u8) -> Option<&'static [u8]> {
    match b {
        b'-' => Some(b"\x81\x5b"), // ー
        b',' => Some(b"\x81\x41"), // 、
        b'.' => Some(b"\x81\x42"), // 。
        0xA5 => Some(b"\x81\x45"), // ・
        _ => None,
    }
}
