use std::str::from_utf8_unchecked;

use crate::Error;

// cspell:disable-next-line
pub const ALPHABET: [u8; 32] = *b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

const MIN_CHAR: u8 = ALPHABET[0];
const MAX_CHAR: u8 = ALPHABET[31];

/// Maps a single character to its base32 digit value, ignoring case.
#[must_use]
pub fn digit(c: u8) -> Option<u8> {
    #[rustfmt::skip]
    const DECODE: [i8; 256] = [
        /* 0x00 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
        /* 0x10 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
        /* 0x20 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
        /* 0x30 */   0,  1,  2,  3,  4,  5,  6,  7,  8,  9, -1, -1, -1, -1, -1, -1,
        /* 0x40 */  -1, 10, 11, 12, 13, 14, 15, 16, 17, -1, 18, 19, -1, 20, 21, -1,
        /* 0x50 */  22, 23, 24, 25, 26, -1, 27, 28, 29, 30, 31, -1, -1, -1, -1, -1,
        /* 0x60 */  -1, 10, 11, 12, 13, 14, 15, 16, 17, -1, 18, 19, -1, 20, 21, -1,
        /* 0x70 */  22, 23, 24, 25, 26, -1, 27, 28, 29, 30, 31, -1, -1, -1, -1, -1,
        /* 0x80 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
        /* 0x90 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
        /* 0xA0 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
        /* 0xB0 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
        /* 0xC0 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
        /* 0xD0 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
        /* 0xE0 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
        /* 0xF0 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    ];

    u8::try_from(DECODE[usize::from(c)]).ok()
}

/// Like [`digit`], but only accepts the canonical (upper case) characters.
#[must_use]
pub fn canonical_digit(c: u8) -> Option<u8> {
    if c.is_ascii_lowercase() {
        None
    } else {
        digit(c)
    }
}

#[must_use]
pub fn is_valid_char(c: u8) -> bool {
    digit(c).is_some()
}

/// Bit-packs arbitrary bytes into base32 characters.
///
/// Bytes are consumed from the last (least significant) to the first. Every full
/// 5-bit group becomes one character; leftover high bits form one final character.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    let mut chars = Vec::with_capacity((bytes.len() * 8).div_ceil(5));

    let mut buffer: u32 = 0;
    let mut bits = 0;

    for &byte in bytes.iter().rev() {
        buffer |= u32::from(byte) << bits;
        bits += 8;

        while bits >= 5 {
            chars.push(ALPHABET[(buffer & 0x1F) as usize]);
            buffer >>= 5;
            bits -= 5;
        }
    }

    if bits > 0 {
        chars.push(ALPHABET[(buffer & 0x1F) as usize]);
    }

    chars.reverse();

    // Safety: Only characters from ALPHABET were pushed, which are all ASCII
    unsafe { String::from_utf8_unchecked(chars) }
}

/// Unpacks base32 characters (any case) into bytes.
///
/// A trailing partial group is kept only if it carries at least 5 bits or a nonzero value,
/// so padding bits never turn into a spurious leading zero byte.
pub fn decode(s: &str) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::with_capacity(s.len() * 5 / 8 + 1);

    let mut buffer: u32 = 0;
    let mut bits = 0;

    for c in s.bytes().rev() {
        let value = digit(c).ok_or(Error::InvalidEncoding("invalid base32 character"))?;

        buffer |= u32::from(value) << bits;
        bits += 5;

        while bits >= 8 {
            bytes.push((buffer & 0xFF) as u8);
            buffer >>= 8;
            bits -= 8;
        }
    }

    if bits >= 5 || buffer > 0 {
        bytes.push((buffer & 0xFF) as u8);
    }

    bytes.reverse();

    Ok(bytes)
}

/// Increments a big-endian numeral of canonical base32 characters by one, in place.
///
/// The buffer is left untouched when an error is returned.
pub fn increment(chars: &mut [u8]) -> Result<(), Error> {
    if !chars.iter().all(|&c| canonical_digit(c).is_some()) {
        return Err(Error::InvalidEncoding("incorrectly encoded string"));
    }

    if chars.iter().all(|&c| c == MAX_CHAR) {
        return Err(Error::Overflow);
    }

    for c in chars.iter_mut().rev() {
        match canonical_digit(*c) {
            Some(31) => *c = MIN_CHAR,
            Some(d) => {
                *c = ALPHABET[usize::from(d) + 1];
                break;
            }
            None => unreachable!(),
        }
    }

    Ok(())
}

/// Increments a base32 string, returning the new string.
pub fn increment_str(s: &str) -> Result<String, Error> {
    let mut chars = s.as_bytes().to_vec();
    increment(&mut chars)?;

    // Safety: `increment` succeeded, so every byte is an ASCII character from ALPHABET
    Ok(unsafe { String::from_utf8_unchecked(chars) })
}

/// Repairs common transcription mistakes: `i`, `l` become `1`, `o` becomes `0`, and hyphens are dropped.
#[must_use]
pub fn fix(s: &str) -> String {
    s.chars()
        .filter(|&c| c != '-')
        .map(|c| match c {
            'i' | 'I' | 'l' | 'L' => '1',
            'o' | 'O' => '0',
            other => other,
        })
        .collect()
}

/// Checks a buffer holding only ASCII alphabet characters and views it as `&str`.
pub fn as_str(buffer: &[u8]) -> Result<&str, Error> {
    if buffer.iter().all(|&c| is_valid_char(c)) {
        // Safety: every byte was checked to be an ASCII alphabet character
        Ok(unsafe { from_utf8_unchecked(buffer) })
    } else {
        Err(Error::InvalidEncoding("invalid base32 character"))
    }
}
