//! IPTC character set resolution and text decoding.
//!
//! IPTC envelopes may declare the encoding of their string datasets through
//! an ISO 2022 escape sequence stored under `Iptc.Envelope.CharacterSet`.
//! [`resolve_character_set`] maps that byte sequence to a [`CharacterSet`];
//! anything absent, malformed, or unrecognized falls back to the caller's
//! default — resolution never fails, a malformed directive must not abort
//! metadata reading.
//!
//! [`decode_text`] turns raw string bytes into a `String` for the resolved
//! set. Decoding is lossy (invalid sequences become U+FFFD) under the same
//! best-effort policy.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::store::MetadataStore;

/// Key of the IPTC envelope dataset that declares the character set.
pub const CHARACTER_SET_KEY: &str = "Iptc.Envelope.CharacterSet";

/// Text encodings an IPTC envelope can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterSet {
    Utf8,
    Utf16,
    Utf32,
    UsAscii,
    Iso8859_1,
    Iso8859_2,
    Iso8859_3,
    Iso8859_4,
    Iso8859_6,
    Iso8859_7,
    Iso8859_8,
    Iso8859_15,
}

impl CharacterSet {
    /// IANA-style name of the encoding.
    pub fn name(self) -> &'static str {
        match self {
            CharacterSet::Utf8 => "UTF-8",
            CharacterSet::Utf16 => "UTF-16",
            CharacterSet::Utf32 => "UTF-32",
            CharacterSet::UsAscii => "US-ASCII",
            CharacterSet::Iso8859_1 => "ISO-8859-1",
            CharacterSet::Iso8859_2 => "ISO-8859-2",
            CharacterSet::Iso8859_3 => "ISO-8859-3",
            CharacterSet::Iso8859_4 => "ISO-8859-4",
            CharacterSet::Iso8859_6 => "ISO-8859-6",
            CharacterSet::Iso8859_7 => "ISO-8859-7",
            CharacterSet::Iso8859_8 => "ISO-8859-8",
            CharacterSet::Iso8859_15 => "ISO-8859-15",
        }
    }

    /// Map an ISO 2022 escape sequence to its character set. Matching is
    /// exact byte equality against the whole value — no partial matches.
    pub fn from_escape(bytes: &[u8]) -> Option<Self> {
        match bytes {
            b"\x1b%G" | b"\x1b%/I" => Some(CharacterSet::Utf8),
            b"\x1b%/L" => Some(CharacterSet::Utf16),
            b"\x1b%/F" => Some(CharacterSet::Utf32),
            b"\x1b(B" => Some(CharacterSet::UsAscii),
            b"\x1b.A" => Some(CharacterSet::Iso8859_1),
            b"\x1b.B" => Some(CharacterSet::Iso8859_2),
            b"\x1b.C" => Some(CharacterSet::Iso8859_3),
            b"\x1b.D" => Some(CharacterSet::Iso8859_4),
            b"\x1b.F" => Some(CharacterSet::Iso8859_7),
            b"\x1b.G" => Some(CharacterSet::Iso8859_6),
            b"\x1b.H" => Some(CharacterSet::Iso8859_8),
            b"\x1b/b" => Some(CharacterSet::Iso8859_15),
            _ => None,
        }
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve the character set governing an IPTC store's string datasets.
///
/// Returns `fallback` when the control entry is absent, has no usable
/// string form, or carries an unrecognized escape sequence. Read-only;
/// resolve once per walk and pin the result — the control entry must not
/// be re-read mid-walk.
pub fn resolve_character_set(store: &MetadataStore, fallback: CharacterSet) -> CharacterSet {
    let Some(entry) = store.find_key(CHARACTER_SET_KEY) else {
        return fallback;
    };
    let Some(bytes) = entry.value().text_bytes() else {
        log::debug!("character set entry has no string form, using {fallback}");
        return fallback;
    };
    match CharacterSet::from_escape(bytes) {
        Some(charset) => charset,
        None => {
            log::debug!("unrecognized character set escape {bytes:02x?}, using {fallback}");
            fallback
        }
    }
}

/// Decode raw string bytes with the given character set. Lossy: bytes that
/// do not form a valid sequence become U+FFFD.
pub fn decode_text(bytes: &[u8], charset: CharacterSet) -> String {
    match charset {
        CharacterSet::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        // The WHATWG "iso-8859-1" label aliases windows-1252, which remaps
        // 0x80..0x9F; true Latin-1 is the first 256 code points.
        CharacterSet::Iso8859_1 => bytes.iter().map(|&b| char::from(b)).collect(),
        CharacterSet::UsAscii => bytes
            .iter()
            .map(|&b| if b.is_ascii() { char::from(b) } else { '\u{FFFD}' })
            .collect(),
        CharacterSet::Iso8859_2 => decode_with(encoding_rs::ISO_8859_2, bytes),
        CharacterSet::Iso8859_3 => decode_with(encoding_rs::ISO_8859_3, bytes),
        CharacterSet::Iso8859_4 => decode_with(encoding_rs::ISO_8859_4, bytes),
        CharacterSet::Iso8859_6 => decode_with(encoding_rs::ISO_8859_6, bytes),
        CharacterSet::Iso8859_7 => decode_with(encoding_rs::ISO_8859_7, bytes),
        CharacterSet::Iso8859_8 => decode_with(encoding_rs::ISO_8859_8, bytes),
        CharacterSet::Iso8859_15 => decode_with(encoding_rs::ISO_8859_15, bytes),
        // decode() BOM-sniffs, so a leading FF FE overrides the BE default.
        CharacterSet::Utf16 => decode_with(encoding_rs::UTF_16BE, bytes),
        CharacterSet::Utf32 => decode_utf32(bytes),
    }
}

fn decode_with(encoding: &'static encoding_rs::Encoding, bytes: &[u8]) -> String {
    let (decoded, _, _) = encoding.decode(bytes);
    match decoded {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}

// encoding_rs carries no UTF-32; big-endian unless a BOM says otherwise.
fn decode_utf32(bytes: &[u8]) -> String {
    let (big_endian, data) = match bytes {
        [0x00, 0x00, 0xFE, 0xFF, rest @ ..] => (true, rest),
        [0xFF, 0xFE, 0x00, 0x00, rest @ ..] => (false, rest),
        _ => (true, bytes),
    };

    let mut out = String::with_capacity(data.len() / 4);
    let chunks = data.chunks_exact(4);
    let remainder = chunks.remainder();
    for unit in chunks {
        let code = if big_endian {
            u32::from_be_bytes([unit[0], unit[1], unit[2], unit[3]])
        } else {
            u32::from_le_bytes([unit[0], unit[1], unit[2], unit[3]])
        };
        out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
    }
    if !remainder.is_empty() {
        out.push('\u{FFFD}');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Entry, MetadataFamily};
    use crate::value::{RawValue, TypeTag};

    fn iptc_store_with_charset(escape: &[u8]) -> MetadataStore {
        let mut store = MetadataStore::new(MetadataFamily::Iptc);
        store.push(Entry::new(
            CHARACTER_SET_KEY,
            TypeTag::String,
            RawValue::Bytes(escape.to_vec()),
        ));
        store
    }

    // ── resolve_character_set ────────────────────────────────────────

    #[test]
    fn resolves_every_escape_sequence() {
        let table: [(&[u8], CharacterSet); 12] = [
            (b"\x1b%G", CharacterSet::Utf8),
            (b"\x1b%/I", CharacterSet::Utf8),
            (b"\x1b%/L", CharacterSet::Utf16),
            (b"\x1b%/F", CharacterSet::Utf32),
            (b"\x1b(B", CharacterSet::UsAscii),
            (b"\x1b.A", CharacterSet::Iso8859_1),
            (b"\x1b.B", CharacterSet::Iso8859_2),
            (b"\x1b.C", CharacterSet::Iso8859_3),
            (b"\x1b.D", CharacterSet::Iso8859_4),
            (b"\x1b.F", CharacterSet::Iso8859_7),
            (b"\x1b.G", CharacterSet::Iso8859_6),
            (b"\x1b.H", CharacterSet::Iso8859_8),
        ];
        for (escape, expected) in table {
            let store = iptc_store_with_charset(escape);
            assert_eq!(
                resolve_character_set(&store, CharacterSet::Iso8859_1),
                expected,
                "escape {escape:02x?}"
            );
        }

        let store = iptc_store_with_charset(b"\x1b/b");
        assert_eq!(
            resolve_character_set(&store, CharacterSet::Iso8859_1),
            CharacterSet::Iso8859_15
        );
    }

    #[test]
    fn missing_control_entry_falls_back() {
        let store = MetadataStore::new(MetadataFamily::Iptc);
        assert_eq!(
            resolve_character_set(&store, CharacterSet::Iso8859_1),
            CharacterSet::Iso8859_1
        );
    }

    #[test]
    fn unrecognized_escape_falls_back() {
        let store = iptc_store_with_charset(b"\x1b.Z");
        assert_eq!(
            resolve_character_set(&store, CharacterSet::Iso8859_1),
            CharacterSet::Iso8859_1
        );
    }

    #[test]
    fn partial_prefix_does_not_match() {
        // Exact byte equality only: a matching prefix with trailing bytes
        // is not a declaration.
        let store = iptc_store_with_charset(b"\x1b%Gxx");
        assert_eq!(
            resolve_character_set(&store, CharacterSet::Iso8859_1),
            CharacterSet::Iso8859_1
        );
    }

    #[test]
    fn control_entry_without_string_form_falls_back() {
        let mut store = MetadataStore::new(MetadataFamily::Iptc);
        store.push(Entry::new(
            CHARACTER_SET_KEY,
            TypeTag::UnsignedShort,
            RawValue::Unsigned(vec![2]),
        ));
        assert_eq!(
            resolve_character_set(&store, CharacterSet::Iso8859_1),
            CharacterSet::Iso8859_1
        );
    }

    #[test]
    fn configured_fallback_is_honored() {
        let store = MetadataStore::new(MetadataFamily::Iptc);
        assert_eq!(
            resolve_character_set(&store, CharacterSet::Utf8),
            CharacterSet::Utf8
        );
    }

    // ── decode_text ──────────────────────────────────────────────────

    #[test]
    fn decode_latin1_high_bytes() {
        // 0xE9 is é in Latin-1; 0x80 stays U+0080, not the windows-1252 €.
        assert_eq!(decode_text(b"caf\xE9", CharacterSet::Iso8859_1), "café");
        assert_eq!(decode_text(b"\x80", CharacterSet::Iso8859_1), "\u{80}");
    }

    #[test]
    fn decode_iso8859_2() {
        // 0xB1 is ą in ISO-8859-2.
        assert_eq!(decode_text(b"\xB1", CharacterSet::Iso8859_2), "ą");
    }

    #[test]
    fn decode_ascii_replaces_high_bytes() {
        assert_eq!(decode_text(b"ok\xFF", CharacterSet::UsAscii), "ok\u{FFFD}");
    }

    #[test]
    fn decode_utf16_default_big_endian() {
        assert_eq!(decode_text(b"\x00H\x00i", CharacterSet::Utf16), "Hi");
    }

    #[test]
    fn decode_utf16_bom_overrides_endianness() {
        assert_eq!(decode_text(b"\xFF\xFEH\x00i\x00", CharacterSet::Utf16), "Hi");
    }

    #[test]
    fn decode_utf32_both_endians() {
        assert_eq!(
            decode_text(b"\x00\x00\x00\x48\x00\x00\x00\x69", CharacterSet::Utf32),
            "Hi"
        );
        assert_eq!(
            decode_text(b"\xFF\xFE\x00\x00\x48\x00\x00\x00", CharacterSet::Utf32),
            "H"
        );
    }

    #[test]
    fn decode_utf32_invalid_code_point_is_replaced() {
        // 0x00110000 is above the Unicode range.
        assert_eq!(
            decode_text(b"\x00\x11\x00\x00", CharacterSet::Utf32),
            "\u{FFFD}"
        );
    }

    #[test]
    fn decode_utf8_lossy() {
        assert_eq!(decode_text(b"ab\xC3", CharacterSet::Utf8), "ab\u{FFFD}");
    }
}
