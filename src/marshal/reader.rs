use std::ops::ControlFlow;

use crate::charset::{CharacterSet, decode_text, resolve_character_set};
use crate::config::ReadOptions;
use crate::error::Result;
use crate::store::{Entry, MetadataFamily, MetadataStore};
use crate::value::{MetaValue, TypeTag, parse_date, parse_time};

/// Convert one entry's typed value into a host value.
///
/// Dispatches on the entry's type tag. Integer and float families read
/// component 0 only, even when the entry holds more — multi-valued numeric
/// entries are not exposed as arrays by this engine. String payloads are
/// decoded with `charset`; date and time forms are ASCII and parse as-is.
///
/// Returns `Ok(None)` when the raw value does not carry the representation
/// its tag requires; callers skip such entries. Date and time parse failures
/// are the only errors this path surfaces.
pub fn marshal_entry(
    entry: &Entry,
    charset: CharacterSet,
    options: &ReadOptions,
) -> Result<Option<MetaValue>> {
    let value = entry.value();

    let marshalled = match entry.type_tag() {
        TypeTag::UnsignedByte
        | TypeTag::UnsignedShort
        | TypeTag::UnsignedLong
        | TypeTag::UnsignedLongLong
        | TypeTag::TiffIfd
        | TypeTag::TiffIfd8 => value.as_unsigned(0).map(MetaValue::UInt),

        TypeTag::SignedByte
        | TypeTag::SignedShort
        | TypeTag::SignedLong
        | TypeTag::SignedLongLong => value.as_signed(0).map(MetaValue::Int),

        TypeTag::TiffFloat | TypeTag::TiffDouble => value.as_float(0).map(MetaValue::Float),

        TypeTag::Date => match value.text_bytes() {
            Some(bytes) => {
                let text = decode_text(bytes, CharacterSet::Utf8);
                Some(MetaValue::Date(parse_date(&text)?))
            }
            None => None,
        },

        TypeTag::Time => match value.text_bytes() {
            Some(bytes) => {
                let text = decode_text(bytes, CharacterSet::Utf8);
                let (time, _offset) = parse_time(&text)?;
                Some(MetaValue::Time(time))
            }
            None => None,
        },

        TypeTag::UnsignedRational | TypeTag::SignedRational => {
            value.as_rational(0).map(MetaValue::Rational)
        }

        TypeTag::LangAlt => value.lang_alt().map(|map| {
            if options.collapse_default_lang
                && map.len() == 1
                && let Some(bytes) = map.get("x-default")
            {
                return MetaValue::Text(decode_text(bytes, charset));
            }
            MetaValue::LangAlt(
                map.iter()
                    .map(|(lang, bytes)| (lang.clone(), decode_text(bytes, charset)))
                    .collect(),
            )
        }),

        TypeTag::XmpBag | TypeTag::XmpSeq => (0..value.count())
            .map(|i| value.as_bytes(i).map(|bytes| decode_text(bytes, charset)))
            .collect::<Option<Vec<_>>>()
            .map(MetaValue::List),

        TypeTag::Undefined => value
            .text_bytes()
            .map(|bytes| MetaValue::Text(decode_text(bytes, charset))),

        TypeTag::AsciiString | TypeTag::String | TypeTag::XmpText | TypeTag::Comment => value
            .as_bytes(0)
            .map(|bytes| MetaValue::Text(decode_text(bytes, charset))),
    };

    Ok(marshalled)
}

/// Walk a store end-to-end, yielding one `(key, value)` pair per non-empty
/// entry in store iteration order.
///
/// For IPTC stores the character set is resolved once here and pinned for
/// the whole pass; EXIF and XMP strings decode as UTF-8. Entries with a
/// component count of 0 are skipped before dispatch, as are entries whose
/// value cannot be marshalled. The visitor stops the walk early by
/// returning [`ControlFlow::Break`].
pub fn visit_entries<F>(store: &MetadataStore, options: &ReadOptions, mut visit: F) -> Result<()>
where
    F: FnMut(&str, MetaValue) -> ControlFlow<()>,
{
    let charset = match store.family() {
        MetadataFamily::Iptc => resolve_character_set(store, options.fallback_charset),
        MetadataFamily::Exif | MetadataFamily::Xmp => CharacterSet::Utf8,
    };

    for entry in store.iter() {
        if entry.count() == 0 {
            continue;
        }
        let Some(value) = marshal_entry(entry, charset, options)? else {
            log::debug!("no marshallable value for {}, skipping", entry.key());
            continue;
        };
        if let ControlFlow::Break(()) = visit(entry.key(), value) {
            break;
        }
    }

    Ok(())
}

/// Walk a store and collect every `(key, value)` pair.
pub fn collect_entries(
    store: &MetadataStore,
    options: &ReadOptions,
) -> Result<Vec<(String, MetaValue)>> {
    let mut pairs = Vec::new();
    visit_entries(store, options, |key, value| {
        pairs.push((key.to_string(), value));
        ControlFlow::Continue(())
    })?;
    Ok(pairs)
}
