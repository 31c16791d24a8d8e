//! Typed metadata values and their host-facing dynamic counterpart.
//!
//! Three layers live here:
//!
//! - [`TypeTag`] — the type discriminator an entry carries, straight from the
//!   underlying metadata library's type set.
//! - [`RawValue`] — the typed value behind an entry, exposed through indexed
//!   component accessors. String-like payloads are kept as raw bytes so the
//!   IPTC character-set resolution can decode them at marshalling time.
//! - [`MetaValue`] — the dynamic value handed to the host runtime: one of a
//!   closed set of shapes (integers, float, date, time, exact rational,
//!   string, string list, language-alternative map).

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveTime};

use crate::error::{Error, Result};

/// Type discriminator for a metadata entry.
///
/// The first twenty variants are the tags the marshaller dispatches on;
/// the remaining string-like tags all take the default (string) branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    UnsignedByte,
    UnsignedShort,
    UnsignedLong,
    UnsignedLongLong,
    TiffIfd,
    TiffIfd8,
    SignedByte,
    SignedShort,
    SignedLong,
    SignedLongLong,
    TiffFloat,
    TiffDouble,
    Date,
    Time,
    UnsignedRational,
    SignedRational,
    LangAlt,
    XmpBag,
    XmpSeq,
    Undefined,
    AsciiString,
    String,
    XmpText,
    Comment,
}

impl TypeTag {
    /// Library-facing tag name.
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::UnsignedByte => "unsigned-byte",
            TypeTag::UnsignedShort => "unsigned-short",
            TypeTag::UnsignedLong => "unsigned-long",
            TypeTag::UnsignedLongLong => "unsigned-long-long",
            TypeTag::TiffIfd => "tiff-ifd",
            TypeTag::TiffIfd8 => "tiff-ifd8",
            TypeTag::SignedByte => "signed-byte",
            TypeTag::SignedShort => "signed-short",
            TypeTag::SignedLong => "signed-long",
            TypeTag::SignedLongLong => "signed-long-long",
            TypeTag::TiffFloat => "tiff-float",
            TypeTag::TiffDouble => "tiff-double",
            TypeTag::Date => "date",
            TypeTag::Time => "time",
            TypeTag::UnsignedRational => "unsigned-rational",
            TypeTag::SignedRational => "signed-rational",
            TypeTag::LangAlt => "lang-alt",
            TypeTag::XmpBag => "xmp-bag",
            TypeTag::XmpSeq => "xmp-seq",
            TypeTag::Undefined => "undefined",
            TypeTag::AsciiString => "ascii-string",
            TypeTag::String => "string",
            TypeTag::XmpText => "xmp-text",
            TypeTag::Comment => "comment",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Exact rational number as a numerator/denominator pair.
///
/// Covers both the signed and unsigned rational tags; unsigned 32-bit
/// components fit an `i64` without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub num: i64,
    pub den: i64,
}

impl Rational {
    pub fn new(num: i64, den: i64) -> Self {
        Self { num, den }
    }

    /// Approximate floating-point form. The exact pair is the value; this is
    /// a convenience for hosts that want a ratio.
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// The typed value behind a metadata entry.
///
/// Accessors mirror the underlying library's component interface: numeric
/// components by index, raw bytes for string-like payloads, a whole-value
/// string form, and the language-tag map for lang-alt values. An accessor
/// returns `None` when the value does not carry that representation — the
/// walker treats such entries as defensively skippable.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Components of the unsigned integer family (byte/short/long/long-long
    /// and the IFD offset tags).
    Unsigned(Vec<u64>),
    /// Components of the signed integer family.
    Signed(Vec<i64>),
    /// Components of the float family (single and double precision).
    Float(Vec<f64>),
    /// Rational components, signed or unsigned.
    Rational(Vec<Rational>),
    /// String-like payload (strings, dates, times, undefined) as raw bytes.
    Bytes(Vec<u8>),
    /// Ordered bag/seq components, each as raw bytes.
    Array(Vec<Vec<u8>>),
    /// Language tag → raw bytes, sorted by language tag.
    LangAlt(BTreeMap<String, Vec<u8>>),
}

impl RawValue {
    /// Number of scalar components.
    ///
    /// For byte-backed values this is the byte length — the underlying
    /// library's string-count semantics — so an empty string entry reports
    /// count 0 and is skipped by the walker.
    pub fn count(&self) -> usize {
        match self {
            RawValue::Unsigned(v) => v.len(),
            RawValue::Signed(v) => v.len(),
            RawValue::Float(v) => v.len(),
            RawValue::Rational(v) => v.len(),
            RawValue::Bytes(b) => b.len(),
            RawValue::Array(items) => items.len(),
            RawValue::LangAlt(map) => map.len(),
        }
    }

    /// i-th component as an unsigned integer.
    pub fn as_unsigned(&self, i: usize) -> Option<u64> {
        match self {
            RawValue::Unsigned(v) => v.get(i).copied(),
            RawValue::Signed(v) => v.get(i).and_then(|&n| u64::try_from(n).ok()),
            _ => None,
        }
    }

    /// i-th component as a signed integer.
    pub fn as_signed(&self, i: usize) -> Option<i64> {
        match self {
            RawValue::Signed(v) => v.get(i).copied(),
            RawValue::Unsigned(v) => v.get(i).and_then(|&n| i64::try_from(n).ok()),
            _ => None,
        }
    }

    /// i-th component as a float.
    pub fn as_float(&self, i: usize) -> Option<f64> {
        match self {
            RawValue::Float(v) => v.get(i).copied(),
            _ => None,
        }
    }

    /// i-th component as an exact rational.
    pub fn as_rational(&self, i: usize) -> Option<Rational> {
        match self {
            RawValue::Rational(v) => v.get(i).copied(),
            _ => None,
        }
    }

    /// i-th string component as raw bytes. Byte-backed values expose a
    /// single component 0 holding the whole payload.
    pub fn as_bytes(&self, i: usize) -> Option<&[u8]> {
        match self {
            RawValue::Bytes(b) if i == 0 => Some(b),
            RawValue::Array(items) => items.get(i).map(Vec::as_slice),
            _ => None,
        }
    }

    /// Whole-value string form as raw bytes, when the value has one.
    ///
    /// This is the "value OK" gate for the character-set control entry: a
    /// control entry whose value carries no string form resolves to the
    /// fallback encoding.
    pub fn text_bytes(&self) -> Option<&[u8]> {
        match self {
            RawValue::Bytes(b) if !b.is_empty() => Some(b),
            _ => None,
        }
    }

    /// Language tag → bytes map for lang-alt values.
    pub fn lang_alt(&self) -> Option<&BTreeMap<String, Vec<u8>>> {
        match self {
            RawValue::LangAlt(map) => Some(map),
            _ => None,
        }
    }

    /// Parse a textual form into a typed value for `tag` — the write path's
    /// counterpart of the underlying library's `Value::read`.
    ///
    /// Numeric tags accept whitespace-separated components; rationals accept
    /// `n/d` pairs or bare integers (`n` becomes `n/1`). Lang-alt text may
    /// carry a `lang="xx"` prefix and defaults to `x-default` without one.
    /// Bag/seq text splits on commas.
    pub fn from_text(tag: TypeTag, text: &str) -> Result<Self> {
        let invalid = || Error::InvalidValue {
            tag,
            text: text.to_string(),
        };

        match tag {
            TypeTag::UnsignedByte
            | TypeTag::UnsignedShort
            | TypeTag::UnsignedLong
            | TypeTag::UnsignedLongLong
            | TypeTag::TiffIfd
            | TypeTag::TiffIfd8 => {
                let components = text
                    .split_whitespace()
                    .map(|part| part.parse::<u64>())
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|_| invalid())?;
                if components.is_empty() {
                    return Err(invalid());
                }
                Ok(RawValue::Unsigned(components))
            }

            TypeTag::SignedByte
            | TypeTag::SignedShort
            | TypeTag::SignedLong
            | TypeTag::SignedLongLong => {
                let components = text
                    .split_whitespace()
                    .map(|part| part.parse::<i64>())
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|_| invalid())?;
                if components.is_empty() {
                    return Err(invalid());
                }
                Ok(RawValue::Signed(components))
            }

            TypeTag::TiffFloat | TypeTag::TiffDouble => {
                let components = text
                    .split_whitespace()
                    .map(|part| part.parse::<f64>())
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|_| invalid())?;
                if components.is_empty() {
                    return Err(invalid());
                }
                Ok(RawValue::Float(components))
            }

            TypeTag::UnsignedRational | TypeTag::SignedRational => {
                let components = text
                    .split_whitespace()
                    .map(|part| parse_rational(part).ok_or_else(|| invalid()))
                    .collect::<Result<Vec<_>>>()?;
                if components.is_empty() {
                    return Err(invalid());
                }
                Ok(RawValue::Rational(components))
            }

            TypeTag::Date => {
                let date = parse_date(text).map_err(|_| invalid())?;
                Ok(RawValue::Bytes(date.to_string().into_bytes()))
            }

            TypeTag::Time => {
                let (time, offset) = parse_time(text).map_err(|_| invalid())?;
                let mut canonical = time.format("%H:%M:%S").to_string();
                if let Some(offset) = offset {
                    canonical.push_str(&offset);
                }
                Ok(RawValue::Bytes(canonical.into_bytes()))
            }

            TypeTag::LangAlt => {
                let (lang, value) = split_lang_prefix(text);
                let mut map = BTreeMap::new();
                map.insert(lang.to_string(), value.as_bytes().to_vec());
                Ok(RawValue::LangAlt(map))
            }

            TypeTag::XmpBag | TypeTag::XmpSeq => {
                let items = text
                    .split(',')
                    .map(|item| item.trim().as_bytes().to_vec())
                    .filter(|item| !item.is_empty())
                    .collect::<Vec<_>>();
                Ok(RawValue::Array(items))
            }

            TypeTag::Undefined
            | TypeTag::AsciiString
            | TypeTag::String
            | TypeTag::XmpText
            | TypeTag::Comment => Ok(RawValue::Bytes(text.as_bytes().to_vec())),
        }
    }
}

/// Parse `n/d` or a bare integer into an exact rational.
fn parse_rational(text: &str) -> Option<Rational> {
    match text.split_once('/') {
        Some((num, den)) => {
            let num = num.trim().parse::<i64>().ok()?;
            let den = den.trim().parse::<i64>().ok()?;
            if den == 0 {
                return None;
            }
            Some(Rational::new(num, den))
        }
        None => {
            let num = text.trim().parse::<i64>().ok()?;
            Some(Rational::new(num, 1))
        }
    }
}

/// Parse a calendar date: `YYYY-MM-DD`, or the compact `YYYYMMDD` wire form.
pub(crate) fn parse_date(text: &str) -> std::result::Result<NaiveDate, Error> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y%m%d"))
        .map_err(|_| Error::DateParse(text.to_string()))
}

/// Parse a time of day: `HH:MM:SS` with an optional `±HH:MM` zone suffix.
/// The zone is preserved textually but the host value is the local time.
pub(crate) fn parse_time(text: &str) -> std::result::Result<(NaiveTime, Option<String>), Error> {
    let text = text.trim();
    if let Ok(time) = NaiveTime::parse_from_str(text, "%H:%M:%S") {
        return Ok((time, None));
    }
    if text.len() > 6 && text.is_char_boundary(text.len() - 6) {
        let (base, offset) = text.split_at(text.len() - 6);
        if offset.starts_with(['+', '-'])
            && let Ok(time) = NaiveTime::parse_from_str(base, "%H:%M:%S")
        {
            return Ok((time, Some(offset.to_string())));
        }
    }
    Err(Error::TimeParse(text.to_string()))
}

/// Split an optional `lang="xx" ` prefix off a lang-alt text form.
pub(crate) fn split_lang_prefix(text: &str) -> (&str, &str) {
    if let Some(rest) = text.strip_prefix("lang=\"")
        && let Some((lang, value)) = rest.split_once('"')
    {
        return (lang, value.trim_start());
    }
    ("x-default", text)
}

/// Dynamic value handed across the host boundary.
///
/// One of a closed set of shapes; a caller dispatching on this enum handles
/// everything the marshaller can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    UInt(u64),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Time(NaiveTime),
    Rational(Rational),
    Text(String),
    List(Vec<String>),
    LangAlt(BTreeMap<String, String>),
}

impl MetaValue {
    /// Borrow the string payload, when this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Host-native stringification — the textual form the write path feeds back
/// into the typed value parser.
impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::UInt(n) => write!(f, "{n}"),
            MetaValue::Int(n) => write!(f, "{n}"),
            MetaValue::Float(x) => write!(f, "{x}"),
            MetaValue::Date(d) => write!(f, "{d}"),
            MetaValue::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
            MetaValue::Rational(r) => write!(f, "{r}"),
            MetaValue::Text(s) => f.write_str(s),
            MetaValue::List(items) => f.write_str(&items.join(", ")),
            MetaValue::LangAlt(map) => {
                // A sole x-default entry stringifies bare, mirroring the read
                // side's collapse.
                if map.len() == 1
                    && let Some(value) = map.get("x-default")
                {
                    return f.write_str(value);
                }
                let joined = map
                    .iter()
                    .map(|(lang, value)| format!("lang=\"{lang}\" {value}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                f.write_str(&joined)
            }
        }
    }
}
