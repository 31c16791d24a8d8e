//! # exif-bridge
//!
//! Host-facing marshalling layer for EXIF, IPTC, and XMP image metadata —
//! converts the typed values of an in-memory metadata model into dynamic
//! host values and back.
//!
//! A dynamically-typed host runtime sees metadata as `(key, value)` pairs
//! where the value is one of a small set of shapes: integers, a float, a
//! calendar date, a time of day, an exact rational, a string, an ordered
//! string list, or a language → string map. This crate owns the conversion
//! in both directions and the IPTC character-set resolution that governs how
//! string bytes decode. Opening image files and persisting metadata back
//! into them belongs to an external image-metadata library and is out of
//! scope here.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::ops::ControlFlow;
//!
//! use exif_bridge::config::ReadOptions;
//! use exif_bridge::marshal::{add_value, collect_entries, visit_entries};
//! use exif_bridge::{MetaValue, MetadataContainer};
//!
//! fn main() -> anyhow::Result<()> {
//!     // An opened image's metadata blocks (filled by the image codec).
//!     let mut image = MetadataContainer::new();
//!
//!     add_value(
//!         image.exif_mut(),
//!         "Exif.Image.Make",
//!         &MetaValue::Text("Canon".into()),
//!     )?;
//!     add_value(
//!         image.exif_mut(),
//!         "Exif.Image.Orientation",
//!         &MetaValue::Text("6".into()),
//!     )?;
//!
//!     // Walk the block: one (key, value) pair per non-empty entry.
//!     let options = ReadOptions::default();
//!     for (key, value) in collect_entries(image.exif(), &options)? {
//!         println!("{key} = {value}");
//!     }
//!
//!     // Or visit with early termination.
//!     visit_entries(image.exif(), &options, |key, _value| {
//!         if key == "Exif.Image.Make" {
//!             ControlFlow::Break(())
//!         } else {
//!             ControlFlow::Continue(())
//!         }
//!     })?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## IPTC character sets
//!
//! IPTC envelopes declare the encoding of their string datasets through an
//! ISO 2022 escape sequence under `Iptc.Envelope.CharacterSet`. The walker
//! resolves it once per pass and decodes every string dataset with the
//! result; a missing or unrecognized declaration falls back to ISO-8859-1
//! (configurable via [`config::ReadOptions`]) rather than failing.
//!
//! ## Value shapes
//!
//! | Type tags | Host value |
//! |-----------|------------|
//! | unsigned byte/short/long/long-long, IFD offsets | unsigned integer (component 0) |
//! | signed byte/short/long/long-long | signed integer (component 0) |
//! | float, double | float (component 0) |
//! | date / time | calendar date / time of day |
//! | unsigned/signed rational | exact numerator/denominator pair |
//! | lang-alt | string (sole `x-default`) or language → string map |
//! | bag / seq | ordered string list |
//! | undefined and every string type | string |
//!
//! ## Modules
//!
//! - [`value`] — type tags, typed raw values, and the host value enum
//! - [`store`] — in-memory metadata stores and their parent container
//! - [`charset`] — IPTC character-set resolution and text decoding
//! - [`schema`] — key → default type derivation for the write path
//! - [`marshal`] — the walker, the value marshaller, and the entry writer
//! - [`config`] — read options (fallback charset, lang-alt collapse)
//! - [`error`] — the crate's error taxonomy

pub mod charset;
pub mod config;
pub mod error;
pub mod marshal;
pub mod schema;
pub mod store;
pub mod value;

pub use charset::{CharacterSet, decode_text, resolve_character_set};
pub use config::ReadOptions;
pub use error::{Error, Result};
pub use store::{Entry, MetadataContainer, MetadataFamily, MetadataStore};
pub use value::{MetaValue, Rational, RawValue, TypeTag};
