//! In-memory typed value store and its parent container.
//!
//! The store stands in for the external metadata library's tag collections:
//! an ordered list of entries, each carrying a key, a type tag, and a typed
//! value. It deliberately exposes only primitive operations — find, push,
//! remove, clear, iterate — the schema-aware write logic lives in
//! [`crate::marshal::writer`].
//!
//! A [`MetadataContainer`] owns the three stores of an opened image's
//! metadata blocks. Views into a store are plain borrows of the container,
//! so a view can never outlive the parent that physically holds the entries.

use crate::value::{RawValue, TypeTag};

/// Which metadata block a store belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataFamily {
    Exif,
    Iptc,
    Xmp,
}

impl MetadataFamily {
    /// Key prefix for this family, including the separating dot.
    pub fn key_prefix(self) -> &'static str {
        match self {
            MetadataFamily::Exif => "Exif.",
            MetadataFamily::Iptc => "Iptc.",
            MetadataFamily::Xmp => "Xmp.",
        }
    }
}

/// One tagged metadata record: key, type tag, typed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    key: String,
    type_tag: TypeTag,
    value: RawValue,
}

impl Entry {
    pub fn new(key: impl Into<String>, type_tag: TypeTag, value: RawValue) -> Self {
        Self {
            key: key.into(),
            type_tag,
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    pub fn value(&self) -> &RawValue {
        &self.value
    }

    /// Number of scalar components; 0 means the entry is empty and the
    /// walker must skip it.
    pub fn count(&self) -> usize {
        self.value.count()
    }
}

/// Ordered collection of metadata entries for one family.
///
/// Iteration order is insertion order; the engine never re-sorts.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    family: MetadataFamily,
    entries: Vec<Entry>,
}

impl MetadataStore {
    pub fn new(family: MetadataFamily) -> Self {
        Self {
            family,
            entries: Vec::new(),
        }
    }

    pub fn family(&self) -> MetadataFamily {
        self.family
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// First entry with the given key.
    pub fn find_key(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Append an entry, preserving insertion order.
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Replace the first entry with the same key, or append.
    pub fn replace(&mut self, entry: Entry) {
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Remove the first entry with the given key. Returns whether one was
    /// found.
    pub fn remove_key(&mut self, key: &str) -> bool {
        match self.entries.iter().position(|entry| entry.key == key) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove all entries. Idempotent.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Owner of the three metadata stores of an opened image.
///
/// The image codec that fills these blocks from a file lives outside this
/// crate; the container only guarantees that store views share its lifetime.
#[derive(Debug, Clone)]
pub struct MetadataContainer {
    exif: MetadataStore,
    iptc: MetadataStore,
    xmp: MetadataStore,
}

impl MetadataContainer {
    pub fn new() -> Self {
        Self {
            exif: MetadataStore::new(MetadataFamily::Exif),
            iptc: MetadataStore::new(MetadataFamily::Iptc),
            xmp: MetadataStore::new(MetadataFamily::Xmp),
        }
    }

    pub fn exif(&self) -> &MetadataStore {
        &self.exif
    }

    pub fn exif_mut(&mut self) -> &mut MetadataStore {
        &mut self.exif
    }

    pub fn iptc(&self) -> &MetadataStore {
        &self.iptc
    }

    pub fn iptc_mut(&mut self) -> &mut MetadataStore {
        &mut self.iptc
    }

    pub fn xmp(&self) -> &MetadataStore {
        &self.xmp
    }

    pub fn xmp_mut(&mut self) -> &mut MetadataStore {
        &mut self.xmp
    }

    /// Drop every entry in all three blocks.
    pub fn clear_all(&mut self) {
        self.exif.clear();
        self.iptc.clear();
        self.xmp.clear();
    }

    /// Copy this container's metadata into another container, replacing
    /// whatever it held.
    pub fn copy_metadata_to(&self, other: &mut MetadataContainer) {
        other.exif = self.exif.clone();
        other.iptc = self.iptc.clone();
        other.xmp = self.xmp.clone();
    }
}

impl Default for MetadataContainer {
    fn default() -> Self {
        Self::new()
    }
}
