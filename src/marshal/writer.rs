use crate::error::{Error, Result};
use crate::schema;
use crate::store::{Entry, MetadataFamily, MetadataStore};
use crate::value::{MetaValue, RawValue};

/// Add a host value to a store under `key`.
///
/// The target type tag comes from the key's schema; the host value is
/// stringified and re-parsed into that type, so the store ends up holding a
/// typed value regardless of which [`MetaValue`] shape came in.
///
/// Family semantics follow the underlying library: EXIF appends (repeated
/// keys allowed), XMP replaces in place, and IPTC reports `Ok(false)`
/// without touching the store when the exact key/value pair is already
/// present.
pub fn add_value(store: &mut MetadataStore, key: &str, value: &MetaValue) -> Result<bool> {
    let family = store.family();
    validate_key(family, key)?;

    let tag = schema::default_type_for(family, key);
    let text = value.to_string();
    let raw = RawValue::from_text(tag, &text)?;

    match family {
        MetadataFamily::Exif => {
            store.push(Entry::new(key, tag, raw));
            Ok(true)
        }
        MetadataFamily::Iptc => {
            if store.iter().any(|e| e.key() == key && e.value() == &raw) {
                log::debug!("duplicate IPTC dataset {key}, not added");
                Ok(false)
            } else {
                store.push(Entry::new(key, tag, raw));
                Ok(true)
            }
        }
        MetadataFamily::Xmp => {
            store.replace(Entry::new(key, tag, raw));
            Ok(true)
        }
    }
}

/// Remove the first entry under `key`. Returns whether one was found;
/// an absent key is not an error.
pub fn delete_key(store: &mut MetadataStore, key: &str) -> bool {
    store.remove_key(key)
}

/// Remove every entry from the store. Idempotent.
pub fn clear_entries(store: &mut MetadataStore) {
    store.clear();
}

/// Keys are `Family.Group.Name` with a family prefix matching the store.
fn validate_key(family: MetadataFamily, key: &str) -> Result<()> {
    if !key.starts_with(family.key_prefix()) {
        return Err(Error::InvalidKey(key.to_string()));
    }
    let mut parts = key.split('.');
    let well_formed = parts.next().is_some_and(|p| !p.is_empty())
        && parts.next().is_some_and(|p| !p.is_empty())
        && parts.next().is_some_and(|p| !p.is_empty())
        && parts.next().is_none();
    if !well_formed {
        return Err(Error::InvalidKey(key.to_string()));
    }
    Ok(())
}
