use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::charset::CharacterSet;

/// Options governing a read pass over a metadata store.
///
/// Host bindings typically build one of these per session and reuse it for
/// every walk.
///
/// # Loading
///
/// ```rust,no_run
/// use exif_bridge::config::ReadOptions;
///
/// // From a JSON file
/// let options = ReadOptions::load(Some("bridge.json".as_ref())).unwrap();
///
/// // Or use defaults and customize
/// let mut options = ReadOptions::default();
/// options.collapse_default_lang = false;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadOptions {
    /// Encoding assumed for IPTC strings when the envelope declares none
    /// (or declares one this crate does not recognize).
    pub fallback_charset: CharacterSet,
    /// Collapse a lang-alt value holding a single `"x-default"` component
    /// to a bare string instead of a one-entry map.
    pub collapse_default_lang: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            fallback_charset: CharacterSet::Iso8859_1,
            collapse_default_lang: true,
        }
    }
}

impl ReadOptions {
    /// Load options from a JSON file; `None` or a missing file yields the
    /// defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            log::warn!("Options file not found at {}. Using defaults.", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).context("Failed to read options file")?;
        let options: ReadOptions =
            serde_json::from_str(&contents).context("Failed to parse options file")?;
        Ok(options)
    }

    /// Save options to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize options")?;
        std::fs::write(path, contents).context("Failed to write options file")?;
        log::info!("Options saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── defaults ─────────────────────────────────────────────────────

    #[test]
    fn default_matches_library_behavior() {
        let options = ReadOptions::default();
        assert_eq!(options.fallback_charset, CharacterSet::Iso8859_1);
        assert!(options.collapse_default_lang);
    }

    #[test]
    fn load_without_path_uses_defaults() {
        let options = ReadOptions::load(None).unwrap();
        assert_eq!(options.fallback_charset, CharacterSet::Iso8859_1);
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");
        let options = ReadOptions::load(Some(path.as_path())).unwrap();
        assert!(options.collapse_default_lang);
    }

    // ── round trip ───────────────────────────────────────────────────

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bridge.json");

        let mut options = ReadOptions::default();
        options.fallback_charset = CharacterSet::Utf8;
        options.collapse_default_lang = false;
        options.save(&path).unwrap();

        let loaded = ReadOptions::load(Some(&path)).unwrap();
        assert_eq!(loaded.fallback_charset, CharacterSet::Utf8);
        assert!(!loaded.collapse_default_lang);
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bridge.json");
        std::fs::write(&path, b"{not json").unwrap();
        assert!(ReadOptions::load(Some(&path)).is_err());
    }
}
