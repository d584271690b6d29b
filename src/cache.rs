use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calendar::CalendarDay;
use crate::locale::Language;
use crate::parser::RawDocument;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache io error on {}: {}", .path.display(), .source)]
    Io { path: PathBuf, source: io::Error },
    #[error("cache artifact {} is not valid json: {}", .path.display(), .source)]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("cache artifact {} holds no wikitext", .0.display())]
    Empty(PathBuf),
}

/// On-disk shape of one artifact.
#[derive(Serialize, Deserialize)]
struct CachedPage {
    wikitext: String,
}

/// Raw day pages on disk, one JSON file per (language, month, day).
///
/// Entries never expire. Concurrent writers of the same day simply overwrite
/// each other with identical content.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, lang: Language, day: CalendarDay) -> PathBuf {
        self.root
            .join(lang.code())
            .join(format!("{:02}_{:02}.json", day.month(), day.day()))
    }

    /// Cached page, or `None` on any miss, read or decode failure.
    pub fn get(&self, lang: Language, day: CalendarDay) -> Option<RawDocument> {
        match self.read(lang, day) {
            Ok(wikitext) => Some(RawDocument {
                language: lang,
                day,
                wikitext,
            }),
            Err(CacheError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                debug!("Treating as cache miss: {}", e);
                None
            }
        }
    }

    /// Best effort: a failed write is logged and otherwise ignored.
    pub fn put(&self, lang: Language, day: CalendarDay, wikitext: &str) {
        if let Err(e) = self.write(lang, day, wikitext) {
            warn!("Failed to cache {} {}: {}", lang, day, e);
        }
    }

    /// Number of cached artifacts for a language.
    pub fn count(&self, lang: Language) -> usize {
        fs::read_dir(self.root.join(lang.code()))
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
                    .count()
            })
            .unwrap_or(0)
    }

    fn read(&self, lang: Language, day: CalendarDay) -> Result<String, CacheError> {
        let path = self.path(lang, day);
        let data = fs::read(&path).map_err(|source| CacheError::Io {
            path: path.clone(),
            source,
        })?;
        let page: CachedPage =
            serde_json::from_slice(&data).map_err(|source| CacheError::Decode {
                path: path.clone(),
                source,
            })?;
        if page.wikitext.is_empty() {
            return Err(CacheError::Empty(path));
        }
        Ok(page.wikitext)
    }

    fn write(&self, lang: Language, day: CalendarDay, wikitext: &str) -> Result<(), CacheError> {
        let path = self.path(lang, day);
        let io_err = |source: io::Error| CacheError::Io {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let data = serde_json::to_vec(&CachedPage {
            wikitext: wikitext.to_string(),
        })
        .map_err(|source| CacheError::Decode {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, data).map_err(io_err)?;
        Ok(())
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn may_18() -> CalendarDay {
        CalendarDay::new(5, 18).unwrap()
    }

    #[test]
    fn put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        store.put(Language::En, may_18(), "== Events ==\n* [[1980]] x");

        let doc = store.get(Language::En, may_18()).unwrap();
        assert_eq!(doc.wikitext, "== Events ==\n* [[1980]] x");
        assert_eq!(doc.language, Language::En);
        assert_eq!(doc.day, may_18());
    }

    #[test]
    fn unwritten_key_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        store.put(Language::En, may_18(), "text");
        assert!(store.get(Language::Ko, may_18()).is_none());
        assert!(store.get(Language::En, CalendarDay::new(5, 19).unwrap()).is_none());
    }

    #[test]
    fn artifact_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        store.put(Language::Ko, CalendarDay::new(1, 2).unwrap(), "본문");

        let path = dir.path().join("ko").join("01_02.json");
        let raw = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["wikitext"], "본문");
        assert_eq!(store.count(Language::Ko), 1);
        assert_eq!(store.count(Language::En), 0);
    }

    #[test]
    fn corrupt_or_empty_artifact_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        let path = store.path(Language::En, may_18());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();

        std::fs::write(&path, b"{not json").unwrap();
        assert!(store.get(Language::En, may_18()).is_none());
        assert!(matches!(
            store.read(Language::En, may_18()),
            Err(CacheError::Decode { .. })
        ));

        std::fs::write(&path, br#"{"wikitext":""}"#).unwrap();
        assert!(store.get(Language::En, may_18()).is_none());
        assert!(matches!(
            store.read(Language::En, may_18()),
            Err(CacheError::Empty(_))
        ));
    }

    #[test]
    fn failed_put_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the cache root directory should be.
        let blocker = dir.path().join("root");
        std::fs::write(&blocker, b"").unwrap();
        let store = CacheStore::new(&blocker);

        store.put(Language::En, may_18(), "text");
        assert!(store.write(Language::En, may_18(), "text").is_err());
        assert!(store.get(Language::En, may_18()).is_none());
    }
}
