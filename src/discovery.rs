use serde::Serialize;
use tracing::{info, warn};

use crate::cache::CacheStore;
use crate::calendar::{CalendarDay, QueryDate};
use crate::fetcher::{DocumentSource, FetchError};
use crate::locale::Language;
use crate::parser::{self, Event, RawDocument, Role};

/// Combined result for one date across both languages.
#[derive(Debug, Serialize)]
pub struct Discovery {
    pub date: String,
    pub primary: Language,
    pub secondary: Language,
    pub events: Vec<Event>,
}

/// Cache-first lookup of day pages plus event extraction.
pub struct Pipeline<S> {
    cache: CacheStore,
    source: S,
}

impl<S: DocumentSource> Pipeline<S> {
    pub fn new(cache: CacheStore, source: S) -> Self {
        Self { cache, source }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// The day page, from disk if present, otherwise fetched and stored.
    pub async fn document(&self, lang: Language, day: CalendarDay) -> Result<RawDocument, FetchError> {
        if let Some(doc) = self.cache.get(lang, day) {
            return Ok(doc);
        }
        let doc = self.source.fetch(lang, day).await?;
        self.cache.put(lang, day, &doc.wikitext);
        Ok(doc)
    }

    /// Events for one language. A failed fetch becomes a single diagnostic event.
    pub async fn events(&self, lang: Language, date: QueryDate, role: Role) -> Vec<Event> {
        match self.document(lang, date.day).await {
            Ok(doc) => parser::extract(&doc, date.year, role),
            Err(e) => {
                warn!(kind = ?e.kind(), "Fetching {} {} failed: {}", lang, date.day, e);
                vec![Event::diagnostic(date.year, lang, &e)]
            }
        }
    }

    /// Both languages for one date; primary events always come first.
    pub async fn discover(&self, date: QueryDate, primary: Language, secondary: Language) -> Discovery {
        let (mut events, foreign) = tokio::join!(
            self.events(primary, date, Role::Primary),
            self.events(secondary, date, Role::Secondary),
        );
        events.extend(foreign);

        info!("{} events found for date {}", events.len(), date);
        if let Some(first) = events.first() {
            info!("First event sample: {:?}", first);
        }

        Discovery {
            date: date.to_string(),
            primary,
            secondary,
            events,
        }
    }
}

// ── Tests ──
