use std::sync::Arc;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::calendar::CalendarDay;
use crate::discovery::Pipeline;
use crate::fetcher::{DocumentSource, FetchError};
use crate::locale::Language;

/// Warm-up stats returned after completion.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct WarmStats {
    pub total: usize,
    pub cached: usize,
    pub fetched: usize,
    pub errors: usize,
}

/// Fetch every calendar day of `lang` that is not cached yet.
pub async fn warm<S>(pipeline: Arc<Pipeline<S>>, lang: Language, concurrency: usize) -> Result<WarmStats>
where
    S: DocumentSource + 'static,
{
    let days = CalendarDay::all();
    let mut stats = WarmStats {
        total: days.len(),
        ..Default::default()
    };

    let missing: Vec<CalendarDay> = days
        .into_iter()
        .filter(|day| pipeline.cache().get(lang, *day).is_none())
        .collect();
    stats.cached = stats.total - missing.len();
    if missing.is_empty() {
        info!("All {} {} pages already cached", stats.total, lang);
        return Ok(stats);
    }

    let pb = ProgressBar::new(missing.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let (tx, mut rx) =
        tokio::sync::mpsc::channel::<(CalendarDay, Result<(), FetchError>)>(concurrency.max(1) * 2);

    for day in missing {
        let pipeline = Arc::clone(&pipeline);
        let sem = Arc::clone(&semaphore);
        let tx = tx.clone();

        tokio::spawn(async move {
            let Ok(_permit) = sem.acquire().await else {
                return;
            };
            let result = pipeline.document(lang, day).await.map(|_| ());
            let _ = tx.send((day, result)).await;
        });
    }

    // rx closes once every task has dropped its sender
    drop(tx);

    while let Some((day, result)) = rx.recv().await {
        match result {
            Ok(()) => stats.fetched += 1,
            Err(e) => {
                warn!("Warm-up failed for {} {}: {}", lang, day, e);
                stats.errors += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!(
        "Warmed {} {} pages ({} already cached, {} fetched, {} errors)",
        stats.total, lang, stats.cached, stats.fetched, stats.errors
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::cache::CacheStore;
    use crate::parser::RawDocument;

    /// Fails every February day, serves everything else.
    struct FebruaryOutage {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DocumentSource for FebruaryOutage {
        async fn fetch(&self, lang: Language, day: CalendarDay) -> Result<RawDocument, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if day.month() == 2 {
                return Err(FetchError::DecodeFailed("missingtitle".to_string()));
            }
            Ok(RawDocument {
                language: lang,
                day,
                wikitext: format!("== Events ==\n* {}", day),
            })
        }
    }

    #[tokio::test]
    async fn warms_missing_days_only() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheStore::new(dir.path());
        cache.put(Language::En, CalendarDay::new(1, 1).unwrap(), "cached");
        let pipeline = Arc::new(Pipeline::new(
            cache,
            FebruaryOutage {
                calls: AtomicUsize::new(0),
            },
        ));

        let stats = warm(Arc::clone(&pipeline), Language::En, 8).await.unwrap();
        assert_eq!(
            stats,
            WarmStats {
                total: 366,
                cached: 1,
                fetched: 336,
                errors: 29,
            }
        );
        assert_eq!(pipeline.cache().count(Language::En), 337);

        // Second run only retries the failed days.
        let again = warm(pipeline, Language::En, 8).await.unwrap();
        assert_eq!(again.cached, 337);
        assert_eq!(again.errors, 29);
        assert_eq!(again.fetched, 0);
    }
}
