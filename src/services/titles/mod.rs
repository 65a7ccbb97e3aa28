//! Page title resolution.
//!
//! Every distinct URL gets its own task and exactly one lookup. Tasks write
//! their result into the shared [`TitleTable`] the moment they finish, so a
//! reader sees the table fill in progressively and in no particular order.
//! There is no concurrency cap, no retry and no cancellation.

mod lookup;

pub use lookup::{HttpTitleLookup, LookupError, LookupReply, TitleLookup, DEFAULT_LOOKUP_URL};

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::models::{TitleResult, TitleStatus};

/// Title results keyed by URL.
///
/// Writers touch a single key each and the map is sharded, so concurrent
/// resolutions never block or clobber each other.
#[derive(Debug, Default)]
pub struct TitleTable {
    entries: DashMap<String, TitleResult>,
}

impl TitleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a result, replacing any previous one for the same URL.
    pub fn insert(&self, url: String, result: TitleResult) -> Option<TitleResult> {
        self.entries.insert(url, result)
    }

    pub fn get(&self, url: &str) -> Option<TitleResult> {
        self.entries.get(url).map(|entry| entry.value().clone())
    }

    pub fn status(&self, url: &str) -> TitleStatus {
        TitleStatus::classify(self.get(url).as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Point-in-time copy, sorted by URL.
    pub fn snapshot(&self) -> BTreeMap<String, TitleResult> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

/// Events emitted as resolutions complete.
#[derive(Debug, Clone)]
pub enum TitleEvent {
    Resolved { url: String, result: TitleResult },
}

/// Resolve one URL, folding every failure into a [`TitleResult`].
pub async fn resolve_title(lookup: &dyn TitleLookup, url: &str) -> TitleResult {
    match lookup.lookup(url).await {
        Ok(LookupReply::Body(result)) => result,
        Ok(LookupReply::Status(status)) => TitleResult::from_status(status),
        Err(e) => {
            tracing::warn!("Failed to fetch title for {}: {}", url, e);
            TitleResult::local_failure(e.to_string())
        }
    }
}

/// Launches title lookups.
#[derive(Clone)]
pub struct TitleResolver {
    lookup: Arc<dyn TitleLookup>,
}

impl TitleResolver {
    pub fn new(lookup: Arc<dyn TitleLookup>) -> Self {
        Self { lookup }
    }

    /// Start one lookup task per URL.
    ///
    /// Returns immediately; results land in `table` (and on `events`, when
    /// given) as each task completes. URLs are expected to be distinct.
    pub fn spawn(
        &self,
        urls: Vec<String>,
        table: Arc<TitleTable>,
        events: Option<mpsc::Sender<TitleEvent>>,
    ) -> ResolutionHandle {
        tracing::debug!("Resolving titles for {} URLs", urls.len());

        let tasks = urls
            .into_iter()
            .map(|url| {
                let lookup = self.lookup.clone();
                let table = table.clone();
                let events = events.clone();
                tokio::spawn(async move {
                    let result = resolve_title(lookup.as_ref(), &url).await;
                    table.insert(url.clone(), result.clone());
                    if let Some(tx) = events {
                        let _ = tx.send(TitleEvent::Resolved { url, result }).await;
                    }
                })
            })
            .collect();

        ResolutionHandle { tasks }
    }
}

/// In-flight resolutions of one run.
///
/// Dropping the handle does not cancel anything; the tasks keep running and
/// still write their results.
pub struct ResolutionHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl ResolutionHandle {
    pub fn total(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for every resolution to finish.
    pub async fn wait(self) {
        for task in self.tasks {
            if let Err(e) = task.await {
                tracing::warn!("Title resolution task failed: {}", e);
            }
        }
    }
}
