//! Client-side query cache for the discussions collection.
//!
//! The cache is a keyed store of cached collections with explicit
//! read/overwrite/invalidate/cancel operations. It is always handed to the
//! mutation layer as an injected dependency so client logic stays testable
//! without a network.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::client::ApiResult;
use crate::models::{CachedDiscussion, DiscussionWithAuthor};

/// Cache key under which the discussions collection is stored
pub const DISCUSSIONS_KEY: &str = "discussions";

/// Keyed cache of discussion collections as seen by the client
#[async_trait]
pub trait DiscussionCache: Send + Sync {
    /// Prevent any in-flight refetch of `key` from writing its result.
    ///
    /// Called before an optimistic write so a concurrent stale read cannot
    /// clobber it. Pending writes are not affected.
    async fn cancel_pending(&self, key: &str);

    /// Read the cached collection, `None` if the key was never populated
    async fn get(&self, key: &str) -> Option<Vec<CachedDiscussion>>;

    /// Overwrite the cached collection
    async fn set(&self, key: &str, entries: Vec<CachedDiscussion>);

    /// Mark `key` stale and schedule (without awaiting) a background
    /// refetch of the authoritative collection.
    async fn invalidate(&self, key: &str);
}

/// Source of the authoritative collection used by background refetches
#[async_trait]
pub trait FetchDiscussions: Send + Sync {
    async fn fetch_discussions(&self) -> ApiResult<Vec<DiscussionWithAuthor>>;
}

#[derive(Default)]
struct Slot {
    entries: Option<Vec<CachedDiscussion>>,
    /// Bumped by `cancel_pending`; a refetch only writes back if the epoch
    /// it captured at spawn time is still current.
    epoch: u64,
    stale: bool,
}

type Slots = Arc<RwLock<HashMap<String, Slot>>>;

/// In-memory [`DiscussionCache`] used by all Quorum client interfaces
#[derive(Clone)]
pub struct MemoryDiscussionCache {
    slots: Slots,
    refetcher: Option<Arc<dyn FetchDiscussions>>,
}

impl MemoryDiscussionCache {
    /// Cache without a refetch source: `invalidate` only marks staleness
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            refetcher: None,
        }
    }

    /// Cache that refetches invalidated keys from `refetcher` in the
    /// background
    #[must_use]
    pub fn with_refetcher(refetcher: Arc<dyn FetchDiscussions>) -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            refetcher: Some(refetcher),
        }
    }

    /// Whether `key` is currently marked stale
    pub async fn is_stale(&self, key: &str) -> bool {
        let slots = self.slots.read().await;
        slots.get(key).is_some_and(|slot| slot.stale)
    }
}

impl Default for MemoryDiscussionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DiscussionCache for MemoryDiscussionCache {
    async fn cancel_pending(&self, key: &str) {
        let mut slots = self.slots.write().await;
        let slot = slots.entry(key.to_string()).or_default();
        slot.epoch += 1;
    }

    async fn get(&self, key: &str) -> Option<Vec<CachedDiscussion>> {
        let slots = self.slots.read().await;
        slots.get(key).and_then(|slot| slot.entries.clone())
    }

    async fn set(&self, key: &str, entries: Vec<CachedDiscussion>) {
        let mut slots = self.slots.write().await;
        let slot = slots.entry(key.to_string()).or_default();
        slot.entries = Some(entries);
    }

    async fn invalidate(&self, key: &str) {
        let epoch = {
            let mut slots = self.slots.write().await;
            let slot = slots.entry(key.to_string()).or_default();
            slot.stale = true;
            slot.epoch
        };

        let Some(refetcher) = self.refetcher.clone() else {
            return;
        };
        let slots = Arc::clone(&self.slots);
        let key = key.to_string();
        tokio::spawn(async move {
            match refetcher.fetch_discussions().await {
                Ok(discussions) => {
                    let entries = discussions.into_iter().map(Into::into).collect();
                    apply_refetch(&slots, &key, epoch, entries).await;
                }
                Err(error) => {
                    tracing::warn!(key = %key, %error, "Background refetch failed");
                }
            }
        });
    }
}

/// Write back a refetched collection unless `cancel_pending` ran since the
/// refetch was scheduled.
async fn apply_refetch(slots: &Slots, key: &str, epoch: u64, entries: Vec<CachedDiscussion>) {
    let mut slots = slots.write().await;
    let slot = slots.entry(key.to_string()).or_default();
    if slot.epoch == epoch {
        slot.entries = Some(entries);
        slot.stale = false;
    } else {
        tracing::debug!(key = %key, "Discarding refetch result for cancelled read");
    }
}
