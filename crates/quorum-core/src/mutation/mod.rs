//! Optimistic create-discussion mutation.
//!
//! Keeps the cached `discussions` collection consistent with user intent
//! before server confirmation, and reconciles it afterward: the new entry
//! is appended optimistically, rolled back verbatim on failure, and
//! replaced by an authoritative refetch on success.

use std::sync::Arc;

use crate::cache::{DiscussionCache, DISCUSSIONS_KEY};
use crate::client::{ApiResult, CreateDiscussion};
use crate::models::{CachedDiscussion, Discussion, NewDiscussion};
use crate::notify::{Notification, NotificationSink};

/// Per-attempt state threaded from [`CreateDiscussionMutation::begin`] to
/// the failure handler.
///
/// Owned by exactly one in-flight mutation and consumed when it settles.
#[derive(Debug)]
pub struct MutationContext {
    snapshot: Option<Vec<CachedDiscussion>>,
}

/// The create-discussion mutation with optimistic cache handling.
///
/// All three collaborators are injected: the transport performing the
/// remote write, the cache holding the visible collection, and the sink
/// receiving the one-shot success notification.
pub struct CreateDiscussionMutation {
    transport: Arc<dyn CreateDiscussion>,
    cache: Arc<dyn DiscussionCache>,
    notifier: Arc<dyn NotificationSink>,
}

impl CreateDiscussionMutation {
    pub fn new(
        transport: Arc<dyn CreateDiscussion>,
        cache: Arc<dyn DiscussionCache>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            transport,
            cache,
            notifier,
        }
    }

    /// Run the full mutation lifecycle.
    ///
    /// The optimistic write is visible before the remote write is
    /// dispatched, and exactly one of the settle handlers runs afterward.
    pub async fn execute(&self, input: NewDiscussion) -> ApiResult<Discussion> {
        let context = self.begin(&input).await;
        match self.transport.create_discussion(&input).await {
            Ok(created) => {
                self.on_success().await;
                Ok(created)
            }
            Err(error) => {
                self.on_failure(context).await;
                Err(error)
            }
        }
    }

    /// Snapshot the cached collection and append the optimistic entry.
    ///
    /// Pending reads of the key are cancelled first so a stale refetch
    /// cannot clobber the optimistic write.
    pub async fn begin(&self, input: &NewDiscussion) -> MutationContext {
        self.cache.cancel_pending(DISCUSSIONS_KEY).await;

        let snapshot = self.cache.get(DISCUSSIONS_KEY).await;

        let mut entries = snapshot.clone().unwrap_or_default();
        entries.push(CachedDiscussion::from(input));
        self.cache.set(DISCUSSIONS_KEY, entries).await;

        MutationContext { snapshot }
    }

    /// Restore the pre-mutation collection verbatim.
    ///
    /// The error is not inspected; every failure kind rolls back the same
    /// way, and retry policy belongs to the caller. A context without a
    /// snapshot (the cache was never populated) is a no-op.
    pub async fn on_failure(&self, context: MutationContext) {
        if let Some(snapshot) = context.snapshot {
            self.cache.set(DISCUSSIONS_KEY, snapshot).await;
        }
    }

    /// Invalidate the cached collection and announce the result.
    ///
    /// Invalidation schedules a background refetch without awaiting it;
    /// exactly one success notification is emitted per settled success.
    pub async fn on_success(&self) {
        self.cache.invalidate(DISCUSSIONS_KEY).await;
        self.notifier
            .notify(Notification::success("Discussion Created"));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cache::MemoryDiscussionCache;
    use crate::client::ApiError;
    use crate::models::UserId;

    struct StubTransport {
        result: Mutex<Option<ApiResult<Discussion>>>,
    }

    impl StubTransport {
        fn ok(discussion: Discussion) -> Arc<Self> {
            Arc::new(Self {
                result: Mutex::new(Some(Ok(discussion))),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                result: Mutex::new(Some(Err(ApiError::Api("boom (500)".to_string())))),
            })
        }
    }

    #[async_trait]
    impl CreateDiscussion for StubTransport {
        async fn create_discussion(&self, _input: &NewDiscussion) -> ApiResult<Discussion> {
            self.result
                .lock()
                .unwrap()
                .take()
                .expect("transport called more than once")
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        notifications: Mutex<Vec<Notification>>,
    }

    impl NotificationSink for RecordingSink {
        fn notify(&self, notification: Notification) {
            self.notifications.lock().unwrap().push(notification);
        }
    }

    fn confirmed(title: &str) -> Discussion {
        Discussion::new(title, "body", UserId::from("u1"), "t1")
    }

    fn mutation_with(
        transport: Arc<StubTransport>,
    ) -> (
        CreateDiscussionMutation,
        Arc<MemoryDiscussionCache>,
        Arc<RecordingSink>,
    ) {
        let cache = Arc::new(MemoryDiscussionCache::new());
        let sink = Arc::new(RecordingSink::default());
        let mutation = CreateDiscussionMutation::new(transport, cache.clone(), sink.clone());
        (mutation, cache, sink)
    }

    #[tokio::test]
    async fn begin_appends_optimistic_entry_at_end() {
        let (mutation, cache, _) = mutation_with(StubTransport::failing());
        let existing: Vec<CachedDiscussion> = vec![confirmed("A").into()];
        cache.set(DISCUSSIONS_KEY, existing.clone()).await;

        mutation.begin(&NewDiscussion::new("T2", "B2")).await;

        let entries = cache.get(DISCUSSIONS_KEY).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], existing[0]);
        assert_eq!(
            entries[1],
            CachedDiscussion::from(&NewDiscussion::new("T2", "B2"))
        );
    }

    #[tokio::test]
    async fn rollback_restores_snapshot_exactly() {
        let (mutation, cache, _) = mutation_with(StubTransport::failing());
        let existing: Vec<CachedDiscussion> = vec![confirmed("A").into(), confirmed("B").into()];
        cache.set(DISCUSSIONS_KEY, existing.clone()).await;
        let before = serde_json::to_string(&existing).unwrap();

        let context = mutation.begin(&NewDiscussion::new("T", "B")).await;
        mutation.on_failure(context).await;

        let after = serde_json::to_string(&cache.get(DISCUSSIONS_KEY).await.unwrap()).unwrap();
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn failure_on_never_populated_cache_is_a_no_op() {
        let (mutation, cache, _) = mutation_with(StubTransport::failing());

        let context = mutation.begin(&NewDiscussion::new("T", "B")).await;
        assert!(context.snapshot.is_none());
        mutation.on_failure(context).await;

        // The optimistic entry stays; there was no prior state to restore.
        let entries = cache.get(DISCUSSIONS_KEY).await.unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn execute_happy_path_from_empty_cache() {
        let created = confirmed("T");
        let (mutation, cache, sink) = mutation_with(StubTransport::ok(created.clone()));

        let result = mutation
            .execute(NewDiscussion::new("T", "B"))
            .await
            .unwrap();

        assert_eq!(result, created);
        assert!(cache.is_stale(DISCUSSIONS_KEY).await);
        let notifications = sink.notifications.lock().unwrap();
        assert_eq!(
            *notifications,
            vec![Notification::success("Discussion Created")]
        );
    }

    #[tokio::test]
    async fn execute_failure_rolls_back_and_stays_silent() {
        let (mutation, cache, sink) = mutation_with(StubTransport::failing());
        let existing: Vec<CachedDiscussion> = vec![confirmed("A").into()];
        cache.set(DISCUSSIONS_KEY, existing.clone()).await;

        let error = mutation
            .execute(NewDiscussion::new("T2", "B2"))
            .await
            .unwrap_err();

        assert!(matches!(error, ApiError::Api(_)));
        assert_eq!(cache.get(DISCUSSIONS_KEY).await, Some(existing));
        assert!(sink.notifications.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn aborted_attempts_do_not_leak_notifications() {
        let created = confirmed("T");
        let (mutation, cache, sink) = mutation_with(StubTransport::ok(created));
        cache
            .set(DISCUSSIONS_KEY, vec![confirmed("A").into()])
            .await;

        // Two aborted attempts before the one that lands.
        for _ in 0..2 {
            let context = mutation.begin(&NewDiscussion::new("T", "B")).await;
            mutation.on_failure(context).await;
        }
        mutation
            .execute(NewDiscussion::new("T", "B"))
            .await
            .unwrap();

        assert_eq!(sink.notifications.lock().unwrap().len(), 1);
    }
}
