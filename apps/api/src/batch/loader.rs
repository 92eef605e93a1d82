//! The coalescing, memoizing loader

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;

use super::{BatchFetch, LoadError};

type Outcome<K, V> = Result<Arc<HashMap<K, Option<V>>>, LoadError>;

/// One group of keys that is (or will be) fetched with a single query
struct Batch<K, V> {
    id: u64,
    /// Keys queued while the batch is open. Only touched under the loader's
    /// state lock.
    keys: Mutex<Vec<K>>,
    dispatched: AtomicBool,
    outcome: watch::Sender<Option<Outcome<K, V>>>,
}

impl<K, V> Batch<K, V> {
    fn new(id: u64) -> Self {
        let (outcome, _) = watch::channel(None);
        Self {
            id,
            keys: Mutex::new(Vec::new()),
            dispatched: AtomicBool::new(false),
            outcome,
        }
    }

    fn is_dispatched(&self) -> bool {
        self.dispatched.load(Ordering::Acquire)
    }
}

struct LoaderState<K, V> {
    /// Every key this loader has seen, mapped to the batch that answers it
    memo: HashMap<K, Arc<Batch<K, V>>>,
    /// Batch accepting new keys, if any
    open: Option<Arc<Batch<K, V>>>,
    next_batch: u64,
}

/// Request-scoped loader that coalesces lookups into batched fetches
///
/// Keys passed to [`load`](Self::load) are queued in the open batch. The
/// batch is dispatched when the first waiter resumes after yielding once to
/// the scheduler, which gives every sibling future polled in the same tick
/// the chance to queue its key, or earlier through an explicit
/// [`dispatch`](Self::dispatch). Results are memoized per key for the
/// lifetime of the loader, including failures: a loader whose batch failed
/// keeps returning that failure and should be discarded with its request.
pub struct BatchLoader<F: BatchFetch> {
    fetcher: Arc<F>,
    state: Mutex<LoaderState<F::Key, F::Value>>,
    dispatched: AtomicUsize,
}

impl<F: BatchFetch> BatchLoader<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            state: Mutex::new(LoaderState {
                memo: HashMap::new(),
                open: None,
                next_batch: 0,
            }),
            dispatched: AtomicUsize::new(0),
        }
    }

    #[cfg(test)]
    pub(crate) fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Queue `key` and return a future resolving to its value
    ///
    /// The key is queued when this method is called, not when the future is
    /// first polled, so [`dispatch`](Self::dispatch) sees it immediately.
    /// Loading an equal key again joins the batch that already answers it.
    pub fn load(
        &self,
        key: F::Key,
    ) -> impl Future<Output = Result<Option<F::Value>, LoadError>> + Send + '_ {
        let batch = self.enqueue(&key);

        async move {
            if !batch.is_dispatched() {
                tokio::task::yield_now().await;
                self.dispatch_batch(&batch);
            }

            let values = wait_for_outcome(&batch).await?;
            Ok(values.get(&key).cloned().flatten())
        }
    }

    /// Load several keys, returning values in input order
    pub async fn load_many<I>(&self, keys: I) -> Result<Vec<Option<F::Value>>, LoadError>
    where
        I: IntoIterator<Item = F::Key>,
    {
        let pending: Vec<_> = keys.into_iter().map(|key| self.load(key)).collect();
        futures_util::future::try_join_all(pending).await
    }

    /// Dispatch the open batch now instead of waiting for a waiter to resume
    pub fn dispatch(&self) {
        let open = self.lock_state().open.clone();
        if let Some(batch) = open {
            self.dispatch_batch(&batch);
        }
    }

    /// Number of batches this loader has sent to its fetcher
    pub fn batches_dispatched(&self) -> usize {
        self.dispatched.load(Ordering::Acquire)
    }

    /// Number of keys queued in the open batch
    pub fn pending(&self) -> usize {
        let state = self.lock_state();
        state
            .open
            .as_ref()
            .map_or(0, |batch| lock(&batch.keys).len())
    }

    fn lock_state(&self) -> MutexGuard<'_, LoaderState<F::Key, F::Value>> {
        lock(&self.state)
    }

    fn enqueue(&self, key: &F::Key) -> Arc<Batch<F::Key, F::Value>> {
        let mut state = self.lock_state();
        if let Some(batch) = state.memo.get(key) {
            return Arc::clone(batch);
        }

        let LoaderState {
            memo,
            open,
            next_batch,
        } = &mut *state;
        let batch = Arc::clone(open.get_or_insert_with(|| {
            *next_batch += 1;
            Arc::new(Batch::new(*next_batch))
        }));
        lock(&batch.keys).push(key.clone());
        memo.insert(key.clone(), Arc::clone(&batch));
        batch
    }

    /// Seal `batch` and run its fetch on a spawned task
    ///
    /// The spawned task owns the fetch: if every waiter is dropped mid-flight
    /// the query still completes and its result is simply never read.
    fn dispatch_batch(&self, batch: &Arc<Batch<F::Key, F::Value>>) {
        let keys = {
            let mut state = self.lock_state();
            if batch.dispatched.swap(true, Ordering::AcqRel) {
                return;
            }
            if state
                .open
                .as_ref()
                .is_some_and(|open| Arc::ptr_eq(open, batch))
            {
                state.open = None;
            }
            self.dispatched.fetch_add(1, Ordering::AcqRel);
            std::mem::take(&mut *lock(&batch.keys))
        };

        tracing::debug!(
            loader = std::any::type_name::<F>(),
            batch = batch.id,
            keys = keys.len(),
            "Dispatching batch"
        );

        let fetcher = Arc::clone(&self.fetcher);
        let completion = Completion(Arc::clone(batch));
        tokio::spawn(async move {
            let outcome = fetch_aligned(fetcher.as_ref(), keys).await;
            completion.finish(outcome);
        });
    }
}

/// Publishes a batch outcome; reports `Abandoned` if dropped unfinished
struct Completion<K, V>(Arc<Batch<K, V>>);

impl<K, V> Completion<K, V> {
    fn finish(self, outcome: Outcome<K, V>) {
        self.0.outcome.send_replace(Some(outcome));
    }
}

impl<K, V> Drop for Completion<K, V> {
    fn drop(&mut self) {
        let abandoned = self.0.outcome.send_if_modified(|outcome| {
            if outcome.is_some() {
                return false;
            }
            *outcome = Some(Err(LoadError::Abandoned));
            true
        });
        if abandoned {
            tracing::warn!(batch = self.0.id, "Batch task ended without a result");
        }
    }
}

async fn fetch_aligned<F: BatchFetch>(
    fetcher: &F,
    keys: Vec<F::Key>,
) -> Outcome<F::Key, F::Value> {
    if keys.is_empty() {
        return Ok(Arc::new(HashMap::new()));
    }

    let values = fetcher.fetch(&keys).await?;
    if values.len() != keys.len() {
        tracing::error!(
            loader = std::any::type_name::<F>(),
            expected = keys.len(),
            actual = values.len(),
            "Batch fetch result is not aligned with its keys"
        );
        return Err(LoadError::BatchAlignment {
            expected: keys.len(),
            actual: values.len(),
        });
    }

    Ok(Arc::new(keys.into_iter().zip(values).collect()))
}

async fn wait_for_outcome<K, V>(batch: &Batch<K, V>) -> Outcome<K, V>
where
    K: Clone,
    V: Clone,
{
    let mut rx = batch.outcome.subscribe();
    let published = rx
        .wait_for(Option::is_some)
        .await
        .map_err(|_| LoadError::Abandoned)?;
    match &*published {
        Some(outcome) => outcome.clone(),
        None => Err(LoadError::Abandoned),
    }
}

// Poisoning only means another request panicked mid-update; the maps stay
// structurally valid, so keep going.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
