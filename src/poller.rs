use chrono::{DateTime, Utc};
use rocket::log::private::{info, warn};
use rocket::tokio::sync::Mutex;
use rocket::tokio::task::JoinHandle;
use rocket::tokio::time::{self, MissedTickBehavior};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::api::error::{ApiError, ErrorInfo};

/// What a renderer sees of a polled resource.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub state: Option<T>,
    pub error: Option<ErrorInfo>,
    pub last_success: Option<DateTime<Utc>>,
    pub last_failure: Option<DateTime<Utc>>,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Snapshot {
            state: None,
            error: None,
            last_success: None,
            last_failure: None,
        }
    }
}

struct Cell<T> {
    snapshot: Snapshot<T>,
    // bumped whenever a poller is stopped; results from older pollers are dropped
    generation: u64,
}

/// Latest known value of a remote resource plus the error of the latest
/// failed refresh. A failed refresh never clears the last good value.
pub struct PolledResource<T> {
    cell: Arc<Mutex<Cell<T>>>,
}

impl<T> Clone for PolledResource<T> {
    fn clone(&self) -> Self {
        PolledResource {
            cell: self.cell.clone(),
        }
    }
}

impl<T> Default for PolledResource<T> {
    fn default() -> Self {
        PolledResource::new()
    }
}

impl<T> PolledResource<T> {
    pub fn new() -> Self {
        PolledResource {
            cell: Arc::new(Mutex::new(Cell {
                snapshot: Snapshot::default(),
                generation: 0,
            })),
        }
    }

    /// Store the outcome of a fetch.
    pub async fn record(&self, result: Result<T, ApiError>) {
        let mut cell = self.cell.lock().await;
        Self::apply(&mut cell.snapshot, result);
    }

    /// Store the outcome only if `generation` is still current.
    async fn record_for(&self, generation: u64, result: Result<T, ApiError>) -> bool {
        let mut cell = self.cell.lock().await;
        if cell.generation != generation {
            return false;
        }
        Self::apply(&mut cell.snapshot, result);
        true
    }

    fn apply(snapshot: &mut Snapshot<T>, result: Result<T, ApiError>) {
        match result {
            Ok(state) => {
                snapshot.state = Some(state);
                snapshot.error = None;
                snapshot.last_success = Some(Utc::now());
            }
            Err(e) => {
                snapshot.error = Some(ErrorInfo::from(&e));
                snapshot.last_failure = Some(Utc::now());
            }
        }
    }

    async fn generation(&self) -> u64 {
        self.cell.lock().await.generation
    }

    async fn retire(&self, generation: u64) {
        let mut cell = self.cell.lock().await;
        if cell.generation == generation {
            cell.generation += 1;
        }
    }

    pub async fn current_error(&self) -> Option<ErrorInfo> {
        self.cell.lock().await.snapshot.error.clone()
    }
}

impl<T: Clone> PolledResource<T> {
    pub async fn current_state(&self) -> Option<T> {
        self.cell.lock().await.snapshot.state.clone()
    }

    pub async fn snapshot(&self) -> Snapshot<T> {
        self.cell.lock().await.snapshot.clone()
    }
}

/// Background loop refreshing a [`PolledResource`] on a fixed interval.
///
/// The first fetch happens immediately. Fetches never overlap: a tick that
/// comes due while a request is still in flight is skipped.
///
/// Call [`Poller::stop`] to tear it down. Dropping a `Poller` aborts the task
/// and retires its generation only if the resource lock is free at that
/// moment, so a result being recorded on another worker thread can still land.
pub struct Poller<T> {
    resource: PolledResource<T>,
    generation: u64,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Poller<T> {
    pub async fn spawn<F, Fut>(resource: PolledResource<T>, period: Duration, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let generation = resource.generation().await;
        let target = resource.clone();
        let period = period.max(Duration::from_millis(1));

        let task = rocket::tokio::spawn(async move {
            let mut ticks = time::interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                let result = fetch().await;
                if let Err(e) = &result {
                    warn!(target: "app", "Refresh failed: {}", e);
                }
                if !target.record_for(generation, result).await {
                    break;
                }
            }
        });

        info!(target: "app", "Polling every {} ms", period.as_millis());
        Poller {
            resource,
            generation,
            task,
        }
    }

    /// Stop polling. Once this returns, no response from this poller, even
    /// one already in flight, can change the resource.
    pub async fn stop(self) {
        self.resource.retire(self.generation).await;
        self.task.abort();
        info!(target: "app", "Polling stopped");
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        if let Ok(mut cell) = self.resource.cell.try_lock() {
            if cell.generation == self.generation {
                cell.generation += 1;
            }
        }
        self.task.abort();
    }
}
