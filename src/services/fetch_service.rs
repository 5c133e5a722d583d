//! Sequenced, cancellable fetches for screen state.
//!
//! Each fetch runs as a task on the tokio runtime and reports back through a
//! oneshot channel that the UI loop polls on every tick, so the render loop
//! never blocks on the network.
//!
//! Every request gets a monotonically increasing token. A successful result
//! is only handed to the screen when its token is newer than the token of
//! the data the screen already shows; committing token `k` aborts every
//! request older than `k`. A response that arrives late for an older request
//! can therefore never overwrite fresher state.
//!
//! The service is scoped to the owning screen: `unmount` (or dropping the
//! service) aborts everything in flight, and nothing is reported afterwards.

use crate::api::ApiError;
use std::future::Future;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// What a finished fetch means for the screen.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    /// Newer than the data on screen: replace the state with `value`.
    Success { token: u64, value: T },
    /// The request failed. `latest` is true when no newer request was issued
    /// after it.
    Failure {
        token: u64,
        error: ApiError,
        latest: bool,
    },
}

struct InFlight<T> {
    token: u64,
    receiver: oneshot::Receiver<Result<T, ApiError>>,
    task: JoinHandle<()>,
}

/// Tracks the in-flight fetches of a single screen
pub struct FetchService<T> {
    label: &'static str,
    last_issued: u64,
    committed: u64,
    in_flight: Vec<InFlight<T>>,
    alive: bool,
}

impl<T: Send + 'static> FetchService<T> {
    /// `label` names the request in log lines (e.g. "orphanages")
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            last_issued: 0,
            committed: 0,
            in_flight: Vec::new(),
            alive: true,
        }
    }

    /// Spawn `request` on `runtime` and return its token.
    ///
    /// Returns `None` once the service has been unmounted.
    pub fn start<F>(&mut self, runtime: &Handle, request: F) -> Option<u64>
    where
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        if !self.alive {
            debug!("{}: not starting fetch after unmount", self.label);
            return None;
        }

        self.last_issued += 1;
        let token = self.last_issued;
        let (sender, receiver) = oneshot::channel();

        let task = runtime.spawn(async move {
            let result = request.await;
            // receiver is gone if the screen was torn down meanwhile
            let _ = sender.send(result);
        });

        debug!("{}: fetch #{} started", self.label, token);
        self.in_flight.push(InFlight {
            token,
            receiver,
            task,
        });
        Some(token)
    }

    /// Collect every fetch that finished since the last poll, oldest first,
    /// with stale successes already filtered out.
    pub fn poll(&mut self) -> Vec<FetchOutcome<T>> {
        if !self.alive {
            return Vec::new();
        }

        let mut finished = Vec::new();
        let mut pending = Vec::with_capacity(self.in_flight.len());
        for mut fetch in self.in_flight.drain(..) {
            match fetch.receiver.try_recv() {
                Ok(result) => finished.push((fetch.token, result)),
                Err(oneshot::error::TryRecvError::Empty) => pending.push(fetch),
                Err(oneshot::error::TryRecvError::Closed) => {
                    error!("{}: fetch #{} ended without a result", self.label, fetch.token);
                }
            }
        }
        self.in_flight = pending;
        finished.sort_by_key(|(token, _)| *token);

        let mut outcomes = Vec::new();
        for (token, result) in finished {
            match result {
                Ok(value) if token > self.committed => {
                    self.committed = token;
                    outcomes.push(FetchOutcome::Success { token, value });
                }
                Ok(_) => {
                    debug!(
                        "{}: discarding stale fetch #{} (showing #{})",
                        self.label, token, self.committed
                    );
                }
                Err(error) => {
                    let latest = token == self.last_issued;
                    if latest {
                        warn!("{}: fetch #{} failed: {}", self.label, token, error);
                    } else {
                        debug!("{}: superseded fetch #{} failed: {}", self.label, token, error);
                    }
                    outcomes.push(FetchOutcome::Failure {
                        token,
                        error,
                        latest,
                    });
                }
            }
        }

        self.abort_older_than(self.committed);
        outcomes
    }

    fn abort_older_than(&mut self, token: u64) {
        let label = self.label;
        self.in_flight.retain(|fetch| {
            if fetch.token < token {
                debug!("{}: aborting superseded fetch #{}", label, fetch.token);
                fetch.task.abort();
                false
            } else {
                true
            }
        });
    }

    /// Number of requests still running
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Token of the data currently committed to the screen (0 = none yet)
    pub fn committed_token(&self) -> u64 {
        self.committed
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Tear down: abort everything in flight and ignore all later results.
    pub fn unmount(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        for fetch in self.in_flight.drain(..) {
            fetch.task.abort();
        }
        debug!("{}: unmounted", self.label);
    }
}

impl<T> Drop for FetchService<T> {
    fn drop(&mut self) {
        for fetch in &self.in_flight {
            fetch.task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use tokio::runtime::Runtime;

    fn poll_until<T: Send + 'static>(
        service: &mut FetchService<T>,
        mut done: impl FnMut(&[FetchOutcome<T>]) -> bool,
    ) -> Vec<FetchOutcome<T>> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut all = Vec::new();
        while Instant::now() < deadline {
            all.extend(service.poll());
            if done(&all) {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        all
    }

    #[test]
    fn test_success_is_reported_once() {
        let rt = Runtime::new().unwrap();
        let mut service = FetchService::new("test");

        let token = service.start(rt.handle(), async { Ok(7_u32) }).unwrap();
        let outcomes = poll_until(&mut service, |o| !o.is_empty());

        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0], FetchOutcome::Success { token: t, value: 7 } if t == token));
        assert_eq!(service.in_flight(), 0);
        assert!(service.poll().is_empty());
    }

    #[test]
    fn test_late_older_response_is_discarded() {
        let rt = Runtime::new().unwrap();
        let mut service = FetchService::new("test");

        let (first_tx, first_rx) = oneshot::channel::<u32>();
        let first = service
            .start(rt.handle(), async move { Ok(first_rx.await.unwrap_or(0)) })
            .unwrap();
        let second = service.start(rt.handle(), async { Ok(2_u32) }).unwrap();
        assert!(second > first);

        let outcomes = poll_until(&mut service, |o| !o.is_empty());
        assert!(matches!(outcomes[0], FetchOutcome::Success { value: 2, .. }));
        assert_eq!(service.committed_token(), second);

        // the older request was aborted when the newer one committed
        assert_eq!(service.in_flight(), 0);
        let _ = first_tx.send(1);
        std::thread::sleep(Duration::from_millis(20));
        assert!(service.poll().is_empty());
        assert_eq!(service.committed_token(), second);
    }

    #[test]
    fn test_in_order_responses_both_commit() {
        let rt = Runtime::new().unwrap();
        let mut service = FetchService::new("test");

        service.start(rt.handle(), async { Ok(1_u32) }).unwrap();
        let first = poll_until(&mut service, |o| !o.is_empty());
        service.start(rt.handle(), async { Ok(2_u32) }).unwrap();
        let second = poll_until(&mut service, |o| !o.is_empty());

        assert!(matches!(first[0], FetchOutcome::Success { value: 1, .. }));
        assert!(matches!(second[0], FetchOutcome::Success { value: 2, .. }));
    }

    #[test]
    fn test_failure_reports_whether_latest() {
        let rt = Runtime::new().unwrap();
        let mut service: FetchService<u32> = FetchService::new("test");

        service
            .start(rt.handle(), async {
                Err(ApiError::Status {
                    status: 500,
                    body: String::new(),
                })
            })
            .unwrap();
        let outcomes = poll_until(&mut service, |o| !o.is_empty());
        assert!(matches!(outcomes[0], FetchOutcome::Failure { latest: true, .. }));
        assert_eq!(service.committed_token(), 0);
    }

    #[test]
    fn test_unmount_aborts_and_silences() {
        let rt = Runtime::new().unwrap();
        let mut service = FetchService::new("test");

        let (tx, rx) = oneshot::channel::<u32>();
        service
            .start(rt.handle(), async move { Ok(rx.await.unwrap_or(0)) })
            .unwrap();
        service.unmount();

        assert!(!service.is_alive());
        assert_eq!(service.in_flight(), 0);
        let _ = tx.send(5);
        std::thread::sleep(Duration::from_millis(20));
        assert!(service.poll().is_empty());
        assert!(service.start(rt.handle(), async { Ok(1) }).is_none());
    }
}
