use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle, ThreadId};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::error::IngestError;
use crate::traits::Executor;
use crate::types::{DrainStatus, Ticket};

pub mod progress;

pub use progress::ProgressTracker;

pub type DynExecutor<P> = Arc<dyn Executor<P> + Send + Sync>;

struct Envelope<P> {
    ticket: Ticket,
    payload: P,
}

/// FIFO task queue drained by one dedicated worker thread.
///
/// Tasks run strictly in submission order. A task that fails or panics is
/// logged and skipped; the worker keeps going.
pub struct SerialQueue<P>
where
    P: Send + 'static,
{
    name: String,
    /// `None` once the queue is shut down. Tickets are issued under this
    /// lock so that ticket order equals channel order.
    intake: Mutex<Option<mpsc::UnboundedSender<Envelope<P>>>>,
    progress: Arc<ProgressTracker>,
    worker: Mutex<Option<JoinHandle<()>>>,
    worker_id: ThreadId,
}

impl<P> SerialQueue<P>
where
    P: Send + 'static,
{
    pub fn spawn(name: impl Into<String>, executor: DynExecutor<P>) -> Result<Self, IngestError> {
        let name = name.into();
        let (tx, rx) = mpsc::unbounded_channel::<Envelope<P>>();
        let progress = Arc::new(ProgressTracker::new());

        let worker = {
            let progress = Arc::clone(&progress);
            let worker_name = name.clone();
            thread::Builder::new()
                .name(name.clone())
                .spawn(move || run_worker(worker_name, rx, executor, progress))?
        };
        let worker_id = worker.thread().id();

        Ok(Self {
            name,
            intake: Mutex::new(Some(tx)),
            progress,
            worker: Mutex::new(Some(worker)),
            worker_id,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Enqueue a task. Returns its ticket.
    pub fn submit(&self, payload: P) -> Result<Ticket, IngestError> {
        let guard = self.intake.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(tx) = guard.as_ref() else {
            return Err(IngestError::Closed(self.name.clone()));
        };

        let ticket = self.progress.issue();
        if tx.send(Envelope { ticket, payload }).is_err() {
            // Worker is gone; account for the task so waiters are not stuck.
            self.progress.complete();
            return Err(IngestError::Closed(self.name.clone()));
        }
        Ok(ticket)
    }

    /// Wait until every task submitted before this call has run, or until
    /// `timeout` elapses.
    pub fn await_drain(&self, timeout: Duration) -> DrainStatus {
        self.progress.wait_for_issued(timeout)
    }

    pub fn await_ticket(&self, ticket: Ticket, timeout: Duration) -> DrainStatus {
        self.progress.wait_for(ticket, timeout)
    }

    pub fn pending(&self) -> u64 {
        self.progress.pending()
    }

    /// Whether the calling thread is this queue's worker.
    pub fn is_worker_thread(&self) -> bool {
        thread::current().id() == self.worker_id
    }

    /// Stop accepting tasks, let the worker finish what is queued and join
    /// it. Called from the worker itself, this only closes the intake.
    pub fn shutdown(&self) {
        self.intake
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if self.is_worker_thread() {
            return;
        }
        let handle = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle
            && handle.join().is_err()
        {
            error!("Worker {} terminated abnormally", self.name);
        }
    }
}

impl<P> Drop for SerialQueue<P>
where
    P: Send + 'static,
{
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker<P>(
    name: String,
    mut rx: mpsc::UnboundedReceiver<Envelope<P>>,
    executor: DynExecutor<P>,
    progress: Arc<ProgressTracker>,
) {
    info!("Worker {} started", name);
    while let Some(Envelope { ticket, payload }) = rx.blocking_recv() {
        let outcome = catch_unwind(AssertUnwindSafe(|| executor.execute(payload)));
        match outcome {
            Ok(Ok(())) => debug!("Task #{} on {} done", ticket, name),
            Ok(Err(err)) => warn!("Task #{} on {} failed: {}", ticket, name, err),
            Err(_) => error!("Task #{} on {} panicked", ticket, name),
        }
        progress.complete();
    }
    info!("Worker {} stopped", name);
}
