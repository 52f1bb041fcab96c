use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use fundbook_core::errors::{DatabaseError, Error, Result};
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

// A write job: a closure run on the actor's dedicated connection, inside one
// immediate transaction. Return types are erased through Box<dyn Any> so a
// single channel can carry every job shape.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

// A fund book sees a handful of mutations at a time; the only burst source
// is replaying an import, and 64 queued jobs absorbs that comfortably.
const JOB_QUEUE_DEPTH: usize = 64;

/// Handle for submitting write jobs to the single-writer actor.
///
/// Every mutation in this crate goes through a handle, so writes are applied
/// strictly one at a time and each job is atomic: the actor wraps it in an
/// `immediate_transaction`, which takes the SQLite write lock up front.
#[derive(Clone)]
pub struct WriteHandle {
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>,
}

impl WriteHandle {
    /// Runs `job` on the writer's connection and returns its result.
    ///
    /// The job executes inside a transaction; returning an `Err` rolls every
    /// statement it issued back. A stopped actor surfaces as a database
    /// error rather than a panic, so a wedged writer cannot take the caller
    /// down with it.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_gone("the writer actor is no longer accepting jobs"))?;

        let result = ret_rx
            .await
            .map_err(|_| writer_gone("the writer actor dropped the reply channel"))?;

        result.map(|boxed: Box<dyn Any + Send + 'static>| {
            *boxed
                .downcast::<T>()
                .unwrap_or_else(|_| panic!("Writer actor returned a mismatched result type."))
        })
    }
}

fn writer_gone(detail: &str) -> Error {
    Error::Database(DatabaseError::Internal(detail.to_string()))
}

/// Spawns the single-writer actor.
///
/// The actor holds one pooled connection for its lifetime and processes jobs
/// serially in arrival order. It terminates when every `WriteHandle` clone
/// has been dropped.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>(JOB_QUEUE_DEPTH);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("Failed to get a connection from the pool for the writer actor.");

        while let Some((job, reply_tx)) = rx.recv().await {
            // The job returns core errors; wrap them in StorageError inside
            // the transaction so Diesel rolls back, unwrap at the boundary.
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    job(c).map_err(StorageError::from)
                })
                .map_err(|e: StorageError| e.into());

            // The requester may have been cancelled; dropping the result is fine.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
