//! Single-writer actor.
//!
//! All mutations funnel through one dedicated connection, processed
//! serially. Each job runs inside an immediate transaction, so a job that
//! reads balances, checks guards and writes deltas observes no interleaved
//! writes. SQLite allows one writer at a time anyway; serializing in-process
//! avoids busy retries and makes read-check-write jobs atomic.

use std::any::Any;

use diesel::SqliteConnection;
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;
use sarraf_core::errors::{Error, Result};

type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor. Cheap to clone.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Runs `job` on the writer's dedicated connection, inside an immediate
    /// transaction. A domain error returned by the job rolls the transaction
    /// back and comes back to the caller unchanged.
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
            .map_err(|_| Error::Unavailable("Writer actor has stopped".to_string()))?;

        let result = ret_rx
            .await
            .map_err(|_| Error::Unavailable("Writer actor dropped the reply".to_string()))?;

        result.map(|boxed| {
            *boxed
                .downcast::<T>()
                .unwrap_or_else(|_| panic!("Writer actor returned a mismatched type"))
        })
    }
}

/// Spawns the background writer task. The actor holds one pooled connection
/// for its whole lifetime and terminates when every `WriteHandle` is gone.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                log::error!("Writer actor could not acquire a connection: {}", e);
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    job(c).map_err(StorageError::from)
                })
                .map_err(|e: StorageError| e.into());

            // The caller may have timed out and dropped the receiver.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
