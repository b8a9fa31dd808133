use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use log::error;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};
use vehicle_rating_core::errors::{DatabaseError, Error, Result};

// A write job runs against the writer's connection and returns a core Result,
// which is what repository callers expect.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type ErasedReply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor.
///
/// All reference data writes go through one connection, one job at a time,
/// each inside an immediate transaction.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, ErasedReply)>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// If the job returns an error, its transaction is rolled back.
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
            .map_err(|_| writer_stopped("the writer actor is no longer running"))?;

        let boxed = ret_rx
            .await
            .map_err(|_| writer_stopped("the writer actor dropped the job"))??;

        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| writer_stopped("unexpected result type from the writer actor"))
    }
}

fn writer_stopped(reason: &str) -> Error {
    error!("Write job failed: {}", reason);
    Error::Database(DatabaseError::Internal(reason.to_string()))
}

/// Spawns a background Tokio task that acts as the single writer to the database.
/// The actor owns one connection from the pool and processes jobs serially.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, ErasedReply)>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                // Dropping the receiver makes every pending and future exec fail.
                error!("Writer actor could not acquire a connection: {}", e);
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e: StorageError| e.into());

            // The requester may have gone away; nothing to report to.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
