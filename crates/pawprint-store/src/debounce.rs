//! Debounced writes
//!
//! A background task holds the latest pushed value and hands it to a sink
//! once no new value has arrived for the quiet period. Values pushed in
//! between replace each other; only the last one is written.

use std::fmt::Display;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error};

enum Command<T, E> {
    Value(T),
    Flush(oneshot::Sender<Result<(), E>>),
}

/// Coalesces rapid updates into one write per quiet period
pub struct Debouncer<T, E> {
    tx: mpsc::UnboundedSender<Command<T, E>>,
    handle: JoinHandle<usize>,
}

impl<T, E> Debouncer<T, E>
where
    T: Send + 'static,
    E: Display + Send + 'static,
{
    /// Spawn the writer task. Must be called inside a tokio runtime.
    pub fn spawn<F>(delay: Duration, mut sink: F) -> Self
    where
        F: FnMut(T) -> Result<(), E> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Command<T, E>>();

        let handle = tokio::spawn(async move {
            let mut pending: Option<T> = None;
            let mut writes = 0usize;

            loop {
                let command = if pending.is_some() {
                    match tokio::time::timeout(delay, rx.recv()).await {
                        Ok(command) => command,
                        Err(_) => {
                            if let Some(value) = pending.take() {
                                writes += 1;
                                if let Err(e) = sink(value) {
                                    error!(error = %e, "Debounced write failed");
                                }
                            }
                            continue;
                        }
                    }
                } else {
                    rx.recv().await
                };

                match command {
                    Some(Command::Value(value)) => pending = Some(value),
                    Some(Command::Flush(ack)) => {
                        let result = match pending.take() {
                            Some(value) => {
                                writes += 1;
                                sink(value)
                            }
                            None => Ok(()),
                        };
                        let _ = ack.send(result);
                    }
                    None => {
                        if let Some(value) = pending.take() {
                            writes += 1;
                            if let Err(e) = sink(value) {
                                error!(error = %e, "Final debounced write failed");
                            }
                        }
                        break;
                    }
                }
            }

            debug!(writes, "Debouncer stopped");
            writes
        });

        Self { tx, handle }
    }

    /// Replace the pending value and restart the quiet period
    pub fn push(&self, value: T) {
        if self.tx.send(Command::Value(value)).is_err() {
            error!("Debouncer task is gone, dropping update");
        }
    }

    /// Write the pending value now, returning the sink's result.
    ///
    /// With nothing pending this is `Ok(())`.
    pub async fn flush(&self) -> Result<(), E> {
        let (ack, done) = oneshot::channel();
        if self.tx.send(Command::Flush(ack)).is_err() {
            error!("Debouncer task is gone, nothing to flush");
            return Ok(());
        }
        done.await.unwrap_or(Ok(()))
    }

    /// Write anything pending and stop the task. Returns the number of
    /// writes the sink received.
    pub async fn shutdown(self) -> usize {
        drop(self.tx);
        match self.handle.await {
            Ok(writes) => writes,
            Err(e) => {
                error!(error = %e, "Debouncer task panicked");
                0
            }
        }
    }
}
