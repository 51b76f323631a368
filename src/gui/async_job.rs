//! Polling handles for background work driven from the UI thread.

use anyhow::{anyhow, Result};
use std::sync::mpsc::{Receiver, TryRecvError};

/// Receiving side of a one-shot background job.
///
/// The UI polls once per frame; the result is yielded exactly once. A
/// worker that vanished without reporting surfaces as an error rather
/// than a silently stuck job.
pub struct JobHandle<T> {
    receiver: Option<Receiver<Result<T>>>,
}

impl<T> JobHandle<T> {
    pub fn new(receiver: Receiver<Result<T>>) -> Self {
        Self {
            receiver: Some(receiver),
        }
    }

    /// Returns Some(result) once the job has finished, None while it is
    /// still running.
    pub fn poll(&mut self) -> Option<Result<T>> {
        let receiver = self.receiver.as_ref()?;
        match receiver.try_recv() {
            Ok(result) => {
                self.receiver = None;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.receiver = None;
                Some(Err(anyhow!("Worker exited without reporting a result")))
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.receiver.is_some()
    }
}
