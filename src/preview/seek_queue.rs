// SPDX-License-Identifier: MPL-2.0
//! Strictly ordered seek submission for one engine session.
//!
//! A single local worker task owns the receiving end of an unbounded command
//! channel and awaits each engine seek before taking the next command, so
//! seeks are applied in submission order and never overlap.

use crate::application::port::MediaEngine;
use crate::domain::error::{EngineError, ScrubError};
use crate::domain::video::SeekMode;
use std::rc::Rc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Completion of a notified seek.
pub type SeekCompletion = oneshot::Receiver<Result<(), EngineError>>;

/// Commands understood by the seek worker.
#[derive(Debug)]
enum SeekCommand {
    Seek {
        position_secs: f64,
        mode: SeekMode,
        done: Option<oneshot::Sender<Result<(), EngineError>>>,
    },
}

/// Handle to the per-instance seek worker.
///
/// Dropping the handle aborts the worker; a seek already awaited by the
/// engine is left to the engine.
pub struct SeekQueue {
    command_tx: mpsc::UnboundedSender<SeekCommand>,
    worker: JoinHandle<()>,
}

impl SeekQueue {
    /// Spawns the worker on the current [`LocalSet`](tokio::task::LocalSet).
    ///
    /// # Panics
    ///
    /// Panics if called outside a `LocalSet`, like
    /// [`tokio::task::spawn_local`].
    #[must_use]
    pub fn spawn(engine: Rc<dyn MediaEngine>) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let worker = tokio::task::spawn_local(Self::worker_loop(engine, command_rx));
        Self { command_tx, worker }
    }

    /// Queues a seek behind every previously submitted one.
    ///
    /// # Errors
    ///
    /// Returns [`ScrubError::Closed`] if the worker is no longer running.
    pub fn submit(&self, position_secs: f64, mode: SeekMode) -> Result<(), ScrubError> {
        self.send(SeekCommand::Seek {
            position_secs,
            mode,
            done: None,
        })
    }

    /// Queues a seek and returns a receiver resolved with its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ScrubError::Closed`] if the worker is no longer running.
    pub fn submit_and_notify(
        &self,
        position_secs: f64,
        mode: SeekMode,
    ) -> Result<SeekCompletion, ScrubError> {
        let (done_tx, done_rx) = oneshot::channel();
        self.send(SeekCommand::Seek {
            position_secs,
            mode,
            done: Some(done_tx),
        })?;
        Ok(done_rx)
    }

    fn send(&self, command: SeekCommand) -> Result<(), ScrubError> {
        self.command_tx
            .send(command)
            .map_err(|_| ScrubError::Closed)
    }

    async fn worker_loop(
        engine: Rc<dyn MediaEngine>,
        mut command_rx: mpsc::UnboundedReceiver<SeekCommand>,
    ) {
        while let Some(command) = command_rx.recv().await {
            match command {
                SeekCommand::Seek {
                    position_secs,
                    mode,
                    done,
                } => {
                    let result = engine.seek(position_secs, mode).await;
                    match &result {
                        Err(err) => {
                            log::warn!("{:?} seek to {:.3}s failed: {}", mode, position_secs, err);
                        }
                        Ok(()) if !mode.is_accurate() && !command_rx.is_empty() => {
                            log::trace!("seek to {:.3}s superseded by a queued seek", position_secs);
                        }
                        Ok(()) => {}
                    }
                    if let Some(done) = done {
                        // Receiver gone means nobody waits for this seek anymore.
                        let _ = done.send(result);
                    }
                }
            }
        }
    }
}

impl Drop for SeekQueue {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

impl std::fmt::Debug for SeekQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeekQueue")
            .field("running", &!self.worker.is_finished())
            .finish()
    }
}
