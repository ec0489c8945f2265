// THEORY:
// The `EstimatorSession` puts one `ShelfShareEstimator` behind an actor so that
// async callers (a web handler, a UI event loop, several tasks at once) can drive
// it without sharing it.
//
// Key architectural principles:
// 1.  **Single Owner**: The spawned task owns the estimator outright. Callers only
//     hold a `SessionHandle`, a cheap clonable sender.
// 2.  **Arrival Order**: Requests go through one bounded `mpsc` mailbox and are
//     handled one at a time, so toggles are applied exactly in the order they were
//     sent. Each request carries a `oneshot` for its reply.
// 3.  **Latest Value Broadcast**: A listener on the estimator publishes every share
//     change into a `watch` channel. Async consumers always observe the final value
//     after any burst of toggles, without replaying the intermediate ones.
// 4.  **Clean Shutdown**: The task ends on `Shutdown` or when every handle is gone.

use crate::core_modules::share::ShareResult;
use crate::error::EstimatorError;
use crate::estimator::{EstimatorSnapshot, ShelfShareEstimator};
use crate::events::GridEvent;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::debug;

const SESSION_MAILBOX_CAPACITY: usize = 32;

/// Message type for the session actor.
enum SessionMessage {
    Apply(GridEvent, oneshot::Sender<Result<ShareResult, EstimatorError>>),
    Toggle {
        row: u32,
        col: u32,
        reply: oneshot::Sender<Result<bool, EstimatorError>>,
    },
    Snapshot(oneshot::Sender<EstimatorSnapshot>),
    Shutdown,
}

/// Spawns estimator actors.
#[derive(Debug)]
pub struct EstimatorSession;

impl EstimatorSession {
    /// Moves `estimator` into a new task. Must be called from inside a tokio runtime.
    pub fn spawn(mut estimator: ShelfShareEstimator) -> (SessionHandle, JoinHandle<()>) {
        let (share_tx, share_rx) = watch::channel(estimator.current_share());
        estimator.subscribe(move |share: ShareResult| {
            share_tx.send_replace(share);
        });

        let (tx, mut rx) = mpsc::channel::<SessionMessage>(SESSION_MAILBOX_CAPACITY);

        // Actor task that owns the estimator
        let task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                match msg {
                    SessionMessage::Apply(event, reply) => {
                        let _ = reply.send(estimator.apply(event));
                    }
                    SessionMessage::Toggle { row, col, reply } => {
                        let _ = reply.send(estimator.toggle_cell(row, col));
                    }
                    SessionMessage::Snapshot(reply) => {
                        let _ = reply.send(estimator.snapshot());
                    }
                    SessionMessage::Shutdown => break,
                }
            }
            debug!("estimator session stopped");
        });

        (SessionHandle { tx, share_rx }, task)
    }
}

/// Async front end of a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionMessage>,
    share_rx: watch::Receiver<ShareResult>,
}

impl SessionHandle {
    pub async fn configure(&self, rows: u32, cols: u32) -> Result<ShareResult, EstimatorError> {
        self.apply(GridEvent::Configure { rows, cols }).await
    }

    pub async fn show(&self) -> Result<ShareResult, EstimatorError> {
        self.apply(GridEvent::Show).await
    }

    pub async fn hide(&self) -> Result<ShareResult, EstimatorError> {
        self.apply(GridEvent::Hide).await
    }

    pub async fn reset(&self) -> Result<ShareResult, EstimatorError> {
        self.apply(GridEvent::Reset).await
    }

    /// Flips `(row, col)` and returns whether it is now selected.
    pub async fn toggle_cell(&self, row: u32, col: u32) -> Result<bool, EstimatorError> {
        self.request(|reply| SessionMessage::Toggle { row, col, reply }).await?
    }

    pub async fn apply(&self, event: GridEvent) -> Result<ShareResult, EstimatorError> {
        self.request(|reply| SessionMessage::Apply(event, reply)).await?
    }

    pub async fn snapshot(&self) -> Result<EstimatorSnapshot, EstimatorError> {
        self.request(SessionMessage::Snapshot).await
    }

    /// Share as of every request handled so far.
    pub async fn current_share(&self) -> Result<ShareResult, EstimatorError> {
        Ok(self.snapshot().await?.share)
    }

    /// Receiver that always holds the most recently reported share.
    pub fn watch_share(&self) -> watch::Receiver<ShareResult> {
        self.share_rx.clone()
    }

    /// Asks the task to stop after the requests already queued.
    pub async fn shutdown(&self) {
        let _ = self.tx.send(SessionMessage::Shutdown).await;
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> SessionMessage,
    ) -> Result<T, EstimatorError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(make(reply_tx))
            .await
            .map_err(|_| EstimatorError::SessionClosed)?;
        reply_rx.await.map_err(|_| EstimatorError::SessionClosed)
    }
}

impl std::fmt::Debug for SessionMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionMessage::Apply(event, _) => write!(f, "Apply({event:?})"),
            SessionMessage::Toggle { row, col, .. } => write!(f, "Toggle({row}, {col})"),
            SessionMessage::Snapshot(_) => f.write_str("Snapshot"),
            SessionMessage::Shutdown => f.write_str("Shutdown"),
        }
    }
}
