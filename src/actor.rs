//! Single-writer command queue around [`EngineCore`].
//!
//! DESIGN
//! ======
//! The engine is single-threaded by construction: every entry point takes
//! `&mut self`. Hosts that receive touch events on more than one thread move
//! the core onto one tokio task with [`spawn_engine`] and talk to it through a
//! cloneable [`EngineHandle`]. Commands travel over a bounded mpsc queue and are
//! applied strictly in arrival order; each reply comes back on a oneshot.
//!
//! The task ends when [`EngineHandle::shutdown`] is called or every handle is
//! dropped, and hands the core back through its `JoinHandle`.

#[cfg(test)]
#[path = "actor_test.rs"]
mod actor_test;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::consts::COMMAND_QUEUE_CAPACITY;
use crate::doc::{ObjectId, PlacedObject};
use crate::engine::{Action, EngineCore};
use crate::input::Touch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("engine task is no longer running")]
pub struct EngineClosed;

impl EngineClosed {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        "E_ENGINE_CLOSED"
    }
}

/// A mutation the engine task applies on behalf of a handle.
#[derive(Debug, Clone)]
enum Op {
    SetViewport { width: f64, height: f64 },
    AddSticker(String),
    Select(ObjectId),
    Delete(ObjectId),
    GestureStart(ObjectId),
    GestureMove(ObjectId, Vec<Touch>),
    GestureEnd,
    GestureCancel,
}

enum Command {
    Apply { op: Op, reply: oneshot::Sender<Vec<Action>> },
    Snapshot { reply: oneshot::Sender<Vec<PlacedObject>> },
    Shutdown,
}

/// Cloneable sender side of the engine task.
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<Command>,
}

/// Move `core` onto its own tokio task.
///
/// Must be called from within a tokio runtime.
#[must_use]
pub fn spawn_engine(core: EngineCore) -> (EngineHandle, JoinHandle<EngineCore>) {
    let (tx, rx) = mpsc::channel::<Command>(COMMAND_QUEUE_CAPACITY);
    info!(queue_capacity = COMMAND_QUEUE_CAPACITY, "engine task spawned");
    let task = tokio::spawn(run(core, rx));
    (EngineHandle { tx }, task)
}

async fn run(mut core: EngineCore, mut rx: mpsc::Receiver<Command>) -> EngineCore {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Apply { op, reply } => {
                let actions = apply(&mut core, op);
                if reply.send(actions).is_err() {
                    debug!("engine reply dropped by caller");
                }
            }
            Command::Snapshot { reply } => {
                if reply.send(core.snapshot()).is_err() {
                    debug!("snapshot reply dropped by caller");
                }
            }
            Command::Shutdown => break,
        }
    }
    // A release must never be lost to shutdown.
    core.on_gesture_cancel();
    info!(stickers = core.doc.len(), "engine task stopped");
    core
}

fn apply(core: &mut EngineCore, op: Op) -> Vec<Action> {
    match op {
        Op::SetViewport { width, height } => {
            core.set_viewport(width, height);
            vec![Action::RenderNeeded]
        }
        Op::AddSticker(symbol) => core.add_sticker(&symbol),
        Op::Select(id) => core.select(&id),
        Op::Delete(id) => core.delete(&id),
        Op::GestureStart(id) => core.on_gesture_start(&id),
        Op::GestureMove(id, touches) => core.on_gesture_move(&id, &touches),
        Op::GestureEnd => core.on_gesture_end(),
        Op::GestureCancel => core.on_gesture_cancel(),
    }
}

impl EngineHandle {
    async fn request(&self, op: Op) -> Result<Vec<Action>, EngineClosed> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(Command::Apply { op, reply }).await.map_err(|_| EngineClosed)?;
        rx.await.map_err(|_| EngineClosed)
    }

    /// See [`EngineCore::set_viewport`].
    ///
    /// # Errors
    ///
    /// [`EngineClosed`] once the engine task has stopped.
    pub async fn set_viewport(&self, width: f64, height: f64) -> Result<Vec<Action>, EngineClosed> {
        self.request(Op::SetViewport { width, height }).await
    }

    /// See [`EngineCore::add_sticker`].
    ///
    /// # Errors
    ///
    /// [`EngineClosed`] once the engine task has stopped.
    pub async fn add_sticker(&self, symbol: impl Into<String>) -> Result<Vec<Action>, EngineClosed> {
        self.request(Op::AddSticker(symbol.into())).await
    }

    /// See [`EngineCore::select`].
    ///
    /// # Errors
    ///
    /// [`EngineClosed`] once the engine task has stopped.
    pub async fn select(&self, id: ObjectId) -> Result<Vec<Action>, EngineClosed> {
        self.request(Op::Select(id)).await
    }

    /// See [`EngineCore::delete`].
    ///
    /// # Errors
    ///
    /// [`EngineClosed`] once the engine task has stopped.
    pub async fn delete(&self, id: ObjectId) -> Result<Vec<Action>, EngineClosed> {
        self.request(Op::Delete(id)).await
    }

    /// See [`EngineCore::on_gesture_start`].
    ///
    /// # Errors
    ///
    /// [`EngineClosed`] once the engine task has stopped.
    pub async fn gesture_start(&self, id: ObjectId) -> Result<Vec<Action>, EngineClosed> {
        self.request(Op::GestureStart(id)).await
    }

    /// See [`EngineCore::on_gesture_move`].
    ///
    /// # Errors
    ///
    /// [`EngineClosed`] once the engine task has stopped.
    pub async fn gesture_move(&self, id: ObjectId, touches: Vec<Touch>) -> Result<Vec<Action>, EngineClosed> {
        self.request(Op::GestureMove(id, touches)).await
    }

    /// See [`EngineCore::on_gesture_end`].
    ///
    /// # Errors
    ///
    /// [`EngineClosed`] once the engine task has stopped.
    pub async fn gesture_end(&self) -> Result<Vec<Action>, EngineClosed> {
        self.request(Op::GestureEnd).await
    }

    /// See [`EngineCore::on_gesture_cancel`].
    ///
    /// # Errors
    ///
    /// [`EngineClosed`] once the engine task has stopped.
    pub async fn gesture_cancel(&self) -> Result<Vec<Action>, EngineClosed> {
        self.request(Op::GestureCancel).await
    }

    /// Current stickers in draw order.
    ///
    /// # Errors
    ///
    /// [`EngineClosed`] once the engine task has stopped.
    pub async fn snapshot(&self) -> Result<Vec<PlacedObject>, EngineClosed> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(Command::Snapshot { reply }).await.map_err(|_| EngineClosed)?;
        rx.await.map_err(|_| EngineClosed)
    }

    /// Stop the engine task after the commands already queued.
    ///
    /// # Errors
    ///
    /// [`EngineClosed`] if the task had already stopped.
    pub async fn shutdown(&self) -> Result<(), EngineClosed> {
        self.tx.send(Command::Shutdown).await.map_err(|_| EngineClosed)
    }
}
