/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Core Sequencer implementation.
//!
//! This module provides the main Sequencer struct that owns a QueueEngine
//! and ensures all mutations are executed in a deterministic, totally-ordered
//! sequence with monotonic sequence numbers.

use super::command::QueueCommand;
use super::event::SequencerEvent;
use super::receipt::SequencerReceipt;
use super::result::{NoOpReason, SequencerResult};
use crate::persistence::{PersistenceError, QueueSnapshot};
use crate::queue::{
    HistoryScope, QueueEngine, QueueEntry, RosterLookup, Sale, SaleId, SalespersonId, Timestamp,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::{RwLock, mpsc, oneshot};
use tracing::{debug, trace};

/// Type alias for event listener functions.
type EventListener = Arc<dyn Fn(&SequencerEvent) + Send + Sync>;

/// A command paired with the channel its receipt is sent back on.
pub type CommandEnvelope = (QueueCommand, oneshot::Sender<SequencerReceipt>);

/// A single-writer sequencer that provides total ordering of queue mutations.
///
/// The Sequencer owns a [`QueueEngine`] and runs every mutation from one
/// event loop, each with a monotonically increasing sequence number. A
/// mutation runs to completion under the engine's write lock, so a manual
/// reorder's remove/reinsert/renumber never interleaves with another
/// mutation. Reads go through a [`QueueReader`].
///
/// The loop stops once every [`SequencerClient`] has been dropped.
///
/// # Examples
///
/// ```no_run
/// use turnqueue::sequencer::Sequencer;
/// use turnqueue::{QueueEngine, SalespersonId};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let sequencer = Sequencer::new(QueueEngine::new());
/// let client = sequencer.client();
/// let reader = sequencer.reader();
/// let handle = sequencer.spawn();
///
/// client.register_sale(SalespersonId::from("ana"), 1_000).await?;
/// assert_eq!(reader.queue().await.len(), 1);
///
/// drop(client);
/// handle.wait().await?;
/// # Ok(())
/// # }
/// ```
pub struct Sequencer {
    /// The engine, shared with readers.
    engine: Arc<RwLock<QueueEngine>>,

    /// Monotonic sequence counter.
    sequence: Arc<AtomicU64>,

    /// Channel for submitting commands.
    command_tx: mpsc::Sender<CommandEnvelope>,

    /// Channel for receiving commands (used by event loop).
    command_rx: mpsc::Receiver<CommandEnvelope>,

    /// Event listeners called synchronously for each event.
    event_listeners: Vec<EventListener>,
}

impl Sequencer {
    /// Creates a new Sequencer owning the given engine.
    ///
    /// The channel capacity comes from the engine's configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use turnqueue::sequencer::Sequencer;
    /// use turnqueue::QueueEngine;
    ///
    /// let sequencer = Sequencer::new(QueueEngine::new());
    /// ```
    #[must_use]
    pub fn new(engine: QueueEngine) -> Self {
        let capacity = engine.config().channel_capacity;
        Self::with_capacity(engine, capacity)
    }

    /// Creates a new Sequencer with a specific channel capacity.
    ///
    /// # Arguments
    ///
    /// * `engine` - The engine to own
    /// * `capacity` - Channel buffer size (backpressure when full), at least 1
    #[must_use]
    pub fn with_capacity(engine: QueueEngine, capacity: usize) -> Self {
        let (command_tx, command_rx) = mpsc::channel(capacity.max(1));

        Self {
            engine: Arc::new(RwLock::new(engine)),
            sequence: Arc::new(AtomicU64::new(1)),
            command_tx,
            command_rx,
            event_listeners: Vec::new(),
        }
    }

    /// Registers an event listener.
    ///
    /// Listeners are called synchronously in sequence order for each event,
    /// after the engine lock has been released.
    ///
    /// # Arguments
    ///
    /// * `listener` - Function to call for each event
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: Fn(&SequencerEvent) + Send + Sync + 'static,
    {
        self.event_listeners.push(Arc::new(listener));
    }

    /// Returns a cloneable handle for submitting commands.
    #[must_use]
    pub fn client(&self) -> SequencerClient {
        SequencerClient {
            command_tx: self.command_tx.clone(),
        }
    }

    /// Returns a cloneable read handle on the engine.
    #[must_use]
    pub fn reader(&self) -> QueueReader {
        QueueReader {
            engine: Arc::clone(&self.engine),
        }
    }

    /// Returns a clone of the raw command sender.
    #[must_use]
    pub fn sender(&self) -> mpsc::Sender<CommandEnvelope> {
        self.command_tx.clone()
    }

    /// Spawns the sequencer event loop on a new task.
    ///
    /// Returns a handle that can be used to wait for shutdown. Handles
    /// obtained from [`client`](Self::client) and [`sender`](Self::sender)
    /// before this call keep working; the loop ends when all are dropped.
    #[must_use]
    pub fn spawn(self) -> SequencerHandle {
        let Self {
            engine,
            sequence,
            command_tx,
            command_rx,
            event_listeners,
        } = self;
        drop(command_tx);

        let event_loop = EventLoop {
            engine,
            sequence,
            event_listeners,
        };
        let handle = tokio::spawn(event_loop.run(command_rx));

        SequencerHandle { handle }
    }
}

/// State moved into the spawned task.
struct EventLoop {
    engine: Arc<RwLock<QueueEngine>>,
    sequence: Arc<AtomicU64>,
    event_listeners: Vec<EventListener>,
}

impl EventLoop {
    /// Runs the main event loop (single writer).
    ///
    /// Receives commands, assigns sequence numbers, executes on the engine,
    /// emits events, and sends receipts.
    async fn run(self, mut command_rx: mpsc::Receiver<CommandEnvelope>) {
        while let Some((command, reply)) = command_rx.recv().await {
            let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
            let ts = nanos_since_epoch();

            let result = {
                let mut engine = self.engine.write().await;
                execute_command(&mut engine, &command)
            };
            trace!(sequence = seq, applied = result.is_applied(), "command executed");

            let event = SequencerEvent::new(seq, ts, command, result);

            for listener in &self.event_listeners {
                listener(&event);
            }

            let receipt = SequencerReceipt::new(seq, event.result);
            let _ = reply.send(receipt);
        }
        debug!("sequencer stopped: all senders dropped");
    }
}

/// Executes a command on the engine.
pub(crate) fn execute_command(engine: &mut QueueEngine, command: &QueueCommand) -> SequencerResult {
    match command {
        QueueCommand::RegisterSale { salesperson_id, at } => {
            let sale_id = engine.register_sale(salesperson_id.clone(), *at);
            SequencerResult::SaleRegistered {
                sale_id,
                salesperson_id: salesperson_id.clone(),
            }
        }
        QueueCommand::DeleteSale { sale_id } => match engine.delete_sale(sale_id) {
            Some(_) => SequencerResult::SaleDeleted { sale_id: *sale_id },
            None => unknown_sale(*sale_id),
        },
        QueueCommand::Reorder {
            sale_id,
            new_index,
            at,
        } => match engine.reorder(sale_id, *new_index, *at) {
            Some(index) => SequencerResult::Reordered {
                sale_id: *sale_id,
                index,
            },
            None => unknown_sale(*sale_id),
        },
        QueueCommand::ClearAll => SequencerResult::Cleared {
            removed: engine.clear_all(),
        },
        QueueCommand::EnsureSalesperson(profile) => match engine.salesperson(&profile.id) {
            Some(stored) => SequencerResult::SalespersonPresent {
                profile: stored.clone(),
            },
            None => SequencerResult::SalespersonAdded {
                id: engine.ensure_salesperson(profile.clone()).id.clone(),
            },
        },
        QueueCommand::AddSalesperson(profile) => {
            if engine.add_salesperson(profile.clone()) {
                SequencerResult::SalespersonAdded {
                    id: profile.id.clone(),
                }
            } else {
                SequencerResult::Unchanged {
                    reason: NoOpReason::AlreadyRegistered(profile.id.clone()),
                }
            }
        }
        QueueCommand::UpdateSalesperson { id, update } => {
            if engine.update_salesperson(id, update) {
                SequencerResult::SalespersonUpdated { id: id.clone() }
            } else {
                unknown_salesperson(id)
            }
        }
        QueueCommand::RemoveSalesperson { id } => match engine.remove_salesperson(id) {
            Some(_) => SequencerResult::SalespersonRemoved { id: id.clone() },
            None => unknown_salesperson(id),
        },
    }
}

fn unknown_sale(sale_id: SaleId) -> SequencerResult {
    SequencerResult::Unchanged {
        reason: NoOpReason::UnknownSale(sale_id),
    }
}

fn unknown_salesperson(id: &SalespersonId) -> SequencerResult {
    SequencerResult::Unchanged {
        reason: NoOpReason::UnknownSalesperson(id.clone()),
    }
}

/// Cloneable submission handle.
#[derive(Debug, Clone)]
pub struct SequencerClient {
    command_tx: mpsc::Sender<CommandEnvelope>,
}

impl SequencerClient {
    /// Submits a command to the sequencer.
    ///
    /// Returns a receipt containing the assigned sequence number and result.
    ///
    /// # Arguments
    ///
    /// * `command` - The command to execute
    ///
    /// # Errors
    ///
    /// Returns an error if the sequencer has been shut down.
    pub async fn submit(&self, command: QueueCommand) -> Result<SequencerReceipt, SequencerError> {
        let (tx, rx) = oneshot::channel();
        self.command_tx
            .send((command, tx))
            .await
            .map_err(|_| SequencerError::Shutdown)?;
        rx.await.map_err(|_| SequencerError::Shutdown)
    }

    /// Submits [`QueueCommand::RegisterSale`].
    ///
    /// # Errors
    ///
    /// Returns an error if the sequencer has been shut down.
    pub async fn register_sale(
        &self,
        salesperson_id: SalespersonId,
        at: Timestamp,
    ) -> Result<SequencerReceipt, SequencerError> {
        self.submit(QueueCommand::RegisterSale { salesperson_id, at })
            .await
    }

    /// Submits [`QueueCommand::DeleteSale`].
    ///
    /// # Errors
    ///
    /// Returns an error if the sequencer has been shut down.
    pub async fn delete_sale(&self, sale_id: SaleId) -> Result<SequencerReceipt, SequencerError> {
        self.submit(QueueCommand::DeleteSale { sale_id }).await
    }

    /// Submits [`QueueCommand::Reorder`].
    ///
    /// # Errors
    ///
    /// Returns an error if the sequencer has been shut down.
    pub async fn reorder(
        &self,
        sale_id: SaleId,
        new_index: i64,
        at: Timestamp,
    ) -> Result<SequencerReceipt, SequencerError> {
        self.submit(QueueCommand::Reorder {
            sale_id,
            new_index,
            at,
        })
        .await
    }

    /// Submits [`QueueCommand::ClearAll`].
    ///
    /// # Errors
    ///
    /// Returns an error if the sequencer has been shut down.
    pub async fn clear_all(&self) -> Result<SequencerReceipt, SequencerError> {
        self.submit(QueueCommand::ClearAll).await
    }
}

/// Cloneable read handle on the sequenced engine.
///
/// Reads take the shared lock and never observe a half-applied mutation.
#[derive(Debug, Clone)]
pub struct QueueReader {
    engine: Arc<RwLock<QueueEngine>>,
}

impl QueueReader {
    /// Runs `f` against the engine under the read lock.
    pub async fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&QueueEngine) -> T,
    {
        let engine = self.engine.read().await;
        f(&engine)
    }

    /// Raw serving order.
    pub async fn queue(&self) -> Vec<QueueEntry> {
        self.read(QueueEngine::queue).await
    }

    /// Serving order narrowed by `roster` as of `now`.
    pub async fn filtered_queue<R: RosterLookup + ?Sized>(
        &self,
        now: Timestamp,
        roster: &R,
        limit: Option<usize>,
    ) -> Vec<QueueEntry> {
        self.read(|engine| engine.filtered_queue(now, roster, limit))
            .await
    }

    /// A salesperson's sales, most recently modified first.
    pub async fn recent_sales(&self, salesperson_id: &SalespersonId, limit: usize) -> Vec<Sale> {
        self.read(|engine| engine.recent_sales(salesperson_id, limit))
            .await
    }

    /// Sales within `scope`, newest first.
    pub async fn sales_history(&self, scope: &HistoryScope, limit: usize) -> Vec<Sale> {
        self.read(|engine| engine.sales_history(scope, limit)).await
    }

    /// Captures a persistence snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the snapshot cannot be encoded.
    pub async fn snapshot(&self) -> Result<QueueSnapshot, PersistenceError> {
        self.read(QueueEngine::snapshot).await
    }
}

/// Handle to a spawned sequencer task.
pub struct SequencerHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl SequencerHandle {
    /// Waits for the sequencer to shut down.
    pub async fn wait(self) -> Result<(), tokio::task::JoinError> {
        self.handle.await
    }

    /// Stops the event loop without waiting for clients to drop.
    ///
    /// Commands submitted afterwards fail with [`SequencerError::Shutdown`].
    pub fn abort(&self) {
        self.handle.abort();
    }
}

/// Errors that can occur when interacting with the Sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequencerError {
    /// The sequencer has been shut down.
    #[error("sequencer has been shut down")]
    Shutdown,
}

/// Returns the current time in nanoseconds since the Unix epoch.
#[inline]
fn nanos_since_epoch() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
