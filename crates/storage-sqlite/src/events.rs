//! Change notifications emitted after committed store mutations.
//!
//! Frontends subscribe here instead of re-reading tables on a timer. Every
//! writing repository notifies once per committed mutation; subscribers use
//! the event only as a cue to re-read. Events fire after the storage
//! transaction commits; a lagging subscriber misses events rather than
//! blocking the writer.

use tokio::sync::broadcast;

/// The table a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Companies,
    Users,
    Treasuries,
    ExchangeRates,
    Merchants,
    MerchantEntries,
    EWallets,
    Transactions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Created,
    Updated,
    Deleted,
}

/// What changed. `id` is the primary key of the affected row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    pub collection: Collection,
    pub kind: MutationKind,
    pub id: String,
}

impl StoreEvent {
    pub fn new(collection: Collection, kind: MutationKind, id: impl Into<String>) -> Self {
        Self {
            collection,
            kind,
            id: id.into(),
        }
    }
}

/// Broadcast fan-out for store events. Cheap to clone.
#[derive(Clone)]
pub struct StoreNotifier {
    tx: broadcast::Sender<StoreEvent>,
}

impl Default for StoreNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Fire-and-forget: with no subscribers the event is simply dropped.
    pub fn notify(&self, event: StoreEvent) {
        let _ = self.tx.send(event);
    }
}
