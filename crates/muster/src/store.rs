//! An in-memory item store for exercising specifications in tests.
//!
//! [`InMemoryStore`] keeps heterogeneous items keyed by their concrete type
//! and a caller-supplied identity. It is a test double: fast, deterministic,
//! and free of I/O, suitable wherever production code would talk to a real
//! data store behind the [`Persister`] trait.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{MusterError, Result};

/// The identity half of a store key.
///
/// Identities compare by value, so an item stored under `Identity::Int(3)`
/// is retrievable with any key that converts to the same variant and value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    Int(i64),
    Str(String),
}

impl From<i64> for Identity {
    fn from(value: i64) -> Self {
        Identity::Int(value)
    }
}

impl From<i32> for Identity {
    fn from(value: i32) -> Self {
        Identity::Int(value as i64)
    }
}

impl From<u32> for Identity {
    fn from(value: u32) -> Self {
        Identity::Int(value as i64)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Identity::Str(value.to_owned())
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Identity::Str(value)
    }
}

/// A single stored item together with its key metadata.
pub struct StoredItem {
    type_id: TypeId,
    type_name: &'static str,
    identity: Identity,
    item: Box<dyn Any + Send + Sync>,
}

impl StoredItem {
    fn new<T: Any + Send + Sync>(identity: Identity, item: T) -> Self {
        StoredItem {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            identity,
            item: Box::new(item),
        }
    }

    /// The concrete type the item was stored as.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The identity the item was stored under.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Downcasts the item, if it was stored as `T`.
    pub fn downcast<T: Any>(&self) -> Option<&T> {
        self.item.downcast_ref::<T>()
    }
}

impl std::fmt::Debug for StoredItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredItem")
            .field("type", &self.type_name)
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// An in-memory collection of items keyed by `(type, identity)`.
///
/// Lookups match on the exact stored type: an item added as `Employee` is
/// not found when queried as a different type, even a related one.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    items: HashMap<(TypeId, Identity), StoredItem>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item under the given identity.
    ///
    /// If an item of the same type already exists under that identity the
    /// store is unchanged and the existing item wins.
    pub fn add<T, I>(&mut self, identity: I, item: T) -> &mut Self
    where
        T: Any + Send + Sync,
        I: Into<Identity>,
    {
        let identity = identity.into();
        let key = (TypeId::of::<T>(), identity.clone());
        self.items
            .entry(key)
            .or_insert_with(|| StoredItem::new(identity, item));
        self
    }

    /// Adds every `(identity, item)` pair, with the same first-wins rule.
    pub fn add_all<T, I>(&mut self, pairs: impl IntoIterator<Item = (I, T)>) -> &mut Self
    where
        T: Any + Send + Sync,
        I: Into<Identity>,
    {
        for (identity, item) in pairs {
            self.add(identity, item);
        }
        self
    }

    /// Looks up an item of type `T` by identity.
    pub fn get<T, I>(&self, identity: I) -> Option<&T>
    where
        T: Any,
        I: Into<Identity>,
    {
        let key = (TypeId::of::<T>(), identity.into());
        self.items.get(&key).and_then(StoredItem::downcast)
    }

    /// All stored items of type `T`, in no particular order.
    pub fn query<T: Any>(&self) -> impl Iterator<Item = &T> {
        let type_id = TypeId::of::<T>();
        self.items
            .values()
            .filter(move |stored| stored.type_id == type_id)
            .filter_map(StoredItem::downcast)
    }

    /// Removes the item of type `T` stored under the given identity.
    ///
    /// Returns `true` if an item was removed.
    pub fn delete<T, I>(&mut self, identity: I) -> bool
    where
        T: Any,
        I: Into<Identity>,
    {
        let key = (TypeId::of::<T>(), identity.into());
        self.items.remove(&key).is_some()
    }

    /// Every stored item with its key metadata, in no particular order.
    pub fn contents(&self) -> impl Iterator<Item = &StoredItem> {
        self.items.values()
    }

    /// The number of stored items, across all types.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Shared end-state flags, kept behind an `Arc` so an outcome handle can
/// outlive the transaction itself.
#[derive(Debug, Default)]
struct TransactionState {
    committed: AtomicBool,
    rolled_back: AtomicBool,
}

impl TransactionState {
    fn finalized(&self) -> bool {
        self.committed.load(Ordering::Relaxed) || self.rolled_back.load(Ordering::Relaxed)
    }
}

/// A read-only view of how a [`NoOpTransaction`] ended.
///
/// Remains valid after the transaction drops, so a test can hand the
/// transaction into the code under test and assert on its fate afterwards.
#[derive(Debug, Clone)]
pub struct TransactionOutcome {
    state: Arc<TransactionState>,
}

impl TransactionOutcome {
    /// Whether the transaction was committed.
    pub fn committed(&self) -> bool {
        self.state.committed.load(Ordering::Relaxed)
    }

    /// Whether the transaction was rolled back, explicitly or by drop.
    pub fn rolled_back(&self) -> bool {
        self.state.rolled_back.load(Ordering::Relaxed)
    }
}

/// A no-operation transaction double.
///
/// Commit and rollback touch no data; the double only records which one
/// happened, for later inspection. A transaction finalizes exactly once —
/// a second commit or rollback is rejected — and dropping an unfinalized
/// transaction records a quiet rollback.
#[derive(Debug, Default)]
pub struct NoOpTransaction {
    state: Arc<TransactionState>,
    error_on_rollback: bool,
}

impl NoOpTransaction {
    /// Creates an open transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transaction whose explicit rollback also reports an error,
    /// for exercising rollback-failure handling in the code under test.
    pub fn erroring_on_rollback() -> Self {
        NoOpTransaction {
            state: Arc::default(),
            error_on_rollback: true,
        }
    }

    /// A handle for inspecting the end state, valid after this value drops.
    pub fn outcome(&self) -> TransactionOutcome {
        TransactionOutcome {
            state: Arc::clone(&self.state),
        }
    }

    /// Whether this transaction has been committed.
    pub fn committed(&self) -> bool {
        self.state.committed.load(Ordering::Relaxed)
    }

    /// Whether this transaction has been rolled back.
    pub fn rolled_back(&self) -> bool {
        self.state.rolled_back.load(Ordering::Relaxed)
    }

    /// Marks the transaction committed.
    ///
    /// Fails with [`MusterError::TransactionFinalized`] if it was already
    /// committed or rolled back.
    pub fn commit(&mut self) -> Result<()> {
        if self.state.finalized() {
            return Err(MusterError::TransactionFinalized);
        }
        self.state.committed.store(true, Ordering::Relaxed);
        Ok(())
    }

    /// Marks the transaction rolled back.
    ///
    /// Fails with [`MusterError::TransactionFinalized`] if it was already
    /// committed or rolled back. A transaction created with
    /// [`erroring_on_rollback`](Self::erroring_on_rollback) additionally
    /// reports [`MusterError::TransactionRolledBack`]; the rollback is
    /// still recorded.
    pub fn rollback(&mut self) -> Result<()> {
        if self.state.finalized() {
            return Err(MusterError::TransactionFinalized);
        }
        self.state.rolled_back.store(true, Ordering::Relaxed);
        if self.error_on_rollback {
            return Err(MusterError::TransactionRolledBack);
        }
        Ok(())
    }
}

impl Drop for NoOpTransaction {
    fn drop(&mut self) {
        // Drop has no error channel, so the erroring variant also rolls
        // back quietly here.
        if !self.state.finalized() {
            self.state.rolled_back.store(true, Ordering::Relaxed);
        }
    }
}

/// Write operations against a backing data store.
pub trait Persister {
    /// Makes an item persistent under the given identity.
    fn add<T, I>(&mut self, identity: I, item: T)
    where
        T: Any + Send + Sync,
        I: Into<Identity>;

    /// Records modifications to an already-persistent item.
    fn update<T, I>(&mut self, identity: I, item: T)
    where
        T: Any + Send + Sync,
        I: Into<Identity>;

    /// Removes the item of type `T` stored under the given identity.
    fn delete<T, I>(&mut self, identity: I)
    where
        T: Any,
        I: Into<Identity>;
}

/// A [`Persister`] backed by an [`InMemoryStore`].
#[derive(Debug, Default)]
pub struct InMemoryPersister {
    store: InMemoryStore,
}

impl InMemoryPersister {
    pub fn new() -> Self {
        Self::default()
    }

    /// The backing store, for querying what was persisted.
    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }
}

impl Persister for InMemoryPersister {
    fn add<T, I>(&mut self, identity: I, item: T)
    where
        T: Any + Send + Sync,
        I: Into<Identity>,
    {
        self.store.add(identity, item);
    }

    /// A no-op: items live in memory, so mutations made by the caller are
    /// already visible and there is nothing further to record.
    fn update<T, I>(&mut self, _identity: I, _item: T)
    where
        T: Any + Send + Sync,
        I: Into<Identity>,
    {
    }

    fn delete<T, I>(&mut self, identity: I)
    where
        T: Any,
        I: Into<Identity>,
    {
        self.store.delete::<T, I>(identity);
    }
}
