//! In-memory host adapters.
//!
//! Reference implementations of the host ports, backed by process memory.
//! They power the demo binary and the integration tests; a production host
//! would implement the same traits over its database and session layer.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::RwLock;

use serde_json::Value;

use crate::storage::{AccessControl, OrderStore, SettingsStore, TransactionLedger, UrlBuilder};
use crate::{
    CartkitError, Order, OrderDraft, OrderId, OrderStatusId, OrderStatusOption, Result,
    Transaction, TransactionId,
};

fn poisoned(e: impl std::fmt::Display) -> CartkitError {
    CartkitError::Storage(format!("lock poisoned: {}", e))
}

/// In-memory order store with sequential id assignment.
///
/// Tracks how many status updates it has served, which integration tests
/// use to assert "exactly one update" properties.
pub struct MemoryOrderStore {
    orders: RwLock<HashMap<u64, Order>>,
    statuses: RwLock<Vec<OrderStatusOption>>,
    next_id: AtomicU64,
    status_updates: AtomicUsize,
}

impl MemoryOrderStore {
    /// Creates an empty store with no named statuses.
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
            statuses: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            status_updates: AtomicUsize::new(0),
        }
    }

    /// Creates a store whose installation defines the given statuses.
    pub fn with_statuses(statuses: Vec<OrderStatusOption>) -> Self {
        let store = Self::new();
        *store.statuses.write().unwrap_or_else(|e| e.into_inner()) = statuses;
        store
    }

    /// Seed an order under its own id, keeping id assignment ahead of it.
    pub fn insert(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        let id = order.order_id.value();
        self.next_id.fetch_max(id + 1, Ordering::SeqCst);
        orders.insert(id, order);
        Ok(())
    }

    /// Number of status updates served since creation.
    pub fn status_update_count(&self) -> usize {
        self.status_updates.load(Ordering::SeqCst)
    }
}

impl Default for MemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create(&self, draft: OrderDraft) -> Result<Order> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let order = draft.into_order(OrderId::new(id));
        let mut orders = self.orders.write().map_err(poisoned)?;
        orders.insert(id, order.clone());
        Ok(order)
    }

    async fn get(&self, order_id: OrderId) -> Result<Option<Order>> {
        let orders = self.orders.read().map_err(poisoned)?;
        Ok(orders.get(&order_id.value()).cloned())
    }

    async fn set_status(&self, order_id: OrderId, status: OrderStatusId) -> Result<()> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        let order = orders
            .get_mut(&order_id.value())
            .ok_or(CartkitError::OrderNotFound(order_id))?;
        order.status = status;
        self.status_updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn statuses(&self) -> Result<Vec<OrderStatusOption>> {
        let statuses = self.statuses.read().map_err(poisoned)?;
        Ok(statuses.clone())
    }
}

/// In-memory append-only transaction ledger.
pub struct MemoryLedger {
    entries: RwLock<Vec<(TransactionId, Transaction)>>,
    next_id: AtomicU64,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of entries appended so far.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Returns true if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TransactionLedger for MemoryLedger {
    async fn append(&self, transaction: Transaction) -> Result<TransactionId> {
        let id = TransactionId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.push((id, transaction));
        Ok(id)
    }

    async fn find_by_gateway_reference(&self, reference: &str) -> Result<Option<Transaction>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries
            .iter()
            .find(|(_, t)| t.gateway_transaction_id == reference)
            .map(|(_, t)| t.clone()))
    }

    async fn list(&self) -> Result<Vec<Transaction>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.iter().map(|(_, t)| t.clone()).collect())
    }
}

/// In-memory namespaced settings store.
pub struct MemorySettings {
    values: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemorySettings {
    /// Creates an empty settings store.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemorySettings {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SettingsStore for MemorySettings {
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>> {
        let values = self.values.read().map_err(poisoned)?;
        Ok(values.get(namespace).and_then(|ns| ns.get(key)).cloned())
    }

    async fn set(&self, namespace: &str, key: &str, value: Value) -> Result<()> {
        let mut values = self.values.write().map_err(poisoned)?;
        values
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn all(&self, namespace: &str) -> Result<BTreeMap<String, Value>> {
        let values = self.values.read().map_err(poisoned)?;
        Ok(values.get(namespace).cloned().unwrap_or_default())
    }
}

/// Access control with a fixed permission set, for demos and tests.
pub struct StaticAccess {
    granted: HashSet<String>,
    allow_all: bool,
}

impl StaticAccess {
    /// Grants every permission.
    pub fn allow_all() -> Self {
        Self {
            granted: HashSet::new(),
            allow_all: true,
        }
    }

    /// Grants no permission at all.
    pub fn none() -> Self {
        Self {
            granted: HashSet::new(),
            allow_all: false,
        }
    }

    /// Grants exactly the listed permissions.
    pub fn with_permissions<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            granted: permissions.into_iter().map(Into::into).collect(),
            allow_all: false,
        }
    }
}

impl AccessControl for StaticAccess {
    fn ensure(&self, permission: &str) -> Result<()> {
        if self.allow_all || self.granted.contains(permission) {
            Ok(())
        } else {
            Err(CartkitError::AccessDenied {
                permission: permission.to_string(),
            })
        }
    }
}

/// URL builder rooted at a fixed storefront base URL.
pub struct BaseUrls {
    base: String,
}

impl BaseUrls {
    /// Creates a builder for the given base, e.g. `https://shop.example`.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }
}

impl UrlBuilder for BaseUrls {
    fn absolute(&self, path: &str, query: &[(&str, &str)]) -> String {
        let path = path.trim_start_matches('/');
        let mut url = format!("{}/{}", self.base, path);
        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }
}
