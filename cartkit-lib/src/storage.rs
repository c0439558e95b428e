//! Host ports: persistence, access control and URL construction.
//!
//! These traits are implemented by the host application (e.g., over its
//! database and session layer). Reference in-memory implementations live in
//! [`crate::memory`].

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    Order, OrderDraft, OrderId, OrderStatusId, OrderStatusOption, Result, Transaction,
    TransactionId,
};

/// Trait for reading and updating orders.
///
/// This should be implemented by the host application over its order table.
#[async_trait::async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a draft, assigning the order id.
    async fn create(&self, draft: OrderDraft) -> Result<Order>;

    /// Retrieve an order by id.
    async fn get(&self, order_id: OrderId) -> Result<Option<Order>>;

    /// Update the status of an order.
    async fn set_status(&self, order_id: OrderId, status: OrderStatusId) -> Result<()>;

    /// List the statuses this installation defines, for selection forms and
    /// name lookups.
    async fn statuses(&self) -> Result<Vec<OrderStatusOption>>;
}

/// Trait for the append-only payment transaction ledger.
#[async_trait::async_trait]
pub trait TransactionLedger: Send + Sync {
    /// Append a confirmed payment, returning the assigned id.
    async fn append(&self, transaction: Transaction) -> Result<TransactionId>;

    /// Find an entry by the gateway's transaction reference.
    async fn find_by_gateway_reference(&self, reference: &str) -> Result<Option<Transaction>>;

    /// List all entries in append order.
    async fn list(&self) -> Result<Vec<Transaction>>;
}

/// Trait for the host's namespaced key-value settings store.
///
/// Modules own a namespace each; values are schemaless JSON and typed
/// structs are a module-side concern.
#[async_trait::async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read one value.
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>>;

    /// Write one value.
    async fn set(&self, namespace: &str, key: &str, value: Value) -> Result<()>;

    /// Read every value in a namespace, in key order.
    async fn all(&self, namespace: &str) -> Result<BTreeMap<String, Value>>;

    /// Read one value, falling back to a default.
    async fn get_or(&self, namespace: &str, key: &str, default: Value) -> Result<Value> {
        Ok(self.get(namespace, key).await?.unwrap_or(default))
    }
}

/// Trait for permission checks on the acting user.
pub trait AccessControl: Send + Sync {
    /// Return `Ok` if the acting user holds `permission`, otherwise
    /// [`crate::CartkitError::AccessDenied`].
    fn ensure(&self, permission: &str) -> Result<()>;
}

/// Trait for building absolute storefront URLs.
pub trait UrlBuilder: Send + Sync {
    /// Build an absolute URL for a storefront path with query parameters.
    fn absolute(&self, path: &str, query: &[(&str, &str)]) -> String;
}
