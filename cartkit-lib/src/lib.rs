//! Cartkit storefront library.
//!
//! This crate holds the contracts a Cartkit host exposes to its modules and
//! stays stateless itself: persistence, access control and URL construction
//! are injected by the host through trait-based ports.
//!
//! # Features
//!
//! - **Module Hooks**: Fixed-shape lifecycle hook trait with a host-owned
//!   module registry
//! - **Gateway Registry**: Payment gateways resolved by name with typed
//!   capability errors
//! - **Host Ports**: Order store, transaction ledger, namespaced settings,
//!   access control and URL building as injectable traits
//!
//! # Example
//!
//! ```ignore
//! use cartkit_lib::gateway::GatewayRegistry;
//! use cartkit_lib::hooks::ModuleRegistry;
//!
//! // Host wires a gateway and a payment module
//! let gateways = GatewayRegistry::new();
//! gateways.register(Box::new(my_gateway));
//!
//! let modules = ModuleRegistry::new();
//! modules.register(std::sync::Arc::new(my_module));
//!
//! // Checkout renders collect method entries from every module
//! let methods = modules.payment_methods().await?;
//! ```

pub mod checkout;
pub mod errors;
pub mod gateway;
pub mod hooks;
pub mod memory;
pub mod order;
pub mod request;
pub mod storage;
pub mod transaction;

/// Test utilities for checkout testing.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use checkout::{CheckoutAction, Notice, NoticeLevel, PaymentMethodEntry};
pub use errors::{CartkitError, GatewayError};
pub use gateway::{
    CartLine, GatewayCapability, GatewayConfig, GatewayRegistry, PaymentGateway, PurchaseRequest,
    PurchaseResponse,
};
pub use hooks::{ModuleRegistry, RouteDef, StoreModule};
pub use order::{Order, OrderDraft, OrderStatusOption};
pub use request::PageRequest;
pub use storage::{AccessControl, OrderStore, SettingsStore, TransactionLedger, UrlBuilder};
pub use transaction::Transaction;

/// Common result alias for Cartkit operations.
pub type Result<T> = std::result::Result<T, CartkitError>;

/// Identifier of a persisted order, assigned by the order store.
///
/// # Example
///
/// ```
/// use cartkit_lib::OrderId;
///
/// let id = OrderId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct OrderId(pub u64);

impl OrderId {
    /// Create a new OrderId.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the numeric order id.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a payment method offered at checkout.
///
/// # Example
///
/// ```
/// use cartkit_lib::PaymentMethodId;
///
/// // Create from &str
/// let method: PaymentMethodId = "twocheckout".into();
///
/// // Or explicitly
/// let method = PaymentMethodId::new("cod");
///
/// // Access the inner value
/// assert_eq!(method.as_str(), "cod");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PaymentMethodId(pub String);

impl PaymentMethodId {
    /// Create a new PaymentMethodId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the method ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PaymentMethodId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PaymentMethodId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for PaymentMethodId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PaymentMethodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an order status.
///
/// Two statuses are well known to every host; the rest of the status set is
/// host-defined (including purely numeric ids used by some installations).
///
/// # Example
///
/// ```
/// use cartkit_lib::OrderStatusId;
///
/// let status = OrderStatusId::awaiting_payment();
/// assert_eq!(status.as_str(), "awaiting-payment");
///
/// // Host-defined statuses are plain values
/// let custom: OrderStatusId = "5".into();
/// assert_eq!(custom.as_str(), "5");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct OrderStatusId(pub String);

impl OrderStatusId {
    /// Create a new OrderStatusId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the status ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Well-known status for orders whose payment has not been confirmed.
    pub const AWAITING_PAYMENT: &'static str = "awaiting-payment";

    /// Well-known status for orders being prepared.
    pub const PROCESSING: &'static str = "processing";

    /// Create the awaiting-payment status ID.
    pub fn awaiting_payment() -> Self {
        Self::new(Self::AWAITING_PAYMENT)
    }

    /// Create the processing status ID.
    pub fn processing() -> Self {
        Self::new(Self::PROCESSING)
    }
}

impl From<&str> for OrderStatusId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for OrderStatusId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for OrderStatusId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderStatusId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a ledger transaction, assigned on append.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TransactionId(pub u64);

impl TransactionId {
    /// Create a new TransactionId.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the numeric transaction id.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for TransactionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_display() {
        let id = OrderId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(OrderId::from(42), id);
    }

    #[test]
    fn test_payment_method_id_conversions() {
        let from_str: PaymentMethodId = "twocheckout".into();
        let explicit = PaymentMethodId::new("twocheckout");
        assert_eq!(from_str, explicit);
        assert_eq!(from_str.as_str(), "twocheckout");
    }

    #[test]
    fn test_status_id_well_known() {
        assert_eq!(OrderStatusId::awaiting_payment().as_str(), "awaiting-payment");
        assert_eq!(OrderStatusId::processing().as_str(), "processing");
    }

    #[test]
    fn test_status_id_host_defined() {
        let custom = OrderStatusId::new("5");
        assert_eq!(custom.as_str(), "5");
        assert_ne!(custom, OrderStatusId::awaiting_payment());
    }
}
