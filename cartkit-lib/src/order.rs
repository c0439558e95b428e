//! Order snapshot types owned by the host's order store.

use rust_decimal::Decimal;

use crate::{OrderId, OrderStatusId, PaymentMethodId};

/// Snapshot of a persisted order, as read from the order store.
///
/// Modules never mutate an `Order` directly; status changes go through
/// [`crate::OrderStore::set_status`] and become visible on the next read.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Order {
    /// Store-assigned order identifier.
    pub order_id: OrderId,
    /// ISO currency code, e.g. `USD`.
    pub currency: String,
    /// Order total as a decimal amount.
    pub total: Decimal,
    /// Order total as the host-formatted display string, e.g. `19.99`.
    ///
    /// This is the value handed to payment gateways; it is never recomputed
    /// from [`Order::total`].
    pub total_formatted: String,
    /// Identifier of the payment method chosen at checkout.
    pub payment_method: PaymentMethodId,
    /// Current order status.
    pub status: OrderStatusId,
}

impl Order {
    /// Check whether this order is paid with the given payment method.
    pub fn uses_payment_method(&self, method_id: &str) -> bool {
        self.payment_method.as_str() == method_id
    }
}

/// An order being assembled at checkout, not yet persisted.
///
/// Modules may adjust a draft from their pre-create hook; the store assigns
/// the order id when the draft is persisted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrderDraft {
    /// ISO currency code.
    pub currency: String,
    /// Order total as a decimal amount.
    pub total: Decimal,
    /// Host-formatted display total.
    pub total_formatted: String,
    /// Identifier of the chosen payment method.
    pub payment_method: PaymentMethodId,
    /// Status the order will carry when persisted.
    pub status: OrderStatusId,
}

impl OrderDraft {
    /// Materialize the draft into an order with a store-assigned id.
    pub fn into_order(self, order_id: OrderId) -> Order {
        Order {
            order_id,
            currency: self.currency,
            total: self.total,
            total_formatted: self.total_formatted,
            payment_method: self.payment_method,
            status: self.status,
        }
    }
}

/// A selectable order status as presented in administration forms.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OrderStatusOption {
    /// Status identifier.
    pub id: OrderStatusId,
    /// Human-readable status name.
    pub name: String,
}

impl OrderStatusOption {
    /// Create a new status option.
    pub fn new(id: impl Into<OrderStatusId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
