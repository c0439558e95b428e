//! Ledger entries recording confirmed payments.

use rust_decimal::Decimal;

use crate::{Order, OrderId, PaymentMethodId};

/// A confirmed payment as recorded in the transaction ledger.
///
/// Entries are immutable once appended; one entry exists per confirmed
/// successful payment. Timestamps and surrogate keys are assigned by the
/// ledger, not carried here.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transaction {
    /// Amount paid, equal to the order total.
    pub total: Decimal,
    /// The order this payment settles.
    pub order_id: OrderId,
    /// ISO currency code of the payment.
    pub currency: String,
    /// Payment method that produced this transaction.
    pub payment_method: PaymentMethodId,
    /// Opaque transaction reference reported by the gateway, verbatim.
    pub gateway_transaction_id: String,
}

impl Transaction {
    /// Build a ledger entry for a confirmed payment of `order`.
    ///
    /// The gateway reference is stored exactly as reported.
    pub fn for_order(order: &Order, gateway_transaction_id: impl Into<String>) -> Self {
        Self {
            total: order.total,
            order_id: order.order_id,
            currency: order.currency.clone(),
            payment_method: order.payment_method.clone(),
            gateway_transaction_id: gateway_transaction_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OrderStatusId, PaymentMethodId};
    use rust_decimal_macros::dec;

    #[test]
    fn test_for_order_copies_order_fields() {
        let order = Order {
            order_id: OrderId::new(42),
            currency: "USD".to_string(),
            total: dec!(19.99),
            total_formatted: "19.99".to_string(),
            payment_method: PaymentMethodId::new("twocheckout"),
            status: OrderStatusId::new("5"),
        };

        let txn = Transaction::for_order(&order, "TXN-1");
        assert_eq!(txn.order_id, OrderId::new(42));
        assert_eq!(txn.total, dec!(19.99));
        assert_eq!(txn.currency, "USD");
        assert_eq!(txn.payment_method.as_str(), "twocheckout");
        assert_eq!(txn.gateway_transaction_id, "TXN-1");
    }
}
