//! Order and status fixtures.

use rust_decimal_macros::dec;

use crate::{Order, OrderDraft, OrderId, OrderStatusId, OrderStatusOption};

/// A persisted USD 19.99 order paying with `method`.
pub fn order_fixture(id: u64, method: &str) -> Order {
    draft_fixture(method).into_order(OrderId::new(id))
}

/// A USD 19.99 order draft paying with `method`, not yet persisted.
pub fn draft_fixture(method: &str) -> OrderDraft {
    OrderDraft {
        currency: "USD".to_string(),
        total: dec!(19.99),
        total_formatted: "19.99".to_string(),
        payment_method: method.into(),
        status: OrderStatusId::processing(),
    }
}

/// A status set resembling a typical installation, including a numeric id
/// the way some hosts number their statuses.
pub fn standard_statuses() -> Vec<OrderStatusOption> {
    vec![
        OrderStatusOption::new(OrderStatusId::AWAITING_PAYMENT, "Awaiting payment"),
        OrderStatusOption::new(OrderStatusId::PROCESSING, "Processing"),
        OrderStatusOption::new("canceled", "Canceled"),
        OrderStatusOption::new("5", "Complete"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_fixture_shape() {
        let order = order_fixture(42, "twocheckout");
        assert_eq!(order.order_id, OrderId::new(42));
        assert_eq!(order.total_formatted, "19.99");
        assert!(order.uses_payment_method("twocheckout"));
    }

    #[test]
    fn test_standard_statuses_name_the_numeric_id() {
        let statuses = standard_statuses();
        let complete = statuses.iter().find(|s| s.id.as_str() == "5").unwrap();
        assert_eq!(complete.name, "Complete");
    }
}
