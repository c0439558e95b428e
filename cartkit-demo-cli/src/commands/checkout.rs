//! Checkout command - walk an order through the hosted payment flow

use anyhow::Result;
use cartkit_lib::{
    CheckoutAction, OrderDraft, OrderStatusId, OrderStore, PageRequest, TransactionLedger,
};
use cartkit_twocheckout::Twocheckout;
use rust_decimal::Decimal;
use serde_json::json;

use crate::ui;

pub async fn run(total: &str, currency: &str, _verbose: bool) -> Result<()> {
    let host = super::build_host(true).await?;

    // 1. The shopper sees the method in the checkout listing.
    ui::header("Checkout");
    let methods = host.modules.payment_methods().await?;
    let entry = methods
        .iter()
        .find(|m| m.id.as_str() == Twocheckout::METHOD_ID)
        .ok_or_else(|| anyhow::anyhow!("the 2Checkout module contributed no method entry"))?;
    ui::key_value("Method", &format!("{} ({})", entry.title, entry.id));
    if !entry.enabled {
        ui::warning("Method is not available; configure it with 'settings set' first");
    }

    // 2. Create the order; the module forces it into awaiting-payment.
    let amount: Decimal = total.parse()?;
    let mut draft = OrderDraft {
        currency: currency.to_string(),
        total: amount,
        total_formatted: total.to_string(),
        payment_method: Twocheckout::METHOD_ID.into(),
        status: OrderStatusId::processing(),
    };
    host.modules.before_order_create(&mut draft);
    let order = host.orders.create(draft).await?;
    ui::key_value(
        "Order",
        &format!("#{} ({} {})", order.order_id, order.currency, order.total_formatted),
    );
    ui::key_value("Status", order.status.as_str());

    let message = host
        .modules
        .complete_message(&order, "Your order has been received");
    if message.is_empty() {
        ui::info("Host confirmation text suppressed; the pay form renders instead");
    }

    // 3. Pay leg: the shopper posts the pay form.
    ui::separator();
    let pay = PageRequest::new().with_posted(Twocheckout::PAY_ACTION, json!("1"));
    let action = host.modules.order_complete_page(&order, &pay).await?;
    let hosted_page = match action {
        Some(CheckoutAction::Redirect { url }) => url,
        other => anyhow::bail!("expected a hosted-page redirect, got {:?}", other),
    };
    ui::success("Shopper sent to the hosted payment page");
    ui::key_value("Redirect", &hosted_page);

    // 4. Return leg: the provider sends the shopper back with the paid
    //    marker and the module confirms the payment.
    ui::info("Shopper pays off-site and returns...");
    let paid = PageRequest::new().with_query(Twocheckout::PAID_QUERY, "true");
    let action = host.modules.order_complete_page(&order, &paid).await?;
    match action {
        Some(CheckoutAction::RedirectWithNotice { path, notice }) => {
            ui::success(&notice.message);
            let target = if path == "/" { "storefront root" } else { path.as_str() };
            ui::key_value("Redirect", target);
        }
        other => anyhow::bail!("expected a settlement notice, got {:?}", other),
    }

    // 5. The bookkeeping the settlement left behind.
    ui::separator();
    let settled = host
        .orders
        .get(order.order_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("order #{} vanished", order.order_id))?;
    ui::key_value("Final status", settled.status.as_str());
    for transaction in host.ledger.list().await? {
        ui::key_value(
            &format!("Ledger entry (order #{})", transaction.order_id),
            &format!(
                "{} {} via {}, reference {}",
                transaction.total,
                transaction.currency,
                transaction.payment_method,
                transaction.gateway_transaction_id
            ),
        );
    }

    Ok(())
}
