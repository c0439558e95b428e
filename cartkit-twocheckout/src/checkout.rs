//! The hosted payment flow on the order-complete page.
//!
//! The page serves two legs of the same purchase. On the pay leg the
//! shopper posts the pay form and is redirected to 2Checkout's hosted
//! payment page. On the return leg 2Checkout sends the shopper back to the
//! same page with a `paid` marker in the query string, and the module
//! confirms the payment with the gateway before settling the order.
//!
//! Settling is the only place the module writes to the host: one status
//! update to the configured success status, then one ledger append. The
//! ledger append is skipped when the gateway's transaction reference has
//! been recorded before, so a re-visited return URL cannot double-book a
//! payment.

use cartkit_lib::{
    CartLine, CartkitError, CheckoutAction, Order, PageRequest, PurchaseRequest, PurchaseResponse,
    Result, Transaction,
};

use crate::settings::TwocheckoutSettings;
use crate::Twocheckout;

impl Twocheckout {
    /// Entry point for order-complete page renders.
    ///
    /// Returns `None` for orders paid with another method and for plain
    /// renders of the page, letting the host display it normally.
    pub(crate) async fn handle_complete_page(
        &self,
        order: &Order,
        request: &PageRequest,
    ) -> Result<Option<CheckoutAction>> {
        if !order.uses_payment_method(Self::METHOD_ID) {
            return Ok(None);
        }
        if request.is_posted(Self::PAY_ACTION) {
            return self.submit_payment(order).await.map(Some);
        }
        if request.has_query(Self::PAID_QUERY) {
            return self.complete_payment(order).await.map(Some);
        }
        Ok(None)
    }

    /// Pay leg: start the purchase with the gateway.
    async fn submit_payment(&self, order: &Order) -> Result<CheckoutAction> {
        // 1. Fresh settings and a capable gateway for this request.
        let settings = self.load_settings().await?;
        let gateway = self.gateway()?;

        // 2. Start the purchase.
        let config = settings.gateway_config(&order.currency);
        let request = self.purchase_request(order);
        tracing::debug!(
            order = %order.order_id,
            test_mode = config.test_mode,
            "starting hosted purchase"
        );
        let response = match gateway.purchase(&config, &request).await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(order = %order.order_id, %error, "purchase call failed");
                return Ok(Self::payment_error(error.to_string()));
            }
        };

        // 3. Off-site redirect is the normal hosted outcome.
        if let Some(url) = response.redirect_url() {
            tracing::info!(order = %order.order_id, "redirecting shopper to gateway");
            return Ok(CheckoutAction::redirect(url));
        }

        // 4. Declined without a redirect.
        if !response.is_successful() {
            tracing::warn!(
                order = %order.order_id,
                message = response.message().unwrap_or_default(),
                "purchase declined"
            );
            return Ok(Self::payment_error(
                response.message().unwrap_or_default(),
            ));
        }

        // 5. Some configurations confirm immediately; settle right away.
        self.settle(order, &settings, &response).await
    }

    /// Return leg: confirm the purchase after the shopper comes back from
    /// the hosted page.
    async fn complete_payment(&self, order: &Order) -> Result<CheckoutAction> {
        let settings = self.load_settings().await?;
        let gateway = self.gateway()?;

        let config = settings.gateway_config(&order.currency);
        let request = self.purchase_request(order);
        tracing::debug!(order = %order.order_id, "confirming hosted purchase");
        let response = match gateway.complete_purchase(&config, &request).await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(order = %order.order_id, %error, "completion call failed");
                return Ok(Self::payment_error(error.to_string()));
            }
        };

        self.process_response(order, &settings, &response).await
    }

    /// Turn a completion verdict into exactly one action.
    async fn process_response(
        &self,
        order: &Order,
        settings: &TwocheckoutSettings,
        response: &PurchaseResponse,
    ) -> Result<CheckoutAction> {
        if response.is_successful() {
            return self.settle(order, settings, response).await;
        }
        if let Some(url) = response.redirect_url() {
            return Ok(CheckoutAction::redirect(url));
        }
        tracing::warn!(
            order = %order.order_id,
            message = response.message().unwrap_or_default(),
            "completion declined"
        );
        Ok(Self::payment_error(response.message().unwrap_or_default()))
    }

    /// Settle a confirmed payment: status update, ledger entry, thank-you
    /// notice.
    async fn settle(
        &self,
        order: &Order,
        settings: &TwocheckoutSettings,
        response: &PurchaseResponse,
    ) -> Result<CheckoutAction> {
        // 1. Move the order to the configured success status.
        self.orders
            .set_status(order.order_id, settings.order_status_success.clone())
            .await?;

        // 2. Re-read so the ledger entry reflects the stored order.
        let order = self
            .orders
            .get(order.order_id)
            .await?
            .ok_or(CartkitError::OrderNotFound(order.order_id))?;

        // 3. Record the payment, unless this reference is already on the
        //    ledger (a re-visited return URL must not double-book).
        let reference = response.transaction_reference();
        let already_recorded = match reference {
            Some(reference) => self
                .ledger
                .find_by_gateway_reference(reference)
                .await?
                .is_some(),
            None => false,
        };
        if already_recorded {
            tracing::debug!(
                order = %order.order_id,
                reference = reference.unwrap_or_default(),
                "transaction already recorded, skipping"
            );
        } else {
            let transaction = Transaction::for_order(&order, reference.unwrap_or_default());
            self.ledger.append(transaction).await?;
            tracing::info!(
                order = %order.order_id,
                reference = reference.unwrap_or_default(),
                "payment recorded"
            );
        }

        // 4. Send the shopper to the storefront with the confirmation.
        let status_name = self.status_name(&order).await?;
        Ok(CheckoutAction::success(
            "/",
            format!(
                "Thank you! Payment has been made. Order #{}, status: {}",
                order.order_id, status_name
            ),
        ))
    }

    /// Resolve the display name of the order's status, falling back to the
    /// raw id for statuses the installation does not name.
    async fn status_name(&self, order: &Order) -> Result<String> {
        let statuses = self.orders.statuses().await?;
        Ok(statuses
            .into_iter()
            .find(|option| option.id == order.status)
            .map(|option| option.name)
            .unwrap_or_else(|| order.status.to_string()))
    }

    /// Purchase parameters for either gateway call.
    ///
    /// Both legs send the same request: totals as the host-formatted
    /// display string, return and cancel URLs pointing back at this order's
    /// complete page, and a one-line cart standing in for the whole order.
    fn purchase_request(&self, order: &Order) -> PurchaseRequest {
        let complete_path = format!("checkout/complete/{}", order.order_id);
        PurchaseRequest {
            currency: order.currency.clone(),
            total: order.total_formatted.clone(),
            cancel_url: self
                .urls
                .absolute(&complete_path, &[(Self::CANCEL_QUERY, "true")]),
            return_url: self
                .urls
                .absolute(&complete_path, &[(Self::PAID_QUERY, "true")]),
            cart: vec![CartLine::product(
                order.total_formatted.clone(),
                format!("Order #{}", order.order_id),
            )],
        }
    }

    /// Stay on the current page and flash the gateway's message.
    fn payment_error(message: impl Into<String>) -> CheckoutAction {
        CheckoutAction::warning("", message)
    }
}
