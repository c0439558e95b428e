//! A simulated 2Checkout gateway.
//!
//! Stands in for the real provider client so the demo can walk the whole
//! hosted flow offline: purchases redirect to a made-up hosted page on the
//! sandbox or live host, completions confirm with a generated transaction
//! reference.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use cartkit_lib::gateway::GatewayResult;
use cartkit_lib::{
    GatewayCapability, GatewayConfig, PaymentGateway, PurchaseRequest, PurchaseResponse,
};
use cartkit_twocheckout::Twocheckout;

pub struct DemoGateway {
    references: AtomicU64,
    complete_supported: bool,
}

impl DemoGateway {
    pub fn new() -> Self {
        Self {
            references: AtomicU64::new(1),
            complete_supported: true,
        }
    }

    /// A gateway that cannot confirm return legs, for demonstrating the
    /// enable precondition.
    pub fn without_completion() -> Self {
        Self {
            complete_supported: false,
            ..Self::new()
        }
    }
}

#[async_trait]
impl PaymentGateway for DemoGateway {
    fn name(&self) -> &str {
        Twocheckout::GATEWAY_NAME
    }

    fn supports(&self, capability: GatewayCapability) -> bool {
        match capability {
            GatewayCapability::Purchase => true,
            GatewayCapability::CompletePurchase => self.complete_supported,
        }
    }

    async fn purchase(
        &self,
        config: &GatewayConfig,
        request: &PurchaseRequest,
    ) -> GatewayResult<PurchaseResponse> {
        let host = if config.test_mode {
            "sandbox.2checkout.com"
        } else {
            "www.2checkout.com"
        };
        Ok(PurchaseResponse::redirect(format!(
            "https://{}/checkout/purchase?sid={}&currency_code={}&total={}",
            host, config.account_number, config.currency, request.total
        )))
    }

    async fn complete_purchase(
        &self,
        _config: &GatewayConfig,
        _request: &PurchaseRequest,
    ) -> GatewayResult<PurchaseResponse> {
        let serial = self.references.fetch_add(1, Ordering::SeqCst);
        Ok(PurchaseResponse::success(format!("DEMO-{:04}", serial)))
    }
}
