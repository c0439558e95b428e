//! CLI command implementations

pub mod checkout;
pub mod enable;
pub mod methods;
pub mod settings;

use std::sync::Arc;

use cartkit_lib::memory::{BaseUrls, MemoryLedger, MemoryOrderStore, MemorySettings, StaticAccess};
use cartkit_lib::{GatewayRegistry, ModuleRegistry, OrderStatusId, OrderStatusOption};
use cartkit_twocheckout::{Twocheckout, TwocheckoutSettings};

use crate::gateway::DemoGateway;

/// The demo storefront: in-memory host adapters wired to the 2Checkout
/// module, rebuilt per invocation.
pub struct DemoHost {
    pub gateways: Arc<GatewayRegistry>,
    pub orders: Arc<MemoryOrderStore>,
    pub ledger: Arc<MemoryLedger>,
    pub settings: Arc<MemorySettings>,
    pub modules: ModuleRegistry,
    pub module: Arc<Twocheckout>,
}

/// Build the demo storefront, optionally with a ready 2Checkout
/// configuration already stored.
pub async fn build_host(configured: bool) -> anyhow::Result<DemoHost> {
    let gateways = Arc::new(GatewayRegistry::new());
    gateways.register(Box::new(DemoGateway::new()));

    let orders = Arc::new(MemoryOrderStore::with_statuses(vec![
        OrderStatusOption::new(OrderStatusId::AWAITING_PAYMENT, "Awaiting payment"),
        OrderStatusOption::new(OrderStatusId::PROCESSING, "Processing"),
        OrderStatusOption::new("complete", "Complete"),
    ]));
    let ledger = Arc::new(MemoryLedger::new());
    let settings = Arc::new(MemorySettings::new());

    if configured {
        TwocheckoutSettings {
            enabled: true,
            test_mode: true,
            order_status_success: "complete".into(),
            account_number: "801234".into(),
            secret_word: "tango".into(),
        }
        .save(settings.as_ref())
        .await?;
    }

    let module = Arc::new(Twocheckout::new(
        gateways.clone(),
        orders.clone(),
        ledger.clone(),
        settings.clone(),
        Arc::new(StaticAccess::allow_all()),
        Arc::new(BaseUrls::new("https://shop.example")),
    ));

    let modules = ModuleRegistry::new();
    modules.register(module.clone());
    tracing::debug!(configured, "demo host wired");

    Ok(DemoHost {
        gateways,
        orders,
        ledger,
        settings,
        modules,
        module,
    })
}
