//! Shared wiring for the integration tests: the module connected to
//! in-memory host adapters and a scripted mock gateway.
//!
//! Each test file declares `mod harness;` and builds a [`Harness`] per
//! test, so no state leaks between tests.

#![allow(dead_code)]

use std::sync::Arc;

use cartkit_lib::memory::{BaseUrls, MemoryLedger, MemoryOrderStore, MemorySettings, StaticAccess};
use cartkit_lib::test_utils::{order_fixture, standard_statuses, MockGateway};
use cartkit_lib::{GatewayRegistry, Order, OrderId, OrderStatusId, OrderStore};
use cartkit_twocheckout::{Twocheckout, TwocheckoutSettings};

/// The module under test plus handles on everything it is wired to.
pub struct Harness {
    pub gateway: MockGateway,
    pub gateways: Arc<GatewayRegistry>,
    pub orders: Arc<MemoryOrderStore>,
    pub ledger: Arc<MemoryLedger>,
    pub settings: Arc<MemorySettings>,
    pub module: Twocheckout,
}

impl Harness {
    /// Module wired to empty stores, a registered capable gateway and an
    /// all-permissions admin.
    pub fn new() -> Self {
        Self::with_access(StaticAccess::allow_all())
    }

    /// Same wiring with a custom permission set.
    pub fn with_access(access: StaticAccess) -> Self {
        let gateway = MockGateway::named(Twocheckout::GATEWAY_NAME);
        let gateways = Arc::new(GatewayRegistry::new());
        gateways.register(Box::new(gateway.clone()));

        let orders = Arc::new(MemoryOrderStore::with_statuses(standard_statuses()));
        let ledger = Arc::new(MemoryLedger::new());
        let settings = Arc::new(MemorySettings::new());

        let module = Twocheckout::new(
            gateways.clone(),
            orders.clone(),
            ledger.clone(),
            settings.clone(),
            Arc::new(access),
            Arc::new(BaseUrls::new("https://shop.example")),
        );

        Self {
            gateway,
            gateways,
            orders,
            ledger,
            settings,
            module,
        }
    }

    /// Store a ready configuration: enabled, sandbox mode, success status
    /// `5`, both credentials present.
    pub async fn configure(&self) {
        TwocheckoutSettings {
            enabled: true,
            test_mode: true,
            order_status_success: "5".into(),
            account_number: "801234".into(),
            secret_word: "hunter2".into(),
        }
        .save(self.settings.as_ref())
        .await
        .unwrap();
    }

    /// Seed a 2Checkout order under the given id, awaiting payment as the
    /// order-create hook leaves it.
    pub fn seed_order(&self, id: u64) -> Order {
        let mut order = order_fixture(id, Twocheckout::METHOD_ID);
        order.status = OrderStatusId::awaiting_payment();
        self.orders.insert(order.clone()).unwrap();
        order
    }

    /// Re-read an order by id.
    pub async fn order(&self, id: u64) -> Order {
        self.orders.get(OrderId::new(id)).await.unwrap().unwrap()
    }
}
