//! 2Checkout payment module for Cartkit storefronts.
//!
//! [`Twocheckout`] implements the [`StoreModule`] hook surface for the
//! hosted 2Checkout flow:
//!
//! - lists the payment method at checkout, enabled only when the module is
//!   switched on and both gateway credentials are configured
//! - forces freshly created 2Checkout orders into the awaiting-payment
//!   status and suppresses the host's default "order received" message
//! - drives the off-site purchase on the order-complete page: the pay leg
//!   redirects the shopper to the hosted payment page, the return leg
//!   confirms the payment, moves the order to the configured success status
//!   and records the transaction
//! - serves the admin settings form and guards it with the `module_edit`
//!   permission
//!
//! The module holds no mutable state of its own. Everything it touches
//! arrives through the host ports handed to [`Twocheckout::new`], and
//! settings are re-read from the store on every request that uses them, so
//! admin edits take effect immediately.

use std::sync::Arc;

use async_trait::async_trait;

use cartkit_lib::gateway::GatewayResult;
use cartkit_lib::{
    AccessControl, CheckoutAction, GatewayCapability, GatewayRegistry, Order, OrderDraft,
    OrderStatusId, OrderStore, PageRequest, PaymentGateway, PaymentMethodEntry, Result, RouteDef,
    SettingsStore, StoreModule, TransactionLedger, UrlBuilder,
};

mod admin;
mod checkout;
pub mod settings;

pub use admin::{SettingsOutcome, SettingsPage};
pub use settings::TwocheckoutSettings;

/// The 2Checkout storefront module.
///
/// One instance is registered with the host's module registry at startup
/// and serves every request from then on.
pub struct Twocheckout {
    gateways: Arc<GatewayRegistry>,
    orders: Arc<dyn OrderStore>,
    ledger: Arc<dyn TransactionLedger>,
    settings: Arc<dyn SettingsStore>,
    access: Arc<dyn AccessControl>,
    urls: Arc<dyn UrlBuilder>,
}

impl Twocheckout {
    /// Name the module registers under.
    pub const MODULE_NAME: &'static str = "twocheckout";

    /// Payment method identifier carried by orders paid through 2Checkout.
    pub const METHOD_ID: &'static str = "twocheckout";

    /// Name of the gateway this module resolves from the registry.
    pub const GATEWAY_NAME: &'static str = "twocheckout";

    /// Gateway operations the module needs; both are checked before the
    /// module may be installed or enabled.
    pub const REQUIRED_CAPABILITIES: [GatewayCapability; 2] =
        [GatewayCapability::Purchase, GatewayCapability::CompletePurchase];

    /// Method title shown in the checkout listing.
    pub const TITLE: &'static str = "2 Checkout";

    /// Method icon, relative to the module's asset root.
    pub const ICON: &'static str = "image/icon.png";

    /// Template the host binds to the checkout "complete" step.
    pub const COMPLETE_TEMPLATE: &'static str = "pay";

    /// Route of the admin settings form.
    pub const SETTINGS_ROUTE: &'static str = "admin/module/settings/twocheckout";

    /// Handler name the host maps to [`Twocheckout::handle_settings`].
    pub const SETTINGS_HANDLER: &'static str = "twocheckout/settings";

    /// Permission guarding the settings form.
    pub const EDIT_PERMISSION: &'static str = "module_edit";

    /// Posted field that triggers the pay leg on the order-complete page.
    pub const PAY_ACTION: &'static str = "pay";

    /// Query marker on the return URL after a completed hosted payment.
    pub const PAID_QUERY: &'static str = "paid";

    /// Query marker on the cancel URL.
    pub const CANCEL_QUERY: &'static str = "cancel";

    /// Posted field that triggers a settings save.
    pub const SAVE_ACTION: &'static str = "save";

    /// Admin path the settings form redirects to after a save.
    pub const MODULE_LIST_PATH: &'static str = "admin/module/list";

    /// Wires the module to the host's gateway registry and ports.
    pub fn new(
        gateways: Arc<GatewayRegistry>,
        orders: Arc<dyn OrderStore>,
        ledger: Arc<dyn TransactionLedger>,
        settings: Arc<dyn SettingsStore>,
        access: Arc<dyn AccessControl>,
        urls: Arc<dyn UrlBuilder>,
    ) -> Self {
        Self {
            gateways,
            orders,
            ledger,
            settings,
            access,
            urls,
        }
    }

    /// Resolves the 2Checkout gateway, verifying it supports the full
    /// hosted flow.
    pub fn gateway(&self) -> GatewayResult<Arc<dyn PaymentGateway>> {
        self.gateways
            .require(Self::GATEWAY_NAME, &Self::REQUIRED_CAPABILITIES)
    }

    pub(crate) async fn load_settings(&self) -> Result<TwocheckoutSettings> {
        TwocheckoutSettings::load(self.settings.as_ref()).await
    }
}

#[async_trait]
impl StoreModule for Twocheckout {
    fn name(&self) -> &str {
        Self::MODULE_NAME
    }

    fn routes(&self) -> Vec<RouteDef> {
        vec![RouteDef::new(
            Self::SETTINGS_ROUTE,
            Self::EDIT_PERMISSION,
            Self::SETTINGS_HANDLER,
        )]
    }

    /// The module can only be enabled while a capable gateway is
    /// registered; without one the hosted flow would fail mid-checkout.
    async fn before_enable(&self) -> Result<()> {
        self.gateway()?;
        Ok(())
    }

    async fn before_install(&self) -> Result<()> {
        self.gateway()?;
        Ok(())
    }

    async fn payment_methods(&self, methods: &mut Vec<PaymentMethodEntry>) -> Result<()> {
        let settings = self.load_settings().await?;
        methods.push(PaymentMethodEntry {
            id: Self::METHOD_ID.into(),
            module: Self::MODULE_NAME.to_string(),
            title: Self::TITLE.to_string(),
            image: Self::ICON.to_string(),
            enabled: settings.is_ready(),
            complete_template: Self::COMPLETE_TEMPLATE.to_string(),
        });
        Ok(())
    }

    /// A 2Checkout order is not paid at creation time, whatever status the
    /// checkout put on the draft.
    fn before_order_create(&self, draft: &mut OrderDraft) {
        if draft.payment_method.as_str() == Self::METHOD_ID {
            draft.status = OrderStatusId::awaiting_payment();
        }
    }

    /// The order-complete page renders the pay form instead of the host's
    /// confirmation text.
    fn complete_message(&self, order: &Order, message: &mut String) {
        if order.uses_payment_method(Self::METHOD_ID) {
            message.clear();
        }
    }

    async fn order_complete_page(
        &self,
        order: &Order,
        request: &PageRequest,
    ) -> Result<Option<CheckoutAction>> {
        self.handle_complete_page(order, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartkit_lib::memory::{BaseUrls, MemoryLedger, MemoryOrderStore, MemorySettings, StaticAccess};
    use cartkit_lib::test_utils::draft_fixture;

    fn module() -> Twocheckout {
        Twocheckout::new(
            Arc::new(GatewayRegistry::new()),
            Arc::new(MemoryOrderStore::new()),
            Arc::new(MemoryLedger::new()),
            Arc::new(MemorySettings::new()),
            Arc::new(StaticAccess::allow_all()),
            Arc::new(BaseUrls::new("https://shop.example")),
        )
    }

    #[test]
    fn test_module_name_and_routes() {
        let module = module();
        assert_eq!(module.name(), "twocheckout");

        let routes = module.routes();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].path, "admin/module/settings/twocheckout");
        assert_eq!(routes[0].access, "module_edit");
        assert_eq!(routes[0].handler, "twocheckout/settings");
    }

    #[test]
    fn test_order_create_forces_awaiting_payment() {
        let module = module();

        let mut draft = draft_fixture("twocheckout");
        draft.status = OrderStatusId::processing();
        module.before_order_create(&mut draft);
        assert_eq!(draft.status, OrderStatusId::awaiting_payment());
    }

    #[test]
    fn test_order_create_leaves_other_methods_alone() {
        let module = module();

        let mut draft = draft_fixture("cod");
        draft.status = OrderStatusId::processing();
        module.before_order_create(&mut draft);
        assert_eq!(draft.status, OrderStatusId::processing());
    }

    #[test]
    fn test_complete_message_blanked_for_own_orders() {
        use cartkit_lib::test_utils::order_fixture;
        let module = module();

        let mut message = "Thank you for your order".to_string();
        module.complete_message(&order_fixture(1, "twocheckout"), &mut message);
        assert_eq!(message, "");

        let mut message = "Thank you for your order".to_string();
        module.complete_message(&order_fixture(2, "cod"), &mut message);
        assert_eq!(message, "Thank you for your order");
    }
}
