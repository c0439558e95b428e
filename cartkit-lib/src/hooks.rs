//! Module lifecycle hooks and the host-owned module registry.
//!
//! The hook surface is a fixed trait, not a free-form callback table: a
//! module implements the methods it cares about and leaves the rest at
//! their no-op defaults. The host dispatches every hook through
//! [`ModuleRegistry`], in registration order.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::{CartkitError, CheckoutAction, Order, OrderDraft, PageRequest, PaymentMethodEntry, Result};

/// A route contributed by a module to the host's routing table.
///
/// Routes are data; the host maps `handler` to the module entry point when
/// it builds its router.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RouteDef {
    /// Route path, e.g. `admin/module/settings/twocheckout`.
    pub path: String,
    /// Permission required to access the route.
    pub access: String,
    /// Name of the handler the host should invoke.
    pub handler: String,
}

impl RouteDef {
    /// Create a new route definition.
    pub fn new(
        path: impl Into<String>,
        access: impl Into<String>,
        handler: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            access: access.into(),
            handler: handler.into(),
        }
    }
}

/// Lifecycle hooks a storefront module may implement.
///
/// Every method has a no-op default, so a module only implements the hooks
/// it participates in. Hooks receive their inputs explicitly and return
/// values; they never reach into host controller state.
#[async_trait]
pub trait StoreModule: Send + Sync {
    /// Unique name of this module.
    fn name(&self) -> &str;

    /// Routes this module contributes.
    fn routes(&self) -> Vec<RouteDef> {
        Vec::new()
    }

    /// Precondition checked before the host enables this module.
    ///
    /// An error blocks enabling; its rendering is shown to the
    /// administrator.
    async fn before_enable(&self) -> Result<()> {
        Ok(())
    }

    /// Precondition checked before the host installs this module.
    async fn before_install(&self) -> Result<()> {
        Ok(())
    }

    /// Contribute entries to the checkout payment-method listing.
    async fn payment_methods(&self, methods: &mut Vec<PaymentMethodEntry>) -> Result<()> {
        let _ = methods;
        Ok(())
    }

    /// Adjust an order draft before the store persists it.
    fn before_order_create(&self, draft: &mut OrderDraft) {
        let _ = draft;
    }

    /// Rewrite the checkout-complete confirmation message.
    fn complete_message(&self, order: &Order, message: &mut String) {
        let _ = (order, message);
    }

    /// Handle a render of the order-complete page.
    ///
    /// Return an action to short-circuit the render, or `None` to let the
    /// page display normally.
    async fn order_complete_page(
        &self,
        order: &Order,
        request: &PageRequest,
    ) -> Result<Option<CheckoutAction>> {
        let _ = (order, request);
        Ok(None)
    }
}

/// Host-owned registry of storefront modules.
///
/// Dispatch helpers run the corresponding hook across every registered
/// module, in registration order.
pub struct ModuleRegistry {
    modules: RwLock<Vec<Arc<dyn StoreModule>>>,
}

impl ModuleRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            modules: RwLock::new(Vec::new()),
        }
    }

    /// Registers a module.
    ///
    /// A module already registered under the same name is replaced in
    /// place, keeping its dispatch position.
    pub fn register(&self, module: Arc<dyn StoreModule>) {
        let mut modules = self.modules.write().unwrap_or_else(|e| e.into_inner());
        tracing::debug!(module = module.name(), "registering module");
        if let Some(slot) = modules.iter_mut().find(|m| m.name() == module.name()) {
            *slot = module;
        } else {
            modules.push(module);
        }
    }

    /// Gets a module by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn StoreModule>> {
        let modules = self.modules.read().unwrap_or_else(|e| e.into_inner());
        modules.iter().find(|m| m.name() == name).cloned()
    }

    /// Gets a module, returning a typed error if not registered.
    pub fn get_required(&self, name: &str) -> Result<Arc<dyn StoreModule>> {
        self.get(name)
            .ok_or_else(|| CartkitError::ModuleNotRegistered(name.to_string()))
    }

    /// Returns all registered module names, in registration order.
    pub fn list(&self) -> Vec<String> {
        let modules = self.modules.read().unwrap_or_else(|e| e.into_inner());
        modules.iter().map(|m| m.name().to_string()).collect()
    }

    /// Returns the number of registered modules.
    pub fn len(&self) -> usize {
        let modules = self.modules.read().unwrap_or_else(|e| e.into_inner());
        modules.len()
    }

    /// Returns true if no modules are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collects the routes of every module.
    pub fn routes(&self) -> Vec<RouteDef> {
        self.snapshot().iter().flat_map(|m| m.routes()).collect()
    }

    /// Runs a module's enable precondition.
    pub async fn enable(&self, name: &str) -> Result<()> {
        let module = self.get_required(name)?;
        module.before_enable().await?;
        tracing::info!(module = name, "module enabled");
        Ok(())
    }

    /// Runs a module's install precondition.
    pub async fn install(&self, name: &str) -> Result<()> {
        let module = self.get_required(name)?;
        module.before_install().await?;
        tracing::info!(module = name, "module installed");
        Ok(())
    }

    /// Collects payment-method entries from every module.
    pub async fn payment_methods(&self) -> Result<Vec<PaymentMethodEntry>> {
        let mut methods = Vec::new();
        for module in self.snapshot() {
            module.payment_methods(&mut methods).await?;
        }
        Ok(methods)
    }

    /// Lets every module adjust an order draft before persistence.
    pub fn before_order_create(&self, draft: &mut OrderDraft) {
        for module in self.snapshot() {
            module.before_order_create(draft);
        }
    }

    /// Builds the checkout-complete message, letting modules rewrite the
    /// host default.
    pub fn complete_message(&self, order: &Order, default_message: impl Into<String>) -> String {
        let mut message = default_message.into();
        for module in self.snapshot() {
            module.complete_message(order, &mut message);
        }
        message
    }

    /// Dispatches an order-complete page render.
    ///
    /// The first module that returns an action wins; later modules are not
    /// consulted.
    pub async fn order_complete_page(
        &self,
        order: &Order,
        request: &PageRequest,
    ) -> Result<Option<CheckoutAction>> {
        for module in self.snapshot() {
            if let Some(action) = module.order_complete_page(order, request).await? {
                return Ok(Some(action));
            }
        }
        Ok(None)
    }

    // Clone the module list so no lock is held across hook awaits.
    fn snapshot(&self) -> Vec<Arc<dyn StoreModule>> {
        let modules = self.modules.read().unwrap_or_else(|e| e.into_inner());
        modules.clone()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
