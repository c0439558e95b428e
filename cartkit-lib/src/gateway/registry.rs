//! Payment Gateway Registry
//!
//! This module provides a registry for payment gateway clients. A host
//! registers the gateways its deployment offers; modules resolve them by
//! name and declare the capabilities they need.
//!
//! # Thread Safety
//!
//! The registry uses `RwLock` for thread-safe access and recovers the inner
//! map if the lock was poisoned, so lookups cannot panic.

use super::{GatewayCapability, GatewayResult, PaymentGateway};
use crate::errors::GatewayError;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Registry for payment gateway clients.
///
/// Thread-safe and shareable across async tasks.
///
/// # Example
///
/// ```ignore
/// use cartkit_lib::gateway::{GatewayCapability, GatewayRegistry};
///
/// let registry = GatewayRegistry::new();
/// registry.register(Box::new(my_gateway));
///
/// let gateway = registry.require(
///     "twocheckout",
///     &[GatewayCapability::Purchase, GatewayCapability::CompletePurchase],
/// )?;
/// ```
pub struct GatewayRegistry {
    gateways: RwLock<HashMap<String, Arc<dyn PaymentGateway>>>,
}

impl GatewayRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            gateways: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a gateway under its own name.
    ///
    /// A gateway already registered under the same name is replaced.
    pub fn register(&self, gateway: Box<dyn PaymentGateway>) {
        let name = gateway.name().to_string();
        let mut gateways = self.gateways.write().unwrap_or_else(|e| e.into_inner());
        gateways.insert(name, Arc::from(gateway));
    }

    /// Unregisters a gateway.
    ///
    /// Returns the removed gateway if it existed.
    pub fn unregister(&self, name: &str) -> Option<Arc<dyn PaymentGateway>> {
        let mut gateways = self.gateways.write().unwrap_or_else(|e| e.into_inner());
        gateways.remove(name)
    }

    /// Gets a gateway by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn PaymentGateway>> {
        let gateways = self.gateways.read().unwrap_or_else(|e| e.into_inner());
        gateways.get(name).cloned()
    }

    /// Gets a gateway, returning a typed error if not registered.
    pub fn get_required(&self, name: &str) -> GatewayResult<Arc<dyn PaymentGateway>> {
        self.get(name)
            .ok_or_else(|| GatewayError::NotRegistered(name.to_string()))
    }

    /// Resolves a gateway and checks that it supports every listed
    /// capability.
    ///
    /// The first missing capability turns into
    /// [`GatewayError::Unsupported`]; an unknown name turns into
    /// [`GatewayError::NotRegistered`].
    pub fn require(
        &self,
        name: &str,
        capabilities: &[GatewayCapability],
    ) -> GatewayResult<Arc<dyn PaymentGateway>> {
        let gateway = self.get_required(name)?;
        for capability in capabilities {
            if !gateway.supports(*capability) {
                return Err(GatewayError::Unsupported {
                    gateway: name.to_string(),
                    capability: *capability,
                });
            }
        }
        Ok(gateway)
    }

    /// Returns all registered gateway names.
    pub fn list(&self) -> Vec<String> {
        let gateways = self.gateways.read().unwrap_or_else(|e| e.into_inner());
        gateways.keys().cloned().collect()
    }

    /// Returns the number of registered gateways.
    pub fn len(&self) -> usize {
        let gateways = self.gateways.read().unwrap_or_else(|e| e.into_inner());
        gateways.len()
    }

    /// Returns true if no gateways are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for GatewayRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for GatewayRegistry {
    fn clone(&self) -> Self {
        let gateways = self.gateways.read().unwrap_or_else(|e| e.into_inner());
        Self {
            gateways: RwLock::new(gateways.clone()),
        }
    }
}
