//! Error types shared across the Cartkit contracts.

use crate::gateway::GatewayCapability;
use crate::OrderId;

/// Errors produced while resolving or calling a payment gateway.
///
/// Gateway *declines* are not errors: a gateway that answers but refuses the
/// purchase reports that through [`crate::PurchaseResponse`]. This enum covers
/// the cases where no usable response exists.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// No gateway is registered under the requested name.
    #[error("payment gateway not registered: {0}")]
    NotRegistered(String),

    /// The registered gateway does not implement a required operation.
    #[error("gateway '{gateway}' does not support {capability}")]
    Unsupported {
        gateway: String,
        capability: GatewayCapability,
    },

    /// The gateway could not be reached or returned garbage.
    #[error("gateway transport error: {0}")]
    Transport(String),
}

/// Errors surfaced by host ports and module hooks.
#[derive(thiserror::Error, Debug)]
pub enum CartkitError {
    /// A host store failed (database down, lock poisoned, and so on).
    #[error("storage error: {0}")]
    Storage(String),

    /// The referenced order does not exist.
    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    /// The acting user lacks a required permission.
    #[error("access denied: missing permission '{permission}'")]
    AccessDenied { permission: String },

    /// No module is registered under the requested name.
    #[error("module not registered: {0}")]
    ModuleNotRegistered(String),

    /// A settings value could not be read or written.
    #[error("settings error: {0}")]
    Settings(String),

    /// Serializing or deserializing a stored value failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A gateway could not be resolved or reached.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl From<serde_json::Error> for CartkitError {
    fn from(e: serde_json::Error) -> Self {
        CartkitError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_display() {
        let err = GatewayError::NotRegistered("twocheckout".to_string());
        assert_eq!(err.to_string(), "payment gateway not registered: twocheckout");

        let err = GatewayError::Unsupported {
            gateway: "twocheckout".to_string(),
            capability: GatewayCapability::CompletePurchase,
        };
        assert!(err.to_string().contains("twocheckout"));
        assert!(err.to_string().contains("complete-purchase"));
    }

    #[test]
    fn test_access_denied_names_permission() {
        let err = CartkitError::AccessDenied {
            permission: "module_edit".to_string(),
        };
        assert!(err.to_string().contains("module_edit"));
    }

    #[test]
    fn test_gateway_error_converts() {
        let err: CartkitError = GatewayError::Transport("timeout".to_string()).into();
        assert!(matches!(err, CartkitError::Gateway(_)));
    }
}
