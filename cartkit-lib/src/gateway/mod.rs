//! Payment gateway capability interface.
//!
//! A gateway is an external client for a hosted payment provider. Modules
//! never talk to provider APIs directly; they resolve a gateway from the
//! [`GatewayRegistry`] and drive it through the two-step hosted flow:
//! `purchase` (may redirect the shopper off-site) and `complete_purchase`
//! (confirms the payment when the shopper returns).
//!
//! Provider specifics such as request signing and the hosted-page wire
//! format live entirely inside gateway implementations.

mod registry;

pub use registry::GatewayRegistry;

use async_trait::async_trait;

use crate::errors::GatewayError;

/// Result alias for gateway resolution and calls.
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Operations a gateway may implement.
///
/// Modules declare which operations they need; the registry turns a missing
/// one into a typed [`GatewayError::Unsupported`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GatewayCapability {
    /// Starting a purchase, possibly via an off-site redirect.
    Purchase,
    /// Confirming a purchase on the shopper's return leg.
    CompletePurchase,
}

impl std::fmt::Display for GatewayCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayCapability::Purchase => write!(f, "purchase"),
            GatewayCapability::CompletePurchase => write!(f, "complete-purchase"),
        }
    }
}

/// Per-call gateway configuration.
///
/// Built fresh from module settings for every call; gateways must not cache
/// it between calls.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GatewayConfig {
    /// Run against the provider's demo/sandbox environment.
    pub test_mode: bool,
    /// ISO currency code of the purchase.
    pub currency: String,
    /// Merchant account identifier at the provider.
    pub account_number: String,
    /// Shared secret used by the provider to sign callbacks.
    pub secret_word: String,
}

/// A single line item sent to the gateway's hosted cart.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CartLine {
    /// Line quantity.
    pub quantity: u32,
    /// Provider-side line type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Line price as a display string.
    pub price: String,
    /// Line description shown on the hosted page.
    pub name: String,
}

impl CartLine {
    /// A single product line with quantity 1.
    pub fn product(price: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            quantity: 1,
            kind: "product".to_string(),
            price: price.into(),
            name: name.into(),
        }
    }
}

/// Parameters of a purchase or completion call.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PurchaseRequest {
    /// ISO currency code.
    pub currency: String,
    /// Amount as the host-formatted display string, never recomputed.
    pub total: String,
    /// Absolute URL the provider sends the shopper to on cancel.
    pub cancel_url: String,
    /// Absolute URL the provider sends the shopper to after payment.
    pub return_url: String,
    /// Hosted cart contents.
    pub cart: Vec<CartLine>,
}

/// Verdict of a gateway call.
///
/// Exactly one of three shapes: successful (with an optional transaction
/// reference), redirect-required (with the hosted page URL), or declined
/// (with a provider message). Never persisted; consumed within the request
/// that produced it.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PurchaseResponse {
    successful: bool,
    redirect_url: Option<String>,
    message: Option<String>,
    transaction_reference: Option<String>,
}

impl PurchaseResponse {
    /// A confirmed payment carrying the provider's transaction reference.
    pub fn success(transaction_reference: impl Into<String>) -> Self {
        Self {
            successful: true,
            transaction_reference: Some(transaction_reference.into()),
            ..Self::default()
        }
    }

    /// A confirmed payment for which the provider reported no reference.
    pub fn success_without_reference() -> Self {
        Self {
            successful: true,
            ..Self::default()
        }
    }

    /// The shopper must be redirected to the provider's hosted page.
    pub fn redirect(url: impl Into<String>) -> Self {
        Self {
            redirect_url: Some(url.into()),
            ..Self::default()
        }
    }

    /// A declined or failed call with the provider's message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Whether the provider confirmed the payment.
    pub fn is_successful(&self) -> bool {
        self.successful
    }

    /// Whether the provider requires an off-site redirect.
    pub fn is_redirect(&self) -> bool {
        self.redirect_url.is_some()
    }

    /// The hosted page URL for a redirect verdict.
    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }

    /// The provider's human-readable message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The provider's transaction reference, verbatim.
    pub fn transaction_reference(&self) -> Option<&str> {
        self.transaction_reference.as_deref()
    }
}

/// External payment gateway client.
///
/// Implementations wrap one provider's API. The two calls take the full
/// configuration and request each time; a gateway holds no per-purchase
/// state.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Name this gateway registers under.
    fn name(&self) -> &str;

    /// Whether this gateway implements the given operation.
    fn supports(&self, capability: GatewayCapability) -> bool {
        let _ = capability;
        true
    }

    /// Start a purchase with the provider.
    async fn purchase(
        &self,
        config: &GatewayConfig,
        request: &PurchaseRequest,
    ) -> GatewayResult<PurchaseResponse>;

    /// Confirm a purchase when the shopper returns from the provider.
    async fn complete_purchase(
        &self,
        config: &GatewayConfig,
        request: &PurchaseRequest,
    ) -> GatewayResult<PurchaseResponse>;
}

impl std::fmt::Debug for dyn PaymentGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentGateway")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response() {
        let response = PurchaseResponse::success("TXN-1");
        assert!(response.is_successful());
        assert!(!response.is_redirect());
        assert_eq!(response.transaction_reference(), Some("TXN-1"));
        assert_eq!(response.message(), None);
    }

    #[test]
    fn test_redirect_response() {
        let response = PurchaseResponse::redirect("https://pay.example/x");
        assert!(response.is_redirect());
        assert!(!response.is_successful());
        assert_eq!(response.redirect_url(), Some("https://pay.example/x"));
    }

    #[test]
    fn test_failure_response() {
        let response = PurchaseResponse::failure("card declined");
        assert!(!response.is_successful());
        assert!(!response.is_redirect());
        assert_eq!(response.message(), Some("card declined"));
        assert_eq!(response.transaction_reference(), None);
    }

    #[test]
    fn test_cart_line_product() {
        let line = CartLine::product("19.99", "Order #42");
        assert_eq!(line.quantity, 1);
        assert_eq!(line.kind, "product");
        assert_eq!(line.price, "19.99");
    }

    #[test]
    fn test_cart_line_serializes_kind_as_type() {
        let line = CartLine::product("1.00", "x");
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["type"], "product");
    }

    #[test]
    fn test_capability_display() {
        assert_eq!(GatewayCapability::Purchase.to_string(), "purchase");
        assert_eq!(
            GatewayCapability::CompletePurchase.to_string(),
            "complete-purchase"
        );
    }
}
