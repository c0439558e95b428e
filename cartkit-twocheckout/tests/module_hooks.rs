//! Tests of the module lifecycle hooks: the checkout listing, order
//! creation, message suppression and the enable/install gateway gate.

mod harness;

use std::sync::Arc;

use cartkit_lib::test_utils::{draft_fixture, MockGateway};
use cartkit_lib::{
    CartkitError, GatewayCapability, GatewayError, GatewayRegistry, ModuleRegistry, PaymentGateway,
    SettingsStore, StoreModule,
};
use cartkit_twocheckout::{Twocheckout, TwocheckoutSettings};
use harness::Harness;
use serde_json::json;

#[tokio::test]
async fn test_listing_entry_shape() {
    let harness = Harness::new();
    harness.configure().await;

    let mut methods = Vec::new();
    harness.module.payment_methods(&mut methods).await.unwrap();

    assert_eq!(methods.len(), 1);
    let entry = &methods[0];
    assert_eq!(entry.id.as_str(), "twocheckout");
    assert_eq!(entry.module, "twocheckout");
    assert_eq!(entry.title, "2 Checkout");
    assert_eq!(entry.image, "image/icon.png");
    assert_eq!(entry.complete_template, "pay");
    assert!(entry.enabled);
}

#[tokio::test]
async fn test_listing_enabled_needs_status_and_both_credentials() {
    for enabled in [false, true] {
        for account in ["", "801234"] {
            for secret in ["", "hunter2"] {
                let harness = Harness::new();
                TwocheckoutSettings {
                    enabled,
                    test_mode: false,
                    order_status_success: "5".into(),
                    account_number: account.to_string(),
                    secret_word: secret.to_string(),
                }
                .save(harness.settings.as_ref())
                .await
                .unwrap();

                let mut methods = Vec::new();
                harness.module.payment_methods(&mut methods).await.unwrap();

                let expected = enabled && !account.is_empty() && !secret.is_empty();
                assert_eq!(
                    methods[0].enabled, expected,
                    "enabled={} account={:?} secret={:?}",
                    enabled, account, secret
                );
            }
        }
    }
}

#[tokio::test]
async fn test_listing_present_even_when_unconfigured() {
    let harness = Harness::new();

    let mut methods = Vec::new();
    harness.module.payment_methods(&mut methods).await.unwrap();

    assert_eq!(methods.len(), 1);
    assert!(!methods[0].enabled);
}

#[tokio::test]
async fn test_enable_requires_registered_gateway() {
    let harness = Harness::new();
    assert!(harness.module.before_enable().await.is_ok());
    assert!(harness.module.before_install().await.is_ok());

    harness.gateways.unregister(Twocheckout::GATEWAY_NAME);
    let error = harness.module.before_enable().await.unwrap_err();
    assert!(matches!(
        error,
        CartkitError::Gateway(GatewayError::NotRegistered(_))
    ));
    assert!(error.to_string().contains("twocheckout"));
}

#[tokio::test]
async fn test_enable_requires_complete_purchase_capability() {
    let harness = Harness::new();

    // Replace the gateway with one that cannot confirm returns.
    harness.gateways.register(Box::new(
        MockGateway::named(Twocheckout::GATEWAY_NAME)
            .without(GatewayCapability::CompletePurchase),
    ));

    let error = harness.module.before_enable().await.unwrap_err();
    match error {
        CartkitError::Gateway(GatewayError::Unsupported {
            gateway,
            capability,
        }) => {
            assert_eq!(gateway, "twocheckout");
            assert_eq!(capability, GatewayCapability::CompletePurchase);
        }
        other => panic!("expected an unsupported-capability error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_enable_through_module_registry() {
    let harness = Harness::new();
    let modules = ModuleRegistry::new();
    modules.register(Arc::new(harness.module));

    assert!(modules.enable("twocheckout").await.is_ok());
    assert!(modules.install("twocheckout").await.is_ok());

    harness.gateways.unregister(Twocheckout::GATEWAY_NAME);
    assert!(modules.enable("twocheckout").await.is_err());
}

#[test]
fn test_draft_forced_to_awaiting_payment() {
    let harness = Harness::new();

    let mut draft = draft_fixture("twocheckout");
    draft.status = "5".into();
    harness.module.before_order_create(&mut draft);
    assert_eq!(draft.status.as_str(), "awaiting-payment");

    let mut other = draft_fixture("cod");
    other.status = "5".into();
    harness.module.before_order_create(&mut other);
    assert_eq!(other.status.as_str(), "5");
}

#[tokio::test]
async fn test_complete_message_suppressed_through_registry() {
    let harness = Harness::new();
    let order = harness.seed_order(42);
    let modules = ModuleRegistry::new();
    modules.register(Arc::new(harness.module));

    let message = modules.complete_message(&order, "Your order has been received");
    assert_eq!(message, "");

    let other = cartkit_lib::test_utils::order_fixture(7, "cod");
    let message = modules.complete_message(&other, "Your order has been received");
    assert_eq!(message, "Your order has been received");
}

#[tokio::test]
async fn test_routes_contributed_to_registry() {
    let harness = Harness::new();
    let modules = ModuleRegistry::new();
    modules.register(Arc::new(harness.module));

    let routes = modules.routes();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].path, "admin/module/settings/twocheckout");
    assert_eq!(routes[0].access, "module_edit");
    assert_eq!(routes[0].handler, "twocheckout/settings");
}

#[tokio::test]
async fn test_registry_resolves_capable_gateway() {
    let registry = GatewayRegistry::new();
    registry.register(Box::new(MockGateway::named("twocheckout")));

    let gateway = registry
        .require(
            "twocheckout",
            &[
                GatewayCapability::Purchase,
                GatewayCapability::CompletePurchase,
            ],
        )
        .unwrap();
    assert_eq!(gateway.name(), "twocheckout");
}

#[tokio::test]
async fn test_methods_hook_reads_settings_per_call() {
    let harness = Harness::new();

    let mut methods = Vec::new();
    harness.module.payment_methods(&mut methods).await.unwrap();
    assert!(!methods[0].enabled);

    harness.configure().await;
    let mut methods = Vec::new();
    harness.module.payment_methods(&mut methods).await.unwrap();
    assert!(methods[0].enabled, "settings changes apply without re-registration");

    // Losing a credential takes the method away again.
    harness
        .settings
        .set("twocheckout", "secretWord", json!(""))
        .await
        .unwrap();
    let mut methods = Vec::new();
    harness.module.payment_methods(&mut methods).await.unwrap();
    assert!(!methods[0].enabled);
}
