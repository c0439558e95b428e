//! Test utilities for checkout testing.
//!
//! This module provides the pieces module tests keep rebuilding:
//! - A scriptable mock gateway with per-call recording
//! - Order and status fixtures
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cartkit_lib::test_utils::{order_fixture, MockGateway};
//! use cartkit_lib::{GatewayRegistry, PurchaseResponse};
//!
//! let gateway = MockGateway::named("twocheckout");
//! gateway.enqueue_purchase(PurchaseResponse::redirect("https://pay.example/x"));
//!
//! let registry = GatewayRegistry::new();
//! registry.register(Box::new(gateway.clone()));
//!
//! // ... drive the checkout, then:
//! assert_eq!(gateway.purchase_calls(), 1);
//! ```

mod fixtures;
mod gateway;

pub use fixtures::{draft_fixture, order_fixture, standard_statuses};
pub use gateway::{GatewayCall, MockGateway};
