//! Scriptable mock payment gateway.

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::errors::GatewayError;
use crate::gateway::{
    GatewayCapability, GatewayConfig, GatewayResult, PaymentGateway, PurchaseRequest,
    PurchaseResponse,
};

/// One recorded gateway invocation.
#[derive(Clone, Debug)]
pub struct GatewayCall {
    /// Which operation was invoked.
    pub operation: GatewayCapability,
    /// Configuration the caller passed, as of that request.
    pub config: GatewayConfig,
    /// Request parameters the caller passed.
    pub request: PurchaseRequest,
}

#[derive(Default)]
struct MockState {
    purchase_script: Mutex<VecDeque<GatewayResult<PurchaseResponse>>>,
    complete_script: Mutex<VecDeque<GatewayResult<PurchaseResponse>>>,
    calls: Mutex<Vec<GatewayCall>>,
}

/// Mock gateway with scripted verdicts and call recording.
///
/// Clones share state, so a test can keep one handle for scripting and
/// assertions while the registry owns another. An unscripted call fails
/// with a transport error, which keeps tests honest about what they
/// expect.
#[derive(Clone)]
pub struct MockGateway {
    name: String,
    withheld: HashSet<GatewayCapability>,
    state: Arc<MockState>,
}

impl MockGateway {
    /// Creates a mock registered under `name` supporting every capability.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            withheld: HashSet::new(),
            state: Arc::new(MockState::default()),
        }
    }

    /// Withhold a capability, for testing enable-precondition failures.
    pub fn without(mut self, capability: GatewayCapability) -> Self {
        self.withheld.insert(capability);
        self
    }

    /// Script the next purchase verdict.
    pub fn enqueue_purchase(&self, response: PurchaseResponse) {
        self.lock_purchase().push_back(Ok(response));
    }

    /// Script the next purchase call to fail hard.
    pub fn enqueue_purchase_error(&self, error: GatewayError) {
        self.lock_purchase().push_back(Err(error));
    }

    /// Script the next completion verdict.
    pub fn enqueue_complete(&self, response: PurchaseResponse) {
        self.lock_complete().push_back(Ok(response));
    }

    /// Script the next completion call to fail hard.
    pub fn enqueue_complete_error(&self, error: GatewayError) {
        self.lock_complete().push_back(Err(error));
    }

    /// Number of purchase calls observed.
    pub fn purchase_calls(&self) -> usize {
        self.recorded(GatewayCapability::Purchase)
    }

    /// Number of completion calls observed.
    pub fn complete_calls(&self) -> usize {
        self.recorded(GatewayCapability::CompletePurchase)
    }

    /// Every recorded call, in order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.lock_calls().clone()
    }

    /// The most recent recorded call.
    pub fn last_call(&self) -> Option<GatewayCall> {
        self.lock_calls().last().cloned()
    }

    fn recorded(&self, operation: GatewayCapability) -> usize {
        self.lock_calls()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn record(&self, operation: GatewayCapability, config: &GatewayConfig, request: &PurchaseRequest) {
        self.lock_calls().push(GatewayCall {
            operation,
            config: config.clone(),
            request: request.clone(),
        });
    }

    fn lock_purchase(&self) -> std::sync::MutexGuard<'_, VecDeque<GatewayResult<PurchaseResponse>>> {
        self.state
            .purchase_script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    fn lock_complete(&self) -> std::sync::MutexGuard<'_, VecDeque<GatewayResult<PurchaseResponse>>> {
        self.state
            .complete_script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<GatewayCall>> {
        self.state.calls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, capability: GatewayCapability) -> bool {
        !self.withheld.contains(&capability)
    }

    async fn purchase(
        &self,
        config: &GatewayConfig,
        request: &PurchaseRequest,
    ) -> GatewayResult<PurchaseResponse> {
        self.record(GatewayCapability::Purchase, config, request);
        self.lock_purchase()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Transport("no scripted purchase response".to_string())))
    }

    async fn complete_purchase(
        &self,
        config: &GatewayConfig,
        request: &PurchaseRequest,
    ) -> GatewayResult<PurchaseResponse> {
        self.record(GatewayCapability::CompletePurchase, config, request);
        self.lock_complete()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Transport("no scripted completion response".to_string())))
    }
}
