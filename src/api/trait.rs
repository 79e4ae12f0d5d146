//! Gateway trait and context
//!
//! Provides the base trait and context for all resource gateways.

use std::sync::Arc;

use crate::client::BraintreeClient;

/// Context holding shared resources for resource gateways.
///
/// Wraps the immutable, signed HTTP client. Cloning the context is cheap and
/// every gateway obtained from the same [`crate::Braintree`] shares it.
#[derive(Clone)]
pub struct GatewayContext {
    /// The Braintree HTTP client for making API requests
    pub(crate) client: Arc<BraintreeClient>,
}

impl std::fmt::Debug for GatewayContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayContext")
            .field("merchant_url", &self.client.merchant_url())
            .finish()
    }
}

impl GatewayContext {
    /// Create a new GatewayContext
    pub fn new(client: Arc<BraintreeClient>) -> Self {
        Self { client }
    }

    /// Get a reference to the Braintree HTTP client.
    pub fn client(&self) -> &BraintreeClient {
        &self.client
    }
}

/// Trait for resource gateways.
///
/// All gateway modules implement this trait to provide access to the shared
/// context.
pub trait BraintreeApi: Send + Sync {
    /// Get a reference to the gateway context
    fn context(&self) -> &GatewayContext;
}
