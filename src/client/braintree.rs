//! Unified Braintree client

use std::sync::Arc;

use crate::api::address::AddressGateway;
use crate::api::customer::CustomerGateway;
use crate::api::subscription::SubscriptionGateway;
use crate::api::transaction::TransactionGateway;
use crate::api::GatewayContext;

/// Unified Braintree client
///
/// This is the main entry point for the SDK. It holds the immutable,
/// signed HTTP client and hands out one gateway per resource. Cloning is
/// cheap and clones share the same connection pool, so a single value can
/// be used from many tasks at once.
///
/// # Example
///
/// ```rust,ignore
/// use braintree_sdk::Braintree;
/// use braintree_sdk::types::{Environment, MerchantId, PrivateKey, PublicKey};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let braintree = Braintree::builder()
///         .environment(Environment::sandbox())
///         .merchant_id(MerchantId::new("your_merchant_id")?)
///         .public_key(PublicKey::new("your_public_key")?)
///         .private_key(PrivateKey::new("your_private_key")?)
///         .build()?;
///
///     let transaction = braintree.transaction().find("7kwx2mg4").await?;
///     println!("Status: {}", transaction.status);
///
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Braintree {
    context: Arc<GatewayContext>,
}

impl Braintree {
    pub fn builder() -> super::builder::BraintreeBuilder {
        super::builder::BraintreeBuilder::default()
    }

    pub fn merchant_id(&self) -> &str {
        self.context.client().merchant_id()
    }

    pub fn environment(&self) -> &str {
        self.context.client().environment().as_str()
    }

    pub fn context(&self) -> &GatewayContext {
        &self.context
    }

    pub fn subscription(&self) -> SubscriptionGateway {
        SubscriptionGateway::new(self.context.clone())
    }

    pub fn transaction(&self) -> TransactionGateway {
        TransactionGateway::new(self.context.clone())
    }

    pub fn address(&self) -> AddressGateway {
        AddressGateway::new(self.context.clone())
    }

    pub fn customer(&self) -> CustomerGateway {
        CustomerGateway::new(self.context.clone())
    }
}

impl From<Arc<GatewayContext>> for Braintree {
    fn from(context: Arc<GatewayContext>) -> Self {
        Self { context }
    }
}
