use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Request as ReqwestRequest, Response as ReqwestResponse};
use tower::{Layer, Service};

use crate::api::GatewayContext;
use crate::error::BraintreeError;
use crate::types::{Environment, MerchantId, PrivateKey, PublicKey};

use super::braintree_client::{
    BraintreeClient, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};
use super::Braintree;

type MiddlewareFuture =
    Pin<Box<dyn Future<Output = Result<ReqwestResponse, reqwest::Error>> + Send>>;
type MiddlewareExecutor = Arc<dyn Fn(ReqwestRequest) -> MiddlewareFuture + Send + Sync>;

pub(crate) const ENV_ENVIRONMENT: &str = "BRAINTREE_ENVIRONMENT";
pub(crate) const ENV_MERCHANT_ID: &str = "BRAINTREE_MERCHANT_ID";
pub(crate) const ENV_PUBLIC_KEY: &str = "BRAINTREE_PUBLIC_KEY";
pub(crate) const ENV_PRIVATE_KEY: &str = "BRAINTREE_PRIVATE_KEY";

#[must_use]
#[derive(Default)]
pub struct BraintreeBuilder<M = ()> {
    environment: Option<Environment>,
    merchant_id: Option<MerchantId>,
    public_key: Option<PublicKey>,
    private_key: Option<PrivateKey>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    middleware: Option<M>,
}

impl<M> std::fmt::Debug for BraintreeBuilder<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BraintreeBuilder")
            .field("environment", &self.environment)
            .field("merchant_id", &self.merchant_id)
            .field("public_key", &self.public_key)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("middleware", &self.middleware.as_ref().map(|_| ".."))
            .finish_non_exhaustive()
    }
}

impl BraintreeBuilder {
    /// Builder pre-populated from `BRAINTREE_ENVIRONMENT`,
    /// `BRAINTREE_MERCHANT_ID`, `BRAINTREE_PUBLIC_KEY` and
    /// `BRAINTREE_PRIVATE_KEY`.
    ///
    /// Unset variables leave the field empty, so `build` reports them as
    /// missing; set but invalid values fail here.
    pub fn from_env() -> Result<Self, BraintreeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BraintreeError> {
        fn parse<T>(
            value: Option<String>,
            key: &str,
            new: impl Fn(String) -> Result<T, String>,
        ) -> Result<Option<T>, BraintreeError> {
            value
                .map(|v| new(v).map_err(|e| BraintreeError::Config(format!("{}: {}", key, e))))
                .transpose()
        }

        Ok(Self {
            environment: parse(lookup(ENV_ENVIRONMENT), ENV_ENVIRONMENT, |v| Environment::new(v))?,
            merchant_id: parse(lookup(ENV_MERCHANT_ID), ENV_MERCHANT_ID, |v| MerchantId::new(v))?,
            public_key: parse(lookup(ENV_PUBLIC_KEY), ENV_PUBLIC_KEY, |v| PublicKey::new(v))?,
            private_key: parse(lookup(ENV_PRIVATE_KEY), ENV_PRIVATE_KEY, |v| PrivateKey::new(v))?,
            ..Self::default()
        })
    }
}

impl<M> BraintreeBuilder<M> {
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn merchant_id(mut self, merchant_id: MerchantId) -> Self {
        self.merchant_id = Some(merchant_id);
        self
    }

    pub fn public_key(mut self, public_key: PublicKey) -> Self {
        self.public_key = Some(public_key);
        self
    }

    pub fn private_key(mut self, private_key: PrivateKey) -> Self {
        self.private_key = Some(private_key);
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_middleware<M2>(self, middleware: M2) -> BraintreeBuilder<M2>
    where
        M2: Layer<BraintreeClient> + Clone + Send + Sync + 'static,
    {
        BraintreeBuilder {
            environment: self.environment,
            merchant_id: self.merchant_id,
            public_key: self.public_key,
            private_key: self.private_key,
            base_url: self.base_url,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            middleware: Some(middleware),
        }
    }

    pub fn build(self) -> Result<Braintree, BraintreeError>
    where
        M: Layer<BraintreeClient> + Clone + Send + Sync + 'static,
        M::Service: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
            + Clone
            + Send
            + Sync
            + 'static,
        <M::Service as Service<ReqwestRequest>>::Future: Send + 'static,
    {
        let environment = self
            .environment
            .ok_or_else(|| BraintreeError::Config("environment is required".to_string()))?;
        let merchant_id = self
            .merchant_id
            .ok_or_else(|| BraintreeError::Config("merchant_id is required".to_string()))?;
        let public_key = self
            .public_key
            .ok_or_else(|| BraintreeError::Config("public_key is required".to_string()))?;
        let private_key = self
            .private_key
            .ok_or_else(|| BraintreeError::Config("private_key is required".to_string()))?;

        let mut client_builder = BraintreeClient::builder()
            .environment(environment)
            .merchant_id(merchant_id)
            .public_key(public_key)
            .private_key(private_key)
            .timeout(
                self.timeout
                    .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            )
            .connect_timeout(
                self.connect_timeout
                    .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)),
            );

        if let Some(base_url) = self.base_url {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(BraintreeError::Config(format!(
                    "base_url must start with http:// or https://, got: {}",
                    base_url
                )));
            }
            client_builder = client_builder.base_url(base_url);
        }

        let mut client = client_builder.build()?;

        if let Some(middleware) = self.middleware {
            let service = middleware.layer(client.clone());
            let executor = make_middleware_executor(service);
            client = client.with_middleware_executor(executor);
        }

        let context = Arc::new(GatewayContext::new(Arc::new(client)));

        Ok(Braintree::from(context))
    }
}

fn make_middleware_executor<S>(service: S) -> MiddlewareExecutor
where
    S: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
{
    let service = Arc::new(service);

    Arc::new(move |request: ReqwestRequest| {
        let mut service = (*service).clone();
        Box::pin(async move { service.call(request).await })
    })
}
