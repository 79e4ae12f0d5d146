//! Braintree HTTP Client
//!
//! Signs, sends and decodes every gateway request.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method, StatusCode};
use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tower::Service;

use super::error_response;
use crate::error::{BraintreeError, HttpError};
use crate::types::{Environment, MerchantId, PrivateKey, PublicKey};

pub(crate) const GATEWAY_DOMAIN: &str = "braintreegateway.com";
pub(crate) const API_VERSION: &str = "4";
pub(crate) const XML_CONTENT_TYPE: &str = "application/xml";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Characters escaped when a caller-supplied id is placed in a path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

type MiddlewareFuture =
    Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send>>;
type MiddlewareExecutor = Arc<dyn Fn(reqwest::Request) -> MiddlewareFuture + Send + Sync>;

/// Braintree API Client
///
/// Immutable once built: the merchant URL and the Basic credentials are
/// fixed at build time, and the inner [`reqwest::Client`] pools connections
/// across clones, so one value can serve concurrent calls.
#[derive(Clone)]
pub struct BraintreeClient {
    http: Client,
    environment: Environment,
    merchant_id: MerchantId,
    public_key: PublicKey,
    merchant_url: String,
    authorization: HeaderValue,
    middleware_executor: Option<MiddlewareExecutor>,
}

impl std::fmt::Debug for BraintreeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BraintreeClient")
            .field("environment", &self.environment)
            .field("merchant_id", &self.merchant_id)
            .field("public_key", &self.public_key)
            .field("merchant_url", &self.merchant_url)
            .field(
                "middleware_executor",
                &self.middleware_executor.as_ref().map(|_| ".."),
            )
            .finish_non_exhaustive()
    }
}

impl BraintreeClient {
    /// Create a new client builder
    pub fn builder() -> BraintreeClientBuilder {
        BraintreeClientBuilder::default()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn merchant_id(&self) -> &str {
        self.merchant_id.as_str()
    }

    pub fn public_key(&self) -> &str {
        self.public_key.as_str()
    }

    /// URL every resource path is appended to, e.g.
    /// `https://sandbox.braintreegateway.com/merchants/abc123`
    pub fn merchant_url(&self) -> &str {
        &self.merchant_url
    }

    /// Returns the underlying [`reqwest::Client`] for raw HTTP requests.
    ///
    /// Note: requests made through this client bypass the middleware pipeline
    /// and are not signed.
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Percent-encode a caller-supplied id for use as one path segment
    pub(crate) fn segment(id: &str) -> String {
        utf8_percent_encode(id, PATH_SEGMENT).to_string()
    }

    pub(crate) fn with_middleware_executor(mut self, executor: MiddlewareExecutor) -> Self {
        self.middleware_executor = Some(executor);
        self
    }

    pub(crate) async fn send_request(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        if let Some(executor) = &self.middleware_executor {
            (executor)(request).await
        } else {
            self.http.execute(request).await
        }
    }

    /// Send a signed request and decode the XML response
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - Resource path relative to the merchant URL (e.g. "subscriptions/abc/cancel")
    /// * `payload` - Request body, serialized as XML; `None` sends no body
    ///
    /// # Errors
    /// - `BraintreeError::NotFound` on 404
    /// - `Validation`, `Gateway` or `Processor` for a classified 422
    /// - `BraintreeError::Status` for any other non-2xx status
    /// - `BraintreeError::Http` for transport, encode or decode failures
    pub async fn execute<T, B>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&B>,
    ) -> Result<T, BraintreeError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}/{}", self.merchant_url, path);

        let mut builder = self
            .http
            .request(method.clone(), url)
            .header("X-ApiVersion", API_VERSION)
            .header(CONTENT_TYPE, XML_CONTENT_TYPE)
            .header(ACCEPT, XML_CONTENT_TYPE)
            .header(AUTHORIZATION, self.authorization.clone());

        if let Some(payload) = payload {
            let body = quick_xml::se::to_string(payload)
                .map_err(|e| HttpError::Encode(e.to_string()))?;
            builder = builder.body(body);
        }

        let request = builder.build()?;
        let response = self.send_request(request).await?;
        let status = response.status();

        debug!("[Braintree] {} {} -> {}", method, path, status);

        match status {
            StatusCode::OK | StatusCode::CREATED => {
                let body = response.text().await?;
                quick_xml::de::from_str(&body).map_err(BraintreeError::decode)
            }
            StatusCode::NOT_FOUND => Err(BraintreeError::NotFound),
            StatusCode::UNPROCESSABLE_ENTITY => {
                let body = response.text().await?;
                Err(error_response::classify(status, &body))
            }
            _ => Err(BraintreeError::status(status)),
        }
    }
}

impl Service<reqwest::Request> for BraintreeClient {
    type Response = reqwest::Response;
    type Error = reqwest::Error;
    type Future = MiddlewareFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: reqwest::Request) -> Self::Future {
        let client = self.http.clone();
        Box::pin(async move { client.execute(req).await })
    }
}

/// Builder for BraintreeClient
///
/// # Example
///
/// ```rust
/// use braintree_sdk::client::BraintreeClient;
/// use braintree_sdk::types::{Environment, MerchantId, PrivateKey, PublicKey};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = BraintreeClient::builder()
///         .environment(Environment::sandbox())
///         .merchant_id(MerchantId::new("my_merchant_id")?)
///         .public_key(PublicKey::new("my_public_key")?)
///         .private_key(PrivateKey::new("my_private_key")?)
///         .build()?;
///
///     assert_eq!(
///         client.merchant_url(),
///         "https://sandbox.braintreegateway.com/merchants/my_merchant_id"
///     );
///     Ok(())
/// }
/// ```
#[derive(Debug, Default)]
pub struct BraintreeClientBuilder {
    environment: Option<Environment>,
    merchant_id: Option<MerchantId>,
    public_key: Option<PublicKey>,
    private_key: Option<PrivateKey>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl BraintreeClientBuilder {
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

    /// Override the gateway origin (scheme + host)
    ///
    /// Default: `https://{environment}.braintreegateway.com`
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the total timeout for requests
    ///
    /// Default: 60 seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    ///
    /// Default: 10 seconds
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Build the BraintreeClient
    ///
    /// # Errors
    /// Returns an error if the environment, merchant id or either key is not set
    pub fn build(self) -> Result<BraintreeClient, BraintreeError> {
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

        let base_url = self
            .base_url
            .unwrap_or_else(|| format!("https://{}.{}", environment, GATEWAY_DOMAIN));
        let merchant_url = format!(
            "{}/merchants/{}",
            base_url.trim_end_matches('/'),
            BraintreeClient::segment(merchant_id.as_str())
        );

        let credentials = STANDARD.encode(format!(
            "{}:{}",
            public_key.as_str(),
            private_key.as_str()
        ));
        let mut authorization = HeaderValue::from_str(&format!("Basic {}", credentials))
            .map_err(|e| BraintreeError::Config(format!("invalid credentials: {}", e)))?;
        authorization.set_sensitive(true);

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let connect_timeout = self
            .connect_timeout
            .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(BraintreeClient {
            http: client,
            environment,
            merchant_id,
            public_key,
            merchant_url,
            authorization,
            middleware_executor: None,
        })
    }
}
