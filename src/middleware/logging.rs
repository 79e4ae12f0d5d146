use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use http::header::{HeaderName, AUTHORIZATION, PROXY_AUTHORIZATION};
use http::{HeaderMap, StatusCode};
use log::{debug, info};
use reqwest::{Request, Response};
use tower::{Layer, Service};

const REDACTED: &str = "[REDACTED]";

/// Logs every gateway exchange through the `log` facade.
///
/// Default mode logs method, URL, status and latency at `info`. Verbose mode
/// logs at `debug` and includes request headers, with credentials redacted.
#[derive(Clone)]
pub struct LoggingMiddleware {
    verbose: bool,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for LoggingMiddleware
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Service = LoggingMiddlewareService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingMiddlewareService {
            inner,
            verbose: self.verbose,
        }
    }
}

#[derive(Clone)]
pub struct LoggingMiddlewareService<S> {
    inner: S,
    verbose: bool,
}

impl<S> LoggingMiddlewareService<S> {
    fn is_sensitive(name: &HeaderName) -> bool {
        name == AUTHORIZATION || name == PROXY_AUTHORIZATION
    }

    fn render_headers(headers: &HeaderMap) -> String {
        headers
            .iter()
            .map(|(name, value)| {
                let value = if Self::is_sensitive(name) || value.is_sensitive() {
                    REDACTED
                } else {
                    value.to_str().unwrap_or("<binary>")
                };
                format!("{}: {}", name, value)
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn log_request(method: &str, url: &str, headers: &HeaderMap, verbose: bool) {
        if verbose {
            debug!(
                "[Braintree] >>> {} {} [{}]",
                method,
                url,
                Self::render_headers(headers)
            );
        } else {
            info!("[Braintree] {} {}", method, url);
        }
    }

    fn log_response(status: StatusCode, duration: Duration, verbose: bool) {
        if verbose {
            debug!(
                "[Braintree] <<< {} - {} ({:?})",
                status.as_u16(),
                status.canonical_reason().unwrap_or(""),
                duration
            );
        } else {
            info!("[Braintree] {} ({:?})", status.as_u16(), duration);
        }
    }
}

impl<S, Error> Service<Request> for LoggingMiddlewareService<S>
where
    S: Service<Request, Response = Response, Error = Error> + Send + Clone + 'static,
    S::Future: Send,
    Error: Send + 'static,
{
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let verbose = self.verbose;
        Self::log_request(
            req.method().as_str(),
            req.url().as_str(),
            req.headers(),
            verbose,
        );
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let start = Instant::now();
            let response = inner.call(req).await?;
            let duration = start.elapsed();

            Self::log_response(response.status(), duration, verbose);

            Ok(response)
        })
    }
}
