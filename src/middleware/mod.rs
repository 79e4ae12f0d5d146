//! Middleware components for the Braintree SDK.
//!
//! Middleware wraps the signed HTTP transport using Tower patterns and is
//! composed with `ServiceBuilder` or [`BraintreeBuilder::with_middleware`].
//!
//! - [`LoggingMiddleware`] - Logs request/response information with credentials redacted
//!
//! ## Usage
//!
//! ```ignore
//! use braintree_sdk::BraintreeBuilder;
//! use braintree_sdk::middleware::LoggingMiddleware;
//!
//! let braintree = BraintreeBuilder::from_env()?
//!     .with_middleware(LoggingMiddleware::new().verbose())
//!     .build()?;
//! ```
//!
//! [`BraintreeBuilder::with_middleware`]: crate::client::BraintreeBuilder::with_middleware

// Re-export tower types for convenience
pub use tower::{Layer, Service, ServiceBuilder};

mod logging;

pub use logging::{LoggingMiddleware, LoggingMiddlewareService};
