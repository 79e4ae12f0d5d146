//! Braintree SDK for Rust
//!
//! A typed, async client for the Braintree payment gateway's XML API.
//! Every call is one authenticated HTTPS request against the merchant's
//! gateway URL; responses are decoded into plain Rust records and 422
//! envelopes are classified into a single validation, gateway or processor
//! error.
//!
//! ## API Coverage
//!
//! | Resource | Operations |
//! |----------|------------|
//! | Subscription | create, find, update, cancel |
//! | Transaction | create, find, refund, settle, void |
//! | Address | create, find, update |
//! | Customer | create, find, update |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use braintree_sdk::Braintree;
//! use braintree_sdk::api::TransactionInput;
//! use braintree_sdk::types::{Environment, MerchantId, PrivateKey, PublicKey};
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let braintree = Braintree::builder()
//!         .environment(Environment::sandbox())
//!         .merchant_id(MerchantId::new("your_merchant_id")?)
//!         .public_key(PublicKey::new("your_public_key")?)
//!         .private_key(PrivateKey::new("your_private_key")?)
//!         .build()?;
//!
//!     let sale = braintree
//!         .transaction()
//!         .create(&TransactionInput {
//!             amount: Decimal::new(1000, 2),
//!             payment_method_nonce: "fake-valid-nonce".to_string(),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("Transaction {} is {}", sale.id, sale.status);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Resource gateways and their records
//! - [`client`] - HTTP client and builders
//! - [`error`] - Error types
//! - [`middleware`] - Tower middleware for the HTTP transport
//! - [`types`] - Credential and environment types
//!
//! ## Error Handling
//!
//! The SDK uses the [`BraintreeError`] enum for error handling:
//!
//! ```rust,ignore
//! use braintree_sdk::BraintreeError;
//!
//! match result {
//!     Ok(transaction) => { /* handle success */ }
//!     Err(BraintreeError::Validation(e)) => {
//!         eprintln!("{} rejected: {}", e.attribute, e);
//!     }
//!     Err(BraintreeError::Processor(e)) => {
//!         eprintln!("Processor declined: {}", e);
//!     }
//!     Err(BraintreeError::NotFound) => {
//!         eprintln!("No such record");
//!     }
//!     Err(e) => {
//!         eprintln!("Other error: {}", e);
//!     }
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod middleware;
pub mod types;

pub use client::{Braintree, BraintreeBuilder, BraintreeClient, BraintreeClientBuilder};
pub use error::BraintreeError;
