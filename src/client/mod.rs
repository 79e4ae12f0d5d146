//! Braintree HTTP Client module
//!
//! This module contains the BraintreeClient and related types.

mod braintree_client;
pub use braintree_client::{BraintreeClient, BraintreeClientBuilder};

mod braintree;
pub use braintree::Braintree;

mod builder;
pub use builder::BraintreeBuilder;

pub(crate) mod error_response;
