//! Braintree resource gateways
//!
//! This module contains one gateway per gateway resource:
//!
//! - [`subscription`] - Recurring billing subscriptions
//! - [`transaction`] - Sales, credits and their settlement lifecycle
//! - [`address`] - Customer addresses
//! - [`customer`] - Customers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use braintree_sdk::Braintree;
//!
//! let subscription = braintree.subscription().find("dqhm6b").await?;
//! ```

pub mod address;
pub mod customer;
pub mod subscription;
pub mod transaction;
pub mod r#trait;

pub use address::{Address, AddressGateway, AddressInput};
pub use customer::{Customer, CustomerGateway, CustomerInput};
pub use r#trait::{BraintreeApi, GatewayContext};
pub use subscription::{Subscription, SubscriptionGateway, SubscriptionInput, SubscriptionStatus};
pub use transaction::{
    CustomFields, PaymentInstrumentType, StatusEvent, Transaction, TransactionGateway,
    TransactionInput, TransactionOptions, TransactionStatus, TransactionType,
};
