//! Address API
//!
//! Addresses always belong to a customer; the customer id is part of every
//! address path rather than of the request body.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};

use super::{BraintreeApi, GatewayContext};
use crate::client::BraintreeClient;
use crate::error::BraintreeError;
use crate::types::xml;

/// An address as returned by the gateway
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename = "address", rename_all = "kebab-case", default)]
pub struct Address {
    pub id: String,
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub street_address: String,
    pub extended_address: String,
    pub locality: String,
    pub region: String,
    pub postal_code: String,
    pub country_code_alpha2: String,
    pub country_name: String,
    #[serde(deserialize_with = "xml::option_text::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "xml::option_text::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Used to create or update an address, and nested as billing/shipping
/// details of a transaction. Empty fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename = "address", rename_all = "kebab-case")]
pub struct AddressInput {
    /// Owning customer; only used to build the request path
    #[serde(skip)]
    pub customer_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub company: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub street_address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub extended_address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub locality: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub postal_code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub country_code_alpha2: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub country_name: String,
}

/// Address gateway
pub struct AddressGateway {
    context: Arc<GatewayContext>,
}

impl AddressGateway {
    pub fn new(context: Arc<GatewayContext>) -> Self {
        Self { context }
    }

    /// Create an address for `input.customer_id`.
    ///
    /// Without a customer id the gateway answers with
    /// [`BraintreeError::NotFound`].
    pub async fn create(&self, input: &AddressInput) -> Result<Address, BraintreeError> {
        let path = Self::addresses_path(&input.customer_id);
        self.context
            .client
            .execute(Method::POST, &path, Some(input))
            .await
    }

    /// Find one address of a customer
    pub async fn find(&self, customer_id: &str, id: &str) -> Result<Address, BraintreeError> {
        let path = format!(
            "{}/{}",
            Self::addresses_path(customer_id),
            BraintreeClient::segment(id)
        );
        self.context
            .client
            .execute(Method::GET, &path, None::<&()>)
            .await
    }

    /// Update the address `id` of `input.customer_id`
    pub async fn update(&self, id: &str, input: &AddressInput) -> Result<Address, BraintreeError> {
        let path = format!(
            "{}/{}",
            Self::addresses_path(&input.customer_id),
            BraintreeClient::segment(id)
        );
        self.context
            .client
            .execute(Method::PUT, &path, Some(input))
            .await
    }

    fn addresses_path(customer_id: &str) -> String {
        format!("customers/{}/addresses", BraintreeClient::segment(customer_id))
    }
}

impl BraintreeApi for AddressGateway {
    fn context(&self) -> &GatewayContext {
        &self.context
    }
}
