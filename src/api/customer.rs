//! Customer API

use std::sync::Arc;

use chrono::{DateTime, Utc};
use http::Method;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

use super::address::Address;
use super::{BraintreeApi, GatewayContext};
use crate::client::BraintreeClient;
use crate::error::BraintreeError;
use crate::types::xml;

/// A customer as returned by the gateway
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename = "customer", rename_all = "kebab-case", default)]
pub struct Customer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub fax: String,
    pub website: String,
    #[serde(deserialize_with = "addresses")]
    pub addresses: Vec<Address>,
    #[serde(deserialize_with = "xml::option_text::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "xml::option_text::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn addresses<'de, D>(deserializer: D) -> Result<Vec<Address>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Addresses {
        #[serde(default)]
        address: Vec<Address>,
    }

    Addresses::deserialize(deserializer).map(|list| list.address)
}

/// Used to create or update a customer, and nested in a transaction to
/// create the customer alongside the sale. Empty fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename = "customer", rename_all = "kebab-case")]
pub struct CustomerInput {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub company: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fax: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub website: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub payment_method_nonce: String,
}

/// Customer gateway
pub struct CustomerGateway {
    context: Arc<GatewayContext>,
}

impl CustomerGateway {
    pub fn new(context: Arc<GatewayContext>) -> Self {
        Self { context }
    }

    /// Create a customer. The gateway assigns an id unless `input.id` is set.
    pub async fn create(&self, input: &CustomerInput) -> Result<Customer, BraintreeError> {
        self.context
            .client
            .execute(Method::POST, "customers", Some(input))
            .await
    }

    /// Find a customer by id
    pub async fn find(&self, id: &str) -> Result<Customer, BraintreeError> {
        let path = format!("customers/{}", BraintreeClient::segment(id));
        self.context
            .client
            .execute(Method::GET, &path, None::<&()>)
            .await
    }

    /// Update a customer.
    ///
    /// `id` is required.
    pub async fn update(&self, input: &CustomerInput) -> Result<Customer, BraintreeError> {
        let path = format!("customers/{}", BraintreeClient::segment(&input.id));
        self.context
            .client
            .execute(Method::PUT, &path, Some(input))
            .await
    }
}

impl BraintreeApi for CustomerGateway {
    fn context(&self) -> &GatewayContext {
        &self.context
    }
}
