//! Subscription API
//!
//! Create, look up, update and cancel recurring billing subscriptions.
//!
//! ## Example
//!
//! ```ignore
//! use braintree_sdk::api::subscription::SubscriptionInput;
//!
//! let input = SubscriptionInput {
//!     plan_id: "gold".to_string(),
//!     payment_method_token: "token123".to_string(),
//!     ..Default::default()
//! };
//! let subscription = braintree.subscription().create(&input).await?;
//! let canceled = braintree.subscription().cancel(&subscription.id).await?;
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use http::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BraintreeApi, GatewayContext};
use crate::client::BraintreeClient;
use crate::error::{BraintreeError, UnrecognizedValue};
use crate::types::xml;

/// Lifecycle state of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionStatus {
    Active,
    Canceled,
    Expired,
    PastDue,
    /// The subscription will begin in the future
    Pending,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "Active",
            SubscriptionStatus::Canceled => "Canceled",
            SubscriptionStatus::Expired => "Expired",
            SubscriptionStatus::PastDue => "Past Due",
            SubscriptionStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = UnrecognizedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(SubscriptionStatus::Active),
            "Canceled" => Ok(SubscriptionStatus::Canceled),
            "Expired" => Ok(SubscriptionStatus::Expired),
            "Past Due" => Ok(SubscriptionStatus::PastDue),
            "Pending" => Ok(SubscriptionStatus::Pending),
            other => Err(UnrecognizedValue {
                kind: "subscription status",
                value: other.to_string(),
            }),
        }
    }
}

/// A subscription as returned by the gateway
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename = "subscription", rename_all = "kebab-case")]
pub struct Subscription {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub plan_id: String,
    #[serde(default)]
    pub payment_method_token: String,
    #[serde(default)]
    pub merchant_account_id: String,
    #[serde(default, deserialize_with = "xml::text_or_default::deserialize")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "xml::text_or_default::deserialize")]
    pub balance: Decimal,
    #[serde(default, deserialize_with = "xml::text_or_default::deserialize")]
    pub next_bill_amount: Decimal,
    #[serde(default, deserialize_with = "xml::text_or_default::deserialize")]
    pub billing_day_of_month: i32,
    #[serde(default, deserialize_with = "xml::text_or_default::deserialize")]
    pub current_billing_cycle: i32,
    /// Zero when the subscription never expires
    #[serde(default, deserialize_with = "xml::text_or_default::deserialize")]
    pub number_of_billing_cycles: i32,
    #[serde(default, deserialize_with = "xml::text_or_default::deserialize")]
    pub days_past_due: i32,
    #[serde(default, deserialize_with = "xml::text_or_default::deserialize")]
    pub failure_count: i32,
    #[serde(default, deserialize_with = "xml::text_or_default::deserialize")]
    pub never_expires: bool,
    #[serde(default, deserialize_with = "xml::text_or_default::deserialize")]
    pub trial_period: bool,
    #[serde(default, deserialize_with = "xml::text_or_default::deserialize")]
    pub trial_duration: i32,
    #[serde(default)]
    pub trial_duration_unit: String,
    #[serde(default, deserialize_with = "xml::option_text::deserialize")]
    pub first_billing_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "xml::option_text::deserialize")]
    pub next_billing_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "xml::option_text::deserialize")]
    pub billing_period_start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "xml::option_text::deserialize")]
    pub billing_period_end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "xml::option_text::deserialize")]
    pub paid_through_date: Option<NaiveDate>,
    #[serde(deserialize_with = "xml::text::deserialize")]
    pub status: SubscriptionStatus,
    #[serde(default, deserialize_with = "xml::option_text::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "xml::option_text::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Used to create or update a subscription.
///
/// Zero-valued fields are left out of the request body, so an untouched
/// field never overwrites the plan's or the existing subscription's value.
/// `plan_id` is the exception and is always sent. `price` is optional
/// because a price of zero is a legitimate override.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename = "subscription", rename_all = "kebab-case")]
pub struct SubscriptionInput {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "xml::is_zero")]
    pub billing_day_of_month: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub merchant_account_id: String,
    #[serde(skip_serializing_if = "xml::is_false")]
    pub never_expires: bool,
    #[serde(skip_serializing_if = "xml::is_zero")]
    pub number_of_billing_cycles: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub payment_method_nonce: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub payment_method_token: String,
    pub plan_id: String,
    #[serde(with = "xml::option_text", skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "xml::is_zero")]
    pub trial_duration: i32,
    /// `day` or `month`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub trial_duration_unit: String,
    #[serde(skip_serializing_if = "xml::is_false")]
    pub trial_period: bool,
}

/// Subscription gateway
pub struct SubscriptionGateway {
    context: Arc<GatewayContext>,
}

impl SubscriptionGateway {
    pub fn new(context: Arc<GatewayContext>) -> Self {
        Self { context }
    }

    /// Create a subscription.
    ///
    /// `plan_id` and one of `payment_method_nonce` / `payment_method_token`
    /// are required.
    pub async fn create(&self, input: &SubscriptionInput) -> Result<Subscription, BraintreeError> {
        self.context
            .client
            .execute(Method::POST, "subscriptions", Some(input))
            .await
    }

    /// Find a subscription by id
    pub async fn find(&self, id: &str) -> Result<Subscription, BraintreeError> {
        let path = format!("subscriptions/{}", BraintreeClient::segment(id));
        self.context
            .client
            .execute(Method::GET, &path, None::<&()>)
            .await
    }

    /// Update a subscription.
    ///
    /// `id` is required.
    pub async fn update(&self, input: &SubscriptionInput) -> Result<Subscription, BraintreeError> {
        let path = format!("subscriptions/{}", BraintreeClient::segment(&input.id));
        self.context
            .client
            .execute(Method::PUT, &path, Some(input))
            .await
    }

    /// Cancel a subscription. Canceled subscriptions cannot be reactivated.
    pub async fn cancel(&self, id: &str) -> Result<Subscription, BraintreeError> {
        let path = format!("subscriptions/{}/cancel", BraintreeClient::segment(id));
        self.context
            .client
            .execute(Method::PUT, &path, None::<&()>)
            .await
    }
}

impl BraintreeApi for SubscriptionGateway {
    fn context(&self) -> &GatewayContext {
        &self.context
    }
}
