//! Transaction API
//!
//! Sales and credits, plus the settlement lifecycle actions (settle, void,
//! refund).
//!
//! ## Overview
//!
//! A sale moves through `authorizing → authorized → submitted_for_settlement
//! → settling → settled`. Before settlement it can be voided; after
//! settlement it can be refunded, which creates a new `credit` transaction.
//! Declines and rejections are not returned as transactions but as
//! [`BraintreeError::Gateway`] / [`BraintreeError::Processor`].
//!
//! ## Example
//!
//! ```ignore
//! use braintree_sdk::api::transaction::{TransactionInput, TransactionType};
//! use rust_decimal::Decimal;
//!
//! let input = TransactionInput {
//!     amount: Decimal::new(1000, 2),
//!     kind: Some(TransactionType::Sale),
//!     payment_method_nonce: "fake-valid-nonce".to_string(),
//!     ..Default::default()
//! };
//! let sale = braintree.transaction().create(&input).await?;
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use http::Method;
use rust_decimal::Decimal;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

use super::address::{Address, AddressInput};
use super::customer::CustomerInput;
use super::{BraintreeApi, GatewayContext};
use crate::client::BraintreeClient;
use crate::error::{BraintreeError, UnrecognizedValue};
use crate::types::xml;

/// Merchant-defined custom fields, keyed by their API name
pub type CustomFields = BTreeMap<String, String>;

/// Settlement lifecycle state of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    AuthorizationExpired,
    Authorized,
    Authorizing,
    SettlementPending,
    SettlementConfirmed,
    SettlementDeclined,
    Failed,
    GatewayRejected,
    ProcessorDeclined,
    Settled,
    Settling,
    SubmittedForSettlement,
    Voided,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::AuthorizationExpired => "authorization_expired",
            TransactionStatus::Authorized => "authorized",
            TransactionStatus::Authorizing => "authorizing",
            TransactionStatus::SettlementPending => "settlement_pending",
            TransactionStatus::SettlementConfirmed => "settlement_confirmed",
            TransactionStatus::SettlementDeclined => "settlement_declined",
            TransactionStatus::Failed => "failed",
            TransactionStatus::GatewayRejected => "gateway_rejected",
            TransactionStatus::ProcessorDeclined => "processor_declined",
            TransactionStatus::Settled => "settled",
            TransactionStatus::Settling => "settling",
            TransactionStatus::SubmittedForSettlement => "submitted_for_settlement",
            TransactionStatus::Voided => "voided",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = UnrecognizedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = match s {
            "authorization_expired" | "authorisation_expired" => {
                TransactionStatus::AuthorizationExpired
            }
            "authorized" => TransactionStatus::Authorized,
            "authorizing" => TransactionStatus::Authorizing,
            "settlement_pending" => TransactionStatus::SettlementPending,
            "settlement_confirmed" => TransactionStatus::SettlementConfirmed,
            "settlement_declined" => TransactionStatus::SettlementDeclined,
            "failed" => TransactionStatus::Failed,
            "gateway_rejected" => TransactionStatus::GatewayRejected,
            "processor_declined" => TransactionStatus::ProcessorDeclined,
            "settled" => TransactionStatus::Settled,
            "settling" => TransactionStatus::Settling,
            "submitted_for_settlement" => TransactionStatus::SubmittedForSettlement,
            "voided" => TransactionStatus::Voided,
            other => {
                return Err(UnrecognizedValue {
                    kind: "transaction status",
                    value: other.to_string(),
                })
            }
        };
        Ok(status)
    }
}

/// Kind of payment method a transaction was made with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentInstrumentType {
    AndroidPayCard,
    ApplePayCard,
    CreditCard,
    PaypalAccount,
    VenmoAccount,
}

impl PaymentInstrumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentInstrumentType::AndroidPayCard => "android_pay_card",
            PaymentInstrumentType::ApplePayCard => "apple_pay_card",
            PaymentInstrumentType::CreditCard => "credit_card",
            PaymentInstrumentType::PaypalAccount => "paypal_account",
            PaymentInstrumentType::VenmoAccount => "venmo_account",
        }
    }
}

impl fmt::Display for PaymentInstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentInstrumentType {
    type Err = UnrecognizedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "android_pay_card" => Ok(PaymentInstrumentType::AndroidPayCard),
            "apple_pay_card" => Ok(PaymentInstrumentType::ApplePayCard),
            "credit_card" => Ok(PaymentInstrumentType::CreditCard),
            "paypal_account" => Ok(PaymentInstrumentType::PaypalAccount),
            "venmo_account" => Ok(PaymentInstrumentType::VenmoAccount),
            other => Err(UnrecognizedValue {
                kind: "payment instrument type",
                value: other.to_string(),
            }),
        }
    }
}

/// Direction of the money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Sale,
    Credit,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Sale => "sale",
            TransactionType::Credit => "credit",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = UnrecognizedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sale" => Ok(TransactionType::Sale),
            "credit" => Ok(TransactionType::Credit),
            other => Err(UnrecognizedValue {
                kind: "transaction type",
                value: other.to_string(),
            }),
        }
    }
}

/// One entry of a transaction's status history
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StatusEvent {
    #[serde(default, deserialize_with = "xml::text_or_default::deserialize")]
    pub amount: Decimal,
    #[serde(deserialize_with = "xml::text::deserialize")]
    pub status: TransactionStatus,
    #[serde(default, deserialize_with = "xml::option_text::deserialize")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub transaction_source: String,
    #[serde(default)]
    pub user: String,
}

/// `<status-history type="array"><status-event/>...</status-history>`
fn status_history<'de, D>(deserializer: D) -> Result<Vec<StatusEvent>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct StatusHistory {
        #[serde(rename = "status-event", default)]
        events: Vec<StatusEvent>,
    }

    StatusHistory::deserialize(deserializer).map(|history| history.events)
}

/// A transaction as returned by the gateway
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename = "transaction", rename_all = "kebab-case")]
pub struct Transaction {
    #[serde(default)]
    pub id: String,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "xml::option_text::deserialize"
    )]
    pub kind: Option<TransactionType>,
    #[serde(default, deserialize_with = "xml::text_or_default::deserialize")]
    pub amount: Decimal,
    #[serde(default)]
    pub currency_iso_code: String,
    #[serde(deserialize_with = "xml::text::deserialize")]
    pub status: TransactionStatus,
    #[serde(default, deserialize_with = "status_history")]
    pub status_history: Vec<StatusEvent>,
    #[serde(default, deserialize_with = "xml::option_text::deserialize")]
    pub payment_instrument_type: Option<PaymentInstrumentType>,
    /// Billing address, sent as `billing` (older gateways: `billing-details`)
    #[serde(default, alias = "billing-details")]
    pub billing: Address,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub merchant_account_id: String,
    #[serde(default)]
    pub plan_id: String,
    #[serde(default)]
    pub subscription_id: String,
    #[serde(default)]
    pub purchase_order_number: String,
    #[serde(default)]
    pub refunded_transaction_id: String,
    #[serde(default)]
    pub settlement_batch_id: String,
    #[serde(default)]
    pub escrow_status: String,
    #[serde(default)]
    pub gateway_rejection_reason: String,
    #[serde(default)]
    pub processor_response_code: String,
    #[serde(default)]
    pub processor_response_text: String,
    #[serde(default)]
    pub additional_processor_response: String,
    #[serde(default)]
    pub processor_settlement_response_code: String,
    #[serde(default)]
    pub processor_settlement_response_text: String,
    #[serde(default, deserialize_with = "xml::text_or_default::deserialize")]
    pub tax_exempt: bool,
    #[serde(default)]
    pub custom_fields: CustomFields,
    #[serde(default, deserialize_with = "xml::option_text::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "xml::option_text::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Optional settings for creating a transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransactionOptions {
    #[serde(skip_serializing_if = "xml::is_false")]
    pub add_billing_address_to_payment_method: bool,
    #[serde(skip_serializing_if = "xml::is_false")]
    pub hold_in_escrow: bool,
    #[serde(skip_serializing_if = "xml::is_false")]
    pub store_in_vault: bool,
    #[serde(skip_serializing_if = "xml::is_false")]
    pub store_in_vault_on_success: bool,
    #[serde(skip_serializing_if = "xml::is_false")]
    pub submit_for_settlement: bool,
}

/// Used to create a sale or credit.
///
/// `amount` is always sent; every other field is omitted when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename = "transaction", rename_all = "kebab-case")]
pub struct TransactionInput {
    #[serde(with = "xml::text")]
    pub amount: Decimal,
    #[serde(
        rename = "type",
        with = "xml::option_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<TransactionType>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub payment_method_nonce: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub payment_method_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing: Option<AddressInput>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub billing_address_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub channel: String,
    #[serde(skip_serializing_if = "CustomFields::is_empty")]
    pub custom_fields: CustomFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerInput>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub customer_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub device_data: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub device_session_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub merchant_account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<TransactionOptions>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub order_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub purchase_order_number: String,
    #[serde(skip_serializing_if = "xml::is_false")]
    pub recurring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<AddressInput>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub shipping_address_id: String,
    #[serde(skip_serializing_if = "xml::is_false")]
    pub tax_exempt: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub transaction_source: String,
}

/// Transaction gateway
pub struct TransactionGateway {
    context: Arc<GatewayContext>,
}

impl TransactionGateway {
    pub fn new(context: Arc<GatewayContext>) -> Self {
        Self { context }
    }

    /// Create a transaction.
    ///
    /// `amount`, `kind` and one of `payment_method_nonce` /
    /// `payment_method_token` are required.
    pub async fn create(&self, input: &TransactionInput) -> Result<Transaction, BraintreeError> {
        self.context
            .client
            .execute(Method::POST, "transactions", Some(input))
            .await
    }

    /// Find a transaction by id
    pub async fn find(&self, id: &str) -> Result<Transaction, BraintreeError> {
        self.transaction_action(Method::GET, id, None).await
    }

    /// Refund a settled transaction. Returns the new credit transaction.
    pub async fn refund(&self, id: &str) -> Result<Transaction, BraintreeError> {
        self.transaction_action(Method::POST, id, Some("refund")).await
    }

    /// Move a transaction to `settled`.
    ///
    /// Only available in the sandbox environment.
    pub async fn settle(&self, id: &str) -> Result<Transaction, BraintreeError> {
        self.transaction_action(Method::PUT, id, Some("settle")).await
    }

    /// Void a transaction before it settles
    pub async fn void(&self, id: &str) -> Result<Transaction, BraintreeError> {
        self.transaction_action(Method::PUT, id, Some("void")).await
    }

    async fn transaction_action(
        &self,
        method: Method,
        id: &str,
        action: Option<&str>,
    ) -> Result<Transaction, BraintreeError> {
        let mut path = format!("transactions/{}", BraintreeClient::segment(id));
        if let Some(action) = action {
            path.push('/');
            path.push_str(action);
        }
        self.context
            .client
            .execute(method, &path, None::<&()>)
            .await
    }
}

impl BraintreeApi for TransactionGateway {
    fn context(&self) -> &GatewayContext {
        &self.context
    }
}
