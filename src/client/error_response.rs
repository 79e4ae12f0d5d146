//! 422 error envelope classification
//!
//! The gateway answers every rejected call with the same
//! `api-error-response` document. Which fault it describes is decided in a
//! fixed order: field validation errors first (address, client-token,
//! credit-card, customer, subscription, transaction), then a gateway
//! rejection of the embedded transaction, then a processor decline. Anything
//! else is reported as the bare HTTP status.

use http::StatusCode;
use serde::Deserialize;

use crate::api::transaction::TransactionStatus;
use crate::error::{BraintreeError, GatewayError, ProcessorError, ValidationError};

#[derive(Debug, Default, Deserialize)]
#[serde(rename = "api-error-response", default)]
struct ApiErrorResponse {
    errors: ErrorTree,
    transaction: Option<TransactionSnapshot>,
}

/// The parts of the embedded transaction that decide the fault. Everything
/// else in the snapshot is ignored, so values this crate does not model
/// never hide a decline.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
struct TransactionSnapshot {
    status: String,
    gateway_rejection_reason: String,
    processor_response_code: String,
    processor_response_text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
struct ErrorTree {
    address: ErrorNode,
    client_token: ErrorNode,
    credit_card: ErrorNode,
    customer: ErrorNode,
    subscription: ErrorNode,
    transaction: ErrorNode,
}

/// `<{resource}><errors><error/>...</errors></{resource}>`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorNode {
    errors: ErrorList,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorList {
    error: Vec<ValidationError>,
}

impl ErrorTree {
    fn into_validation_errors(self) -> impl Iterator<Item = ValidationError> {
        [
            self.address,
            self.client_token,
            self.credit_card,
            self.customer,
            self.subscription,
            self.transaction,
        ]
        .into_iter()
        .flat_map(|node| node.errors.error)
    }
}

/// Turn the body of a 422 response into the most specific error it describes
pub(crate) fn classify(status: StatusCode, body: &str) -> BraintreeError {
    let envelope: ApiErrorResponse = match quick_xml::de::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) => return BraintreeError::decode(e),
    };

    if let Some(first) = envelope.errors.into_validation_errors().next() {
        return BraintreeError::Validation(first);
    }

    if let Some(transaction) = envelope.transaction {
        if transaction.status.trim() == TransactionStatus::GatewayRejected.as_str() {
            return GatewayError {
                message: transaction.gateway_rejection_reason,
            }
            .into();
        }

        if !transaction.processor_response_code.is_empty() {
            return match transaction.processor_response_code.trim().parse::<i32>() {
                Ok(code) => ProcessorError {
                    code,
                    message: transaction.processor_response_text,
                }
                .into(),
                Err(e) => BraintreeError::decode(format!(
                    "invalid processor-response-code {:?}: {}",
                    transaction.processor_response_code, e
                )),
            };
        }
    }

    BraintreeError::status(status)
}
