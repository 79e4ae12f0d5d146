//! Basic usage example for braintree-sdk
//!
//! Reads credentials from `BRAINTREE_ENVIRONMENT`, `BRAINTREE_MERCHANT_ID`,
//! `BRAINTREE_PUBLIC_KEY` and `BRAINTREE_PRIVATE_KEY`, then runs a sandbox
//! sale through settlement and refund.
//!
//! Run with: cargo run --example basic_usage

use braintree_sdk::api::{CustomerInput, TransactionInput, TransactionType};
use braintree_sdk::middleware::LoggingMiddleware;
use braintree_sdk::{BraintreeBuilder, BraintreeError};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let braintree = BraintreeBuilder::from_env()?
        .with_middleware(LoggingMiddleware::new())
        .build()?;

    println!("Client created for merchant {}", braintree.merchant_id());

    let customer = braintree
        .customer()
        .create(&CustomerInput {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            ..Default::default()
        })
        .await?;
    println!("Customer: {}", customer.id);

    let sale = TransactionInput {
        amount: Decimal::new(1000, 2),
        kind: Some(TransactionType::Sale),
        payment_method_nonce: "fake-valid-nonce".to_string(),
        customer_id: customer.id.clone(),
        ..Default::default()
    };

    let transaction = match braintree.transaction().create(&sale).await {
        Ok(transaction) => transaction,
        Err(BraintreeError::Processor(e)) => {
            eprintln!("Declined: {}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    println!("Transaction {} is {}", transaction.id, transaction.status);

    let settled = braintree.transaction().settle(&transaction.id).await?;
    println!("Transaction {} is {}", settled.id, settled.status);

    let refund = braintree.transaction().refund(&settled.id).await?;
    println!("Refund {} is {}", refund.id, refund.status);

    Ok(())
}
