//! Mock API Tests using WireMock
//!
//! These tests mock the Braintree gateway to verify the outgoing request
//! (method, path, headers, XML body) and the parsing of the response,
//! without making real network calls.

use braintree_sdk::api::{
    AddressInput, CustomerInput, SubscriptionInput, SubscriptionStatus, TransactionInput,
    TransactionStatus, TransactionType,
};
use braintree_sdk::types::{Environment, MerchantId, PrivateKey, PublicKey};
use braintree_sdk::{Braintree, BraintreeError};
use rust_decimal::Decimal;
use wiremock::matchers::{basic_auth, body_string, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MERCHANT: &str = "/merchants/test_merchant";

/// Create a Braintree facade pointing to the mock server
fn create_test_braintree(mock_server: &MockServer) -> Braintree {
    Braintree::builder()
        .environment(Environment::sandbox())
        .merchant_id(MerchantId::new("test_merchant").unwrap())
        .public_key(PublicKey::new("test_public").unwrap())
        .private_key(PrivateKey::new("test_private").unwrap())
        .base_url(mock_server.uri())
        .build()
        .unwrap()
}

fn xml(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body.as_bytes().to_vec(), "application/xml")
}

async fn received_body(mock_server: &MockServer) -> String {
    let requests = mock_server.received_requests().await.unwrap();
    let last = requests.last().expect("no request received");
    String::from_utf8(last.body.clone()).unwrap()
}

const SUBSCRIPTION_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<subscription>
  <id>dqhm6b</id>
  <plan-id>gold</plan-id>
  <payment-method-token>token123</payment-method-token>
  <price>10.00</price>
  <balance>0.00</balance>
  <billing-day-of-month type="integer">1</billing-day-of-month>
  <number-of-billing-cycles nil="true"/>
  <never-expires type="boolean">true</never-expires>
  <first-billing-date type="date">2016-05-01</first-billing-date>
  <status>Active</status>
</subscription>"#;

const SALE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<transaction>
  <id>7kwx2mg4</id>
  <type>sale</type>
  <amount>10.00</amount>
  <currency-iso-code>USD</currency-iso-code>
  <status>authorized</status>
  <order-id>order-42</order-id>
  <payment-instrument-type>credit_card</payment-instrument-type>
  <processor-response-code>1000</processor-response-code>
  <processor-response-text>Approved</processor-response-text>
</transaction>"#;

const CUSTOMER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<customer>
  <id>cust_1</id>
  <first-name>test</first-name>
  <last-name>create address</last-name>
  <email nil="true"/>
  <addresses type="array">
    <address>
      <id>ad</id>
      <customer-id>cust_1</customer-id>
      <street-address>1 Main St</street-address>
    </address>
  </addresses>
</customer>"#;

const ADDRESS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<address>
  <id>ad</id>
  <customer-id>cust_1</customer-id>
  <first-name>Jane</first-name>
  <street-address>1 Main St</street-address>
  <locality>Chicago</locality>
  <postal-code>60622</postal-code>
  <country-name>United States of America</country-name>
</address>"#;

/// Every request carries the API version, XML content type and basic auth
#[tokio::test]
async fn test_mock_request_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/customers/cust_1", MERCHANT)))
        .and(header("X-ApiVersion", "4"))
        .and(header("Content-Type", "application/xml"))
        .and(header("Accept", "application/xml"))
        .and(basic_auth("test_public", "test_private"))
        .respond_with(xml(200, CUSTOMER_XML))
        .expect(1)
        .mount(&mock_server)
        .await;

    let braintree = create_test_braintree(&mock_server);
    let customer = braintree.customer().find("cust_1").await.unwrap();

    assert_eq!(customer.id, "cust_1");

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].headers.get("authorization").unwrap(),
        "Basic dGVzdF9wdWJsaWM6dGVzdF9wcml2YXRl"
    );
}

#[tokio::test]
async fn test_mock_subscription_create() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/subscriptions", MERCHANT)))
        .and(body_string_contains("<plan-id>gold</plan-id>"))
        .respond_with(xml(201, SUBSCRIPTION_XML))
        .expect(1)
        .mount(&mock_server)
        .await;

    let braintree = create_test_braintree(&mock_server);
    let input = SubscriptionInput {
        plan_id: "gold".to_string(),
        payment_method_token: "token123".to_string(),
        ..Default::default()
    };
    let subscription = braintree.subscription().create(&input).await.unwrap();

    assert_eq!(subscription.id, "dqhm6b");
    assert_eq!(subscription.plan_id, input.plan_id);
    assert_eq!(subscription.payment_method_token, input.payment_method_token);
    assert_eq!(subscription.status, SubscriptionStatus::Active);
    assert_eq!(subscription.price, Decimal::new(1000, 2));
    assert_eq!(subscription.number_of_billing_cycles, 0);
    assert!(subscription.never_expires);
    assert_eq!(
        subscription.first_billing_date.unwrap().to_string(),
        "2016-05-01"
    );

    let body = received_body(&mock_server).await;
    assert!(body.contains("<payment-method-token>token123</payment-method-token>"));
    assert!(!body.contains("<price>"));
    assert!(!body.contains("<trial-period>"));
    assert!(!body.contains("<billing-day-of-month>"));
    assert!(!body.contains("<id>"));
}

#[tokio::test]
async fn test_mock_subscription_find() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/subscriptions/dqhm6b", MERCHANT)))
        .respond_with(xml(200, SUBSCRIPTION_XML))
        .expect(1)
        .mount(&mock_server)
        .await;

    let braintree = create_test_braintree(&mock_server);
    let subscription = braintree.subscription().find("dqhm6b").await.unwrap();

    assert_eq!(subscription.id, "dqhm6b");
    assert_eq!(subscription.billing_day_of_month, 1);

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_mock_subscription_update_sends_explicit_zero_price() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("{}/subscriptions/dqhm6b", MERCHANT)))
        .respond_with(xml(200, SUBSCRIPTION_XML))
        .expect(1)
        .mount(&mock_server)
        .await;

    let braintree = create_test_braintree(&mock_server);
    let input = SubscriptionInput {
        id: "dqhm6b".to_string(),
        plan_id: "gold".to_string(),
        price: Some(Decimal::ZERO),
        ..Default::default()
    };
    braintree.subscription().update(&input).await.unwrap();

    let body = received_body(&mock_server).await;
    assert!(body.contains("<id>dqhm6b</id>"));
    assert!(body.contains("<price>0</price>"));
}

#[tokio::test]
async fn test_mock_subscription_cancel() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("{}/subscriptions/dqhm6b/cancel", MERCHANT)))
        .respond_with(xml(
            200,
            "<subscription><id>dqhm6b</id><status>Canceled</status></subscription>",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let braintree = create_test_braintree(&mock_server);
    let subscription = braintree.subscription().cancel("dqhm6b").await.unwrap();

    assert_eq!(subscription.status, SubscriptionStatus::Canceled);
    assert_eq!(subscription.status.to_string(), "Canceled");
}

#[tokio::test]
async fn test_mock_transaction_create() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/transactions", MERCHANT)))
        .and(body_string_contains("<amount>10.00</amount>"))
        .and(body_string_contains("<type>sale</type>"))
        .respond_with(xml(201, SALE_XML))
        .expect(1)
        .mount(&mock_server)
        .await;

    let braintree = create_test_braintree(&mock_server);
    let input = TransactionInput {
        amount: Decimal::new(1000, 2),
        kind: Some(TransactionType::Sale),
        payment_method_nonce: "fake-valid-nonce".to_string(),
        order_id: "order-42".to_string(),
        ..Default::default()
    };
    let transaction = braintree.transaction().create(&input).await.unwrap();

    assert_eq!(transaction.id, "7kwx2mg4");
    assert_eq!(transaction.amount, input.amount);
    assert_eq!(transaction.kind, input.kind);
    assert_eq!(transaction.order_id, input.order_id);
    assert_eq!(transaction.status, TransactionStatus::Authorized);
    assert_eq!(transaction.processor_response_code, "1000");

    let body = received_body(&mock_server).await;
    assert!(body.contains("<payment-method-nonce>fake-valid-nonce</payment-method-nonce>"));
    assert!(!body.contains("<billing>"));
    assert!(!body.contains("<options>"));
    assert!(!body.contains("<recurring>"));
}

#[tokio::test]
async fn test_mock_transaction_find() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/transactions/7kwx2mg4", MERCHANT)))
        .respond_with(xml(200, SALE_XML))
        .expect(1)
        .mount(&mock_server)
        .await;

    let braintree = create_test_braintree(&mock_server);
    let transaction = braintree.transaction().find("7kwx2mg4").await.unwrap();

    assert_eq!(transaction.currency_iso_code, "USD");
}

#[tokio::test]
async fn test_mock_transaction_lifecycle_actions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("{}/transactions/7kwx2mg4/settle", MERCHANT)))
        .respond_with(xml(
            200,
            "<transaction><id>7kwx2mg4</id><status>settled</status></transaction>",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("{}/transactions/7kwx2mg4/refund", MERCHANT)))
        .respond_with(xml(
            201,
            "<transaction><id>credit01</id><type>credit</type><status>submitted_for_settlement</status><refunded-transaction-id>7kwx2mg4</refunded-transaction-id></transaction>",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path(format!("{}/transactions/auth0001/void", MERCHANT)))
        .respond_with(xml(
            200,
            "<transaction><id>auth0001</id><status>voided</status></transaction>",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let braintree = create_test_braintree(&mock_server);
    let gateway = braintree.transaction();

    let settled = gateway.settle("7kwx2mg4").await.unwrap();
    assert_eq!(settled.status, TransactionStatus::Settled);

    let refund = gateway.refund("7kwx2mg4").await.unwrap();
    assert_eq!(refund.id, "credit01");
    assert_eq!(refund.kind, Some(TransactionType::Credit));
    assert_eq!(refund.refunded_transaction_id, "7kwx2mg4");

    let voided = gateway.void("auth0001").await.unwrap();
    assert_eq!(voided.status, TransactionStatus::Voided);
}

#[tokio::test]
async fn test_mock_customer_create() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/customers", MERCHANT)))
        .and(body_string(
            "<customer><first-name>test</first-name><last-name>create address</last-name></customer>",
        ))
        .respond_with(xml(201, CUSTOMER_XML))
        .expect(1)
        .mount(&mock_server)
        .await;

    let braintree = create_test_braintree(&mock_server);
    let input = CustomerInput {
        first_name: "test".to_string(),
        last_name: "create address".to_string(),
        ..Default::default()
    };
    let customer = braintree.customer().create(&input).await.unwrap();

    assert_eq!(customer.id, "cust_1");
    assert_eq!(customer.first_name, input.first_name);
    assert_eq!(customer.last_name, input.last_name);
    assert_eq!(customer.email, "");
    assert_eq!(customer.addresses.len(), 1);
    assert_eq!(customer.addresses[0].street_address, "1 Main St");
}

#[tokio::test]
async fn test_mock_customer_update() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("{}/customers/cust_1", MERCHANT)))
        .and(body_string_contains("<company>Acme</company>"))
        .respond_with(xml(200, "<customer><id>cust_1</id><company>Acme</company></customer>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let braintree = create_test_braintree(&mock_server);
    let input = CustomerInput {
        id: "cust_1".to_string(),
        company: "Acme".to_string(),
        ..Default::default()
    };
    let customer = braintree.customer().update(&input).await.unwrap();

    assert_eq!(customer.company, "Acme");
    assert!(customer.addresses.is_empty());
}

#[tokio::test]
async fn test_mock_address_create() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/customers/cust_1/addresses", MERCHANT)))
        .respond_with(xml(201, ADDRESS_XML))
        .expect(1)
        .mount(&mock_server)
        .await;

    let braintree = create_test_braintree(&mock_server);
    let input = AddressInput {
        customer_id: "cust_1".to_string(),
        first_name: "Jane".to_string(),
        street_address: "1 Main St".to_string(),
        locality: "Chicago".to_string(),
        postal_code: "60622".to_string(),
        country_name: "United States of America".to_string(),
        ..Default::default()
    };
    let address = braintree.address().create(&input).await.unwrap();

    assert_eq!(address.id, "ad");
    assert_eq!(address.customer_id, input.customer_id);
    assert_eq!(address.first_name, input.first_name);
    assert_eq!(address.street_address, input.street_address);
    assert_eq!(address.locality, input.locality);
    assert_eq!(address.postal_code, input.postal_code);
    assert_eq!(address.country_name, input.country_name);

    let body = received_body(&mock_server).await;
    assert!(!body.contains("customer-id"));
    assert!(!body.contains("<company>"));
}

/// Without a customer the address path has no owner and the gateway 404s
#[tokio::test]
async fn test_mock_address_create_without_customer_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/customers//addresses", MERCHANT)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let braintree = create_test_braintree(&mock_server);
    let input = AddressInput {
        street_address: "1 Main St".to_string(),
        ..Default::default()
    };
    let err = braintree.address().create(&input).await.unwrap_err();

    assert!(matches!(err, BraintreeError::NotFound));
    assert_eq!(err.to_string(), "404 Not Found");
}

#[tokio::test]
async fn test_mock_address_find_and_update() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/customers/cust_1/addresses/ad", MERCHANT)))
        .respond_with(xml(200, ADDRESS_XML))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path(format!("{}/customers/cust_1/addresses/ad", MERCHANT)))
        .and(body_string("<address><locality>Evanston</locality></address>"))
        .respond_with(xml(
            200,
            "<address><id>ad</id><customer-id>cust_1</customer-id><locality>Evanston</locality></address>",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let braintree = create_test_braintree(&mock_server);
    let gateway = braintree.address();

    let found = gateway.find("cust_1", "ad").await.unwrap();
    assert_eq!(found.locality, "Chicago");

    let input = AddressInput {
        customer_id: "cust_1".to_string(),
        locality: "Evanston".to_string(),
        ..Default::default()
    };
    let updated = gateway.update("ad", &input).await.unwrap();
    assert_eq!(updated.locality, "Evanston");
}

/// Identifiers are percent-encoded as a single path segment
#[tokio::test]
async fn test_mock_ids_are_path_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/customers/a%2Fb", MERCHANT)))
        .respond_with(xml(200, "<customer><id>a/b</id></customer>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let braintree = create_test_braintree(&mock_server);
    let customer = braintree.customer().find("a/b").await.unwrap();

    assert_eq!(customer.id, "a/b");
}

/// One client value is safe to share across concurrent tasks
#[tokio::test]
async fn test_mock_concurrent_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/transactions/7kwx2mg4", MERCHANT)))
        .respond_with(xml(200, SALE_XML))
        .expect(8)
        .mount(&mock_server)
        .await;

    let braintree = create_test_braintree(&mock_server);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let braintree = braintree.clone();
            tokio::spawn(async move { braintree.transaction().find("7kwx2mg4").await })
        })
        .collect();

    let results = futures::future::join_all(handles).await;
    for result in results {
        let transaction = result.unwrap().unwrap();
        assert_eq!(transaction.id, "7kwx2mg4");
    }
}
