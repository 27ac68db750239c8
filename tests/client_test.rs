use anyhow::Result;
use chrono::NaiveDate;
use httpmock::prelude::*;
use rust_decimal_macros::dec;
use taxlink::{
    Address, Environment, LineItem, Order, Refund, RestTaxApi, Shipment, TaxApi, TaxConfig,
    TaxError, TaxServiceClient, TransactionType,
};

fn address() -> Address {
    Address {
        line1: "2 Penn Plaza".to_string(),
        line2: None,
        city: "New York".to_string(),
        region: "NY".to_string(),
        postal_code: "10001".to_string(),
        country: "US".to_string(),
    }
}

fn config(base_url: &str, raise_exceptions: bool) -> TaxConfig {
    TaxConfig {
        account: "2000000000".to_string(),
        license_key: "license".to_string(),
        environment: Environment::Sandbox,
        company_code: "DEFAULT".to_string(),
        origin_address: address(),
        goods_tax_code: "P0000000".to_string(),
        shipping_tax_code: "FR020100".to_string(),
        raise_exceptions,
        tax_calculation_enabled: true,
        base_url_override: Some(base_url.to_string()),
    }
}

fn order() -> Order {
    Order {
        number: "R731071205".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        currency: "USD".to_string(),
        customer_code: "customer@example.com".to_string(),
        ship_address: Some(address()),
        bill_address: Some(address()),
        line_items: vec![
            LineItem {
                id: 1,
                sku: "ROR-00011".to_string(),
                name: "Ruby on Rails Tote".to_string(),
                quantity: 2,
                price: dec!(10.00),
                promo_total: dec!(0),
                tax_code: None,
            },
            LineItem {
                id: 2,
                sku: "ROR-00012".to_string(),
                name: "Ruby on Rails Bag".to_string(),
                quantity: 1,
                price: dec!(22.99),
                promo_total: dec!(0),
                tax_code: None,
            },
        ],
        shipments: vec![Shipment {
            number: "H23439230932".to_string(),
            cost: dec!(5.00),
            tax_code: None,
        }],
    }
}

static TRACING: std::sync::Once = std::sync::Once::new();

fn client(server: &MockServer, raise_exceptions: bool) -> Result<TaxServiceClient<RestTaxApi>> {
    TRACING.call_once(|| taxlink::utils::logger::init_logger(true));
    let base_url = format!("http://{}", server.address());
    let cfg = config(&base_url, raise_exceptions);
    let api = RestTaxApi::from_config(&cfg)?;
    Ok(TaxServiceClient::new(api, cfg))
}

#[tokio::test]
async fn compute_tax_submits_all_lines_and_returns_clean_response() -> Result<()> {
    let server = MockServer::start();

    let tax_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v2/transactions/createoradjust")
            .header_exists("authorization")
            .header("X-Avalara-Client", "taxlink; 0.1.0; rest; v2")
            .body_contains("\"companyCode\":\"DEFAULT\"")
            .body_contains("\"1-LI\"")
            .body_contains("\"2-LI\"")
            .body_contains("\"H23439230932-FR\"");
        then.status(201)
            .json_body(serde_json::json!({"totalTax": 2.51, "status": "Temporary"}));
    });

    let client = client(&server, false)?;
    let response = client
        .compute_tax(&order(), TransactionType::SalesOrder, None)
        .await?;

    tax_mock.assert();
    assert!(!response.is_error());
    assert_eq!(response.result["totalTax"], 2.51);
    Ok(())
}

#[tokio::test]
async fn service_error_is_returned_not_raised_in_lenient_mode() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/api/v2/transactions/createoradjust");
        then.status(400).json_body(serde_json::json!({
            "error": {"code": "TaxCodeNotFound", "message": "Tax code was not found"}
        }));
    });

    let client = client(&server, false)?;
    let response = client
        .compute_tax(&order(), TransactionType::SalesOrder, None)
        .await?;

    assert!(response.is_error());
    assert_eq!(response.result["error"]["code"], "TaxCodeNotFound");
    Ok(())
}

#[tokio::test]
async fn service_error_raises_in_strict_mode() -> Result<()> {
    let server = MockServer::start();

    let payload = serde_json::json!({
        "error": {"code": "TaxCodeNotFound", "message": "Tax code was not found"}
    });
    let body = payload.clone();
    server.mock(move |when, then| {
        when.method(POST).path("/api/v2/transactions/createoradjust");
        then.status(400).json_body(body.clone());
    });

    let client = client(&server, true)?;
    let err = client
        .compute_tax(&order(), TransactionType::SalesOrder, None)
        .await
        .unwrap_err();

    match err {
        TaxError::ServiceRequest { result } => {
            assert_eq!(result, payload);
        }
        other => panic!("expected ServiceRequest, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn compute_tax_transport_failure_propagates() -> Result<()> {
    // Nothing listens on this port.
    let cfg = config("http://127.0.0.1:9", true);
    let api = RestTaxApi::from_config(&cfg)?;
    let client = TaxServiceClient::new(api, cfg);

    let err = client
        .compute_tax(&order(), TransactionType::SalesOrder, None)
        .await
        .unwrap_err();

    assert!(matches!(err, TaxError::Api(_)));
    Ok(())
}

#[tokio::test]
async fn cancel_tax_voids_by_company_and_transaction_code() -> Result<()> {
    let server = MockServer::start();

    let void_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v2/companies/DEFAULT/transactions/R731071205/void")
            .body_contains("DocVoided");
        then.status(200)
            .json_body(serde_json::json!({"status": "Cancelled"}));
    });

    let client = client(&server, false)?;
    let response = client.cancel_tax("R731071205").await?;

    void_mock.assert();
    assert!(!response.is_error());
    assert_eq!(response.result["status"], "Cancelled");
    Ok(())
}

#[tokio::test]
async fn validate_address_returns_resolved_address() -> Result<()> {
    let server = MockServer::start();

    let resolve_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v2/addresses/resolve")
            .body_contains("\"postalCode\":\"10001\"");
        then.status(200).json_body(serde_json::json!({
            "validatedAddresses": [{"postalCode": "10001-2062"}]
        }));
    });

    let client = client(&server, false)?;
    let response = client.validate_address(&address()).await?;

    resolve_mock.assert();
    assert!(!response.is_error());
    assert_eq!(response.description(), "Address Validation");
    Ok(())
}

#[tokio::test]
async fn validate_address_degrades_to_synthetic_error_response() -> Result<()> {
    // Unreachable transport: the call must not fail, it must come back as an
    // error-flagged response carrying the transport error's message.
    let cfg = config("http://127.0.0.1:9", false);
    let api = RestTaxApi::from_config(&cfg)?;
    let client = TaxServiceClient::new(api, cfg.clone());

    // The same call through the bare transport yields the error text the
    // synthetic response must carry.
    let bare_api = RestTaxApi::from_config(&cfg)?;
    let transport_error = bare_api.validate_address(&address()).await.unwrap_err();

    let response = client.validate_address(&address()).await?;

    assert!(response.is_error());
    let message = response.result["error"]["message"]
        .as_str()
        .expect("synthetic error carries a message string");
    assert_eq!(message, transport_error.to_string());
    Ok(())
}

#[tokio::test]
async fn ping_queries_fixed_reference_rates() -> Result<()> {
    let server = MockServer::start();

    let rates_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v2/taxrates/bypostalcode")
            .query_param("country", "US")
            .query_param("postalCode", "07801");
        then.status(200)
            .json_body(serde_json::json!({"totalRate": 6.625}));
    });

    let client = client(&server, false)?;
    let reply = client.ping().await?;

    rates_mock.assert();
    assert_eq!(reply, serde_json::json!({"totalRate": 6.625}));
    Ok(())
}

#[tokio::test]
async fn return_order_refund_reaches_the_service_sign_inverted() -> Result<()> {
    let server = MockServer::start();

    let tax_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v2/transactions/createoradjust")
            .body_contains("\"type\":\"ReturnOrder\"")
            .body_contains("\"amount\":\"-10.00\"");
        then.status(201)
            .json_body(serde_json::json!({"totalTax": -0.66}));
    });

    let refund = Refund {
        id: 7,
        amount: dec!(10.00),
        reason: None,
        line_item_ids: vec![],
    };
    let client = client(&server, false)?;
    let response = client
        .compute_tax(&order(), TransactionType::ReturnOrder, Some(&refund))
        .await?;

    tax_mock.assert();
    assert!(!response.is_error());
    Ok(())
}
