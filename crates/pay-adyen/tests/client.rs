use pay_adyen::{AdyenCheckoutClient, AdyenConfig};
use pay_core::{
    Amount, Channel, PaymentDetailsRequest, PaymentError, PaymentGateway, PaymentMethodsRequest,
    PaymentRequest, ResultCode,
};
use serde_json::json;
use std::collections::HashMap;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AdyenCheckoutClient {
    let config = AdyenConfig::new("test-api-key", "TestMerchant", "test_CLIENTKEY")
        .with_api_base_url(server.uri());
    AdyenCheckoutClient::new(config).unwrap()
}

fn payment_request() -> PaymentRequest {
    PaymentRequest {
        merchant_account: "TestMerchant".into(),
        channel: Channel::Web,
        amount: Amount::new("EUR", 1000),
        reference: "order-1".into(),
        return_url: "http://localhost:8080/api/handleShopperRedirect?orderRef=order-1".into(),
        payment_method: json!({"type": "scheme"}),
        browser_info: None,
        additional_data: HashMap::from([("allow3DS2".to_string(), "true".to_string())]),
        shopper_ip: None,
    }
}

#[tokio::test]
async fn payment_methods_posts_merchant_and_channel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v68/paymentMethods"))
        .and(header("x-API-key", "test-api-key"))
        .and(body_json(json!({"merchantAccount": "TestMerchant", "channel": "Web"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "paymentMethods": [
                {"name": "Credit Card", "type": "scheme", "brands": ["visa", "mc"]},
                {"name": "iDEAL", "type": "ideal"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .payment_methods(&PaymentMethodsRequest::web("TestMerchant"))
        .await
        .unwrap();

    assert_eq!(response.methods().len(), 2);
    assert_eq!(response.methods()[0]["brands"], json!(["visa", "mc"]));
}

#[tokio::test]
async fn payments_returns_action_with_payment_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v68/payments"))
        .and(body_partial_json(json!({
            "reference": "order-1",
            "amount": {"currency": "EUR", "value": 1000},
            "additionalData": {"allow3DS2": "true"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultCode": "RedirectShopper",
            "action": {
                "type": "redirect",
                "method": "GET",
                "paymentData": "tok123",
                "url": "https://test.adyen.com/hpp/redirect.shtml"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).payments(&payment_request()).await.unwrap();

    assert_eq!(response.result_code, Some(ResultCode::RedirectShopper));
    assert_eq!(response.continuation_token(), Some("tok123"));
}

#[tokio::test]
async fn payment_details_posts_details_and_payment_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v68/payments/details"))
        .and(body_json(json!({
            "details": {"redirectResult": "abc"},
            "paymentData": "tok123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultCode": "Authorised",
            "pspReference": "851234567890"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request: PaymentDetailsRequest = serde_json::from_value(json!({
        "details": {"redirectResult": "abc"},
        "paymentData": "tok123"
    }))
    .unwrap();

    let response = client_for(&server).payment_details(&request).await.unwrap();
    assert_eq!(response.result_code, Some(ResultCode::Authorised));
    assert_eq!(response.psp_reference.as_deref(), Some("851234567890"));
}

#[tokio::test]
async fn service_error_becomes_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v68/payments"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "status": 422,
            "errorCode": "14_030",
            "message": "Return URL is missing.",
            "errorType": "validation"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .payments(&payment_request())
        .await
        .unwrap_err();

    match err {
        PaymentError::ProviderError {
            provider,
            status,
            message,
        } => {
            assert_eq!(provider, "adyen");
            assert_eq!(status, 422);
            assert!(message.contains("Return URL is missing."));
            assert!(message.contains("14_030"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v68/paymentMethods"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .payment_methods(&PaymentMethodsRequest::web("TestMerchant"))
        .await
        .unwrap_err();

    assert!(matches!(err, PaymentError::ProviderError { status: 401, ref message, .. } if message.contains("Unauthorized")));
}

#[tokio::test]
async fn malformed_success_body_is_a_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v68/payments/details"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .payment_details(&PaymentDetailsRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, PaymentError::Serialization(_)));
}

#[tokio::test]
async fn unreachable_gateway_is_a_network_error() {
    let config = AdyenConfig::new("key", "TestMerchant", "test_KEY")
        .with_api_base_url("http://127.0.0.1:9");
    let client = AdyenCheckoutClient::new(config).unwrap();

    let err = client
        .payment_methods(&PaymentMethodsRequest::web("TestMerchant"))
        .await
        .unwrap_err();

    assert!(matches!(err, PaymentError::NetworkError(_)));
}
