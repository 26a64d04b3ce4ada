//! # Checkout Wire Types
//!
//! Request and response bodies exchanged with the payment gateway.
//! Field names follow the Checkout API (camelCase). Every response type keeps
//! the fields it does not model in a flattened `extra` map, so a response can
//! be relayed to the browser as the gateway produced it. Absent fields stay
//! absent; a modeled field sent as an explicit `null` is omitted on relay.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// JSON object used for opaque, pass-through payloads
pub type JsonObject = Map<String, Value>;

/// A monetary amount in minor units (1000 = 10.00 EUR)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// ISO 4217 currency code
    pub currency: String,
    /// Value in minor units
    pub value: i64,
}

impl Amount {
    pub fn new(currency: impl Into<String>, value: i64) -> Self {
        Self {
            currency: currency.into(),
            value,
        }
    }
}

/// Sales channel a payment originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    #[serde(rename = "Web")]
    Web,
    #[serde(rename = "iOS")]
    Ios,
    #[serde(rename = "Android")]
    Android,
}

/// `/paymentMethods` request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodsRequest {
    pub merchant_account: String,
    pub channel: Channel,
}

impl PaymentMethodsRequest {
    /// Query for web checkout on the given merchant account
    pub fn web(merchant_account: impl Into<String>) -> Self {
        Self {
            merchant_account: merchant_account.into(),
            channel: Channel::Web,
        }
    }
}

/// `/paymentMethods` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_methods: Option<Vec<JsonObject>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_payment_methods: Option<Vec<JsonObject>>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl PaymentMethodsResponse {
    /// Available payment methods, empty when the gateway sent none
    pub fn methods(&self) -> &[JsonObject] {
        self.payment_methods.as_deref().unwrap_or_default()
    }
}

/// `/payments` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub merchant_account: String,
    pub channel: Channel,
    pub amount: Amount,
    /// Merchant order reference
    pub reference: String,
    /// Where the shopper lands after an out-of-band authentication
    pub return_url: String,
    /// Shopper-selected payment method, as produced by the drop-in
    pub payment_method: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_info: Option<Value>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub additional_data: HashMap<String, String>,
    #[serde(
        rename = "shopperIP",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub shopper_ip: Option<String>,
}

/// Follow-up action the shopper must complete (redirect, 3DS challenge, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    /// Continuation token to replay on `/payments/details`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Action {
    /// The continuation token, if present and non-empty
    pub fn continuation_token(&self) -> Option<&str> {
        self.payment_data.as_deref().filter(|data| !data.is_empty())
    }
}

/// `/payments` and `/payments/details` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_code: Option<crate::outcome::ResultCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psp_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refusal_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl PaymentResponse {
    /// Continuation token carried by the follow-up action, if any
    pub fn continuation_token(&self) -> Option<&str> {
        self.action.as_ref().and_then(Action::continuation_token)
    }
}

/// `/payments/details` request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetailsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_data: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl PaymentDetailsRequest {
    /// Builder: set the continuation token
    pub fn with_payment_data(mut self, payment_data: Option<String>) -> Self {
        self.payment_data = payment_data;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::ResultCode;
    use serde_json::json;

    #[test]
    fn test_payment_request_wire_format() {
        let request = PaymentRequest {
            merchant_account: "TestMerchant".into(),
            channel: Channel::Web,
            amount: Amount::new("EUR", 1000),
            reference: "ref-1".into(),
            return_url: "http://localhost:8080/api/handleShopperRedirect?orderRef=ref-1".into(),
            payment_method: json!({"type": "scheme"}),
            browser_info: None,
            additional_data: HashMap::from([("allow3DS2".to_string(), "true".to_string())]),
            shopper_ip: Some("127.0.0.1".into()),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["merchantAccount"], "TestMerchant");
        assert_eq!(value["channel"], "Web");
        assert_eq!(value["amount"], json!({"currency": "EUR", "value": 1000}));
        assert_eq!(value["additionalData"]["allow3DS2"], "true");
        assert_eq!(value["shopperIP"], "127.0.0.1");
        assert!(value.get("browserInfo").is_none());
    }

    #[test]
    fn test_payment_response_preserves_unknown_fields() {
        let body = json!({
            "resultCode": "RedirectShopper",
            "action": {
                "type": "redirect",
                "paymentData": "Ab02b4c0!BQABAgA",
                "url": "https://test.adyen.com/hpp/3d/validate.shtml",
                "data": {"MD": "md", "PaReq": "pareq"}
            },
            "details": [{"key": "MD", "type": "text"}]
        });

        let response: PaymentResponse = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(response.result_code, Some(ResultCode::RedirectShopper));
        assert_eq!(response.continuation_token(), Some("Ab02b4c0!BQABAgA"));
        assert!(response.extra.contains_key("details"));

        assert_eq!(serde_json::to_value(&response).unwrap(), body);
    }

    #[test]
    fn test_empty_payment_data_is_not_a_token() {
        let response: PaymentResponse = serde_json::from_value(json!({
            "resultCode": "IdentifyShopper",
            "action": {"type": "threeDS2Fingerprint", "paymentData": ""}
        }))
        .unwrap();
        assert_eq!(response.continuation_token(), None);
    }

    #[test]
    fn test_payment_methods_relay_keeps_shape() {
        let bare: PaymentMethodsResponse =
            serde_json::from_value(json!({"storedPaymentMethods": []})).unwrap();
        assert!(bare.methods().is_empty());
        assert_eq!(
            serde_json::to_value(&bare).unwrap(),
            json!({"storedPaymentMethods": []})
        );

        let listed: PaymentMethodsResponse =
            serde_json::from_value(json!({"paymentMethods": [{"type": "scheme"}]})).unwrap();
        assert_eq!(listed.methods()[0]["type"], "scheme");
    }

    #[test]
    fn test_null_action_is_omitted_on_relay() {
        let response: PaymentResponse =
            serde_json::from_value(json!({"resultCode": "Authorised", "action": null})).unwrap();
        assert!(response.action.is_none());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"resultCode": "Authorised"})
        );
    }

    #[test]
    fn test_details_request_omits_absent_fields() {
        let request = PaymentDetailsRequest::default();
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({}));
    }
}
