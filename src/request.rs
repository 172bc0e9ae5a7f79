//! Turns an operation descriptor into a transport-ready HTTP request.
//!
//! GET requests carry their parameters in the query string and are never
//! signed. Everything else is a JSON body; private calls get `partnerCode`
//! and `signature` injected next to the request fields.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, Url};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, SdkError};
use crate::keypair::PartnerSigningKey;
use crate::signing::{PartnerCredentials, SigningPayload};
use crate::transport::HttpRequest;

pub const DEFAULT_USER_AGENT: &str = concat!("aliniex-rust-sdk/", env!("CARGO_PKG_VERSION"));

/// Whether a call is signed.
#[derive(Debug, Clone)]
pub enum Access {
    /// No signature, no `partnerCode`.
    Public,
    /// Sign these exact bytes.
    Signed(SigningPayload),
}

/// One API call before it is turned into HTTP.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: String,
    pub params: Value,
    pub headers: HeaderMap,
    pub access: Access,
}

impl ApiRequest {
    /// Descriptor for a signed call; `signing_data` must come from the
    /// matching function in [`crate::signing`].
    pub fn signed<P: Serialize>(
        method: Method,
        endpoint: &str,
        params: &P,
        signing_data: SigningPayload,
    ) -> Result<Self> {
        Self::new(method, endpoint, params, Access::Signed(signing_data))
    }

    /// Descriptor for a public call.
    pub fn public<P: Serialize>(method: Method, endpoint: &str, params: &P) -> Result<Self> {
        Self::new(method, endpoint, params, Access::Public)
    }

    fn new<P: Serialize>(method: Method, endpoint: &str, params: &P, access: Access) -> Result<Self> {
        let params =
            serde_json::to_value(params).map_err(|e| SdkError::InvalidParams(e.to_string()))?;
        Ok(Self {
            method,
            endpoint: endpoint.to_string(),
            params,
            headers: HeaderMap::new(),
            access,
        })
    }

    /// Add an extra header. `Content-Type` and `User-Agent` are always
    /// overwritten by the builder.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn is_public(&self) -> bool {
        matches!(self.access, Access::Public)
    }
}

/// Builds [`HttpRequest`]s for one partner.
pub struct RequestBuilder {
    base_url: String,
    credentials: PartnerCredentials,
    signing_key: PartnerSigningKey,
    user_agent: HeaderValue,
    debug: bool,
}

impl RequestBuilder {
    pub fn new(
        base_url: &str,
        credentials: PartnerCredentials,
        signing_key: PartnerSigningKey,
        user_agent: HeaderValue,
        debug: bool,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            signing_key,
            user_agent,
            debug,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Assemble method, URL, headers and body for `request`.
    ///
    /// `None` yields [`SdkError::NilRequest`].
    pub fn build(&self, request: Option<&ApiRequest>) -> Result<HttpRequest> {
        let request = request.ok_or(SdkError::NilRequest)?;

        let full_url = format!("{}{}", self.base_url, request.endpoint);

        let mut headers = request.headers.clone();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, self.user_agent.clone());

        if request.method == Method::GET {
            return self.build_get(request, full_url, headers);
        }

        let mut body_map = params_to_map(&request.params)?;

        if let Access::Signed(signing_data) = &request.access {
            if self.debug {
                debug!(digest = %signing_data.digest_hex(), "signing payload");
            }
            let signature = self
                .signing_key
                .sign(signing_data.as_bytes())
                .map_err(SdkError::RequestSign)?;

            body_map.insert(
                "partnerCode".to_string(),
                Value::String(self.credentials.partner_code().to_string()),
            );
            body_map.insert("signature".to_string(), Value::String(signature));
        }

        let body = serde_json::to_vec(&Value::Object(body_map)).map_err(SdkError::RequestEncode)?;

        if self.debug {
            debug!(url = %full_url, "http request");
            debug!(body = %String::from_utf8_lossy(&body), "http request body");
        }

        Ok(HttpRequest {
            method: request.method.clone(),
            url: full_url,
            headers,
            body: Some(body),
        })
    }

    fn build_get(&self, request: &ApiRequest, full_url: String, headers: HeaderMap) -> Result<HttpRequest> {
        let params = params_to_map(&request.params)?;

        let mut url = Url::parse(&full_url).map_err(|e| SdkError::InvalidBaseUrl {
            url: full_url.clone(),
            reason: e.to_string(),
        })?;

        if !params.is_empty() {
            let mut pairs: Vec<(&String, String)> =
                params.iter().map(|(k, v)| (k, query_value(v))).collect();
            pairs.sort_by(|a, b| a.0.cmp(b.0));

            let mut query = url.query_pairs_mut();
            for (key, value) in &pairs {
                query.append_pair(key, value);
            }
        }

        if self.debug {
            debug!(url = %url, "http request");
        }

        Ok(HttpRequest {
            method: Method::GET,
            url: url.to_string(),
            headers,
            body: None,
        })
    }
}

/// The parameter bag must be a JSON object (or nothing at all).
fn params_to_map(params: &Value) -> Result<Map<String, Value>> {
    match params {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map.clone()),
        other => Err(SdkError::InvalidParams(format!(
            "expected a JSON object, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypair::PartnerVerifyingKey;
    use serde_json::json;

    const PKCS8_PRIVATE: &str = include_str!("../tests/fixtures/partner_pkcs8.pem");

    fn builder() -> RequestBuilder {
        RequestBuilder::new(
            "https://sandbox.alixpay.com/",
            PartnerCredentials::new("TEST_PARTNER", "TEST_SECRET"),
            PartnerSigningKey::from_pem(PKCS8_PRIVATE.as_bytes()).unwrap(),
            HeaderValue::from_static(DEFAULT_USER_AGENT),
            false,
        )
    }

    fn body_json(request: &HttpRequest) -> Map<String, Value> {
        let body = request.body.as_ref().expect("POST has a body");
        serde_json::from_slice::<Value>(body)
            .unwrap()
            .as_object()
            .unwrap()
            .clone()
    }

    #[test]
    fn test_nil_request() {
        assert!(matches!(builder().build(None), Err(SdkError::NilRequest)));
    }

    #[test]
    fn test_get_uses_query_and_no_body() {
        let api_request = ApiRequest::public(
            Method::GET,
            "/api/v2/public/get-qr-code-info",
            &json!({"qrContent": "0002 01&x=y", "amount": 100000, "flag": true}),
        )
        .unwrap();

        let built = builder().build(Some(&api_request)).unwrap();
        assert_eq!(built.method, Method::GET);
        assert!(built.body.is_none());

        let url = Url::parse(&built.url).unwrap();
        assert_eq!(url.path(), "/api/v2/public/get-qr-code-info");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("amount".to_string(), "100000".to_string()),
                ("flag".to_string(), "true".to_string()),
                ("qrContent".to_string(), "0002 01&x=y".to_string()),
            ]
        );
        assert_eq!(built.headers[CONTENT_TYPE], "application/json");
        assert_eq!(built.headers[USER_AGENT], DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_get_ignores_signing_data() {
        let creds = PartnerCredentials::new("TEST_PARTNER", "TEST_SECRET");
        let payload = crate::signing::order_details_payload(
            &creds,
            &crate::types::GetOrderDetailsRequest {
                external_order_id: "ORD1".to_string(),
            },
        );
        let api_request =
            ApiRequest::signed(Method::GET, "/x", &json!({"externalOrderId": "ORD1"}), payload)
                .unwrap();

        let built = builder().build(Some(&api_request)).unwrap();
        assert!(built.body.is_none());
        assert!(!built.url.contains("signature"));
        assert!(!built.url.contains("partnerCode"));
    }

    #[test]
    fn test_get_query_number_text() {
        let api_request = ApiRequest::public(
            Method::GET,
            "/x",
            &json!({"big": 1e21, "half": 2.5, "nested": {"a": 1}, "none": null}),
        )
        .unwrap();

        let built = builder().build(Some(&api_request)).unwrap();
        let url = Url::parse(&built.url).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("big".to_string(), "1e21".to_string()),
                ("half".to_string(), "2.5".to_string()),
                ("nested".to_string(), r#"{"a":1}"#.to_string()),
                ("none".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_get_without_params_has_no_query() {
        let api_request = ApiRequest::public(Method::GET, "/ping", &Value::Null).unwrap();
        let built = builder().build(Some(&api_request)).unwrap();
        assert_eq!(built.url, "https://sandbox.alixpay.com/ping");
    }

    #[test]
    fn test_signed_post_injects_partner_code_and_signature() {
        let creds = PartnerCredentials::new("TEST_PARTNER", "TEST_SECRET");
        let params = crate::types::KycInformationRequest {
            user_email: "a@b.com".to_string(),
        };
        let payload = crate::signing::kyc_information_payload(&creds, &params);
        let api_request =
            ApiRequest::signed(Method::POST, "/api/v2/user/get-kyc-information", &params, payload.clone())
                .unwrap();

        let built = builder().build(Some(&api_request)).unwrap();
        assert_eq!(built.url, "https://sandbox.alixpay.com/api/v2/user/get-kyc-information");

        let body = body_json(&built);
        assert_eq!(body["userEmail"], json!("a@b.com"));
        assert_eq!(body["partnerCode"], json!("TEST_PARTNER"));
        assert_eq!(body.len(), 3);

        let signature = body["signature"].as_str().unwrap();
        let verifier = PartnerVerifyingKey::from_pem(
            include_str!("../tests/fixtures/partner_public_pkix.pem").as_bytes(),
        )
        .unwrap();
        verifier.verify(payload.as_bytes(), signature).unwrap();
        assert!(!String::from_utf8_lossy(built.body.as_ref().unwrap()).contains("TEST_SECRET"));
    }

    #[test]
    fn test_public_post_has_no_signature() {
        let api_request =
            ApiRequest::public(Method::POST, "/public", &json!({"qrContent": "abc"})).unwrap();
        let body = body_json(&builder().build(Some(&api_request)).unwrap());
        assert!(!body.contains_key("partnerCode"));
        assert!(!body.contains_key("signature"));
        assert_eq!(body["qrContent"], json!("abc"));
    }

    #[test]
    fn test_non_object_params_are_invalid() {
        let api_request = ApiRequest::public(Method::POST, "/x", &vec![1, 2, 3]).unwrap();
        assert!(matches!(
            builder().build(Some(&api_request)),
            Err(SdkError::InvalidParams(_))
        ));

        let api_request = ApiRequest::public(Method::GET, "/x", &"text").unwrap();
        assert!(matches!(
            builder().build(Some(&api_request)),
            Err(SdkError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_unserializable_params_are_invalid() {
        let mut params = std::collections::HashMap::new();
        params.insert((1, 2), "tuple keys cannot be JSON object keys");
        assert!(matches!(
            ApiRequest::public(Method::POST, "/x", &params),
            Err(SdkError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_fixed_headers_override_custom_ones() {
        let api_request = ApiRequest::public(Method::POST, "/x", &json!({}))
            .unwrap()
            .with_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
            .with_header(
                HeaderName::from_static("x-request-id"),
                HeaderValue::from_static("req-1"),
            );

        let built = builder().build(Some(&api_request)).unwrap();
        assert_eq!(built.headers[CONTENT_TYPE], "application/json");
        assert_eq!(built.headers["x-request-id"], "req-1");
    }
}
