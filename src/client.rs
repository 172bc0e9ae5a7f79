//! Main AliniexClient facade for the SDK.
//!
//! Provides one method per partner API operation. Each call builds its
//! signing payload, assembles the HTTP request, sends it once and decodes the
//! response envelope.

use reqwest::header::HeaderValue;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::error::{Result, SdkError};
use crate::keypair::PartnerSigningKey;
use crate::request::{ApiRequest, RequestBuilder, DEFAULT_USER_AGENT};
use crate::signing::{
    create_order_payload, kyc_information_payload, order_details_payload, submit_kyc_payload,
    wallet_balance_payload, PartnerCredentials,
};
use crate::transport::{Executor, HttpTransport, ReqwestTransport};
use crate::types::{
    ApiResponse, CreateOrderRequest, CreateOrderResponse, GetOrderDetailsRequest,
    GetQrCodeInfoRequest, GetWalletBalanceRequest, KycInformation, KycInformationRequest,
    OrderDetails, QrCodeInfo, SubmitKycRequest, SubmitKycResponse, WalletBalance,
    CREATE_ORDER_PATH, KYC_INFORMATION_PATH, ORDER_DETAILS_PATH, QR_CODE_INFO_PATH,
    SANDBOX_BASE_URL, SUBMIT_KYC_PATH, WALLET_BALANCE_PATH,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Aliniex client
#[derive(Clone)]
pub struct ClientConfig {
    /// Log request URLs and bodies at `debug` level
    pub debug: bool,
    /// Deadline for a single HTTP exchange; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// Sent as the `User-Agent` header
    pub user_agent: String,
    /// Custom transport; defaults to [`ReqwestTransport`]
    pub transport: Option<Arc<dyn HttpTransport>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            debug: std::env::var("ALINIEX_DEBUG")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            timeout: Some(
                std::env::var("ALINIEX_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(DEFAULT_TIMEOUT),
            ),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            transport: None,
        }
    }
}

impl ClientConfig {
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("debug", &self.debug)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

/// Partner credentials as loaded from the environment.
#[derive(Clone)]
pub struct Credentials {
    pub base_url: String,
    pub partner_code: String,
    pub secret_key: String,
    pub private_key_pem: String,
}

impl Credentials {
    /// Read `ALINIEX_BASE_URL` (sandbox by default), `ALINIEX_PARTNER_CODE`,
    /// `ALINIEX_SECRET_KEY`, and the private key from
    /// `ALINIEX_PRIVATE_KEY_PATH` or inline `ALINIEX_PRIVATE_KEY`.
    ///
    /// Missing values are left empty so that [`AliniexClient::new`] reports
    /// which one is absent.
    pub fn from_env() -> Result<Self> {
        let private_key_pem = match std::env::var("ALINIEX_PRIVATE_KEY_PATH") {
            Ok(path) if !path.is_empty() => std::fs::read_to_string(&path)
                .map_err(|e| SdkError::Config(format!("read {}: {}", path, e)))?,
            _ => std::env::var("ALINIEX_PRIVATE_KEY")
                .map(|inline| inline.replace("\\n", "\n"))
                .unwrap_or_default(),
        };

        Ok(Self {
            base_url: std::env::var("ALINIEX_BASE_URL")
                .unwrap_or_else(|_| SANDBOX_BASE_URL.to_string()),
            partner_code: std::env::var("ALINIEX_PARTNER_CODE").unwrap_or_default(),
            secret_key: std::env::var("ALINIEX_SECRET_KEY").unwrap_or_default(),
            private_key_pem,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("partner_code", &self.partner_code)
            .field("secret_key", &"<redacted>")
            .field("private_key_pem", &"<redacted>")
            .finish()
    }
}

/// The Aliniex partner API client.
///
/// Provides methods for:
/// - Creating sell orders and looking them up
/// - Reading and submitting user KYC
/// - Reading the partner wallet balance
/// - Decoding payment QR codes (public, unsigned)
///
/// The client is immutable after construction and can be shared across tasks.
pub struct AliniexClient {
    builder: RequestBuilder,
    executor: Executor,
    credentials: PartnerCredentials,
}

impl AliniexClient {
    /// Create a new client.
    ///
    /// Fails without touching the network if any input is empty (checked in
    /// argument order), the base URL is not absolute, or the key does not
    /// parse.
    pub fn new(
        base_url: &str,
        partner_code: &str,
        secret_key: &str,
        private_key_pem: &str,
        config: ClientConfig,
    ) -> Result<Self> {
        if base_url.is_empty() {
            return Err(SdkError::EmptyBaseUrl);
        }
        if partner_code.is_empty() {
            return Err(SdkError::EmptyPartnerCode);
        }
        if secret_key.is_empty() {
            return Err(SdkError::EmptySecretKey);
        }
        if private_key_pem.is_empty() {
            return Err(SdkError::EmptyPrivateKey);
        }

        validate_base_url(base_url)?;

        let signing_key = PartnerSigningKey::from_pem(private_key_pem.as_bytes())
            .map_err(SdkError::InvalidPrivateKey)?;

        let user_agent = if config.user_agent.is_empty() {
            HeaderValue::from_static(DEFAULT_USER_AGENT)
        } else {
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| SdkError::Config(format!("user agent: {}", e)))?
        };

        let credentials = PartnerCredentials::new(partner_code, secret_key);
        let builder = RequestBuilder::new(
            base_url,
            credentials.clone(),
            signing_key,
            user_agent,
            config.debug,
        );

        let transport = config
            .transport
            .unwrap_or_else(|| Arc::new(ReqwestTransport::new()));
        let executor = Executor::new(transport, config.timeout, config.debug);

        info!(
            "AliniexClient initialized for partner {} at {}",
            partner_code,
            builder.base_url()
        );

        Ok(Self {
            builder,
            executor,
            credentials,
        })
    }

    /// Create a client from [`Credentials::from_env`].
    pub fn from_env(config: ClientConfig) -> Result<Self> {
        let creds = Credentials::from_env()?;
        Self::new(
            &creds.base_url,
            &creds.partner_code,
            &creds.secret_key,
            &creds.private_key_pem,
            config,
        )
    }

    pub fn partner_code(&self) -> &str {
        self.credentials.partner_code()
    }

    pub fn base_url(&self) -> &str {
        self.builder.base_url()
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Create a sell order (crypto in, fiat out to the given bank account).
    pub async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<ApiResponse<CreateOrderResponse>> {
        let payload = create_order_payload(&self.credentials, request);
        let api_request = ApiRequest::signed(Method::POST, CREATE_ORDER_PATH, request, payload)?;

        info!(
            "Creating sell order {}: {} {} for {}",
            request.external_order_id, request.fiat_amount, request.fiat_currency, request.currency
        );

        self.call(&api_request).await
    }

    /// Look up an order by the partner's external order ID.
    pub async fn get_order_details(
        &self,
        request: &GetOrderDetailsRequest,
    ) -> Result<ApiResponse<OrderDetails>> {
        let payload = order_details_payload(&self.credentials, request);
        let api_request = ApiRequest::signed(Method::POST, ORDER_DETAILS_PATH, request, payload)?;
        self.call(&api_request).await
    }

    // =========================================================================
    // KYC
    // =========================================================================

    /// Get the KYC record of a user.
    pub async fn get_kyc_information(
        &self,
        request: &KycInformationRequest,
    ) -> Result<ApiResponse<KycInformation>> {
        let payload = kyc_information_payload(&self.credentials, request);
        let api_request =
            ApiRequest::signed(Method::POST, KYC_INFORMATION_PATH, request, payload)?;
        self.call(&api_request).await
    }

    /// Submit KYC documents for a user.
    pub async fn submit_kyc(
        &self,
        request: &SubmitKycRequest,
    ) -> Result<ApiResponse<SubmitKycResponse>> {
        let payload = submit_kyc_payload(&self.credentials, request);
        let api_request = ApiRequest::signed(Method::POST, SUBMIT_KYC_PATH, request, payload)?;

        info!("Submitting KYC for {}", request.user_email);

        self.call(&api_request).await
    }

    // =========================================================================
    // Wallet
    // =========================================================================

    /// Get the partner wallet balance for one currency.
    pub async fn get_wallet_balance(
        &self,
        request: &GetWalletBalanceRequest,
    ) -> Result<ApiResponse<WalletBalance>> {
        let payload = wallet_balance_payload(&self.credentials, request);
        let api_request =
            ApiRequest::signed(Method::POST, WALLET_BALANCE_PATH, request, payload)?;
        self.call(&api_request).await
    }

    // =========================================================================
    // Public
    // =========================================================================

    /// Decode a payment QR code. Unsigned GET.
    pub async fn get_qr_code_info(
        &self,
        request: &GetQrCodeInfoRequest,
    ) -> Result<ApiResponse<QrCodeInfo>> {
        let api_request = ApiRequest::public(Method::GET, QR_CODE_INFO_PATH, request)?;
        self.call(&api_request).await
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    /// Build, send and decode one call.
    ///
    /// A decoded envelope with `success: false` is returned as `Ok`; callers
    /// inspect `success` and `error_code`.
    async fn call<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<ApiResponse<T>> {
        let http_request = self.builder.build(Some(request))?;
        let body = self.executor.execute(http_request).await?;
        serde_json::from_slice(&body).map_err(SdkError::Decode)
    }
}

fn validate_base_url(base_url: &str) -> Result<()> {
    let parsed = Url::parse(base_url).map_err(|e| SdkError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
        return Err(SdkError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(())
}
