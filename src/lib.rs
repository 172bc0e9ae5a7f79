//! # Aliniex SDK
//!
//! A Rust SDK for the Aliniex fiat-crypto payment gateway partner API.
//!
//! ## Features
//!
//! - Sell orders: create and look up by external order ID
//! - User KYC: read status and submit documents
//! - Partner wallet balance
//! - Public QR code decoding
//! - RSA-SHA256 request signing with PKCS#1 or PKCS#8 keys
//! - Pluggable HTTP transport
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aliniex_sdk::{AliniexClient, ClientConfig, CreateOrderRequest, Currency, FiatCurrency};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Uses ALINIEX_BASE_URL, ALINIEX_PARTNER_CODE, ALINIEX_SECRET_KEY and
//!     // ALINIEX_PRIVATE_KEY_PATH (or ALINIEX_PRIVATE_KEY)
//!     let client = AliniexClient::from_env(ClientConfig::default())?;
//!
//!     let order = CreateOrderRequest {
//!         currency: Currency::Usdt,
//!         fiat_amount: 100000.0,
//!         fiat_currency: FiatCurrency::Vnd,
//!         bank_code: "970407".to_string(),
//!         bank_account_number: "888812345678".to_string(),
//!         external_order_id: "ORD-0001".to_string(),
//!         webhook_secret_key: "whsec".to_string(),
//!         user_email: "user@example.com".to_string(),
//!         user_kyc_verified: true,
//!         content: "payment".to_string(),
//!         extend_info: None,
//!     };
//!
//!     let response = client.create_order(&order).await?;
//!     if response.success {
//!         println!("Order created: {:?}", response.data);
//!     } else {
//!         println!("Rejected ({}): {}", response.error_code, response.message);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Internal modules
mod client;
mod error;
mod request;
mod transport;

pub mod converters;
pub mod keypair;
pub mod signing;
pub mod types;

// Re-export public API
pub use client::{AliniexClient, ClientConfig, Credentials};
pub use error::{BoxError, KeyError, Result, SdkError};
pub use keypair::{verify_pem, PartnerSigningKey, PartnerVerifyingKey};
pub use request::{Access, ApiRequest, RequestBuilder, DEFAULT_USER_AGENT};
pub use signing::{PartnerCredentials, SigningPayload};
pub use transport::{Executor, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{
    // Envelope
    ApiResponse,
    // Enums
    CountryCode,
    Currency,
    FiatCurrency,
    Gender,
    IdType,
    KycStatus,
    OrderStatus,
    QrType,
    // Orders
    BankTransfer,
    CreateOrderRequest,
    CreateOrderResponse,
    Fees,
    GetOrderDetailsRequest,
    OrderDetails,
    TokenTransfer,
    // KYC
    KycInformation,
    KycInformationRequest,
    SubmitKycRequest,
    SubmitKycResponse,
    // Wallet
    GetWalletBalanceRequest,
    WalletBalance,
    // QR codes
    GetQrCodeInfoRequest,
    QrCodeInfo,
    // Constants
    SANDBOX_BASE_URL,
};
