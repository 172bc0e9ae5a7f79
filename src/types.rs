use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Response envelope
// =============================================================================

/// Envelope wrapping every partner API response.
///
/// `success: false` is a regular business outcome, not an error: inspect
/// `error_code` and `message` before touching `data`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    pub data: Option<T>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error_code: i64,
}

/// JSON `null` reads as the field's zero value, like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl<T> ApiResponse<T> {
    /// The payload when the partner reported success.
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}

// =============================================================================
// Enums
// =============================================================================

/// Crypto currency delivered to the buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USDT")]
    Usdt,
    #[serde(rename = "ETH")]
    Eth,
    #[serde(rename = "BTC")]
    Btc,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usdt => "USDT",
            Currency::Eth => "ETH",
            Currency::Btc => "BTC",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fiat currency paid by bank transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FiatCurrency {
    Vnd,
    Php,
    Thb,
    Gel,
    Brl,
    Ars,
    Pen,
    Ngn,
}

impl FiatCurrency {
    pub fn as_str(&self) -> &'static str {
        match self {
            FiatCurrency::Vnd => "VND",
            FiatCurrency::Php => "PHP",
            FiatCurrency::Thb => "THB",
            FiatCurrency::Gel => "GEL",
            FiatCurrency::Brl => "BRL",
            FiatCurrency::Ars => "ARS",
            FiatCurrency::Pen => "PEN",
            FiatCurrency::Ngn => "NGN",
        }
    }
}

impl fmt::Display for FiatCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    AwaitingPayment,
    PaymentCompleted,
    ProcessingTokenTransfer,
    Success,
    Error,
    Fail,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Whether the order can no longer change state.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            OrderStatus::Success | OrderStatus::Error | OrderStatus::Fail
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KycStatus {
    None,
    Processing,
    Verified,
    Rejected,
    #[serde(other)]
    Unknown,
}

/// Gender as submitted in KYC; unrecognised values are passed through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    Other(String),
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        match value.as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Other(value),
        }
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        match value {
            Gender::Male => "male".to_string(),
            Gender::Female => "female".to_string(),
            Gender::Other(other) => other,
        }
    }
}

/// Identity document type; unrecognised values are passed through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IdType {
    IdCard,
    Passport,
    Other(String),
}

impl From<String> for IdType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ID_CARD" => IdType::IdCard,
            "PASSPORT" => IdType::Passport,
            _ => IdType::Other(value),
        }
    }
}

impl From<IdType> for String {
    fn from(value: IdType) -> Self {
        match value {
            IdType::IdCard => "ID_CARD".to_string(),
            IdType::Passport => "PASSPORT".to_string(),
            IdType::Other(other) => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QrType {
    #[serde(rename = "vietqr")]
    VietQr,
    #[serde(rename = "ph.ppmi.p2m")]
    PhPpmiP2m,
    #[serde(rename = "com.p2pqrpay")]
    ComP2pQrPay,
    #[serde(rename = "pix")]
    Pix,
    #[serde(rename = "qr3")]
    Qr3,
    #[serde(rename = "paywithcrypto")]
    PayWithCrypto,
    #[serde(other)]
    Unknown,
}

/// Countries whose payment QR codes the gateway can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountryCode {
    #[serde(rename = "VN")]
    Vn,
    #[serde(rename = "PH")]
    Ph,
    #[serde(rename = "TH")]
    Th,
    #[serde(rename = "GE")]
    Ge,
    #[serde(rename = "BR")]
    Br,
    #[serde(rename = "AR")]
    Ar,
    #[serde(rename = "PE")]
    Pe,
    #[serde(other)]
    Unknown,
}

// =============================================================================
// Amount formatting
// =============================================================================

/// Shortest decimal text that round-trips to `value`, never in exponent form.
///
/// This is the exact text the gateway recomputes when checking signatures,
/// e.g. `100000.0` -> `100000`, `0.1` -> `0.1`, `1e-7` -> `0.0000001`.
pub fn format_amount(value: f64) -> String {
    format!("{}", value)
}

/// Largest integer below which every f64 integer is exactly representable.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Integral amounts go on the wire as JSON integers (`100000`, not
/// `100000.0`) so the body carries the same text as the signing payload.
/// NaN and infinities are refused.
fn serialize_amount<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !value.is_finite() {
        return Err(S::Error::custom(format!(
            "fiatAmount must be a finite number, got {}",
            value
        )));
    }
    if value.fract() == 0.0 && value.abs() < MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

// =============================================================================
// Create order
// =============================================================================

/// Sell order: the buyer pays fiat by bank transfer and receives crypto.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub currency: Currency,
    #[serde(serialize_with = "serialize_amount")]
    pub fiat_amount: f64,
    pub fiat_currency: FiatCurrency,
    pub bank_code: String,
    pub bank_account_number: String,
    pub external_order_id: String,
    pub webhook_secret_key: String,
    pub user_email: String,
    pub user_kyc_verified: bool,
    pub content: String,
    pub extend_info: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenTransfer {
    pub currency: Option<Currency>,
    #[serde(deserialize_with = "null_as_default")]
    pub network: String,
    #[serde(deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub wallet_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tx_hash: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankTransfer {
    #[serde(deserialize_with = "null_as_default")]
    pub bank_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bank_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bank_account_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bank_account_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub qr_code_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fees {
    #[serde(deserialize_with = "null_as_default")]
    pub system_fee: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub processing_fee: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateOrderResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub external_order_id: String,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_as_default")]
    pub order_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fiat_amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub paid_amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub token_transfer: TokenTransfer,
    #[serde(deserialize_with = "null_as_default")]
    pub bank_transfer: BankTransfer,
    #[serde(deserialize_with = "null_as_default")]
    pub fees: Fees,
    pub status: Option<OrderStatus>,
    #[serde(deserialize_with = "null_as_default")]
    pub descriptions: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub expires_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub signature: String,
}

// =============================================================================
// Order details
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOrderDetailsRequest {
    pub external_order_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderDetails {
    #[serde(deserialize_with = "null_as_default")]
    pub external_order_id: String,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_as_default")]
    pub order_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fiat_amount: f64,
    pub fiat_currency: Option<FiatCurrency>,
    #[serde(deserialize_with = "null_as_default")]
    pub paid_amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub token_transfer: TokenTransfer,
    #[serde(deserialize_with = "null_as_default")]
    pub bank_transfer: BankTransfer,
    #[serde(deserialize_with = "null_as_default")]
    pub fees: Fees,
    pub status: Option<OrderStatus>,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub expires_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub signature: String,
}

// =============================================================================
// KYC
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KycInformationRequest {
    pub user_email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KycInformation {
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date_of_birth: String,
    #[serde(deserialize_with = "null_as_default")]
    pub gender: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nationality: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub national_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub issue_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub expiry_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub front_id_image: String,
    #[serde(deserialize_with = "null_as_default")]
    pub back_id_image: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hold_id_image: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone_country_code: String,
    pub kyc_status: Option<KycStatus>,
    #[serde(deserialize_with = "null_as_default")]
    pub reject_reason: String,
}

/// KYC submission. Images are base64 data URIs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitKycRequest {
    pub user_email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub nationality: String,
    #[serde(rename = "type")]
    pub document_type: IdType,
    pub national_id: String,
    pub issue_date: String,
    pub expiry_date: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub front_id_image: String,
    pub back_id_image: String,
    pub hold_id_image: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone_number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone_country_code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitKycResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub national_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub kyc_status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub signature: String,
}

// =============================================================================
// Wallet
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct GetWalletBalanceRequest {
    pub currency: Currency,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WalletBalance {
    #[serde(deserialize_with = "null_as_default")]
    pub balance: f64,
    pub currency: Option<Currency>,
    #[serde(deserialize_with = "null_as_default")]
    pub signature: String,
}

// =============================================================================
// QR codes
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetQrCodeInfoRequest {
    pub qr_content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrCodeInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub bank_account_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bank_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bank_name: String,
    pub country_code: Option<CountryCode>,
    pub qr_type: Option<QrType>,
    #[serde(deserialize_with = "null_as_default")]
    pub additional_data: HashMap<String, Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: f64,
}

// =============================================================================
// Endpoints
// =============================================================================

pub const SANDBOX_BASE_URL: &str = "https://sandbox.alixpay.com";

pub(crate) const CREATE_ORDER_PATH: &str = "/api/v2/orders/create-sell-order";
pub(crate) const ORDER_DETAILS_PATH: &str = "/api/v2/orders/details";
pub(crate) const KYC_INFORMATION_PATH: &str = "/api/v2/user/get-kyc-information";
pub(crate) const SUBMIT_KYC_PATH: &str = "/api/v2/user/submit-kyc";
pub(crate) const WALLET_BALANCE_PATH: &str = "/api/v2/wallet/balance";
pub(crate) const QR_CODE_INFO_PATH: &str = "/api/v2/public/get-qr-code-info";
