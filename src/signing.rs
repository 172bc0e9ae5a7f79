//! Signing payloads for private partner API calls.
//!
//! IMPORTANT: every endpoint has its own field order, and the gateway rebuilds
//! the same string from the request it receives before checking the RSA
//! signature. A missing, extra or reordered field is rejected server-side with
//! no way to detect it locally, so each operation gets its own explicit field
//! list here instead of anything derived from the request struct.
//!
//! All payloads are `|`-joined and end with the partner secret key, which is
//! never sent on the wire.

use sha2::{Digest, Sha256};

use crate::types::{
    format_amount, CreateOrderRequest, GetOrderDetailsRequest, GetWalletBalanceRequest,
    KycInformationRequest, SubmitKycRequest,
};

const FIELD_DELIMITER: &str = "|";

/// Partner identity used in signing payloads.
#[derive(Clone)]
pub struct PartnerCredentials {
    partner_code: String,
    secret_key: String,
}

impl PartnerCredentials {
    pub fn new(partner_code: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            partner_code: partner_code.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn partner_code(&self) -> &str {
        &self.partner_code
    }

    /// `partnerCode | fields... | secretKey`
    fn compose(&self, fields: &[&str]) -> SigningPayload {
        let mut parts = Vec::with_capacity(fields.len() + 2);
        parts.push(self.partner_code.as_str());
        parts.extend_from_slice(fields);
        parts.push(self.secret_key.as_str());
        SigningPayload(parts.join(FIELD_DELIMITER).into_bytes())
    }
}

impl std::fmt::Debug for PartnerCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartnerCredentials")
            .field("partner_code", &self.partner_code)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// The exact bytes signed for one private request.
///
/// Holds the secret key in clear, so it has no `Debug` output beyond its
/// digest.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningPayload(Vec<u8>);

impl SigningPayload {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Hex SHA-256 of the payload, safe to log.
    pub fn digest_hex(&self) -> String {
        hex::encode(Sha256::digest(&self.0))
    }
}

impl std::fmt::Debug for SigningPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SigningPayload")
            .field(&self.digest_hex())
            .finish()
    }
}

// =============================================================================
// Per-operation payloads (field order must match the gateway)
// =============================================================================

/// partnerCode|externalOrderId|currency|fiatAmount|bankCode|bankAccountNumber|content|userEmail|secretKey
pub fn create_order_payload(creds: &PartnerCredentials, req: &CreateOrderRequest) -> SigningPayload {
    let fiat_amount = format_amount(req.fiat_amount);
    creds.compose(&[
        &req.external_order_id,
        req.currency.as_str(),
        &fiat_amount,
        &req.bank_code,
        &req.bank_account_number,
        &req.content,
        &req.user_email,
    ])
}

/// partnerCode|externalOrderId|secretKey
pub fn order_details_payload(
    creds: &PartnerCredentials,
    req: &GetOrderDetailsRequest,
) -> SigningPayload {
    creds.compose(&[&req.external_order_id])
}

/// partnerCode|userEmail|secretKey
pub fn kyc_information_payload(
    creds: &PartnerCredentials,
    req: &KycInformationRequest,
) -> SigningPayload {
    creds.compose(&[&req.user_email])
}

/// partnerCode|userEmail|nationality|secretKey
pub fn submit_kyc_payload(creds: &PartnerCredentials, req: &SubmitKycRequest) -> SigningPayload {
    creds.compose(&[&req.user_email, &req.nationality])
}

/// partnerCode|currency|secretKey
pub fn wallet_balance_payload(
    creds: &PartnerCredentials,
    req: &GetWalletBalanceRequest,
) -> SigningPayload {
    creds.compose(&[req.currency.as_str()])
}
