use thiserror::Error;

/// Boxed error returned by an [`HttpTransport`](crate::HttpTransport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while parsing keys, signing or verifying.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("invalid private key PEM")]
    InvalidPem,

    #[error("invalid public key PEM")]
    InvalidPublicPem,

    #[error("unsupported private key type")]
    UnsupportedKeyType,

    #[error("unsupported public key type")]
    UnsupportedPublicKeyType,

    #[error("parse private key: {0}")]
    MalformedKey(String),

    #[error("sign payload: {0}")]
    Signing(String),

    #[error("decode signature: {0}")]
    SignatureEncoding(#[from] base64::DecodeError),

    #[error("signature verification failed")]
    Verification,

    #[error("read key file: {0}")]
    Io(#[from] std::io::Error),
}

/// SDK-specific errors
#[derive(Error, Debug)]
pub enum SdkError {
    // Client construction
    #[error("baseURL is required")]
    EmptyBaseUrl,

    #[error("partnerCode is required")]
    EmptyPartnerCode,

    #[error("secretKey is required")]
    EmptySecretKey,

    #[error("privateKey is required")]
    EmptyPrivateKey,

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(#[source] KeyError),

    #[error("Configuration error: {0}")]
    Config(String),

    // Request lifecycle
    #[error("request is nil")]
    NilRequest,

    #[error("invalid request params: {0}")]
    InvalidParams(String),

    #[error("failed to sign request: {0}")]
    RequestSign(#[source] KeyError),

    #[error("failed to encode request body: {0}")]
    RequestEncode(#[source] serde_json::Error),

    // HTTP / transport
    #[error("http request failed: {0}")]
    HttpFailure(#[source] BoxError),

    #[error("unexpected http status code: status={status} body={body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl SdkError {
    /// HTTP status carried by an [`SdkError::UnexpectedStatus`].
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for failures that happened before or during the wire exchange
    /// without the partner answering.
    pub fn is_transport(&self) -> bool {
        matches!(self, SdkError::HttpFailure(_))
    }
}

pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = SdkError::UnexpectedStatus {
            status: 503,
            body: "down".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_transport());
        assert_eq!(
            err.to_string(),
            "unexpected http status code: status=503 body=down"
        );
    }

    #[test]
    fn test_http_failure_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = SdkError::HttpFailure(Box::new(io));
        assert!(err.is_transport());
        assert_eq!(err.status(), None);

        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "refused");
    }
}
