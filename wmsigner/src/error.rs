use thiserror::Error;

/// Errors produced while recovering a key or signing a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignerError {
    // ── Construction ──────────────────────────────────────────────────
    #[error("WMID not provided")]
    IdentifierMissing,

    // ── Key file ──────────────────────────────────────────────────────
    #[error("failed to read key file: {0}")]
    KeyFileUnreadable(String),
    #[error("invalid base64: {0}")]
    InvalidBase64(String),
    #[error("key file is truncated ({actual} bytes, expected {expected})")]
    MalformedKeyFile { actual: usize, expected: usize },

    // ── Verification ──────────────────────────────────────────────────
    #[error("key checksum mismatch")]
    VerificationFailed,
    #[error("hash check failed, key file seems to be corrupted")]
    KeyFileCorrupted,

    // ── Key components ────────────────────────────────────────────────
    #[error("key modulus is zero")]
    InvalidModulus,
    #[error("key component too large ({0} bytes, max 66)")]
    KeyComponentTooLarge(usize),

    // ── Signing ───────────────────────────────────────────────────────
    #[error("random source failed: {0}")]
    RandomSourceError(String),
}

impl From<std::io::Error> for SignerError {
    fn from(e: std::io::Error) -> Self {
        Self::KeyFileUnreadable(e.to_string())
    }
}

/// Type alias for results that may return a [`SignerError`].
pub type SignerResult<T> = std::result::Result<T, SignerError>;
