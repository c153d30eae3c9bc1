use core::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Errors for token operations.
pub enum Error {
    /// Error for a token with an invalid format: too short, or not exactly three
    /// `:`-separated segments.
    TokenFormat,
    /// Error for a failed Base64 (URL-safe without padding) decoding.
    Base64Decoding,
    /// Error for a decoded signature whose length matches none of the known digests.
    SignatureLength,
    /// Error for an algorithm name that is not one of the supported digests.
    UnsupportedAlgorithm,
    /// Error for a derived key the MAC refused to accept.
    InvalidKey,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TokenFormat => f.write_str("token is not a signed timestamp cookie"),
            Error::Base64Decoding => f.write_str("invalid base64 (URL-safe, no padding)"),
            Error::SignatureLength => f.write_str("signature length matches no known digest"),
            Error::UnsupportedAlgorithm => f.write_str("unsupported digest algorithm"),
            Error::InvalidKey => f.write_str("derived key rejected by MAC"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<ct_codecs::Error> for Error {
    fn from(_: ct_codecs::Error) -> Self {
        Error::Base64Decoding
    }
}

impl From<hmac::digest::InvalidLength> for Error {
    fn from(_: hmac::digest::InvalidLength) -> Self {
        Error::InvalidKey
    }
}
