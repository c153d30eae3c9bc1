use crate::errors::Error;
use crate::signer::TimestampSigner;
use crate::token::DecodedToken;
use alloc::string::String;

/// A cookie format that can be decoded, checked against a secret and re-signed.
///
/// The decoded value is handed back to the caller, who passes it on to [`Decoder::unsign`]
/// or [`Decoder::resign`]. Nothing is stored between calls.
pub trait Decoder {
    /// Name identifying the cookie format.
    const NAME: &'static str;

    /// The decoded form of a cookie.
    type Parsed;

    /// Parse a raw cookie value.
    fn decode(raw: &str) -> Result<Self::Parsed, Error>;

    /// Check whether `secret` signed `parsed`.
    fn unsign(parsed: &Self::Parsed, secret: &[u8]) -> bool;

    /// Sign `data` with `secret`, reusing whatever `parsed` carries besides the payload.
    fn resign(parsed: &Self::Parsed, data: &[u8], secret: &[u8]) -> Result<String, Error>;
}

/// Django `signed_cookies` session cookies.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Django;

impl Decoder for Django {
    const NAME: &'static str = "django";

    type Parsed = DecodedToken;

    fn decode(raw: &str) -> Result<Self::Parsed, Error> {
        DecodedToken::decode(raw)
    }

    fn unsign(parsed: &Self::Parsed, secret: &[u8]) -> bool {
        TimestampSigner::verify(parsed, secret)
    }

    fn resign(parsed: &Self::Parsed, data: &[u8], secret: &[u8]) -> Result<String, Error> {
        TimestampSigner::resign(parsed, data, secret)
    }
}
