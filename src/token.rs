use crate::algorithm::Algorithm;
use crate::common::{self, SEPARATOR};
use crate::errors::Error;
use alloc::string::String;
use alloc::vec::Vec;
use core::convert::TryFrom;
use core::fmt;
use core::str::FromStr;

/// [`DecodedToken`] is a signed cookie value split into its parts.
///
/// The expected layout is the one produced by Django's `TimestampSigner`:
///
/// ```text
/// ["."] payload ":" timestamp ":" signature
/// ```
///
/// A leading `.` marks a compressed payload. The signature is URL-safe base64 without padding
/// and its decoded length determines the [`Algorithm`].
///
/// A value of this type only exists once parsing fully succeeded. It says nothing about
/// authenticity: use [`TimestampSigner::verify`] before trusting any of its contents.
///
/// [`TimestampSigner::verify`]: crate::signer::TimestampSigner::verify
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DecodedToken {
    payload: String,
    timestamp: String,
    signature: String,
    signature_bytes: Vec<u8>,
    algorithm: Algorithm,
    compressed: bool,
}

impl DecodedToken {
    /// Tokens shorter than this cannot hold a payload, a timestamp, a signature and both
    /// separators.
    pub const MIN_LEN: usize = 10;

    /// Marker prepended to the payload when it was compressed before signing.
    pub const COMPRESSED_MARKER: char = '.';

    /// Parse `raw` as a signed timestamp cookie.
    ///
    /// This fails if `raw` is too short, does not have exactly three `:`-separated segments,
    /// has a signature that is not URL-safe base64 or whose length matches none of the
    /// supported digests.
    pub fn decode(raw: &str) -> Result<Self, Error> {
        if raw.len() < Self::MIN_LEN {
            return Err(Error::TokenFormat);
        }

        let (compressed, body) = match raw.strip_prefix(Self::COMPRESSED_MARKER) {
            Some(body) => (true, body),
            None => (false, raw),
        };

        let parts_split = body.split(SEPARATOR).collect::<Vec<&str>>();
        if parts_split.len() != 3 {
            return Err(Error::TokenFormat);
        }

        let signature_bytes = common::decode_b64(parts_split[2])?;
        let algorithm = Algorithm::from_signature_len(signature_bytes.len())?;

        Ok(Self {
            payload: parts_split[0].into(),
            timestamp: parts_split[1].into(),
            signature: parts_split[2].into(),
            signature_bytes,
            algorithm,
            compressed,
        })
    }

    /// Return the payload segment exactly as it appeared in the token.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Return the payload segment decoded from base64.
    ///
    /// If the token is [compressed](Self::is_compressed), this is still compressed data.
    ///
    /// __WARNING__: This is **UNTRUSTED** until the token has been verified.
    pub fn untrusted_payload_bytes(&self) -> Result<Vec<u8>, Error> {
        common::decode_b64(&self.payload)
    }

    /// Return the timestamp segment. It is carried as-is and never interpreted.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Return the signature segment as it appeared in the token.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Return the decoded signature.
    pub fn signature_bytes(&self) -> &[u8] {
        &self.signature_bytes
    }

    /// Return the algorithm inferred from the signature length.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Whether the token began with the compression marker.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }
}

impl TryFrom<&str> for DecodedToken {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::decode(value)
    }
}

impl TryFrom<&String> for DecodedToken {
    type Error = Error;

    fn try_from(value: &String) -> Result<Self, Self::Error> {
        Self::decode(value.as_str())
    }
}

impl FromStr for DecodedToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl fmt::Display for DecodedToken {
    /// Writes the token back in its textual form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.compressed {
            write!(f, "{}", Self::COMPRESSED_MARKER)?;
        }
        write!(
            f,
            "{}{}{}{}{}",
            self.payload, SEPARATOR, self.timestamp, SEPARATOR, self.signature
        )
    }
}
