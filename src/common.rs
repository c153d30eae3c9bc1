use crate::errors::Error;
use alloc::string::String;
use alloc::vec::Vec;
use ct_codecs::{Base64UrlSafeNoPadding, Decoder, Encoder};
use subtle::ConstantTimeEq;

/// Separator between the payload, timestamp and signature segments.
pub(crate) const SEPARATOR: char = ':';

/// Encode bytes with Base64 URL-safe and no padding.
pub(crate) fn encode_b64<T: AsRef<[u8]>>(bytes: T) -> Result<String, Error> {
    let inlen = bytes.as_ref().len();
    let mut buf = vec![0u8; Base64UrlSafeNoPadding::encoded_len(inlen)?];

    let ret: String = Base64UrlSafeNoPadding::encode_to_str(&mut buf, bytes)?.into();

    Ok(ret)
}

/// Position of `c` in the URL-safe base64 alphabet.
fn b64_value(c: u8) -> Option<u8> {
    match c {
        b'A'..=b'Z' => Some(c - b'A'),
        b'a'..=b'z' => Some(c - b'a' + 26),
        b'0'..=b'9' => Some(c - b'0' + 52),
        b'-' => Some(62),
        b'_' => Some(63),
        _ => None,
    }
}

/// Clear the bits of the final character that carry no data, so that encoders which leave
/// them set are accepted the way Python's `urlsafe_b64decode` accepts them.
fn canonicalize_trailing_bits(encoded: &mut [u8]) {
    let mask = match encoded.len() % 4 {
        2 => 0b11_0000,
        3 => 0b11_1100,
        _ => return,
    };

    if let Some(last) = encoded.last_mut() {
        if let Some(value) = b64_value(*last) {
            *last = URL_SAFE_ALPHABET[usize::from(value & mask)];
        }
    }
}

const URL_SAFE_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Decode string with Base64 URL-safe and no padding.
///
/// Non-zero unused bits in the final character are ignored rather than rejected.
pub(crate) fn decode_b64<T: AsRef<[u8]>>(encoded: T) -> Result<Vec<u8>, Error> {
    let mut canonical = Vec::from(encoded.as_ref());
    canonicalize_trailing_bits(&mut canonical);

    let inlen = canonical.len();
    // We can use encoded len here, even if it returns more than needed,
    // because ct-codecs allows this.
    let mut buf = vec![0u8; Base64UrlSafeNoPadding::encoded_len(inlen)?];

    let ret: Vec<u8> = Base64UrlSafeNoPadding::decode(&mut buf, &canonical, None)?.into();

    Ok(ret)
}

/// Join a payload and timestamp into the exact string covered by the signature.
pub(crate) fn signing_input(payload: &str, timestamp: &str) -> String {
    let mut out = String::with_capacity(payload.len() + timestamp.len() + 1);
    out.push_str(payload);
    out.push(SEPARATOR);
    out.push_str(timestamp);

    out
}

/// Compare a computed signature against an untrusted one in constant time.
pub(crate) fn signatures_match(computed: &[u8], untrusted: &[u8]) -> bool {
    computed.ct_eq(untrusted).into()
}
