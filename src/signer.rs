//! Verification and (re-)signing of Django `TimestampSigner` tokens.
//!
//! Django never uses the `SECRET_KEY` as the HMAC key directly. A key is first derived as
//! `H(salt || secret)`, where `H` is the plain digest of the algorithm in use and the salt is
//! the signed-cookies session backend's key salt followed by `"signer"`. The signature then
//! is `HMAC-H(derived_key, payload ":" timestamp)`.
//!
//! # Usage:
//! ```rust
//! use djsigner::{Algorithm, DecodedToken, TimestampSigner};
//!
//! let forged = TimestampSigner::sign(b"abc", "100", b"s3cr3t", Algorithm::Sha256)?;
//! let token = DecodedToken::decode(&forged)?;
//!
//! assert!(TimestampSigner::verify(&token, b"s3cr3t"));
//! assert!(!TimestampSigner::verify(&token, b"wrong"));
//!
//! let resigned = TimestampSigner::resign(&token, b"{\"is_staff\":true}", b"s3cr3t")?;
//! assert!(resigned.ends_with(&format!(":100:{}", DecodedToken::decode(&resigned)?.signature())));
//! # Ok::<(), djsigner::errors::Error>(())
//! ```

use crate::algorithm::Algorithm;
use crate::common::{encode_b64, signatures_match, signing_input, SEPARATOR};
use crate::errors::Error;
use crate::token::DecodedToken;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;

/// HMAC key derived from a secret for one [`Algorithm`]. Zeroized on drop.
pub(crate) struct DerivedKey {
    bytes: Vec<u8>,
}

impl DerivedKey {
    /// Derive the key for `algorithm` from `secret`.
    pub(crate) fn derive(algorithm: Algorithm, secret: &[u8]) -> Self {
        let digest = algorithm.hash_function().digest;

        Self {
            bytes: digest(&[TimestampSigner::SALT.as_bytes(), secret]),
        }
    }

    /// Return this as a byte-slice.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.bytes.iter_mut().zeroize();
    }
}

impl Debug for DerivedKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "DerivedKey {{***OMITTED***}}")
    }
}

/// Compute the raw signature over `message` for `algorithm` and `secret`.
fn compute_signature(
    algorithm: Algorithm,
    secret: &[u8],
    message: &str,
) -> Result<Vec<u8>, Error> {
    let key = DerivedKey::derive(algorithm, secret);
    let mac = algorithm.hash_function().hmac;

    mac(key.as_bytes(), message.as_bytes())
}

/// Django's `TimestampSigner`, as configured by the signed-cookies session backend.
pub struct TimestampSigner;

impl TimestampSigner {
    /// Key salt of `django.contrib.sessions.backends.signed_cookies` with Django's `"signer"`
    /// suffix.
    pub const SALT: &'static str = "django.contrib.sessions.backends.signed_cookiessigner";

    /// Check whether `secret` produced the signature of `token`.
    ///
    /// A wrong secret is not an error, it yields `false`. The signatures are compared in
    /// constant time.
    pub fn verify(token: &DecodedToken, secret: &[u8]) -> bool {
        let message = signing_input(token.payload(), token.timestamp());

        match compute_signature(token.algorithm(), secret, &message) {
            Ok(computed) => signatures_match(&computed, token.signature_bytes()),
            Err(_) => false,
        }
    }

    /// Create a token carrying `new_payload`, reusing the timestamp and algorithm of `token`.
    ///
    /// The compression marker is not re-added, even if `token` had one.
    pub fn resign(
        token: &DecodedToken,
        new_payload: &[u8],
        secret: &[u8],
    ) -> Result<String, Error> {
        Self::sign(new_payload, token.timestamp(), secret, token.algorithm())
    }

    /// Create a token carrying `payload` with the given `timestamp`, signed using `algorithm`.
    ///
    /// `timestamp` is used verbatim; no new timestamp is minted.
    pub fn sign(
        payload: &[u8],
        timestamp: &str,
        secret: &[u8],
        algorithm: Algorithm,
    ) -> Result<String, Error> {
        let message = signing_input(&encode_b64(payload)?, timestamp);
        let signature = compute_signature(algorithm, secret, &message)?;

        let mut token = message;
        token.push(SEPARATOR);
        token.push_str(&encode_b64(signature)?);

        Ok(token)
    }
}

#[cfg(test)]
mod test_vectors {
    use super::*;
    use crate::common::tests::*;
    use std::fs::File;
    use std::io::BufReader;

    fn test_signer(test: &SignerTest) {
        let secret = hex::decode(&test.secret).unwrap();
        let algorithm: Algorithm = test.algorithm.parse().unwrap();

        // Tokens that should not verify are still well-formed.
        let token = DecodedToken::decode(&test.token).unwrap();
        assert_eq!(token.algorithm(), algorithm, "Failed {:?}", test.name);
        assert_eq!(hex::encode(token.signature_bytes()), test.signature);

        if test.expect_fail {
            assert!(!TimestampSigner::verify(&token, &secret), "Failed {:?}", test.name);
            return;
        }

        assert!(TimestampSigner::verify(&token, &secret), "Failed {:?}", test.name);

        let actual =
            TimestampSigner::sign(test.payload.as_bytes(), &test.timestamp, &secret, algorithm)
                .unwrap();
        assert_eq!(actual, test.token, "Failed {:?}", test.name);

        let resigned = TimestampSigner::resign(&token, test.payload.as_bytes(), &secret).unwrap();
        assert_eq!(resigned, test.token, "Failed {:?}", test.name);
        assert_eq!(token.untrusted_payload_bytes().unwrap(), test.payload.as_bytes());
    }

    #[test]
    fn run_test_vectors() {
        let path = "./test_vectors/django.json";
        let file = File::open(path).unwrap();
        let reader = BufReader::new(file);
        let tests: TestFile = serde_json::from_reader(reader).unwrap();

        assert!(!tests.tests.is_empty());
        for t in tests.tests {
            test_signer(&t);
        }
    }
}

#[cfg(test)]
mod test_tokens {
    use super::*;

    const SECRET: &[u8] = b"s3cr3t";
    const VALID_SHA256: &str = "YWJj:100:n4m5BD6olf8vf3vw2NjvU43J-IfWQHsSQVM_3MVTeQo";

    #[test]
    fn known_token_verifies() {
        let token = DecodedToken::decode(VALID_SHA256).unwrap();
        assert!(TimestampSigner::verify(&token, SECRET));
        assert!(!TimestampSigner::verify(&token, b"wrong"));
        assert!(!TimestampSigner::verify(&token, b""));
    }

    #[test]
    fn end_to_end_sha256() {
        let first = TimestampSigner::sign(b"abc", "100", SECRET, Algorithm::Sha256).unwrap();
        let second = TimestampSigner::sign(b"abc", "100", SECRET, Algorithm::Sha256).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, VALID_SHA256);

        let token = DecodedToken::decode(&first).unwrap();
        let resigned = TimestampSigner::resign(&token, b"abc", SECRET).unwrap();
        assert_eq!(resigned, first);
        assert_eq!(
            TimestampSigner::resign(&token, b"abc", SECRET).unwrap(),
            resigned
        );

        assert!(TimestampSigner::verify(&token, SECRET));
        assert!(!TimestampSigner::verify(&token, b"wrong"));
    }

    #[test]
    fn test_roundtrip_all_algorithms() {
        for alg in Algorithm::ALL.iter() {
            let original = TimestampSigner::sign(b"abc", "1qz0Xk", SECRET, *alg).unwrap();
            let token = DecodedToken::decode(&original).unwrap();
            assert_eq!(token.algorithm(), *alg);
            assert!(TimestampSigner::verify(&token, SECRET));

            // Re-signing the original payload with the original secret reproduces the signature.
            let payload = token.untrusted_payload_bytes().unwrap();
            let resigned = TimestampSigner::resign(&token, &payload, SECRET).unwrap();
            let resigned_token = DecodedToken::decode(&resigned).unwrap();
            assert_eq!(resigned_token.signature_bytes(), token.signature_bytes());
            assert_eq!(resigned, original);
        }
    }

    #[test]
    fn forged_payload_verifies() {
        let token = DecodedToken::decode(VALID_SHA256).unwrap();
        let forged = TimestampSigner::resign(&token, b"{\"is_staff\":true}", SECRET).unwrap();
        let forged = DecodedToken::decode(&forged).unwrap();

        assert_eq!(forged.timestamp(), token.timestamp());
        assert_eq!(forged.algorithm(), token.algorithm());
        assert_eq!(
            forged.untrusted_payload_bytes().unwrap(),
            b"{\"is_staff\":true}"
        );
        assert_ne!(forged.signature_bytes(), token.signature_bytes());
        assert!(TimestampSigner::verify(&forged, SECRET));
        assert!(!TimestampSigner::verify(&forged, b"wrong"));
    }

    #[test]
    fn resign_drops_compression_marker() {
        let token = DecodedToken::decode(&format!(".{}", VALID_SHA256)).unwrap();
        assert!(token.is_compressed());
        // The marker is not covered by the signature.
        assert!(TimestampSigner::verify(&token, SECRET));

        let resigned = TimestampSigner::resign(&token, b"abc", SECRET).unwrap();
        assert_eq!(resigned, VALID_SHA256);
        assert!(!DecodedToken::decode(&resigned).unwrap().is_compressed());
    }

    #[test]
    fn err_on_modified_parts() {
        let token = DecodedToken::decode(VALID_SHA256).unwrap();

        let modified_payload = format!("YWJk:{}:{}", token.timestamp(), token.signature());
        let modified_timestamp = format!("{}:101:{}", token.payload(), token.signature());
        let mut sig = token.signature_bytes().to_vec();
        sig[0] ^= 1;
        let modified_signature = format!(
            "{}:{}:{}",
            token.payload(),
            token.timestamp(),
            encode_b64(sig).unwrap()
        );

        for raw in [modified_payload, modified_timestamp, modified_signature].iter() {
            let t = DecodedToken::decode(raw).unwrap();
            assert!(!TimestampSigner::verify(&t, SECRET), "{}", raw);
        }
    }

    #[test]
    fn payload_is_verified_as_written() {
        // The signature covers the payload text, not its decoded bytes.
        let token = DecodedToken::decode(VALID_SHA256).unwrap();
        let message = signing_input("YWJj", "100");
        let expected = compute_signature(Algorithm::Sha256, SECRET, &message).unwrap();
        assert_eq!(expected, token.signature_bytes());
    }

    #[test]
    fn derived_key_matches_digest_of_salted_secret() {
        let key = DerivedKey::derive(Algorithm::Sha1, SECRET);
        assert_eq!(key.as_bytes().len(), 20);

        let mut salted = Vec::from(TimestampSigner::SALT.as_bytes());
        salted.extend_from_slice(SECRET);
        let digest = Algorithm::Sha1.hash_function().digest;
        assert_eq!(key.as_bytes(), digest(&[&salted[..]]).as_slice());

        assert_eq!(format!("{:?}", key), "DerivedKey {***OMITTED***}");
    }

    #[test]
    fn empty_payload_and_secret() {
        let raw = TimestampSigner::sign(b"", "0", b"", Algorithm::Sha512).unwrap();
        assert!(raw.starts_with(":0:"));
        let token = DecodedToken::decode(&raw).unwrap();
        assert!(TimestampSigner::verify(&token, b""));
        assert!(!TimestampSigner::verify(&token, b"\0"));
    }
}
