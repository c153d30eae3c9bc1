//! Decoding, verification and re-signing of Django `TimestampSigner` cookies, as issued by the
//! `django.contrib.sessions.backends.signed_cookies` session backend.
//!
//! # Usage:
//! ```rust
//! use djsigner::{DecodedToken, TimestampSigner};
//!
//! let token = DecodedToken::decode("YWJj:100:n4m5BD6olf8vf3vw2NjvU43J-IfWQHsSQVM_3MVTeQo")?;
//! assert_eq!(token.untrusted_payload_bytes()?, b"abc");
//!
//! // Check a candidate secret.
//! assert!(TimestampSigner::verify(&token, b"s3cr3t"));
//!
//! // With the secret known, sign a different payload under the same timestamp.
//! let forged = TimestampSigner::resign(&token, b"{\"_auth_user_id\":\"1\"}", b"s3cr3t")?;
//! assert!(TimestampSigner::verify(&DecodedToken::decode(&forged)?, b"s3cr3t"));
//!
//! # Ok::<(), djsigner::errors::Error>(())
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![deny(clippy::mem_forget)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    trivial_casts,
    unused_qualifications,
    overflowing_literals
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate alloc;

mod common;

/// Errors for token operations.
pub mod errors;

/// Digest algorithms a token can be signed with.
pub mod algorithm;

/// Parsing of raw cookie values.
pub mod token;

pub mod signer;

/// Plugin interface shared by cookie formats.
pub mod decoder;

#[cfg(feature = "serde")]
mod serde;

pub use algorithm::Algorithm;
pub use decoder::{Decoder, Django};
pub use signer::TimestampSigner;
pub use token::DecodedToken;
