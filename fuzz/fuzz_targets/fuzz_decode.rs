#![no_main]
extern crate djsigner;

use djsigner::{Algorithm, DecodedToken, TimestampSigner};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let message: String = String::from_utf8_lossy(data).into();

    if let Ok(token) = DecodedToken::decode(&message) {
        assert_eq!(token.to_string(), message);
        assert_eq!(
            token.signature_bytes().len(),
            token.algorithm().output_len()
        );
        assert_eq!(
            Algorithm::from_signature_len(token.signature_bytes().len()),
            Ok(token.algorithm())
        );

        // Must not panic on any well-formed token.
        let _ = TimestampSigner::verify(&token, b"");
    }
});
