#![no_main]
extern crate djsigner;

use djsigner::{Algorithm, DecodedToken, TimestampSigner};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let algorithm = Algorithm::ALL[data[0] as usize % Algorithm::ALL.len()];
    let (secret, payload) = data[1..].split_at((data.len() - 1) / 2);

    let raw = TimestampSigner::sign(payload, "1qz0Xk", secret, algorithm).unwrap();
    let token = DecodedToken::decode(&raw).unwrap();
    if !TimestampSigner::verify(&token, secret) {
        panic!("Valid token was NOT verified");
    }
    assert_eq!(token.untrusted_payload_bytes().unwrap(), payload);

    let resigned = TimestampSigner::resign(&token, data, secret).unwrap();
    if !TimestampSigner::verify(&DecodedToken::decode(&resigned).unwrap(), secret) {
        panic!("Resigned token was NOT verified");
    }
});
