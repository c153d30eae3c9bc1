use crate::errors::Error;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use hmac::digest::core_api::BlockSizeUser;
use hmac::digest::Digest;
use hmac::{Mac, SimpleHmac};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
/// Digest algorithm used by a signer, inferred from the length of a decoded signature.
pub enum Algorithm {
    /// HMAC-SHA1, Django's default before 3.1. 20-byte signatures.
    Sha1,
    /// HMAC-SHA256, Django's default since 3.1. 32-byte signatures.
    Sha256,
    /// HMAC-SHA384. 48-byte signatures.
    Sha384,
    /// HMAC-SHA512. 64-byte signatures.
    Sha512,
}

/// Hashing capabilities of an [`Algorithm`].
pub(crate) struct HashFunction {
    pub(crate) algorithm: Algorithm,
    pub(crate) name: &'static str,
    pub(crate) output_len: usize,
    /// Plain digest over the concatenation of all parts.
    pub(crate) digest: fn(&[&[u8]]) -> Vec<u8>,
    /// HMAC of `message` under `key`.
    pub(crate) hmac: fn(key: &[u8], message: &[u8]) -> Result<Vec<u8>, Error>,
}

fn digest_with<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = D::new();
    for part in parts.iter() {
        hasher.update(*part);
    }

    hasher.finalize().to_vec()
}

fn hmac_with<D: Digest + BlockSizeUser>(key: &[u8], message: &[u8]) -> Result<Vec<u8>, Error> {
    let mut mac = <SimpleHmac<D> as Mac>::new_from_slice(key)?;
    mac.update(message);

    Ok(mac.finalize().into_bytes().to_vec())
}

static HASH_FUNCTIONS: [HashFunction; 4] = [
    HashFunction {
        algorithm: Algorithm::Sha1,
        name: "sha1",
        output_len: 20,
        digest: digest_with::<sha1::Sha1>,
        hmac: hmac_with::<sha1::Sha1>,
    },
    HashFunction {
        algorithm: Algorithm::Sha256,
        name: "sha256",
        output_len: 32,
        digest: digest_with::<sha2::Sha256>,
        hmac: hmac_with::<sha2::Sha256>,
    },
    HashFunction {
        algorithm: Algorithm::Sha384,
        name: "sha384",
        output_len: 48,
        digest: digest_with::<sha2::Sha384>,
        hmac: hmac_with::<sha2::Sha384>,
    },
    HashFunction {
        algorithm: Algorithm::Sha512,
        name: "sha512",
        output_len: 64,
        digest: digest_with::<sha2::Sha512>,
        hmac: hmac_with::<sha2::Sha512>,
    },
];

impl Algorithm {
    /// Every supported algorithm, weakest first.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Sha1,
        Algorithm::Sha256,
        Algorithm::Sha384,
        Algorithm::Sha512,
    ];

    /// Infer the algorithm from the length of a decoded signature.
    ///
    /// Only the exact digest sizes 20, 32, 48 and 64 map to an algorithm; nothing is guessed.
    pub fn from_signature_len(len: usize) -> Result<Self, Error> {
        HASH_FUNCTIONS
            .iter()
            .find(|f| f.output_len == len)
            .map(|f| f.algorithm)
            .ok_or(Error::SignatureLength)
    }

    /// Length in bytes of a signature produced with this algorithm.
    pub fn output_len(&self) -> usize {
        self.hash_function().output_len
    }

    /// Lowercase name of the algorithm, as Django's `hashlib` names it.
    pub fn name(&self) -> &'static str {
        self.hash_function().name
    }

    pub(crate) fn hash_function(&self) -> &'static HashFunction {
        match self {
            Algorithm::Sha1 => &HASH_FUNCTIONS[0],
            Algorithm::Sha256 => &HASH_FUNCTIONS[1],
            Algorithm::Sha384 => &HASH_FUNCTIONS[2],
            Algorithm::Sha512 => &HASH_FUNCTIONS[3],
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HASH_FUNCTIONS
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(s))
            .map(|f| f.algorithm)
            .ok_or(Error::UnsupportedAlgorithm)
    }
}
