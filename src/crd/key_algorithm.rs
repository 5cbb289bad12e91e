//! # Key Algorithm
//!
//! Key algorithms supported for ACM certificates, decided once at the data
//! model boundary so later stages never re-derive them from labels.

use serde::{Deserialize, Serialize};

/// Key algorithm of a requested certificate
///
/// Serialized with the labels the ACM API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, schemars::JsonSchema)]
pub enum KeyAlgorithm {
    #[serde(rename = "RSA_1024")]
    Rsa1024,
    #[serde(rename = "RSA_2048")]
    Rsa2048,
    #[serde(rename = "RSA_3072")]
    Rsa3072,
    #[serde(rename = "RSA_4096")]
    Rsa4096,
    #[serde(rename = "EC_prime256v1")]
    EcPrime256v1,
    #[serde(rename = "EC_secp384r1")]
    EcSecp384r1,
    #[serde(rename = "EC_secp521r1")]
    EcSecp521r1,
}

/// Elliptic curves ACM issues keys on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    P256,
    P384,
    P521,
}

/// Key family, which decides how a decrypted key is re-encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFamily {
    Rsa,
    EllipticCurve(EcCurve),
}

impl KeyAlgorithm {
    /// Get the label used by the ACM API
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAlgorithm::Rsa1024 => "RSA_1024",
            KeyAlgorithm::Rsa2048 => "RSA_2048",
            KeyAlgorithm::Rsa3072 => "RSA_3072",
            KeyAlgorithm::Rsa4096 => "RSA_4096",
            KeyAlgorithm::EcPrime256v1 => "EC_prime256v1",
            KeyAlgorithm::EcSecp384r1 => "EC_secp384r1",
            KeyAlgorithm::EcSecp521r1 => "EC_secp521r1",
        }
    }

    #[must_use]
    pub fn family(&self) -> KeyFamily {
        match self {
            KeyAlgorithm::Rsa1024
            | KeyAlgorithm::Rsa2048
            | KeyAlgorithm::Rsa3072
            | KeyAlgorithm::Rsa4096 => KeyFamily::Rsa,
            KeyAlgorithm::EcPrime256v1 => KeyFamily::EllipticCurve(EcCurve::P256),
            KeyAlgorithm::EcSecp384r1 => KeyFamily::EllipticCurve(EcCurve::P384),
            KeyAlgorithm::EcSecp521r1 => KeyFamily::EllipticCurve(EcCurve::P521),
        }
    }
}

impl std::fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
