// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Payment request signature verification.
//!
//! The request's `pki_type` names the digest (`x509+sha1` or `x509+sha256`)
//! and the leaf certificate's key names the signature scheme. The signed
//! payload is the request re-encoded with an empty `signature` field.
//!
//! | PKI type      | RSA key          | ECDSA key          |
//! |---------------|------------------|--------------------|
//! | `x509+sha1`   | `SHA1withRSA`    | `SHA1withECDSA`    |
//! | `x509+sha256` | `SHA256withRSA`  | `SHA256withECDSA`  |

extern crate alloc;

use core::fmt;
use core::str::FromStr;

use crate::certificate::{CertificateView, KeyType};
use crate::crypto_backend::{CryptoBackend, SignatureAlgorithm};
use crate::error::{Error, Result, SignatureError};
use crate::request::{PaymentRequest, PKI_TYPE_NONE, PKI_TYPE_X509_SHA1, PKI_TYPE_X509_SHA256};

#[cfg(feature = "ring-backend")]
use crate::crypto_backend::RingBackend;

pub use crate::crypto_backend::HashAlgorithm;

/// PKI type carried in `PaymentRequest.pki_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PkiType {
    /// Unsigned request
    None,
    /// X.509 chain, SHA-1 digest
    X509Sha1,
    /// X.509 chain, SHA-256 digest
    X509Sha256,
}

impl PkiType {
    /// Parse a `pki_type` tag.
    pub fn parse(tag: &str) -> Result<Self> {
        match tag {
            PKI_TYPE_NONE => Ok(PkiType::None),
            PKI_TYPE_X509_SHA1 => Ok(PkiType::X509Sha1),
            PKI_TYPE_X509_SHA256 => Ok(PkiType::X509Sha256),
            other => Err(Error::unknown_pki_type(other)),
        }
    }

    /// The wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            PkiType::None => PKI_TYPE_NONE,
            PkiType::X509Sha1 => PKI_TYPE_X509_SHA1,
            PkiType::X509Sha256 => PKI_TYPE_X509_SHA256,
        }
    }

    /// Digest used for the request signature. `None` has no digest.
    pub fn hash_algorithm(&self) -> Result<HashAlgorithm> {
        match self {
            PkiType::X509Sha1 => Ok(HashAlgorithm::Sha1),
            PkiType::X509Sha256 => Ok(HashAlgorithm::Sha256),
            PkiType::None => Err(Error::unknown_pki_type(self.as_str())),
        }
    }
}

impl FromStr for PkiType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PkiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks a request's signature against its leaf certificate.
#[derive(Debug, Clone)]
pub struct SignatureVerifier<B> {
    backend: B,
}

#[cfg(feature = "ring-backend")]
impl SignatureVerifier<RingBackend> {
    /// Verifier using the ring backend.
    pub fn new() -> Self {
        Self::with_backend(RingBackend)
    }
}

#[cfg(feature = "ring-backend")]
impl Default for SignatureVerifier<RingBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: CryptoBackend> SignatureVerifier<B> {
    /// Verifier using a custom backend.
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// `Ok(true)` when the signature verifies, `Ok(false)` when it does not.
    ///
    /// Errors are reserved for requests that cannot be checked at all, such
    /// as an unknown key type or an unknown or `none` PKI type.
    pub fn verify<C: CertificateView>(&self, request: &PaymentRequest, leaf: &C) -> Result<bool> {
        let key = leaf.public_key()?;
        if let KeyType::Other(oid) = key.key_type {
            log::error!("Leaf '{}' has unknown key type {}", leaf.subject_name(), oid);
            return Err(Error::unknown_key_type(alloc::format!("{}", oid)));
        }

        let hash = PkiType::parse(request.pki_type())?.hash_algorithm()?;
        let algorithm = SignatureAlgorithm::from_pki_algos(hash, &key)?;
        log::trace!(
            "Verifying request signature with {} against '{}'",
            algorithm,
            leaf.subject_name()
        );

        let payload = request.signing_bytes();
        match self
            .backend
            .verify_signature(algorithm, &payload, request.signature(), &key.key)
        {
            Ok(()) => Ok(true),
            Err(Error::SignatureError(SignatureError::VerificationFailed)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
