// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Cryptographic backend abstraction for signature verification.
//!
//! Both certificate signatures and payment request signatures are checked
//! through [`CryptoBackend`]. The algorithm is chosen up front as a
//! [`SignatureAlgorithm`], either from a certificate's signature OID and the
//! issuer's curve, or from a request's PKI hash and the leaf key type.

extern crate alloc;

use core::fmt;

use crate::certificate::{KeyType, PublicKey};
use crate::error::{Error, Result};
use crate::x509::oids;
use const_oid::ObjectIdentifier;

#[cfg(feature = "ring-backend")]
mod ring;
#[cfg(feature = "ring-backend")]
pub use self::ring::*;

mod rustcrypto;
pub use self::rustcrypto::RustCryptoBackend;

/// Digest selected by a request's PKI type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// SHA-1 (`x509+sha1`)
    Sha1,
    /// SHA-256 (`x509+sha256`)
    Sha256,
}

impl HashAlgorithm {
    /// Name used in `SHA256withRSA`-style algorithm names
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "SHA1",
            HashAlgorithm::Sha256 => "SHA256",
        }
    }
}

/// Signature algorithm identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// ECDSA with P-256 curve and SHA-1
    EcdsaP256Sha1,
    /// ECDSA with P-256 curve and SHA-256
    EcdsaP256Sha256,
    /// ECDSA with P-256 curve and SHA-384
    EcdsaP256Sha384,
    /// ECDSA with P-384 curve and SHA-1
    EcdsaP384Sha1,
    /// ECDSA with P-384 curve and SHA-256
    EcdsaP384Sha256,
    /// ECDSA with P-384 curve and SHA-384
    EcdsaP384Sha384,
    /// RSA PKCS#1 v1.5 with SHA-1
    RsaPkcs1Sha1,
    /// RSA PKCS#1 v1.5 with SHA-256
    RsaPkcs1Sha256,
    /// RSA PKCS#1 v1.5 with SHA-384
    RsaPkcs1Sha384,
    /// RSA PKCS#1 v1.5 with SHA-512
    RsaPkcs1Sha512,
}

impl SignatureAlgorithm {
    /// Map a certificate signature OID plus the signer's curve OID.
    ///
    /// For ECDSA the curve comes from the issuer's public key parameters.
    pub fn from_oid_with_curve(
        sig_oid: &ObjectIdentifier,
        curve_oid: Option<&ObjectIdentifier>,
    ) -> Result<Self> {
        match *sig_oid {
            oids::ECDSA_WITH_SHA1 => Self::ecdsa(EcdsaDigest::Sha1, curve_oid),
            oids::ECDSA_WITH_SHA256 => Self::ecdsa(EcdsaDigest::Sha256, curve_oid),
            oids::ECDSA_WITH_SHA384 => Self::ecdsa(EcdsaDigest::Sha384, curve_oid),
            oids::SHA1_WITH_RSA => Ok(SignatureAlgorithm::RsaPkcs1Sha1),
            oids::SHA256_WITH_RSA => Ok(SignatureAlgorithm::RsaPkcs1Sha256),
            oids::SHA384_WITH_RSA => Ok(SignatureAlgorithm::RsaPkcs1Sha384),
            oids::SHA512_WITH_RSA => Ok(SignatureAlgorithm::RsaPkcs1Sha512),
            _ => Err(Error::unsupported_algorithm(alloc::format!(
                "OID: {}",
                sig_oid
            ))),
        }
    }

    /// Compose the request signature algorithm from the PKI hash and the
    /// leaf certificate's key.
    pub fn from_pki_algos(hash: HashAlgorithm, key: &PublicKey) -> Result<Self> {
        match (key.key_type, hash) {
            (KeyType::Rsa, HashAlgorithm::Sha1) => Ok(SignatureAlgorithm::RsaPkcs1Sha1),
            (KeyType::Rsa, HashAlgorithm::Sha256) => Ok(SignatureAlgorithm::RsaPkcs1Sha256),
            (KeyType::Ecdsa, HashAlgorithm::Sha1) => {
                Self::ecdsa(EcdsaDigest::Sha1, key.parameters.as_ref())
            }
            (KeyType::Ecdsa, HashAlgorithm::Sha256) => {
                Self::ecdsa(EcdsaDigest::Sha256, key.parameters.as_ref())
            }
            (KeyType::Other(oid), _) => Err(Error::unknown_key_type(alloc::format!("{}", oid))),
        }
    }

    fn ecdsa(hash: EcdsaDigest, curve_oid: Option<&ObjectIdentifier>) -> Result<Self> {
        match (curve_oid, hash) {
            (Some(&oids::ECDSA_P256), EcdsaDigest::Sha1) => Ok(Self::EcdsaP256Sha1),
            (Some(&oids::ECDSA_P256), EcdsaDigest::Sha256) => Ok(Self::EcdsaP256Sha256),
            (Some(&oids::ECDSA_P256), EcdsaDigest::Sha384) => Ok(Self::EcdsaP256Sha384),
            (Some(&oids::ECDSA_P384), EcdsaDigest::Sha1) => Ok(Self::EcdsaP384Sha1),
            (Some(&oids::ECDSA_P384), EcdsaDigest::Sha256) => Ok(Self::EcdsaP384Sha256),
            (Some(&oids::ECDSA_P384), EcdsaDigest::Sha384) => Ok(Self::EcdsaP384Sha384),
            (Some(oid), _) => Err(Error::unsupported_algorithm(alloc::format!(
                "ECDSA with unsupported curve OID: {}",
                oid
            ))),
            (None, _) => Err(Error::unsupported_algorithm(
                "ECDSA requires a curve OID in the public key parameters",
            )),
        }
    }

    /// Java-style algorithm name, e.g. `SHA256withRSA`.
    pub fn name(&self) -> &'static str {
        match self {
            SignatureAlgorithm::EcdsaP256Sha1 | SignatureAlgorithm::EcdsaP384Sha1 => {
                "SHA1withECDSA"
            }
            SignatureAlgorithm::EcdsaP256Sha256 | SignatureAlgorithm::EcdsaP384Sha256 => {
                "SHA256withECDSA"
            }
            SignatureAlgorithm::EcdsaP256Sha384 | SignatureAlgorithm::EcdsaP384Sha384 => {
                "SHA384withECDSA"
            }
            SignatureAlgorithm::RsaPkcs1Sha1 => "SHA1withRSA",
            SignatureAlgorithm::RsaPkcs1Sha256 => "SHA256withRSA",
            SignatureAlgorithm::RsaPkcs1Sha384 => "SHA384withRSA",
            SignatureAlgorithm::RsaPkcs1Sha512 => "SHA512withRSA",
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// ECDSA digests reachable from certificate OIDs and PKI types.
#[derive(Clone, Copy)]
enum EcdsaDigest {
    Sha1,
    Sha256,
    Sha384,
}

/// Crypto backend trait for signature verification.
///
/// `public_key` is the raw subjectPublicKey bit string contents: a DER
/// `RSAPublicKey` for RSA, an uncompressed SEC1 point for ECDSA.
pub trait CryptoBackend {
    /// Verify a signature. A signature that does not verify is
    /// `SignatureError::VerificationFailed`.
    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        tbs_data: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<()>;
}

impl<B: CryptoBackend + ?Sized> CryptoBackend for &B {
    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        tbs_data: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<()> {
        (**self).verify_signature(algorithm, tbs_data, signature, public_key)
    }
}
