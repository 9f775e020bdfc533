// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Ring cryptographic backend implementation.
//!
//! ring has no ECDSA-over-SHA-1 verifier and rejects RSA moduli below 2048
//! bits; those two cases go to [`RustCryptoBackend`].

use super::rustcrypto::rsa_modulus_bits;
use super::{CryptoBackend, RustCryptoBackend, SignatureAlgorithm};
use crate::error::{Error, Result};
use ring::signature::{self, UnparsedPublicKey};

/// Smallest RSA modulus ring's PKCS#1 verifiers accept.
const RING_MIN_RSA_BITS: usize = 2048;

/// Ring-based cryptographic backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingBackend;

impl CryptoBackend for RingBackend {
    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        tbs_data: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<()> {
        log::trace!("Verifying signature with algorithm {}", algorithm);

        let ring_algo: &dyn signature::VerificationAlgorithm = match algorithm {
            SignatureAlgorithm::EcdsaP256Sha1 | SignatureAlgorithm::EcdsaP384Sha1 => {
                return RustCryptoBackend.verify_signature(algorithm, tbs_data, signature, public_key);
            }
            SignatureAlgorithm::RsaPkcs1Sha1
            | SignatureAlgorithm::RsaPkcs1Sha256
            | SignatureAlgorithm::RsaPkcs1Sha384
            | SignatureAlgorithm::RsaPkcs1Sha512
                if rsa_modulus_bits(public_key).is_some_and(|bits| bits < RING_MIN_RSA_BITS) =>
            {
                log::debug!("RSA key below {} bits, verifying without ring", RING_MIN_RSA_BITS);
                return RustCryptoBackend.verify_signature(algorithm, tbs_data, signature, public_key);
            }
            SignatureAlgorithm::EcdsaP256Sha256 => &signature::ECDSA_P256_SHA256_ASN1,
            SignatureAlgorithm::EcdsaP256Sha384 => &signature::ECDSA_P256_SHA384_ASN1,
            SignatureAlgorithm::EcdsaP384Sha256 => &signature::ECDSA_P384_SHA256_ASN1,
            SignatureAlgorithm::EcdsaP384Sha384 => &signature::ECDSA_P384_SHA384_ASN1,
            SignatureAlgorithm::RsaPkcs1Sha1 => {
                &signature::RSA_PKCS1_2048_8192_SHA1_FOR_LEGACY_USE_ONLY
            }
            SignatureAlgorithm::RsaPkcs1Sha256 => &signature::RSA_PKCS1_2048_8192_SHA256,
            SignatureAlgorithm::RsaPkcs1Sha384 => &signature::RSA_PKCS1_2048_8192_SHA384,
            SignatureAlgorithm::RsaPkcs1Sha512 => &signature::RSA_PKCS1_2048_8192_SHA512,
        };

        UnparsedPublicKey::new(ring_algo, public_key)
            .verify(tbs_data, signature)
            .map_err(|_| {
                log::trace!("{} signature did not verify", algorithm);
                Error::signature_failed()
            })?;

        log::trace!("Signature verification successful");
        Ok(())
    }
}
