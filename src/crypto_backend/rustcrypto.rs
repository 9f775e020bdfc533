// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Pure-Rust backend on the RustCrypto curve, RSA and digest crates.
//!
//! Covers every [`SignatureAlgorithm`], including the combinations ring
//! refuses: ECDSA over SHA-1 and RSA moduli below 2048 bits. ECDSA digests
//! are computed here and handed to the curve as a prehash.

extern crate alloc;

use alloc::vec::Vec;

use const_oid::AssociatedOid;
use ecdsa::signature::hazmat::PrehashVerifier;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::signature::Verifier;
use rsa::RsaPublicKey;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

use super::{CryptoBackend, SignatureAlgorithm};
use crate::error::{Error, Result};

/// RustCrypto-based cryptographic backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoBackend;

impl CryptoBackend for RustCryptoBackend {
    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        tbs_data: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<()> {
        log::trace!("Verifying signature with algorithm {}", algorithm);

        let result = match algorithm {
            SignatureAlgorithm::EcdsaP256Sha1 => {
                verify_p256(&Sha1::digest(tbs_data), signature, public_key)
            }
            SignatureAlgorithm::EcdsaP256Sha256 => {
                verify_p256(&Sha256::digest(tbs_data), signature, public_key)
            }
            SignatureAlgorithm::EcdsaP256Sha384 => {
                verify_p256(&Sha384::digest(tbs_data), signature, public_key)
            }
            SignatureAlgorithm::EcdsaP384Sha1 => {
                verify_p384(&Sha1::digest(tbs_data), signature, public_key)
            }
            SignatureAlgorithm::EcdsaP384Sha256 => {
                verify_p384(&Sha256::digest(tbs_data), signature, public_key)
            }
            SignatureAlgorithm::EcdsaP384Sha384 => {
                verify_p384(&Sha384::digest(tbs_data), signature, public_key)
            }
            SignatureAlgorithm::RsaPkcs1Sha1 => verify_rsa::<Sha1>(tbs_data, signature, public_key),
            SignatureAlgorithm::RsaPkcs1Sha256 => {
                verify_rsa::<Sha256>(tbs_data, signature, public_key)
            }
            SignatureAlgorithm::RsaPkcs1Sha384 => {
                verify_rsa::<Sha384>(tbs_data, signature, public_key)
            }
            SignatureAlgorithm::RsaPkcs1Sha512 => {
                verify_rsa::<Sha512>(tbs_data, signature, public_key)
            }
        };

        result.map_err(|e| {
            log::trace!("{} signature did not verify", algorithm);
            e
        })?;

        log::trace!("Signature verification successful");
        Ok(())
    }
}

/// Modulus length of a DER `RSAPublicKey`, `None` if it does not parse.
pub(crate) fn rsa_modulus_bits(public_key: &[u8]) -> Option<usize> {
    use rsa::traits::PublicKeyParts;

    RsaPublicKey::from_pkcs1_der(public_key)
        .ok()
        .map(|key| key.n().bits())
}

/// Left-pad a digest shorter than the curve order to the field size, so
/// that it reads as the same integer.
fn field_prehash(digest: &[u8], field_len: usize) -> Vec<u8> {
    if digest.len() >= field_len {
        return digest.to_vec();
    }
    let mut prehash = alloc::vec![0u8; field_len - digest.len()];
    prehash.extend_from_slice(digest);
    prehash
}

fn verify_p256(digest: &[u8], signature: &[u8], public_key: &[u8]) -> Result<()> {
    let key =
        p256::ecdsa::VerifyingKey::from_sec1_bytes(public_key).map_err(|_| Error::signature_failed())?;
    let signature =
        p256::ecdsa::Signature::from_der(signature).map_err(|_| Error::signature_failed())?;
    key.verify_prehash(&field_prehash(digest, 32), &signature)
        .map_err(|_| Error::signature_failed())
}

fn verify_p384(digest: &[u8], signature: &[u8], public_key: &[u8]) -> Result<()> {
    let key =
        p384::ecdsa::VerifyingKey::from_sec1_bytes(public_key).map_err(|_| Error::signature_failed())?;
    let signature =
        p384::ecdsa::Signature::from_der(signature).map_err(|_| Error::signature_failed())?;
    key.verify_prehash(&field_prehash(digest, 48), &signature)
        .map_err(|_| Error::signature_failed())
}

fn verify_rsa<D>(message: &[u8], signature: &[u8], public_key: &[u8]) -> Result<()>
where
    D: Digest + AssociatedOid,
{
    let key = RsaPublicKey::from_pkcs1_der(public_key).map_err(|_| Error::signature_failed())?;
    let verifying_key = rsa::pkcs1v15::VerifyingKey::<D>::new(key);
    let signature =
        rsa::pkcs1v15::Signature::try_from(signature).map_err(|_| Error::signature_failed())?;
    verifying_key
        .verify(message, &signature)
        .map_err(|_| Error::signature_failed())
}
