// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! The certificate surface the verification pipeline works against.
//!
//! Path building and chain validation only need names, keys, validity and
//! the ability to check an issuer signature. [`CertificateView`] captures
//! exactly that, so the algorithms stay independent of the DER model and
//! can be driven by lightweight in-memory certificates in tests.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use const_oid::ObjectIdentifier;
use der::Tagged;

use super::{Certificate, SubjectPublicKeyInfo};
use crate::crypto_backend::{CryptoBackend, SignatureAlgorithm};
use crate::error::Result;
use crate::time::Validity;
use crate::x509::oids;

/// Public key algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// rsaEncryption
    Rsa,
    /// id-ecPublicKey
    Ecdsa,
    /// Anything else, by algorithm OID
    Other(ObjectIdentifier),
}

impl KeyType {
    /// Classify a SubjectPublicKeyInfo algorithm OID.
    pub fn from_oid(oid: ObjectIdentifier) -> Self {
        match oid {
            oids::RSA => KeyType::Rsa,
            oids::ECPUBLICKEY => KeyType::Ecdsa,
            other => KeyType::Other(other),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::Rsa => write!(f, "RSA"),
            KeyType::Ecdsa => write!(f, "ECDSA"),
            KeyType::Other(oid) => write!(f, "{}", oid),
        }
    }
}

/// A subject public key, ready for a [`CryptoBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    /// Key algorithm family
    pub key_type: KeyType,
    /// Named curve for ECDSA keys
    pub parameters: Option<ObjectIdentifier>,
    /// subjectPublicKey bit string contents
    pub key: Vec<u8>,
}

impl PublicKey {
    /// Extract the key from a SubjectPublicKeyInfo.
    pub fn from_spki(spki: &SubjectPublicKeyInfo) -> Result<Self> {
        let parameters = spki
            .algorithm
            .parameters
            .as_ref()
            .filter(|params| params.tag() == der::Tag::ObjectIdentifier)
            .and_then(|params| ObjectIdentifier::from_bytes(params.value()).ok());

        Ok(Self {
            key_type: KeyType::from_oid(spki.algorithm.oid),
            parameters,
            key: spki
                .subject_public_key
                .as_bytes()
                .ok_or_else(|| crate::error::Error::invalid_der("unaligned subjectPublicKey"))?
                .to_vec(),
        })
    }
}

/// Read-only view of a certificate for path building and chain validation.
pub trait CertificateView {
    /// Subject distinguished name in string form.
    fn subject_name(&self) -> String;

    /// Issuer distinguished name in string form.
    fn issuer_name(&self) -> String;

    /// Serial number bytes.
    fn serial_number(&self) -> &[u8];

    /// The subject public key.
    fn public_key(&self) -> Result<PublicKey>;

    /// Validity window.
    fn validity(&self) -> Validity;

    /// Subject key identifier, if the certificate carries one.
    fn subject_key_id(&self) -> Option<Vec<u8>>;

    /// Authority key identifier. Fails when the extension is malformed.
    fn authority_key_id(&self) -> Result<Option<Vec<u8>>>;

    /// Check this certificate's signature against `issuer_key`.
    fn verify_issued_by(&self, issuer_key: &PublicKey, backend: &dyn CryptoBackend)
        -> Result<()>;

    /// Bytes used to order candidate paths deterministically.
    fn sort_key(&self) -> Result<Vec<u8>>;

    /// Issuer and subject names are equal.
    fn is_self_signed(&self) -> bool {
        self.issuer_name() == self.subject_name()
    }

    /// Same serial number, subject and public key.
    fn is_same_certificate(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.serial_number() == other.serial_number()
            && self.subject_name() == other.subject_name()
            && matches!(
                (self.public_key(), other.public_key()),
                (Ok(a), Ok(b)) if a == b
            )
    }
}

impl CertificateView for Certificate {
    fn subject_name(&self) -> String {
        self.subject().to_string()
    }

    fn issuer_name(&self) -> String {
        self.issuer().to_string()
    }

    fn serial_number(&self) -> &[u8] {
        Certificate::serial_number(self)
    }

    fn public_key(&self) -> Result<PublicKey> {
        PublicKey::from_spki(self.subject_public_key_info())
    }

    fn validity(&self) -> Validity {
        *Certificate::validity(self)
    }

    fn subject_key_id(&self) -> Option<Vec<u8>> {
        match self.subject_key_identifier() {
            Ok(ski) => ski.map(|ski| ski.0),
            Err(e) => {
                log::trace!("Ignoring malformed subject key identifier: {}", e);
                None
            }
        }
    }

    fn authority_key_id(&self) -> Result<Option<Vec<u8>>> {
        Ok(self
            .authority_key_identifier()?
            .and_then(|aki| aki.key_identifier))
    }

    fn verify_issued_by(
        &self,
        issuer_key: &PublicKey,
        backend: &dyn CryptoBackend,
    ) -> Result<()> {
        let algorithm = SignatureAlgorithm::from_oid_with_curve(
            &self.signature_algorithm.oid,
            issuer_key.parameters.as_ref(),
        )?;
        let tbs = self.tbs_certificate_der()?;
        backend.verify_signature(algorithm, &tbs, self.signature_bytes(), &issuer_key.key)
    }

    fn sort_key(&self) -> Result<Vec<u8>> {
        self.to_der()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_type_from_oid() {
        assert_eq!(KeyType::from_oid(oids::RSA), KeyType::Rsa);
        assert_eq!(KeyType::from_oid(oids::ECPUBLICKEY), KeyType::Ecdsa);
        let ed25519 = ObjectIdentifier::new_unwrap("1.3.101.112");
        assert_eq!(KeyType::from_oid(ed25519), KeyType::Other(ed25519));
        assert_eq!(KeyType::Other(ed25519).to_string(), "1.3.101.112");
        assert_eq!(KeyType::Rsa.to_string(), "RSA");
    }

    #[cfg(feature = "ring-backend")]
    mod minted {
        use super::*;
        use crate::crypto_backend::RingBackend;
        use crate::test_support::TestPki;

        #[test]
        fn test_public_key_from_certificate() {
            let pki = TestPki::new();
            let key = pki.entity.public_key().unwrap();
            assert_eq!(key.key_type, KeyType::Ecdsa);
            assert_eq!(key.parameters, Some(oids::ECDSA_P256));
            assert_eq!(key.key.as_slice(), pki.entity_key.public_key());
        }

        #[test]
        fn test_verify_issued_by() {
            let pki = TestPki::new();
            let root_key = pki.root.public_key().unwrap();
            let intermediate_key = pki.intermediate.public_key().unwrap();

            let result = pki.intermediate.verify_issued_by(&root_key, &RingBackend);
            assert!(result.is_ok(), "intermediate should verify: {:?}", result.err());

            let result = pki.entity.verify_issued_by(&intermediate_key, &RingBackend);
            assert!(result.is_ok(), "entity should verify: {:?}", result.err());

            assert!(pki.entity.verify_issued_by(&root_key, &RingBackend).is_err());
        }

        #[test]
        fn test_names_and_identity() {
            let pki = TestPki::new();
            assert!(pki.root.is_self_signed());
            assert!(!pki.intermediate.is_self_signed());
            assert_eq!(pki.entity.issuer_name(), pki.intermediate.subject_name());

            assert!(pki.root.is_same_certificate(&pki.root.clone()));
            assert!(!pki.root.is_same_certificate(&pki.intermediate));
        }

        #[test]
        fn test_key_identifier_linkage() {
            let pki = TestPki::new();
            assert_eq!(
                pki.entity.authority_key_id().unwrap(),
                pki.intermediate.subject_key_id()
            );
            assert_eq!(pki.root.authority_key_id().unwrap(), None);
        }

        #[test]
        fn test_sort_key_is_der() {
            let pki = TestPki::new();
            assert_eq!(pki.root.sort_key().unwrap(), pki.root.to_der().unwrap());
        }
    }
}
