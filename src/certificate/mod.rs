// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 v3 certificates as carried in a payment request's `pki_data`.
//!
//! Certificates are decoded from the DER blobs of an `X509Certificates`
//! bundle (or from PEM/DER trust anchors) and can be re-encoded exactly, so
//! the TBS bytes handed to signature verification are the ones the issuer
//! signed.
//!
//! # Examples
//!
//! ```no_run
//! use bip70_x509::Certificate;
//!
//! # fn example(der_bytes: &[u8]) -> bip70_x509::Result<()> {
//! let cert = Certificate::from_der(der_bytes)?;
//! println!("Subject: {}", cert.subject());
//! # Ok(())
//! # }
//! ```

pub mod name;
pub mod view;

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use der::{
    asn1::{BitString, ContextSpecific, ContextSpecificRef, UintRef},
    Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence, Tag, TagMode,
    TagNumber, Writer,
};

use crate::certificate::name::Name;
use crate::error::{Error, Result};
use crate::time::Validity;
use crate::x509::extensions::{AuthorityKeyIdentifier, SubjectKeyIdentifier};
use crate::x509::oids::{AUTHORITY_KEY_IDENTIFIER, SUBJECT_KEY_IDENTIFIER};
use spki::AlgorithmIdentifier;

pub use view::{CertificateView, KeyType, PublicKey};

/// SubjectPublicKeyInfo with opaque algorithm parameters
pub type SubjectPublicKeyInfo = spki::SubjectPublicKeyInfo<der::Any, BitString>;

const PEM_LABEL: &str = "CERTIFICATE";

// ============================================================================
// Version - RFC 5280 Section 4.1.2.1
// ============================================================================

/// X.509 certificate version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Version {
    /// Version 1 (value 0)
    V1 = 0,
    /// Version 2 (value 1)
    V2 = 1,
    /// Version 3 (value 2)
    #[default]
    V3 = 2,
}

impl Version {
    /// Integer value of the version
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Version from its integer value
    pub fn from_value(value: u8) -> der::Result<Self> {
        match value {
            0 => Ok(Version::V1),
            1 => Ok(Version::V2),
            2 => Ok(Version::V3),
            _ => Err(der::ErrorKind::Value { tag: Tag::Integer }.into()),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.value() + 1)
    }
}

// ============================================================================
// Extensions - RFC 5280 Section 4.1.2.9
// ============================================================================

/// A single X.509 v3 extension.
#[derive(Debug, Clone, PartialEq, Eq, Sequence)]
pub struct Extension {
    /// Extension OID
    pub extn_id: const_oid::ObjectIdentifier,

    /// Whether this extension is critical
    #[asn1(default = "default_false")]
    pub critical: bool,

    /// Extension value (DER-encoded)
    pub extn_value: der::asn1::OctetString,
}

fn default_false() -> bool {
    false
}

impl Extension {
    /// Create a new extension
    pub fn new(
        extn_id: const_oid::ObjectIdentifier,
        critical: bool,
        extn_value: Vec<u8>,
    ) -> Result<Self> {
        Ok(Self {
            extn_id,
            critical,
            extn_value: der::asn1::OctetString::new(extn_value)?,
        })
    }

    /// The extension value as a byte slice
    pub fn value(&self) -> &[u8] {
        self.extn_value.as_bytes()
    }
}

/// `Extensions ::= SEQUENCE SIZE (1..MAX) OF Extension`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extensions {
    /// List of extensions
    pub extensions: Vec<Extension>,
}

impl Extensions {
    /// Create Extensions from a vector of Extension
    pub fn from_vec(extensions: Vec<Extension>) -> Self {
        Self { extensions }
    }

    /// Add an extension
    pub fn push(&mut self, extension: Extension) {
        self.extensions.push(extension);
    }

    /// Iterate over the extensions
    pub fn iter(&self) -> core::slice::Iter<'_, Extension> {
        self.extensions.iter()
    }

    /// Find an extension by OID
    pub fn find(&self, oid: &const_oid::ObjectIdentifier) -> Option<&Extension> {
        self.extensions.iter().find(|e| &e.extn_id == oid)
    }

    /// Number of extensions
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// True when there are no extensions
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl<'a> DecodeValue<'a> for Extensions {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let mut extensions = Vec::new();
            while !reader.is_finished() {
                extensions.push(Extension::decode(reader)?);
            }
            Ok(Self { extensions })
        })
    }
}

impl EncodeValue for Extensions {
    fn value_len(&self) -> der::Result<Length> {
        self.extensions
            .iter()
            .try_fold(Length::ZERO, |len, ext| len + ext.encoded_len()?)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        for ext in &self.extensions {
            ext.encode(writer)?;
        }
        Ok(())
    }
}

impl der::FixedTag for Extensions {
    const TAG: Tag = Tag::Sequence;
}

// ============================================================================
// TBSCertificate - RFC 5280 Section 4.1
// ============================================================================

/// The signed portion of a certificate.
///
/// ```asn1
/// TBSCertificate  ::=  SEQUENCE  {
///     version         [0]  EXPLICIT Version DEFAULT v1,
///     serialNumber         CertificateSerialNumber,
///     signature            AlgorithmIdentifier,
///     issuer               Name,
///     validity             Validity,
///     subject              Name,
///     subjectPublicKeyInfo SubjectPublicKeyInfo,
///     issuerUniqueID  [1]  IMPLICIT UniqueIdentifier OPTIONAL,
///     subjectUniqueID [2]  IMPLICIT UniqueIdentifier OPTIONAL,
///     extensions      [3]  EXPLICIT Extensions OPTIONAL
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TBSCertificate {
    /// Certificate version
    pub version: Version,

    /// Serial number magnitude, without a leading zero octet
    serial_number: Vec<u8>,

    /// Signature algorithm identifier
    pub signature: AlgorithmIdentifier<der::Any>,

    /// Issuer Distinguished Name
    pub issuer: Name,

    /// Validity period
    pub validity: Validity,

    /// Subject Distinguished Name
    pub subject: Name,

    /// Subject public key
    pub subject_public_key_info: SubjectPublicKeyInfo,

    /// issuerUniqueID
    pub issuer_unique_id: Option<BitString>,

    /// subjectUniqueID
    pub subject_unique_id: Option<BitString>,

    /// Extensions (v3 only)
    pub extensions: Option<Extensions>,
}

impl TBSCertificate {
    /// Create a v3 TBSCertificate with the required fields.
    pub fn new(
        serial_number: Vec<u8>,
        signature: AlgorithmIdentifier<der::Any>,
        issuer: Name,
        validity: Validity,
        subject: Name,
        subject_public_key_info: SubjectPublicKeyInfo,
    ) -> Self {
        Self {
            version: Version::V3,
            serial_number,
            signature,
            issuer,
            validity,
            subject,
            subject_public_key_info,
            issuer_unique_id: None,
            subject_unique_id: None,
            extensions: None,
        }
    }

    /// Set the extensions
    pub fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = Some(extensions);
        self
    }

    /// Serial number bytes
    pub fn serial_number(&self) -> &[u8] {
        &self.serial_number
    }

    fn version_field(&self) -> Option<ContextSpecific<u8>> {
        (self.version != Version::V1).then(|| ContextSpecific {
            tag_number: TagNumber::N0,
            tag_mode: TagMode::Explicit,
            value: self.version.value(),
        })
    }

    fn unique_id_field(
        tag_number: TagNumber,
        id: &Option<BitString>,
    ) -> Option<ContextSpecificRef<'_, BitString>> {
        id.as_ref().map(|value| ContextSpecificRef {
            tag_number,
            tag_mode: TagMode::Implicit,
            value,
        })
    }

    fn extensions_field(&self) -> Option<ContextSpecificRef<'_, Extensions>> {
        self.extensions.as_ref().map(|value| ContextSpecificRef {
            tag_number: TagNumber::N3,
            tag_mode: TagMode::Explicit,
            value,
        })
    }
}

impl<'a> DecodeValue<'a> for TBSCertificate {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let version = match reader.context_specific::<u8>(TagNumber::N0, TagMode::Explicit)? {
                Some(value) => Version::from_value(value)?,
                None => Version::V1,
            };

            let serial_number = UintRef::decode(reader)?.as_bytes().to_vec();
            let signature = AlgorithmIdentifier::decode(reader)?;
            let issuer = Name::decode(reader)?;
            let validity = Validity::decode(reader)?;
            let subject = Name::decode(reader)?;
            let subject_public_key_info = SubjectPublicKeyInfo::decode(reader)?;

            let issuer_unique_id =
                reader.context_specific::<BitString>(TagNumber::N1, TagMode::Implicit)?;
            let subject_unique_id =
                reader.context_specific::<BitString>(TagNumber::N2, TagMode::Implicit)?;
            let extensions =
                reader.context_specific::<Extensions>(TagNumber::N3, TagMode::Explicit)?;

            Ok(Self {
                version,
                serial_number,
                signature,
                issuer,
                validity,
                subject,
                subject_public_key_info,
                issuer_unique_id,
                subject_unique_id,
                extensions,
            })
        })
    }
}

impl EncodeValue for TBSCertificate {
    fn value_len(&self) -> der::Result<Length> {
        let mut len = Length::ZERO;
        if let Some(version) = self.version_field() {
            len = (len + version.encoded_len()?)?;
        }
        len = (len + UintRef::new(&self.serial_number)?.encoded_len()?)?;
        len = (len + self.signature.encoded_len()?)?;
        len = (len + self.issuer.encoded_len()?)?;
        len = (len + self.validity.encoded_len()?)?;
        len = (len + self.subject.encoded_len()?)?;
        len = (len + self.subject_public_key_info.encoded_len()?)?;
        if let Some(id) = Self::unique_id_field(TagNumber::N1, &self.issuer_unique_id) {
            len = (len + id.encoded_len()?)?;
        }
        if let Some(id) = Self::unique_id_field(TagNumber::N2, &self.subject_unique_id) {
            len = (len + id.encoded_len()?)?;
        }
        if let Some(extensions) = self.extensions_field() {
            len = (len + extensions.encoded_len()?)?;
        }
        Ok(len)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        if let Some(version) = self.version_field() {
            version.encode(writer)?;
        }
        UintRef::new(&self.serial_number)?.encode(writer)?;
        self.signature.encode(writer)?;
        self.issuer.encode(writer)?;
        self.validity.encode(writer)?;
        self.subject.encode(writer)?;
        self.subject_public_key_info.encode(writer)?;
        if let Some(id) = Self::unique_id_field(TagNumber::N1, &self.issuer_unique_id) {
            id.encode(writer)?;
        }
        if let Some(id) = Self::unique_id_field(TagNumber::N2, &self.subject_unique_id) {
            id.encode(writer)?;
        }
        if let Some(extensions) = self.extensions_field() {
            extensions.encode(writer)?;
        }
        Ok(())
    }
}

impl der::FixedTag for TBSCertificate {
    const TAG: Tag = Tag::Sequence;
}

// ============================================================================
// Certificate - RFC 5280 Section 4.1
// ============================================================================

/// X.509 Certificate.
///
/// ```asn1
/// Certificate  ::=  SEQUENCE  {
///     tbsCertificate       TBSCertificate,
///     signatureAlgorithm   AlgorithmIdentifier,
///     signatureValue       BIT STRING
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    /// The signed certificate content
    pub tbs_certificate: TBSCertificate,

    /// The signature algorithm used by the issuer
    pub signature_algorithm: AlgorithmIdentifier<der::Any>,

    /// Signature over the DER-encoded tbsCertificate
    pub signature_value: BitString,
}

impl Certificate {
    /// Create a new Certificate.
    pub fn new(
        tbs_certificate: TBSCertificate,
        signature_algorithm: AlgorithmIdentifier<der::Any>,
        signature_value: BitString,
    ) -> Self {
        Self {
            tbs_certificate,
            signature_algorithm,
            signature_value,
        }
    }

    /// Parse a Certificate from DER-encoded bytes.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        Ok(<Self as Decode>::from_der(bytes)?)
    }

    /// Parse a single PEM `CERTIFICATE` block.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let (label, der_bytes) = pem_rfc7468::decode_vec(pem.as_bytes())?;
        if label != PEM_LABEL {
            return Err(Error::DecodeError(crate::error::DecodeError::InvalidPem(
                alloc::format!("unexpected PEM label {}", label),
            )));
        }
        Self::from_der(&der_bytes)
    }

    /// Encode the certificate to DER.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        Ok(Encode::to_der(self)?)
    }

    /// Encode the certificate to PEM.
    pub fn to_pem(&self) -> Result<String> {
        let der = self.to_der()?;
        Ok(pem_rfc7468::encode_string(
            PEM_LABEL,
            pem_rfc7468::LineEnding::LF,
            &der,
        )?)
    }

    /// DER encoding of the TBSCertificate.
    pub fn tbs_certificate_der(&self) -> Result<Vec<u8>> {
        Ok(Encode::to_der(&self.tbs_certificate)?)
    }

    /// Signature bytes.
    pub fn signature_bytes(&self) -> &[u8] {
        self.signature_value.raw_bytes()
    }

    /// Subject distinguished name.
    pub fn subject(&self) -> &Name {
        &self.tbs_certificate.subject
    }

    /// Issuer distinguished name.
    pub fn issuer(&self) -> &Name {
        &self.tbs_certificate.issuer
    }

    /// Serial number bytes.
    pub fn serial_number(&self) -> &[u8] {
        self.tbs_certificate.serial_number()
    }

    /// Validity period.
    pub fn validity(&self) -> &Validity {
        &self.tbs_certificate.validity
    }

    /// Extensions, if present.
    pub fn extensions(&self) -> Option<&Extensions> {
        self.tbs_certificate.extensions.as_ref()
    }

    /// Subject public key info.
    pub fn subject_public_key_info(&self) -> &SubjectPublicKeyInfo {
        &self.tbs_certificate.subject_public_key_info
    }

    /// The Subject Key Identifier extension, if present.
    pub fn subject_key_identifier(&self) -> Result<Option<SubjectKeyIdentifier>> {
        self.extensions()
            .and_then(|exts| exts.find(&SUBJECT_KEY_IDENTIFIER))
            .map(|ext| SubjectKeyIdentifier::from_extension(ext).map_err(Error::from))
            .transpose()
    }

    /// The Authority Key Identifier extension, if present.
    pub fn authority_key_identifier(&self) -> Result<Option<AuthorityKeyIdentifier>> {
        self.extensions()
            .and_then(|exts| exts.find(&AUTHORITY_KEY_IDENTIFIER))
            .map(|ext| AuthorityKeyIdentifier::from_extension(ext).map_err(Error::from))
            .transpose()
    }
}

impl<'a> DecodeValue<'a> for Certificate {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            Ok(Self {
                tbs_certificate: TBSCertificate::decode(reader)?,
                signature_algorithm: AlgorithmIdentifier::decode(reader)?,
                signature_value: BitString::decode(reader)?,
            })
        })
    }
}

impl EncodeValue for Certificate {
    fn value_len(&self) -> der::Result<Length> {
        self.tbs_certificate.encoded_len()?
            + self.signature_algorithm.encoded_len()?
            + self.signature_value.encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.tbs_certificate.encode(writer)?;
        self.signature_algorithm.encode(writer)?;
        self.signature_value.encode(writer)
    }
}

impl der::FixedTag for Certificate {
    const TAG: Tag = Tag::Sequence;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{bip70_test_case_der, captured_request};
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_version() {
        assert_eq!(Version::V1.value(), 0);
        assert_eq!(Version::V3.value(), 2);
        assert_eq!(Version::default(), Version::V3);
        assert_eq!(Version::from_value(1).unwrap(), Version::V2);
        assert!(Version::from_value(3).is_err());
        assert_eq!(Version::V3.to_string(), "v3");
    }

    #[test]
    fn test_extension_create() {
        let oid = const_oid::ObjectIdentifier::new_unwrap("2.5.29.19");
        let value = vec![0x30, 0x03, 0x01, 0x01, 0xFF];

        let ext = Extension::new(oid, true, value.clone()).unwrap();
        assert_eq!(ext.extn_id, oid);
        assert!(ext.critical);
        assert_eq!(ext.value(), &value);

        let exts = Extensions::from_vec(vec![ext]);
        assert_eq!(exts.len(), 1);
        assert!(exts.find(&oid).is_some());
        assert!(exts.find(&SUBJECT_KEY_IDENTIFIER).is_none());
    }

    #[test]
    fn test_malformed_certificate() {
        assert!(Certificate::from_der(&[]).is_err());
        assert!(Certificate::from_der(&[0x30, 0x03, 0x02, 0x01, 0x01]).is_err());
        assert!(Certificate::from_pem("not a pem").is_err());
    }

    #[test]
    fn test_rsa_2048_fixture_reencodes_exactly() {
        let der = bip70_test_case_der();
        let cert = Certificate::from_der(&der).unwrap();
        assert_eq!(cert.to_der().unwrap(), der);
        assert_eq!(cert.subject().to_string(), "CN=BIP70 test case");
        assert_eq!(cert.issuer(), cert.subject());
        assert_eq!(cert.tbs_certificate.version, Version::V3);
        assert_eq!(cert.extensions().map(Extensions::len), Some(3));

        let ski = cert.subject_key_identifier().unwrap().unwrap();
        let aki = cert.authority_key_identifier().unwrap().unwrap();
        assert_eq!(aki.key_identifier.as_deref(), Some(ski.0.as_slice()));
        assert_eq!(cert.public_key().unwrap().key_type, KeyType::Rsa);
    }

    #[test]
    fn test_v1_certificate_reencodes_exactly() {
        let bundle = captured_request().certificates().unwrap();
        let der = &bundle.certificates[0];
        let cert = Certificate::from_der(der).unwrap();
        assert_eq!(&cert.to_der().unwrap(), der);
        assert_eq!(cert.tbs_certificate.version, Version::V1);
        assert!(cert.extensions().is_none());
        assert!(cert.is_self_signed());
    }

    #[cfg(feature = "ring-backend")]
    mod minted {
        use super::*;
        use crate::test_support::TestPki;

        #[test]
        fn test_der_round_trip() {
            let pki = TestPki::new();
            let der = pki.intermediate.to_der().unwrap();
            let decoded = Certificate::from_der(&der).unwrap();
            assert_eq!(decoded, pki.intermediate);
            assert_eq!(decoded.to_der().unwrap(), der);
            assert_eq!(decoded.subject().to_string(), "CN=Test Intermediate CA");
            assert_eq!(decoded.issuer().to_string(), "CN=Test Root CA");
            assert_eq!(decoded.tbs_certificate.version, Version::V3);
        }

        #[test]
        fn test_pem_round_trip() {
            let pki = TestPki::new();
            let pem = pki.root.to_pem().unwrap();
            assert!(pem.starts_with("-----BEGIN CERTIFICATE-----"));
            let decoded = Certificate::from_pem(&pem).unwrap();
            assert_eq!(decoded, pki.root);
        }

        #[test]
        fn test_wrong_pem_label() {
            let pki = TestPki::new();
            let der = pki.root.to_der().unwrap();
            let pem =
                pem_rfc7468::encode_string("PUBLIC KEY", pem_rfc7468::LineEnding::LF, &der)
                    .unwrap();
            assert!(Certificate::from_pem(&pem).is_err());
        }

        #[test]
        fn test_key_identifiers() {
            let pki = TestPki::new();
            let root_ski = pki.root.subject_key_identifier().unwrap().unwrap();
            let intermediate_aki = pki.intermediate.authority_key_identifier().unwrap().unwrap();
            assert_eq!(
                intermediate_aki.key_identifier.as_deref(),
                Some(root_ski.as_bytes())
            );
            assert!(pki.root.authority_key_identifier().unwrap().is_none());
        }
    }
}
