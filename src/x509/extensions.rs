// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Key identifier extensions.
//!
//! Path building links a certificate to candidate issuers through the
//! Authority Key Identifier / Subject Key Identifier pair (RFC 5280
//! Sections 4.2.1.1 and 4.2.1.2). No other extension influences path
//! selection or validation.

extern crate alloc;

use alloc::vec::Vec;

use der::{
    asn1::{ContextSpecific, OctetString},
    Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Tag, TagMode, TagNumber,
    Writer,
};

pub use super::oids::{AUTHORITY_KEY_IDENTIFIER, SUBJECT_KEY_IDENTIFIER};
pub use crate::certificate::{Extension, Extensions};

// ============================================================================
// Subject Key Identifier - RFC 5280 Section 4.2.1.2
// ============================================================================

/// Subject Key Identifier extension.
///
/// ```asn1
/// SubjectKeyIdentifier ::= KeyIdentifier
/// KeyIdentifier ::= OCTET STRING
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectKeyIdentifier(pub Vec<u8>);

impl SubjectKeyIdentifier {
    /// Parse from the extension value bytes
    pub fn from_extension(ext: &Extension) -> Result<Self, der::Error> {
        let octets = OctetString::from_der(ext.value())?;
        Ok(Self(octets.as_bytes().to_vec()))
    }

    /// DER encoding of the extension value
    pub fn to_extension_value(&self) -> Result<Vec<u8>, der::Error> {
        OctetString::new(self.0.clone())?.to_der()
    }

    /// The key identifier bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

// ============================================================================
// Authority Key Identifier - RFC 5280 Section 4.2.1.1
// ============================================================================

/// Authority Key Identifier extension.
///
/// ```asn1
/// AuthorityKeyIdentifier ::= SEQUENCE {
///     keyIdentifier             [0] KeyIdentifier           OPTIONAL,
///     authorityCertIssuer       [1] GeneralNames            OPTIONAL,
///     authorityCertSerialNumber [2] CertificateSerialNumber OPTIONAL
/// }
/// ```
///
/// Only `keyIdentifier` is interpreted; the issuer/serial alternative is
/// kept as raw bytes so the value re-encodes unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorityKeyIdentifier {
    /// keyIdentifier `[0]`
    pub key_identifier: Option<Vec<u8>>,
    /// Raw `[1]` and `[2]` fields, if any
    issuer_and_serial: Vec<u8>,
}

impl AuthorityKeyIdentifier {
    /// Create an AuthorityKeyIdentifier carrying only a key identifier.
    pub fn from_key_identifier(key_identifier: Vec<u8>) -> Self {
        Self {
            key_identifier: Some(key_identifier),
            issuer_and_serial: Vec::new(),
        }
    }

    /// Parse from the extension value bytes
    pub fn from_extension(ext: &Extension) -> Result<Self, der::Error> {
        Self::from_der(ext.value())
    }

    fn key_identifier_field(id: &[u8]) -> der::Result<ContextSpecific<OctetString>> {
        Ok(ContextSpecific {
            tag_number: TagNumber::N0,
            tag_mode: TagMode::Implicit,
            value: OctetString::new(id.to_vec())?,
        })
    }
}

impl<'a> DecodeValue<'a> for AuthorityKeyIdentifier {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let key_identifier = reader
                .context_specific::<OctetString>(TagNumber::N0, TagMode::Implicit)?
                .map(|octets| octets.as_bytes().to_vec());

            let remaining = reader.remaining_len();
            let issuer_and_serial = reader.read_vec(remaining)?;

            Ok(Self {
                key_identifier,
                issuer_and_serial,
            })
        })
    }
}

impl EncodeValue for AuthorityKeyIdentifier {
    fn value_len(&self) -> der::Result<Length> {
        let id_len = match &self.key_identifier {
            Some(id) => Self::key_identifier_field(id)?.encoded_len()?,
            None => Length::ZERO,
        };
        id_len + Length::try_from(self.issuer_and_serial.len())?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        if let Some(id) = &self.key_identifier {
            Self::key_identifier_field(id)?.encode(writer)?;
        }
        writer.write(&self.issuer_and_serial)
    }
}

impl der::FixedTag for AuthorityKeyIdentifier {
    const TAG: Tag = Tag::Sequence;
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_subject_key_identifier() {
        let ski = SubjectKeyIdentifier(vec![0x01, 0x02, 0x03, 0x04]);
        let value = ski.to_extension_value().unwrap();
        assert_eq!(value, vec![0x04, 0x04, 0x01, 0x02, 0x03, 0x04]);

        let ext = Extension::new(SUBJECT_KEY_IDENTIFIER, false, value).unwrap();
        let parsed = SubjectKeyIdentifier::from_extension(&ext).unwrap();
        assert_eq!(parsed.as_bytes(), &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_authority_key_identifier_key_id_only() {
        // SEQUENCE { [0] 0xAABB }
        let value = vec![0x30, 0x04, 0x80, 0x02, 0xAA, 0xBB];
        let ext = Extension::new(AUTHORITY_KEY_IDENTIFIER, false, value.clone()).unwrap();
        let aki = AuthorityKeyIdentifier::from_extension(&ext).unwrap();
        assert_eq!(aki.key_identifier, Some(vec![0xAA, 0xBB]));
        assert_eq!(aki.to_der().unwrap(), value);
        assert_eq!(
            AuthorityKeyIdentifier::from_key_identifier(vec![0xAA, 0xBB])
                .to_der()
                .unwrap(),
            value
        );
    }

    #[test]
    fn test_authority_key_identifier_serial_only() {
        // SEQUENCE { [2] 0x05 }: no keyIdentifier
        let value = vec![0x30, 0x03, 0x82, 0x01, 0x05];
        let aki = AuthorityKeyIdentifier::from_der(&value).unwrap();
        assert_eq!(aki.key_identifier, None);
        assert_eq!(aki.to_der().unwrap(), value);
    }

    #[test]
    fn test_authority_key_identifier_malformed() {
        // Declared length runs past the end of the value
        let value = vec![0x30, 0x08, 0x80, 0x02, 0xAA];
        assert!(AuthorityKeyIdentifier::from_der(&value).is_err());

        // Not a SEQUENCE
        let value = vec![0x04, 0x02, 0xAA, 0xBB];
        assert!(AuthorityKeyIdentifier::from_der(&value).is_err());
    }
}
