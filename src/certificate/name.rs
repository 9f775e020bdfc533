// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Distinguished Names for X.509 certificates.
//!
//! Names are kept close to the wire: each attribute value is stored as its
//! raw DER TLV so that a decoded certificate re-encodes byte-for-byte (the
//! TBS bytes are what the issuer signed). The string form produced by
//! [`fmt::Display`] is what path building and chain validation compare.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use const_oid::ObjectIdentifier;
use der::{
    asn1::{PrintableString, SetOfVec, Utf8StringRef},
    Decode, DecodeValue, Encode, EncodeValue, ErrorKind, Header, Length, Reader, Sequence, Tag,
    ValueOrd, Writer,
};

// ============================================================================
// Attribute Type OIDs (RFC 5280, Appendix A.1)
// ============================================================================

/// Common Name (CN) - 2.5.4.3
pub const CN: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");

/// Serial Number - 2.5.4.5
pub const SERIAL_NUMBER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.5");

/// Country (C) - 2.5.4.6
pub const COUNTRY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.6");

/// Locality (L) - 2.5.4.7
pub const LOCALITY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.7");

/// State or Province (ST) - 2.5.4.8
pub const STATE_OR_PROVINCE_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.8");

/// Organization (O) - 2.5.4.10
pub const ORGANIZATION_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.10");

/// Organizational Unit (OU) - 2.5.4.11
pub const ORGANIZATIONAL_UNIT_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.11");

/// Domain Component (DC) - 0.9.2342.19200300.100.1.25
pub const DOMAIN_COMPONENT: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("0.9.2342.19200300.100.1.25");

/// Email Address - 1.2.840.113549.1.9.1
pub const EMAIL_ADDRESS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.1");

// ============================================================================
// AttributeTypeAndValue - RFC 5280 Section 4.1.2.4
// ============================================================================

/// A single `type=value` pair of an RDN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTypeAndValue {
    /// Attribute type (OID)
    pub oid: ObjectIdentifier,
    /// Raw DER-encoded value (tag + length + content).
    raw_value: Vec<u8>,
}

impl<'a> DecodeValue<'a> for AttributeTypeAndValue {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |nested| {
            let oid = ObjectIdentifier::decode(nested)?;

            // UniversalString (0x1C) has no der::Tag, so the value is kept raw.
            let remaining = nested.remaining_len();
            let raw_value = nested.read_vec(remaining)?;
            if raw_value.is_empty() {
                return Err(ErrorKind::Length { tag: Tag::Sequence }.into());
            }

            Ok(Self { oid, raw_value })
        })
    }
}

impl EncodeValue for AttributeTypeAndValue {
    fn value_len(&self) -> der::Result<Length> {
        self.oid.encoded_len()? + Length::try_from(self.raw_value.len())?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.oid.encode(writer)?;
        writer.write(&self.raw_value)
    }
}

impl Sequence<'_> for AttributeTypeAndValue {}

impl ValueOrd for AttributeTypeAndValue {
    fn value_cmp(&self, other: &Self) -> der::Result<core::cmp::Ordering> {
        Ok(self
            .oid
            .cmp(&other.oid)
            .then_with(|| self.raw_value.cmp(&other.raw_value)))
    }
}

impl AttributeTypeAndValue {
    /// Attribute with a UTF8String value.
    pub fn new_utf8(oid: ObjectIdentifier, value: &str) -> der::Result<Self> {
        let raw_value = Utf8StringRef::new(value)?.to_der()?;
        Ok(Self { oid, raw_value })
    }

    /// Attribute with a PrintableString value.
    pub fn new_printable(oid: ObjectIdentifier, value: &str) -> der::Result<Self> {
        let raw_value = PrintableString::new(value)?.to_der()?;
        Ok(Self { oid, raw_value })
    }

    /// Tag byte and content octets of the raw value.
    fn tag_and_content(&self) -> Option<(u8, &[u8])> {
        let (&tag, rest) = self.raw_value.split_first()?;
        let (&len_byte, rest) = rest.split_first()?;
        let skip = if len_byte & 0x80 == 0 {
            0
        } else {
            (len_byte & 0x7F) as usize
        };
        Some((tag, rest.get(skip..)?))
    }

    /// The attribute value as text, if it is one of the directory string types.
    pub fn value_as_str(&self) -> Option<String> {
        let (tag, content) = self.tag_and_content()?;
        match tag {
            // UTF8String, PrintableString, TeletexString, IA5String
            0x0C | 0x13 | 0x14 | 0x16 => core::str::from_utf8(content).ok().map(String::from),
            // BMPString (UCS-2 big endian)
            0x1E => {
                if content.len() % 2 != 0 {
                    return None;
                }
                let units: Vec<u16> = content
                    .chunks(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units).ok()
            }
            // UniversalString (UCS-4 big endian)
            0x1C => {
                if content.len() % 4 != 0 {
                    return None;
                }
                content
                    .chunks(4)
                    .map(|quad| char::from_u32(u32::from_be_bytes([quad[0], quad[1], quad[2], quad[3]])))
                    .collect()
            }
            _ => None,
        }
    }

    /// Short name of the attribute type, if known.
    pub fn attr_name(&self) -> Option<&'static str> {
        match self.oid {
            CN => Some("CN"),
            SERIAL_NUMBER => Some("SERIALNUMBER"),
            COUNTRY_NAME => Some("C"),
            LOCALITY_NAME => Some("L"),
            STATE_OR_PROVINCE_NAME => Some("ST"),
            ORGANIZATION_NAME => Some("O"),
            ORGANIZATIONAL_UNIT_NAME => Some("OU"),
            DOMAIN_COMPONENT => Some("DC"),
            EMAIL_ADDRESS => Some("emailAddress"),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeTypeAndValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.attr_name() {
            Some(name) => write!(f, "{}=", name)?,
            None => write!(f, "{}=", self.oid)?,
        }
        match self.value_as_str() {
            Some(value) => write!(f, "{}", value),
            // RFC 4514 hex form for values that are not strings
            None => {
                write!(f, "#")?;
                for byte in &self.raw_value {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }
    }
}

// ============================================================================
// RelativeDistinguishedName - RFC 5280 Section 4.1.2.4
// ============================================================================

/// RelativeDistinguishedName (RDN) is a SET OF AttributeTypeAndValue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeDistinguishedName {
    /// Set of attributes
    pub attributes: SetOfVec<AttributeTypeAndValue>,
}

impl RelativeDistinguishedName {
    /// Create a new RDN with a single attribute.
    pub fn new(attr: AttributeTypeAndValue) -> der::Result<Self> {
        let mut attributes = SetOfVec::new();
        attributes.insert(attr)?;
        Ok(Self { attributes })
    }
}

impl<'a> DecodeValue<'a> for RelativeDistinguishedName {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let attributes = SetOfVec::decode_value(reader, header)?;
        Ok(Self { attributes })
    }
}

impl EncodeValue for RelativeDistinguishedName {
    fn value_len(&self) -> der::Result<Length> {
        self.attributes.value_len()
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.attributes.encode_value(writer)
    }
}

impl der::FixedTag for RelativeDistinguishedName {
    const TAG: Tag = Tag::Set;
}

impl fmt::Display for RelativeDistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, attr) in self.attributes.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            write!(f, "{}", attr)?;
        }
        Ok(())
    }
}

// ============================================================================
// RDNSequence (Name) - RFC 5280 Section 4.1.2.4
// ============================================================================

/// RDNSequence represents a Distinguished Name (DN).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RDNSequence {
    /// Sequence of RDNs, in encoding order
    pub rdns: Vec<RelativeDistinguishedName>,
}

impl<'a> DecodeValue<'a> for RDNSequence {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let mut rdns = Vec::new();
            while !reader.is_finished() {
                rdns.push(RelativeDistinguishedName::decode(reader)?);
            }
            Ok(Self { rdns })
        })
    }
}

impl EncodeValue for RDNSequence {
    fn value_len(&self) -> der::Result<Length> {
        self.rdns
            .iter()
            .try_fold(Length::ZERO, |len, rdn| len + rdn.encoded_len()?)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        for rdn in &self.rdns {
            rdn.encode(writer)?;
        }
        Ok(())
    }
}

impl der::FixedTag for RDNSequence {
    const TAG: Tag = Tag::Sequence;
}

impl RDNSequence {
    /// Create a new empty RDNSequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a name with one single-valued UTF8String RDN per pair.
    pub fn from_utf8_attributes(attributes: &[(ObjectIdentifier, &str)]) -> der::Result<Self> {
        let mut name = Self::new();
        for (oid, value) in attributes {
            name.push(RelativeDistinguishedName::new(
                AttributeTypeAndValue::new_utf8(*oid, value)?,
            )?);
        }
        Ok(name)
    }

    /// Add an RDN to the sequence.
    pub fn push(&mut self, rdn: RelativeDistinguishedName) {
        self.rdns.push(rdn);
    }

    /// Find the first attribute with the given OID.
    pub fn find_attr(&self, oid: ObjectIdentifier) -> Option<&AttributeTypeAndValue> {
        self.rdns
            .iter()
            .flat_map(|rdn| rdn.attributes.iter())
            .find(|attr| attr.oid == oid)
    }

    /// Get the Common Name (CN) if present.
    pub fn common_name(&self) -> Option<String> {
        self.find_attr(CN).and_then(|a| a.value_as_str())
    }
}

/// RFC 4514 ordering: last RDN first.
impl fmt::Display for RDNSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rdns: Vec<String> = self.rdns.iter().rev().map(|r| r.to_string()).collect();
        write!(f, "{}", rdns.join(", "))
    }
}

/// Type alias for Name (which is just RDNSequence in practice).
pub type Name = RDNSequence;

// ============================================================================
// Tests
// ============================================================================
