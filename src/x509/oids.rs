// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Algorithm and extension OID constants
//!
//! The subset of RFC 5280 / RFC 5758 / RFC 5480 identifiers that BIP70
//! certificate chains use in practice.

use const_oid::ObjectIdentifier;

// =============================================================================
// Public Key Algorithm OIDs
// =============================================================================

/// RSA Encryption - 1.2.840.113549.1.1.1
pub const RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// EC Public Key - 1.2.840.10045.2.1
/// Used as algorithm OID in SubjectPublicKeyInfo for ECDSA keys
pub const ECPUBLICKEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// ECDSA P-256 (secp256r1) - 1.2.840.10045.3.1.7
pub const ECDSA_P256: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");

/// ECDSA P-384 (secp384r1) - 1.3.132.0.34
pub const ECDSA_P384: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");

// =============================================================================
// Certificate Signature Algorithm OIDs
// =============================================================================

/// sha1WithRSAEncryption - 1.2.840.113549.1.1.5
pub const SHA1_WITH_RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.5");

/// sha256WithRSAEncryption - 1.2.840.113549.1.1.11
pub const SHA256_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11");

/// sha384WithRSAEncryption - 1.2.840.113549.1.1.12
pub const SHA384_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.12");

/// sha512WithRSAEncryption - 1.2.840.113549.1.1.13
pub const SHA512_WITH_RSA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.13");

/// ecdsa-with-SHA1 - 1.2.840.10045.4.1
pub const ECDSA_WITH_SHA1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.1");

/// ecdsa-with-SHA256 - 1.2.840.10045.4.3.2
pub const ECDSA_WITH_SHA256: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2");

/// ecdsa-with-SHA384 - 1.2.840.10045.4.3.3
pub const ECDSA_WITH_SHA384: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.3");

// =============================================================================
// Extension OIDs - RFC 5280 Section 4.2
// =============================================================================

/// Authority Key Identifier - 2.5.29.35
pub const AUTHORITY_KEY_IDENTIFIER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.35");

/// Subject Key Identifier - 2.5.29.14
pub const SUBJECT_KEY_IDENTIFIER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.14");
