// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Error types for payment request verification
//!
//! Every stage (decoding, path building, chain validation, signature
//! verification) reports failures through the single [`Error`] enum below.
//! None of these are recovered internally; they are returned to the caller
//! as-is.

extern crate alloc;

use alloc::string::{String, ToString};
use core::fmt;

/// Result type alias for verification operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for payment request verification
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// Malformed binary input: request, certificate bundle or certificate
    DecodeError(DecodeError),

    /// Path building and chain structure errors
    ChainError(ChainError),

    /// Certificate validity window errors
    TimeError(TimeError),

    /// Certificate or request signature errors
    SignatureError(SignatureError),

    /// Unknown PKI type, key type or signature algorithm
    AlgorithmError(AlgorithmError),

    /// Invalid caller input (builder, configuration, media type)
    ValidationError(String),
}

/// Errors raised while decoding binary input
#[derive(Debug, Clone)]
pub enum DecodeError {
    /// DER/ASN.1 error from the der crate
    Asn1(String),

    /// Structurally invalid DER
    InvalidDer(String),

    /// Malformed protocol buffer encoding
    Protobuf(String),

    /// A required message field was not present
    MissingField(&'static str),

    /// Certificate bundle carried no certificates
    EmptyCertificateBundle,

    /// Invalid PEM encoding
    InvalidPem(String),

    /// Invalid base64 encoding
    InvalidBase64(String),
}

/// Errors related to certificate paths
#[derive(Debug, Clone)]
pub enum ChainError {
    /// No path connects the target certificate to a trust anchor
    NoPathFound(String),

    /// Chain has no certificates
    EmptyChain,

    /// Issuer name does not match the previous certificate's subject
    IssuerMismatch { expected: String, found: String },
}

/// Errors related to certificate validity windows
#[derive(Debug, Clone)]
pub enum TimeError {
    /// Reference time is before notBefore
    NotYetValid { subject: String },

    /// Reference time is after notAfter
    Expired { subject: String },

    /// Time value could not be produced or represented
    InvalidTime,
}

/// Errors related to signature verification
#[derive(Debug, Clone)]
pub enum SignatureError {
    /// A certificate signature did not verify against its issuer key
    VerificationFailed,

    /// The payment request signature did not verify against the leaf key
    InvalidRequestSignature,

    /// Error reported by the ring library
    RingError(String),
}

/// Errors related to algorithm selection
#[derive(Debug, Clone)]
pub enum AlgorithmError {
    /// PKI type has no signature algorithm
    UnknownPkiType(String),

    /// Public key type is neither RSA nor ECDSA
    UnknownKeyType(String),

    /// Algorithm recognized but not supported
    Unsupported(String),
}

// ============================================================================
// Error Display Implementation (works in both std and no_std)
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DecodeError(e) => write!(f, "Decode error: {}", e),
            Error::ChainError(e) => write!(f, "Chain error: {}", e),
            Error::TimeError(e) => write!(f, "Certificate is not valid: {}", e),
            Error::SignatureError(e) => write!(f, "Signature error: {}", e),
            Error::AlgorithmError(e) => write!(f, "Algorithm error: {}", e),
            Error::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Asn1(msg) => write!(f, "ASN.1 error: {}", msg),
            DecodeError::InvalidDer(msg) => write!(f, "Invalid DER encoding: {}", msg),
            DecodeError::Protobuf(msg) => write!(f, "Invalid protocol buffer: {}", msg),
            DecodeError::MissingField(name) => write!(f, "Missing required field: {}", name),
            DecodeError::EmptyCertificateBundle => {
                write!(f, "Certificate bundle contains no certificates")
            }
            DecodeError::InvalidPem(msg) => write!(f, "Invalid PEM: {}", msg),
            DecodeError::InvalidBase64(msg) => write!(f, "Invalid base64: {}", msg),
        }
    }
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::NoPathFound(subject) => {
                write!(f, "No certificate paths found for {}", subject)
            }
            ChainError::EmptyChain => write!(f, "Certificate chain is empty"),
            ChainError::IssuerMismatch { expected, found } => {
                write!(
                    f,
                    "Issuer name mismatch: expected '{}', found '{}'",
                    expected, found
                )
            }
        }
    }
}

impl fmt::Display for TimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeError::NotYetValid { subject } => {
                write!(f, "certificate '{}' is not yet valid", subject)
            }
            TimeError::Expired { subject } => write!(f, "certificate '{}' has expired", subject),
            TimeError::InvalidTime => write!(f, "invalid time"),
        }
    }
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureError::VerificationFailed => write!(f, "Signature verification failed"),
            SignatureError::InvalidRequestSignature => {
                write!(f, "Invalid signature on request")
            }
            SignatureError::RingError(msg) => write!(f, "Cryptographic error: {}", msg),
        }
    }
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmError::UnknownPkiType(pki_type) => write!(
                f,
                "Unknown PKI type or no signature algorithm specified. ({})",
                pki_type
            ),
            AlgorithmError::UnknownKeyType(key_type) => {
                write!(f, "Unknown public key type ({})", key_type)
            }
            AlgorithmError::Unsupported(algo) => write!(f, "Unsupported algorithm: {}", algo),
        }
    }
}

// ============================================================================
// std::error::Error implementation (when std feature is enabled)
// ============================================================================

#[cfg(feature = "std")]
impl std::error::Error for Error {}

// ============================================================================
// Conversions from external crate errors
// ============================================================================

/// Convert from der crate errors
impl From<der::Error> for Error {
    fn from(err: der::Error) -> Self {
        Error::DecodeError(DecodeError::Asn1(err.to_string()))
    }
}

/// Convert from protocol buffer decoding errors
impl From<prost::DecodeError> for Error {
    fn from(err: prost::DecodeError) -> Self {
        Error::DecodeError(DecodeError::Protobuf(err.to_string()))
    }
}

/// Convert from ring's Unspecified error
#[cfg(feature = "ring-backend")]
impl From<ring::error::Unspecified> for Error {
    fn from(_: ring::error::Unspecified) -> Self {
        Error::SignatureError(SignatureError::RingError(
            "Cryptographic operation failed".to_string(),
        ))
    }
}

/// Convert from ring's KeyRejected error
#[cfg(feature = "ring-backend")]
impl From<ring::error::KeyRejected> for Error {
    fn from(err: ring::error::KeyRejected) -> Self {
        Error::SignatureError(SignatureError::RingError(err.to_string()))
    }
}

/// Convert from PEM decoding errors
impl From<pem_rfc7468::Error> for Error {
    fn from(err: pem_rfc7468::Error) -> Self {
        Error::DecodeError(DecodeError::InvalidPem(err.to_string()))
    }
}

/// Convert from base64 decoding errors
impl From<base64ct::Error> for Error {
    fn from(err: base64ct::Error) -> Self {
        Error::DecodeError(DecodeError::InvalidBase64(err.to_string()))
    }
}

// ============================================================================
// Helper constructors for common error cases
// ============================================================================

impl Error {
    /// Create a decode error for invalid DER
    pub fn invalid_der<S: Into<String>>(msg: S) -> Self {
        Error::DecodeError(DecodeError::InvalidDer(msg.into()))
    }

    /// Create a missing field error
    pub fn missing_field(field: &'static str) -> Self {
        Error::DecodeError(DecodeError::MissingField(field))
    }

    /// Create a no-path-found error for the given subject
    pub fn no_path_found<S: Into<String>>(subject: S) -> Self {
        Error::ChainError(ChainError::NoPathFound(subject.into()))
    }

    /// Create an issuer mismatch error
    pub fn issuer_mismatch<S: Into<String>, T: Into<String>>(expected: S, found: T) -> Self {
        Error::ChainError(ChainError::IssuerMismatch {
            expected: expected.into(),
            found: found.into(),
        })
    }

    /// Create a certificate signature verification failure
    pub fn signature_failed() -> Self {
        Error::SignatureError(SignatureError::VerificationFailed)
    }

    /// Create a request signature failure
    pub fn invalid_request_signature() -> Self {
        Error::SignatureError(SignatureError::InvalidRequestSignature)
    }

    /// Create an unsupported algorithm error
    pub fn unsupported_algorithm<S: Into<String>>(algo: S) -> Self {
        Error::AlgorithmError(AlgorithmError::Unsupported(algo.into()))
    }

    /// Create an unknown PKI type error
    pub fn unknown_pki_type<S: Into<String>>(pki_type: S) -> Self {
        Error::AlgorithmError(AlgorithmError::UnknownPkiType(pki_type.into()))
    }

    /// Create an unknown key type error
    pub fn unknown_key_type<S: Into<String>>(key_type: S) -> Self {
        Error::AlgorithmError(AlgorithmError::UnknownKeyType(key_type.into()))
    }

    /// Create a certificate expired error
    pub fn expired<S: Into<String>>(subject: S) -> Self {
        Error::TimeError(TimeError::Expired {
            subject: subject.into(),
        })
    }

    /// Create a certificate not yet valid error
    pub fn not_yet_valid<S: Into<String>>(subject: S) -> Self {
        Error::TimeError(TimeError::NotYetValid {
            subject: subject.into(),
        })
    }

    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Error::ValidationError(msg.into())
    }

    /// True when path building found no chain to a trust anchor.
    pub fn is_no_path_found(&self) -> bool {
        matches!(self, Error::ChainError(ChainError::NoPathFound(_)))
    }

    /// True when a certificate validity window excluded the reference time.
    pub fn is_validity_error(&self) -> bool {
        matches!(
            self,
            Error::TimeError(TimeError::Expired { .. } | TimeError::NotYetValid { .. })
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
