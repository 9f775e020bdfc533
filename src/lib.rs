// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! BIP70 Payment Request Verification
//!
//! A no_std-compatible verifier for X.509-signed BIP70 payment requests.
//! Uses `der` for certificate parsing and optional crypto backends for
//! signature checks.
//!
//! # Features
//! - Decode and encode BIP70 protocol-buffer messages
//! - Build a certification path from the signing certificate to a trust anchor
//! - Validate the chain at a chosen reference time
//! - Verify the request signature for `x509+sha1` and `x509+sha256`
//!
//! # Example
//! ```no_run
//! use bip70_x509::prelude::*;
//!
//! # fn example(anchors_pem: &str, bytes: &[u8]) -> bip70_x509::Result<()> {
//! let store = TrustStore::from_pem_bundle(anchors_pem)?;
//! let validator = RequestValidator::new(store, bip70_x509::time::current_time()?);
//! let request = PaymentRequest::from_bytes(bytes)?;
//! let _chain = validator.verify(&request)?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod certificate;
pub mod chain;
#[cfg(feature = "std")]
pub mod config;
pub mod crypto_backend;
pub mod error;
pub mod path;
pub mod request;
pub mod signature;
pub mod time;
pub mod trust_store;
pub mod validator;
pub mod x509;

#[cfg(test)]
mod test_support;

pub use certificate::{Certificate, CertificateView, KeyType, PublicKey};
pub use chain::{CertificateChain, ChainValidationState, ChainValidator};
#[cfg(feature = "std")]
pub use config::{NetworkConfig, VerifierConfig};
#[cfg(feature = "ring-backend")]
pub use crypto_backend::RingBackend;
pub use crypto_backend::{CryptoBackend, HashAlgorithm, RustCryptoBackend, SignatureAlgorithm};
pub use error::{Error, Result};
pub use path::{CertificatePath, PathBuilder};
pub use request::{
    Output, Payment, PaymentAck, PaymentDetails, PaymentRequest, ProtocolMessage, RequestBuilder,
    X509Certificates,
};
pub use signature::{PkiType, SignatureVerifier};
pub use time::{Time, Validity};
pub use trust_store::TrustStore;
pub use validator::RequestValidator;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::request::{PaymentRequest, ProtocolMessage, RequestBuilder};
    pub use crate::validator::RequestValidator;
    pub use crate::{Certificate, Error, Result, TrustStore};
}
