// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! End-to-end payment request verification.
//!
//! [`RequestValidator::verify`] runs the whole pipeline for one request:
//!
//! 1. `pki_type` of `none` means there is nothing to verify.
//! 2. `pki_data` is decoded into certificates; the first signed the request,
//!    the rest are untrusted intermediates in any order.
//! 3. A path from a trust anchor to the signing certificate is built.
//! 4. The path is validated at the reference time.
//! 5. The request signature is checked against the signing certificate.
//!
//! The first failure is returned. A failed path is never retried with
//! another candidate.
//!
//! # Examples
//!
//! ```no_run
//! use bip70_x509::request::ProtocolMessage;
//! use bip70_x509::{PaymentRequest, RequestValidator, Time, TrustStore};
//!
//! # fn example(anchors_pem: &str, bytes: &[u8]) -> bip70_x509::Result<()> {
//! let store = TrustStore::from_pem_bundle(anchors_pem)?;
//! let validator = RequestValidator::new(store, Time::from_unix_secs(1_700_000_000)?);
//!
//! let request = PaymentRequest::from_bytes(bytes)?;
//! match validator.verify(&request)? {
//!     Some(chain) => println!("signed by {}", chain.len()),
//!     None => println!("unsigned request"),
//! }
//! # Ok(())
//! # }
//! ```

extern crate alloc;

use alloc::vec::Vec;

use crate::certificate::{Certificate, CertificateView};
use crate::chain::{CertificateChain, ChainValidator};
use crate::crypto_backend::CryptoBackend;
use crate::error::{DecodeError, Error, Result};
use crate::path::PathBuilder;
use crate::request::PaymentRequest;
use crate::signature::{PkiType, SignatureVerifier};
use crate::time::Time;
use crate::trust_store::TrustStore;

#[cfg(feature = "ring-backend")]
use crate::crypto_backend::RingBackend;

/// Verifies payment requests against a fixed trust store.
#[derive(Debug, Clone)]
pub struct RequestValidator<B> {
    backend: B,
    trust_store: TrustStore,
    reference_time: Time,
}

#[cfg(feature = "ring-backend")]
impl RequestValidator<RingBackend> {
    /// Validator using the ring backend.
    pub fn new(trust_store: TrustStore, reference_time: Time) -> Self {
        Self::with_backend(RingBackend, trust_store, reference_time)
    }
}

impl<B: CryptoBackend> RequestValidator<B> {
    /// Validator using a custom backend.
    pub fn with_backend(backend: B, trust_store: TrustStore, reference_time: Time) -> Self {
        Self {
            backend,
            trust_store,
            reference_time,
        }
    }

    /// The trust anchors
    pub fn trust_store(&self) -> &TrustStore {
        &self.trust_store
    }

    /// Time certificate validity is checked against
    pub fn reference_time(&self) -> &Time {
        &self.reference_time
    }

    /// Verify `request`.
    ///
    /// Returns `Ok(None)` for an unsigned request and the validated chain,
    /// root first, for a signed one.
    pub fn verify(&self, request: &PaymentRequest) -> Result<Option<CertificateChain>> {
        let pki_type = PkiType::parse(request.pki_type()).map_err(|e| {
            log::error!("Rejecting request: {}", e);
            e
        })?;
        if pki_type == PkiType::None {
            log::debug!("Request is unsigned, nothing to verify");
            return Ok(None);
        }

        let certificates = Self::decode_certificates(request)?;
        let (leaf, intermediates) = certificates.split_first().ok_or_else(|| {
            log::error!("Request carries an empty certificate bundle");
            Error::DecodeError(DecodeError::EmptyCertificateBundle)
        })?;
        log::debug!(
            "Request signed by '{}' with {} intermediate(s)",
            leaf.subject_name(),
            intermediates.len()
        );

        let path = PathBuilder::new(self.trust_store.certificates())
            .shortest_path_to_target(leaf, intermediates)?;
        log::debug!("Selected path of {} certificate(s)", path.len());

        ChainValidator::with_backend(&self.backend, self.reference_time).validate(&path)?;
        log::debug!("Certificate chain is valid");

        if !SignatureVerifier::with_backend(&self.backend).verify(request, leaf)? {
            log::error!("Request signature does not verify against '{}'", leaf.subject_name());
            return Err(Error::invalid_request_signature());
        }
        log::debug!("Request signature is valid");

        Ok(Some(path.to_chain()))
    }

    fn decode_certificates(request: &PaymentRequest) -> Result<Vec<Certificate>> {
        let bundle = request.certificates().map_err(|e| {
            log::error!("Cannot decode PKI data: {}", e);
            e
        })?;
        bundle
            .certificates
            .iter()
            .enumerate()
            .map(|(index, der)| {
                Certificate::from_der(der).map_err(|e| {
                    log::error!("Certificate #{} in PKI data is malformed: {}", index, e);
                    e
                })
            })
            .collect()
    }
}
