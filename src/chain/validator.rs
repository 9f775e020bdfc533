// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Chain validation.
//!
//! The chain is walked from the trust anchor to the leaf. Every certificate
//! is checked against the *working* issuer carried in a
//! [`ChainValidationState`]: the anchor is checked against itself, each later
//! certificate against its predecessor. The first failing check aborts.

extern crate alloc;

use alloc::string::String;

use crate::certificate::{CertificateView, KeyType, PublicKey};
use crate::crypto_backend::CryptoBackend;
use crate::error::{ChainError, Error, Result};
use crate::path::CertificatePath;
use crate::time::Time;

#[cfg(feature = "ring-backend")]
use crate::crypto_backend::RingBackend;

// ============================================================================
// Validation State
// ============================================================================

/// Issuer state threaded through one chain walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainValidationState {
    working_public_key: PublicKey,
    working_issuer_name: String,
    index: usize,
    length: usize,
    reference_time: Time,
}

impl ChainValidationState {
    /// State before checking the trust anchor at position 1.
    pub fn new<C: CertificateView>(root: &C, length: usize, reference_time: Time) -> Result<Self> {
        Ok(Self {
            working_public_key: root.public_key()?,
            working_issuer_name: root.subject_name(),
            index: 1,
            length,
            reference_time,
        })
    }

    /// State for the certificate after `cert`, which becomes the issuer.
    pub fn advance<C: CertificateView>(self, cert: &C) -> Result<Self> {
        Ok(Self {
            working_public_key: cert.public_key()?,
            working_issuer_name: cert.subject_name(),
            index: self.index + 1,
            ..self
        })
    }

    /// Key the next certificate must verify against
    pub fn working_public_key(&self) -> &PublicKey {
        &self.working_public_key
    }

    /// Key algorithm of the working issuer
    pub fn working_key_type(&self) -> KeyType {
        self.working_public_key.key_type
    }

    /// Name the next certificate's issuer must equal
    pub fn working_issuer_name(&self) -> &str {
        &self.working_issuer_name
    }

    /// 1-based position of the certificate being checked
    pub fn index(&self) -> usize {
        self.index
    }

    /// Total chain length
    pub fn length(&self) -> usize {
        self.length
    }

    /// Time validity windows are checked against
    pub fn reference_time(&self) -> &Time {
        &self.reference_time
    }

    /// True while checking the leaf
    pub fn is_last(&self) -> bool {
        self.index == self.length
    }
}

// ============================================================================
// Chain Validator
// ============================================================================

/// Validates root-first certificate paths at a fixed reference time.
#[derive(Debug, Clone)]
pub struct ChainValidator<B> {
    backend: B,
    reference_time: Time,
}

#[cfg(feature = "ring-backend")]
impl ChainValidator<RingBackend> {
    /// Validator using the ring backend.
    pub fn new(reference_time: Time) -> Self {
        Self::with_backend(RingBackend, reference_time)
    }
}

impl<B: CryptoBackend> ChainValidator<B> {
    /// Validator using a custom backend.
    pub fn with_backend(backend: B, reference_time: Time) -> Self {
        Self {
            backend,
            reference_time,
        }
    }

    /// Reference time used for validity checks
    pub fn reference_time(&self) -> &Time {
        &self.reference_time
    }

    /// Validate `path` root to leaf.
    pub fn validate<C: CertificateView>(&self, path: &CertificatePath<'_, C>) -> Result<()> {
        let root = path.root().ok_or_else(|| {
            log::error!("Cannot validate an empty certificate chain");
            Error::ChainError(ChainError::EmptyChain)
        })?;

        let mut state = ChainValidationState::new(root, path.len(), self.reference_time)?;
        for cert in path.iter() {
            log::trace!(
                "Checking certificate {}/{}: '{}'",
                state.index(),
                state.length(),
                cert.subject_name()
            );

            self.check_signature(&state, cert)?;
            Self::check_validity(&state, cert)?;
            Self::check_revocation(&state, cert)?;
            Self::check_issuer(&state, cert)?;

            if !state.is_last() {
                state = state.advance(cert)?;
            }
        }

        log::trace!("Chain of {} certificate(s) is valid", path.len());
        Ok(())
    }

    fn check_signature<C: CertificateView>(
        &self,
        state: &ChainValidationState,
        cert: &C,
    ) -> Result<()> {
        cert.verify_issued_by(state.working_public_key(), &self.backend)
            .map_err(|e| {
                log::error!(
                    "Signature on '{}' does not verify against '{}': {}",
                    cert.subject_name(),
                    state.working_issuer_name(),
                    e
                );
                e
            })
    }

    fn check_validity<C: CertificateView>(state: &ChainValidationState, cert: &C) -> Result<()> {
        let validity = cert.validity();
        let now = state.reference_time();
        if validity.is_valid_at(now) {
            return Ok(());
        }

        if now.is_before(&validity.not_before) {
            log::error!("Certificate '{}' is not yet valid", cert.subject_name());
            Err(Error::not_yet_valid(cert.subject_name()))
        } else {
            log::error!("Certificate '{}' has expired", cert.subject_name());
            Err(Error::expired(cert.subject_name()))
        }
    }

    /// Revocation is not checked; this never fails.
    fn check_revocation<C: CertificateView>(
        _state: &ChainValidationState,
        _cert: &C,
    ) -> Result<()> {
        Ok(())
    }

    fn check_issuer<C: CertificateView>(state: &ChainValidationState, cert: &C) -> Result<()> {
        let issuer = cert.issuer_name();
        if issuer != state.working_issuer_name() {
            log::error!(
                "Issuer of '{}' is '{}', expected '{}'",
                cert.subject_name(),
                issuer,
                state.working_issuer_name()
            );
            return Err(Error::issuer_mismatch(state.working_issuer_name(), issuer));
        }
        Ok(())
    }
}
