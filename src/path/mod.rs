// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certification path building.
//!
//! Given the certificate that signed a request and the untrusted
//! intermediates shipped alongside it, [`PathBuilder`] enumerates every path
//! that ends at a trust anchor and picks one deterministically.
//!
//! A certificate `c` may have been issued by a candidate `p` when
//! `c.issuer == p.subject` and, if `c` carries an authority key identifier,
//! that identifier equals `p`'s subject key identifier. Self-signed
//! certificates are only ever considered as trust anchors.

extern crate alloc;

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::certificate::CertificateView;
use crate::chain::CertificateChain;
use crate::error::{Error, Result};

// ============================================================================
// Certificate Path
// ============================================================================

/// A borrowed candidate path, trust anchor first, target last.
#[derive(Debug)]
pub struct CertificatePath<'a, C> {
    certificates: Vec<&'a C>,
}

impl<'a, C> Clone for CertificatePath<'a, C> {
    fn clone(&self) -> Self {
        Self {
            certificates: self.certificates.clone(),
        }
    }
}

impl<'a, C> CertificatePath<'a, C> {
    /// Path from root-first certificates.
    pub fn new(certificates: Vec<&'a C>) -> Self {
        Self { certificates }
    }

    /// The trust anchor
    pub fn root(&self) -> Option<&'a C> {
        self.certificates.first().copied()
    }

    /// The target certificate
    pub fn leaf(&self) -> Option<&'a C> {
        self.certificates.last().copied()
    }

    /// Number of certificates
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    /// True for an empty path
    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    /// Iterate root to target
    pub fn iter(&self) -> impl Iterator<Item = &'a C> + '_ {
        self.certificates.iter().copied()
    }

    /// Root-first certificate references
    pub fn certificates(&self) -> &[&'a C] {
        &self.certificates
    }

    fn push(&mut self, cert: &'a C) {
        self.certificates.push(cert);
    }
}

impl<C: Clone> CertificatePath<'_, C> {
    /// Owned copy of the path.
    pub fn to_chain(&self) -> CertificateChain<C> {
        CertificateChain::new(self.certificates.iter().map(|c| (*c).clone()).collect())
    }
}

// ============================================================================
// Path Builder
// ============================================================================

/// Builds paths from a target certificate up to a fixed set of trust anchors.
#[derive(Debug)]
pub struct PathBuilder<'a, C> {
    trust_anchors: &'a [C],
}

impl<'a, C: CertificateView> PathBuilder<'a, C> {
    /// Bind the trust anchors.
    pub fn new(trust_anchors: &'a [C]) -> Self {
        Self { trust_anchors }
    }

    /// Find every path from a trust anchor to `target` and return the
    /// preferred one: fewest certificates, then lowest DER encodings.
    pub fn shortest_path_to_target(
        &self,
        target: &'a C,
        intermediates: &'a [C],
    ) -> Result<CertificatePath<'a, C>> {
        log::trace!(
            "Building path for '{}' over {} anchor(s) and {} intermediate(s)",
            target.subject_name(),
            self.trust_anchors.len(),
            intermediates.len()
        );

        let mut on_branch = Vec::new();
        let candidates = self.paths_to(target, intermediates, &mut on_branch);
        if candidates.is_empty() {
            log::error!("No certificate paths found for {}", target.subject_name());
            return Err(Error::no_path_found(target.subject_name()));
        }

        let mut keyed = candidates
            .into_iter()
            .map(|path| Ok((Self::path_sort_key(&path)?, path)))
            .collect::<Result<Vec<_>>>()?;
        keyed.sort_by(|(a, _), (b, _)| Self::compare_keys(a, b));

        log::trace!("Found {} candidate path(s)", keyed.len());
        let (_, path) = keyed.swap_remove(0);
        Ok(path)
    }

    /// All paths ending at `target`. `on_branch` holds the intermediates
    /// already used below this call so none is visited twice on one branch.
    fn paths_to(
        &self,
        target: &'a C,
        intermediates: &'a [C],
        on_branch: &mut Vec<&'a C>,
    ) -> Vec<CertificatePath<'a, C>> {
        let mut paths = Vec::new();

        for anchor in self.trust_anchors {
            if !Self::could_have_issued(anchor, target) {
                continue;
            }
            if target.is_same_certificate(anchor) {
                log::trace!("'{}' is itself a trust anchor", target.subject_name());
                paths.push(CertificatePath::new(alloc::vec![target]));
            } else {
                paths.push(CertificatePath::new(alloc::vec![anchor, target]));
            }
        }

        for issuer in intermediates {
            if issuer.is_self_signed()
                || on_branch.iter().any(|seen| core::ptr::eq(*seen, issuer))
                || !Self::could_have_issued(issuer, target)
            {
                continue;
            }

            on_branch.push(issuer);
            for mut path in self.paths_to(issuer, intermediates, on_branch) {
                path.push(target);
                paths.push(path);
            }
            on_branch.pop();
        }

        paths
    }

    fn could_have_issued(issuer: &C, subject: &C) -> bool {
        if subject.issuer_name() != issuer.subject_name() {
            return false;
        }

        match subject.authority_key_id() {
            Ok(Some(aki)) => issuer.subject_key_id().as_deref() == Some(aki.as_slice()),
            Ok(None) => true,
            Err(e) => {
                log::trace!(
                    "Skipping issuer '{}': unreadable authority key identifier on '{}': {}",
                    issuer.subject_name(),
                    subject.subject_name(),
                    e
                );
                false
            }
        }
    }

    fn path_sort_key(path: &CertificatePath<'a, C>) -> Result<Vec<Vec<u8>>> {
        path.iter().map(|cert| cert.sort_key()).collect()
    }

    fn compare_keys(a: &[Vec<u8>], b: &[Vec<u8>]) -> Ordering {
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    }
}
