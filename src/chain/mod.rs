// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate chains.
//!
//! A [`CertificateChain`] is the owned result of a successful verification:
//! the trust anchor first, the certificate that signed the request last.
//! [`validator`] walks a borrowed path in the same order.

pub mod validator;

extern crate alloc;

use alloc::vec::Vec;

use crate::certificate::Certificate;

pub use validator::{ChainValidationState, ChainValidator};

// ============================================================================
// Certificate Chain
// ============================================================================

/// A certificate chain, ordered from root (trust anchor) to leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateChain<C = Certificate> {
    /// The certificates in the chain, root first
    pub certificates: Vec<C>,
}

impl<C> CertificateChain<C> {
    /// Create a new certificate chain from root-first certificates
    pub fn new(certificates: Vec<C>) -> Self {
        Self { certificates }
    }

    /// The trust anchor
    pub fn root(&self) -> Option<&C> {
        self.certificates.first()
    }

    /// The certificate that signed the request
    pub fn leaf(&self) -> Option<&C> {
        self.certificates.last()
    }

    /// Chain length
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    /// True when the chain holds no certificates
    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    /// Iterate root to leaf
    pub fn iter(&self) -> core::slice::Iter<'_, C> {
        self.certificates.iter()
    }

    /// Take the certificates out of the chain
    pub fn into_vec(self) -> Vec<C> {
        self.certificates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_chain_order() {
        let chain = CertificateChain::new(vec!["root", "intermediate", "leaf"]);
        assert_eq!(chain.root(), Some(&"root"));
        assert_eq!(chain.leaf(), Some(&"leaf"));
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.iter().count(), 3);
        assert_eq!(chain.into_vec(), vec!["root", "intermediate", "leaf"]);
    }

    #[test]
    fn test_empty_chain() {
        let chain: CertificateChain<&str> = CertificateChain::new(Vec::new());
        assert!(chain.is_empty());
        assert!(chain.root().is_none());
        assert!(chain.leaf().is_none());
    }
}
