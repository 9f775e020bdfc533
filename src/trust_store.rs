// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Trust anchors.
//!
//! A [`TrustStore`] is loaded once from DER blobs, a PEM bundle or a JSON
//! map of base64 DER certificates, and is read-only afterwards. Loading is
//! fail-fast: one bad entry rejects the whole store.

extern crate alloc;

use alloc::vec::Vec;

use crate::certificate::Certificate;
use crate::error::{Error, Result};

const PEM_BEGIN: &str = "-----BEGIN CERTIFICATE-----";
const PEM_END: &str = "-----END CERTIFICATE-----";

/// Certificates designated as trust anchors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustStore {
    certificates: Vec<Certificate>,
}

impl TrustStore {
    /// Store over already decoded certificates.
    pub fn new(certificates: Vec<Certificate>) -> Self {
        Self { certificates }
    }

    /// Decode each DER blob as a certificate.
    pub fn from_der_certificates<I, T>(certificates: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let certificates = certificates
            .into_iter()
            .enumerate()
            .map(|(index, der)| {
                Certificate::from_der(der.as_ref()).map_err(|e| {
                    log::error!("Trust anchor #{} is not a valid certificate: {}", index, e);
                    e
                })
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Loaded {} trust anchor(s) from DER", certificates.len());
        Ok(Self::new(certificates))
    }

    /// Decode concatenated PEM `CERTIFICATE` blocks. Text outside the blocks,
    /// including PEM blocks with other labels, is ignored.
    pub fn from_pem_bundle(pem: &str) -> Result<Self> {
        let mut certificates = Vec::new();
        let mut rest = pem;

        while let Some(start) = rest.find(PEM_BEGIN) {
            let block = &rest[start..];
            let end = block
                .find(PEM_END)
                .map(|pos| pos + PEM_END.len())
                .ok_or_else(|| {
                    log::error!(
                        "Unterminated PEM block after {} certificate(s)",
                        certificates.len()
                    );
                    Error::DecodeError(crate::error::DecodeError::InvalidPem(
                        alloc::string::String::from("missing END CERTIFICATE line"),
                    ))
                })?;

            certificates.push(Certificate::from_pem(&block[..end])?);
            rest = &block[end..];
        }

        log::debug!("Loaded {} trust anchor(s) from PEM", certificates.len());
        Ok(Self::new(certificates))
    }

    /// Decode a JSON object mapping labels to base64 DER certificates.
    #[cfg(feature = "std")]
    pub fn from_json(json: &str) -> Result<Self> {
        use alloc::collections::BTreeMap;
        use alloc::string::String;
        use base64ct::{Base64, Encoding};

        let entries: BTreeMap<String, String> = serde_json::from_str(json)
            .map_err(|e| Error::validation(alloc::format!("Invalid trust store JSON: {}", e)))?;

        let mut certificates = Vec::with_capacity(entries.len());
        for (label, encoded) in &entries {
            let der = Base64::decode_vec(encoded).map_err(|e| {
                log::error!("Trust anchor '{}' is not valid base64", label);
                Error::DecodeError(crate::error::DecodeError::InvalidBase64(alloc::format!(
                    "{}: {}",
                    label,
                    e
                )))
            })?;
            let cert = Certificate::from_der(&der).map_err(|e| {
                log::error!("Trust anchor '{}' is not a valid certificate", label);
                Error::invalid_der(alloc::format!("{}: {}", label, e))
            })?;
            certificates.push(cert);
        }

        log::debug!("Loaded {} trust anchor(s) from JSON", certificates.len());
        Ok(Self::new(certificates))
    }

    /// Add a trust anchor.
    pub fn add(&mut self, certificate: Certificate) {
        self.certificates.push(certificate);
    }

    /// The trust anchors
    pub fn certificates(&self) -> &[Certificate] {
        &self.certificates
    }

    /// Number of trust anchors
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    /// True when no anchor is trusted
    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }
}
