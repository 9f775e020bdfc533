// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Verifier configuration.
//!
//! [`NetworkConfig`] carries the media types a payment protocol exchange
//! uses; [`VerifierConfig`] adds the settings a caller tunes per deployment.
//! Both deserialize from JSON.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::time::{current_time, Time};

/// Media types used by one payment network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimeTypes {
    /// Content type of a PaymentRequest response
    pub payment_request: String,
    /// Content type of a Payment message
    pub payment: String,
    /// Content type of a PaymentACK response
    pub payment_ack: String,
}

/// Network-specific protocol settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network name, e.g. `bitcoin`
    pub name: String,
    /// Media types
    pub mime_types: MimeTypes,
}

impl NetworkConfig {
    /// Bitcoin media types.
    pub fn bitcoin() -> Self {
        Self {
            name: "bitcoin".to_string(),
            mime_types: MimeTypes {
                payment_request: "application/bitcoin-paymentrequest".to_string(),
                payment: "application/bitcoin-payment".to_string(),
                payment_ack: "application/bitcoin-paymentack".to_string(),
            },
        }
    }

    /// The media types
    pub fn mime_types(&self) -> &MimeTypes {
        &self.mime_types
    }

    /// Check a response's `Content-Type` header before decoding a
    /// PaymentRequest. Parameters such as `; charset=` are allowed.
    pub fn check_payment_request_content_type(&self, content_type: Option<&str>) -> Result<()> {
        let content_type = content_type.ok_or_else(|| {
            log::error!("Response has no content-type header");
            Error::validation("Missing content-type header in response")
        })?;

        if !content_type.contains(self.mime_types.payment_request.as_str()) {
            log::error!("Unexpected content-type '{}'", content_type);
            return Err(Error::validation(
                "Invalid content-type header set by server, request failed",
            ));
        }
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::bitcoin()
    }
}

fn default_true() -> bool {
    true
}

/// Settings for a [`RequestValidator`](crate::RequestValidator) deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Payment network
    #[serde(default)]
    pub network: NetworkConfig,

    /// Fixed reference time in Unix seconds; the current time when absent
    #[serde(default)]
    pub reference_time: Option<u64>,

    /// Whether the response content type is checked before decoding
    #[serde(default = "default_true")]
    pub check_content_type: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::bitcoin(),
            reference_time: None,
            check_content_type: true,
        }
    }
}

impl VerifierConfig {
    /// Parse from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::validation(format!("Invalid verifier configuration: {}", e)))
    }

    /// Time certificates are validated at.
    pub fn reference_time(&self) -> Result<Time> {
        match self.reference_time {
            Some(secs) => Ok(Time::from_unix_secs(secs)?),
            None => Ok(current_time()?),
        }
    }

    /// Content-type check honouring `check_content_type`.
    pub fn check_content_type(&self, content_type: Option<&str>) -> Result<()> {
        if !self.check_content_type {
            return Ok(());
        }
        self.network.check_payment_request_content_type(content_type)
    }
}
