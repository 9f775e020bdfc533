// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! BIP70 protocol messages.
//!
//! Field numbers follow `paymentrequest.proto`. The structs derive
//! [`prost::Message`]; every field keeps its presence as an `Option` so a
//! decoded message re-encodes to the bytes the merchant signed. The derived
//! getters (`pki_type()`, `network()`, ...) apply the proto2 defaults.
//!
//! prost does not enforce proto2 `required`, so [`ProtocolMessage::from_bytes`]
//! checks those fields after decoding.

pub mod builder;

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use prost::Message;

use crate::error::{Error, Result};

pub use builder::RequestBuilder;

/// `pki_type` of an unsigned request
pub const PKI_TYPE_NONE: &str = "none";
/// `pki_type` for X.509 certificates with SHA-256 signatures
pub const PKI_TYPE_X509_SHA256: &str = "x509+sha256";
/// `pki_type` for X.509 certificates with SHA-1 signatures
pub const PKI_TYPE_X509_SHA1: &str = "x509+sha1";

/// Wire encoding for the BIP70 messages.
pub trait ProtocolMessage: prost::Message + Default + Sized {
    /// Fail with `MissingField` when a `required` field, here or in a nested
    /// message, was absent on the wire.
    fn check_required(&self) -> Result<()>;

    /// Decode and check required fields.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let message = Self::decode(bytes)?;
        message.check_required()?;
        Ok(message)
    }

    /// Encode to protobuf bytes.
    fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }
}

fn check_all<M: ProtocolMessage>(messages: &[M]) -> Result<()> {
    messages.iter().try_for_each(ProtocolMessage::check_required)
}

// ============================================================================
// Output
// ============================================================================

/// An amount to pay to a script.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct Output {
    /// Amount in satoshis
    #[prost(uint64, optional, tag = "1")]
    pub amount: Option<u64>,
    /// Output script (required)
    #[prost(bytes = "vec", optional, tag = "2")]
    pub script: Option<Vec<u8>>,
}

impl Output {
    /// Output paying `amount` to `script`.
    pub fn new(amount: u64, script: Vec<u8>) -> Self {
        Self {
            amount: Some(amount),
            script: Some(script),
        }
    }
}

impl ProtocolMessage for Output {
    fn check_required(&self) -> Result<()> {
        if self.script.is_none() {
            return Err(Error::missing_field("Output.script"));
        }
        Ok(())
    }
}

// ============================================================================
// PaymentDetails
// ============================================================================

/// What the merchant asks to be paid, carried serialized inside the request.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct PaymentDetails {
    /// "main" or "test"
    #[prost(string, optional, tag = "1", default = "main")]
    pub network: Option<String>,
    /// Where the payment should go
    #[prost(message, repeated, tag = "2")]
    pub outputs: Vec<Output>,
    /// Creation time, Unix seconds (required)
    #[prost(uint64, optional, tag = "3")]
    pub time: Option<u64>,
    /// Expiry time, Unix seconds
    #[prost(uint64, optional, tag = "4")]
    pub expires: Option<u64>,
    /// Human-readable description
    #[prost(string, optional, tag = "5")]
    pub memo: Option<String>,
    /// Where to send the Payment message
    #[prost(string, optional, tag = "6")]
    pub payment_url: Option<String>,
    /// Opaque data echoed back in the Payment
    #[prost(bytes = "vec", optional, tag = "7")]
    pub merchant_data: Option<Vec<u8>>,
}

impl PaymentDetails {
    /// Sum of all output amounts.
    pub fn total_amount(&self) -> u64 {
        self.outputs
            .iter()
            .fold(0u64, |total, output| total.saturating_add(output.amount()))
    }
}

impl ProtocolMessage for PaymentDetails {
    fn check_required(&self) -> Result<()> {
        if self.time.is_none() {
            return Err(Error::missing_field("PaymentDetails.time"));
        }
        check_all(&self.outputs)
    }
}

// ============================================================================
// PaymentRequest
// ============================================================================

/// The signed outer message a wallet fetches from the merchant.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct PaymentRequest {
    /// Version of the PaymentDetails encoding
    #[prost(uint32, optional, tag = "1", default = "1")]
    pub payment_details_version: Option<u32>,
    /// "none", "x509+sha256" or "x509+sha1"
    #[prost(string, optional, tag = "2", default = "none")]
    pub pki_type: Option<String>,
    /// Serialized [`X509Certificates`] for the x509 PKI types
    #[prost(bytes = "vec", optional, tag = "3")]
    pub pki_data: Option<Vec<u8>>,
    /// Serialized [`PaymentDetails`] (required)
    #[prost(bytes = "vec", optional, tag = "4")]
    pub serialized_payment_details: Option<Vec<u8>>,
    /// Signature over the request with this field emptied
    #[prost(bytes = "vec", optional, tag = "5")]
    pub signature: Option<Vec<u8>>,
}

impl PaymentRequest {
    /// Decode the embedded PaymentDetails.
    pub fn payment_details(&self) -> Result<PaymentDetails> {
        PaymentDetails::from_bytes(self.serialized_payment_details())
    }

    /// Decode `pki_data` as a certificate bundle. Absent data is an empty bundle.
    pub fn certificates(&self) -> Result<X509Certificates> {
        X509Certificates::from_bytes(self.pki_data())
    }

    /// The bytes a merchant signs: this request with the signature set to an
    /// empty byte string. `self` is left untouched.
    pub fn signing_bytes(&self) -> Vec<u8> {
        let mut unsigned = self.clone();
        unsigned.signature = Some(Vec::new());
        unsigned.encode_to_vec()
    }
}

impl ProtocolMessage for PaymentRequest {
    fn check_required(&self) -> Result<()> {
        if self.serialized_payment_details.is_none() {
            return Err(Error::missing_field(
                "PaymentRequest.serialized_payment_details",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// X509Certificates
// ============================================================================

/// Certificate bundle carried in `pki_data`: the signing certificate first,
/// then any intermediates. The root is not included.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct X509Certificates {
    /// DER-encoded certificates
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub certificates: Vec<Vec<u8>>,
}

impl ProtocolMessage for X509Certificates {
    fn check_required(&self) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// Payment / PaymentAck
// ============================================================================

/// The customer's reply carrying signed transactions.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct Payment {
    /// Copied from PaymentDetails.merchant_data
    #[prost(bytes = "vec", optional, tag = "1")]
    pub merchant_data: Option<Vec<u8>>,
    /// Signed transactions that satisfy PaymentDetails.outputs
    #[prost(bytes = "vec", repeated, tag = "2")]
    pub transactions: Vec<Vec<u8>>,
    /// Where to send refunds
    #[prost(message, repeated, tag = "3")]
    pub refund_to: Vec<Output>,
    /// Note to the merchant
    #[prost(string, optional, tag = "4")]
    pub memo: Option<String>,
}

impl ProtocolMessage for Payment {
    fn check_required(&self) -> Result<()> {
        check_all(&self.refund_to)
    }
}

/// The merchant's acknowledgement of a Payment.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct PaymentAck {
    /// The Payment being acknowledged (required)
    #[prost(message, optional, tag = "1")]
    pub payment: Option<Payment>,
    /// Note to the customer
    #[prost(string, optional, tag = "2")]
    pub memo: Option<String>,
}

impl ProtocolMessage for PaymentAck {
    fn check_required(&self) -> Result<()> {
        self.payment
            .as_ref()
            .ok_or_else(|| Error::missing_field("PaymentAck.payment"))?
            .check_required()
    }
}
