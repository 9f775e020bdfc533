// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Assembling PaymentDetails and unsigned PaymentRequests.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use super::{Output, PaymentDetails, PaymentRequest, ProtocolMessage};
use crate::error::{Error, Result};

/// Collects PaymentDetails fields, then checks the required ones on build.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    network: Option<String>,
    outputs: Vec<Output>,
    time: Option<u64>,
    expires: Option<u64>,
    memo: Option<String>,
    payment_url: Option<String>,
    merchant_data: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the network name ("main" or "test").
    pub fn set_network<S: Into<String>>(&mut self, network: S) -> &mut Self {
        self.network = Some(network.into());
        self
    }

    /// Replace all outputs.
    pub fn set_outputs(&mut self, outputs: Vec<Output>) -> &mut Self {
        self.outputs = outputs;
        self
    }

    /// Append an output.
    pub fn add_output(&mut self, output: Output) -> &mut Self {
        self.outputs.push(output);
        self
    }

    /// Creation time in Unix seconds.
    pub fn set_time(&mut self, time: u64) -> &mut Self {
        self.time = Some(time);
        self
    }

    /// Expiry time in Unix seconds.
    pub fn set_expires(&mut self, expires: u64) -> &mut Self {
        self.expires = Some(expires);
        self
    }

    /// Human-readable memo.
    pub fn set_memo<S: Into<String>>(&mut self, memo: S) -> &mut Self {
        self.memo = Some(memo.into());
        self
    }

    /// URL the Payment message is posted to.
    pub fn set_payment_url<S: Into<String>>(&mut self, url: S) -> &mut Self {
        self.payment_url = Some(url.into());
        self
    }

    /// Opaque merchant data.
    pub fn set_merchant_data(&mut self, merchant_data: Vec<u8>) -> &mut Self {
        self.merchant_data = Some(merchant_data);
        self
    }

    /// Build the PaymentDetails. `time` and at least one output are required.
    pub fn build_details(&self) -> Result<PaymentDetails> {
        let time = self
            .time
            .ok_or_else(|| Error::validation("Missing `time` for PaymentDetails"))?;
        if self.outputs.is_empty() {
            return Err(Error::validation("Missing `outputs` for PaymentDetails"));
        }

        Ok(PaymentDetails {
            network: self.network.clone(),
            outputs: self.outputs.clone(),
            time: Some(time),
            expires: self.expires,
            memo: self.memo.clone(),
            payment_url: self.payment_url.clone(),
            merchant_data: self.merchant_data.clone(),
        })
    }

    /// Build an unsigned request (PKI type `none`) embedding the details.
    pub fn build_request(&self) -> Result<PaymentRequest> {
        let details = self.build_details()?;
        Ok(PaymentRequest {
            serialized_payment_details: Some(details.to_bytes()),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::PKI_TYPE_NONE;
    use alloc::string::ToString;
    use alloc::vec;

    fn output() -> Output {
        Output::new(500_000, vec![0x76, 0xa9, 0x14, 0x88, 0xac])
    }

    #[test]
    fn test_build_details() {
        let mut builder = RequestBuilder::new();
        builder
            .set_network("test")
            .set_time(1_700_000_000)
            .set_expires(1_700_000_600)
            .set_memo("Payment for 1 shoes")
            .set_payment_url("https://example.com/payment")
            .set_merchant_data(vec![0x30, 0xae])
            .add_output(output());

        let details = builder.build_details().unwrap();
        assert_eq!(details.network(), "test");
        assert_eq!(details.time(), 1_700_000_000);
        assert_eq!(details.expires, Some(1_700_000_600));
        assert_eq!(details.outputs, vec![output()]);
        assert_eq!(details.merchant_data, Some(vec![0x30, 0xae]));
    }

    #[test]
    fn test_missing_time() {
        let mut builder = RequestBuilder::new();
        builder.add_output(output());
        let err = builder.build_details().unwrap_err();
        assert!(err.to_string().contains("Missing `time` for PaymentDetails"));
    }

    #[test]
    fn test_missing_outputs() {
        let mut builder = RequestBuilder::new();
        builder.set_time(1_700_000_000);
        let err = builder.build_request().unwrap_err();
        assert!(err
            .to_string()
            .contains("Missing `outputs` for PaymentDetails"));

        builder.set_outputs(vec![output(), output()]);
        assert_eq!(builder.build_details().unwrap().total_amount(), 1_000_000);
    }

    #[test]
    fn test_build_request_embeds_details() {
        let mut builder = RequestBuilder::new();
        builder.set_time(1_700_000_000).add_output(output());

        let request = builder.build_request().unwrap();
        assert_eq!(request.pki_type(), PKI_TYPE_NONE);
        assert!(request.signature.is_none());
        assert_eq!(
            request.payment_details().unwrap(),
            builder.build_details().unwrap()
        );
        assert_eq!(request.payment_details().unwrap().network(), "main");
    }
}
