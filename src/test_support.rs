// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Shared fixtures for unit tests.
//!
//! [`MockCertificate`] is an in-memory certificate whose "signature" is the
//! issuer key it claims to be signed with. With the ring backend enabled,
//! [`TestPki`] mints a real three-level ECDSA P-256 hierarchy. The recorded
//! fixtures are RSA: a captured merchant request and a self-signed anchor.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use base64ct::{Base64, Encoding};

use crate::certificate::{CertificateView, KeyType, PublicKey};
use crate::crypto_backend::{CryptoBackend, SignatureAlgorithm};
use crate::error::{Error, Result};
use crate::request::{PaymentRequest, ProtocolMessage};
use crate::time::{Time, Validity};
use crate::x509::oids;

/// 2020-01-01T00:00:00Z
pub const NOT_BEFORE: u64 = 1_577_836_800;
/// 2030-01-01T00:00:00Z
pub const NOT_AFTER: u64 = 1_893_456_000;
/// 2023-11-14T22:13:20Z
pub const NOW: u64 = 1_700_000_000;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn reference_time() -> Time {
    Time::from_unix_secs(NOW).unwrap()
}

fn validity(not_before: u64, not_after: u64) -> Validity {
    Validity::new(
        Time::from_unix_secs(not_before).unwrap(),
        Time::from_unix_secs(not_after).unwrap(),
    )
}

// ============================================================================
// Recorded fixtures
// ============================================================================

/// A merchant request captured from a live x509+sha256 deployment.
pub const CAPTURED_REQUEST: &str = "Egt4NTA5K3NoYTI1NhqQCAqFBDCCAgEwggFqAgkAqnj+xtf3r5MwDQYJKoZIhvcNAQELBQAwRTEL\
    MAkGA1UEBhMCQVUxEzARBgNVBAgMClNvbWUtU3RhdGUxITAfBgNVBAoMGEludGVybmV0IFdpZGdp\
    dHMgUHR5IEx0ZDAeFw0xNTA5MjkxMzU2NDBaFw0xNjA5MjgxMzU2NDBaMEUxCzAJBgNVBAYTAkFV\
    MRMwEQYDVQQIDApTb21lLVN0YXRlMSEwHwYDVQQKDBhJbnRlcm5ldCBXaWRnaXRzIFB0eSBMdGQw\
    gZ8wDQYJKoZIhvcNAQEBBQADgY0AMIGJAoGBALKAUiA22Umgy666aJ9Ka1ilvU/JGfCMN/hmGKCR\
    5kfnfOVaSdhm3ZCvnAwbUwS2j3DZ1jofRG3OV9PelRry8bSMb8zADtdGSVovjbTzlqkNzIS2ZwRg\
    lL05gkLPJnNJB/0M/1JNgCKeqA9hw0CMgR5B5ozFmR8OxplFLQDa3S2hAgMBAAEwDQYJKoZIhvcN\
    AQELBQADgYEACwtR35RSKJG8sNYxgfCUwFKxPSxto6FQ9ge59xZ5xPOPLGuS4Otadf0hyKyrRGZG\
    qVe8U8MEzi5Q32C0daB+llTX96winSkxy8T9t28AJLEJGG32qvLZzxkTn0LiwfH0obnCNxcXVlKs\
    ANIVKkZxTcd1g8PG5YuTyHNA6GL2rN4KhQQwggIBMIIBagIJAKp4/sbX96+TMA0GCSqGSIb3DQEB\
    CwUAMEUxCzAJBgNVBAYTAkFVMRMwEQYDVQQIDApTb21lLVN0YXRlMSEwHwYDVQQKDBhJbnRlcm5l\
    dCBXaWRnaXRzIFB0eSBMdGQwHhcNMTUwOTI5MTM1NjQwWhcNMTYwOTI4MTM1NjQwWjBFMQswCQYD\
    VQQGEwJBVTETMBEGA1UECAwKU29tZS1TdGF0ZTEhMB8GA1UECgwYSW50ZXJuZXQgV2lkZ2l0cyBQ\
    dHkgTHRkMIGfMA0GCSqGSIb3DQEBAQUAA4GNADCBiQKBgQCygFIgNtlJoMuuumifSmtYpb1PyRnw\
    jDf4ZhigkeZH53zlWknYZt2Qr5wMG1MEto9w2dY6H0RtzlfT3pUa8vG0jG/MwA7XRklaL42085ap\
    DcyEtmcEYJS9OYJCzyZzSQf9DP9STYAinqgPYcNAjIEeQeaMxZkfDsaZRS0A2t0toQIDAQABMA0G\
    CSqGSIb3DQEBCwUAA4GBAAsLUd+UUiiRvLDWMYHwlMBSsT0sbaOhUPYHufcWecTzjyxrkuDrWnX9\
    Icisq0RmRqlXvFPDBM4uUN9gtHWgfpZU1/esIp0pMcvE/bdvACSxCRht9qry2c8ZE59C4sHx9KG5\
    wjcXF1ZSrADSFSpGcU3HdYPDxuWLk8hzQOhi9qzeInESHwigwh4SGXapFO8TfFPdrk3PBPWmVsQv\
    RRwLmRZXiKwYpayozwUglZCozwUqE1BheW1lbnQgZm9yIDEgc2hvZXMyG2h0dHBzOi8vZXhhbXBs\
    ZS5jb20vcGF5bWVudDoQMK5KeJg07XjtdP8SkWiRMSqAARFwvKAuhNc3DiD6yk/SgD41uej9fflY\
    bWvjRN4dD2xeQ/Z6We/H7gKdKPYzTynTj0osZnUcPq/An1opewevdjpPPYBwoTAa+ClYX3g4eMof\
    JseLT/+60r0nS39xbbxxlUBdSmItqqoBEl853r8yBAfLA0aMGW47v1xeo62DI3lb";

/// Self-signed 2048-bit RSA certificate `CN=BIP70 test case`, valid
/// 2017-10-28 to 2018-10-28, signed with SHA-256.
pub const BIP70_TEST_CASE_CERT: &str = "MIIDCjCCAfKgAwIBAgIJAPfHe1r84gY8MA0GCSqGSIb3DQEBCwUAMBoxGDAWBgNVBAMMD0JJUDcw\
    IHRlc3QgY2FzZTAeFw0xNzEwMjgxOTQ4MDhaFw0xODEwMjgxOTQ4MDhaMBoxGDAWBgNVBAMMD0JJ\
    UDcwIHRlc3QgY2FzZTCCASIwDQYJKoZIhvcNAQEBBQADggEPADCCAQoCggEBAKzsGo3E26GKAI9Y\
    WHxIykJTSdake20WGZBCr94KydV82DERn+20u6dTPN838m1U6dXioWRAu1el3XwybYEyOBI4cZwt\
    eG83LZMSWuH5/85pl5FWsQjzO/wz4fPY2og4B8H0F95BrDCr2W1vaRSMB5Prt2n0MPjvYVDTF7vK\
    OFNCuigGoqRX2bRnuA4wsT6YPK8gCX74SLZRgrohRga9ZREsDEHjon7YoM81deDF5Ajmb/keOx7V\
    0I/7LTHg5r6+EjR/IbFsZT2QlD9IBfpC2Tznizkd+xszZrYIhFmINxmQDLTFOnWPzjy5hu5gX9cX\
    HH3xReDrFLiSQkM5mLLkS00CAwEAAaNTMFEwHQYDVR0OBBYEFHH2DkuFgA1TyDivdN4xGdibx+/p\
    MB8GA1UdIwQYMBaAFHH2DkuFgA1TyDivdN4xGdibx+/pMA8GA1UdEwEB/wQFMAMBAf8wDQYJKoZI\
    hvcNAQELBQADggEBAKM2CkqnOTGtpE78sAB1QrRjrcUY9sj3hylTDbBOBg5IIrNk7HVhy6odgw3/\
    xTnPnka+6YMxZ3S7Uv6lss1NVVvxMChrSZjbaRg91Ci44QnANgqGQ4O+jwXbR+cEVla2miPGlV4o\
    OKEr7tGSGU2j90x2mHpVwZfb6WlqY47qPYKD8sF44mC5kvpnZLSCm2WCsJIUDcUo4qsZ54l7phZF\
    RaSEOHwOeeyQN8q78BZd1Brr+qS3laVrH44dXHLKeh/qzlUnmkgjF1R8AgJhcjM6U4xR+WeY6AQK\
    dt5imHVyeHDay0ZHi+e6rUwkFj9mbbaZwIsT2XXjwmZziZA+LeCLPvY=";

/// [`CAPTURED_REQUEST`], decoded.
pub fn captured_request() -> PaymentRequest {
    PaymentRequest::from_bytes(&Base64::decode_vec(CAPTURED_REQUEST).unwrap()).unwrap()
}

/// DER of [`BIP70_TEST_CASE_CERT`].
pub fn bip70_test_case_der() -> Vec<u8> {
    Base64::decode_vec(BIP70_TEST_CASE_CERT).unwrap()
}

// ============================================================================
// Mock certificates
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MockCertificate {
    pub subject: String,
    pub issuer: String,
    pub serial: Vec<u8>,
    pub key: Vec<u8>,
    pub signer_key: Vec<u8>,
    pub ski: Option<Vec<u8>>,
    pub aki: Option<Vec<u8>>,
    pub malformed_aki: bool,
    pub not_before: u64,
    pub not_after: u64,
}

impl MockCertificate {
    pub fn self_signed(name: &str, key: u8) -> Self {
        Self {
            subject: name.to_string(),
            issuer: name.to_string(),
            serial: vec![key],
            key: vec![key],
            signer_key: vec![key],
            ski: Some(vec![key]),
            aki: None,
            malformed_aki: false,
            not_before: NOT_BEFORE,
            not_after: NOT_AFTER,
        }
    }

    pub fn issued(name: &str, key: u8, issuer: &MockCertificate) -> Self {
        Self {
            issuer: issuer.subject.clone(),
            signer_key: issuer.key.clone(),
            aki: issuer.ski.clone(),
            ..Self::self_signed(name, key)
        }
    }

    pub fn without_key_ids(mut self) -> Self {
        self.ski = None;
        self.aki = None;
        self
    }

    pub fn with_validity(mut self, not_before: u64, not_after: u64) -> Self {
        self.not_before = not_before;
        self.not_after = not_after;
        self
    }
}

impl CertificateView for MockCertificate {
    fn subject_name(&self) -> String {
        self.subject.clone()
    }

    fn issuer_name(&self) -> String {
        self.issuer.clone()
    }

    fn serial_number(&self) -> &[u8] {
        &self.serial
    }

    fn public_key(&self) -> Result<PublicKey> {
        Ok(PublicKey {
            key_type: KeyType::Ecdsa,
            parameters: Some(oids::ECDSA_P256),
            key: self.key.clone(),
        })
    }

    fn validity(&self) -> Validity {
        validity(self.not_before, self.not_after)
    }

    fn subject_key_id(&self) -> Option<Vec<u8>> {
        self.ski.clone()
    }

    fn authority_key_id(&self) -> Result<Option<Vec<u8>>> {
        if self.malformed_aki {
            return Err(Error::invalid_der("malformed authority key identifier"));
        }
        Ok(self.aki.clone())
    }

    fn verify_issued_by(
        &self,
        issuer_key: &PublicKey,
        _backend: &dyn CryptoBackend,
    ) -> Result<()> {
        if issuer_key.key == self.signer_key {
            Ok(())
        } else {
            Err(Error::signature_failed())
        }
    }

    fn sort_key(&self) -> Result<Vec<u8>> {
        Ok([self.serial.as_slice(), self.key.as_slice()].concat())
    }
}

/// Accepts a signature exactly when it equals the public key.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockBackend;

impl CryptoBackend for MockBackend {
    fn verify_signature(
        &self,
        _algorithm: SignatureAlgorithm,
        _tbs_data: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<()> {
        if signature == public_key {
            Ok(())
        } else {
            Err(Error::signature_failed())
        }
    }
}

// ============================================================================
// Minted certificates
// ============================================================================

#[cfg(feature = "ring-backend")]
pub use minted::{TestKey, TestPki};

#[cfg(feature = "ring-backend")]
mod minted {
    use super::*;

    use core::time::Duration;
    use der::asn1::{BitString, UtcTime};
    use der::{Any, Encode, Tag};
    use ecdsa::signature::hazmat::PrehashSigner;
    use ecdsa::signature::Signer;
    use p256::ecdsa::{Signature, SigningKey};
    use p256::elliptic_curve::sec1::ToEncodedPoint;
    use ring::rand::{SecureRandom, SystemRandom};
    use sha1::{Digest, Sha1};
    use spki::AlgorithmIdentifier;

    use crate::certificate::name::{Name, CN};
    use crate::certificate::{
        Certificate, Extension, Extensions, SubjectPublicKeyInfo, TBSCertificate,
    };
    use crate::request::{Output, RequestBuilder, X509Certificates};
    use crate::x509::extensions::{AuthorityKeyIdentifier, SubjectKeyIdentifier};

    /// ECDSA P-256 signing key, seeded from ring's system RNG.
    pub struct TestKey {
        signing: SigningKey,
        public: Vec<u8>,
    }

    impl TestKey {
        pub fn generate() -> Self {
            let rng = SystemRandom::new();
            loop {
                let mut seed = [0u8; 32];
                rng.fill(&mut seed).unwrap();
                if let Ok(signing) = SigningKey::from_slice(&seed) {
                    let public = signing
                        .verifying_key()
                        .as_affine()
                        .to_encoded_point(false)
                        .as_bytes()
                        .to_vec();
                    return Self { signing, public };
                }
            }
        }

        /// Uncompressed SEC1 point.
        pub fn public_key(&self) -> &[u8] {
            &self.public
        }

        /// DER ECDSA signature over SHA-256.
        pub fn sign(&self, message: &[u8]) -> Vec<u8> {
            let signature: Signature = self.signing.sign(message);
            signature.to_der().as_bytes().to_vec()
        }

        /// DER ECDSA signature over SHA-1.
        pub fn sign_sha1(&self, message: &[u8]) -> Vec<u8> {
            let mut prehash = [0u8; 32];
            prehash[12..].copy_from_slice(&Sha1::digest(message));
            let signature: Signature = self.signing.sign_prehash(&prehash).unwrap();
            signature.to_der().as_bytes().to_vec()
        }

        /// SHA-1 of the public key, as used for key identifiers.
        pub fn key_id(&self) -> Vec<u8> {
            Sha1::digest(self.public_key()).to_vec()
        }

        fn spki(&self) -> SubjectPublicKeyInfo {
            SubjectPublicKeyInfo {
                algorithm: AlgorithmIdentifier {
                    oid: oids::ECPUBLICKEY,
                    parameters: Some(
                        Any::new(Tag::ObjectIdentifier, oids::ECDSA_P256.as_bytes()).unwrap(),
                    ),
                },
                subject_public_key: BitString::from_bytes(self.public_key()).unwrap(),
            }
        }
    }

    fn utc(secs: u64) -> Time {
        Time::UtcTime(UtcTime::from_unix_duration(Duration::from_secs(secs)).unwrap())
    }

    fn name(common_name: &str) -> Name {
        Name::from_utf8_attributes(&[(CN, common_name)]).unwrap()
    }

    #[allow(clippy::too_many_arguments)]
    fn mint(
        serial: u8,
        subject: &str,
        subject_key: &TestKey,
        issuer: &str,
        issuer_key: &TestKey,
        with_aki: bool,
        not_before: u64,
        not_after: u64,
    ) -> Certificate {
        let signature_algorithm = AlgorithmIdentifier {
            oid: oids::ECDSA_WITH_SHA256,
            parameters: None,
        };

        let ski = SubjectKeyIdentifier(subject_key.key_id());
        let mut extensions = Extensions::from_vec(vec![Extension::new(
            oids::SUBJECT_KEY_IDENTIFIER,
            false,
            ski.to_extension_value().unwrap(),
        )
        .unwrap()]);
        if with_aki {
            let aki = AuthorityKeyIdentifier::from_key_identifier(issuer_key.key_id());
            extensions.push(
                Extension::new(oids::AUTHORITY_KEY_IDENTIFIER, false, aki.to_der().unwrap())
                    .unwrap(),
            );
        }

        let tbs = TBSCertificate::new(
            vec![serial],
            signature_algorithm.clone(),
            name(issuer),
            Validity::new(utc(not_before), utc(not_after)),
            name(subject),
            subject_key.spki(),
        )
        .with_extensions(extensions);

        let signature = issuer_key.sign(&tbs.to_der().unwrap());
        Certificate::new(
            tbs,
            signature_algorithm,
            BitString::from_bytes(&signature).unwrap(),
        )
    }

    /// Root, intermediate and entity certificates with their keys.
    pub struct TestPki {
        pub root_key: TestKey,
        pub intermediate_key: TestKey,
        pub entity_key: TestKey,
        pub root: Certificate,
        pub intermediate: Certificate,
        pub entity: Certificate,
    }

    impl TestPki {
        pub fn new() -> Self {
            Self::with_entity_validity(NOT_BEFORE, NOT_AFTER)
        }

        pub fn with_entity_validity(not_before: u64, not_after: u64) -> Self {
            let root_key = TestKey::generate();
            let intermediate_key = TestKey::generate();
            let entity_key = TestKey::generate();

            let root = mint(
                1,
                "Test Root CA",
                &root_key,
                "Test Root CA",
                &root_key,
                false,
                NOT_BEFORE,
                NOT_AFTER,
            );
            let intermediate = mint(
                2,
                "Test Intermediate CA",
                &intermediate_key,
                "Test Root CA",
                &root_key,
                true,
                NOT_BEFORE,
                NOT_AFTER,
            );
            let entity = mint(
                3,
                "Test Entity",
                &entity_key,
                "Test Intermediate CA",
                &intermediate_key,
                true,
                not_before,
                not_after,
            );

            Self {
                root_key,
                intermediate_key,
                entity_key,
                root,
                intermediate,
                entity,
            }
        }

        /// DER bundle as shipped in `pki_data`: entity first.
        pub fn bundle(&self) -> X509Certificates {
            X509Certificates {
                certificates: vec![
                    self.entity.to_der().unwrap(),
                    self.intermediate.to_der().unwrap(),
                ],
            }
        }

        /// A request carrying the bundle, signed by the entity key with the
        /// digest `pki_type` names.
        pub fn signed_request(&self, pki_type: &str) -> PaymentRequest {
            let mut builder = RequestBuilder::new();
            builder
                .set_time(NOW)
                .set_memo("Payment for 1 shoes")
                .add_output(Output::new(
                    500_000,
                    vec![0x76, 0xa9, 0x14, 0x00, 0x88, 0xac],
                ));

            let mut request = builder.build_request().unwrap();
            request.pki_type = Some(pki_type.to_string());
            request.pki_data = Some(self.bundle().to_bytes());
            request.signature = Some(self.sign_request(&request, pki_type));
            request
        }

        pub fn sign_request(&self, request: &PaymentRequest, pki_type: &str) -> Vec<u8> {
            let payload = request.signing_bytes();
            if pki_type == crate::request::PKI_TYPE_X509_SHA1 {
                self.entity_key.sign_sha1(&payload)
            } else {
                self.entity_key.sign(&payload)
            }
        }
    }
}
