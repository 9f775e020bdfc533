// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 identifiers and the key identifier extensions used for path building.

pub mod extensions;
pub mod oids;

pub use extensions::{AuthorityKeyIdentifier, SubjectKeyIdentifier};
