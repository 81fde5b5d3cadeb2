// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Caller authentication and group authorization for the admin API.
//!
//! A request is admitted when its bearer token verifies against the user
//! pool and the token's `cognito:groups` claim names at least one of the
//! configured allowed groups.

pub mod cognito;
pub mod error;
pub mod identity;
pub mod policy;
pub mod verifier;

pub use cognito::{CognitoVerifier, VerifierSettings};
pub use error::AuthError;
pub use identity::{CallerIdentity, CognitoClaims, TokenUse};
pub use policy::GroupPolicy;
pub use verifier::{bearer_token, TokenVerifier};
