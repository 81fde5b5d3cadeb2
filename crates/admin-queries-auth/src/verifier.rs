// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::HeaderMap;

use crate::error::AuthError;
use crate::identity::CallerIdentity;

/// Turns a bearer token into a verified caller.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
	async fn verify(&self, token: &str) -> Result<CallerIdentity, AuthError>;
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
	let value = headers
		.get(AUTHORIZATION)
		.ok_or(AuthError::MissingCredentials)?
		.to_str()
		.map_err(|_| AuthError::MalformedHeader)?;

	let (scheme, token) = value.split_once(' ').ok_or(AuthError::MalformedHeader)?;
	if !scheme.eq_ignore_ascii_case("bearer") {
		return Err(AuthError::MalformedHeader);
	}

	let token = token.trim();
	if token.is_empty() {
		return Err(AuthError::MissingCredentials);
	}
	Ok(token)
}
