// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
	#[error("missing credentials")]
	MissingCredentials,

	#[error("malformed authorization header")]
	MalformedHeader,

	#[error("invalid token: {0}")]
	InvalidToken(String),

	#[error("no signing key matches kid '{0}'")]
	UnknownSigningKey(String),

	#[error("failed to fetch signing keys: {0}")]
	KeyFetch(String),

	#[error("caller is not a member of an allowed group")]
	NotAMember,
}

impl AuthError {
	/// True when the caller's identity could not be established, as opposed
	/// to an established identity lacking permission.
	pub fn is_authentication_failure(&self) -> bool {
		!matches!(self, Self::NotAMember)
	}
}
