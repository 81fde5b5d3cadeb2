// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

/// Which of the user pool's token kinds was presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenUse {
	Access,
	Id,
}

/// Claims carried by user pool access and ID tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CognitoClaims {
	pub sub: String,
	pub iss: String,
	pub exp: u64,
	pub token_use: TokenUse,
	/// Present on access tokens.
	#[serde(default)]
	pub client_id: Option<String>,
	/// Present on ID tokens.
	#[serde(default)]
	pub aud: Option<String>,
	#[serde(default)]
	pub username: Option<String>,
	#[serde(rename = "cognito:username", default)]
	pub cognito_username: Option<String>,
	#[serde(rename = "cognito:groups", default)]
	pub groups: Vec<String>,
}

impl CognitoClaims {
	/// The app client the token was issued to.
	pub fn client(&self) -> Option<&str> {
		match self.token_use {
			TokenUse::Access => self.client_id.as_deref(),
			TokenUse::Id => self.aud.as_deref(),
		}
	}
}

/// A verified caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
	pub subject: String,
	pub username: Option<String>,
	pub groups: Vec<String>,
	pub token_use: TokenUse,
}

impl From<CognitoClaims> for CallerIdentity {
	fn from(claims: CognitoClaims) -> Self {
		Self {
			subject: claims.sub,
			username: claims.username.or(claims.cognito_username),
			groups: claims.groups,
			token_use: claims.token_use,
		}
	}
}
