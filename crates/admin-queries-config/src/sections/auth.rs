// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization configuration.

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct AuthConfig {
	/// Groups whose members may use the admin API. Never empty.
	pub allowed_groups: Vec<String>,
	/// App clients whose tokens are accepted. Empty accepts any client.
	pub client_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfigLayer {
	#[serde(default)]
	pub allowed_groups: Option<Vec<String>>,
	#[serde(default)]
	pub client_ids: Option<Vec<String>>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: AuthConfigLayer) {
		if other.allowed_groups.is_some() {
			self.allowed_groups = other.allowed_groups;
		}
		if other.client_ids.is_some() {
			self.client_ids = other.client_ids;
		}
	}

	pub fn finalize(self) -> Result<AuthConfig, ConfigError> {
		let allowed_groups = self.allowed_groups.ok_or(ConfigError::Missing {
			key: "auth.allowed_groups",
			env: "ADMIN_QUERIES_ALLOWED_GROUPS",
		})?;

		Ok(AuthConfig {
			allowed_groups,
			client_ids: self.client_ids.unwrap_or_default(),
		})
	}
}
