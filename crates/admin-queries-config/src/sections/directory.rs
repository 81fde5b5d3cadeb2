// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity directory (user pool) configuration.

use admin_queries_directory::UserPoolId;
use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
	pub user_pool_id: UserPoolId,
	/// Region of the directory endpoint; defaults to the pool id's prefix.
	pub region: String,
	pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectoryConfigLayer {
	#[serde(default)]
	pub user_pool_id: Option<String>,
	#[serde(default)]
	pub region: Option<String>,
	#[serde(default)]
	pub endpoint_url: Option<String>,
}

impl DirectoryConfigLayer {
	pub fn merge(&mut self, other: DirectoryConfigLayer) {
		if other.user_pool_id.is_some() {
			self.user_pool_id = other.user_pool_id;
		}
		if other.region.is_some() {
			self.region = other.region;
		}
		if other.endpoint_url.is_some() {
			self.endpoint_url = other.endpoint_url;
		}
	}

	pub fn finalize(self) -> Result<DirectoryConfig, ConfigError> {
		let raw = self.user_pool_id.ok_or(ConfigError::Missing {
			key: "directory.user_pool_id",
			env: "ADMIN_QUERIES_USER_POOL_ID",
		})?;
		let user_pool_id =
			UserPoolId::parse(raw).map_err(|e| ConfigError::InvalidValue {
				key: "directory.user_pool_id".to_string(),
				message: e.to_string(),
			})?;
		let region = self
			.region
			.unwrap_or_else(|| user_pool_id.region().to_string());

		Ok(DirectoryConfig {
			user_pool_id,
			region,
			endpoint_url: self.endpoint_url,
		})
	}
}
