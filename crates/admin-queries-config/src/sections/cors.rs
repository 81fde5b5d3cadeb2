// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cross-origin request policy.

use serde::Deserialize;

const DEFAULT_MAX_AGE_SECS: u64 = 600;

#[derive(Debug, Clone)]
pub struct CorsConfig {
	/// Allowed origins; `*` allows any.
	pub allowed_origins: Vec<String>,
	pub max_age_secs: u64,
}

impl CorsConfig {
	pub fn allows_any_origin(&self) -> bool {
		self.allowed_origins.iter().any(|o| o == "*")
	}
}

impl Default for CorsConfig {
	fn default() -> Self {
		Self {
			allowed_origins: vec!["*".to_string()],
			max_age_secs: DEFAULT_MAX_AGE_SECS,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfigLayer {
	#[serde(default)]
	pub allowed_origins: Option<Vec<String>>,
	#[serde(default)]
	pub max_age_secs: Option<u64>,
}

impl CorsConfigLayer {
	pub fn merge(&mut self, other: CorsConfigLayer) {
		if other.allowed_origins.is_some() {
			self.allowed_origins = other.allowed_origins;
		}
		if other.max_age_secs.is_some() {
			self.max_age_secs = other.max_age_secs;
		}
	}

	pub fn finalize(self) -> CorsConfig {
		CorsConfig {
			allowed_origins: self
				.allowed_origins
				.filter(|o| !o.is_empty())
				.unwrap_or_else(|| vec!["*".to_string()]),
			max_age_secs: self.max_age_secs.unwrap_or(DEFAULT_MAX_AGE_SECS),
		}
	}
}
