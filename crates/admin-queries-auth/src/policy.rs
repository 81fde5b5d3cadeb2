// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::error::AuthError;
use crate::identity::CallerIdentity;

/// Admits callers belonging to at least one allowed group.
///
/// Group names compare exactly and case-sensitively.
#[derive(Debug, Clone)]
pub struct GroupPolicy {
	allowed: Vec<String>,
}

impl GroupPolicy {
	pub fn new(allowed: impl IntoIterator<Item = impl Into<String>>) -> Self {
		Self {
			allowed: allowed.into_iter().map(Into::into).collect(),
		}
	}

	pub fn allowed_groups(&self) -> &[String] {
		&self.allowed
	}

	pub fn admits<S: AsRef<str>>(&self, groups: &[S]) -> bool {
		groups
			.iter()
			.any(|g| self.allowed.iter().any(|a| a == g.as_ref()))
	}

	pub fn check(&self, caller: &CallerIdentity) -> Result<(), AuthError> {
		if self.admits(caller.groups.as_slice()) {
			Ok(())
		} else {
			Err(AuthError::NotAMember)
		}
	}
}
