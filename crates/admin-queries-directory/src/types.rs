// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Directory identifiers and the result shapes returned by read operations.
//!
//! Result types serialize with the directory service's own field names
//! (`Users`, `Username`, `PaginationToken`, ...) so API callers see the same
//! document the service returned.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, DirectoryResult};

/// Identifier of a user pool, e.g. `us-east-1_AbCdEf123`.
///
/// Only ever built from trusted configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserPoolId(String);

impl UserPoolId {
	pub fn parse(value: impl Into<String>) -> DirectoryResult<Self> {
		let value = value.into();
		let trimmed = value.trim();
		match trimmed.split_once('_') {
			Some((region, id)) if is_region(region) && is_pool_suffix(id) => Ok(Self(trimmed.to_string())),
			_ => Err(DirectoryError::InvalidUserPoolId(value)),
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// The region prefix of the pool id.
	pub fn region(&self) -> &str {
		self.0.split_once('_').map(|(region, _)| region).unwrap_or_default()
	}
}

impl fmt::Display for UserPoolId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

fn is_region(s: &str) -> bool {
	!s.is_empty()
		&& s.chars()
			.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn is_pool_suffix(s: &str) -> bool {
	!s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserAttribute {
	pub name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
}

/// A user as it appears in list results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DirectoryUser {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	#[serde(default)]
	pub attributes: Vec<UserAttribute>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_create_date: Option<DateTime<Utc>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_last_modified_date: Option<DateTime<Utc>>,
	pub enabled: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_status: Option<String>,
}

/// A single user, as returned by a get-user lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserDetail {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	#[serde(default)]
	pub user_attributes: Vec<UserAttribute>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_create_date: Option<DateTime<Utc>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_last_modified_date: Option<DateTime<Utc>>,
	pub enabled: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_status: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub preferred_mfa_setting: Option<String>,
	#[serde(rename = "UserMFASettingList", default, skip_serializing_if = "Vec::is_empty")]
	pub user_mfa_setting_list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DirectoryGroup {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub group_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_pool_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub role_arn: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub precedence: Option<i32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_modified_date: Option<DateTime<Utc>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub creation_date: Option<DateTime<Utc>>,
}

/// One page of a user listing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserPage {
	pub users: Vec<DirectoryUser>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pagination_token: Option<String>,
}

/// One page of a group listing (all groups, or the groups of one user).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupPage {
	pub groups: Vec<DirectoryGroup>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub next_token: Option<String>,
}

/// One page of the members of a group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MemberPage {
	pub users: Vec<DirectoryUser>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub next_token: Option<String>,
}
