// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::types::{GroupPage, MemberPage, UserDetail, UserPage, UserPoolId};

/// The closed set of administrative operations.
///
/// Each variant carries the configured user pool plus exactly the fields
/// the operation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryCommand {
	AddUserToGroup {
		user_pool_id: UserPoolId,
		username: String,
		group_name: String,
	},
	RemoveUserFromGroup {
		user_pool_id: UserPoolId,
		username: String,
		group_name: String,
	},
	ConfirmSignUp {
		user_pool_id: UserPoolId,
		username: String,
	},
	DisableUser {
		user_pool_id: UserPoolId,
		username: String,
	},
	EnableUser {
		user_pool_id: UserPoolId,
		username: String,
	},
	GetUser {
		user_pool_id: UserPoolId,
		username: String,
	},
	ListUsers {
		user_pool_id: UserPoolId,
	},
	ListGroups {
		user_pool_id: UserPoolId,
	},
	ListGroupsForUser {
		user_pool_id: UserPoolId,
		username: String,
	},
	ListUsersInGroup {
		user_pool_id: UserPoolId,
		group_name: String,
	},
	GlobalSignOut {
		user_pool_id: UserPoolId,
		username: String,
	},
}

impl DirectoryCommand {
	/// Name of the directory API operation this command maps to.
	pub fn operation(&self) -> &'static str {
		match self {
			Self::AddUserToGroup { .. } => "AdminAddUserToGroup",
			Self::RemoveUserFromGroup { .. } => "AdminRemoveUserFromGroup",
			Self::ConfirmSignUp { .. } => "AdminConfirmSignUp",
			Self::DisableUser { .. } => "AdminDisableUser",
			Self::EnableUser { .. } => "AdminEnableUser",
			Self::GetUser { .. } => "AdminGetUser",
			Self::ListUsers { .. } => "ListUsers",
			Self::ListGroups { .. } => "ListGroups",
			Self::ListGroupsForUser { .. } => "AdminListGroupsForUser",
			Self::ListUsersInGroup { .. } => "ListUsersInGroup",
			Self::GlobalSignOut { .. } => "AdminUserGlobalSignOut",
		}
	}

	pub fn user_pool_id(&self) -> &UserPoolId {
		match self {
			Self::AddUserToGroup { user_pool_id, .. }
			| Self::RemoveUserFromGroup { user_pool_id, .. }
			| Self::ConfirmSignUp { user_pool_id, .. }
			| Self::DisableUser { user_pool_id, .. }
			| Self::EnableUser { user_pool_id, .. }
			| Self::GetUser { user_pool_id, .. }
			| Self::ListUsers { user_pool_id }
			| Self::ListGroups { user_pool_id }
			| Self::ListGroupsForUser { user_pool_id, .. }
			| Self::ListUsersInGroup { user_pool_id, .. }
			| Self::GlobalSignOut { user_pool_id, .. } => user_pool_id,
		}
	}
}

/// What a backend hands back for a command.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryOutput {
	/// The operation succeeded and returns no data.
	Acknowledged,
	User(UserDetail),
	Users(UserPage),
	Groups(GroupPage),
	Members(MemberPage),
}
