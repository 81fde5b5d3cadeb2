// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::command::{DirectoryCommand, DirectoryOutput};
use crate::error::{DirectoryError, DirectoryResult};
use crate::types::{GroupPage, MemberPage, UserDetail, UserPage, UserPoolId};

/// Executes directory commands against a concrete directory.
#[async_trait]
pub trait DirectoryBackend: Send + Sync {
	async fn send(&self, command: DirectoryCommand) -> DirectoryResult<DirectoryOutput>;
}

/// Facade over a [`DirectoryBackend`] bound to one user pool.
///
/// Each method issues exactly one backend call.
#[derive(Clone)]
pub struct DirectoryClient {
	backend: Arc<dyn DirectoryBackend>,
	user_pool_id: UserPoolId,
}

impl std::fmt::Debug for DirectoryClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DirectoryClient")
			.field("user_pool_id", &self.user_pool_id)
			.finish_non_exhaustive()
	}
}

impl DirectoryClient {
	pub fn new(backend: Arc<dyn DirectoryBackend>, user_pool_id: UserPoolId) -> Self {
		Self {
			backend,
			user_pool_id,
		}
	}

	pub fn user_pool_id(&self) -> &UserPoolId {
		&self.user_pool_id
	}

	fn pool(&self) -> UserPoolId {
		self.user_pool_id.clone()
	}

	async fn send(&self, command: DirectoryCommand) -> DirectoryResult<DirectoryOutput> {
		let operation = command.operation();
		debug!(operation, "sending directory command");
		self.backend.send(command).await.inspect_err(|e| {
			warn!(operation, error = %e, "directory command failed");
		})
	}

	async fn acknowledge(&self, command: DirectoryCommand) -> DirectoryResult<()> {
		let operation = command.operation();
		match self.send(command).await? {
			DirectoryOutput::Acknowledged => Ok(()),
			_ => Err(DirectoryError::UnexpectedOutput { operation }),
		}
	}

	#[instrument(skip(self))]
	pub async fn add_user_to_group(&self, username: &str, group_name: &str) -> DirectoryResult<()> {
		self.acknowledge(DirectoryCommand::AddUserToGroup {
			user_pool_id: self.pool(),
			username: username.to_string(),
			group_name: group_name.to_string(),
		})
		.await
	}

	#[instrument(skip(self))]
	pub async fn remove_user_from_group(
		&self,
		username: &str,
		group_name: &str,
	) -> DirectoryResult<()> {
		self.acknowledge(DirectoryCommand::RemoveUserFromGroup {
			user_pool_id: self.pool(),
			username: username.to_string(),
			group_name: group_name.to_string(),
		})
		.await
	}

	#[instrument(skip(self))]
	pub async fn confirm_sign_up(&self, username: &str) -> DirectoryResult<()> {
		self.acknowledge(DirectoryCommand::ConfirmSignUp {
			user_pool_id: self.pool(),
			username: username.to_string(),
		})
		.await
	}

	#[instrument(skip(self))]
	pub async fn disable_user(&self, username: &str) -> DirectoryResult<()> {
		self.acknowledge(DirectoryCommand::DisableUser {
			user_pool_id: self.pool(),
			username: username.to_string(),
		})
		.await
	}

	#[instrument(skip(self))]
	pub async fn enable_user(&self, username: &str) -> DirectoryResult<()> {
		self.acknowledge(DirectoryCommand::EnableUser {
			user_pool_id: self.pool(),
			username: username.to_string(),
		})
		.await
	}

	#[instrument(skip(self))]
	pub async fn get_user(&self, username: &str) -> DirectoryResult<UserDetail> {
		let command = DirectoryCommand::GetUser {
			user_pool_id: self.pool(),
			username: username.to_string(),
		};
		let operation = command.operation();
		match self.send(command).await? {
			DirectoryOutput::User(user) => Ok(user),
			_ => Err(DirectoryError::UnexpectedOutput { operation }),
		}
	}

	#[instrument(skip(self))]
	pub async fn list_users(&self) -> DirectoryResult<UserPage> {
		let command = DirectoryCommand::ListUsers {
			user_pool_id: self.pool(),
		};
		let operation = command.operation();
		match self.send(command).await? {
			DirectoryOutput::Users(page) => Ok(page),
			_ => Err(DirectoryError::UnexpectedOutput { operation }),
		}
	}

	#[instrument(skip(self))]
	pub async fn list_groups(&self) -> DirectoryResult<GroupPage> {
		let command = DirectoryCommand::ListGroups {
			user_pool_id: self.pool(),
		};
		let operation = command.operation();
		match self.send(command).await? {
			DirectoryOutput::Groups(page) => Ok(page),
			_ => Err(DirectoryError::UnexpectedOutput { operation }),
		}
	}

	#[instrument(skip(self))]
	pub async fn list_groups_for_user(&self, username: &str) -> DirectoryResult<GroupPage> {
		let command = DirectoryCommand::ListGroupsForUser {
			user_pool_id: self.pool(),
			username: username.to_string(),
		};
		let operation = command.operation();
		match self.send(command).await? {
			DirectoryOutput::Groups(page) => Ok(page),
			_ => Err(DirectoryError::UnexpectedOutput { operation }),
		}
	}

	#[instrument(skip(self))]
	pub async fn list_users_in_group(&self, group_name: &str) -> DirectoryResult<MemberPage> {
		let command = DirectoryCommand::ListUsersInGroup {
			user_pool_id: self.pool(),
			group_name: group_name.to_string(),
		};
		let operation = command.operation();
		match self.send(command).await? {
			DirectoryOutput::Members(page) => Ok(page),
			_ => Err(DirectoryError::UnexpectedOutput { operation }),
		}
	}

	#[instrument(skip(self))]
	pub async fn global_sign_out(&self, username: &str) -> DirectoryResult<()> {
		self.acknowledge(DirectoryCommand::GlobalSignOut {
			user_pool_id: self.pool(),
			username: username.to_string(),
		})
		.await
	}
}
