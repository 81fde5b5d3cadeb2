// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Amazon Cognito user pool backend.

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_cognitoidentityprovider::config::http::HttpResponse;
use aws_sdk_cognitoidentityprovider::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cognitoidentityprovider::primitives::DateTime as SdkDateTime;
use aws_sdk_cognitoidentityprovider::types::{AttributeType, GroupType, UserType};
use aws_sdk_cognitoidentityprovider::Client;
use chrono::{DateTime, TimeZone, Utc};
use tracing::info;

use crate::client::DirectoryBackend;
use crate::command::{DirectoryCommand, DirectoryOutput};
use crate::error::{DirectoryError, DirectoryResult};
use crate::types::{
	DirectoryGroup, DirectoryUser, GroupPage, MemberPage, UserAttribute, UserDetail, UserPage,
	UserPoolId,
};

#[derive(Debug, Clone, Default)]
pub struct CognitoSettings {
	/// Overrides the region derived from the user pool id.
	pub region: Option<String>,
	/// Alternate endpoint, e.g. a local emulator.
	pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CognitoBackend {
	client: Client,
}

impl CognitoBackend {
	/// Builds a backend from the default credential chain.
	///
	/// SDK retries are disabled: one command is one request.
	pub async fn connect(user_pool_id: &UserPoolId, settings: &CognitoSettings) -> Self {
		let region = settings
			.region
			.clone()
			.unwrap_or_else(|| user_pool_id.region().to_string());

		let mut loader = aws_config::defaults(BehaviorVersion::latest())
			.region(Region::new(region.clone()))
			.retry_config(RetryConfig::disabled());
		if let Some(endpoint_url) = &settings.endpoint_url {
			loader = loader.endpoint_url(endpoint_url);
		}
		let sdk_config = loader.load().await;

		info!(
			region = %region,
			user_pool_id = %user_pool_id,
			custom_endpoint = settings.endpoint_url.is_some(),
			"Cognito directory backend initialized"
		);

		Self {
			client: Client::new(&sdk_config),
		}
	}

	pub fn from_client(client: Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl DirectoryBackend for CognitoBackend {
	async fn send(&self, command: DirectoryCommand) -> DirectoryResult<DirectoryOutput> {
		let operation = command.operation();
		let pool = command.user_pool_id().as_str().to_string();

		match command {
			DirectoryCommand::AddUserToGroup {
				username,
				group_name,
				..
			} => {
				self.client
					.admin_add_user_to_group()
					.user_pool_id(pool)
					.username(username)
					.group_name(group_name)
					.send()
					.await
					.map_err(|e| sdk_error(operation, e))?;
				Ok(DirectoryOutput::Acknowledged)
			}
			DirectoryCommand::RemoveUserFromGroup {
				username,
				group_name,
				..
			} => {
				self.client
					.admin_remove_user_from_group()
					.user_pool_id(pool)
					.username(username)
					.group_name(group_name)
					.send()
					.await
					.map_err(|e| sdk_error(operation, e))?;
				Ok(DirectoryOutput::Acknowledged)
			}
			DirectoryCommand::ConfirmSignUp { username, .. } => {
				self.client
					.admin_confirm_sign_up()
					.user_pool_id(pool)
					.username(username)
					.send()
					.await
					.map_err(|e| sdk_error(operation, e))?;
				Ok(DirectoryOutput::Acknowledged)
			}
			DirectoryCommand::DisableUser { username, .. } => {
				self.client
					.admin_disable_user()
					.user_pool_id(pool)
					.username(username)
					.send()
					.await
					.map_err(|e| sdk_error(operation, e))?;
				Ok(DirectoryOutput::Acknowledged)
			}
			DirectoryCommand::EnableUser { username, .. } => {
				self.client
					.admin_enable_user()
					.user_pool_id(pool)
					.username(username)
					.send()
					.await
					.map_err(|e| sdk_error(operation, e))?;
				Ok(DirectoryOutput::Acknowledged)
			}
			DirectoryCommand::GetUser { username, .. } => {
				let out = self
					.client
					.admin_get_user()
					.user_pool_id(pool)
					.username(username)
					.send()
					.await
					.map_err(|e| sdk_error(operation, e))?;
				Ok(DirectoryOutput::User(UserDetail {
					username: text(out.username()),
					user_attributes: items(out.user_attributes()).iter().map(attribute).collect(),
					user_create_date: timestamp(out.user_create_date()),
					user_last_modified_date: timestamp(out.user_last_modified_date()),
					enabled: flag(out.enabled()),
					user_status: out.user_status().map(|s| s.as_str().to_string()),
					preferred_mfa_setting: text(out.preferred_mfa_setting()),
					user_mfa_setting_list: items(out.user_mfa_setting_list()).to_vec(),
				}))
			}
			DirectoryCommand::ListUsers { .. } => {
				let out = self
					.client
					.list_users()
					.user_pool_id(pool)
					.send()
					.await
					.map_err(|e| sdk_error(operation, e))?;
				Ok(DirectoryOutput::Users(UserPage {
					users: items(out.users()).iter().map(user).collect(),
					pagination_token: text(out.pagination_token()),
				}))
			}
			DirectoryCommand::ListGroups { .. } => {
				let out = self
					.client
					.list_groups()
					.user_pool_id(pool)
					.send()
					.await
					.map_err(|e| sdk_error(operation, e))?;
				Ok(DirectoryOutput::Groups(GroupPage {
					groups: items(out.groups()).iter().map(group).collect(),
					next_token: text(out.next_token()),
				}))
			}
			DirectoryCommand::ListGroupsForUser { username, .. } => {
				let out = self
					.client
					.admin_list_groups_for_user()
					.user_pool_id(pool)
					.username(username)
					.send()
					.await
					.map_err(|e| sdk_error(operation, e))?;
				Ok(DirectoryOutput::Groups(GroupPage {
					groups: items(out.groups()).iter().map(group).collect(),
					next_token: text(out.next_token()),
				}))
			}
			DirectoryCommand::ListUsersInGroup { group_name, .. } => {
				let out = self
					.client
					.list_users_in_group()
					.user_pool_id(pool)
					.group_name(group_name)
					.send()
					.await
					.map_err(|e| sdk_error(operation, e))?;
				Ok(DirectoryOutput::Members(MemberPage {
					users: items(out.users()).iter().map(user).collect(),
					next_token: text(out.next_token()),
				}))
			}
			DirectoryCommand::GlobalSignOut { username, .. } => {
				self.client
					.admin_user_global_sign_out()
					.user_pool_id(pool)
					.username(username)
					.send()
					.await
					.map_err(|e| sdk_error(operation, e))?;
				Ok(DirectoryOutput::Acknowledged)
			}
		}
	}
}

fn sdk_error<E>(operation: &'static str, err: SdkError<E, HttpResponse>) -> DirectoryError
where
	E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
	match &err {
		SdkError::ServiceError(context) => DirectoryError::Service {
			operation,
			status: Some(context.raw().status().as_u16()),
			code: context.err().code().map(str::to_string),
			message: context.err().message().map(str::to_string),
		},
		_ => DirectoryError::Transport {
			operation,
			message: DisplayErrorContext(&err).to_string(),
		},
	}
}

// The SDK models some fields as required and others as optional; these
// helpers accept either form.

fn text<'a>(value: impl Into<Option<&'a str>>) -> Option<String> {
	value.into().map(str::to_string)
}

fn flag(value: impl Into<Option<bool>>) -> bool {
	value.into().unwrap_or(false)
}

fn items<'a, T: 'a>(value: impl Into<Option<&'a [T]>>) -> &'a [T] {
	value.into().unwrap_or_default()
}

fn timestamp(value: Option<&SdkDateTime>) -> Option<DateTime<Utc>> {
	value.and_then(|t| Utc.timestamp_opt(t.secs(), t.subsec_nanos()).single())
}

fn attribute(a: &AttributeType) -> UserAttribute {
	UserAttribute {
		name: text(a.name()).unwrap_or_default(),
		value: text(a.value()),
	}
}

fn user(u: &UserType) -> DirectoryUser {
	DirectoryUser {
		username: text(u.username()),
		attributes: items(u.attributes()).iter().map(attribute).collect(),
		user_create_date: timestamp(u.user_create_date()),
		user_last_modified_date: timestamp(u.user_last_modified_date()),
		enabled: flag(u.enabled()),
		user_status: u.user_status().map(|s| s.as_str().to_string()),
	}
}

fn group(g: &GroupType) -> DirectoryGroup {
	DirectoryGroup {
		group_name: text(g.group_name()),
		user_pool_id: text(g.user_pool_id()),
		description: text(g.description()),
		role_arn: text(g.role_arn()),
		precedence: g.precedence(),
		last_modified_date: timestamp(g.last_modified_date()),
		creation_date: timestamp(g.creation_date()),
	}
}
