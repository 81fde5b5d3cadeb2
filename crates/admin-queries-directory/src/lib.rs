// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed access to the identity directory's administrative operations.
//!
//! This crate provides:
//! - [`DirectoryCommand`]: the closed set of operations the admin API may issue
//! - [`DirectoryBackend`]: the seam a concrete directory (or a test double) implements
//! - [`DirectoryClient`]: a facade with one method per command that injects the
//!   configured [`UserPoolId`] into every call
//! - [`CognitoBackend`]: the Amazon Cognito implementation
//!
//! Every facade call is a single live request. There is no retry and no caching.

pub mod client;
pub mod cognito;
pub mod command;
pub mod error;
pub mod types;

pub use client::{DirectoryBackend, DirectoryClient};
pub use cognito::{CognitoBackend, CognitoSettings};
pub use command::{DirectoryCommand, DirectoryOutput};
pub use error::{DirectoryError, DirectoryResult};
pub use types::{
	DirectoryGroup, DirectoryUser, GroupPage, MemberPage, UserAttribute, UserDetail, UserPage,
	UserPoolId,
};
