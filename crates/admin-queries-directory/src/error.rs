// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[derive(Debug, Error)]
pub enum DirectoryError {
	/// The directory answered the request with an error of its own.
	#[error("{operation} failed: {}", .code.as_deref().unwrap_or("UnknownError"))]
	Service {
		operation: &'static str,
		status: Option<u16>,
		code: Option<String>,
		message: Option<String>,
	},

	/// No service response was produced (dispatch, credentials, timeout).
	#[error("{operation} could not reach the directory: {message}")]
	Transport {
		operation: &'static str,
		message: String,
	},

	#[error("{operation} returned a result of the wrong kind")]
	UnexpectedOutput { operation: &'static str },

	#[error("invalid user pool id '{0}'")]
	InvalidUserPoolId(String),
}

impl DirectoryError {
	/// HTTP status reported by the directory, if it answered at all.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Service { status, .. } => *status,
			_ => None,
		}
	}

	/// Error code reported by the directory (e.g. `UserNotFoundException`).
	pub fn code(&self) -> Option<&str> {
		match self {
			Self::Service { code, .. } => code.as_deref(),
			_ => None,
		}
	}

	pub fn operation(&self) -> Option<&'static str> {
		match self {
			Self::Service { operation, .. }
			| Self::Transport { operation, .. }
			| Self::UnexpectedOutput { operation } => Some(operation),
			Self::InvalidUserPoolId(_) => None,
		}
	}
}
