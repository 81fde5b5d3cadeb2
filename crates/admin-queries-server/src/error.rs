// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use admin_queries_auth::AuthError;
use admin_queries_directory::DirectoryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::payload::PayloadError;
use crate::validation::ValidationError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

impl ErrorResponse {
	fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			error: error.into(),
			message: message.into(),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum AdminApiError {
	#[error("authentication required")]
	Unauthenticated,

	#[error("insufficient permissions")]
	Forbidden,

	#[error("invalid body: {0}")]
	InvalidBody(String),

	#[error(transparent)]
	Directory(#[from] DirectoryError),

	#[error("internal error: {0}")]
	Internal(String),
}

impl From<AuthError> for AdminApiError {
	fn from(e: AuthError) -> Self {
		if e.is_authentication_failure() {
			AdminApiError::Unauthenticated
		} else {
			AdminApiError::Forbidden
		}
	}
}

impl From<ValidationError> for AdminApiError {
	fn from(e: ValidationError) -> Self {
		AdminApiError::InvalidBody(e.to_string())
	}
}

impl From<PayloadError> for AdminApiError {
	fn from(e: PayloadError) -> Self {
		AdminApiError::InvalidBody(e.to_string())
	}
}

impl IntoResponse for AdminApiError {
	fn into_response(self) -> Response {
		let (status, body) = match &self {
			AdminApiError::Unauthenticated => (
				StatusCode::UNAUTHORIZED,
				ErrorResponse::new("unauthorized", "Authentication required"),
			),
			AdminApiError::Forbidden => (
				StatusCode::FORBIDDEN,
				ErrorResponse::new("forbidden", "Insufficient permissions"),
			),
			AdminApiError::InvalidBody(msg) => (
				StatusCode::BAD_REQUEST,
				ErrorResponse::new("invalid_body", format!("Invalid body: {msg}")),
			),
			AdminApiError::Directory(e) => match e {
				DirectoryError::Service {
					status,
					code,
					message,
					..
				} => (
					status
						.and_then(|s| StatusCode::from_u16(s).ok())
						.unwrap_or(StatusCode::BAD_REQUEST),
					ErrorResponse::new(
						code.as_deref().unwrap_or("UnknownError"),
						message.clone().unwrap_or_else(|| e.to_string()),
					),
				),
				DirectoryError::Transport { .. } => {
					error!(error = %e, "identity directory unreachable");
					(
						StatusCode::BAD_GATEWAY,
						ErrorResponse::new(
							"directory_unavailable",
							"The identity directory could not be reached",
						),
					)
				}
				DirectoryError::UnexpectedOutput { .. } | DirectoryError::InvalidUserPoolId(_) => {
					error!(error = %e, "directory client misbehaved");
					(
						StatusCode::INTERNAL_SERVER_ERROR,
						ErrorResponse::new("internal_error", "Internal server error"),
					)
				}
			},
			AdminApiError::Internal(msg) => {
				error!(error = %msg, "internal error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorResponse::new("internal_error", "Internal server error"),
				)
			}
		};

		(status, Json(body)).into_response()
	}
}
