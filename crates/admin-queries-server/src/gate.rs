// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization gate in front of every admin route.
//!
//! - Missing or unverifiable identity is rejected with 401
//! - A verified caller outside the allowed groups is rejected with 403
//! - Every decision is logged with subject, groups and path (never the token)
//!
//! Admitted requests carry the [`CallerIdentity`] in their extensions.

use std::sync::Arc;
use std::time::Instant;

use admin_queries_auth::{bearer_token, AuthError, CallerIdentity, GroupPolicy, TokenVerifier};
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

use crate::error::AdminApiError;
use crate::timing::stamp;

pub struct AuthorizationGate {
	verifier: Arc<dyn TokenVerifier>,
	policy: GroupPolicy,
}

impl AuthorizationGate {
	pub fn new(verifier: Arc<dyn TokenVerifier>, policy: GroupPolicy) -> Self {
		Self { verifier, policy }
	}

	pub fn policy(&self) -> &GroupPolicy {
		&self.policy
	}

	pub async fn authenticate(&self, headers: &HeaderMap) -> Result<CallerIdentity, AuthError> {
		let token = bearer_token(headers)?;
		self.verifier.verify(token).await
	}
}

pub async fn authorization_gate(
	State(gate): State<Arc<AuthorizationGate>>,
	mut request: Request,
	next: Next,
) -> Response {
	let started = Instant::now();
	let method = request.method().clone();
	let path = request.uri().path().to_string();

	let caller = match gate.authenticate(request.headers()).await {
		Ok(caller) => caller,
		Err(e) => {
			warn!(%method, path = %path, reason = %e, "admin request denied: not authenticated");
			return reject(e, started);
		}
	};

	if let Err(e) = gate.policy.check(&caller) {
		warn!(
			%method,
			path = %path,
			subject = %caller.subject,
			username = ?caller.username,
			groups = ?caller.groups,
			"admin request denied: caller not in an allowed group"
		);
		return reject(e, started);
	}

	info!(
		%method,
		path = %path,
		subject = %caller.subject,
		username = ?caller.username,
		groups = ?caller.groups,
		"admin request admitted"
	);
	request.extensions_mut().insert(caller);
	next.run(request).await
}

fn reject(e: AuthError, started: Instant) -> Response {
	let mut response = AdminApiError::from(e).into_response();
	stamp(&mut response, started);
	response
}
