// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::{Arc, Mutex};

use admin_queries_auth::{AuthError, CallerIdentity, GroupPolicy, TokenUse, TokenVerifier};
use admin_queries_config::CorsConfig;
use admin_queries_directory::{
	DirectoryBackend, DirectoryClient, DirectoryCommand, DirectoryError, DirectoryOutput,
	DirectoryResult, GroupPage, MemberPage, UserDetail, UserPage, UserPoolId,
};
use admin_queries_server::{create_app, AdminRoute, AppState, AuthorizationGate};
use async_trait::async_trait;
use axum::{
	body::Body,
	http::{header, Method, Request, StatusCode},
	response::Response,
	Router,
};
use tower::ServiceExt;

pub const POOL: &str = "us-east-1_TestPool";

/// What the recording backend answers with.
pub enum Canned {
	/// A plausible success for whichever command arrives.
	Success,
	Output(DirectoryOutput),
	ServiceError {
		status: u16,
		code: &'static str,
		message: &'static str,
	},
	Unreachable,
}

pub struct RecordingBackend {
	calls: Mutex<Vec<DirectoryCommand>>,
	canned: Canned,
}

impl RecordingBackend {
	pub fn new(canned: Canned) -> Arc<Self> {
		Arc::new(Self {
			calls: Mutex::new(Vec::new()),
			canned,
		})
	}

	pub fn calls(&self) -> Vec<DirectoryCommand> {
		self.calls.lock().unwrap().clone()
	}

	pub fn call_count(&self) -> usize {
		self.calls.lock().unwrap().len()
	}
}

fn success_for(command: &DirectoryCommand) -> DirectoryOutput {
	match command {
		DirectoryCommand::GetUser { username, .. } => DirectoryOutput::User(UserDetail {
			username: Some(username.clone()),
			user_attributes: vec![],
			user_create_date: None,
			user_last_modified_date: None,
			enabled: true,
			user_status: Some("CONFIRMED".to_string()),
			preferred_mfa_setting: None,
			user_mfa_setting_list: vec![],
		}),
		DirectoryCommand::ListUsers { .. } => DirectoryOutput::Users(UserPage::default()),
		DirectoryCommand::ListGroups { .. } | DirectoryCommand::ListGroupsForUser { .. } => {
			DirectoryOutput::Groups(GroupPage::default())
		}
		DirectoryCommand::ListUsersInGroup { .. } => DirectoryOutput::Members(MemberPage::default()),
		_ => DirectoryOutput::Acknowledged,
	}
}

#[async_trait]
impl DirectoryBackend for RecordingBackend {
	async fn send(&self, command: DirectoryCommand) -> DirectoryResult<DirectoryOutput> {
		let operation = command.operation();
		let result = match &self.canned {
			Canned::Success => Ok(success_for(&command)),
			Canned::Output(output) => Ok(output.clone()),
			Canned::ServiceError {
				status,
				code,
				message,
			} => Err(DirectoryError::Service {
				operation,
				status: Some(*status),
				code: Some(code.to_string()),
				message: Some(message.to_string()),
			}),
			Canned::Unreachable => Err(DirectoryError::Transport {
				operation,
				message: "connection refused".to_string(),
			}),
		};
		self.calls.lock().unwrap().push(command);
		result
	}
}

/// Accepts two fixed tokens: one for an administrator, one for an ordinary user.
pub struct StaticVerifier;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const USER_TOKEN: &str = "user-token";

#[async_trait]
impl TokenVerifier for StaticVerifier {
	async fn verify(&self, token: &str) -> Result<CallerIdentity, AuthError> {
		match token {
			ADMIN_TOKEN => Ok(CallerIdentity {
				subject: "admin-sub".to_string(),
				username: Some("root".to_string()),
				groups: vec!["USERS".to_string(), "ADMINS".to_string()],
				token_use: TokenUse::Access,
			}),
			USER_TOKEN => Ok(CallerIdentity {
				subject: "user-sub".to_string(),
				username: Some("joe".to_string()),
				groups: vec!["USERS".to_string(), "admins".to_string()],
				token_use: TokenUse::Id,
			}),
			_ => Err(AuthError::InvalidToken("signature mismatch".to_string())),
		}
	}
}

#[derive(Debug, Clone, Copy)]
pub enum Caller {
	Anonymous,
	NonAdmin,
	Admin,
	Forged,
}

impl Caller {
	fn token(self) -> Option<&'static str> {
		match self {
			Caller::Anonymous => None,
			Caller::NonAdmin => Some(USER_TOKEN),
			Caller::Admin => Some(ADMIN_TOKEN),
			Caller::Forged => Some("eyJhbGciOiJub25lIn0.e30."),
		}
	}
}

pub fn pool() -> UserPoolId {
	UserPoolId::parse(POOL).unwrap()
}

pub struct TestApp {
	pub router: Router,
	pub backend: Arc<RecordingBackend>,
}

impl TestApp {
	pub fn new() -> Self {
		Self::with_canned(Canned::Success)
	}

	pub fn with_canned(canned: Canned) -> Self {
		let backend = RecordingBackend::new(canned);
		let directory = DirectoryClient::new(backend.clone(), pool());
		let gate = Arc::new(AuthorizationGate::new(
			Arc::new(StaticVerifier),
			GroupPolicy::new(["ADMINS"]),
		));
		let router = create_app(AppState::new(directory), gate, &CorsConfig::default());
		Self { router, backend }
	}

	pub async fn send(&self, request: Request<Body>) -> Response {
		self.router.clone().oneshot(request).await.unwrap()
	}

	pub async fn get(&self, path: &str, caller: Caller, fields: &[(&str, &str)]) -> Response {
		let uri = if fields.is_empty() {
			path.to_string()
		} else {
			format!("{path}?{}", encode(fields))
		};
		self.send(builder(Method::GET, &uri, caller).body(Body::empty()).unwrap())
			.await
	}

	pub async fn post_form(&self, path: &str, caller: Caller, fields: &[(&str, &str)]) -> Response {
		let request = builder(Method::POST, path, caller)
			.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
			.body(Body::from(encode(fields)))
			.unwrap();
		self.send(request).await
	}

	pub async fn post_multipart(&self, path: &str, caller: Caller, body: String) -> Response {
		let request = builder(Method::POST, path, caller)
			.header(header::CONTENT_TYPE, "multipart/form-data; boundary=BOUNDARY")
			.body(Body::from(body))
			.unwrap();
		self.send(request).await
	}

	/// Calls a route with its method and the given fields.
	pub async fn call(&self, route: AdminRoute, caller: Caller, fields: &[(&str, &str)]) -> Response {
		if route.method() == Method::GET {
			self.get(route.path(), caller, fields).await
		} else {
			self.post_form(route.path(), caller, fields).await
		}
	}
}

fn builder(method: Method, uri: &str, caller: Caller) -> axum::http::request::Builder {
	let mut builder = Request::builder().method(method).uri(uri);
	if let Some(token) = caller.token() {
		builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
	}
	builder
}

fn encode(fields: &[(&str, &str)]) -> String {
	url::form_urlencoded::Serializer::new(String::new())
		.extend_pairs(fields)
		.finish()
}

/// Field values that satisfy a route's schema.
pub fn valid_fields(route: AdminRoute) -> Vec<(&'static str, &'static str)> {
	route
		.schema()
		.fields
		.iter()
		.map(|f| match f.name {
			"group" => (f.name, "ADMINS"),
			_ => (f.name, "alice"),
		})
		.collect()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
	axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap()
		.to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
	serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn assert_status(response: &Response, expected: StatusCode, context: &str) {
	assert_eq!(response.status(), expected, "{context}");
}
