// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The admin route table and its dispatcher.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, on, MethodFilter};
use axum::{middleware, Json, Router};
use serde::Serialize;
use tower::ServiceBuilder;
use tracing::instrument;

use crate::error::{AdminApiError, ErrorResponse};
use crate::gate::{authorization_gate, AuthorizationGate};
use crate::payload::read_payload;
use crate::state::AppState;
use crate::timing::response_timer;
use crate::validation::{validate, FieldSpec, Schema, ValidatedPayload};

const USERNAME: FieldSpec = FieldSpec::required_string("username");
const GROUP: FieldSpec = FieldSpec::required_string("group");

static USERNAME_AND_GROUP: Schema = Schema::new(&[USERNAME, GROUP]);
static USERNAME_ONLY: Schema = Schema::new(&[USERNAME]);
static GROUP_ONLY: Schema = Schema::new(&[GROUP]);
static NO_FIELDS: Schema = Schema::new(&[]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
	/// 200 with an empty body.
	Empty,
	/// 200 with the directory result as JSON.
	Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminRoute {
	AddUserToGroup,
	RemoveUserFromGroup,
	ConfirmUserSignup,
	DisableUser,
	EnableUser,
	GetUser,
	ListUsers,
	ListGroups,
	ListGroupsForUser,
	ListUsersInGroup,
	SignUserOut,
}

impl AdminRoute {
	pub const ALL: [AdminRoute; 11] = [
		AdminRoute::AddUserToGroup,
		AdminRoute::RemoveUserFromGroup,
		AdminRoute::ConfirmUserSignup,
		AdminRoute::DisableUser,
		AdminRoute::EnableUser,
		AdminRoute::GetUser,
		AdminRoute::ListUsers,
		AdminRoute::ListGroups,
		AdminRoute::ListGroupsForUser,
		AdminRoute::ListUsersInGroup,
		AdminRoute::SignUserOut,
	];

	pub fn method(self) -> Method {
		match self {
			AdminRoute::GetUser
			| AdminRoute::ListUsers
			| AdminRoute::ListGroups
			| AdminRoute::ListGroupsForUser
			| AdminRoute::ListUsersInGroup => Method::GET,
			AdminRoute::AddUserToGroup
			| AdminRoute::RemoveUserFromGroup
			| AdminRoute::ConfirmUserSignup
			| AdminRoute::DisableUser
			| AdminRoute::EnableUser
			| AdminRoute::SignUserOut => Method::POST,
		}
	}

	fn method_filter(self) -> MethodFilter {
		if self.method() == Method::GET {
			MethodFilter::GET
		} else {
			MethodFilter::POST
		}
	}

	pub fn path(self) -> &'static str {
		match self {
			AdminRoute::AddUserToGroup => "/add-user-to-group",
			AdminRoute::RemoveUserFromGroup => "/remove-user-from-group",
			AdminRoute::ConfirmUserSignup => "/confirm-user-signup",
			AdminRoute::DisableUser => "/disable-user",
			AdminRoute::EnableUser => "/enable-user",
			AdminRoute::GetUser => "/get-user",
			AdminRoute::ListUsers => "/list-users",
			AdminRoute::ListGroups => "/list-groups",
			AdminRoute::ListGroupsForUser => "/list-groups-for-user",
			AdminRoute::ListUsersInGroup => "/list-users-in-group",
			AdminRoute::SignUserOut => "/sign-user-out",
		}
	}

	pub fn schema(self) -> &'static Schema {
		match self {
			AdminRoute::AddUserToGroup | AdminRoute::RemoveUserFromGroup => &USERNAME_AND_GROUP,
			AdminRoute::ConfirmUserSignup
			| AdminRoute::DisableUser
			| AdminRoute::EnableUser
			| AdminRoute::GetUser
			| AdminRoute::ListGroupsForUser
			| AdminRoute::SignUserOut => &USERNAME_ONLY,
			AdminRoute::ListUsersInGroup => &GROUP_ONLY,
			AdminRoute::ListUsers | AdminRoute::ListGroups => &NO_FIELDS,
		}
	}

	pub fn response_shape(self) -> ResponseShape {
		match self {
			AdminRoute::GetUser
			| AdminRoute::ListUsers
			| AdminRoute::ListGroups
			| AdminRoute::ListGroupsForUser => ResponseShape::Json,
			// The member listing is fetched but not returned.
			AdminRoute::ListUsersInGroup => ResponseShape::Empty,
			AdminRoute::AddUserToGroup
			| AdminRoute::RemoveUserFromGroup
			| AdminRoute::ConfirmUserSignup
			| AdminRoute::DisableUser
			| AdminRoute::EnableUser
			| AdminRoute::SignUserOut => ResponseShape::Empty,
		}
	}
}

/// Builds the admin router: every route in [`AdminRoute::ALL`] behind the
/// authorization gate and the response timer, plus an ungated `/health`.
pub fn create_router(state: AppState, gate: Arc<AuthorizationGate>) -> Router {
	let admin = AdminRoute::ALL
		.into_iter()
		.fold(Router::new(), |router, route| {
			router.route(
				route.path(),
				on(
					route.method_filter(),
					move |State(state): State<AppState>, request: Request| {
						dispatch(route, state, request)
					},
				),
			)
		})
		.fallback(not_found)
		.layer(
			ServiceBuilder::new()
				.layer(middleware::from_fn_with_state(gate, authorization_gate))
				.layer(middleware::from_fn(response_timer)),
		)
		.with_state(state);

	Router::new().route("/health", get(health)).merge(admin)
}

async fn health() -> &'static str {
	"ok"
}

async fn not_found() -> Response {
	(
		StatusCode::NOT_FOUND,
		Json(ErrorResponse {
			error: "not_found".to_string(),
			message: "Not found".to_string(),
		}),
	)
		.into_response()
}

#[instrument(skip(state, request), fields(path = route.path()))]
async fn dispatch(route: AdminRoute, state: AppState, request: Request) -> Response {
	match handle(route, &state, request).await {
		Ok(response) => response,
		Err(e) => e.into_response(),
	}
}

async fn handle(
	route: AdminRoute,
	state: &AppState,
	request: Request,
) -> Result<Response, AdminApiError> {
	let raw = read_payload(request).await?;
	let payload = validate(route.schema(), &raw)?;
	let result = execute(route, state, &payload).await?;

	Ok(match route.response_shape() {
		ResponseShape::Empty => StatusCode::OK.into_response(),
		ResponseShape::Json => Json(result).into_response(),
	})
}

fn to_json(value: impl Serialize) -> Result<serde_json::Value, AdminApiError> {
	serde_json::to_value(value).map_err(|e| AdminApiError::Internal(e.to_string()))
}

/// Performs the route's single directory call.
async fn execute(
	route: AdminRoute,
	state: &AppState,
	payload: &ValidatedPayload,
) -> Result<serde_json::Value, AdminApiError> {
	let directory = &state.directory;

	match route {
		AdminRoute::AddUserToGroup => {
			directory
				.add_user_to_group(payload.required("username")?, payload.required("group")?)
				.await?;
			Ok(serde_json::Value::Null)
		}
		AdminRoute::RemoveUserFromGroup => {
			directory
				.remove_user_from_group(payload.required("username")?, payload.required("group")?)
				.await?;
			Ok(serde_json::Value::Null)
		}
		AdminRoute::ConfirmUserSignup => {
			directory
				.confirm_sign_up(payload.required("username")?)
				.await?;
			Ok(serde_json::Value::Null)
		}
		AdminRoute::DisableUser => {
			directory.disable_user(payload.required("username")?).await?;
			Ok(serde_json::Value::Null)
		}
		AdminRoute::EnableUser => {
			directory.enable_user(payload.required("username")?).await?;
			Ok(serde_json::Value::Null)
		}
		AdminRoute::GetUser => to_json(directory.get_user(payload.required("username")?).await?),
		AdminRoute::ListUsers => to_json(directory.list_users().await?),
		AdminRoute::ListGroups => to_json(directory.list_groups().await?),
		AdminRoute::ListGroupsForUser => to_json(
			directory
				.list_groups_for_user(payload.required("username")?)
				.await?,
		),
		AdminRoute::ListUsersInGroup => to_json(
			directory
				.list_users_in_group(payload.required("group")?)
				.await?,
		),
		AdminRoute::SignUserOut => {
			directory
				.global_sign_out(payload.required("username")?)
				.await?;
			Ok(serde_json::Value::Null)
		}
	}
}
