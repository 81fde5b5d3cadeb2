// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Routes reach the directory with the right command and shape the result.

use admin_queries_directory::{
	DirectoryCommand, DirectoryGroup, DirectoryOutput, DirectoryUser, GroupPage, UserAttribute,
	UserPage,
};
use admin_queries_server::{AdminRoute, ResponseShape, RESPONSE_TIME_HEADER};
use axum::http::StatusCode;
use serde_json::json;

use super::support::{body_bytes, body_json, pool, valid_fields, Caller, Canned, TestApp};

#[tokio::test]
async fn add_user_to_group_sends_one_command() {
	let app = TestApp::new();

	let response = app
		.post_form(
			"/add-user-to-group",
			Caller::Admin,
			&[("username", "alice"), ("group", "ADMINS")],
		)
		.await;

	assert_eq!(response.status(), StatusCode::OK);
	assert!(response.headers().contains_key(&RESPONSE_TIME_HEADER));
	assert!(body_bytes(response).await.is_empty());
	assert_eq!(
		app.backend.calls(),
		vec![DirectoryCommand::AddUserToGroup {
			user_pool_id: pool(),
			username: "alice".to_string(),
			group_name: "ADMINS".to_string(),
		}]
	);
}

#[tokio::test]
async fn every_route_maps_to_its_operation() {
	let expected = [
		(AdminRoute::AddUserToGroup, "AdminAddUserToGroup"),
		(AdminRoute::RemoveUserFromGroup, "AdminRemoveUserFromGroup"),
		(AdminRoute::ConfirmUserSignup, "AdminConfirmSignUp"),
		(AdminRoute::DisableUser, "AdminDisableUser"),
		(AdminRoute::EnableUser, "AdminEnableUser"),
		(AdminRoute::GetUser, "AdminGetUser"),
		(AdminRoute::ListUsers, "ListUsers"),
		(AdminRoute::ListGroups, "ListGroups"),
		(AdminRoute::ListGroupsForUser, "AdminListGroupsForUser"),
		(AdminRoute::ListUsersInGroup, "ListUsersInGroup"),
		(AdminRoute::SignUserOut, "AdminUserGlobalSignOut"),
	];

	for (route, operation) in expected {
		let app = TestApp::new();
		let fields = valid_fields(route);

		let response = app.call(route, Caller::Admin, &fields).await;
		assert_eq!(response.status(), StatusCode::OK, "{}", route.path());

		let calls = app.backend.calls();
		assert_eq!(calls.len(), 1, "{}", route.path());
		assert_eq!(calls[0].operation(), operation, "{}", route.path());
		assert_eq!(calls[0].user_pool_id(), &pool());

		let body = body_bytes(response).await;
		match route.response_shape() {
			ResponseShape::Empty => assert!(body.is_empty(), "{} returned a body", route.path()),
			ResponseShape::Json => {
				serde_json::from_slice::<serde_json::Value>(&body).unwrap();
			}
		}
	}
}

#[tokio::test]
async fn list_groups_returns_the_directory_result() {
	let page = GroupPage {
		groups: vec![
			DirectoryGroup {
				group_name: Some("ADMINS".to_string()),
				user_pool_id: Some("us-east-1_TestPool".to_string()),
				description: Some("Console administrators".to_string()),
				role_arn: None,
				precedence: Some(0),
				last_modified_date: None,
				creation_date: None,
			},
			DirectoryGroup {
				group_name: Some("USERS".to_string()),
				user_pool_id: Some("us-east-1_TestPool".to_string()),
				description: None,
				role_arn: None,
				precedence: None,
				last_modified_date: None,
				creation_date: None,
			},
		],
		next_token: Some("page-2".to_string()),
	};
	let app = TestApp::with_canned(Canned::Output(DirectoryOutput::Groups(page)));

	let response = app.get("/list-groups", Caller::Admin, &[]).await;

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(
		body_json(response).await,
		json!({
			"Groups": [
				{
					"GroupName": "ADMINS",
					"UserPoolId": "us-east-1_TestPool",
					"Description": "Console administrators",
					"Precedence": 0
				},
				{
					"GroupName": "USERS",
					"UserPoolId": "us-east-1_TestPool"
				}
			],
			"NextToken": "page-2"
		})
	);
}

#[tokio::test]
async fn list_users_returns_attributes() {
	let page = UserPage {
		users: vec![DirectoryUser {
			username: Some("alice".to_string()),
			attributes: vec![UserAttribute {
				name: "email".to_string(),
				value: Some("alice@example.com".to_string()),
			}],
			user_create_date: None,
			user_last_modified_date: None,
			enabled: true,
			user_status: Some("CONFIRMED".to_string()),
		}],
		pagination_token: None,
	};
	let app = TestApp::with_canned(Canned::Output(DirectoryOutput::Users(page)));

	let response = app.get("/list-users", Caller::Admin, &[]).await;

	assert_eq!(response.status(), StatusCode::OK);
	let body = body_json(response).await;
	assert_eq!(body["Users"][0]["Username"], "alice");
	assert_eq!(body["Users"][0]["Attributes"][0]["Value"], "alice@example.com");
	assert_eq!(body["Users"][0]["Enabled"], true);
	assert!(body.get("PaginationToken").is_none());
}

#[tokio::test]
async fn get_user_reads_the_query_string() {
	let app = TestApp::new();

	let response = app
		.get("/get-user", Caller::Admin, &[("username", "bob smith")])
		.await;

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_json(response).await["Username"], "bob smith");
	assert_eq!(
		app.backend.calls(),
		vec![DirectoryCommand::GetUser {
			user_pool_id: pool(),
			username: "bob smith".to_string(),
		}]
	);
}

#[tokio::test]
async fn list_users_in_group_fetches_but_returns_nothing() {
	let app = TestApp::new();

	let response = app
		.get("/list-users-in-group", Caller::Admin, &[("group", "ADMINS")])
		.await;

	assert_eq!(response.status(), StatusCode::OK);
	assert!(body_bytes(response).await.is_empty());
	assert_eq!(
		app.backend.calls(),
		vec![DirectoryCommand::ListUsersInGroup {
			user_pool_id: pool(),
			group_name: "ADMINS".to_string(),
		}]
	);
}

#[tokio::test]
async fn repeated_mutations_are_forwarded_each_time() {
	let app = TestApp::new();

	for _ in 0..2 {
		let response = app
			.post_form("/enable-user", Caller::Admin, &[("username", "alice")])
			.await;
		assert_eq!(response.status(), StatusCode::OK);
	}

	let enable = DirectoryCommand::EnableUser {
		user_pool_id: pool(),
		username: "alice".to_string(),
	};
	assert_eq!(app.backend.calls(), vec![enable.clone(), enable]);
}

#[tokio::test]
async fn directory_rejections_pass_through() {
	let app = TestApp::with_canned(Canned::ServiceError {
		status: 400,
		code: "UserNotFoundException",
		message: "User does not exist.",
	});

	let response = app
		.post_form("/disable-user", Caller::Admin, &[("username", "ghost")])
		.await;

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert!(response.headers().contains_key(&RESPONSE_TIME_HEADER));
	assert_eq!(
		body_json(response).await,
		json!({
			"error": "UserNotFoundException",
			"message": "User does not exist."
		})
	);
	assert_eq!(app.backend.call_count(), 1);
}

#[tokio::test]
async fn directory_throttling_keeps_its_status() {
	let app = TestApp::with_canned(Canned::ServiceError {
		status: 429,
		code: "TooManyRequestsException",
		message: "Rate exceeded",
	});

	let response = app.get("/list-users", Caller::Admin, &[]).await;

	assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
	assert_eq!(body_json(response).await["error"], "TooManyRequestsException");
}

#[tokio::test]
async fn unreachable_directory_is_a_bad_gateway() {
	let app = TestApp::with_canned(Canned::Unreachable);

	let response = app
		.post_form("/sign-user-out", Caller::Admin, &[("username", "alice")])
		.await;

	assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
	let body = body_json(response).await;
	assert_eq!(body["error"], "directory_unavailable");
	assert!(!body["message"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn mismatched_directory_output_is_an_internal_error() {
	let app = TestApp::with_canned(Canned::Output(DirectoryOutput::Acknowledged));

	let response = app.get("/list-groups", Caller::Admin, &[]).await;

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(body_json(response).await["error"], "internal_error");
}
