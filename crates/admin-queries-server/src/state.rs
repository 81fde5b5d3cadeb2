// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use admin_queries_directory::DirectoryClient;

/// Shared, read-only state for admin handlers.
#[derive(Clone, Debug)]
pub struct AppState {
	pub directory: DirectoryClient,
}

impl AppState {
	pub fn new(directory: DirectoryClient) -> Self {
		Self { directory }
	}
}
