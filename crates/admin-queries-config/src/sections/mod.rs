// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod auth;
mod cors;
mod directory;
mod http;
mod logging;

pub use auth::{AuthConfig, AuthConfigLayer};
pub use cors::{CorsConfig, CorsConfigLayer};
pub use directory::{DirectoryConfig, DirectoryConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
