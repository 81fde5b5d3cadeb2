// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the admin queries server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`ADMIN_QUERIES_*`)
//!
//! # Usage
//!
//! ```ignore
//! use admin_queries_config::load_config;
//!
//! let config = load_config()?;
//! println!("Listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::AdminConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
	pub http: HttpConfig,
	pub directory: DirectoryConfig,
	pub auth: AuthConfig,
	pub cors: CorsConfig,
	pub logging: LoggingConfig,
}

impl AdminConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}

	/// Emits the resolved settings at info level. Call once a subscriber is
	/// installed; loading itself only logs at debug.
	pub fn log_summary(&self) {
		info!(
			host = %self.http.host,
			port = self.http.port,
			user_pool_id = %self.directory.user_pool_id,
			region = %self.directory.region,
			custom_endpoint = self.directory.endpoint_url.is_some(),
			allowed_groups = ?self.auth.allowed_groups,
			client_ids = self.auth.client_ids.len(),
			log_format = ?self.logging.format,
			"Server configuration loaded"
		);
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`ADMIN_QUERIES_*`)
/// 2. Config file (`/etc/admin-queries/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<AdminConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<AdminConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Load configuration from environment only.
pub fn load_config_from_env() -> Result<AdminConfig, ConfigError> {
	load_from_sources(vec![Box::new(EnvSource)])
}

/// Merge the given sources in precedence order and finalize the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<AdminConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = AdminConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	finalize(merged)
}

fn finalize(layer: AdminConfigLayer) -> Result<AdminConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let directory = layer.directory.unwrap_or_default().finalize()?;
	let auth = layer.auth.unwrap_or_default().finalize()?;
	let cors = layer.cors.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_config(&http, &auth)?;

	Ok(AdminConfig {
		http,
		directory,
		auth,
		cors,
		logging,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(http: &HttpConfig, auth: &AuthConfig) -> Result<(), ConfigError> {
	if http.port == 0 {
		return Err(ConfigError::Validation(
			"ADMIN_QUERIES_PORT must be non-zero".to_string(),
		));
	}

	if auth.allowed_groups.is_empty() {
		return Err(ConfigError::Validation(
			"at least one allowed group is required; without one no caller could be admitted"
				.to_string(),
		));
	}

	if auth.allowed_groups.iter().any(|g| g.trim().is_empty()) {
		return Err(ConfigError::Validation(
			"allowed group names must not be blank".to_string(),
		));
	}

	Ok(())
}
