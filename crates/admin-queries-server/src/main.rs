// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Admin queries server binary.

use std::path::PathBuf;
use std::sync::Arc;

use admin_queries_auth::{CognitoVerifier, GroupPolicy, VerifierSettings};
use admin_queries_config::{AdminConfig, LogFormat, LoggingConfig};
use admin_queries_directory::{CognitoBackend, CognitoSettings, DirectoryClient};
use admin_queries_server::{create_app, AppState, AuthorizationGate};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod version;

/// Admin queries server - administrative HTTP API for the identity directory.
#[derive(Parser, Debug)]
#[command(
	name = "admin-queries-server",
	about = "Administrative HTTP API for the identity directory",
	version
)]
struct Args {
	/// Path to a TOML config file (default: /etc/admin-queries/server.toml)
	#[arg(long, env = "ADMIN_QUERIES_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
	/// Load and validate configuration, then exit
	CheckConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// .env may provide ADMIN_QUERIES_CONFIG
	dotenvy::dotenv().ok();

	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	let config = match &args.config {
		Some(path) => admin_queries_config::load_config_with_file(path)?,
		None => admin_queries_config::load_config()?,
	};

	if let Some(Command::CheckConfig) = args.command {
		print_config(&config);
		return Ok(());
	}

	init_tracing(&config.logging);
	config.log_summary();

	let pool = config.directory.user_pool_id.clone();
	let backend = CognitoBackend::connect(
		&pool,
		&CognitoSettings {
			region: Some(config.directory.region.clone()),
			endpoint_url: config.directory.endpoint_url.clone(),
		},
	)
	.await;
	let directory = DirectoryClient::new(Arc::new(backend), pool.clone());

	let verifier = CognitoVerifier::new(VerifierSettings::for_user_pool(
		pool.region(),
		pool.as_str(),
		config.auth.client_ids.clone(),
	))?;
	let gate = Arc::new(AuthorizationGate::new(
		Arc::new(verifier),
		GroupPolicy::new(config.auth.allowed_groups.clone()),
	));

	let app = create_app(AppState::new(directory), gate, &config.cors);

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| logging.level.clone().into());

	let registry = tracing_subscriber::registry().with(filter);
	match logging.format {
		LogFormat::Json => registry
			.with(tracing_subscriber::fmt::layer().json())
			.init(),
		LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
	}
}

fn print_config(config: &AdminConfig) {
	println!("listen:          {}", config.socket_addr());
	println!("user pool:       {}", config.directory.user_pool_id);
	println!("region:          {}", config.directory.region);
	if let Some(endpoint) = &config.directory.endpoint_url {
		println!("endpoint:        {endpoint}");
	}
	println!("allowed groups:  {}", config.auth.allowed_groups.join(", "));
	if !config.auth.client_ids.is_empty() {
		println!("client ids:      {}", config.auth.client_ids.join(", "));
	}
	println!("cors origins:    {}", config.cors.allowed_origins.join(", "));
	println!("log:             {} ({:?})", config.logging.level, config.logging.format);
}
