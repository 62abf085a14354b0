use std::path::PathBuf;

use crate::api;
use crate::cli::commands::ServeArgs;
use crate::config::load_config;
use crate::errors::ClarityError;
use tracing::info;

pub async fn handle_serve(args: ServeArgs) -> Result<(), ClarityError> {
    let config_path = args.config.as_ref().map(PathBuf::from);
    let mut config = load_config(config_path.as_deref()).await?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(
        addr = %addr,
        explorer = %config.explorer.base_url,
        auth = config.server.api_token.is_some(),
        "Starting API server"
    );

    let state = api::create_app_state(config)?;
    let app = api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| ClarityError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
