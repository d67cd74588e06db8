use std::net::SocketAddr;
use tracing::info;

use super::{CommandStrategy, build_app_state, init_common_components};

/// Input parameters for the Serve command strategy.
#[derive(Debug, Clone)]
pub struct ServeInput {
    /// Bind host override
    pub host: Option<String>,
    /// Bind port override
    pub port: Option<u16>,
}

/// Strategy for running the HTTP API server.
///
/// Fails fast on missing credentials: the server never starts with an
/// unusable responder or search binding.
#[derive(Debug, Clone, Copy)]
pub struct ServeStrategy;

impl CommandStrategy for ServeStrategy {
    type Input = ServeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components().await?;
        let state = build_app_state(&common.config, &common.registry)?;

        let host = input
            .host
            .unwrap_or_else(|| common.config.server.host.clone());
        let port = input.port.unwrap_or(common.config.server.port);
        let addr: SocketAddr = format!("{host}:{port}").parse()?;

        info!("Starting scout server on {}", addr);
        scout_server::serve(state, addr).await
    }
}
