//! Status bot binary.
//!
//! Standalone HTTP service answering Slack mentions with site status.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use statusbot::{
    config::Config, server, Dispatcher, MerakiClient, PrtgClient, SlackNotifier,
};

/// Slack bot reporting site, leaf device and wireless client status.
#[derive(Debug, Parser)]
#[command(name = "statusbot", version, about)]
struct Args {
    /// Port to listen on (overrides `STATUSBOT_PORT`)
    #[arg(long, short)]
    port: Option<u16>,

    /// Emit logs as JSON
    #[arg(long, env = "STATUSBOT_JSON_LOGS")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::from_default_env().add_directive("statusbot=info".parse()?);
    if args.json_logs {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    info!("Starting status bot...");

    // Load configuration
    let mut config = Config::default();
    if let Some(port) = args.port {
        config.port = port;
    }

    let missing = config.missing();
    if !missing.is_empty() {
        bail!(
            "Missing required environment variables: {}",
            missing.join(", ")
        );
    }

    let (
        Some(app_token),
        Some(oauth_token),
        Some(channel),
        Some(prtg_table_url),
        Some(prtg_api_key),
        Some(meraki_api_key),
        Some(meraki_network_id),
    ) = (
        config.slack_app_token.clone(),
        config.slack_oauth_token.clone(),
        config.slack_post_channel.clone(),
        config.prtg_table_url(),
        config.prtg_api_key.clone(),
        config.meraki_api_key.clone(),
        config.meraki_network_id.clone(),
    )
    else {
        bail!("Configuration is incomplete");
    };

    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to create HTTP client")?;

    let dispatcher = Dispatcher::new(
        Arc::new(PrtgClient::new(http.clone(), prtg_table_url, prtg_api_key)),
        Arc::new(MerakiClient::new(
            http.clone(),
            &config.meraki_api_url,
            meraki_api_key,
            meraki_network_id,
        )),
        Arc::new(SlackNotifier::new(
            http,
            &config.slack_api_url,
            oauth_token,
            &channel,
        )),
    );

    info!(channel = %channel, "Replies go to Slack channel");

    // Build router
    let app = server::build_router(server::AppState {
        app_token: Arc::from(app_token),
        dispatcher,
    });

    // Bind and serve
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(port = config.port, "Status bot listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
