#![warn(clippy::all, rust_2018_idioms)]

use std::net::Ipv4Addr;
use std::sync::Arc;

use anyhow::Context;
use aws_config::BehaviorVersion;
use aws_types::region::Region;
use tracing::info;
use tracing_subscriber::prelude::*;

use netdash::config::AppConfig;
use netdash::server;
use netdash::topology::AwsResourceClient;

fn init_logging() {
    // RUST_LOG wins; the fallback keeps the AWS/hyper stack quiet.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "netdash=info,aws_config=warn,aws_sigv4=warn,aws_smithy_runtime=warn,aws_smithy_runtime_api=warn,aws_smithy_http=warn,hyper=warn",
        )
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env();
    info!(
        profile = %config.aws_profile,
        region = %config.aws_region,
        "resolving AWS configuration"
    );

    let aws_config = aws_config::defaults(BehaviorVersion::latest())
        .profile_name(&config.aws_profile)
        .region(Region::new(config.aws_region.clone()))
        .load()
        .await;

    let client: Arc<AwsResourceClient> = Arc::new(AwsResourceClient::new(&aws_config));
    let app = server::router(client, &config.aws_region);

    let listener = tokio::net::TcpListener::bind((Ipv4Addr::UNSPECIFIED, config.api_port))
        .await
        .with_context(|| format!("failed to bind port {}", config.api_port))?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server exited")?;
    Ok(())
}
