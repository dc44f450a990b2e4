// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use clap::Parser;

use relay_core::Job;
use relay_server::{JobSink, SinkError};

#[derive(Parser)]
#[command(name = "relayd", about = "CTest submission relay")]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: SocketAddr,
}

/// Default sink: write every normalized job to stdout as pretty JSON.
struct PrintSink;

#[async_trait]
impl JobSink for PrintSink {
    async fn submit(&self, job: Job) -> Result<(), SinkError> {
        let rendered =
            serde_json::to_string_pretty(&job).map_err(|err| SinkError::new(err.to_string()))?;
        println!("{rendered}");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let listener = tokio::net::TcpListener::bind(cli.listen).await?;
    tracing::info!(addr = %cli.listen, "listening");
    axum::serve(listener, relay_server::router(Arc::new(PrintSink))).await?;
    Ok(())
}
