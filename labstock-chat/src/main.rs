use std::io::Read;

use anyhow::{Context, Result};

use labstock_chat_proxy::event::HttpEvent;
use labstock_chat_proxy::handler::{self, ProxyConfig};

/// Function-runtime shim: one HTTP event JSON on stdin, one HTTP response
/// JSON on stdout.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read event from stdin")?;

    let event: HttpEvent =
        serde_json::from_str(&input).context("invalid HTTP event payload")?;

    let config = ProxyConfig::from_env();
    let response = handler::handle(event, &config).await;

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
