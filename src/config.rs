use anyhow::{Context, Result};
use clap::Parser;

use crate::store::StoreTarget;

/// Command line arguments, each overridable through the environment.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "redis-cache-proxy",
    about = "HTTP front end for basic Redis cache commands"
)]
pub struct Args {
    /// Path prefix prepended to every route
    #[arg(long, env = "CONTEXT_PATH", default_value = "")]
    pub context_path: String,

    /// Redis connection string in the form [password/]host:port[/db]
    #[arg(long, env = "REDIS_ADDR", default_value = "127.0.0.1:6379")]
    pub redis_addr: String,

    /// Port to serve on
    #[arg(long, env = "PORT", default_value_t = 8082)]
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub context_path: String,
    pub port: u16,
    pub target: StoreTarget,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        let target = StoreTarget::parse(&args.redis_addr)
            .context("--redis-addr must be [password/]host:port[/db]")?;

        Ok(Config {
            context_path: normalize_context_path(&args.context_path),
            port: args.port,
            target,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!(
            "  Context path: {}",
            if self.context_path.is_empty() {
                "(none)"
            } else {
                &self.context_path
            }
        );
        tracing::info!("  Store address: {}", self.target.addr);
        tracing::info!(
            "  Store auth: {}",
            if self.target.password.is_empty() {
                "disabled"
            } else {
                "enabled"
            }
        );
        tracing::info!("  Default database index: {}", self.target.default_db);
        tracing::info!("  Listening on port: {}", self.port);
    }
}

/// Ensure a non-empty prefix starts with `/` and does not end with one.
fn normalize_context_path(raw: &str) -> String {
    let path = raw.trim().trim_end_matches('/');

    if path.is_empty() {
        String::new()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
