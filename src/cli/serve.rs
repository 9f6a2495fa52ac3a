//! `usagemon serve`: run the stats server until Ctrl+C.

use color_eyre::Result;
use tracing::info;

use crate::config::ServerConfig;
use crate::cpu::CpuSampler;
use crate::logging::{init_logging, LogTarget};
use crate::server::start_stats_server_on;

/// Build the server config from the environment and the `--port` flag.
pub fn server_config(port: Option<u16>) -> Result<ServerConfig> {
    let config = ServerConfig::from_env()?;
    Ok(match port {
        Some(port) => config.with_port(port),
        None => config,
    })
}

pub fn handle_serve_command(port: Option<u16>) -> Result<()> {
    let config = server_config(port)?;
    init_logging(&LogTarget::Stderr, "info")?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let sampler = CpuSampler::proc(config.cpu_read_interval);
        let (handle, addr) = start_stats_server_on(config.bind, sampler).await?;

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down stats server on {}", addr);
            }
            _ = handle => {}
        }
        Ok::<(), color_eyre::Report>(())
    })
}
