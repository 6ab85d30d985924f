//! Development server command.

use std::path::Path;

use anyhow::Result;
use victoria_server::{DevServer, DevServerConfig};

use crate::config::load_config;

/// Run the dev server.
pub async fn run(config_path: &Path, port: u16, open: bool) -> Result<()> {
    tracing::info!("Starting development server on port {}", port);

    let file_config = load_config(config_path)?;

    let config = DevServerConfig {
        docs_dir: file_config.docs.dir,
        public_dir: file_config.docs.public,
        port,
        open,
        site: file_config.site,
        ..Default::default()
    };

    DevServer::new(config).start().await?;

    Ok(())
}
