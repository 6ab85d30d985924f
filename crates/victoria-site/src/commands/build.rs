//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use victoria_static::{BuildConfig, StaticBuilder};

use crate::config::load_config;

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building static site...");

    let file_config = load_config(config_path)?;

    let config = BuildConfig {
        docs_dir: file_config.docs.dir,
        output_dir: output.unwrap_or(file_config.docs.output),
        public_dir: file_config.docs.public,
        minify: minify.unwrap_or(file_config.build.minify),
        site: file_config.site,
    };

    let result = StaticBuilder::new(config).build().await?;

    tracing::info!(
        "Built {} pages ({} docs) in {}ms",
        result.pages,
        result.docs,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
