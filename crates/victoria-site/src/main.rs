//! `victoria-site`: builds and serves the Victoria language website.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "victoria-site", version)]
#[command(about = "Build and serve the Victoria programming language website")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Site configuration file
    #[arg(short, long, global = true, default_value = "site.toml")]
    config: PathBuf,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Write site.toml and starter docs
    Init {
        /// Overwrite files that already exist
        #[arg(short, long)]
        yes: bool,
    },

    /// Serve pages from the docs directory, reloading on change
    Dev {
        #[arg(short, long, default_value_t = 7777)]
        port: u16,

        /// Leave the browser closed
        #[arg(long)]
        no_open: bool,
    },

    /// Render the whole site to static files
    Build {
        /// Output directory, overriding `[docs] output`
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write CSS unminified
        #[arg(long)]
        no_minify: bool,
    },

    /// Preview a built site
    Serve {
        #[arg(short, long, default_value_t = 4000)]
        port: u16,

        /// Built site to serve
        #[arg(short, long, default_value = "dist")]
        dir: PathBuf,
    },
}

impl Command {
    async fn run(self, config: &Path) -> Result<()> {
        match self {
            Command::Init { yes } => commands::init::run(config, yes).await,
            Command::Dev { port, no_open } => commands::dev::run(config, port, !no_open).await,
            Command::Build { output, no_minify } => {
                commands::build::run(config, output, no_minify.then_some(false)).await
            }
            Command::Serve { port, dir } => commands::serve::run(port, dir).await,
        }
    }
}

/// `RUST_LOG` wins when set; otherwise `info`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt().with_env_filter(filter).with_target(false).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    cli.command.run(&cli.config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let cli = Cli::try_parse_from(["victoria-site", "dev"]).unwrap();

        assert_eq!(cli.config, PathBuf::from("site.toml"));
        assert!(!cli.verbose);
        assert_eq!(
            cli.command,
            Command::Dev {
                port: 7777,
                no_open: false
            }
        );
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "victoria-site",
            "build",
            "--no-minify",
            "-o",
            "public_html",
            "--config",
            "other.toml",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(cli.verbose);
        assert_eq!(
            cli.command,
            Command::Build {
                output: Some(PathBuf::from("public_html")),
                no_minify: true
            }
        );
    }

    #[test]
    fn serve_takes_port_and_dir() {
        let cli =
            Cli::try_parse_from(["victoria-site", "serve", "-p", "8080", "-d", "out"]).unwrap();

        assert_eq!(
            cli.command,
            Command::Serve {
                port: 8080,
                dir: PathBuf::from("out")
            }
        );
    }

    #[test]
    fn rejects_unknown_commands() {
        assert!(Cli::try_parse_from(["victoria-site", "deploy"]).is_err());
    }
}
