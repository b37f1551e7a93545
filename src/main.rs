mod cli;
mod config;
mod graph;
mod language;
mod parser;
mod query;
mod resolver;
mod walker;
#[cfg(feature = "web")]
mod web;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::BridgeConfig;
use parser::patterns::catalog;
use query::{AnalyzeRequest, analyze, output::print_result};
use walker::{read_target, walk_snapshot};

fn init_tracing(config: &BridgeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_root = match &cli.command {
        Commands::Analyze { root, .. } => root.as_path(),
        #[cfg(feature = "web")]
        Commands::Serve { .. } => std::path::Path::new("."),
    };
    let config = BridgeConfig::load(config_root);
    init_tracing(&config);

    // Compile the pattern catalog before any request touches it.
    let catalog = catalog();

    match cli.command {
        Commands::Analyze {
            file,
            root,
            no_snapshot,
            format,
        } => {
            let (file_path, file_content) = read_target(&root, &file)?;
            let repo_files = if no_snapshot {
                None
            } else {
                let snapshot = walk_snapshot(&root, &config)?;
                info!(files = snapshot.len(), root = %root.display(), "snapshot ready");
                Some(snapshot)
            };

            let request = AnalyzeRequest {
                file_path,
                file_content,
                repo_files,
                ..Default::default()
            };
            let result = analyze(catalog, &request);
            print_result(&result, &format);
        }

        #[cfg(feature = "web")]
        Commands::Serve { port } => {
            let port = config.port(port);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(web::serve(port))?;
        }
    }

    Ok(())
}
