mod cli;

use coursereel::{config, server};
use coursereel_catalog::{queries, Dataset};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

struct StartOverrides {
    host: Option<String>,
    port: Option<u16>,
    data_file: Option<PathBuf>,
    base_url: Option<String>,
}

async fn start_server(overrides: StartOverrides, config_path: Option<&Path>) -> Result<()> {
    // Load config
    let mut config = config::load_config_or_default(config_path)?;

    // Override from CLI if specified
    if let Some(host) = overrides.host {
        config.server.host = host;
    }
    if let Some(port) = overrides.port {
        config.server.port = port;
    }
    if let Some(data_file) = overrides.data_file {
        config.catalog.data_file = data_file;
    }
    if let Some(base_url) = overrides.base_url {
        config.catalog.storage_base_url = base_url;
    }
    config::validate_config(&config)?;

    tracing::info!("Starting coursereel server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    server::start_server(config).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "coursereel=debug,coursereel_catalog=debug,tower_http=debug".to_string()
        } else {
            "coursereel=info,coursereel_catalog=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start {
            host,
            port,
            data_file,
            base_url,
        } => {
            let overrides = StartOverrides {
                host,
                port,
                data_file,
                base_url,
            };
            // Create tokio runtime
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(overrides, cli.config.as_deref()))
        }
        Commands::List { module, json } => list_module(module, json, cli.config.as_deref()),
        Commands::Search { query, json } => search(&query, json, cli.config.as_deref()),
        Commands::Export { video_id, output } => {
            export_transcript(&video_id, output, cli.config.as_deref())
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("coursereel {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Load the catalog named in the config, failing loudly instead of serving
/// an empty catalog.
fn load_dataset(config: &config::Config) -> Result<Dataset> {
    config
        .catalog
        .source()
        .try_load()
        .with_context(|| format!("Failed to load catalog {:?}", config.catalog.data_file))
}

fn list_module(module: u32, json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let dataset = load_dataset(&config)?;
    let videos = queries::list_by_module(&dataset, module, &config.catalog.storage_base_url);

    if json {
        println!("{}", serde_json::to_string_pretty(&videos)?);
        return Ok(());
    }

    if videos.is_empty() {
        println!("No videos found for module {}", module);
        return Ok(());
    }

    println!("Module {} ({} videos)", module, videos.len());
    for video in &videos {
        println!();
        println!("{}", video.title);
        println!("  id:  {}", video.id);
        println!("  url: {}", video.url);
        println!("  {}", video.transcript);
    }

    Ok(())
}

fn search(query: &str, json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let dataset = load_dataset(&config)?;
    let videos = queries::search(&dataset, query, &config.catalog.storage_base_url);

    if json {
        println!("{}", serde_json::to_string_pretty(&videos)?);
        return Ok(());
    }

    if videos.is_empty() {
        println!("No videos match {:?}", query);
        return Ok(());
    }

    println!("{} videos match {:?}", videos.len(), query);
    for video in &videos {
        println!();
        println!("[{}] {}", video.module, video.title);
        println!("  id:  {}", video.id);
        println!("  url: {}", video.url);
    }

    Ok(())
}

fn export_transcript(
    video_id: &str,
    output: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let dataset = load_dataset(&config)?;
    let export = queries::export_transcript(&dataset, video_id)?;

    let output = match output {
        Some(output) => output,
        None => default_output_path(&export.file_name)?,
    };
    std::fs::write(&output, &export.body)
        .with_context(|| format!("Failed to write transcript to {:?}", output))?;

    println!("Wrote {} bytes to {}", export.body.len(), output.display());
    Ok(())
}

/// Keep only the final component of an export name so identifiers with path
/// separators still land in the working directory.
fn default_output_path(file_name: &str) -> Result<PathBuf> {
    Path::new(file_name)
        .file_name()
        .map(PathBuf::from)
        .with_context(|| format!("Cannot derive an output file name from {:?}", file_name))
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(path)?;
    config::validate_config(&config)?;

    println!("Configuration is valid");
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Data file: {}", config.catalog.data_file.display());
    println!("  Storage base URL: {}", config.catalog.storage_base_url);
    println!("  Modules: {}", config.catalog.module_count);
    println!(
        "  Cache: {}",
        if config.catalog.cache { "enabled" } else { "disabled" }
    );

    Ok(())
}
