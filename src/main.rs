mod cli;

use thumbforge::{
    config::{self, Config, ConfigError},
    images::ImageService,
    pipeline::{Pipeline, PipelineError},
    server::{self, AppContext},
};
use thumbforge_db::pool::{init_pool, DbPool};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "thumbforge=trace,thumbforge_db=debug,tower_http=debug".to_string()
        } else {
            "thumbforge=info,thumbforge_db=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = exit_code(&e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(code)
        }
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Run {
            query,
            max_images,
            json,
        } => run_pipeline(config_path, query.as_deref(), max_images, json),
        Commands::Serve { host, port } => {
            let mut config = config::load_config_or_default(config_path)?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config::validate_config(&config)?;
            let pool = open_pool(&config)?;

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(server::start_server(AppContext::new(
                config,
                ImageService::new(pool),
            )))
        }
        Commands::InitDb => {
            let config = config::load_config_or_default(config_path)?;
            let status = ImageService::new(open_pool(&config)?).schema_status()?;
            println!(
                "Database ready at {} ({})",
                config.database.path.display(),
                status
            );
            Ok(())
        }
        Commands::List => {
            let config = config::load_config_or_default(config_path)?;
            let service = ImageService::new(open_pool(&config)?);
            for id in service.list_ids()? {
                println!("{}\t/images/{}", id, id);
            }
            Ok(())
        }
        Commands::Validate {
            config: validate_path,
        } => validate_config(validate_path.as_deref().or(config_path)),
        Commands::Version => {
            println!("thumbforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Single-shot batch run.
///
/// The query is resolved before the database is opened or any request is
/// made, so a missing query fails without side effects.
fn run_pipeline(
    config_path: Option<&Path>,
    query: Option<&str>,
    max_images: Option<usize>,
    json: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path).map_err(PipelineError::from)?;
    let query = config.require_query(query).map_err(PipelineError::from)?;
    let max_images = max_images.unwrap_or(config.scrape.max_images);

    let pool = open_pool(&config).map_err(PipelineError::Store)?;
    let pipeline = Pipeline::from_config(&config, ImageService::new(pool))?;

    tracing::info!("Running pipeline for {:?} (max {} images)", query, max_images);

    let rt = tokio::runtime::Runtime::new()?;
    let report = rt.block_on(pipeline.run_detailed(&query, max_images))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Stored {} of {} requested images for {:?} ({} found, {} fetched, {} resized)",
            report.stored,
            report.urls_requested,
            report.query,
            report.urls_found,
            report.fetched,
            report.resized
        );
    }

    Ok(())
}

fn open_pool(config: &Config) -> thumbforge_common::Result<DbPool> {
    let db_path = config.database.path.to_string_lossy();
    tracing::debug!("Opening database at {}", db_path);
    init_pool(&db_path)
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, using defaults");
            config::load_config_or_default(None)?
        }
    };

    println!("✓ Configuration is valid");
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Database: {}", config.database.path.display());
    println!(
        "  Query: {}",
        config.scrape.query.as_deref().unwrap_or("(not set)")
    );
    println!("  Max images: {}", config.scrape.max_images);
    println!("  Concurrency: {}", config.scrape.concurrency);
    println!("  Target size: {}", config.resize.target());

    Ok(())
}

/// Map a failure to the process exit status.
fn exit_code(e: &anyhow::Error) -> u8 {
    if let Some(pipeline) = e.downcast_ref::<PipelineError>() {
        return pipeline.exit_code();
    }
    if e.downcast_ref::<ConfigError>().is_some() {
        return 2;
    }
    if e.downcast_ref::<thumbforge_common::Error>()
        .is_some_and(|err| err.is_database())
    {
        return 4;
    }
    1
}
