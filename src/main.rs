//! jokebox - a self-hosted joke widget backend
//!
//! Serves a joke card with favorites and search, plus a rotating background,
//! as a JSON API for any front end to render.

mod api;
mod config;
mod core;
mod models;
mod plugins;
mod serializers;
mod stores;
mod utils;

use actix_web::web;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::{Paths, UserConfig};
use crate::core::{BackgroundRotator, JokeManager};

/// jokebox - joke widget backend
#[derive(Parser, Debug)]
#[command(name = "jokebox")]
#[command(version)]
#[command(about = "A self-hosted joke widget backend with a rotating background")]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 7878)]
    port: u16,

    /// Enable debug mode
    #[arg(long)]
    debug: bool,

    /// Path to config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Background rotation interval in milliseconds (overrides settings)
    #[arg(long)]
    interval_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };

    // keep the http stack quiet unless debugging
    let filter = tracing_subscriber::EnvFilter::new(format!(
        "{},hyper=warn,reqwest=warn",
        log_level
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("jokebox v{} starting...", env!("CARGO_PKG_VERSION"));

    let paths = Paths::init(args.config)?;
    info!("Config directory: {:?}", paths.config_dir());

    let mut config = UserConfig::load()?;
    if let Some(ms) = args.interval_ms {
        config.background_interval_ms = ms;
    }

    start_jokebox(args.host, args.port, config).await
}

async fn start_jokebox(host: String, port: u16, config: UserConfig) -> Result<()> {
    // Background rotator
    info!("Building background ({} images)...", config.background_images.len());
    let rotator = Arc::new(BackgroundRotator::new());
    rotator.build(&config.background_images);
    if config.background_interval_ms > 0 {
        rotator.start(Duration::from_millis(config.background_interval_ms));
    } else {
        tracing::warn!("Background rotation disabled (interval is 0)");
    }

    // Joke manager
    info!("Joke source: {}", config.joke_api_url);
    let manager = Arc::new(JokeManager::from_config(&config));

    // first joke, as on page load
    {
        let manager = Arc::clone(&manager);
        utils::threading::spawn_background(async move {
            let outcome = manager.request_joke(None).await;
            tracing::debug!("Initial joke: {:?}", outcome);
        });
    }

    let addr = format!("{}:{}", host, port);
    info!("Server listening on http://{}", addr);

    use actix_cors::Cors;
    use actix_web::{middleware, App, HttpServer};

    let manager = web::Data::from(manager);
    let rotator_data = web::Data::from(Arc::clone(&rotator));

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .app_data(manager.clone())
            .app_data(rotator_data.clone())
            .configure(api::configure)
    })
    .bind(addr)?
    .run()
    .await?;

    rotator.stop();
    Ok(())
}
