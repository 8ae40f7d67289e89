use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

mod config;
mod db;
mod llm;
mod pipeline;
mod schema;
mod sql;
mod util;
mod web;

use crate::config::{AppConfig, CliArgs};
use crate::db::MovieStore;
use crate::llm::LlmManager;
use crate::pipeline::QueryPipeline;
use crate::schema::SchemaDefinition;
use crate::util::logging::init_tracing;
use crate::web::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Parse command line arguments
    let args = CliArgs::parse();

    // Load configuration; logging is not up yet
    let config = match AppConfig::new(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    init_tracing(&config.logging);

    let schema = match &config.schema_path {
        Some(path) => {
            info!("Loading schema definition from {}", path);
            SchemaDefinition::load(Path::new(path))?
        }
        None => SchemaDefinition::movies()?,
    };
    let schema = Arc::new(schema);
    info!("Schema describes {} tables", schema.tables.len());

    info!("Opening movie database at {}", config.database.path);
    let store = MovieStore::open(&config.database.path)?;
    store.bootstrap(config.database.seed)?;

    // Initialize LLM manager
    let llm_manager = LlmManager::new(&config.llm)?;
    info!(
        "Initialized LLM manager with backend: {} (model {})",
        llm_manager.backend(),
        config.llm.model
    );

    let pipeline = QueryPipeline::new(schema.clone(), Arc::new(llm_manager), Arc::new(store))
        .with_history_window(config.history_window);

    let web_config = config.web.clone();
    let app_state = Arc::new(AppState::new(config, schema, pipeline));

    // Start the web server
    info!("Starting server on {}:{}", web_config.host, web_config.port);
    match web::run_server(web_config, app_state).await {
        Ok(_) => info!("Server stopped gracefully"),
        Err(e) => {
            error!("Server error: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
