use crate::config::AppConfig;
use crate::pipeline::QueryPipeline;
use crate::schema::SchemaDefinition;
use std::sync::Arc;

/// Shared application state for the web server
pub struct AppState {
    pub config: AppConfig,
    pub pipeline: QueryPipeline,
    pub schema: Arc<SchemaDefinition>,
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(config: AppConfig, schema: Arc<SchemaDefinition>, pipeline: QueryPipeline) -> Self {
        Self {
            config,
            pipeline,
            schema,
            startup_time: chrono::Utc::now(),
        }
    }

    pub fn uptime_seconds(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.startup_time)
            .num_seconds()
    }
}
