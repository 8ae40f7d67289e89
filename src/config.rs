use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
    /// Load the reference movie data when the store is empty
    pub seed: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    pub backend: String, // "gemini", "remote", or "ollama"
    pub model: String,
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub temperature: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub format: String, // "pretty" or "json"
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub web: WebConfig,
    pub llm: LlmConfig,
    pub logging: LoggingConfig,
    /// Number of prior conversation turns forwarded to the SQL generator
    pub history_window: usize,
    /// Optional JSON schema definition replacing the built-in movie schema
    pub schema_path: Option<String>,
}

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to the SQLite movie database
    #[arg(long, value_name = "FILE")]
    pub database: Option<String>,

    /// LLM backend used for SQL generation
    #[arg(long)]
    pub backend: Option<String>,
}

impl AppConfig {
    pub fn new(args: &CliArgs) -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();

        let mut config_builder = Config::builder()
            .set_default("database.path", defaults.database.path)?
            .set_default("database.seed", defaults.database.seed)?
            .set_default("web.host", defaults.web.host)?
            .set_default("web.port", defaults.web.port as i64)?
            .set_default("llm.backend", defaults.llm.backend)?
            .set_default("llm.model", defaults.llm.model)?
            .set_default("llm.temperature", defaults.llm.temperature as f64)?
            .set_default("logging.format", defaults.logging.format)?
            .set_default("history_window", defaults.history_window as i64)?;

        // Add configuration from file if specified
        if let Some(config_path) = &args.config {
            config_builder = config_builder.add_source(File::from(config_path.as_path()));
        } else {
            let default_locations = vec![
                "config.toml",
                "config/config.toml",
                "/etc/nl-movies/config.toml",
            ];

            for location in default_locations {
                if Path::new(location).exists() {
                    config_builder =
                        config_builder.add_source(File::new(location, config::FileFormat::Toml));
                    break;
                }
            }
        }

        // NL_MOVIES_LLM__API_KEY -> llm.api_key
        config_builder = config_builder.add_source(
            Environment::with_prefix("NL_MOVIES")
                .prefix_separator("_")
                .separator("__"),
        );

        let mut config: AppConfig = config_builder.build()?.try_deserialize()?;

        // Override with command line args if provided
        if let Some(host) = &args.host {
            config.web.host = host.clone();
        }
        if let Some(port) = args.port {
            config.web.port = port;
        }
        if let Some(database) = &args.database {
            config.database.path = database.clone();
        }
        if let Some(backend) = &args.backend {
            config.llm.backend = backend.clone();
        }

        // The hosted Gemini API key conventionally lives in GOOGLE_API_KEY
        if config.llm.api_key.is_none() && config.llm.backend == "gemini" {
            config.llm.api_key = std::env::var("GOOGLE_API_KEY").ok();
        }

        if config.history_window == 0 {
            return Err(ConfigError::Message(
                "history_window must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: "movies.db".to_string(),
                seed: true,
            },
            web: WebConfig {
                host: "127.0.0.1".to_string(),
                port: 5001,
            },
            llm: LlmConfig {
                backend: "gemini".to_string(),
                model: "gemini-2.5-flash".to_string(),
                api_key: None,
                api_url: None,
                temperature: 0.0,
            },
            logging: LoggingConfig {
                format: "pretty".to_string(),
            },
            history_window: 5,
            schema_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write temp file");
        file
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_config(
            r#"
history_window = 3

[database]
path = "/tmp/films.db"
seed = false

[llm]
backend = "ollama"
model = "sqlcoder"
api_url = "http://localhost:11434/api/generate"
"#,
        );
        let args = CliArgs {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        let config = AppConfig::new(&args).expect("config should load");

        assert_eq!(config.database.path, "/tmp/films.db");
        assert!(!config.database.seed);
        assert_eq!(config.llm.backend, "ollama");
        assert_eq!(config.llm.model, "sqlcoder");
        assert_eq!(config.history_window, 3);
        // untouched sections keep their defaults
        assert_eq!(config.web.port, 5001);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn cli_arguments_win_over_file() {
        let file = write_config(
            r#"
[web]
host = "0.0.0.0"
port = 8080
"#,
        );
        let args = CliArgs {
            config: Some(file.path().to_path_buf()),
            port: Some(9000),
            database: Some("other.db".to_string()),
            backend: Some("remote".to_string()),
            ..Default::default()
        };

        let config = AppConfig::new(&args).expect("config should load");

        assert_eq!(config.web.host, "0.0.0.0");
        assert_eq!(config.web.port, 9000);
        assert_eq!(config.database.path, "other.db");
        assert_eq!(config.llm.backend, "remote");
    }

    #[test]
    fn zero_history_window_is_rejected() {
        let file = write_config("history_window = 0\n");
        let args = CliArgs {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        assert!(AppConfig::new(&args).is_err());
    }
}
