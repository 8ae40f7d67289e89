use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fmt::Write as _;
use std::path::Path;

/// Schema definition of the movie database shipped with the service.
const MOVIES_SCHEMA_JSON: &str = include_str!("movies.json");

#[derive(Debug)]
pub enum SchemaError {
    IoError(std::io::Error),
    ParseError(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::IoError(err) => write!(f, "Failed to read schema file: {}", err),
            SchemaError::ParseError(msg) => write!(f, "Invalid schema definition: {}", msg),
        }
    }
}

impl Error for SchemaError {}

impl From<std::io::Error> for SchemaError {
    fn from(err: std::io::Error) -> Self {
        SchemaError::IoError(err)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Relationship {
    #[serde(rename = "from")]
    pub from_table: String,
    #[serde(rename = "to")]
    pub to_table: String,
    /// e.g. "one-to-many"
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Tables, columns and relationships of the queryable store.
///
/// Loaded once at startup and shared read-only by every request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemaDefinition {
    pub tables: Vec<TableDefinition>,
    /// `None` when the definition has no `relationships` key at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Vec<Relationship>>,
}

impl SchemaDefinition {
    /// The built-in movie database schema.
    pub fn movies() -> Result<Self, SchemaError> {
        Self::from_json(MOVIES_SCHEMA_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(json).map_err(|e| SchemaError::ParseError(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Renders the schema as the natural-language description handed to the SQL generator.
    ///
    /// Output is deterministic and follows definition order: every table with its
    /// columns, then the relationships. Degenerate input (a table without columns)
    /// renders as-is.
    pub fn describe(&self) -> String {
        let mut desc = String::from("Database Schema:\n\n");

        for table in &self.tables {
            // Writing to a String cannot fail
            let _ = writeln!(desc, "Table: {}", table.name);
            let _ = writeln!(desc, "Description: {}", table.description);
            desc.push_str("Columns:\n");

            for col in &table.columns {
                let _ = write!(
                    desc,
                    "  - {} ({}): {}",
                    col.name, col.data_type, col.description
                );
                if let Some(unit) = &col.unit {
                    let _ = write!(desc, " [Unit: {}]", unit);
                }
                if let Some(example) = &col.example {
                    let _ = write!(desc, " [Example: {}]", render_example(example));
                }
                desc.push('\n');
            }
            desc.push('\n');
        }

        if let Some(relationships) = &self.relationships {
            desc.push_str("Table Relationships:\n");
            for rel in relationships {
                let kind = rel.kind.as_deref().unwrap_or("unknown").to_uppercase();
                let _ = write!(desc, "  - {} → {} [{}]", rel.from_table, rel.to_table, kind);
                if let Some(description) = &rel.description {
                    let _ = write!(desc, ": {}", description);
                }
                desc.push('\n');
            }
            desc.push('\n');
        }

        desc
    }
}

fn render_example(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
