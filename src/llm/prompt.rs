use crate::llm::models::{ConversationTurn, SqlGenerationOutput};
use crate::llm::LlmError;
use minijinja::{context, Environment};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

const SYSTEM_TEMPLATE: &str = r#"You are a SQLite expert. Convert natural language to SQL queries.

## Schema:
{{ schema }}
{{ conversation }}
## Rules:
1. Generate ONLY SELECT queries (no INSERT, UPDATE, DELETE, DROP)
2. Use exact column names from schema
3. Use table aliases: m (movies), b (box_office), r (ratings), c (cast)
4. Text search: Use LIKE with '%' wildcards and LOWER() for case-insensitive matching
5. Use DISTINCT with cast table queries
6. ORDER BY meaningfully (rating DESC, revenue DESC, year DESC)
7. Default LIMIT 10 for "top" queries
8. IMPORTANT: All revenue and budget columns are in MILLIONS (USD)
   - When users ask "over 500 million", use: WHERE total_revenue > 500
   - When users ask "over 1 billion", use: WHERE total_revenue > 1000

## Examples:
{% for example in examples %}
Q: "{{ example[0] }}"
A: {{ example[1] }}
{% endfor %}
## Output format:
Respond with a single JSON object and nothing else:
```json
{"sql": "<the SQL query string>", "explanation": "<brief explanation of what the query does>"}
```"#;

const EXAMPLES: [(&str, &str); 10] = [
    ("Show all movies", "SELECT * FROM movies ORDER BY year DESC LIMIT 10"),
    (
        "Top rated movies",
        "SELECT m.title, m.year, r.imdb_rating FROM movies m JOIN ratings r ON m.id = r.movie_id ORDER BY r.imdb_rating DESC LIMIT 10",
    ),
    (
        "Movies that made over 500 million",
        "SELECT m.title, m.year, b.total_revenue FROM movies m JOIN box_office b ON m.id = b.movie_id WHERE b.total_revenue > 500 ORDER BY b.total_revenue DESC",
    ),
    (
        "Movies that made over 1 billion",
        "SELECT m.title, m.year, b.total_revenue FROM movies m JOIN box_office b ON m.id = b.movie_id WHERE b.total_revenue > 1000 ORDER BY b.total_revenue DESC",
    ),
    (
        "Which movies did Tom Hanks act in",
        "SELECT DISTINCT m.title, m.year FROM movies m JOIN cast c ON m.id = c.movie_id WHERE LOWER(c.person_name) LIKE '%tom hanks%' AND c.role_type = 'Actor' ORDER BY m.year DESC",
    ),
    (
        "Movies directed by Christopher Nolan",
        "SELECT DISTINCT m.title, m.year FROM movies m JOIN cast c ON m.id = c.movie_id WHERE LOWER(c.person_name) LIKE '%nolan%' AND c.role_type = 'Director' ORDER BY m.year DESC",
    ),
    (
        "Movies with box office over 500 million and ratings above 8.5",
        "SELECT m.title, m.year, b.total_revenue, r.imdb_rating FROM movies m JOIN box_office b ON m.id = b.movie_id JOIN ratings r ON m.id = r.movie_id WHERE b.total_revenue > 500 AND r.imdb_rating > 8.5 ORDER BY b.total_revenue DESC",
    ),
    (
        "Count movies by genre",
        "SELECT genre, COUNT(*) as count FROM movies GROUP BY genre ORDER BY count DESC",
    ),
    (
        "Most profitable movies",
        "SELECT m.title, m.year, (b.total_revenue - b.budget) as profit FROM movies m JOIN box_office b ON m.id = b.movie_id WHERE b.budget IS NOT NULL ORDER BY profit DESC LIMIT 10",
    ),
    (
        "Movies with best return on investment",
        "SELECT m.title, m.year, b.budget, b.total_revenue, ROUND(((b.total_revenue - b.budget) / b.budget * 100), 2) as roi_percent FROM movies m JOIN box_office b ON m.id = b.movie_id WHERE b.budget > 0 ORDER BY roi_percent DESC LIMIT 10",
    ),
];

static JSON_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("JSON block pattern is valid")
});

/// Renders the system prompt sent alongside each question.
pub struct PromptBuilder {
    env: Environment<'static>,
}

impl PromptBuilder {
    pub fn new() -> Result<Self, LlmError> {
        let mut env = Environment::new();
        env.add_template("system", SYSTEM_TEMPLATE)
            .map_err(|e| LlmError::ConfigError(format!("Invalid prompt template: {}", e)))?;
        Ok(Self { env })
    }

    pub fn system_prompt(&self, schema: &str, history: &[ConversationTurn]) -> Result<String, LlmError> {
        let template = self
            .env
            .get_template("system")
            .map_err(|e| LlmError::ConfigError(e.to_string()))?;

        let prompt = template
            .render(context! {
                schema => schema,
                conversation => render_history(history),
                examples => EXAMPLES.to_vec(),
            })
            .map_err(|e| LlmError::ConfigError(format!("Failed to render prompt: {}", e)))?;

        debug!("Prepared LLM prompt: {}", prompt);
        Ok(prompt)
    }
}

/// Formats prior turns as a "Previous Conversation" block, or nothing when empty.
pub fn render_history(history: &[ConversationTurn]) -> String {
    if history.is_empty() {
        return String::new();
    }

    let mut context = String::from("\n## Previous Conversation:\n");
    for turn in history {
        match turn {
            ConversationTurn::User { content } => {
                context.push_str(&format!("\nUser: {}", content));
            }
            ConversationTurn::Assistant {
                sql, explanation, ..
            } => {
                context.push_str(&format!(
                    "\nAssistant SQL: {}",
                    sql.as_deref().unwrap_or_default()
                ));
                context.push_str(&format!(
                    "\nAssistant Explanation: {}\n",
                    explanation.as_deref().unwrap_or_default()
                ));
            }
        }
    }
    context.push('\n');
    context
}

/// Extracts `{sql, explanation}` from a model reply.
///
/// Tries a fenced JSON block, then the outermost `{...}` span, then falls back to
/// treating the reply as bare SQL with no explanation.
pub fn parse_generation(content: &str) -> Result<SqlGenerationOutput, LlmError> {
    let parsed = JSON_BLOCK
        .captures(content)
        .and_then(|caps| caps.get(1))
        .and_then(|m| serde_json::from_str::<SqlGenerationOutput>(m.as_str()).ok())
        .or_else(|| {
            let start = content.find('{')?;
            let end = content.rfind('}')?;
            if end <= start {
                return None;
            }
            serde_json::from_str::<SqlGenerationOutput>(&content[start..=end]).ok()
        });

    let output = match parsed {
        Some(output) => output,
        None => {
            info!("Model reply was not JSON, extracting SQL from text");
            SqlGenerationOutput {
                sql: extract_sql(content),
                explanation: String::new(),
            }
        }
    };

    let sql = output.sql.trim().trim_matches('`').trim().to_string();
    if sql.is_empty() {
        return Err(LlmError::ResponseError(
            "Failed to extract valid SQL from response".to_string(),
        ));
    }

    Ok(SqlGenerationOutput {
        sql,
        explanation: output.explanation.trim().to_string(),
    })
}

fn extract_sql(content: &str) -> String {
    // ```sql ... ``` first, then a bare ``` ... ``` block
    if let Some(start) = content.find("```sql") {
        let after = &content[start + 6..];
        if let Some(end) = after.find("```") {
            return after[..end].trim().to_string();
        }
    }

    if let Some(start) = content.find("```") {
        let after = &content[start + 3..];
        if let Some(end) = after.find("```") {
            return after[..end].trim().to_string();
        }
    }

    // Otherwise collect from the first line that looks like a statement
    let lines: Vec<&str> = content.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        let upper = line.trim().to_uppercase();
        if upper.starts_with("SELECT") || upper.starts_with("WITH") {
            let mut sql = line.trim().to_string();
            for next in &lines[i + 1..] {
                let next = next.trim();
                if next.is_empty() || next.starts_with("```") {
                    break;
                }
                sql.push(' ');
                sql.push_str(next);
                if next.ends_with(';') {
                    break;
                }
            }
            return sql;
        }
    }

    content.trim().to_string()
}
