use crate::db::{QueryResult, Row, SqlExecutor};
use crate::llm::models::{ConversationTurn, SqlGenerationInput};
use crate::llm::SqlGenerator;
use crate::schema::SchemaDefinition;
use crate::sql::{validate, Rejection};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const DEFAULT_HISTORY_WINDOW: usize = 5;

/// Result of one natural-language request. Each failure variant names the stage that failed.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Success {
        sql: String,
        explanation: String,
        result: QueryResult,
    },
    GenerationFailed {
        message: String,
    },
    ValidationFailed {
        reason: Rejection,
        sql: String,
    },
    ExecutionFailed {
        message: String,
        sql: String,
        explanation: String,
    },
}

/// Wire shape of a [`QueryOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Success {
        sql: String,
        explanation: String,
        data: Vec<Row>,
        columns: Vec<String>,
        #[serde(rename = "rowCount")]
        row_count: usize,
    },
    ExecutionFailure {
        error: String,
        sql: String,
        explanation: String,
    },
    Failure {
        error: String,
    },
}

impl From<QueryOutcome> for QueryResponse {
    fn from(outcome: QueryOutcome) -> Self {
        match outcome {
            QueryOutcome::Success {
                sql,
                explanation,
                result,
            } => QueryResponse::Success {
                sql,
                explanation,
                data: result.rows,
                columns: result.columns,
                row_count: result.row_count,
            },
            QueryOutcome::GenerationFailed { message } => QueryResponse::Failure {
                error: format!("Failed to generate SQL: {}", message),
            },
            QueryOutcome::ValidationFailed { reason, .. } => QueryResponse::Failure {
                error: format!("Invalid query: {}", reason),
            },
            QueryOutcome::ExecutionFailed {
                message,
                sql,
                explanation,
            } => QueryResponse::ExecutionFailure {
                error: format!("Query execution failed: {}", message),
                sql,
                explanation,
            },
        }
    }
}

/// The most recent `window` turns, oldest first. Older turns are dropped.
pub fn recent_turns(turns: &[ConversationTurn], window: usize) -> &[ConversationTurn] {
    &turns[turns.len().saturating_sub(window)..]
}

/// Question -> generated SQL -> safety gate -> execution.
///
/// Holds no per-request state; conversation history comes in with every call.
pub struct QueryPipeline {
    schema: Arc<SchemaDefinition>,
    generator: Arc<dyn SqlGenerator>,
    executor: Arc<dyn SqlExecutor>,
    history_window: usize,
}

impl QueryPipeline {
    pub fn new(
        schema: Arc<SchemaDefinition>,
        generator: Arc<dyn SqlGenerator>,
        executor: Arc<dyn SqlExecutor>,
    ) -> Self {
        Self {
            schema,
            generator,
            executor,
            history_window: DEFAULT_HISTORY_WINDOW,
        }
    }

    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    pub async fn handle(&self, utterance: &str, prior_turns: &[ConversationTurn]) -> QueryOutcome {
        let history = recent_turns(prior_turns, self.history_window);
        debug!(
            "Handling question with {} of {} prior turns: {}",
            history.len(),
            prior_turns.len(),
            utterance
        );

        let schema_text = self.schema.describe();

        let generated = match self
            .generator
            .generate_sql(SqlGenerationInput {
                question: utterance,
                schema: &schema_text,
                history,
            })
            .await
        {
            Ok(generated) => generated,
            Err(e) => {
                error!("SQL generation failed: {}", e);
                return QueryOutcome::GenerationFailed {
                    message: e.to_string(),
                };
            }
        };
        info!("Generated SQL: {}", generated.sql);

        if let Some(reason) = validate(&generated.sql).rejection() {
            warn!("Rejected generated SQL ({}): {}", reason, generated.sql);
            return QueryOutcome::ValidationFailed {
                reason,
                sql: generated.sql,
            };
        }

        // rusqlite is blocking
        let executor = Arc::clone(&self.executor);
        let sql = generated.sql.clone();
        let executed = tokio::task::spawn_blocking(move || executor.execute(&sql)).await;

        match executed {
            Ok(Ok(result)) => {
                info!("Query returned {} rows", result.row_count);
                QueryOutcome::Success {
                    sql: generated.sql,
                    explanation: generated.explanation,
                    result,
                }
            }
            Ok(Err(e)) => QueryOutcome::ExecutionFailed {
                message: e.to_string(),
                sql: generated.sql,
                explanation: generated.explanation,
            },
            Err(join_err) => {
                error!("Query task failed: {}", join_err);
                QueryOutcome::ExecutionFailed {
                    message: format!("Database task execution failed: {}", join_err),
                    sql: generated.sql,
                    explanation: generated.explanation,
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::db::MovieStore;
    use serde_json::json;

    const TOM_HANKS_SQL: &str = "SELECT DISTINCT m.title, m.year FROM movies m JOIN cast c ON m.id=c.movie_id WHERE LOWER(c.person_name) LIKE '%tom hanks%' AND c.role_type='Actor'";

    fn schema() -> Arc<SchemaDefinition> {
        Arc::new(SchemaDefinition::movies().unwrap())
    }

    fn pipeline(generator: Arc<StubGenerator>, executor: Arc<CountingExecutor>) -> QueryPipeline {
        QueryPipeline::new(schema(), generator, executor)
    }

    fn history(n: usize) -> Vec<ConversationTurn> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    ConversationTurn::user(format!("question {}", i))
                } else {
                    ConversationTurn::assistant(format!("SELECT {}", i), format!("answer {}", i))
                }
            })
            .collect()
    }

    #[test]
    fn recent_turns_keeps_the_tail() {
        let turns = history(8);
        assert_eq!(recent_turns(&turns, 5), &turns[3..]);
        assert_eq!(recent_turns(&turns[..2], 5), &turns[..2]);
        assert!(recent_turns(&[], 5).is_empty());
    }

    #[tokio::test]
    async fn provider_sees_only_the_last_five_turns() {
        let generator = Arc::new(StubGenerator::returning("SELECT 1", "one"));
        let executor = Arc::new(CountingExecutor::returning(empty_result()));
        let pipeline = pipeline(generator.clone(), executor);

        let turns = history(8);
        pipeline.handle("and now?", &turns).await;

        let seen = generator.seen_history.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].len(), 5);
        assert_eq!(seen[0].as_slice(), &turns[3..]);
    }

    #[tokio::test]
    async fn history_window_is_configurable() {
        let generator = Arc::new(StubGenerator::returning("SELECT 1", "one"));
        let executor = Arc::new(CountingExecutor::returning(empty_result()));
        let pipeline = pipeline(generator.clone(), executor).with_history_window(2);

        pipeline.handle("q", &history(8)).await;

        assert_eq!(generator.seen_history.lock().unwrap()[0].len(), 2);
    }

    #[tokio::test]
    async fn provider_receives_rendered_schema() {
        let generator = Arc::new(StubGenerator::returning("SELECT 1", "one"));
        let executor = Arc::new(CountingExecutor::returning(empty_result()));
        let pipeline = pipeline(generator.clone(), executor);

        pipeline.handle("q", &[]).await;

        let seen = generator.seen_schema.lock().unwrap();
        assert_eq!(seen[0], schema().describe());
    }

    #[tokio::test]
    async fn rejected_sql_is_never_executed() {
        let generator = Arc::new(StubGenerator::returning(
            "SELECT * FROM movies; DROP TABLE movies",
            "oops",
        ));
        let executor = Arc::new(CountingExecutor::returning(empty_result()));
        let pipeline = pipeline(generator, executor.clone());

        let outcome = pipeline.handle("delete everything", &[]).await;

        assert_eq!(executor.call_count(), 0);
        assert_eq!(
            outcome,
            QueryOutcome::ValidationFailed {
                reason: Rejection::ForbiddenKeyword("DROP"),
                sql: "SELECT * FROM movies; DROP TABLE movies".to_string(),
            }
        );
        assert_eq!(
            serde_json::to_value(QueryResponse::from(outcome)).unwrap(),
            json!({"error": "Invalid query: Query contains forbidden keyword: DROP"})
        );
    }

    #[tokio::test]
    async fn non_select_is_rejected_before_execution() {
        let generator = Arc::new(StubGenerator::returning("UPDATE movies SET year=0", ""));
        let executor = Arc::new(CountingExecutor::returning(empty_result()));
        let pipeline = pipeline(generator, executor.clone());

        let outcome = pipeline.handle("reset years", &[]).await;

        assert_eq!(executor.call_count(), 0);
        assert_eq!(
            serde_json::to_value(QueryResponse::from(outcome)).unwrap(),
            json!({"error": "Invalid query: Only SELECT queries are allowed"})
        );
    }

    #[tokio::test]
    async fn generation_failure_skips_gate_and_executor() {
        let generator = Arc::new(StubGenerator::failing("quota exceeded"));
        let executor = Arc::new(CountingExecutor::returning(empty_result()));
        let pipeline = pipeline(generator, executor.clone());

        let outcome = pipeline.handle("anything", &[]).await;

        assert_eq!(executor.call_count(), 0);
        assert_eq!(
            serde_json::to_value(QueryResponse::from(outcome)).unwrap(),
            json!({"error": "Failed to generate SQL: LLM connection error: quota exceeded"})
        );
    }

    #[tokio::test]
    async fn execution_failure_keeps_sql_and_explanation() {
        let generator = Arc::new(StubGenerator::returning(
            "SELECT nonexistent_col FROM movies",
            "Reads a column",
        ));
        let executor = Arc::new(CountingExecutor::failing("no such column: nonexistent_col"));
        let pipeline = pipeline(generator, executor.clone());

        let outcome = pipeline.handle("q", &[]).await;

        assert_eq!(executor.call_count(), 1);
        assert_eq!(
            serde_json::to_value(QueryResponse::from(outcome)).unwrap(),
            json!({
                "error": "Query execution failed: no such column: nonexistent_col",
                "sql": "SELECT nonexistent_col FROM movies",
                "explanation": "Reads a column"
            })
        );
    }

    #[tokio::test]
    async fn tom_hanks_question_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let store = MovieStore::open(dir.path().join("movies.db")).unwrap();
        store.bootstrap(true).unwrap();

        let generator = Arc::new(StubGenerator::returning(
            TOM_HANKS_SQL,
            "Finds movies where Tom Hanks is credited as an actor",
        ));
        let pipeline = QueryPipeline::new(schema(), generator, Arc::new(store));

        let outcome = pipeline.handle("Which movies did Tom Hanks act in", &[]).await;
        let response = serde_json::to_value(QueryResponse::from(outcome)).unwrap();

        assert_eq!(response["rowCount"], 2);
        assert_eq!(response["sql"], TOM_HANKS_SQL);
        assert_eq!(response["columns"], json!(["title", "year"]));

        let titles: Vec<&str> = response["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["title"].as_str().unwrap())
            .collect();
        assert!(titles.contains(&"Forrest Gump"));
        assert!(titles.contains(&"Saving Private Ryan"));
    }

    #[tokio::test]
    async fn stacked_selects_pass_the_gate_but_fail_execution() {
        let dir = tempfile::tempdir().unwrap();
        let store = MovieStore::open(dir.path().join("movies.db")).unwrap();
        store.bootstrap(true).unwrap();

        let stacked = "SELECT title FROM movies; SELECT year FROM movies";
        let generator = Arc::new(StubGenerator::returning(stacked, "Two lists"));
        let pipeline = QueryPipeline::new(schema(), generator, Arc::new(store));

        let outcome = pipeline.handle("titles and years", &[]).await;

        assert_eq!(
            serde_json::to_value(QueryResponse::from(outcome)).unwrap(),
            json!({
                "error": "Query execution failed: You can only execute one statement at a time.",
                "sql": stacked,
                "explanation": "Two lists"
            })
        );
    }

    #[tokio::test]
    async fn unknown_column_against_real_store_is_an_execution_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = MovieStore::open(dir.path().join("movies.db")).unwrap();
        store.bootstrap(true).unwrap();

        let generator = Arc::new(StubGenerator::returning(
            "SELECT nonexistent_col FROM movies",
            "",
        ));
        let pipeline = QueryPipeline::new(schema(), generator, Arc::new(store));

        match pipeline.handle("q", &[]).await {
            QueryOutcome::ExecutionFailed { message, sql, .. } => {
                assert!(message.contains("nonexistent_col"));
                assert_eq!(sql, "SELECT nonexistent_col FROM movies");
            }
            other => panic!("expected execution failure, got {:?}", other),
        }
    }
}
