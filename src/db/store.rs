use crate::db::executor::{run_query, ExecutionError, QueryResult, SqlExecutor};
use crate::db::seed;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, error, info};

#[derive(Debug)]
pub enum StoreError {
    OpenError(String),
    BootstrapError(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::OpenError(msg) => write!(f, "Failed to open movie database: {}", msg),
            StoreError::BootstrapError(msg) => {
                write!(f, "Failed to initialize movie database: {}", msg)
            }
        }
    }
}

impl Error for StoreError {}

/// Row counts after bootstrapping the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub movies: i64,
    pub box_office: i64,
    pub ratings: i64,
    pub cast: i64,
}

/// Handle to the SQLite movie database.
///
/// Created once at startup and shared by every request. Each call to
/// [`SqlExecutor::execute`] opens its own connection and closes it before
/// returning, so concurrent queries never share a connection.
#[derive(Debug, Clone)]
pub struct MovieStore {
    path: PathBuf,
}

impl MovieStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self { path: path.into() };

        // Surface an unusable path at startup
        let conn = store
            .connect()
            .map_err(|e| StoreError::OpenError(format!("{}: {}", store.path.display(), e)))?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map_err(|e| StoreError::OpenError(e.to_string()))?;

        Ok(store)
    }

    fn connect(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        Ok(conn)
    }

    /// Creates the movie tables if missing and loads the reference data into an empty store.
    pub fn bootstrap(&self, seed_data: bool) -> Result<StoreStats, StoreError> {
        let mut conn = self
            .connect()
            .map_err(|e| StoreError::OpenError(e.to_string()))?;

        conn.execute_batch(seed::CREATE_TABLES_SQL)
            .map_err(|e| StoreError::BootstrapError(format!("Failed to create tables: {}", e)))?;

        let existing: i64 = conn
            .query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))
            .map_err(|e| StoreError::BootstrapError(e.to_string()))?;

        if existing == 0 && seed_data {
            insert_reference_data(&mut conn)
                .map_err(|e| StoreError::BootstrapError(format!("Failed to seed data: {}", e)))?;
        } else if existing > 0 {
            info!("Database already contains {} movies", existing);
        }

        let stats = count_rows(&conn).map_err(|e| StoreError::BootstrapError(e.to_string()))?;
        info!(
            "Movie database ready: {} movies, {} box office records, {} rating records, {} cast members",
            stats.movies, stats.box_office, stats.ratings, stats.cast
        );
        Ok(stats)
    }
}

impl SqlExecutor for MovieStore {
    fn execute(&self, sql: &str) -> Result<QueryResult, ExecutionError> {
        debug!("Executing SQL against {}: {}", self.path.display(), sql);

        let conn = self.connect().map_err(|e| {
            error!("Failed to open database at {}: {}", self.path.display(), e);
            ExecutionError::from(e)
        })?;

        let result = run_query(&conn, sql);
        drop(conn);

        match &result {
            Ok(res) => debug!("Query returned {} rows", res.row_count),
            Err(e) => error!("Query execution failed: {}", e),
        }
        result
    }
}

fn insert_reference_data(conn: &mut Connection) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO movies (title, year, genre, director, runtime, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for movie in &seed::MOVIES {
            stmt.execute(params![
                movie.title,
                movie.year,
                movie.genre,
                movie.director,
                movie.runtime,
                movie.description
            ])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO box_office (movie_id, domestic_revenue, international_revenue, total_revenue, budget, opening_weekend)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for (movie_id, domestic, international, total, budget, opening) in seed::BOX_OFFICE {
            stmt.execute(params![movie_id, domestic, international, total, budget, opening])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO ratings (movie_id, imdb_rating, rotten_tomatoes, metacritic, audience_score)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for (movie_id, imdb, tomatoes, metacritic, audience) in seed::RATINGS {
            stmt.execute(params![movie_id, imdb, tomatoes, metacritic, audience])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO cast (movie_id, person_name, role_type, character_name)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for (movie_id, person, role, character) in seed::CAST {
            stmt.execute(params![movie_id, person, role, character])?;
        }
    }
    tx.commit()
}

fn count_rows(conn: &Connection) -> rusqlite::Result<StoreStats> {
    let count = |table: &str| -> rusqlite::Result<i64> {
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
    };

    Ok(StoreStats {
        movies: count("movies")?,
        box_office: count("box_office")?,
        ratings: count("ratings")?,
        cast: count("cast")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seeded_store() -> (TempDir, MovieStore) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = MovieStore::open(dir.path().join("movies.db")).expect("store should open");
        store.bootstrap(true).expect("bootstrap should succeed");
        (dir, store)
    }

    #[test]
    fn bootstrap_seeds_reference_data_once() {
        let (_dir, store) = seeded_store();

        let again = store.bootstrap(true).unwrap();
        assert_eq!(
            again,
            StoreStats {
                movies: 15,
                box_office: 15,
                ratings: 15,
                cast: 60
            }
        );
    }

    #[test]
    fn bootstrap_without_seed_leaves_tables_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = MovieStore::open(dir.path().join("empty.db")).unwrap();

        let stats = store.bootstrap(false).unwrap();
        assert_eq!(stats.movies, 0);
        assert_eq!(stats.cast, 0);
    }

    #[test]
    fn row_count_matches_predicate() {
        let (_dir, store) = seeded_store();

        let result = store
            .execute("SELECT title, year FROM movies WHERE genre = 'Sci-Fi' ORDER BY year")
            .unwrap();

        assert_eq!(result.columns, vec!["title", "year"]);
        assert_eq!(result.row_count, 3);
        let titles: Vec<&str> = result
            .rows
            .iter()
            .map(|r| r["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["The Matrix", "Inception", "Interstellar"]);
    }

    #[test]
    fn join_on_cast_table_finds_tom_hanks_movies() {
        let (_dir, store) = seeded_store();

        let result = store
            .execute(
                "SELECT DISTINCT m.title, m.year FROM movies m JOIN cast c ON m.id=c.movie_id \
                 WHERE LOWER(c.person_name) LIKE '%tom hanks%' AND c.role_type='Actor' \
                 ORDER BY m.year",
            )
            .unwrap();

        assert_eq!(result.row_count, 2);
        assert_eq!(result.rows[0]["title"], "Forrest Gump");
        assert_eq!(result.rows[0]["year"], 1994);
        assert_eq!(result.rows[1]["title"], "Saving Private Ryan");
    }

    #[test]
    fn aliased_aggregates_keep_engine_column_names() {
        let (_dir, store) = seeded_store();

        let result = store
            .execute("SELECT genre, COUNT(*) as count FROM movies GROUP BY genre ORDER BY count DESC, genre")
            .unwrap();

        assert_eq!(result.columns, vec!["genre", "count"]);
        assert_eq!(result.rows[0]["genre"], "Action");
        assert_eq!(result.rows[0]["count"], 3);
    }

    #[test]
    fn unknown_column_is_reported_not_raised() {
        let (_dir, store) = seeded_store();

        let err = store
            .execute("SELECT nonexistent_col FROM movies")
            .unwrap_err();
        assert!(err.to_string().contains("no such column"), "got: {}", err);

        // The store stays usable after a failed query
        assert!(store.execute("SELECT COUNT(*) FROM movies").is_ok());
    }

    #[test]
    fn unknown_table_is_reported_not_raised() {
        let (_dir, store) = seeded_store();

        let err = store.execute("SELECT * FROM directors").unwrap_err();
        assert!(err.to_string().contains("no such table"), "got: {}", err);
    }

    #[test]
    fn stacked_statements_are_refused() {
        let (_dir, store) = seeded_store();

        let err = store.execute("SELECT 1 AS a; SELECT 2 AS b").unwrap_err();
        assert_eq!(err.to_string(), "You can only execute one statement at a time.");

        let result = store.execute("SELECT title FROM movies;").unwrap();
        assert_eq!(result.row_count, 15);
    }

    #[test]
    fn open_fails_for_unusable_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir").join("movies.db");

        assert!(matches!(
            MovieStore::open(missing),
            Err(StoreError::OpenError(_))
        ));
    }
}
