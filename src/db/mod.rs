pub mod executor;
pub mod seed;
pub mod store;

pub use executor::{QueryResult, Row, SqlExecutor};
pub use store::MovieStore;
