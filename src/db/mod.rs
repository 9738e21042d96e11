pub mod pagination;
pub mod queries;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub use pagination::{Page, PageRequest, QUESTIONS_PER_PAGE};
pub use queries::categories::Category;
pub use queries::questions::{NewQuestion, Question};

use sqlx::Error;

const IN_MEMORY: &str = ":memory:";

/// Opens a pool for the SQLite database at `path`, creating the file when missing.
///
/// `:memory:` gives a single-connection pool, since every SQLite connection
/// would otherwise see its own empty in-memory database.
pub async fn establish_connection(path: &str) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?.foreign_keys(true);
    if path == IN_MEMORY {
        return SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await;
    }
    SqlitePool::connect_with(options.create_if_missing(true)).await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
