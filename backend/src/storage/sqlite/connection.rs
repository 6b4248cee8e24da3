//! SQLite connection management.
//!
//! `DbConnection` owns the pool, creates the database when it is
//! missing and sets up the schema. All columns are TEXT/INTEGER/REAL;
//! timestamps are RFC 3339 strings and civil dates are `YYYY-MM-DD`,
//! parsed back at the repository layer.

use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;

// Default database URL; overridden with PLANNER_DATABASE_URL.
const DATABASE_URL: &str = "sqlite:pocket_planner.db";

// One statement per entry: SQLite prepares statements one at a time.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        title TEXT NOT NULL,
        description TEXT,
        status TEXT NOT NULL,
        priority TEXT NOT NULL,
        deadline TEXT,
        progress INTEGER NOT NULL,
        week_start_date TEXT,
        tags TEXT,
        color TEXT,
        subtasks TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        completed_at TEXT
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_tasks_user ON tasks(user_id);",
    r#"
    CREATE TABLE IF NOT EXISTS reminders (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        title TEXT NOT NULL,
        kind TEXT NOT NULL,
        amount REAL,
        category_id TEXT,
        wallet_id TEXT,
        icon TEXT,
        reminder_date TEXT NOT NULL,
        reminder_time TEXT,
        repeat_rule TEXT NOT NULL,
        status TEXT NOT NULL,
        notes TEXT,
        color TEXT,
        notification_enabled INTEGER NOT NULL,
        is_active INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_reminders_user ON reminders(user_id);",
    r#"
    CREATE TABLE IF NOT EXISTS wallets (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        name TEXT NOT NULL,
        currency TEXT NOT NULL,
        icon TEXT,
        color TEXT,
        created_at TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        name TEXT NOT NULL,
        kind TEXT NOT NULL,
        icon TEXT,
        color TEXT,
        created_at TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS preferences (
        user_id TEXT NOT NULL,
        key TEXT NOT NULL,
        value TEXT NOT NULL,
        PRIMARY KEY (user_id, key)
    );
    "#,
];

#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection, creating the database and its
    /// schema when needed.
    pub async fn new(url: &str) -> Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?;
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize the standard database.
    pub async fn init() -> Result<Self> {
        let url =
            std::env::var("PLANNER_DATABASE_URL").unwrap_or_else(|_| DATABASE_URL.to_string());
        Self::new(&url).await
    }

    /// Initialize a uniquely named in-memory database for tests.
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);
        Self::new(&db_url).await
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(pool).await?;
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
