//! Database schema and connection helpers
//!
//! The BiteLog database holds two independently-keyed review sources
//! (saved_restaurants and reviews) plus the user profile table. Services
//! that only read (such as the community review service) connect with
//! `connect_readonly`; `init_database` creates the schema idempotently for
//! writers, tooling, and tests.

use crate::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;

pub mod models;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers while the main application writes
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_tables(&pool).await?;

    Ok(pool)
}

/// Connect to an existing database in read-only mode
///
/// Safety: Uses SQLite mode=ro so the pool cannot issue write operations.
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(crate::Error::Config(format!(
            "Database not found: {}\nRun the BiteLog application first to initialize it.",
            db_path.display()
        )));
    }

    let db_url = format!("sqlite://{}?mode=ro", db_path.display());
    let pool = SqlitePool::connect(&db_url).await?;

    Ok(pool)
}

/// Create all tables (idempotent - safe to call multiple times)
pub async fn create_tables(pool: &SqlitePool) -> Result<()> {
    create_saved_restaurants_table(pool).await?;
    create_reviews_table(pool).await?;
    create_users_table(pool).await?;
    Ok(())
}

/// Restaurants saved directly by users, with an optional rating.
/// Bookmark-only entries (is_bookmark = 1, no rating) are wishlist rows
/// and never contribute to community statistics.
async fn create_saved_restaurants_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS saved_restaurants (
            guid TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            place_id TEXT,
            name TEXT NOT NULL,
            rating REAL,
            is_bookmark INTEGER NOT NULL DEFAULT 0,
            photos TEXT NOT NULL DEFAULT '[]',
            photo_captions TEXT NOT NULL DEFAULT '[]',
            photo_dish_names TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_saved_restaurants_place_id
         ON saved_restaurants(place_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Free-text reviews, keyed by the same loose platform identifier as
/// saved_restaurants but stored independently.
async fn create_reviews_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS reviews (
            guid TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            place_id TEXT NOT NULL,
            restaurant_name TEXT NOT NULL,
            rating REAL NOT NULL,
            body TEXT NOT NULL DEFAULT '',
            photos TEXT NOT NULL DEFAULT '[]',
            photo_captions TEXT NOT NULL DEFAULT '[]',
            photo_dish_names TEXT NOT NULL DEFAULT '[]',
            helpful_count INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_reviews_place_id ON reviews(place_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            guid TEXT PRIMARY KEY,
            display_name TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
