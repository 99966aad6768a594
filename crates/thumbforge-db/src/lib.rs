//! Thumbforge-DB: Database schema, migrations, and query operations
//!
//! This crate provides database functionality for thumbforge using SQLite
//! with rusqlite and r2d2 connection pooling.
//!
//! # Modules
//!
//! - `migrations` - Database schema migrations
//! - `pool` - Connection pool management
//! - `models` - Rust models matching database schema
//! - `queries` - Database query operations
//!
//! # Example
//!
//! ```no_run
//! use thumbforge_db::pool::{init_pool, get_conn};
//! use thumbforge_db::queries::images;
//!
//! let pool = init_pool("/var/lib/thumbforge/thumbforge.db").unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! let id = images::insert_image(&conn, b"\xFF\xD8\xFF...").unwrap();
//! println!("Stored image {}", id);
//! ```

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
