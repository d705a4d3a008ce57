//! SQLite storage for profiles and the seeded reference data
//!
//! This module provides:
//! - Connection pooling with embedded migrations
//! - The query surface the cost engine reads from
//! - First-run seeding of empty tables

mod database;
pub mod seed;

pub use database::{NearbyListing, SqliteStore, TableCounts};
pub use seed::{seed_if_empty, SeedReport};
