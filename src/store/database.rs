use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::str::FromStr;
use std::time::Duration;

use crate::engine::locality::LocalityRent;
use crate::models::{GroceryItem, InflationRecord, RentalListing, TransportRoute, UserProfile};

/// SQL form of `engine::locality::matches_locality`: case-sensitive substring.
///
/// `LIKE` is case-insensitive in SQLite, so `instr` is used instead. Binds one
/// parameter.
fn locality_match(column: &str) -> String {
    format!("instr({}, ?) > 0", column)
}

#[derive(Debug, FromRow)]
struct ProfileRow {
    name: String,
    income: f64,
    family_size: i64,
    preferred_locale: String,
    commute_distance: f64,
}

#[derive(Debug, FromRow)]
struct ListingRow {
    id: i64,
    locality: String,
    rent: f64,
    bedrooms: i64,
    sqft: i64,
    classification: String,
    distance: f64,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl TryFrom<ListingRow> for RentalListing {
    type Error = anyhow::Error;

    fn try_from(row: ListingRow) -> Result<Self> {
        Ok(RentalListing {
            id: row.id,
            locality: row.locality,
            rent: row.rent,
            bedrooms: u32::try_from(row.bedrooms).context("bedrooms out of range")?,
            sqft: u32::try_from(row.sqft).context("sqft out of range")?,
            classification: row.classification.parse()?,
            distance: row.distance,
            lat: row.lat,
            lon: row.lon,
        })
    }
}

#[derive(Debug, FromRow)]
struct InflationRow {
    month: String,
    category: String,
    rate: f64,
}

/// Listing position relative to the town centre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct NearbyListing {
    pub locality: String,
    #[sqlx(rename = "distance")]
    pub distance_km: f64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Row counts per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCounts {
    pub listings: u64,
    pub groceries: u64,
    pub routes: u64,
    pub inflation: u64,
}

/// Storage handle
///
/// Manages the SQLite pool and every query the services need.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database and run migrations
    ///
    /// # Arguments
    ///
    /// * `database_url` - e.g. `sqlite:./data/rent-analyzer.db` or `sqlite::memory:`
    /// * `max_connections` - pool size for file databases
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let in_memory = database_url.contains(":memory:");

        let mut options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true);

        let pool_options = if in_memory {
            // Every connection to :memory: is its own database, so keep exactly one alive
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            if let Some(parent) = options.get_filename().parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create database directory {}", parent.display())
                    })?;
                }
            }
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(Duration::from_secs(30));
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        Self::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::debug!("Database migrations completed");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Profile
    // ------------------------------------------------------------------

    pub async fn get_profile(&self) -> Result<Option<UserProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT name, income, family_size, preferred_locale, commute_distance
             FROM users
             WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .context("Failed to load user profile")?;

        row.map(|row| {
            Ok(UserProfile {
                name: row.name,
                income: row.income,
                family_size: u32::try_from(row.family_size).context("family size out of range")?,
                preferred_locale: row.preferred_locale,
                commute_distance: row.commute_distance,
            })
        })
        .transpose()
    }

    /// Create or replace the profile.
    ///
    /// Concurrent writers are not merged: whichever upsert commits last wins.
    pub async fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (id, name, income, family_size, preferred_locale, commute_distance, updated_at)
             VALUES (1, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                income = excluded.income,
                family_size = excluded.family_size,
                preferred_locale = excluded.preferred_locale,
                commute_distance = excluded.commute_distance,
                updated_at = excluded.updated_at",
        )
        .bind(&profile.name)
        .bind(profile.income)
        .bind(i64::from(profile.family_size))
        .bind(&profile.preferred_locale)
        .bind(profile.commute_distance)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save user profile")?;

        Ok(())
    }

    // ------------------------------------------------------------------
    // Rental listings
    // ------------------------------------------------------------------

    /// All listings, cheapest first
    pub async fn list_listings(&self) -> Result<Vec<RentalListing>> {
        let rows = sqlx::query_as::<_, ListingRow>(
            "SELECT id, locality, rent, bedrooms, sqft, classification, distance, lat, lon
             FROM rental_listings
             ORDER BY rent ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to load rental listings")?;

        rows.into_iter().map(RentalListing::try_from).collect()
    }

    /// Average rent over listings matching `locality`; `None` when nothing matches
    pub async fn average_rent_matching(&self, locality: &str) -> Result<Option<f64>> {
        let sql = format!(
            "SELECT AVG(rent) FROM rental_listings WHERE {}",
            locality_match("locality")
        );
        let avg: Option<f64> = sqlx::query_scalar(&sql)
            .bind(locality)
            .fetch_one(&self.pool)
            .await
            .context("Failed to average rent")?;

        Ok(avg)
    }

    /// Average rent and listing count per distinct locality, cheapest first
    pub async fn locality_rents(&self) -> Result<Vec<LocalityRent>> {
        let rows = sqlx::query_as::<_, (String, f64, i64)>(
            "SELECT locality, AVG(rent) AS avg_rent, COUNT(*) AS count
             FROM rental_listings
             GROUP BY locality
             ORDER BY avg_rent ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to aggregate rents by locality")?;

        Ok(rows
            .into_iter()
            .map(|(locality, avg_rent, count)| LocalityRent {
                locality,
                avg_rent,
                count: count.max(0) as u64,
            })
            .collect())
    }

    /// Closest listings outside `center` (exact name comparison)
    pub async fn nearby_listings(&self, center: &str, limit: u32) -> Result<Vec<NearbyListing>> {
        let rows = sqlx::query_as::<_, NearbyListing>(
            "SELECT locality, distance, lat, lon
             FROM rental_listings
             WHERE locality != ?
             ORDER BY distance ASC
             LIMIT ?",
        )
        .bind(center)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .context("Failed to search nearby listings")?;

        Ok(rows)
    }

    pub async fn insert_listings(&self, listings: &[RentalListing]) -> Result<()> {
        if listings.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for listing in listings {
            sqlx::query(
                "INSERT INTO rental_listings (locality, rent, bedrooms, sqft, classification, distance, lat, lon)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&listing.locality)
            .bind(listing.rent)
            .bind(i64::from(listing.bedrooms))
            .bind(i64::from(listing.sqft))
            .bind(listing.classification.as_str())
            .bind(listing.distance)
            .bind(listing.lat)
            .bind(listing.lon)
            .execute(&mut *tx)
            .await
            .context("Failed to insert rental listing")?;
        }
        tx.commit().await?;

        Ok(())
    }

    // ------------------------------------------------------------------
    // Groceries
    // ------------------------------------------------------------------

    /// Grocery items, most expensive first
    pub async fn grocery_items(&self) -> Result<Vec<GroceryItem>> {
        let rows = sqlx::query_as::<_, (String, f64, String)>(
            "SELECT item, price, source FROM groceries ORDER BY price DESC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to load grocery items")?;

        Ok(rows
            .into_iter()
            .map(|(item, price, source)| GroceryItem {
                item,
                price,
                source,
            })
            .collect())
    }

    pub async fn insert_groceries(&self, items: &[GroceryItem]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for item in items {
            sqlx::query("INSERT INTO groceries (item, price, source) VALUES (?, ?, ?)")
                .bind(&item.item)
                .bind(item.price)
                .bind(&item.source)
                .execute(&mut *tx)
                .await
                .context("Failed to insert grocery item")?;
        }
        tx.commit().await?;

        Ok(())
    }

    // ------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------

    /// Routes leaving any locality matching `origin`, shortest first
    pub async fn routes_from(&self, origin: &str) -> Result<Vec<TransportRoute>> {
        let sql = format!(
            "SELECT id, from_locality, to_locality, distance, fare
             FROM transport_routes
             WHERE {}
             ORDER BY distance ASC, id ASC",
            locality_match("from_locality")
        );
        let rows = sqlx::query_as::<_, (i64, String, String, f64, f64)>(&sql)
            .bind(origin)
            .fetch_all(&self.pool)
            .await
            .context("Failed to load transport routes")?;

        Ok(rows
            .into_iter()
            .map(|(id, from_locality, to_locality, distance, fare)| TransportRoute {
                id,
                from_locality,
                to_locality,
                distance,
                fare,
            })
            .collect())
    }

    pub async fn insert_routes(&self, routes: &[TransportRoute]) -> Result<()> {
        if routes.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for route in routes {
            sqlx::query(
                "INSERT INTO transport_routes (from_locality, to_locality, distance, fare)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(&route.from_locality)
            .bind(&route.to_locality)
            .bind(route.distance)
            .bind(route.fare)
            .execute(&mut *tx)
            .await
            .context("Failed to insert transport route")?;
        }
        tx.commit().await?;

        Ok(())
    }

    // ------------------------------------------------------------------
    // Inflation
    // ------------------------------------------------------------------

    /// Records ordered by month descending, then category
    pub async fn inflation_records(&self) -> Result<Vec<InflationRecord>> {
        let rows = sqlx::query_as::<_, InflationRow>(
            "SELECT month, category, rate
             FROM inflation_data
             ORDER BY month DESC, category ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to load inflation data")?;

        rows.into_iter()
            .map(|row| {
                Ok(InflationRecord {
                    month: row.month,
                    category: row.category.parse()?,
                    rate: row.rate,
                })
            })
            .collect()
    }

    /// Mean `Overall` rate; `None` when there are no overall records
    pub async fn average_overall_inflation(&self) -> Result<Option<f64>> {
        let avg: Option<f64> =
            sqlx::query_scalar("SELECT AVG(rate) FROM inflation_data WHERE category = 'Overall'")
                .fetch_one(&self.pool)
                .await
                .context("Failed to average inflation")?;

        Ok(avg)
    }

    pub async fn insert_inflation(&self, records: &[InflationRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for record in records {
            sqlx::query("INSERT INTO inflation_data (month, category, rate) VALUES (?, ?, ?)")
                .bind(&record.month)
                .bind(record.category.as_str())
                .bind(record.rate)
                .execute(&mut *tx)
                .await
                .context("Failed to insert inflation record")?;
        }
        tx.commit().await?;

        Ok(())
    }

    // ------------------------------------------------------------------
    // Housekeeping
    // ------------------------------------------------------------------

    pub async fn table_counts(&self) -> Result<TableCounts> {
        let (listings, groceries, routes, inflation) = sqlx::query_as::<_, (i64, i64, i64, i64)>(
            "SELECT
                (SELECT COUNT(*) FROM rental_listings),
                (SELECT COUNT(*) FROM groceries),
                (SELECT COUNT(*) FROM transport_routes),
                (SELECT COUNT(*) FROM inflation_data)",
        )
        .fetch_one(&self.pool)
        .await
        .context("Failed to count rows")?;

        Ok(TableCounts {
            listings: listings.max(0) as u64,
            groceries: groceries.max(0) as u64,
            routes: routes.max(0) as u64,
            inflation: inflation.max(0) as u64,
        })
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
