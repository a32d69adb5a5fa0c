//! Read operations for the `stores` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use medfind_core::{GeoPoint, StoreCandidate};

/// A row from the `stores` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoreRow {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_open: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoreRow {
    /// Convert to the engine-facing candidate view.
    ///
    /// Returns `None` when the row has no usable coordinates (missing, or
    /// out of the valid range); such stores are excluded from proximity
    /// results rather than failing the search.
    #[must_use]
    pub fn into_candidate(self) -> Option<StoreCandidate> {
        let location = GeoPoint::new(self.latitude?, self.longitude?).ok()?;
        Some(StoreCandidate {
            id: self.id,
            name: self.name,
            address: self.address,
            phone: self.phone,
            location,
            is_open: self.is_open,
        })
    }
}

/// List all stores currently marked open, ordered by id.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_open_stores(pool: &PgPool) -> Result<Vec<StoreRow>, sqlx::Error> {
    sqlx::query_as::<_, StoreRow>(
        "SELECT id, name, address, phone, latitude, longitude, is_open, \
                created_at, updated_at \
         FROM stores \
         WHERE is_open = TRUE \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

/// Fetch a single store by id. Returns `Ok(None)` when it does not exist.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn get_store(pool: &PgPool, store_id: Uuid) -> Result<Option<StoreRow>, sqlx::Error> {
    sqlx::query_as::<_, StoreRow>(
        "SELECT id, name, address, phone, latitude, longitude, is_open, \
                created_at, updated_at \
         FROM stores \
         WHERE id = $1",
    )
    .bind(store_id)
    .fetch_optional(pool)
    .await
}
