//! Read operations for the `medicines` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use medfind_core::{GeoPoint, MedicineCandidate, StoreCandidate};

/// A row from the `medicines` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MedicineRow {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub generic_name: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub min_stock_alert: i32,
    pub is_available: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One medicine joined with its store, as returned by the candidate query.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MedicineCandidateRow {
    pub id: Uuid,
    pub name: String,
    pub generic_name: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub image_url: Option<String>,
    pub store_id: Uuid,
    pub store_name: String,
    pub store_address: String,
    pub store_phone: String,
    pub store_latitude: Option<f64>,
    pub store_longitude: Option<f64>,
    pub store_is_open: bool,
}

impl From<MedicineCandidateRow> for MedicineCandidate {
    fn from(row: MedicineCandidateRow) -> Self {
        // A store with missing or unusable coordinates resolves to None and
        // is skipped by the engine.
        let store = match (row.store_latitude, row.store_longitude) {
            (Some(lat), Some(lon)) => {
                GeoPoint::new(lat, lon).ok().map(|location| StoreCandidate {
                    id: row.store_id,
                    name: row.store_name,
                    address: row.store_address,
                    phone: row.store_phone,
                    location,
                    is_open: row.store_is_open,
                })
            }
            _ => None,
        };
        Self {
            id: row.id,
            name: row.name,
            generic_name: row.generic_name,
            price: row.price,
            quantity: row.quantity,
            image_url: row.image_url,
            store,
        }
    }
}

/// Escape LIKE wildcards in user text so it matches literally inside the
/// `%...%` pattern.
fn like_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Candidate query for the proximity search: case-insensitive substring match
/// on name OR generic name, available, in stock, parent store open.
///
/// Ordered by medicine id so equal-distance ranking ties are deterministic
/// downstream.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn search_medicine_candidates(
    pool: &PgPool,
    text: &str,
) -> Result<Vec<MedicineCandidateRow>, sqlx::Error> {
    sqlx::query_as::<_, MedicineCandidateRow>(
        "SELECT m.id, m.name, m.generic_name, m.price, m.quantity, m.image_url, \
                s.id AS store_id, s.name AS store_name, s.address AS store_address, \
                s.phone AS store_phone, s.latitude AS store_latitude, \
                s.longitude AS store_longitude, s.is_open AS store_is_open \
         FROM medicines m \
         JOIN stores s ON s.id = m.store_id \
         WHERE (m.name ILIKE $1 ESCAPE '\\' OR m.generic_name ILIKE $1 ESCAPE '\\') \
           AND m.is_available = TRUE \
           AND m.quantity > 0 \
           AND s.is_open = TRUE \
         ORDER BY m.id",
    )
    .bind(like_pattern(text))
    .fetch_all(pool)
    .await
}

/// Fetch a single medicine by id. Returns `Ok(None)` when it does not exist.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn get_medicine(
    pool: &PgPool,
    medicine_id: Uuid,
) -> Result<Option<MedicineRow>, sqlx::Error> {
    sqlx::query_as::<_, MedicineRow>(
        "SELECT id, store_id, name, generic_name, price, quantity, \
                min_stock_alert, is_available, image_url, created_at, updated_at \
         FROM medicines \
         WHERE id = $1",
    )
    .bind(medicine_id)
    .fetch_optional(pool)
    .await
}

/// List a store's medicines, optionally restricted to available, in-stock
/// ones. Ordered by name.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_store_medicines(
    pool: &PgPool,
    store_id: Uuid,
    available_only: bool,
) -> Result<Vec<MedicineRow>, sqlx::Error> {
    let base = "SELECT id, store_id, name, generic_name, price, quantity, \
                       min_stock_alert, is_available, image_url, created_at, updated_at \
                FROM medicines \
                WHERE store_id = $1";
    let sql = if available_only {
        format!("{base} AND is_available = TRUE AND quantity > 0 ORDER BY name")
    } else {
        format!("{base} ORDER BY name")
    };
    sqlx::query_as::<_, MedicineRow>(&sql)
        .bind(store_id)
        .fetch_all(pool)
        .await
}

/// Medicines at or below their stock-alert threshold, most depleted first.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_low_stock(pool: &PgPool, store_id: Uuid) -> Result<Vec<MedicineRow>, sqlx::Error> {
    sqlx::query_as::<_, MedicineRow>(
        "SELECT id, store_id, name, generic_name, price, quantity, \
                min_stock_alert, is_available, image_url, created_at, updated_at \
         FROM medicines \
         WHERE store_id = $1 AND quantity <= min_stock_alert \
         ORDER BY quantity, name",
    )
    .bind(store_id)
    .fetch_all(pool)
    .await
}
