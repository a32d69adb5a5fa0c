use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use medfind_core::{GeoPoint, RadiusKm};
use medfind_db::{MedicineRow, StoreRow};
use medfind_search::RankedStore;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, map_search_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct NearbyParams {
    latitude: f64,
    longitude: f64,
    radius_km: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(super) struct NearbyStoreItem {
    store_id: Uuid,
    store_name: String,
    address: String,
    phone: String,
    latitude: f64,
    longitude: f64,
    distance_km: f64,
}

impl From<RankedStore> for NearbyStoreItem {
    fn from(ranked: RankedStore) -> Self {
        Self {
            store_id: ranked.store.id,
            store_name: ranked.store.name,
            address: ranked.store.address,
            phone: ranked.store.phone,
            latitude: ranked.store.location.latitude(),
            longitude: ranked.store.location.longitude(),
            distance_km: ranked.distance_km,
        }
    }
}

pub(super) async fn nearby_stores(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<ApiResponse<Vec<NearbyStoreItem>>>, ApiError> {
    let origin = GeoPoint::new(params.latitude, params.longitude)
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;
    let radius = params
        .radius_km
        .map(RadiusKm::new)
        .transpose()
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?
        .unwrap_or_default();

    let results = state
        .engine
        .nearby_stores(origin, radius)
        .await
        .map_err(|e| map_search_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: results.into_iter().map(NearbyStoreItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Serialize)]
pub(super) struct StoreItem {
    id: Uuid,
    name: String,
    address: String,
    phone: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    is_open: bool,
    created_at: DateTime<Utc>,
}

impl From<StoreRow> for StoreItem {
    fn from(row: StoreRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            address: row.address,
            phone: row.phone,
            latitude: row.latitude,
            longitude: row.longitude,
            is_open: row.is_open,
            created_at: row.created_at,
        }
    }
}

pub(super) async fn get_store(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(store_id): Path<Uuid>,
) -> Result<Json<ApiResponse<StoreItem>>, ApiError> {
    let row = medfind_db::get_store(&state.pool, store_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "store not found"))?;

    Ok(Json(ApiResponse {
        data: StoreItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Deserialize)]
pub(super) struct InventoryParams {
    #[serde(default)]
    available_only: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct MedicineItem {
    id: Uuid,
    store_id: Uuid,
    name: String,
    generic_name: Option<String>,
    price: Decimal,
    quantity: i32,
    min_stock_alert: i32,
    is_available: bool,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<MedicineRow> for MedicineItem {
    fn from(row: MedicineRow) -> Self {
        Self {
            id: row.id,
            store_id: row.store_id,
            name: row.name,
            generic_name: row.generic_name,
            price: row.price,
            quantity: row.quantity,
            min_stock_alert: row.min_stock_alert,
            is_available: row.is_available,
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}

pub(super) async fn list_store_medicines(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(store_id): Path<Uuid>,
    Query(params): Query<InventoryParams>,
) -> Result<Json<ApiResponse<Vec<MedicineItem>>>, ApiError> {
    ensure_store_exists(&state, &req_id, store_id).await?;

    let rows = medfind_db::list_store_medicines(&state.pool, store_id, params.available_only)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(MedicineItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_low_stock(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(store_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<MedicineItem>>>, ApiError> {
    ensure_store_exists(&state, &req_id, store_id).await?;

    let rows = medfind_db::list_low_stock(&state.pool, store_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(MedicineItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

async fn ensure_store_exists(
    state: &AppState,
    req_id: &RequestId,
    store_id: Uuid,
) -> Result<(), ApiError> {
    medfind_db::get_store(&state.pool, store_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .map(|_| ())
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "store not found"))
}
