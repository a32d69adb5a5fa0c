use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Extension, Json,
};
use medfind_core::{GeoPoint, RadiusKm};
use medfind_search::{MedicineQuery, MedicineSearch, RankedMedicine, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::stores::MedicineItem;
use super::{map_db_error, map_search_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct MedicineSearchParams {
    query: String,
    latitude: f64,
    longitude: f64,
    radius_km: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(super) struct MedicineSearchItem {
    medicine_id: Uuid,
    medicine_name: String,
    generic_name: Option<String>,
    price: Decimal,
    quantity: i32,
    image_url: Option<String>,
    store_id: Uuid,
    store_name: String,
    store_address: String,
    store_lat: f64,
    store_lon: f64,
    store_phone: String,
    distance_km: f64,
}

impl From<RankedMedicine> for MedicineSearchItem {
    fn from(ranked: RankedMedicine) -> Self {
        Self {
            medicine_id: ranked.medicine_id,
            medicine_name: ranked.medicine_name,
            generic_name: ranked.generic_name,
            price: ranked.price,
            quantity: ranked.quantity,
            image_url: ranked.image_url,
            store_id: ranked.store.id,
            store_name: ranked.store.name,
            store_address: ranked.store.address,
            store_lat: ranked.store.location.latitude(),
            store_lon: ranked.store.location.longitude(),
            store_phone: ranked.store.phone,
            distance_km: ranked.distance_km,
        }
    }
}

/// Optional already-verified actor id supplied by the identity layer via the
/// `x-user-id` header. A malformed value is a validation error, not an
/// anonymous search.
fn actor_from_headers(headers: &HeaderMap) -> Result<Option<Uuid>, String> {
    let Some(raw) = headers.get("x-user-id") else {
        return Ok(None);
    };
    raw.to_str()
        .ok()
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(Some)
        .ok_or_else(|| "x-user-id must be a UUID".to_string())
}

fn build_search(
    params: &MedicineSearchParams,
    actor: Option<Uuid>,
) -> Result<MedicineSearch, ValidationError> {
    Ok(MedicineSearch {
        query: MedicineQuery::new(&params.query)?,
        origin: GeoPoint::new(params.latitude, params.longitude)?,
        radius: params
            .radius_km
            .map(RadiusKm::new)
            .transpose()?
            .unwrap_or_default(),
        actor,
    })
}

pub(super) async fn search_medicines(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    Query(params): Query<MedicineSearchParams>,
) -> Result<Json<ApiResponse<Vec<MedicineSearchItem>>>, ApiError> {
    let actor = actor_from_headers(&headers)
        .map_err(|message| ApiError::new(req_id.0.clone(), "validation_error", message))?;

    let search = build_search(&params, actor)
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    let results = state
        .engine
        .search_medicines(search)
        .await
        .map_err(|e| map_search_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: results.into_iter().map(MedicineSearchItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_medicine(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(medicine_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MedicineItem>>, ApiError> {
    let row = medfind_db::get_medicine(&state.pool, medicine_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "medicine not found"))?;

    Ok(Json(ApiResponse {
        data: MedicineItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(query: &str, lat: f64, lon: f64, radius: Option<f64>) -> MedicineSearchParams {
        MedicineSearchParams {
            query: query.to_string(),
            latitude: lat,
            longitude: lon,
            radius_km: radius,
        }
    }

    #[test]
    fn build_search_defaults_radius_to_ten_km() {
        let search = build_search(&params("paracetamol", 12.9716, 77.5946, None), None).unwrap();
        assert!((search.radius.get() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn build_search_rejects_short_query() {
        let err = build_search(&params("p", 12.9716, 77.5946, None), None).unwrap_err();
        assert!(matches!(err, ValidationError::QueryTooShort));
    }

    #[test]
    fn build_search_rejects_bad_coordinates_and_radius() {
        assert!(build_search(&params("paracetamol", 91.0, 0.0, None), None).is_err());
        assert!(build_search(&params("paracetamol", 0.0, -190.0, None), None).is_err());
        assert!(build_search(&params("paracetamol", 0.0, 0.0, Some(0.0)), None).is_err());
        assert!(build_search(&params("paracetamol", 0.0, 0.0, Some(150.0)), None).is_err());
    }

    #[test]
    fn actor_header_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(actor_from_headers(&headers), Ok(None));

        headers.insert("x-user-id", "not-a-uuid".parse().unwrap());
        assert!(actor_from_headers(&headers).is_err());

        let id = Uuid::new_v4();
        headers.insert("x-user-id", id.to_string().parse().unwrap());
        assert_eq!(actor_from_headers(&headers), Ok(Some(id)));
    }
}
