//! Read-only candidate views shared between the data layer and the engine.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::geo::GeoPoint;

/// A store as seen by the proximity search. Owned by the data layer; the
/// engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreCandidate {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub location: GeoPoint,
    pub is_open: bool,
}

/// One medicine row joined with its store, alive for the duration of a single
/// search call.
///
/// `store` is `None` when the join could not be resolved (missing store or
/// unusable coordinates); the engine drops such candidates instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicineCandidate {
    pub id: Uuid,
    pub name: String,
    pub generic_name: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub image_url: Option<String>,
    pub store: Option<StoreCandidate>,
}
