use std::sync::Arc;

use medfind_core::{rank_by_proximity, round_2dp, GeoPoint, RadiusKm, StoreCandidate};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::error::SearchError;
use crate::params::MedicineSearch;
use crate::source::{CandidateSource, SearchEvent, SearchTelemetry};

/// A medicine retained by the radius filter, annotated with the distance to
/// its store. `distance_km` is rounded to two decimals for display; the
/// filter and sort decisions were made on the unrounded value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMedicine {
    pub medicine_id: Uuid,
    pub medicine_name: String,
    pub generic_name: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub image_url: Option<String>,
    pub store: StoreCandidate,
    pub distance_km: f64,
}

/// An open store within the search radius.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStore {
    pub store: StoreCandidate,
    pub distance_km: f64,
}

/// The proximity search engine.
///
/// Stateless: every invocation is an independent unit of work over the
/// injected collaborators, with no shared mutable state and no locking.
pub struct SearchEngine<S, T> {
    source: S,
    telemetry: Arc<T>,
}

impl<S, T> SearchEngine<S, T>
where
    S: CandidateSource,
    T: SearchTelemetry + 'static,
{
    pub fn new(source: S, telemetry: T) -> Self {
        Self {
            source,
            telemetry: Arc::new(telemetry),
        }
    }

    /// Find in-stock medicines at open stores within the search radius,
    /// ordered nearest-first.
    ///
    /// Candidates without a resolvable store are dropped, not treated as
    /// errors. Equal distances tie-break by ascending medicine id. When an
    /// actor is present, a search-history event is recorded on a detached
    /// task after the results are assembled; its outcome never reaches the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::DataAccess`] when the candidate query fails; no
    /// partial results are returned.
    pub async fn search_medicines(
        &self,
        search: MedicineSearch,
    ) -> Result<Vec<RankedMedicine>, SearchError> {
        let mut candidates = self
            .source
            .medicine_candidates(&search.query)
            .await
            .map_err(SearchError::DataAccess)?;

        // The source pre-filters these server-side, but that is an
        // optimization, not a guarantee.
        candidates.retain(|c| c.quantity > 0);
        // Stable distance sort + id-ordered input = deterministic tie-break.
        candidates.sort_by_key(|c| c.id);

        let ranked = rank_by_proximity(
            search.origin,
            candidates,
            |c| {
                c.store
                    .as_ref()
                    .filter(|s| s.is_open)
                    .map(|s| s.location)
            },
            search.radius,
        );

        let results: Vec<RankedMedicine> = ranked
            .into_iter()
            .filter_map(|(candidate, distance)| {
                let store = candidate.store?;
                Some(RankedMedicine {
                    medicine_id: candidate.id,
                    medicine_name: candidate.name,
                    generic_name: candidate.generic_name,
                    price: candidate.price,
                    quantity: candidate.quantity,
                    image_url: candidate.image_url,
                    store,
                    distance_km: round_2dp(distance),
                })
            })
            .collect();

        if let Some(actor) = search.actor {
            self.spawn_telemetry(SearchEvent {
                actor,
                query: search.query.as_str().to_owned(),
                origin: search.origin,
                result_count: results.len(),
            });
        }

        Ok(results)
    }

    /// Rank open stores by distance from `origin`, nearest-first.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::DataAccess`] when the store query fails.
    pub async fn nearby_stores(
        &self,
        origin: GeoPoint,
        radius: RadiusKm,
    ) -> Result<Vec<RankedStore>, SearchError> {
        let mut stores = self
            .source
            .open_stores()
            .await
            .map_err(SearchError::DataAccess)?;
        stores.sort_by_key(|s| s.id);

        let ranked = rank_by_proximity(
            origin,
            stores,
            |s| s.is_open.then_some(s.location),
            radius,
        );

        Ok(ranked
            .into_iter()
            .map(|(store, distance)| RankedStore {
                store,
                distance_km: round_2dp(distance),
            })
            .collect())
    }

    /// Fire-and-forget: the write runs detached from the response path. A
    /// single failed attempt is logged and dropped.
    fn spawn_telemetry(&self, event: SearchEvent) {
        let telemetry = Arc::clone(&self.telemetry);
        tokio::spawn(async move {
            if let Err(error) = telemetry.record_search(event).await {
                tracing::warn!(%error, "search history write failed");
            }
        });
    }
}
