use std::future::Future;

use medfind_core::{GeoPoint, MedicineCandidate, StoreCandidate};
use uuid::Uuid;

use crate::error::BoxError;
use crate::params::MedicineQuery;

/// One recorded search, written best-effort after the results are ready.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchEvent {
    pub actor: Uuid,
    pub query: String,
    pub origin: GeoPoint,
    pub result_count: usize,
}

/// Candidate retrieval, injected into the engine at construction time so a
/// test double can stand in for the real database.
///
/// Implementations should pre-filter server-side (text match, availability,
/// store open) and return rows ordered by id. The pre-filter is a performance
/// optimization only — the engine re-checks the cheap predicates and never
/// assumes the returned set is exhaustive or exact.
pub trait CandidateSource: Send + Sync {
    /// Medicines matching `query` by name or generic name, joined with their
    /// stores.
    fn medicine_candidates(
        &self,
        query: &MedicineQuery,
    ) -> impl Future<Output = Result<Vec<MedicineCandidate>, BoxError>> + Send;

    /// All stores currently marked open.
    fn open_stores(&self) -> impl Future<Output = Result<Vec<StoreCandidate>, BoxError>> + Send;
}

/// Search-history sink. Called from a detached task; a failure is logged and
/// dropped, never retried and never surfaced to the caller.
pub trait SearchTelemetry: Send + Sync {
    fn record_search(
        &self,
        event: SearchEvent,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;
}
