//! Postgres-backed implementation of the search engine's collaborator traits.

use sqlx::PgPool;

use medfind_core::{MedicineCandidate, StoreCandidate};
use medfind_search::{BoxError, CandidateSource, MedicineQuery, SearchEvent, SearchTelemetry};

use crate::{medicines, search_history, stores};

/// The engine's data-access handle: a thin newtype over the shared pool so
/// the engine receives an injected collaborator rather than a process-wide
/// singleton, and tests can substitute a double.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl CandidateSource for PgCatalog {
    async fn medicine_candidates(
        &self,
        query: &MedicineQuery,
    ) -> Result<Vec<MedicineCandidate>, BoxError> {
        let rows = medicines::search_medicine_candidates(&self.pool, query.as_str()).await?;
        Ok(rows.into_iter().map(MedicineCandidate::from).collect())
    }

    async fn open_stores(&self) -> Result<Vec<StoreCandidate>, BoxError> {
        let rows = stores::list_open_stores(&self.pool).await?;
        Ok(rows
            .into_iter()
            .filter_map(stores::StoreRow::into_candidate)
            .collect())
    }
}

impl SearchTelemetry for PgCatalog {
    async fn record_search(&self, event: SearchEvent) -> Result<(), BoxError> {
        search_history::insert_search_event(&self.pool, &event).await?;
        Ok(())
    }
}
