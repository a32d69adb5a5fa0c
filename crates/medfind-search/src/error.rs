use medfind_core::GeoError;
use thiserror::Error;

/// Opaque transport error from a collaborator. The engine does not know or
/// depend on the underlying storage technology.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("search query must be at least 2 characters")]
    QueryTooShort,
    #[error(transparent)]
    Geo(#[from] GeoError),
}

/// A failure of the running search itself. Validation happens before the
/// engine is ever called (the parameter types cannot be built invalid), so
/// the only terminating condition here is the candidate query failing;
/// everything else (missing stores, telemetry failures) degrades by omission.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search failed")]
    DataAccess(#[source] BoxError),
}
