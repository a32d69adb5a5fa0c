use medfind_core::{GeoPoint, RadiusKm};
use uuid::Uuid;

use crate::error::ValidationError;

/// A free-text medicine query, trimmed and at least two characters long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineQuery(String);

impl MedicineQuery {
    /// # Errors
    ///
    /// Returns [`ValidationError::QueryTooShort`] when the trimmed input has
    /// fewer than two characters.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.chars().count() < 2 {
            return Err(ValidationError::QueryTooShort);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MedicineQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully validated parameters for one medicine search.
///
/// `actor` is an already-verified identity supplied by the caller; the engine
/// performs no authentication of its own.
#[derive(Debug, Clone)]
pub struct MedicineSearch {
    pub query: MedicineQuery,
    pub origin: GeoPoint,
    pub radius: RadiusKm,
    pub actor: Option<Uuid>,
}
