//! Geo-proximity medicine search engine.
//!
//! The engine is a stateless read-transform-rank pipeline: fetch candidates
//! from an injected [`CandidateSource`], compute haversine distances, filter
//! by radius, sort ascending, and (for authenticated medicine searches)
//! record a fire-and-forget search-history event through a
//! [`SearchTelemetry`] sink.

mod engine;
mod error;
mod params;
mod source;

pub use engine::{RankedMedicine, RankedStore, SearchEngine};
pub use error::{BoxError, SearchError, ValidationError};
pub use params::{MedicineQuery, MedicineSearch};
pub use source::{CandidateSource, SearchEvent, SearchTelemetry};
