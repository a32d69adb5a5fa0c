//! Write operations for the `search_history` table.

use sqlx::PgPool;

use medfind_search::SearchEvent;

/// Insert one search-history record.
///
/// Called from the engine's detached telemetry task; a failure here is logged
/// and dropped upstream, never propagated to the search caller.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the insert fails.
pub async fn insert_search_event(pool: &PgPool, event: &SearchEvent) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO search_history \
            (actor_id, search_query, origin_latitude, origin_longitude, result_count) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(event.actor)
    .bind(&event.query)
    .bind(event.origin.latitude())
    .bind(event.origin.longitude())
    .bind(i32::try_from(event.result_count).unwrap_or(i32::MAX))
    .execute(pool)
    .await?;
    Ok(())
}
