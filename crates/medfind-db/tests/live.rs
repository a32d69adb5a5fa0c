//! Live integration tests for medfind-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/medfind-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.

use medfind_core::{GeoPoint, RadiusKm};
use medfind_db::{
    get_medicine, get_store, insert_search_event, list_low_stock, list_store_medicines,
    search_medicine_candidates, PgCatalog,
};
use medfind_search::{
    MedicineQuery, MedicineSearch, SearchEngine, SearchEvent,
};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn insert_store(
    pool: &sqlx::PgPool,
    name: &str,
    lat: Option<f64>,
    lon: Option<f64>,
    is_open: bool,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO stores (name, address, phone, latitude, longitude, is_open) \
         VALUES ($1, '12 MG Road', '+91-80-0000', $2, $3, $4) RETURNING id",
    )
    .bind(name)
    .bind(lat)
    .bind(lon)
    .bind(is_open)
    .fetch_one(pool)
    .await
    .unwrap_or_else(|e| panic!("insert_store failed for '{name}': {e}"))
}

async fn insert_medicine(
    pool: &sqlx::PgPool,
    store_id: Uuid,
    name: &str,
    generic_name: Option<&str>,
    quantity: i32,
    is_available: bool,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO medicines (store_id, name, generic_name, price, quantity, is_available) \
         VALUES ($1, $2, $3, 25.50, $4, $5) RETURNING id",
    )
    .bind(store_id)
    .bind(name)
    .bind(generic_name)
    .bind(quantity)
    .bind(is_available)
    .fetch_one(pool)
    .await
    .unwrap_or_else(|e| panic!("insert_medicine failed for '{name}': {e}"))
}

// ---------------------------------------------------------------------------
// Candidate query
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn candidate_query_matches_name_and_generic_name(pool: sqlx::PgPool) {
    let store = insert_store(&pool, "MedPlus", Some(12.9750), Some(77.6000), true).await;
    insert_medicine(&pool, store, "Crocin Advance", Some("Paracetamol"), 10, true).await;
    insert_medicine(&pool, store, "Paracetamol 500mg", None, 10, true).await;
    insert_medicine(&pool, store, "Ibuprofen 400mg", Some("Ibuprofen"), 10, true).await;

    let rows = search_medicine_candidates(&pool, "paracet").await.unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(rows.len(), 2, "got {names:?}");
}

#[sqlx::test(migrations = "../../migrations")]
async fn candidate_query_excludes_unavailable_out_of_stock_and_closed(pool: sqlx::PgPool) {
    let open = insert_store(&pool, "Open", Some(12.9750), Some(77.6000), true).await;
    let closed = insert_store(&pool, "Closed", Some(12.9750), Some(77.6000), false).await;

    insert_medicine(&pool, open, "Paracetamol A", None, 10, true).await;
    insert_medicine(&pool, open, "Paracetamol B", None, 0, true).await;
    insert_medicine(&pool, open, "Paracetamol C", None, 10, false).await;
    insert_medicine(&pool, closed, "Paracetamol D", None, 10, true).await;

    let rows = search_medicine_candidates(&pool, "paracetamol").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Paracetamol A");
}

#[sqlx::test(migrations = "../../migrations")]
async fn candidate_query_treats_wildcards_literally(pool: sqlx::PgPool) {
    let store = insert_store(&pool, "MedPlus", Some(12.9750), Some(77.6000), true).await;
    insert_medicine(&pool, store, "Vitamin D3 50% extra", None, 5, true).await;
    insert_medicine(&pool, store, "Vitamin D3 plain", None, 5, true).await;

    let rows = search_medicine_candidates(&pool, "50%").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Vitamin D3 50% extra");
}

// ---------------------------------------------------------------------------
// Store reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn get_store_returns_none_for_unknown_id(pool: sqlx::PgPool) {
    let missing = get_store(&pool, Uuid::new_v4()).await.unwrap();
    assert!(missing.is_none());

    let id = insert_store(&pool, "MedPlus", Some(12.9750), Some(77.6000), true).await;
    let found = get_store(&pool, id).await.unwrap().expect("store exists");
    assert_eq!(found.name, "MedPlus");
}

#[sqlx::test(migrations = "../../migrations")]
async fn get_medicine_returns_none_for_unknown_id(pool: sqlx::PgPool) {
    let missing = get_medicine(&pool, Uuid::new_v4()).await.unwrap();
    assert!(missing.is_none());

    let store = insert_store(&pool, "MedPlus", Some(12.9750), Some(77.6000), true).await;
    let id = insert_medicine(&pool, store, "Paracetamol 500mg", Some("Acetaminophen"), 7, true)
        .await;

    let found = get_medicine(&pool, id).await.unwrap().expect("medicine exists");
    assert_eq!(found.name, "Paracetamol 500mg");
    assert_eq!(found.generic_name.as_deref(), Some("Acetaminophen"));
    assert_eq!(found.store_id, store);
    assert_eq!(found.quantity, 7);
}

#[sqlx::test(migrations = "../../migrations")]
async fn store_inventory_and_low_stock_reads(pool: sqlx::PgPool) {
    let store = insert_store(&pool, "MedPlus", Some(12.9750), Some(77.6000), true).await;
    insert_medicine(&pool, store, "Plenty", None, 50, true).await;
    insert_medicine(&pool, store, "Scarce", None, 3, true).await;
    insert_medicine(&pool, store, "Hidden", None, 50, false).await;

    let all = list_store_medicines(&pool, store, false).await.unwrap();
    assert_eq!(all.len(), 3);

    let available = list_store_medicines(&pool, store, true).await.unwrap();
    assert_eq!(available.len(), 2);

    // Default min_stock_alert is 10, so only "Scarce" qualifies.
    let low = list_low_stock(&pool, store).await.unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].name, "Scarce");
}

// ---------------------------------------------------------------------------
// Telemetry write
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn search_event_round_trips(pool: sqlx::PgPool) {
    let actor = Uuid::new_v4();
    let event = SearchEvent {
        actor,
        query: "paracetamol".to_string(),
        origin: GeoPoint::new(12.9716, 77.5946).unwrap(),
        result_count: 3,
    };
    insert_search_event(&pool, &event).await.unwrap();

    let (query, count): (String, i32) = sqlx::query_as(
        "SELECT search_query, result_count FROM search_history WHERE actor_id = $1",
    )
    .bind(actor)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(query, "paracetamol");
    assert_eq!(count, 3);
}

// ---------------------------------------------------------------------------
// End-to-end through the engine
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn engine_over_postgres_ranks_and_records(pool: sqlx::PgPool) {
    let near = insert_store(&pool, "Near", Some(12.9750), Some(77.6000), true).await;
    let far = insert_store(&pool, "Far", Some(13.4215), Some(77.5946), true).await;
    insert_medicine(&pool, near, "Paracetamol 500mg", None, 10, true).await;
    insert_medicine(&pool, far, "Paracetamol 650mg", None, 10, true).await;

    let catalog = PgCatalog::new(pool.clone());
    let engine = SearchEngine::new(catalog.clone(), catalog);
    let actor = Uuid::new_v4();

    let results = engine
        .search_medicines(MedicineSearch {
            query: MedicineQuery::new("paracetamol").unwrap(),
            origin: GeoPoint::new(12.9716, 77.5946).unwrap(),
            radius: RadiusKm::new(10.0).unwrap(),
            actor: Some(actor),
        })
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].store.name, "Near");
    assert!((0.6..=0.7).contains(&results[0].distance_km));

    // The history write is detached; poll briefly for it.
    let mut recorded = 0_i64;
    for _ in 0..50 {
        recorded =
            sqlx::query_scalar("SELECT COUNT(*) FROM search_history WHERE actor_id = $1")
                .bind(actor)
                .fetch_one(&pool)
                .await
                .unwrap();
        if recorded == 1 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert_eq!(recorded, 1, "search history event was not recorded");

    let nearby = engine
        .nearby_stores(
            GeoPoint::new(12.9716, 77.5946).unwrap(),
            RadiusKm::new(100.0).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(nearby.len(), 2);
    assert_eq!(nearby[0].store.name, "Near");
    assert!(nearby[0].distance_km <= nearby[1].distance_km);
}
