//! Idempotent demo data for local development.

use sqlx::PgPool;
use uuid::Uuid;

struct SeedStore {
    id: Uuid,
    name: &'static str,
    address: &'static str,
    phone: &'static str,
    latitude: f64,
    longitude: f64,
    is_open: bool,
}

struct SeedMedicine {
    id: Uuid,
    store_id: Uuid,
    name: &'static str,
    generic_name: Option<&'static str>,
    price: &'static str,
    quantity: i32,
}

fn demo_stores() -> Vec<SeedStore> {
    vec![
        SeedStore {
            id: Uuid::from_u128(0x1001),
            name: "MedPlus Indiranagar",
            address: "100 Feet Road, Indiranagar, Bengaluru",
            phone: "+91-80-2521-0001",
            latitude: 12.9750,
            longitude: 77.6000,
            is_open: true,
        },
        SeedStore {
            id: Uuid::from_u128(0x1002),
            name: "Apollo Pharmacy Koramangala",
            address: "80 Feet Road, Koramangala, Bengaluru",
            phone: "+91-80-2553-0002",
            latitude: 12.9352,
            longitude: 77.6245,
            is_open: true,
        },
        SeedStore {
            id: Uuid::from_u128(0x1003),
            name: "Wellness Forever Tumakuru",
            address: "BH Road, Tumakuru",
            phone: "+91-816-227-0003",
            latitude: 13.3392,
            longitude: 77.1010,
            is_open: true,
        },
        SeedStore {
            id: Uuid::from_u128(0x1004),
            name: "Night Owl Chemist",
            address: "MG Road, Bengaluru",
            phone: "+91-80-2555-0004",
            latitude: 12.9758,
            longitude: 77.6045,
            is_open: false,
        },
    ]
}

fn demo_medicines() -> Vec<SeedMedicine> {
    vec![
        SeedMedicine {
            id: Uuid::from_u128(0x2001),
            store_id: Uuid::from_u128(0x1001),
            name: "Paracetamol 500mg",
            generic_name: Some("Acetaminophen"),
            price: "25.50",
            quantity: 120,
        },
        SeedMedicine {
            id: Uuid::from_u128(0x2002),
            store_id: Uuid::from_u128(0x1001),
            name: "Cetirizine 10mg",
            generic_name: Some("Cetirizine"),
            price: "18.00",
            quantity: 4,
        },
        SeedMedicine {
            id: Uuid::from_u128(0x2003),
            store_id: Uuid::from_u128(0x1002),
            name: "Crocin Advance",
            generic_name: Some("Paracetamol"),
            price: "32.00",
            quantity: 60,
        },
        SeedMedicine {
            id: Uuid::from_u128(0x2004),
            store_id: Uuid::from_u128(0x1003),
            name: "Ibuprofen 400mg",
            generic_name: Some("Ibuprofen"),
            price: "41.75",
            quantity: 30,
        },
    ]
}

/// Insert the demo dataset, skipping rows that already exist.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if any insert fails.
pub async fn seed_demo_data(pool: &PgPool) -> Result<(), sqlx::Error> {
    for store in demo_stores() {
        sqlx::query(
            "INSERT INTO stores (id, name, address, phone, latitude, longitude, is_open) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(store.id)
        .bind(store.name)
        .bind(store.address)
        .bind(store.phone)
        .bind(store.latitude)
        .bind(store.longitude)
        .bind(store.is_open)
        .execute(pool)
        .await?;
    }

    for medicine in demo_medicines() {
        sqlx::query(
            "INSERT INTO medicines (id, store_id, name, generic_name, price, quantity) \
             VALUES ($1, $2, $3, $4, $5::numeric, $6) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(medicine.id)
        .bind(medicine.store_id)
        .bind(medicine.name)
        .bind(medicine.generic_name)
        .bind(medicine.price)
        .bind(medicine.quantity)
        .execute(pool)
        .await?;
    }

    Ok(())
}
