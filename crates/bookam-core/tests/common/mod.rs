#![allow(dead_code)]

use bookam_core::{
    params::{CreateBus, CreateRoute},
    AppContext, Backend, BackendBuilder, BookingApi, Bus, Route,
};
use tempfile::TempDir;

/// Local backend on a throwaway database.
pub async fn create_test_backend() -> (TempDir, Backend) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let backend = BackendBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create backend");
    (temp_dir, backend)
}

/// App context over a seeded local backend.
pub async fn create_seeded_context() -> (TempDir, AppContext<Backend>) {
    let (temp_dir, backend) = create_test_backend().await;
    backend
        .as_local()
        .expect("local backend")
        .seed("2025-06-01".parse().unwrap())
        .await
        .expect("Failed to seed");
    (temp_dir, AppContext::new(backend))
}

/// A 16-seat bus with one Lagos to Abuja trip at ₦15,000.
pub async fn create_lagos_abuja(api: &impl BookingApi) -> (Bus, Route) {
    let bus = api
        .create_bus(&CreateBus {
            name: "ABC Executive 9".to_string(),
            plate_number: "ABC-909-LG".to_string(),
            capacity: 16,
            ..Default::default()
        })
        .await
        .expect("Failed to create bus");
    let route = api
        .create_route(&CreateRoute {
            bus_id: bus.id,
            from_city: "Lagos".to_string(),
            to_city: "Abuja".to_string(),
            departure_time: "2025-06-02T07:00".parse().unwrap(),
            arrival_time: "2025-06-02T17:30".parse().unwrap(),
            price: 15000,
        })
        .await
        .expect("Failed to create route");
    (bus, route)
}
