use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    Currency, Engine, EngineError, FuelUnit, SegmentDraft, Settings, StayDraft, StayType,
    TripAssumptions, TripDraft,
};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (username, password) VALUES (?, ?)",
        vec!["fahad".into(), "password".into()],
    ))
    .await
    .unwrap();
    let engine = Engine::builder().database(db.clone()).build().await.unwrap();
    (engine, db)
}

fn gulf_draft(vehicle_id: Uuid, round: bool) -> TripDraft {
    TripDraft {
        name: "Kuwait to Salalah".to_string(),
        description: Some("Khareef season".to_string()),
        vehicle_id,
        start_date: None,
        is_round_trip: round,
        assumptions: TripAssumptions {
            daily_food_budget: Some(15.0),
            safety_margin_percent: Some(10.0),
            comfort_level: 50,
        },
        segments: vec![
            SegmentDraft {
                country_code: "SA".to_string(),
                country_name: "Saudi Arabia".to_string(),
                km: 900.0,
                days: Some(2),
                fuel_price_per_liter: Some(0.16),
                border_fees: None,
                tolls_and_vignettes: None,
                other_fixed_costs: None,
                stays: vec![StayDraft {
                    city_or_area: "Riyadh".to_string(),
                    stay_type: StayType::Hotel,
                    nights: 1,
                    cost_per_night: None,
                    notes: None,
                }],
            },
            SegmentDraft {
                country_code: "OM".to_string(),
                country_name: "Oman".to_string(),
                km: 1100.0,
                days: Some(7),
                fuel_price_per_liter: Some(0.23),
                border_fees: Some(5.0),
                tolls_and_vignettes: None,
                other_fixed_costs: Some(20.0),
                stays: vec![
                    StayDraft {
                        city_or_area: "Salalah".to_string(),
                        stay_type: StayType::PaidCamp,
                        nights: 4,
                        cost_per_night: Some(7.0),
                        notes: None,
                    },
                    StayDraft {
                        city_or_area: "Muscat".to_string(),
                        stay_type: StayType::FriendFamily,
                        nights: 2,
                        cost_per_night: None,
                        notes: Some("cousins".to_string()),
                    },
                ],
            },
        ],
    }
}

async fn outback(engine: &Engine) -> Uuid {
    engine
        .new_vehicle(
            "fahad",
            "Subaru Outback",
            "95",
            FuelUnit::LitersPer100Km,
            9.0,
            Some(63.0),
            None,
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn vehicle_roundtrip_and_listing() {
    let (engine, _db) = engine_with_db().await;
    let id = outback(&engine).await;

    let vehicle = engine.vehicle(id, "fahad").await.unwrap();
    assert_eq!(vehicle.name, "Subaru Outback");
    assert_eq!(vehicle.consumption_l_per_100km(), 9.0);

    let listed = engine.vehicles("fahad").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
}

#[tokio::test]
async fn vehicle_is_scoped_to_its_owner() {
    let (engine, db) = engine_with_db().await;
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (username, password) VALUES (?, ?)",
        vec!["noura".into(), "password".into()],
    ))
    .await
    .unwrap();

    let id = outback(&engine).await;
    let err = engine.vehicle(id, "noura").await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("vehicle not exists".to_string()));
}

#[tokio::test]
async fn invalid_consumption_rejected_on_create() {
    let (engine, _db) = engine_with_db().await;
    let err = engine
        .new_vehicle("fahad", "Broken", "diesel", FuelUnit::KmPerLiter, 0.0, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidVehicle(_)));
}

#[tokio::test]
async fn trip_aggregate_roundtrips_in_order() {
    let (engine, _db) = engine_with_db().await;
    let vehicle_id = outback(&engine).await;
    let trip_id = engine.new_trip("fahad", gulf_draft(vehicle_id, true)).await.unwrap();

    let trip = engine.trip(trip_id, "fahad").await.unwrap();
    assert_eq!(trip.segments.len(), 2);
    assert_eq!(trip.segments[0].country_code, "SA");
    assert_eq!(trip.segments[1].country_code, "OM");
    assert_eq!(trip.segments[1].stays.len(), 2);
    assert_eq!(trip.segments[1].stays[0].city_or_area, "Salalah");
    assert_eq!(trip.segments[1].stays[1].stay_type, StayType::FriendFamily);
    assert!(trip.results.is_none());

    let headers = engine.trips("fahad").await.unwrap();
    assert_eq!(headers.len(), 1);
    assert!(!headers[0].has_results);
}

#[tokio::test]
async fn calculate_persists_snapshot() {
    let (engine, _db) = engine_with_db().await;
    let vehicle_id = outback(&engine).await;
    let trip_id = engine.new_trip("fahad", gulf_draft(vehicle_id, false)).await.unwrap();

    let results = engine.calculate_trip(trip_id, "fahad").await.unwrap();
    assert!(results.total_cost > 0.0);
    assert_eq!(results.per_country.len(), 2);

    let trip = engine.trip(trip_id, "fahad").await.unwrap();
    assert_eq!(trip.results, Some(results));

    let headers = engine.trips("fahad").await.unwrap();
    assert!(headers[0].has_results);
}

#[tokio::test]
async fn calculate_round_trip_doubles_raw_total() {
    let (engine, _db) = engine_with_db().await;
    let vehicle_id = outback(&engine).await;
    let one_way_id = engine.new_trip("fahad", gulf_draft(vehicle_id, false)).await.unwrap();
    let round_id = engine.new_trip("fahad", gulf_draft(vehicle_id, true)).await.unwrap();

    let one_way = engine.calculate_trip(one_way_id, "fahad").await.unwrap();
    let round = engine.calculate_trip(round_id, "fahad").await.unwrap();
    assert!((round.raw_total() - 2.0 * one_way.raw_total()).abs() < 1e-9);
}

#[tokio::test]
async fn replace_trip_swaps_route_and_keeps_snapshot() {
    let (engine, _db) = engine_with_db().await;
    let vehicle_id = outback(&engine).await;
    let trip_id = engine.new_trip("fahad", gulf_draft(vehicle_id, false)).await.unwrap();
    let results = engine.calculate_trip(trip_id, "fahad").await.unwrap();

    let mut draft = gulf_draft(vehicle_id, false);
    draft.name = "Shorter loop".to_string();
    draft.segments.truncate(1);
    engine.replace_trip(trip_id, "fahad", draft).await.unwrap();

    let trip = engine.trip(trip_id, "fahad").await.unwrap();
    assert_eq!(trip.name, "Shorter loop");
    assert_eq!(trip.segments.len(), 1);
    // The stale snapshot survives until the next calculate.
    assert_eq!(trip.results, Some(results));
}

#[tokio::test]
async fn delete_trip_removes_route_rows() {
    let (engine, db) = engine_with_db().await;
    let vehicle_id = outback(&engine).await;
    let trip_id = engine.new_trip("fahad", gulf_draft(vehicle_id, false)).await.unwrap();

    engine.delete_trip(trip_id, "fahad").await.unwrap();
    assert!(engine.trip(trip_id, "fahad").await.is_err());

    let backend = db.get_database_backend();
    for table in ["segments", "stays"] {
        let row = db
            .query_one(Statement::from_string(
                backend,
                format!("SELECT COUNT(*) AS n FROM {table}"),
            ))
            .await
            .unwrap()
            .unwrap();
        let n: i64 = row.try_get("", "n").unwrap();
        assert_eq!(n, 0, "{table} not emptied");
    }
}

#[tokio::test]
async fn vehicle_in_use_cannot_be_deleted() {
    let (engine, _db) = engine_with_db().await;
    let vehicle_id = outback(&engine).await;
    let trip_id = engine.new_trip("fahad", gulf_draft(vehicle_id, false)).await.unwrap();

    let err = engine.delete_vehicle(vehicle_id, "fahad").await.unwrap_err();
    assert!(matches!(err, EngineError::VehicleInUse(_)));

    engine.delete_trip(trip_id, "fahad").await.unwrap();
    engine.delete_vehicle(vehicle_id, "fahad").await.unwrap();
    assert!(engine.vehicles("fahad").await.unwrap().is_empty());
}

#[tokio::test]
async fn settings_created_with_defaults_then_updated() {
    let (engine, _db) = engine_with_db().await;

    let settings = engine.settings("fahad").await.unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.base_currency, Currency::Kwd);

    let mut updated = settings.clone();
    updated.default_safety_margin_percent = 20.0;
    updated.default_stay_costs.hotel_per_night = 30.0;
    engine.update_settings("fahad", updated.clone()).await.unwrap();

    assert_eq!(engine.settings("fahad").await.unwrap(), updated);
}

#[tokio::test]
async fn calculate_uses_stay_defaults_from_settings() {
    let (engine, _db) = engine_with_db().await;
    let vehicle_id = outback(&engine).await;

    let mut settings = engine.settings("fahad").await.unwrap();
    settings.default_stay_costs.hotel_per_night = 40.0;
    engine.update_settings("fahad", settings).await.unwrap();

    // One-night default-priced hotel stay in the SA segment.
    let trip_id = engine.new_trip("fahad", gulf_draft(vehicle_id, false)).await.unwrap();
    let results = engine.calculate_trip(trip_id, "fahad").await.unwrap();
    assert!((results.per_country[0].hotel_cost - 40.0).abs() < 1e-9);
}

#[tokio::test]
async fn trip_with_unknown_vehicle_rejected() {
    let (engine, _db) = engine_with_db().await;
    let err = engine
        .new_trip("fahad", gulf_draft(Uuid::new_v4(), false))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("vehicle not exists".to_string()));
}
