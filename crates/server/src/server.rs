use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use std::sync::Arc;

use crate::{settings, trips, user, vehicles};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
}

async fn auth(
    auth_header: TypedHeader<Authorization<Basic>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user: Option<user::Model> = user::Entity::find()
        .filter(user::Column::Username.eq(auth_header.username()))
        .filter(user::Column::Password.eq(auth_header.password()))
        .one(&state.db)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let Some(user) = user else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/vehicles", post(vehicles::create).get(vehicles::list))
        .route(
            "/vehicles/{id}",
            get(vehicles::get_one)
                .put(vehicles::update)
                .delete(vehicles::delete),
        )
        .route("/trips", post(trips::create).get(trips::list))
        .route(
            "/trips/{id}",
            get(trips::get_one).put(trips::replace).delete(trips::delete),
        )
        .route("/trips/{id}/calculate", post(trips::calculate))
        .route("/settings", get(settings::get_own).put(settings::update))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub async fn run(engine: Engine, db: DatabaseConnection) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, db, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        db,
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, db, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::Body,
        http::{Request, header},
    };
    use base64::Engine as _;
    use http_body_util::BodyExt;
    use sea_orm::{ConnectionTrait, Database, Statement};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use migration::MigratorTrait;

    async fn test_router() -> Router {
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
        router(ServerState {
            engine: Arc::new(engine),
            db,
        })
    }

    fn basic_auth(username: &str, password: &str) -> String {
        let encoded =
            base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
        format!("Basic {encoded}")
    }

    fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, basic_auth("fahad", "password"))
            .header(header::CONTENT_TYPE, "application/json");
        match body {
            Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn outback() -> Value {
        json!({
            "name": "Outback",
            "fuel_type": "95",
            "fuel_unit": "liters_per_100km",
            "consumption": 10.0,
            "tank_size_liters": 63.0,
            "notes": null,
        })
    }

    fn andalusia_trip(vehicle_id: &str) -> Value {
        json!({
            "name": "Andalusia loop",
            "description": null,
            "vehicle_id": vehicle_id,
            "start_date": "2026-10-01",
            "is_round_trip": false,
            "assumptions": {
                "daily_food_budget": 15.0,
                "safety_margin_percent": 10.0,
                "comfort_level": 50,
            },
            "segments": [{
                "country_code": "ES",
                "country_name": "Spain",
                "km": 500.0,
                "days": 5,
                "fuel_price_per_liter": 0.3,
                "border_fees": null,
                "tolls_and_vignettes": null,
                "other_fixed_costs": null,
                "stays": [{
                    "city_or_area": "Granada",
                    "stay_type": "hotel",
                    "nights": 2,
                    "cost_per_night": 20.0,
                    "notes": null,
                }],
            }],
        })
    }

    #[tokio::test]
    async fn missing_credentials_rejected() {
        let router = test_router().await;
        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/vehicles")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn wrong_password_rejected() {
        let router = test_router().await;
        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/vehicles")
                    .header(header::AUTHORIZATION, basic_auth("fahad", "nope"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn vehicle_create_then_list() {
        let router = test_router().await;

        let response = router
            .clone()
            .oneshot(request("POST", "/vehicles", Some(outback())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        let id = created["id"].as_str().unwrap().to_string();

        let response = router
            .oneshot(request("GET", "/vehicles", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["vehicles"].as_array().unwrap().len(), 1);
        assert_eq!(body["vehicles"][0]["id"], Value::String(id));
        assert_eq!(body["vehicles"][0]["name"], "Outback");
    }

    #[tokio::test]
    async fn unknown_vehicle_is_404() {
        let router = test_router().await;
        let response = router
            .oneshot(request(
                "GET",
                "/vehicles/00000000-0000-0000-0000-000000000000",
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_consumption_is_422() {
        let router = test_router().await;
        let mut vehicle = outback();
        vehicle["consumption"] = json!(0.0);
        let response = router
            .oneshot(request("POST", "/vehicles", Some(vehicle)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn trip_calculate_returns_breakdown() {
        let router = test_router().await;

        let response = router
            .clone()
            .oneshot(request("POST", "/vehicles", Some(outback())))
            .await
            .unwrap();
        let vehicle_id = json_body(response).await["id"].as_str().unwrap().to_string();

        let response = router
            .clone()
            .oneshot(request("POST", "/trips", Some(andalusia_trip(&vehicle_id))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let trip_id = json_body(response).await["id"].as_str().unwrap().to_string();

        let response = router
            .clone()
            .oneshot(request("POST", &format!("/trips/{trip_id}/calculate"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let results = json_body(response).await;
        assert!((results["total_cost"].as_f64().unwrap() - 143.0).abs() < 1e-9);
        assert!((results["cost_per_day"].as_f64().unwrap() - 28.6).abs() < 1e-9);
        assert!((results["cost_per_km"].as_f64().unwrap() - 0.286).abs() < 1e-9);

        // The snapshot is now visible on the trip detail.
        let response = router
            .oneshot(request("GET", &format!("/trips/{trip_id}"), None))
            .await
            .unwrap();
        let detail = json_body(response).await;
        assert!(detail["results"].is_object());
        assert_eq!(detail["segments"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn vehicle_in_use_delete_is_409() {
        let router = test_router().await;

        let response = router
            .clone()
            .oneshot(request("POST", "/vehicles", Some(outback())))
            .await
            .unwrap();
        let vehicle_id = json_body(response).await["id"].as_str().unwrap().to_string();

        router
            .clone()
            .oneshot(request("POST", "/trips", Some(andalusia_trip(&vehicle_id))))
            .await
            .unwrap();

        let response = router
            .oneshot(request("DELETE", &format!("/vehicles/{vehicle_id}"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn settings_roundtrip() {
        let router = test_router().await;

        let response = router
            .clone()
            .oneshot(request("GET", "/settings", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let defaults = json_body(response).await;
        assert_eq!(defaults["base_currency"], "KWD");
        assert!((defaults["default_safety_margin_percent"].as_f64().unwrap() - 15.0).abs() < 1e-9);

        let update = json!({
            "base_currency": "EUR",
            "default_safety_margin_percent": 20.0,
            "default_comfort_level": 70,
            "default_stay_costs": {
                "hotel_per_night": 60.0,
                "paid_camp_per_night": 18.0,
                "free_camp_per_night": 0.0,
                "friend_family_per_night": 0.0,
            },
        });
        let response = router
            .clone()
            .oneshot(request("PUT", "/settings", Some(update)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated = json_body(response).await;
        assert_eq!(updated["base_currency"], "EUR");
        assert!((updated["default_stay_costs"]["hotel_per_night"].as_f64().unwrap() - 60.0).abs() < 1e-9);
    }
}
