//! HTTP API route definitions.

use axum::{
    middleware,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{health, metrics, openapi_json, ready, AppState};
use super::patients::{
    create_patient, get_patient, list_patients, search_patients, update_patient,
};
use crate::metrics::track_http;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        // Patient resource, no DELETE
        .route("/v1/patients", get(list_patients).post(create_patient))
        .route("/v1/patients/", get(list_patients))
        .route("/v1/patients/search", get(search_patients))
        .route("/v1/patients/:id", get(get_patient).put(update_patient))
        .route_layer(middleware::from_fn(track_http))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::db::PatientStore;

    async fn app() -> Router {
        let store = PatientStore::connect(&Config::for_database("sqlite::memory:"))
            .await
            .unwrap();
        create_router(AppState::new(store, None))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let response = app()
            .await
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn ready_endpoint_returns_200_when_database_is_up() {
        let response = app()
            .await
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "ready": true }));
    }

    #[tokio::test]
    async fn ready_endpoint_returns_503_when_pool_is_closed() {
        let store = PatientStore::connect(&Config::for_database("sqlite::memory:"))
            .await
            .unwrap();
        store.pool().close().await;
        let app = create_router(AppState::new(store, None));

        let response = app
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn patient_routes_return_500_when_pool_is_closed() {
        let store = PatientStore::connect(&Config::for_database("sqlite::memory:"))
            .await
            .unwrap();
        store.pool().close().await;
        let app = create_router(AppState::new(store, None));

        let list = app
            .clone()
            .oneshot(Request::builder().uri("/v1/patients/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(list.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_json(list).await["error"].is_string());

        let update = app
            .oneshot(json_request(Method::PUT, "/v1/patients/1", json!({ "phone": 5559999 })))
            .await
            .unwrap();
        assert_eq!(update.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_json(update).await["error"].is_string());
    }

    #[tokio::test]
    async fn metrics_endpoint_is_404_without_recorder() {
        let response = app()
            .await
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_is_served_with_and_without_trailing_slash() {
        let app = app().await;

        for uri in ["/v1/patients/", "/v1/patients"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_json(response).await, json!({ "patients": [] }));
        }
    }

    #[tokio::test]
    async fn create_with_missing_field_is_bad_request() {
        let app = app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/v1/patients",
                json!({ "name": "Alice", "age": 30, "address": "1 Main St", "phone": 1 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("admission"));

        let list = app
            .oneshot(Request::builder().uri("/v1/patients/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(list).await, json!({ "patients": [] }));
    }

    #[tokio::test]
    async fn create_with_malformed_json_is_bad_request() {
        let response = app()
            .await
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/v1/patients")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn non_integer_id_is_bad_request() {
        let response = app()
            .await
            .oneshot(
                Request::builder()
                    .uri("/v1/patients/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_is_not_routed() {
        let response = app()
            .await
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/v1/patients/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let response = app()
            .await
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let doc = body_json(response).await;
        assert!(doc["paths"]["/v1/patients/search"].is_object());
    }
}
