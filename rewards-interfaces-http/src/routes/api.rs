use axum::routing::{get, post};
use axum::Router;

use rewards_application::AppState;

use crate::handlers::{history_handlers, ops_handlers, record_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/pontos", post(record_handlers::record_point))
        .route("/transacoes", post(record_handlers::record_transaction))
        .route("/hist", get(history_handlers::all_history))
        .route("/hist/:id_user", get(history_handlers::user_history))
        .route("/ops/health/live", get(ops_handlers::health_live))
        .route("/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    use anyhow::anyhow;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use rewards_application::Metrics;
    use rewards_domain::{
        local_now, Clock, DateWindow, NewTransaction, PointEvent, RecordStore, RuntimeConfig,
        Transaction,
    };
    use rewards_infrastructure::{MemoryRecordStore, SystemClock};

    /// Advances one second per reading so consecutive writes are ordered.
    struct SteppingClock {
        base: NaiveDateTime,
        ticks: AtomicI64,
    }

    impl Clock for SteppingClock {
        fn now(&self) -> NaiveDateTime {
            self.base + Duration::seconds(self.ticks.fetch_add(1, Ordering::SeqCst))
        }
    }

    struct UnavailableStore;

    #[async_trait]
    impl RecordStore for UnavailableStore {
        async fn ensure_schema(&self) -> anyhow::Result<()> {
            Err(anyhow!("connection refused"))
        }

        async fn insert_point_event(&self, _event: &PointEvent) -> anyhow::Result<()> {
            Err(anyhow!("connection refused"))
        }

        async fn insert_transaction(&self, _transaction: &NewTransaction) -> anyhow::Result<String> {
            Err(anyhow!("connection refused"))
        }

        async fn query_point_events(
            &self,
            _user_id: Option<&str>,
            _window: &DateWindow,
        ) -> anyhow::Result<Vec<PointEvent>> {
            Err(anyhow!("connection refused"))
        }

        async fn query_transactions(
            &self,
            _user_id: Option<&str>,
            _window: &DateWindow,
        ) -> anyhow::Result<Vec<Transaction>> {
            Err(anyhow!("connection refused"))
        }

        async fn ping(&self) -> anyhow::Result<()> {
            Err(anyhow!("connection refused"))
        }
    }

    fn app(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Router {
        build_router(AppState {
            config: RuntimeConfig::default(),
            store,
            clock,
            metrics: Arc::new(Metrics::default()),
        })
    }

    fn system_app(store: Arc<MemoryRecordStore>) -> Router {
        app(store, Arc::new(SystemClock::new(chrono_tz::America::Sao_Paulo)))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn get_uri(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.expect("router response");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        if body.is_empty() {
            return (status, Value::Null);
        }
        (status, serde_json::from_slice(&body).expect("json body"))
    }

    #[tokio::test]
    async fn recorded_point_shows_up_in_user_history() {
        let app = system_app(Arc::new(MemoryRecordStore::new()));
        let today_before = local_now(chrono_tz::America::Sao_Paulo).format("%d/%m/%Y").to_string();

        let (status, body) = send(
            &app,
            post_json("/pontos", json!({"id": "p1", "idUser": "u1", "points": 10})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "point recorded");

        let (status, body) = send(&app, get_uri("/hist/u1")).await;
        let today_after = local_now(chrono_tz::America::Sao_Paulo).format("%d/%m/%Y").to_string();
        assert_eq!(status, StatusCode::OK);
        let entries = body.as_array().expect("flat history");
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry["id"], "p1");
        assert_eq!(entry["idUser"], "u1");
        assert_eq!(entry["points"], 10);
        assert_eq!(entry["tipo"], "ponto");
        assert!(entry.get("description").is_none());
        let date = entry["date"].as_str().expect("date string");
        assert!(
            date.starts_with(&today_before) || date.starts_with(&today_after),
            "unexpected date {}",
            date
        );
    }

    #[tokio::test]
    async fn later_point_is_listed_before_earlier_transaction() {
        let base = NaiveDate::from_ymd_opt(2024, 3, 10)
            .and_then(|date| date.and_hms_opt(9, 0, 0))
            .expect("valid datetime");
        let clock = Arc::new(SteppingClock {
            base,
            ticks: AtomicI64::new(0),
        });
        let app = app(Arc::new(MemoryRecordStore::new()), clock);

        let (status, _) = send(
            &app,
            post_json(
                "/transacoes",
                json!({"idUser": "u1", "description": "movie ticket", "points": 200}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = send(
            &app,
            post_json("/pontos", json!({"id": "p1", "idUser": "u1", "points": 10})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, get_uri("/hist/u1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["tipo"], "ponto");
        assert_eq!(body[0]["date"], "10/03/2024, 09:00:01");
        assert_eq!(body[1]["tipo"], "transacao");
        assert_eq!(body[1]["description"], "movie ticket");
        assert_eq!(body[1]["date"], "10/03/2024, 09:00:00");
    }

    #[tokio::test]
    async fn all_user_history_is_keyed_by_user() {
        let app = system_app(Arc::new(MemoryRecordStore::new()));
        for (id, user) in [("p1", "u1"), ("p2", "u2")] {
            let (status, _) = send(
                &app,
                post_json("/pontos", json!({"id": id, "idUser": user, "points": 5})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(&app, get_uri("/hist")).await;
        assert_eq!(status, StatusCode::OK);
        let groups = body.as_object().expect("grouped history");
        let mut keys: Vec<&String> = groups.keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["u1", "u2"]);
        assert_eq!(groups["u1"].as_array().map(Vec::len), Some(1));
        assert_eq!(groups["u2"].as_array().map(Vec::len), Some(1));
        assert_eq!(groups["u2"][0]["id"], "p2");
    }

    #[tokio::test]
    async fn records_outside_the_window_are_excluded() {
        let store = Arc::new(MemoryRecordStore::new());
        let now = local_now(chrono_tz::America::Sao_Paulo);
        let two_years_ago = now - Duration::days(730);
        store
            .insert_point_event(&PointEvent {
                id: "old".to_string(),
                user_id: "u1".to_string(),
                points: 10,
                occurred_at: two_years_ago,
            })
            .await
            .expect("seed old point");
        let app = system_app(store);
        let (status, _) = send(
            &app,
            post_json("/pontos", json!({"id": "new", "idUser": "u1", "points": 10})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let today = local_now(chrono_tz::America::Sao_Paulo).date();
        let first = today.with_day(1).expect("first day of month");
        let last = first
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .expect("last day of month");
        let uri = format!(
            "/hist/u1?start={}&end={}",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d")
        );
        let (status, body) = send(&app, get_uri(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = body
            .as_array()
            .expect("flat history")
            .iter()
            .filter_map(|entry| entry["id"].as_str())
            .collect();
        assert_eq!(ids, vec!["new"]);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_with_400() {
        let store = Arc::new(MemoryRecordStore::new());
        let app = system_app(store.clone());

        let (status, body) = send(&app, post_json("/pontos", json!({"id": "p1", "points": 0}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["detail"], "missing required fields: idUser, points");

        let (status, body) = send(
            &app,
            post_json("/transacoes", json!({"idUser": "u1", "points": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "missing required fields: description");

        let (status, body) = send(&app, post_json("/pontos", json!({"id": "p1", "idUser": "u1", "points": "ten"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_body");

        let stored = store
            .query_point_events(None, &DateWindow::default())
            .await
            .expect("query points");
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn integral_float_points_are_accepted() {
        let app = system_app(Arc::new(MemoryRecordStore::new()));

        let (status, body) = send(
            &app,
            post_json("/pontos", json!({"id": "p1", "idUser": "u1", "points": 10.0})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "point recorded");

        let (status, body) = send(&app, get_uri("/hist/u1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["points"], 10);

        let (status, body) = send(
            &app,
            post_json(
                "/transacoes",
                json!({"idUser": "u1", "description": "snack", "points": 2.5}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["detail"], "not a whole number: points");
    }

    #[tokio::test]
    async fn malformed_dates_are_rejected_with_400() {
        let app = system_app(Arc::new(MemoryRecordStore::new()));
        let (status, body) = send(&app, get_uri("/hist?start=2024-13-01")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn store_failures_map_to_500() {
        let clock = Arc::new(SystemClock::new(chrono_tz::America::Sao_Paulo));
        let app = app(Arc::new(UnavailableStore), clock);

        let (status, body) = send(&app, get_uri("/hist/u1")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "store_access_error");
        assert!(body["detail"]
            .as_str()
            .expect("detail")
            .contains("connection refused"));

        let (status, _) = send(
            &app,
            post_json("/pontos", json!({"id": "p1", "idUser": "u1", "points": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) = send(&app, get_uri("/ops/health/ready")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn ops_routes_report_health_and_metrics() {
        let app = system_app(Arc::new(MemoryRecordStore::new()));
        let (status, _) = send(&app, get_uri("/ops/health/live")).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, get_uri("/ops/health/ready")).await;
        assert_eq!(status, StatusCode::OK);

        send(
            &app,
            post_json("/pontos", json!({"id": "p1", "idUser": "u1", "points": 1})),
        )
        .await;
        let response = app
            .clone()
            .oneshot(get_uri("/ops/metrics/prometheus"))
            .await
            .expect("metrics response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        let text = String::from_utf8(body.to_vec()).expect("utf8 metrics");
        assert!(text.contains("rewards_points_recorded_total 1\n"));
    }
}
