//! Drives the assembled site router the way the front end does: quiz steps,
//! promo validation, quoting and the lead form.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use hvac_quote::config::{
    AppConfig, AppEnvironment, PricingConfig, PromotionConfig, ServerConfig, TelemetryConfig,
};
use hvac_quote_api::{build_app, AppState};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use tower::ServiceExt;

fn config(seed_defaults: bool) -> AppConfig {
    AppConfig {
        environment: AppEnvironment::Test,
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        telemetry: TelemetryConfig {
            log_level: "info".to_string(),
        },
        pricing: PricingConfig::default(),
        promotions: PromotionConfig { seed_defaults },
    }
}

fn app(seed_defaults: bool) -> (Router, AppState) {
    let state = AppState::new(PrometheusBuilder::new().build_recorder().handle());
    let router = build_app(&config(seed_defaults), state.clone()).expect("app builds");
    (router, state)
}

fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
            .expect("request builds"),
        None => builder.body(Body::empty()).expect("request builds"),
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("route executes");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    let payload = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, payload)
}

#[tokio::test]
async fn quiz_to_quote_to_lead() {
    let (router, _) = app(true);

    let (status, steps) = send(&router, request(Method::GET, "/api/quiz/steps", None)).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = steps
        .as_array()
        .expect("step list")
        .iter()
        .filter_map(|step| step["id"].as_str())
        .collect();
    assert_eq!(
        ids,
        ["systemType", "type", "size", "currentSystem", "issue", "priority", "rebate"]
    );

    let (status, promo) = send(
        &router,
        request(Method::GET, "/api/promoCodes?code=fullsystem", None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(promo["rebate"], json!(1000));

    let (status, sheet) = send(
        &router,
        request(
            Method::POST,
            "/api/quotes",
            Some(json!({
                "priority": "budget",
                "size": "3ton",
                "systemType": "split",
                "rebate": "FullSystem"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sheet["appliedRebate"], json!(1000));
    assert_eq!(sheet["silver"]["price"]["low"], json!(9600));
    assert_eq!(sheet["gold"]["recommended"], json!(true));

    let (status, lead) = send(
        &router,
        request(
            Method::POST,
            "/api/leads",
            Some(json!({
                "name": "Priya Raman",
                "email": "priya@example.com",
                "phone": "602 555 0111",
                "address": "3300 N Central Ave, Phoenix",
                "tier": "gold"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(lead["tier"], json!("gold"));

    let (status, leads) = send(&router, request(Method::GET, "/api/leads", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(leads.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn unseeded_site_quotes_without_rebates() {
    let (router, _) = app(false);

    let (status, codes) = send(&router, request(Method::GET, "/api/promoCodes", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(codes, json!([]));

    let (status, sheet) = send(
        &router,
        request(
            Method::POST,
            "/api/quotes",
            Some(json!({ "priority": "budget", "rebate": "FullSystem" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sheet["appliedRebate"], json!(0));
    assert_eq!(sheet["silver"]["price"]["low"], json!(10600));
}

#[tokio::test]
async fn operational_endpoints_respond() {
    let (router, state) = app(true);

    let (status, health) = send(&router, request(Method::GET, "/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], json!("ok"));

    let (status, _) = send(&router, request(Method::GET, "/ready", None)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    state.mark_ready();
    let (status, ready) = send(&router, request(Method::GET, "/ready", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ready["status"], json!("ready"));
}

#[tokio::test]
async fn admin_crud_round_trip() {
    let (router, _) = app(true);

    let (status, created) = send(
        &router,
        request(
            Method::POST,
            "/api/promoCodes",
            Some(json!({ "code": "Monsoon", "amount": 400 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_u64().expect("numeric id");

    let (status, updated) = send(
        &router,
        request(
            Method::PUT,
            &format!("/api/promoCodes/{id}"),
            Some(json!({ "isActive": false })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["isActive"], json!(false));

    let (status, _) = send(
        &router,
        request(Method::GET, "/api/promoCodes?code=monsoon", None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &router,
        request(Method::DELETE, &format!("/api/promoCodes/{id}"), None),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
