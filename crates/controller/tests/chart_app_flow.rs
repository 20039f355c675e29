use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use client_core::{ApiGateway, ReqwestTransport};
use controller::{
    Applied, BirthField, ChartApp, ListView, ResultView, SubmitDecision, UiErrorCategory,
    ViewEffect,
};
use serde_json::json;
use tokio::net::TcpListener;
use url::Url;

#[derive(Clone, Default)]
struct Hits {
    list: Arc<AtomicUsize>,
    calculate: Arc<AtomicUsize>,
}

fn chart_json(name: &str) -> serde_json::Value {
    json!({
        "_id": format!("{name}-id"),
        "name": name,
        "birthDate": "1990-01-05",
        "birthTime": "14:30",
        "birthLocation": "London, UK",
        "sunSign": "Capricorn",
        "moonSign": "Leo",
        "risingSign": "Gemini",
        "planets": {
            "mars": { "sign": "Sagittarius", "degree": 2 },
            "sun": { "sign": "Capricorn", "degree": 14.75 },
            "moon": { "sign": "Leo", "degree": 8 },
            "mercury": { "sign": "Capricorn", "degree": 27 },
            "venus": { "sign": "Aquarius", "degree": 11.5 }
        }
    })
}

// First list call fails, later ones succeed.
async fn list_charts(State(hits): State<Hits>) -> (StatusCode, String) {
    if hits.list.fetch_add(1, Ordering::SeqCst) == 0 {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "success": false, "error": "Database offline" }).to_string(),
        );
    }
    (
        StatusCode::OK,
        json!({ "success": true, "data": [chart_json("Ada")], "count": 1 }).to_string(),
    )
}

// First calculation is rejected with field errors, later ones succeed.
async fn calculate_chart(State(hits): State<Hits>) -> (StatusCode, String) {
    if hits.calculate.fetch_add(1, Ordering::SeqCst) == 0 {
        return (
            StatusCode::BAD_REQUEST,
            json!({
                "success": false,
                "errors": [
                    { "msg": "Invalid date", "param": "birthDate" },
                    { "msg": "Unknown location", "param": "birthLocation" }
                ]
            })
            .to_string(),
        );
    }
    (
        StatusCode::OK,
        json!({ "success": true, "data": chart_json("Grace") }).to_string(),
    )
}

async fn spawn_app() -> anyhow::Result<ChartApp> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let router = Router::new()
        .route("/api/charts", get(list_charts))
        .route("/api/charts/calculate", post(calculate_chart))
        .with_state(Hits::default());
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    let base_url = Url::parse(&format!("http://{addr}/"))?;
    let transport = ReqwestTransport::new(base_url, Duration::from_secs(5))?;
    Ok(ChartApp::new(ApiGateway::new(Arc::new(transport))))
}

async fn next_applied(app: &mut ChartApp) -> Applied {
    tokio::time::timeout(Duration::from_secs(5), app.process_next())
        .await
        .expect("completion within timeout")
        .expect("a completion was pending")
}

#[tokio::test]
async fn list_recovers_after_retry() -> anyhow::Result<()> {
    let mut app = spawn_app().await?;

    assert!(app.activate_list());
    next_applied(&mut app).await;
    let ListView::Failed(error) = app.list().view() else {
        panic!("expected error panel, got {:?}", app.list().view());
    };
    assert_eq!(error.message(), "Database offline");
    assert_eq!(error.category(), UiErrorCategory::Server);

    assert!(app.retry_list());
    assert_eq!(app.list().view(), ListView::Loading);
    next_applied(&mut app).await;

    let ListView::Charts(charts) = app.list().view() else {
        panic!("expected chart grid");
    };
    assert_eq!(charts.len(), 1);
    assert_eq!(
        charts[0].chart_id().map(|id| id.to_string()),
        Some("Ada-id".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn calculation_shows_field_errors_then_result() -> anyhow::Result<()> {
    let mut app = spawn_app().await?;
    app.edit(BirthField::Date, "1990-01-05");
    app.edit(BirthField::Time, "14:30");
    app.edit(BirthField::Location, "Atlantis");

    assert!(matches!(app.submit(), SubmitDecision::Issued(_)));
    let applied = next_applied(&mut app).await;
    assert!(applied.effect.is_none());
    let ResultView::Failed(error) = app.calculator().result_view() else {
        panic!("expected error panel");
    };
    assert_eq!(error.message(), "Invalid date, Unknown location");
    assert_eq!(app.calculator().form().field(BirthField::Location).value(), "Atlantis");

    app.edit(BirthField::Location, "London, UK");
    assert!(matches!(app.submit(), SubmitDecision::Issued(_)));
    let applied = next_applied(&mut app).await;

    assert!(matches!(
        applied.effect,
        Some(ViewEffect::ScrollToResult { .. })
    ));
    let ResultView::Chart(chart) = app.calculator().result_view() else {
        panic!("expected chart result");
    };
    assert_eq!(chart.display_name(), "Grace");
    assert_eq!(chart.planets.mars.sign, "Sagittarius");
    assert!(app.calculator().form().is_empty());
    Ok(())
}

#[tokio::test]
async fn unreachable_service_surfaces_transport_message() -> anyhow::Result<()> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let base_url = Url::parse(&format!("http://{addr}"))?;
    let transport = ReqwestTransport::new(base_url, Duration::from_secs(5))?;
    let mut app = ChartApp::new(ApiGateway::new(Arc::new(transport)));

    app.activate_list();
    next_applied(&mut app).await;

    let error = app.list().error().expect("transport error");
    assert_eq!(error.category(), UiErrorCategory::Transport);
    assert!(error
        .message()
        .starts_with("Http failure response for /api/charts: 0 Unknown Error"));
    Ok(())
}
