//! End-to-end scenarios driven through the public router with mock
//! backends: upsert, crossed-namespace search, both enrichment modes, and
//! the failure paths a CRM caller can observe.

use axum::{Router, body::Body, http::Request, http::StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use kakehashi::explain::MockChat;
use kakehashi::gateway::{HandlerState, create_router_with_state};
use kakehashi::index::{MockIndex, RawHit, RecordMetadata};

fn router(index: MockIndex, chat: MockChat) -> Router {
    create_router_with_state(HandlerState::new(index, chat))
}

fn tanaka() -> Value {
    json!({ "name": "田中", "skills": "Python, AWS" })
}

fn hit(id: &str, score: f64) -> RawHit {
    RawHit {
        id: id.to_string(),
        score,
        fields: RecordMetadata {
            record_type: Some("job".to_string()),
            name: Some("クラウドエンジニア".to_string()),
            skills: Some("Python, AWS, GCP".to_string()),
            location: Some("東京".to_string()),
            salary: Some("600-900".to_string()),
            position: Some("インフラ".to_string()),
        },
    }
}

async fn post(router: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn upserted_jobseeker_lands_in_the_jobseekers_namespace() {
    let index = MockIndex::new();
    let app = router(index.clone(), MockChat::unconfigured());

    let (status, body) = post(
        &app,
        "/upsert",
        json!({ "record_id": "js1", "record": tanaka(), "record_type": "jobseeker" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "record_id": "js1" }));

    let stored = index.records_in("jobseekers");
    assert_eq!(stored.len(), 1);
    assert!(stored[0].text.starts_with("氏名: 田中\nスキル: Python, AWS"));
}

#[tokio::test]
async fn plain_search_returns_matches_without_any_enrichment() {
    let index = MockIndex::new();
    index.push_hits("jobs", vec![hit("job-1", 0.87), hit("job-2", 0.52)]);
    let chat = MockChat::replying("never used");
    let app = router(index.clone(), chat.clone());

    let (status, body) = post(
        &app,
        "/search",
        json!({
            "record_id": "js1",
            "record": tanaka(),
            "record_type": "jobseeker",
            "top_k": 5,
            "generate_reasons": false,
            "generate_summary": false
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["record_id"], "js1");
    assert!(body["summary"].is_null());

    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    for entry in matches {
        let score = entry["score"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&score));
        assert!(entry["reason"].is_null());
    }

    assert_eq!(index.searched_namespaces(), vec!["jobs".to_string()]);
    assert_eq!(chat.call_count(), 0);
}

#[tokio::test]
async fn summary_mode_yields_a_summary_and_no_per_match_reasons() {
    let index = MockIndex::new();
    index.push_hits("jobs", vec![hit("job-1", 0.87), hit("job-2", 0.52)]);
    let app = router(index, MockChat::replying("相性の良い求人が上位に並ぶ。"));

    let (status, body) = post(
        &app,
        "/search",
        json!({
            "record_id": "js1",
            "record": tanaka(),
            "record_type": "jobseeker",
            "generate_summary": true
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "相性の良い求人が上位に並ぶ。");
    for entry in body["matches"].as_array().unwrap() {
        assert!(entry["reason"].is_null());
    }
}

#[tokio::test]
async fn reason_mode_caps_generation_at_three_matches() {
    let index = MockIndex::new();
    index.push_hits(
        "jobs",
        (0..5).map(|i| hit(&format!("job-{i}"), 0.9 - 0.1 * i as f64)).collect(),
    );
    let chat = MockChat::replying("スキルが合致している。");
    let app = router(index, chat.clone());

    let (status, body) = post(
        &app,
        "/search",
        json!({
            "record_id": "js1",
            "record": tanaka(),
            "record_type": "jobseeker",
            "generate_reasons": true
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 5);
    assert!(matches[..3].iter().all(|m| m["reason"].is_string()));
    assert!(matches[3..].iter().all(|m| m["reason"].is_null()));
    assert_eq!(chat.call_count(), 3);
}

#[tokio::test]
async fn upsert_with_only_an_id_is_rejected_with_the_field_list() {
    let app = router(MockIndex::new(), MockChat::unconfigured());

    let (status, body) = post(&app, "/upsert", json!({ "record_id": "x" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Missing required fields: record_id, record, record_type" })
    );
}

#[tokio::test]
async fn backend_500_fails_the_search_before_generation_starts() {
    let index = MockIndex::new();
    index.fail_with(500, "internal index error");
    let chat = MockChat::replying("never used");
    let app = router(index, chat.clone());

    let (status, body) = post(
        &app,
        "/search",
        json!({
            "record_id": "js1",
            "record": tanaka(),
            "record_type": "jobseeker",
            "generate_reasons": true,
            "generate_summary": true
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("500"));
    assert_eq!(chat.call_count(), 0);
}
