use serde_json::json;

use super::*;
use crate::index::{MockIndex, RawHit, RecordMetadata};

fn hit(id: &str, score: f64) -> RawHit {
    RawHit {
        id: id.to_string(),
        score,
        fields: RecordMetadata::default(),
    }
}

fn jobseeker() -> Record {
    serde_json::from_value(json!({ "name": "田中", "skills": "Python" }))
        .expect("should deserialize")
}

#[test]
fn scale_score_rounds_to_one_decimal() {
    assert_eq!(scale_score(0.8534), 85.3);
    assert_eq!(scale_score(0.8536), 85.4);
    assert_eq!(scale_score(0.0), 0.0);
    assert_eq!(scale_score(1.0), 100.0);
}

#[test]
fn scaled_scores_stay_in_percentage_range() {
    for raw in [0.0, 0.001, 0.25, 0.5, 0.7777, 0.9999, 1.0] {
        let score = scale_score(raw);
        assert!((0.0..=100.0).contains(&score), "raw {raw} gave {score}");
        // One decimal place: scaling by ten lands on a whole number.
        let tenths = score * 10.0;
        assert!((tenths - tenths.round()).abs() < 1e-9, "raw {raw} gave {score}");
    }
}

#[tokio::test]
async fn jobseeker_searches_the_jobs_namespace() {
    let mock = MockIndex::new();
    let matches = rank(&mock, &jobseeker(), RecordType::Jobseeker, 5)
        .await
        .expect("rank should succeed");

    assert!(matches.is_empty());
    assert_eq!(mock.searched_namespaces(), vec!["jobs".to_string()]);
}

#[tokio::test]
async fn job_searches_the_jobseekers_namespace() {
    let mock = MockIndex::new();
    rank(&mock, &Record::default(), RecordType::Job, 5)
        .await
        .expect("rank should succeed");

    assert_eq!(mock.searched_namespaces(), vec!["jobseekers".to_string()]);
}

#[tokio::test]
async fn backend_order_is_preserved_and_scores_scaled() {
    let mock = MockIndex::new();
    mock.push_hits(
        "jobs",
        vec![hit("job-3", 0.91), hit("job-1", 0.85), hit("job-2", 0.432)],
    );

    let matches = rank(&mock, &jobseeker(), RecordType::Jobseeker, 5)
        .await
        .expect("rank should succeed");

    let ids: Vec<&str> = matches.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["job-3", "job-1", "job-2"]);
    assert_eq!(matches[0].score, 91.0);
    assert_eq!(matches[1].score, 85.0);
    assert_eq!(matches[2].score, 43.2);
    assert!(matches.iter().all(|m| m.reason.is_none()));
}

#[tokio::test]
async fn backend_failure_propagates() {
    let mock = MockIndex::new();
    mock.fail_with(500, "index exploded");

    let err = rank(&mock, &jobseeker(), RecordType::Jobseeker, 5)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("500"));
}

#[test]
fn match_serializes_null_reason_and_metadata_object() {
    let m = Match {
        id: "job-1".to_string(),
        score: 85.3,
        metadata: RecordMetadata {
            name: Some("インフラエンジニア".to_string()),
            ..Default::default()
        },
        reason: None,
    };

    let value = serde_json::to_value(&m).expect("should serialize");
    assert_eq!(value["id"], "job-1");
    assert_eq!(value["score"], 85.3);
    assert!(value["reason"].is_null());
    assert_eq!(value["metadata"]["name"], "インフラエンジニア");
    assert!(value["metadata"].get("skills").is_none());
}
