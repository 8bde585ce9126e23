use super::*;

fn jobseeker_record() -> Record {
    serde_json::from_value(serde_json::json!({
        "name": "田中",
        "skills": "Python, AWS",
        "experience_years": 5,
        "desired_position": "バックエンドエンジニア",
        "desired_location": "東京",
        "desired_salary": 600,
        "self_pr": "クラウド基盤の設計運用が得意です"
    }))
    .expect("should deserialize jobseeker record")
}

fn job_record() -> Record {
    serde_json::from_value(serde_json::json!({
        "title": "SREエンジニア",
        "required_skills": "Kubernetes, Terraform",
        "required_experience": 3,
        "position": "SRE",
        "location": "大阪",
        "salary_min": 500,
        "salary_max": 800,
        "description": "大規模サービスの信頼性向上を担当"
    }))
    .expect("should deserialize job record")
}

#[test]
fn jobseeker_profile_text_uses_fixed_template() {
    let record = jobseeker_record();
    let text = record.profile_text(RecordType::Jobseeker);

    assert!(text.starts_with("氏名: 田中\nスキル: Python, AWS"));
    assert!(text.contains("経験年数: 5年"));
    assert!(text.contains("希望職種: バックエンドエンジニア"));
    assert!(text.contains("希望勤務地: 東京"));
    assert!(text.contains("希望年収: 600万円"));
    assert!(text.ends_with("自己PR: クラウド基盤の設計運用が得意です"));
}

#[test]
fn job_profile_text_uses_fixed_template() {
    let record = job_record();
    let text = record.profile_text(RecordType::Job);

    assert!(text.starts_with("求人タイトル: SREエンジニア"));
    assert!(text.contains("必要スキル: Kubernetes, Terraform"));
    assert!(text.contains("経験年数: 3年以上"));
    assert!(text.contains("年収: 500-800万円"));
    assert!(text.ends_with("仕事内容: 大規模サービスの信頼性向上を担当"));
}

#[test]
fn profile_text_is_deterministic() {
    let record = jobseeker_record();
    let first = record.profile_text(RecordType::Jobseeker);
    let second = record.profile_text(RecordType::Jobseeker);
    assert_eq!(first, second);
}

#[test]
fn missing_fields_render_as_empty_strings() {
    let record = Record::default();
    let text = record.profile_text(RecordType::Jobseeker);

    assert!(text.starts_with("氏名: \nスキル: "));
    // Trailing whitespace after the last empty label is trimmed.
    assert!(text.ends_with("自己PR:"));
}

#[test]
fn empty_job_renders_bare_salary_range() {
    let record = Record::default();
    let text = record.profile_text(RecordType::Job);
    assert!(text.contains("年収: -万円"));
}

#[test]
fn numeric_scalars_are_normalized_to_strings() {
    let record: Record = serde_json::from_value(serde_json::json!({
        "experience_years": 5,
        "desired_salary": 600.5
    }))
    .expect("should deserialize");

    assert_eq!(record.experience_years.as_deref(), Some("5"));
    assert_eq!(record.desired_salary.as_deref(), Some("600.5"));
}

#[test]
fn unrecognized_fields_are_ignored() {
    let record: Record = serde_json::from_value(serde_json::json!({
        "name": "田中",
        "crm_internal_id": "zcrm_12345",
        "nested": {"anything": true}
    }))
    .expect("should deserialize despite unknown fields");

    assert_eq!(record.name.as_deref(), Some("田中"));
}

#[test]
fn summary_clips_free_text_to_100_chars() {
    let long_pr = "あ".repeat(150);
    let record: Record = serde_json::from_value(serde_json::json!({
        "name": "田中",
        "self_pr": long_pr
    }))
    .expect("should deserialize");

    let summary = record.summary(RecordType::Jobseeker);
    let clipped = "あ".repeat(100);
    assert!(summary.ends_with(&format!("自己PR: {clipped}")));
    assert!(!summary.contains(&"あ".repeat(101)));
}

#[test]
fn record_type_round_trips_through_serde() {
    let jobseeker: RecordType =
        serde_json::from_value(serde_json::json!("jobseeker")).expect("should parse");
    let job: RecordType = serde_json::from_value(serde_json::json!("job")).expect("should parse");

    assert_eq!(jobseeker, RecordType::Jobseeker);
    assert_eq!(job, RecordType::Job);
    assert!(serde_json::from_value::<RecordType>(serde_json::json!("banana")).is_err());
}

#[test]
fn namespaces_are_always_crossed() {
    assert_eq!(RecordType::Jobseeker.upsert_namespace(), NAMESPACE_JOBSEEKERS);
    assert_eq!(RecordType::Jobseeker.search_namespace(), NAMESPACE_JOBS);
    assert_eq!(RecordType::Job.upsert_namespace(), NAMESPACE_JOBS);
    assert_eq!(RecordType::Job.search_namespace(), NAMESPACE_JOBSEEKERS);

    for record_type in [RecordType::Jobseeker, RecordType::Job] {
        assert_ne!(
            record_type.upsert_namespace(),
            record_type.search_namespace()
        );
    }
}

#[test]
fn display_accessors_fall_back_across_record_kinds() {
    let job = job_record();
    assert_eq!(job.display_name(), "SREエンジニア");
    assert_eq!(job.combined_skills(), "Kubernetes, Terraform");
    assert_eq!(job.display_location(), "大阪");
    assert_eq!(job.display_position(), "SRE");
    assert_eq!(job.salary_text(), "500-800");

    let jobseeker = jobseeker_record();
    assert_eq!(jobseeker.display_name(), "田中");
    assert_eq!(jobseeker.salary_text(), "600");
}

#[test]
fn empty_primary_field_falls_through_to_secondary() {
    let record: Record = serde_json::from_value(serde_json::json!({
        "name": "",
        "title": "営業マネージャー"
    }))
    .expect("should deserialize");

    assert_eq!(record.display_name(), "営業マネージャー");
}

#[test]
fn truncate_chars_counts_characters_not_bytes() {
    assert_eq!(truncate_chars("こんにちは", 3), "こんに");
    assert_eq!(truncate_chars("abc", 10), "abc");
    assert_eq!(truncate_chars("", 5), "");
}
