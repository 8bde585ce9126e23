//! Profile formatting.
//!
//! Turns a caller-supplied candidate or job record into the normalized
//! free text that gets embedded into the vector index, plus the short
//! one-line summaries used for prompt construction. Everything in here is
//! pure: the same record always renders the same text.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Deserializer, Serialize};

/// Namespace holding candidate profiles.
pub const NAMESPACE_JOBSEEKERS: &str = "jobseekers";

/// Namespace holding job postings.
pub const NAMESPACE_JOBS: &str = "jobs";

/// Free-text fields are clipped to this many characters in summaries.
const SUMMARY_FIELD_CHARS: usize = 100;

/// The two kinds of records the service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Jobseeker,
    Job,
}

impl RecordType {
    /// Wire name of the record type.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::Jobseeker => "jobseeker",
            RecordType::Job => "job",
        }
    }

    /// Namespace a record of this type is written to.
    pub fn upsert_namespace(self) -> &'static str {
        match self {
            RecordType::Jobseeker => NAMESPACE_JOBSEEKERS,
            RecordType::Job => NAMESPACE_JOBS,
        }
    }

    /// Namespace a record of this type is matched against.
    ///
    /// Always the opposite of [`upsert_namespace`](Self::upsert_namespace):
    /// candidates search jobs and jobs search candidates, never themselves.
    pub fn search_namespace(self) -> &'static str {
        match self {
            RecordType::Jobseeker => NAMESPACE_JOBS,
            RecordType::Job => NAMESPACE_JOBSEEKERS,
        }
    }
}

/// A candidate or job record as submitted by the caller.
///
/// All fields are optional; callers routinely send partial records and
/// some CRMs deliver numeric fields (years, salary bounds) as numbers
/// rather than strings, so every scalar is normalized to a string during
/// deserialization. Unrecognized fields are ignored. The record is never
/// persisted here; it lives for the duration of one request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Record {
    // Jobseeker fields.
    #[serde(default, deserialize_with = "flexible_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub skills: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub experience_years: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub desired_position: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub desired_location: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub desired_salary: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub self_pr: Option<String>,

    // Job fields.
    #[serde(default, deserialize_with = "flexible_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub required_skills: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub required_experience: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub salary_min: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub salary_max: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub description: Option<String>,
}

impl Record {
    /// Renders the record into the labeled profile text that gets
    /// embedded. One fixed template per record type; missing fields render
    /// as empty strings.
    pub fn profile_text(&self, record_type: RecordType) -> String {
        let text = match record_type {
            RecordType::Jobseeker => format!(
                "氏名: {}\nスキル: {}\n経験年数: {}年\n希望職種: {}\n希望勤務地: {}\n希望年収: {}万円\n自己PR: {}",
                field(&self.name),
                field(&self.skills),
                field(&self.experience_years),
                field(&self.desired_position),
                field(&self.desired_location),
                field(&self.desired_salary),
                field(&self.self_pr),
            ),
            RecordType::Job => format!(
                "求人タイトル: {}\n必要スキル: {}\n経験年数: {}年以上\n職種: {}\n勤務地: {}\n年収: {}万円\n仕事内容: {}",
                field(&self.title),
                field(&self.required_skills),
                field(&self.required_experience),
                field(&self.position),
                field(&self.location),
                format!(
                    "{}-{}",
                    field(&self.salary_min),
                    field(&self.salary_max)
                ),
                field(&self.description),
            ),
        };
        text.trim().to_string()
    }

    /// One-line summary used when building prompts. Free-text fields are
    /// clipped so a verbose self-PR cannot blow up the prompt.
    pub fn summary(&self, record_type: RecordType) -> String {
        match record_type {
            RecordType::Jobseeker => format!(
                "求職者: {} | スキル: {} | 希望職種: {} | 希望勤務地: {} | 自己PR: {}",
                field(&self.name),
                field(&self.skills),
                field(&self.desired_position),
                field(&self.desired_location),
                truncate_chars(field(&self.self_pr), SUMMARY_FIELD_CHARS),
            ),
            RecordType::Job => format!(
                "求人: {} | 必要スキル: {} | 職種: {} | 勤務地: {} | 内容: {}",
                field(&self.title),
                field(&self.required_skills),
                field(&self.position),
                field(&self.location),
                truncate_chars(field(&self.description), SUMMARY_FIELD_CHARS),
            ),
        }
    }

    /// Display name: candidate name for jobseekers, job title for jobs.
    pub fn display_name(&self) -> &str {
        first_non_empty(&self.name, &self.title)
    }

    /// Skills, whichever side of the record carries them.
    pub fn combined_skills(&self) -> &str {
        first_non_empty(&self.skills, &self.required_skills)
    }

    /// Location: desired location for jobseekers, posting location for jobs.
    pub fn display_location(&self) -> &str {
        first_non_empty(&self.desired_location, &self.location)
    }

    /// Position: desired position for jobseekers, posting position for jobs.
    pub fn display_position(&self) -> &str {
        first_non_empty(&self.desired_position, &self.position)
    }

    /// Salary text: a jobseeker's desired salary, or a job's "min-max"
    /// range with missing bounds rendered as empty strings.
    pub fn salary_text(&self) -> String {
        match self.desired_salary.as_deref() {
            Some(salary) if !salary.is_empty() => salary.to_string(),
            _ => format!(
                "{}-{}",
                self.salary_min.as_deref().unwrap_or(""),
                self.salary_max.as_deref().unwrap_or(""),
            ),
        }
    }
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn first_non_empty<'a>(primary: &'a Option<String>, fallback: &'a Option<String>) -> &'a str {
    match primary.as_deref() {
        Some(value) if !value.is_empty() => value,
        _ => fallback.as_deref().unwrap_or(""),
    }
}

/// Clips `value` to at most `max_chars` characters (not bytes, so
/// multi-byte Japanese text is never split mid-character).
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

/// Accepts strings, numbers, and booleans, normalizing all of them to a
/// string. CRM exports are inconsistent about scalar types.
fn flexible_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Str(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(|scalar| match scalar {
        Scalar::Str(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}
