use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

// Subset of the JSON Resume document that submissions must satisfy. Every
// field is Option-wrapped so presence is checked by the validation layer and
// reported per field, rather than failing deserialization on the first miss.
// Unknown fields are ignored; full resumes carry far more than we check.

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResumePayload {
    #[validate(required, nested)]
    pub basics: Option<Basics>,
    #[validate(required, nested)]
    pub work: Option<Vec<WorkEntry>>,
    #[validate(required, nested)]
    pub skills: Option<Vec<SkillEntry>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct Basics {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, email)]
    pub email: Option<String>,
    #[validate(url)]
    pub picture: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    #[validate(nested)]
    pub profiles: Option<Vec<ProfileEntry>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct WorkEntry {
    #[validate(required, length(min = 1))]
    pub company: Option<String>,
    #[validate(required, length(min = 1))]
    pub position: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    #[serde(rename = "startDate")]
    #[validate(required, custom(function = validate_date_format))]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    #[validate(custom(function = validate_date_format))]
    pub end_date: Option<String>,
    pub summary: Option<String>,
    #[validate(required)]
    pub highlights: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SkillEntry {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    pub level: Option<String>,
    #[validate(required)]
    pub keywords: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ProfileEntry {
    #[validate(required, length(min = 1))]
    pub network: Option<String>,
    pub username: Option<String>,
    #[validate(required, url)]
    pub url: Option<String>,
}

// Strict YYYY-MM-DD: must parse and survive a round trip, so zero padding is
// mandatory and trailing garbage is rejected.
fn validate_date_format(value: &str) -> Result<(), ValidationError> {
    let strict = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string() == value)
        .unwrap_or(false);
    if strict {
        Ok(())
    } else {
        Err(ValidationError::new("date_format"))
    }
}

pub fn flatten_errors(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut flat = BTreeMap::new();
    collect_errors(errors, "", &mut flat);
    flat
}

fn collect_errors(
    errors: &ValidationErrors,
    prefix: &str,
    flat: &mut BTreeMap<String, Vec<String>>,
) {
    for (field, kind) in errors.errors() {
        let field = field.to_string();
        let path = join_path(prefix, wire_name(&field));
        match kind {
            ValidationErrorsKind::Field(violations) => {
                let messages: Vec<String> = violations
                    .iter()
                    .map(|violation| message_for(&path, violation))
                    .collect();
                flat.entry(path).or_default().extend(messages);
            }
            ValidationErrorsKind::Struct(inner) => collect_errors(inner, &path, flat),
            ValidationErrorsKind::List(entries) => {
                for (index, inner) in entries {
                    let indexed = format!("{}.{}", &path, index);
                    collect_errors(inner, &indexed, flat);
                }
            }
        }
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

// Validation errors are keyed by rust field name; paths are reported in the
// document's wire casing.
fn wire_name(field: &str) -> &str {
    match field {
        "start_date" => "startDate",
        "end_date" => "endDate",
        _ => field,
    }
}

fn message_for(path: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    match error.code.as_ref() {
        "required" => format!("The {} field is required.", path),
        "length" => format!("The {} field must not be empty.", path),
        "email" => format!("The {} must be a valid email address.", path),
        "url" => format!("The {} format is invalid.", path),
        "date_format" => format!("The {} does not match the format Y-m-d.", path),
        code => format!("The {} field is invalid ({}).", path, code),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tracing_test::traced_test;

    use super::*;

    fn check(payload: Value) -> Result<(), BTreeMap<String, Vec<String>>> {
        let parsed: ResumePayload =
            serde_json::from_value(payload).expect("payload should deserialize");
        parsed.validate().map_err(|errors| flatten_errors(&errors))
    }

    fn minimal() -> Value {
        json!({
            "basics": {"name": "A", "email": "a@b.com"},
            "work": [],
            "skills": []
        })
    }

    #[traced_test]
    #[test]
    fn minimal_document_passes() {
        assert!(check(minimal()).is_ok());
    }

    #[test]
    fn empty_work_array_satisfies_presence() {
        // zero entries means zero per-entry checks
        let result = check(minimal());
        assert!(result.is_ok());
    }

    #[test]
    fn missing_required_fields_are_all_listed() {
        let errors = check(json!({"basics": {}})).unwrap_err();
        for path in ["basics.name", "basics.email", "work", "skills"] {
            assert!(errors.contains_key(path), "expected {} in {:?}", path, errors);
        }
    }

    #[test]
    fn missing_basics_is_reported_at_top_level() {
        let errors = check(json!({"work": [], "skills": []})).unwrap_err();
        assert!(errors.contains_key("basics"));
        assert!(!errors.contains_key("basics.name"));
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut payload = minimal();
        payload["basics"]["name"] = json!("");
        let errors = check(payload).unwrap_err();
        assert!(errors.contains_key("basics.name"));
    }

    #[test]
    fn bad_email_is_rejected() {
        let mut payload = minimal();
        payload["basics"]["email"] = json!("not-an-email");
        let errors = check(payload).unwrap_err();
        assert!(errors.contains_key("basics.email"));
    }

    #[test]
    fn optional_urls_are_checked_when_present() {
        let mut payload = minimal();
        payload["basics"]["picture"] = json!("definitely not a url");
        payload["basics"]["website"] = json!("https://example.com");
        let errors = check(payload).unwrap_err();
        assert!(errors.contains_key("basics.picture"));
        assert!(!errors.contains_key("basics.website"));
    }

    #[test]
    fn work_entries_are_validated_individually() {
        let mut payload = minimal();
        payload["work"] = json!([
            {
                "company": "Filmsupply",
                "position": "Engineer",
                "startDate": "2019-03-04",
                "highlights": []
            },
            {"position": "Engineer"}
        ]);
        let errors = check(payload).unwrap_err();
        assert!(!errors.contains_key("work.0.company"));
        assert!(errors.contains_key("work.1.company"));
        assert!(errors.contains_key("work.1.startDate"));
        assert!(errors.contains_key("work.1.highlights"));
    }

    #[test]
    fn start_date_must_be_iso_formatted() {
        let entry = |date: &str| {
            json!({
                "company": "C",
                "position": "P",
                "startDate": date,
                "highlights": []
            })
        };
        let mut payload = minimal();
        payload["work"] = json!([entry("2019-03-04")]);
        assert!(check(payload.clone()).is_ok());

        for bad in ["03/04/2019", "2019-3-4", "2019-03-04T00:00:00", "yesterday"] {
            payload["work"] = json!([entry(bad)]);
            let errors = check(payload.clone()).unwrap_err();
            assert!(
                errors.contains_key("work.0.startDate"),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn end_date_is_optional_but_strict() {
        let mut payload = minimal();
        payload["work"] = json!([{
            "company": "C",
            "position": "P",
            "startDate": "2019-03-04",
            "endDate": "2020-1-1",
            "highlights": []
        }]);
        let errors = check(payload).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("work.0.endDate"));
    }

    #[test]
    fn skills_entries_require_name_level_keywords() {
        let mut payload = minimal();
        payload["skills"] = json!([{"name": "Rust"}]);
        let errors = check(payload).unwrap_err();
        assert!(errors.contains_key("skills.0.level"));
        assert!(errors.contains_key("skills.0.keywords"));
        assert!(!errors.contains_key("skills.0.name"));
    }

    #[test]
    fn profile_entries_report_indexed_paths() {
        let mut payload = minimal();
        payload["basics"]["profiles"] = json!([
            {"network": "GitHub", "url": "https://github.com/someone"},
            {"username": "someone", "url": "https://example.com"}
        ]);
        let errors = check(payload).unwrap_err();
        assert!(errors.contains_key("basics.profiles.1.network"));
        assert!(!errors.contains_key("basics.profiles.0.network"));
    }

    #[test]
    fn profile_url_is_required_and_checked() {
        let mut payload = minimal();
        payload["basics"]["profiles"] = json!([{"network": "GitHub", "url": "nope"}]);
        let errors = check(payload).unwrap_err();
        assert!(errors.contains_key("basics.profiles.0.url"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut payload = minimal();
        payload["education"] = json!([{"institution": "School"}]);
        payload["basics"]["summary"] = json!("A summary");
        payload["basics"]["location"] = json!({"city": "Dallas"});
        assert!(check(payload).is_ok());
    }

    #[test]
    fn violations_accumulate_across_sections() {
        let payload = json!({
            "basics": {"name": "", "email": "bad"},
            "work": [{"position": "P"}],
            "skills": [{"level": "expert"}]
        });
        let errors = check(payload).unwrap_err();
        for path in [
            "basics.name",
            "basics.email",
            "work.0.company",
            "work.0.startDate",
            "work.0.highlights",
            "skills.0.name",
            "skills.0.keywords",
        ] {
            assert!(errors.contains_key(path), "expected {} in {:?}", path, errors);
        }
    }

    #[test]
    fn required_messages_name_the_field_path() {
        let errors = check(json!({})).unwrap_err();
        assert_eq!(
            errors.get("work").unwrap(),
            &vec!["The work field is required.".to_string()]
        );
    }
}
