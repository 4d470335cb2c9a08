use crate::prompts::DEFAULT_DURATION_MINUTES;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

/// Fields that must be present and non-blank, in reporting order.
pub const REQUIRED_FIELDS: [&str; 2] = ["subject", "chapter"];

#[derive(Debug, Deserialize, Validate)]
pub struct GeneratePaperRequest {
    #[serde(default, deserialize_with = "trimmed_text")]
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,

    #[serde(default, deserialize_with = "trimmed_text")]
    #[validate(length(min = 1, message = "Chapter is required"))]
    pub chapter: String,

    /// Minutes; absent or zero means the default.
    #[serde(default)]
    pub duration: Option<u32>,
}

impl GeneratePaperRequest {
    pub fn effective_duration(&self) -> u32 {
        self.duration
            .filter(|minutes| *minutes > 0)
            .unwrap_or(DEFAULT_DURATION_MINUTES)
    }
}

/// Required fields that are absent, `null` or blank in a raw body.
///
/// Looks only at presence, so it can run before the body is typed. A body
/// that is not an object is missing every field.
pub fn missing_fields(body: &Value) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| match body.get(field) {
            None | Some(Value::Null) => true,
            Some(Value::String(text)) => text.trim().is_empty(),
            Some(_) => false,
        })
        .collect()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratePaperResponse {
    pub paper: String,
}

/// `null` reads as empty; surrounding whitespace is dropped.
fn trimmed_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|text| text.trim().to_string()).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GeneratePaperRequest {
        serde_json::from_value(value).unwrap()
    }

    fn invalid_fields(request: &GeneratePaperRequest) -> Vec<String> {
        let errors = request.validate().unwrap_err();
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        fields
    }

    #[test]
    fn complete_request_is_valid() {
        let request = parse(json!({ "subject": "Science", "chapter": "Light", "duration": 45 }));

        assert!(request.validate().is_ok());
        assert_eq!(request.effective_duration(), 45);
    }

    #[test]
    fn missing_fields_are_reported() {
        let request = parse(json!({ "duration": 30 }));

        assert_eq!(invalid_fields(&request), vec!["chapter", "subject"]);
    }

    #[test]
    fn null_and_blank_values_count_as_missing() {
        let request = parse(json!({ "subject": null, "chapter": "   " }));

        assert_eq!(invalid_fields(&request), vec!["chapter", "subject"]);
    }

    #[test]
    fn values_are_trimmed() {
        let request = parse(json!({ "subject": "  Maths ", "chapter": "\tFractions\n" }));

        assert_eq!(request.subject, "Maths");
        assert_eq!(request.chapter, "Fractions");
    }

    #[test]
    fn absent_or_zero_duration_uses_default() {
        let absent = parse(json!({ "subject": "Maths", "chapter": "Fractions" }));
        let zero = parse(json!({ "subject": "Maths", "chapter": "Fractions", "duration": 0 }));

        assert_eq!(absent.effective_duration(), DEFAULT_DURATION_MINUTES);
        assert_eq!(zero.effective_duration(), DEFAULT_DURATION_MINUTES);
    }

    #[test]
    fn raw_body_presence_check_ignores_other_fields() {
        assert_eq!(
            missing_fields(&json!({ "chapter": "Light", "duration": "45" })),
            vec!["subject"]
        );
        assert_eq!(missing_fields(&json!({ "subject": " ", "chapter": null })), vec!["subject", "chapter"]);
        assert_eq!(missing_fields(&json!([1, 2])), vec!["subject", "chapter"]);
        assert!(missing_fields(&json!({ "subject": 7, "chapter": "Light" })).is_empty());
    }

    #[test]
    fn negative_duration_is_rejected_by_deserialization() {
        let result = serde_json::from_value::<GeneratePaperRequest>(
            json!({ "subject": "Maths", "chapter": "Fractions", "duration": -5 }),
        );

        assert!(result.is_err());
    }
}
