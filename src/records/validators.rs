use super::models::RecordDraft;
use crate::common::{ApiError, ValidationResult, Validator};

const MAX_TITLE_LEN: usize = 200;
const MAX_BODY_LEN: usize = 10_000;

pub struct RecordValidator;

impl Validator<RecordDraft> for RecordValidator {
    fn validate(&self, draft: &RecordDraft) -> ValidationResult {
        let mut result = ValidationResult::new();

        if draft.title.trim().is_empty() {
            result.add_error("title", "title is required");
        } else if draft.title.chars().count() > MAX_TITLE_LEN {
            result.add_error("title", "title must be at most 200 characters");
        }

        if let Some(body) = &draft.body {
            if body.chars().count() > MAX_BODY_LEN {
                result.add_error("body", "body must be at most 10000 characters");
            }
        }

        result
    }
}

/// Parse the `ids` query value: a comma-separated list of record ids.
/// Junk entries are a validation error rather than being silently skipped.
pub fn parse_id_list(raw: &str) -> Result<Vec<i64>, ApiError> {
    let mut ids = Vec::new();

    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.parse::<i64>() {
            Ok(id) => ids.push(id),
            Err(_) => {
                return Err(ApiError::ValidationError(format!(
                    "ids: `{}` is not a valid record id",
                    part
                )))
            }
        }
    }

    Ok(ids)
}
