//! Presence checks run before any statement is built.

use crate::sql::Column;
use serde_json::Value;
use std::collections::HashMap;

pub const REQUIRED_MISSING: &str = "Required column value missing";
pub const NO_VALID_COLUMN: &str = "At least one valid column value is required";

pub struct RequestValidator;

impl RequestValidator {
    /// Every required field is present with a non-null value.
    pub fn all_required_present(body: &HashMap<String, Value>, required: &[&str]) -> bool {
        required
            .iter()
            .all(|col| matches!(body.get(*col), Some(v) if !v.is_null()))
    }

    /// At least one whitelisted column is present. An explicit null counts.
    pub fn any_present(body: &HashMap<String, Value>, allowed: &[Column]) -> bool {
        allowed.iter().any(|c| body.contains_key(c.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{REQUIRED_ON_CREATE, VALID_COLUMNS};
    use serde_json::json;

    fn map(v: Value) -> HashMap<String, Value> {
        match v {
            Value::Object(m) => m.into_iter().collect(),
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn required_needs_every_field_non_null() {
        let ok = map(json!({ "date": "2019-02-03T08:00:00.000Z", "name": "n" }));
        assert!(RequestValidator::all_required_present(&ok, REQUIRED_ON_CREATE));

        let missing = map(json!({ "date": "2019-02-03T08:00:00.000Z" }));
        assert!(!RequestValidator::all_required_present(&missing, REQUIRED_ON_CREATE));

        let null = map(json!({ "date": "2019-02-03T08:00:00.000Z", "name": null }));
        assert!(!RequestValidator::all_required_present(&null, REQUIRED_ON_CREATE));

        assert!(!RequestValidator::all_required_present(&HashMap::new(), REQUIRED_ON_CREATE));
    }

    #[test]
    fn empty_requirement_is_trivially_met() {
        assert!(RequestValidator::all_required_present(&HashMap::new(), &[]));
    }

    #[test]
    fn any_present_rejects_empty_and_irrelevant_patches() {
        assert!(!RequestValidator::any_present(&HashMap::new(), VALID_COLUMNS));
        let irrelevant = map(json!({ "id": 3, "owner": "me" }));
        assert!(!RequestValidator::any_present(&irrelevant, VALID_COLUMNS));
    }

    #[test]
    fn any_present_accepts_one_field_even_null() {
        let one = map(json!({ "completed_at": "2019-01-25T00:53:52.000Z" }));
        assert!(RequestValidator::any_present(&one, VALID_COLUMNS));
        let null = map(json!({ "name": null }));
        assert!(RequestValidator::any_present(&null, VALID_COLUMNS));
    }
}
