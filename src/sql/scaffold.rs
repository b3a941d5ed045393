//! Column whitelist and query scaffolds: the ordered (column, value) pairs that become bound parameters.

use serde_json::Value;
use std::collections::HashMap;

/// One client-writable column and the cast applied to its placeholder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    /// PostgreSQL type for `$n::type`. `None` binds the value as-is.
    pub cast: Option<&'static str>,
}

impl Column {
    pub const fn new(name: &'static str, cast: Option<&'static str>) -> Self {
        Column { name, cast }
    }
}

/// Name of the row selector. Never writable by clients.
pub const ID_COLUMN: &str = "id";

/// One bound parameter. Position in the scaffold decides its `$n`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaffoldEntry {
    pub name: &'static str,
    pub cast: Option<&'static str>,
    pub value: Value,
}

impl ScaffoldEntry {
    pub fn is_id(&self) -> bool {
        self.name == ID_COLUMN
    }
}

/// Ordered (column, value) pairs for one statement.
///
/// Entries follow the declared order of `allowed`, not the key order of `data`, so the
/// generated SQL text is reproducible. Keys missing from `allowed` are dropped. A key
/// present with an explicit `null` is kept and binds SQL NULL.
///
/// When `prefix_id` is given an `id` entry is placed first, taking `$1`.
pub fn build_scaffold(
    data: &HashMap<String, Value>,
    allowed: &[Column],
    prefix_id: Option<i64>,
) -> Vec<ScaffoldEntry> {
    let mut out = Vec::with_capacity(allowed.len() + 1);
    if let Some(id) = prefix_id {
        out.push(ScaffoldEntry {
            name: ID_COLUMN,
            cast: None,
            value: Value::Number(id.into()),
        });
    }
    for c in allowed {
        if c.name == ID_COLUMN {
            continue;
        }
        if let Some(v) = data.get(c.name) {
            out.push(ScaffoldEntry {
                name: c.name,
                cast: c.cast,
                value: v.clone(),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COLS: &[Column] = &[
        Column::new("completed_at", Some("timestamptz")),
        Column::new("date", Some("timestamptz")),
        Column::new("details", None),
        Column::new("order_num", Some("integer")),
        Column::new("name", None),
    ];

    fn map(v: Value) -> HashMap<String, Value> {
        match v {
            Value::Object(m) => m.into_iter().collect(),
            _ => panic!("not an object"),
        }
    }

    fn names(s: &[ScaffoldEntry]) -> Vec<&str> {
        s.iter().map(|e| e.name).collect()
    }

    #[test]
    fn follows_whitelist_order_not_input_order() {
        let data = map(json!({ "name": "a", "details": "b", "date": "2019-02-03" }));
        let s = build_scaffold(&data, COLS, None);
        assert_eq!(names(&s), vec!["date", "details", "name"]);
        assert_eq!(s[2].value, json!("a"));
    }

    #[test]
    fn drops_unknown_columns_and_client_id() {
        let data = map(json!({ "id": 9, "owner": "x", "name": "a; DROP TABLE todos" }));
        let s = build_scaffold(&data, COLS, None);
        assert_eq!(names(&s), vec!["name"]);
    }

    #[test]
    fn prefix_id_goes_first() {
        let data = map(json!({ "name": "n", "completed_at": "2019-01-25T00:53:52.000Z" }));
        let s = build_scaffold(&data, COLS, Some(42));
        assert_eq!(names(&s), vec!["id", "completed_at", "name"]);
        assert!(s[0].is_id());
        assert_eq!(s[0].value, json!(42));
        assert_eq!(s[1].cast, Some("timestamptz"));
    }

    #[test]
    fn explicit_null_is_kept() {
        let data = map(json!({ "name": null }));
        let s = build_scaffold(&data, COLS, Some(1));
        assert_eq!(names(&s), vec!["id", "name"]);
        assert!(s[1].value.is_null());
    }

    #[test]
    fn empty_input_yields_only_prefix() {
        let data = HashMap::new();
        assert!(build_scaffold(&data, COLS, None).is_empty());
        assert_eq!(names(&build_scaffold(&data, COLS, Some(3))), vec!["id"]);
    }
}
