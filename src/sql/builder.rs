//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from scaffolds.

use crate::error::AppError;
use crate::sql::scaffold::{ScaffoldEntry, ID_COLUMN};
use chrono::NaiveDate;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

fn placeholder(n: u32, cast: Option<&str>) -> String {
    cast.map(|t| format!("${}::{}", n, t))
        .unwrap_or_else(|| format!("${}", n))
}

/// Columns a list can be ordered by. Only these literal names ever reach ORDER BY.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderColumn {
    #[default]
    Id,
    Date,
    OrderNum,
}

impl OrderColumn {
    pub fn as_sql(self) -> &'static str {
        match self {
            OrderColumn::Id => "id",
            OrderColumn::Date => "date",
            OrderColumn::OrderNum => "order_num",
        }
    }
}

impl FromStr for OrderColumn {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(OrderColumn::Id),
            "date" => Ok(OrderColumn::Date),
            "order_num" => Ok(OrderColumn::OrderNum),
            _ => Err(AppError::validation(format!("invalid order column '{}'", s))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    #[default]
    Desc,
}

impl OrderDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

impl FromStr for OrderDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(OrderDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(OrderDirection::Desc)
        } else {
            Err(AppError::validation(format!("invalid order direction '{}'", s)))
        }
    }
}

/// ORDER BY for list queries. Defaults to `id DESC`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListOrder {
    pub column: OrderColumn,
    pub direction: OrderDirection,
}

impl fmt::Display for ListOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column.as_sql(), self.direction.as_sql())
    }
}

/// Parse a list date filter: an RFC 3339 instant (taken in UTC) or a plain `YYYY-MM-DD`.
pub fn parse_date_filter(s: &str) -> Result<NaiveDate, AppError> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.naive_utc().date())
        .map_err(|_| AppError::validation(format!("invalid date filter '{}'", s)))
}

/// SELECT by id. The id is the sole param.
pub fn select_by_id(table: &str, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(Value::Number(id.into()));
    q.sql = format!("SELECT * FROM {} WHERE {} = ${}", table, ID_COLUMN, n);
    q
}

/// SELECT list with an optional calendar-day filter on `date`.
/// The day is bound as a `YYYY-MM-DD` string; ORDER BY comes from the enums only.
pub fn select_list(table: &str, date: Option<NaiveDate>, order: ListOrder) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = match date {
        Some(d) => {
            let n = q.push_param(Value::String(d.format("%Y-%m-%d").to_string()));
            format!(" WHERE (date AT TIME ZONE 'UTC')::date = {}", placeholder(n, Some("date")))
        }
        None => String::new(),
    };
    q.sql = format!("SELECT * FROM {}{} ORDER BY {}", table, where_clause, order);
    q
}

/// INSERT one row from a scaffold built without an id prefix.
pub fn insert(table: &str, scaffold: &[ScaffoldEntry]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(scaffold.len());
    let mut placeholders = Vec::with_capacity(scaffold.len());
    for e in scaffold.iter().filter(|e| !e.is_id()) {
        let n = q.push_param(e.value.clone());
        cols.push(e.name);
        placeholders.push(placeholder(n, e.cast));
    }
    if cols.is_empty() {
        q.sql = format!("INSERT INTO {} DEFAULT VALUES RETURNING *", table);
        return q;
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
        table,
        cols.join(", "),
        placeholders.join(", ")
    );
    q
}

/// UPDATE by id from a scaffold whose first entry is the id prefix.
///
/// Every entry consumes a parameter slot in scaffold order; the id entry is the
/// WHERE selector and is never emitted in SET. Returns `None` when the scaffold has
/// no id prefix or nothing to set.
pub fn update(table: &str, scaffold: &[ScaffoldEntry]) -> Option<QueryBuf> {
    let mut q = QueryBuf::new();
    let mut id_param = None;
    let mut sets = Vec::new();
    for e in scaffold {
        let n = q.push_param(e.value.clone());
        if e.is_id() {
            id_param.get_or_insert(n);
            continue;
        }
        sets.push(format!("{}={}", e.name, placeholder(n, e.cast)));
    }
    let id_param = id_param?;
    if sets.is_empty() {
        return None;
    }
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING *",
        table,
        sets.join(", "),
        ID_COLUMN,
        id_param
    );
    Some(q)
}

/// DELETE by id.
pub fn delete(table: &str, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(Value::Number(id.into()));
    q.sql = format!("DELETE FROM {} WHERE {} = ${} RETURNING *", table, ID_COLUMN, n);
    q
}
