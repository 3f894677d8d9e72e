//! In-memory backend double used by the API and migration tests.
//!
//! Implements just enough PostgREST behavior for this crate's queries:
//! equality and disjunctive filters, multi-column ordering, limits, the
//! cards uniqueness constraint, conflict-keyed upserts, and the
//! `increment_card_xp` function.

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::services::client::http::CARD_DUPLICATE_MESSAGE;
use crate::services::client::query::{Filter, OrderBy, QueryExecutor, QueryMethod, QueryRequest};
use crate::services::client::TokenDb;
use crate::services::errors::{DbError, DbResult};
use crate::services::storage::MemoryStore;

/// Build a client wired to a fresh mock backend and in-memory store.
pub(crate) fn test_db() -> (TokenDb, MockBackend) {
    test_db_with_store(MemoryStore::new())
}

/// Same, but with a caller-prepared local store (for migration tests).
pub(crate) fn test_db_with_store(store: MemoryStore) -> (TokenDb, MockBackend) {
    let backend = MockBackend::new();
    let db = TokenDb::with_parts(Box::new(backend.clone()), Box::new(store));
    (db, backend)
}

#[derive(Clone, Default)]
pub(crate) struct MockBackend {
    inner: Rc<Inner>,
}

#[derive(Default)]
struct Inner {
    tables: RefCell<HashMap<String, Vec<Value>>>,
    next_row: Cell<u64>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        self.inner
            .tables
            .borrow_mut()
            .entry(table.to_string())
            .or_default()
            .extend(rows);
    }

    pub fn clear_table(&self, table: &str) {
        self.inner.tables.borrow_mut().remove(table);
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.inner
            .tables
            .borrow()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_card_xp(&self, card_id: &str, xp: i64) {
        let mut tables = self.inner.tables.borrow_mut();
        if let Some(cards) = tables.get_mut("cards") {
            for card in cards.iter_mut() {
                if field_text(card.get("id")) == card_id {
                    card["xp"] = json!(xp);
                }
            }
        }
    }

    fn next_row_id(&self) -> u64 {
        let n = self.inner.next_row.get() + 1;
        self.inner.next_row.set(n);
        n
    }

    fn select(&self, request: &QueryRequest) -> Value {
        let mut rows: Vec<Value> = self
            .rows(request.table)
            .into_iter()
            .filter(|row| matches_filters(row, &request.filters))
            .collect();
        sort_rows(&mut rows, &request.order);
        if let Some(limit) = request.limit {
            rows.truncate(limit as usize);
        }
        Value::Array(rows)
    }

    fn insert(&self, table: &str, body: Value, on_conflict: Option<&str>) -> DbResult<Value> {
        let mut fields = match body {
            Value::Object(fields) => fields,
            _ => return Err(DbError::remote("insert body is not a JSON object")),
        };

        let mut tables = self.inner.tables.borrow_mut();
        let rows = tables.entry(table.to_string()).or_default();

        if let Some(key) = on_conflict {
            let incoming = field_text(fields.get(key));
            if !incoming.is_empty() {
                if let Some(existing) = rows
                    .iter_mut()
                    .find(|row| field_text(row.get(key)) == incoming)
                {
                    if let Some(existing_fields) = existing.as_object_mut() {
                        for (column, value) in fields {
                            existing_fields.insert(column, value);
                        }
                    }
                    return Ok(json!([existing.clone()]));
                }
            }
        }

        if table == "cards" {
            let collides = rows.iter().any(|row| {
                field_text(row.get("user_id")) == field_text(fields.get("user_id"))
                    && field_text(row.get("house")) == field_text(fields.get("house"))
                    && field_text(row.get("value")) == field_text(fields.get("value"))
            });
            if collides {
                return Err(DbError::DuplicateKey {
                    message: CARD_DUPLICATE_MESSAGE.to_string(),
                });
            }
            fields.entry("xp").or_insert(json!(0));
        }

        let n = self.next_row_id();
        let stamp = format!("2026-01-01T00:00:00.{:03}Z", n);
        fields.insert("id".to_string(), json!(format!("row-{}", n)));
        fields.insert("created_at".to_string(), json!(stamp));
        if table == "games" {
            fields.insert("played_at".to_string(), json!(stamp));
        }

        let row = Value::Object(fields);
        rows.push(row.clone());
        Ok(json!([row]))
    }

    fn delete(&self, request: &QueryRequest) -> Value {
        let mut tables = self.inner.tables.borrow_mut();
        if let Some(rows) = tables.get_mut(request.table) {
            rows.retain(|row| !matches_filters(row, &request.filters));
        }
        Value::Array(Vec::new())
    }

    fn rpc(&self, request: &QueryRequest) -> DbResult<Value> {
        match request.table {
            "increment_card_xp" => {
                let args = request.body.clone().unwrap_or(Value::Null);
                let card_id = field_text(args.get("card_id"));
                let amount = args.get("amount").and_then(Value::as_i64).unwrap_or(0);

                let mut tables = self.inner.tables.borrow_mut();
                let rows = tables.entry("cards".to_string()).or_default();
                for row in rows.iter_mut() {
                    if field_text(row.get("id")) == card_id {
                        let xp = row.get("xp").and_then(Value::as_i64).unwrap_or(0) + amount;
                        row["xp"] = json!(xp);
                        return Ok(json!([row.clone()]));
                    }
                }
                Ok(json!([]))
            }
            other => Err(DbError::remote(format!("unknown function '{}'", other))),
        }
    }
}

#[async_trait(?Send)]
impl QueryExecutor for MockBackend {
    async fn execute(&self, request: QueryRequest) -> DbResult<Value> {
        match request.method {
            QueryMethod::Select => Ok(self.select(&request)),
            QueryMethod::Insert => {
                let body = request.body.unwrap_or(Value::Null);
                self.insert(request.table, body, None)
            }
            QueryMethod::Upsert { on_conflict } => {
                let body = request.body.unwrap_or(Value::Null);
                self.insert(request.table, body, Some(on_conflict))
            }
            QueryMethod::Delete => Ok(self.delete(&request)),
            QueryMethod::Rpc => self.rpc(&request),
        }
    }
}

fn matches_filters(row: &Value, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| match filter {
        Filter::Eq { column, value } => field_text(row.get(column)) == *value,
        Filter::AnyEq { columns, value } => columns
            .iter()
            .any(|column| field_text(row.get(*column)) == *value),
    })
}

fn sort_rows(rows: &mut [Value], order: &[OrderBy]) {
    rows.sort_by(|a, b| {
        for spec in order {
            let mut ord = compare_fields(a.get(spec.column), b.get(spec.column));
            if spec.descending {
                ord = ord.reverse();
            }
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}

fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        _ => field_text(a).cmp(&field_text(b)),
    }
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
