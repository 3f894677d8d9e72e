//! Backend query contract.
//!
//! [`QueryRequest`] models the single-round-trip queries the data layer
//! issues: table selection, equality and disjunctive filters, ordering,
//! limit, insert/upsert/delete, and named server-side functions (which
//! carry the atomic-increment primitive). [`QueryExecutor`] is the seam
//! between the API operations and the wire: production uses the PostgREST
//! executor, tests substitute an in-memory backend.

use async_trait::async_trait;
use serde_json::Value;

use crate::services::errors::DbResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMethod {
    /// Fetch rows matching the filters.
    Select,
    /// Insert one row, returning the stored representation.
    Insert,
    /// Insert one row, updating the existing row instead when the
    /// `on_conflict` column already holds the inserted value.
    Upsert { on_conflict: &'static str },
    /// Remove rows matching the filters. Removing nothing is success.
    Delete,
    /// Invoke a named server-side function with JSON arguments.
    Rpc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `column = value`
    Eq {
        column: &'static str,
        value: String,
    },
    /// `columns[0] = value OR columns[1] = value OR ...`
    AnyEq {
        columns: &'static [&'static str],
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub descending: bool,
}

/// One logical backend query. For [`QueryMethod::Rpc`] requests `table`
/// holds the function name.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub table: &'static str,
    pub method: QueryMethod,
    pub filters: Vec<Filter>,
    pub order: Vec<OrderBy>,
    pub limit: Option<u32>,
    pub body: Option<Value>,
}

impl QueryRequest {
    fn new(table: &'static str, method: QueryMethod, body: Option<Value>) -> Self {
        Self {
            table,
            method,
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
            body,
        }
    }

    pub fn select(table: &'static str) -> Self {
        Self::new(table, QueryMethod::Select, None)
    }

    pub fn insert(table: &'static str, row: Value) -> Self {
        Self::new(table, QueryMethod::Insert, Some(row))
    }

    pub fn upsert(table: &'static str, on_conflict: &'static str, row: Value) -> Self {
        Self::new(table, QueryMethod::Upsert { on_conflict }, Some(row))
    }

    pub fn delete(table: &'static str) -> Self {
        Self::new(table, QueryMethod::Delete, None)
    }

    pub fn rpc(function: &'static str, args: Value) -> Self {
        Self::new(function, QueryMethod::Rpc, Some(args))
    }

    pub fn eq(mut self, column: &'static str, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Eq {
            column,
            value: value.into(),
        });
        self
    }

    pub fn eq_any(
        mut self,
        columns: &'static [&'static str],
        value: impl Into<String>,
    ) -> Self {
        self.filters.push(Filter::AnyEq {
            columns,
            value: value.into(),
        });
        self
    }

    pub fn order(mut self, column: &'static str) -> Self {
        self.order.push(OrderBy {
            column,
            descending: false,
        });
        self
    }

    pub fn order_desc(mut self, column: &'static str) -> Self {
        self.order.push(OrderBy {
            column,
            descending: true,
        });
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Executes one [`QueryRequest`] against the backend.
///
/// Resolves to the backend's JSON payload (a row array for table queries,
/// the function result for RPC) or a typed [`DbError`](crate::DbError).
/// Implementations perform exactly one round trip and never retry.
#[async_trait(?Send)]
pub trait QueryExecutor {
    async fn execute(&self, request: QueryRequest) -> DbResult<Value>;
}
