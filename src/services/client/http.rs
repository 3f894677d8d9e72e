//! PostgREST executor.
//!
//! Translates a [`QueryRequest`] into one HTTP round trip against the
//! Supabase REST endpoint and maps the response back into JSON or a typed
//! error. Uniqueness violations are detected via the Postgres error code
//! in the response body (`23505`) so callers can tell them apart from
//! generic failures.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::services::client::query::{Filter, QueryExecutor, QueryMethod, QueryRequest};
use crate::services::config::SupabaseConfig;
use crate::services::errors::{DbError, DbResult};

const UNIQUE_VIOLATION_CODE: &str = "23505";

/// Message shown when a card insert collides with the `(user, house,
/// value)` uniqueness constraint.
pub(crate) const CARD_DUPLICATE_MESSAGE: &str =
    "card with this value already exists in this faction";

/// [`QueryExecutor`] backed by the Supabase PostgREST endpoint.
pub struct HttpExecutor {
    http_client: Client,
    config: SupabaseConfig,
}

impl HttpExecutor {
    pub fn new(config: SupabaseConfig) -> DbResult<Self> {
        let http_client = Client::builder()
            .user_agent("tokendb/0.1")
            .build()
            .map_err(|e| DbError::Config {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }
}

#[async_trait(?Send)]
impl QueryExecutor for HttpExecutor {
    async fn execute(&self, request: QueryRequest) -> DbResult<Value> {
        let url = match request.method {
            QueryMethod::Rpc => self.config.rpc_url(request.table),
            _ => self.config.rest_url(request.table),
        };
        let params = render_params(&request);

        debug!(table = request.table, method = ?request.method, "executing backend query");

        let mut builder = match request.method {
            QueryMethod::Select => self.http_client.get(&url),
            QueryMethod::Insert | QueryMethod::Upsert { .. } | QueryMethod::Rpc => {
                self.http_client.post(&url)
            }
            QueryMethod::Delete => self.http_client.delete(&url),
        };

        builder = builder
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .query(&params);

        if let Some(prefer) = prefer_header(&request.method) {
            builder = builder.header("Prefer", prefer);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| DbError::RemoteQuery {
            message: format!("request to '{}' failed: {}", request.table, e),
        })?;

        let status = response.status();
        if status.is_success() {
            if status == StatusCode::NO_CONTENT {
                return Ok(Value::Array(Vec::new()));
            }
            response.json().await.map_err(|e| DbError::RemoteQuery {
                message: format!("invalid JSON from '{}': {}", request.table, e),
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            error!(
                table = request.table,
                status = status.as_u16(),
                "backend rejected query"
            );
            Err(map_error_body(request.table, status, &body))
        }
    }
}

/// Render the PostgREST query string for a request.
pub(crate) fn render_params(request: &QueryRequest) -> Vec<(String, String)> {
    let mut params = Vec::new();

    for filter in &request.filters {
        match filter {
            Filter::Eq { column, value } => {
                params.push((column.to_string(), format!("eq.{}", value)));
            }
            Filter::AnyEq { columns, value } => {
                let clauses: Vec<String> = columns
                    .iter()
                    .map(|column| format!("{}.eq.{}", column, value))
                    .collect();
                params.push(("or".to_string(), format!("({})", clauses.join(","))));
            }
        }
    }

    if !request.order.is_empty() {
        let spec: Vec<String> = request
            .order
            .iter()
            .map(|order| {
                let direction = if order.descending { "desc" } else { "asc" };
                format!("{}.{}", order.column, direction)
            })
            .collect();
        params.push(("order".to_string(), spec.join(",")));
    }

    if let Some(limit) = request.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }

    if let QueryMethod::Upsert { on_conflict } = request.method {
        params.push(("on_conflict".to_string(), on_conflict.to_string()));
    }

    params
}

fn prefer_header(method: &QueryMethod) -> Option<&'static str> {
    match method {
        QueryMethod::Insert => Some("return=representation"),
        QueryMethod::Upsert { .. } => Some("resolution=merge-duplicates,return=representation"),
        _ => None,
    }
}

/// PostgREST error body shape.
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Map a non-2xx PostgREST response into a typed error.
pub(crate) fn map_error_body(table: &str, status: StatusCode, body: &str) -> DbError {
    if let Ok(parsed) = serde_json::from_str::<PostgrestErrorBody>(body) {
        if parsed.code.as_deref() == Some(UNIQUE_VIOLATION_CODE) {
            let message = if table == "cards" {
                CARD_DUPLICATE_MESSAGE.to_string()
            } else {
                format!("duplicate key value on '{}'", table)
            };
            return DbError::DuplicateKey { message };
        }
        if let Some(message) = parsed.message {
            return DbError::RemoteQuery {
                message: format!("'{}' returned {}: {}", table, status.as_u16(), message),
            };
        }
    }

    DbError::RemoteQuery {
        message: format!("'{}' returned {}: {}", table, status.as_u16(), body),
    }
}
