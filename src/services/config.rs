use crate::services::errors::{DbError, DbResult};

/// Connection settings for a Supabase project.
///
/// The anon key is a public, row-level-security-scoped credential; it is
/// sent as both the `apikey` header and the bearer token on every request.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

impl SupabaseConfig {
    /// Validate and normalize project settings. The URL loses any trailing
    /// slash so endpoint paths can be appended uniformly.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> DbResult<Self> {
        let url = url.into();
        let anon_key = anon_key.into();

        let url = url.trim_end_matches('/').to_string();
        if url.is_empty() {
            return Err(DbError::Config {
                message: "project URL is empty".to_string(),
            });
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(DbError::Config {
                message: format!("project URL '{}' is not an http(s) URL", url),
            });
        }
        if anon_key.is_empty() {
            return Err(DbError::Config {
                message: "anon key is empty".to_string(),
            });
        }

        Ok(Self { url, anon_key })
    }

    /// PostgREST endpoint for a table.
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table)
    }

    /// PostgREST endpoint for a stored function.
    pub fn rpc_url(&self, function: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.url, function)
    }
}
