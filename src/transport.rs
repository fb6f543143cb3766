//! Authenticated GET transport over the remote API.

use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::{Error, Result};

/// One authenticated request against the remote API.
///
/// Implementations issue exactly one outbound request per call and
/// return the parsed JSON body without wrapping it further; callers
/// index into the value directly.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// GET `endpoint` (must start with `/`) with the given query pairs.
    /// Pairs whose value is `None` are omitted from the query string.
    async fn get(&self, endpoint: &str, query: &[(&str, Option<String>)]) -> Result<Value>;
}

/// [`Transport`] backed by a shared `reqwest` client, attaching the
/// access token as a bearer-auth header on every request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_uri: String,
    access_token: String,
    http: Client,
}

impl HttpTransport {
    pub fn new(base_uri: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            access_token: access_token.into(),
            http: Client::new(),
        }
    }
}

fn query_pairs<'a>(query: &'a [(&'a str, Option<String>)]) -> Vec<(&'a str, &'a str)> {
    query
        .iter()
        .filter_map(|(key, value)| value.as_deref().map(|value| (*key, value)))
        .collect()
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, endpoint: &str, query: &[(&str, Option<String>)]) -> Result<Value> {
        let url = format!("{}{}", self.base_uri, endpoint);

        let res = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&query_pairs(query))
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(Error::Api { status: status.as_u16(), body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_drop_unset_values() {
        let query = [
            ("startTime", Some("100".to_string())),
            ("endTime", None),
            ("units", Some("US".to_string())),
        ];

        assert_eq!(query_pairs(&query), vec![("startTime", "100"), ("units", "US")]);
    }

    #[test]
    fn query_pairs_keep_order() {
        let query = [("b", Some("2".to_string())), ("a", Some("1".to_string()))];
        assert_eq!(query_pairs(&query), vec![("b", "2"), ("a", "1")]);
    }
}
